use serde::{Deserialize, Serialize};

use super::batch::{nullable_vec, rows_or_error, BatchRecord};
use super::dates::ApiDateTime;
use crate::requests::ReportType;

/// Financial report for one period.
///
/// Only `year` and `period` are guaranteed; line items the company did not
/// disclose arrive as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub year: i32,
    pub period: i32,
    pub revenues: Option<f64>,
    #[serde(rename(deserialize = "gross_Income"), alias = "gross_income")]
    pub gross_income: Option<f64>,
    #[serde(rename(deserialize = "operating_Income"), alias = "operating_income")]
    pub operating_income: Option<f64>,
    #[serde(rename(deserialize = "profit_Before_Tax"), alias = "profit_before_tax")]
    pub profit_before_tax: Option<f64>,
    #[serde(
        rename(deserialize = "profit_To_Equity_Holders"),
        alias = "profit_to_equity_holders"
    )]
    pub profit_to_equity_holders: Option<f64>,
    #[serde(
        rename(deserialize = "earnings_Per_Share"),
        alias = "earnings_per_share"
    )]
    pub earnings_per_share: Option<f64>,
    #[serde(rename(deserialize = "number_Of_Shares"), alias = "number_of_shares")]
    pub number_of_shares: Option<f64>,
    pub dividend: Option<f64>,
    #[serde(rename(deserialize = "intangible_Assets"), alias = "intangible_assets")]
    pub intangible_assets: Option<f64>,
    #[serde(rename(deserialize = "tangible_Assets"), alias = "tangible_assets")]
    pub tangible_assets: Option<f64>,
    #[serde(rename(deserialize = "financial_Assets"), alias = "financial_assets")]
    pub financial_assets: Option<f64>,
    #[serde(
        rename(deserialize = "non_Current_Assets"),
        alias = "non_current_assets"
    )]
    pub non_current_assets: Option<f64>,
    #[serde(
        rename(deserialize = "cash_And_Equivalents"),
        alias = "cash_and_equivalents"
    )]
    pub cash_and_equivalents: Option<f64>,
    #[serde(rename(deserialize = "current_Assets"), alias = "current_assets")]
    pub current_assets: Option<f64>,
    #[serde(rename(deserialize = "total_Assets"), alias = "total_assets")]
    pub total_assets: Option<f64>,
    #[serde(rename(deserialize = "total_Equity"), alias = "total_equity")]
    pub total_equity: Option<f64>,
    #[serde(
        rename(deserialize = "non_Current_Liabilities"),
        alias = "non_current_liabilities"
    )]
    pub non_current_liabilities: Option<f64>,
    #[serde(
        rename(deserialize = "current_Liabilities"),
        alias = "current_liabilities"
    )]
    pub current_liabilities: Option<f64>,
    #[serde(
        rename(deserialize = "total_Liabilities_And_Equity"),
        alias = "total_liabilities_and_equity"
    )]
    pub total_liabilities_and_equity: Option<f64>,
    #[serde(rename(deserialize = "net_Debt"), alias = "net_debt")]
    pub net_debt: Option<f64>,
    #[serde(
        rename(deserialize = "cash_Flow_From_Operating_Activities"),
        alias = "cash_flow_from_operating_activities"
    )]
    pub cash_flow_from_operating_activities: Option<f64>,
    #[serde(
        rename(deserialize = "cash_Flow_From_Investing_Activities"),
        alias = "cash_flow_from_investing_activities"
    )]
    pub cash_flow_from_investing_activities: Option<f64>,
    #[serde(
        rename(deserialize = "cash_Flow_From_Financing_Activities"),
        alias = "cash_flow_from_financing_activities"
    )]
    pub cash_flow_from_financing_activities: Option<f64>,
    #[serde(
        rename(deserialize = "cash_Flow_For_The_Year"),
        alias = "cash_flow_for_the_year"
    )]
    pub cash_flow_for_the_year: Option<f64>,
    #[serde(rename(deserialize = "free_Cash_Flow"), alias = "free_cash_flow")]
    pub free_cash_flow: Option<f64>,
    #[serde(
        rename(deserialize = "stock_Price_Average"),
        alias = "stock_price_average"
    )]
    pub stock_price_average: Option<f64>,
    #[serde(rename(deserialize = "stock_Price_High"), alias = "stock_price_high")]
    pub stock_price_high: Option<f64>,
    #[serde(rename(deserialize = "stock_Price_Low"), alias = "stock_price_low")]
    pub stock_price_low: Option<f64>,
    #[serde(rename(deserialize = "report_Start_Date"), alias = "report_start_date")]
    pub report_start_date: Option<ApiDateTime>,
    #[serde(rename(deserialize = "report_End_Date"), alias = "report_end_date")]
    pub report_end_date: Option<ApiDateTime>,
    #[serde(
        rename(deserialize = "broken_Fiscal_Year"),
        alias = "broken_fiscal_year"
    )]
    pub broken_fiscal_year: Option<bool>,
    pub currency: Option<String>,
    #[serde(rename(deserialize = "currency_Ratio"), alias = "currency_ratio")]
    pub currency_ratio: Option<f64>,
    #[serde(rename(deserialize = "net_Sales"), alias = "net_sales")]
    pub net_sales: Option<f64>,
    #[serde(rename(deserialize = "report_Date"), alias = "report_date")]
    pub report_date: Option<ApiDateTime>,
}

/// Per-instrument record of the batch report endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsForInstrument {
    pub instrument: i64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(
        rename(deserialize = "reportsYear"),
        alias = "reports_year",
        default,
        deserialize_with = "nullable_vec"
    )]
    pub reports_year: Vec<Report>,
    #[serde(
        rename(deserialize = "reportsQuarter"),
        alias = "reports_quarter",
        default,
        deserialize_with = "nullable_vec"
    )]
    pub reports_quarter: Vec<Report>,
    #[serde(
        rename(deserialize = "reportsR12"),
        alias = "reports_r12",
        default,
        deserialize_with = "nullable_vec"
    )]
    pub reports_r12: Vec<Report>,
}

impl ReportsForInstrument {
    pub fn reports(&self, report_type: ReportType) -> &[Report] {
        match report_type {
            ReportType::Year => &self.reports_year,
            ReportType::R12 => &self.reports_r12,
            ReportType::Quarter => &self.reports_quarter,
        }
    }

    /// Reports of one period type, or the server's per-record error.
    pub fn result(&self, report_type: ReportType) -> Result<&[Report], &str> {
        rows_or_error(self.error.as_deref(), self.reports(report_type))
    }
}

impl BatchRecord for ReportsForInstrument {
    fn instrument_id(&self) -> i64 {
        self.instrument
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Describes one report line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    // The API spells this key without the second "t".
    #[serde(rename(deserialize = "reportPropery"), alias = "report_property")]
    pub report_property: Option<String>,
    #[serde(rename(deserialize = "nameSv"), alias = "name_sv")]
    pub name_sv: Option<String>,
    #[serde(rename(deserialize = "nameEn"), alias = "name_en")]
    pub name_en: Option<String>,
    pub format: Option<String>,
}
