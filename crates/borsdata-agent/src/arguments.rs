//! Typed tool arguments.
//!
//! Each tool's JSON arguments deserialize into one of these structs; missing
//! required fields and wrong types fail there, before any request is built.
//! Unknown fields are ignored.

use borsdata_core::{
    ApiDate, ClientError, KpiHistoryBatchRequest, KpiHistoryRequest, KpiSummaryRequest, PriceType,
    ReportType, ReportsBatchRequest, ReportsRequest, StockPricesBatchRequest, StockPricesRequest,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ToolError;

/// Normalize raw arguments to a JSON object.
///
/// Accepts an object, its JSON text, or `null` (no arguments).
pub fn argument_object(tool: &str, raw: Value) -> Result<Map<String, Value>, ToolError> {
    match raw {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        Value::String(text) if text.trim().is_empty() => Ok(Map::new()),
        Value::String(text) => {
            let parsed: Value = serde_json::from_str(&text)
                .map_err(|source| ToolError::invalid_arguments(tool, source))?;
            argument_object(tool, parsed)
        }
        other => Err(ToolError::NotAnObject {
            tool: tool.to_owned(),
            found: json_type(&other),
        }),
    }
}

/// Deserialize an argument object into the tool's struct.
pub fn parse<T: DeserializeOwned>(
    tool: &str,
    arguments: Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|source| ToolError::invalid_arguments(tool, source))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

const fn default_price_count() -> u32 {
    borsdata_core::requests::DEFAULT_PRICE_COUNT
}

const fn default_report_count() -> u32 {
    borsdata_core::requests::DEFAULT_REPORT_COUNT
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockPricesArgs {
    pub instrument_id: i64,
    #[serde(default)]
    pub from_date: Option<ApiDate>,
    #[serde(default)]
    pub to_date: Option<ApiDate>,
    #[serde(default = "default_price_count")]
    pub max_count: u32,
}

impl StockPricesArgs {
    pub fn request(&self) -> StockPricesRequest {
        let mut request = StockPricesRequest::new(self.instrument_id).max_count(self.max_count);
        request.from = self.from_date.map(ApiDate::into_inner);
        request.to = self.to_date.map(ApiDate::into_inner);
        request
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockPricesBatchArgs {
    pub instrument_ids: Vec<i64>,
    #[serde(default)]
    pub from_date: Option<ApiDate>,
    #[serde(default)]
    pub to_date: Option<ApiDate>,
}

impl StockPricesBatchArgs {
    pub fn request(&self) -> Result<StockPricesBatchRequest, ClientError> {
        let mut request = StockPricesBatchRequest::new(self.instrument_ids.clone())?;
        request.from = self.from_date.map(ApiDate::into_inner);
        request.to = self.to_date.map(ApiDate::into_inner);
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstrumentIdsArgs {
    pub instrument_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateArgs {
    pub date: ApiDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockSplitsArgs {
    #[serde(default)]
    pub from_date: Option<ApiDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportsArgs {
    pub instrument_id: i64,
    #[serde(default)]
    pub report_type: ReportType,
    #[serde(default = "default_report_count")]
    pub max_count: u32,
    #[serde(default)]
    pub original_currency: bool,
}

impl ReportsArgs {
    pub fn request(&self) -> ReportsRequest {
        ReportsRequest::new(self.instrument_id, self.report_type)
            .max_count(self.max_count)
            .original_currency(self.original_currency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportsBatchArgs {
    pub instrument_ids: Vec<i64>,
    #[serde(default = "default_report_count")]
    pub max_year_count: u32,
    #[serde(default = "default_report_count")]
    pub max_quarter_r12_count: u32,
    #[serde(default)]
    pub original_currency: bool,
}

impl ReportsBatchArgs {
    pub fn request(&self) -> Result<ReportsBatchRequest, ClientError> {
        Ok(ReportsBatchRequest::new(self.instrument_ids.clone())?
            .max_year_count(Some(self.max_year_count))
            .max_quarter_r12_count(Some(self.max_quarter_r12_count))
            .original_currency(self.original_currency))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KpiHistoryArgs {
    pub instrument_id: i64,
    pub kpi_id: i64,
    pub report_type: ReportType,
    #[serde(default)]
    pub price_type: PriceType,
    #[serde(default)]
    pub max_count: Option<u32>,
}

impl KpiHistoryArgs {
    pub fn request(&self) -> KpiHistoryRequest {
        KpiHistoryRequest::new(self.instrument_id, self.kpi_id, self.report_type)
            .price_type(self.price_type)
            .max_count(self.max_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KpiHistoryBatchArgs {
    pub instrument_ids: Vec<i64>,
    pub kpi_id: i64,
    pub report_type: ReportType,
    #[serde(default)]
    pub price_type: PriceType,
    #[serde(default)]
    pub max_count: Option<u32>,
}

impl KpiHistoryBatchArgs {
    pub fn request(&self) -> Result<KpiHistoryBatchRequest, ClientError> {
        Ok(
            KpiHistoryBatchRequest::new(self.instrument_ids.clone(), self.kpi_id, self.report_type)?
                .price_type(self.price_type)
                .max_count(self.max_count),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KpiSummaryArgs {
    pub instrument_id: i64,
    pub report_type: ReportType,
    #[serde(default)]
    pub max_count: Option<u32>,
}

impl KpiSummaryArgs {
    pub fn request(&self) -> KpiSummaryRequest {
        KpiSummaryRequest::new(self.instrument_id, self.report_type).max_count(self.max_count)
    }
}
