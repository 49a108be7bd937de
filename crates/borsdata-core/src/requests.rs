use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::format_query_date;
use crate::error::ClientError;
use crate::transport::QueryParams;

/// Most instrument ids accepted by one batch call.
pub const MAX_BATCH_INSTRUMENTS: usize = 50;
/// Upper bound of `maxYearCount` on the report batch endpoint.
pub const MAX_YEAR_COUNT: u32 = 20;
/// Upper bound of `maxQuarterR12Count` on the report batch endpoint.
pub const MAX_QUARTER_R12_COUNT: u32 = 40;

pub const DEFAULT_PRICE_COUNT: u32 = 20;
pub const DEFAULT_REPORT_COUNT: u32 = 10;

/// Report period granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Year,
    R12,
    Quarter,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [Self::Year, Self::R12, Self::Quarter];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::R12 => "r12",
            Self::Quarter => "quarter",
        }
    }
}

impl Display for ReportType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ClientError::precondition(format!(
                    "unknown report type '{value}', expected year, r12 or quarter"
                ))
            })
    }
}

/// Which daily price a KPI is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Mean,
    High,
    Low,
}

impl PriceType {
    pub const ALL: [PriceType; 3] = [Self::Mean, Self::High, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl Display for PriceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceType {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ClientError::precondition(format!(
                    "unknown price type '{value}', expected mean, high or low"
                ))
            })
    }
}

/// Instrument ids for one batch call, at most [`MAX_BATCH_INSTRUMENTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentIds(Vec<i64>);

impl InstrumentIds {
    pub fn new(ids: impl Into<Vec<i64>>) -> Result<Self, ClientError> {
        let ids = ids.into();
        if ids.len() > MAX_BATCH_INSTRUMENTS {
            return Err(ClientError::precondition(format!(
                "at most {MAX_BATCH_INSTRUMENTS} instrument ids are allowed per request, got {}",
                ids.len()
            )));
        }
        Ok(Self(ids))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form used by the `instList` parameter.
    pub fn join(&self) -> String {
        join_instrument_ids(&self.0)
    }
}

pub fn join_instrument_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn positive_count(name: &str, value: u32) -> Result<u32, ClientError> {
    if value == 0 {
        return Err(ClientError::precondition(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(value)
}

fn bounded_count(name: &str, value: u32, max: u32) -> Result<u32, ClientError> {
    positive_count(name, value)?;
    if value > max {
        return Err(ClientError::precondition(format!(
            "{name} must be {max} or less, got {value}"
        )));
    }
    Ok(value)
}

fn original_flag(original_currency: bool) -> &'static str {
    if original_currency {
        "1"
    } else {
        "0"
    }
}

/// Daily prices for one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPricesRequest {
    pub ins_id: i64,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub max_count: u32,
}

impl StockPricesRequest {
    pub fn new(ins_id: i64) -> Self {
        Self {
            ins_id,
            from: None,
            to: None,
            max_count: DEFAULT_PRICE_COUNT,
        }
    }

    pub fn from_date(mut self, from: Date) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: Date) -> Self {
        self.to = Some(to);
        self
    }

    pub fn max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn path(&self) -> String {
        format!("/instruments/{}/stockprices", self.ins_id)
    }

    pub fn query(&self) -> Result<QueryParams, ClientError> {
        Ok(QueryParams::new()
            .with("maxCount", positive_count("maxCount", self.max_count)?)
            .with_opt("from", self.from.map(format_query_date))
            .with_opt("to", self.to.map(format_query_date)))
    }
}

/// Daily prices for up to 50 instruments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPricesBatchRequest {
    pub ids: InstrumentIds,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl StockPricesBatchRequest {
    pub fn new(ids: impl Into<Vec<i64>>) -> Result<Self, ClientError> {
        Ok(Self {
            ids: InstrumentIds::new(ids)?,
            from: None,
            to: None,
        })
    }

    pub fn from_date(mut self, from: Date) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: Date) -> Self {
        self.to = Some(to);
        self
    }

    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .with("instList", self.ids.join())
            .with_opt("from", self.from.map(format_query_date))
            .with_opt("to", self.to.map(format_query_date))
    }
}

/// Reports of one type for one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportsRequest {
    pub ins_id: i64,
    pub report_type: ReportType,
    pub max_count: u32,
    pub original_currency: bool,
}

impl ReportsRequest {
    pub fn new(ins_id: i64, report_type: ReportType) -> Self {
        Self {
            ins_id,
            report_type,
            max_count: DEFAULT_REPORT_COUNT,
            original_currency: false,
        }
    }

    pub fn max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn original_currency(mut self, original_currency: bool) -> Self {
        self.original_currency = original_currency;
        self
    }

    pub fn path(&self) -> String {
        format!("/instruments/{}/reports/{}", self.ins_id, self.report_type)
    }

    pub fn query(&self) -> Result<QueryParams, ClientError> {
        Ok(QueryParams::new()
            .with("maxCount", positive_count("maxCount", self.max_count)?)
            .with("original", original_flag(self.original_currency)))
    }
}

/// All report types for up to 50 instruments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportsBatchRequest {
    pub ids: InstrumentIds,
    pub max_year_count: Option<u32>,
    pub max_quarter_r12_count: Option<u32>,
    pub original_currency: bool,
}

impl ReportsBatchRequest {
    pub fn new(ids: impl Into<Vec<i64>>) -> Result<Self, ClientError> {
        Ok(Self {
            ids: InstrumentIds::new(ids)?,
            max_year_count: Some(DEFAULT_REPORT_COUNT),
            max_quarter_r12_count: Some(DEFAULT_REPORT_COUNT),
            original_currency: false,
        })
    }

    pub fn max_year_count(mut self, count: Option<u32>) -> Self {
        self.max_year_count = count;
        self
    }

    pub fn max_quarter_r12_count(mut self, count: Option<u32>) -> Self {
        self.max_quarter_r12_count = count;
        self
    }

    pub fn original_currency(mut self, original_currency: bool) -> Self {
        self.original_currency = original_currency;
        self
    }

    pub fn query(&self) -> Result<QueryParams, ClientError> {
        let year = self
            .max_year_count
            .map(|count| bounded_count("maxYearCount", count, MAX_YEAR_COUNT))
            .transpose()?;
        let quarter = self
            .max_quarter_r12_count
            .map(|count| bounded_count("maxQuarterR12Count", count, MAX_QUARTER_R12_COUNT))
            .transpose()?;

        Ok(QueryParams::new()
            .with("instList", self.ids.join())
            .with_opt("maxYearCount", year)
            .with_opt("maxQuarterR12Count", quarter)
            .with("original", original_flag(self.original_currency)))
    }
}

/// History of one KPI for one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiHistoryRequest {
    pub ins_id: i64,
    pub kpi_id: i64,
    pub report_type: ReportType,
    pub price_type: PriceType,
    pub max_count: Option<u32>,
}

impl KpiHistoryRequest {
    pub fn new(ins_id: i64, kpi_id: i64, report_type: ReportType) -> Self {
        Self {
            ins_id,
            kpi_id,
            report_type,
            price_type: PriceType::default(),
            max_count: None,
        }
    }

    pub fn price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = price_type;
        self
    }

    pub fn max_count(mut self, max_count: Option<u32>) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn path(&self) -> String {
        format!(
            "/instruments/{}/kpis/{}/{}/{}/history",
            self.ins_id, self.kpi_id, self.report_type, self.price_type
        )
    }

    pub fn query(&self) -> Result<QueryParams, ClientError> {
        let max_count = self
            .max_count
            .map(|count| positive_count("maxCount", count))
            .transpose()?;
        Ok(QueryParams::new().with_opt("maxCount", max_count))
    }
}

/// History of one KPI for up to 50 instruments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiHistoryBatchRequest {
    pub ids: InstrumentIds,
    pub kpi_id: i64,
    pub report_type: ReportType,
    pub price_type: PriceType,
    pub max_count: Option<u32>,
}

impl KpiHistoryBatchRequest {
    pub fn new(
        ids: impl Into<Vec<i64>>,
        kpi_id: i64,
        report_type: ReportType,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            ids: InstrumentIds::new(ids)?,
            kpi_id,
            report_type,
            price_type: PriceType::default(),
            max_count: None,
        })
    }

    pub fn price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = price_type;
        self
    }

    pub fn max_count(mut self, max_count: Option<u32>) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn path(&self) -> String {
        format!(
            "/instruments/kpis/{}/{}/{}/history",
            self.kpi_id, self.report_type, self.price_type
        )
    }

    pub fn query(&self) -> Result<QueryParams, ClientError> {
        let max_count = self
            .max_count
            .map(|count| positive_count("maxCount", count))
            .transpose()?;
        Ok(QueryParams::new()
            .with("instList", self.ids.join())
            .with_opt("maxCount", max_count))
    }
}

/// Every KPI for one instrument and report type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiSummaryRequest {
    pub ins_id: i64,
    pub report_type: ReportType,
    pub max_count: Option<u32>,
}

impl KpiSummaryRequest {
    pub fn new(ins_id: i64, report_type: ReportType) -> Self {
        Self {
            ins_id,
            report_type,
            max_count: None,
        }
    }

    pub fn max_count(mut self, max_count: Option<u32>) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn path(&self) -> String {
        format!("/instruments/{}/kpis/{}/summary", self.ins_id, self.report_type)
    }

    pub fn query(&self) -> Result<QueryParams, ClientError> {
        let max_count = self
            .max_count
            .map(|count| positive_count("maxCount", count))
            .transpose()?;
        Ok(QueryParams::new().with_opt("maxCount", max_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientErrorKind;
    use time::macros::date;

    #[test]
    fn instrument_ids_cap_at_fifty() {
        let fifty: Vec<i64> = (1..=50).collect();
        assert_eq!(InstrumentIds::new(fifty).map(|ids| ids.len()).ok(), Some(50));

        let too_many: Vec<i64> = (1..=51).collect();
        let error = InstrumentIds::new(too_many).expect_err("51 ids must fail");
        assert_eq!(error.kind(), ClientErrorKind::Precondition);

        assert!(InstrumentIds::new(Vec::new()).map(|ids| ids.is_empty()).unwrap_or(false));
    }

    #[test]
    fn joins_ids_with_commas() {
        assert_eq!(join_instrument_ids(&[1, 2, 750]), "1,2,750");
        assert_eq!(join_instrument_ids(&[]), "");
    }

    #[test]
    fn stock_prices_query_formats_dates_and_omits_absent_ones() {
        let request = StockPricesRequest::new(3).from_date(date!(2023 - 01 - 02));
        let query = request.query().expect("valid");

        assert_eq!(request.path(), "/instruments/3/stockprices");
        assert_eq!(query.get("maxCount"), Some("20"));
        assert_eq!(query.get("from"), Some("2023-01-02"));
        assert_eq!(query.get("to"), None);
    }

    #[test]
    fn reports_batch_validates_count_bounds() {
        let base = ReportsBatchRequest::new(vec![1, 2]).expect("valid ids");

        let query = base.clone().query().expect("defaults are valid");
        assert_eq!(query.get("maxYearCount"), Some("10"));
        assert_eq!(query.get("maxQuarterR12Count"), Some("10"));
        assert_eq!(query.get("original"), Some("0"));

        for bad in [
            base.clone().max_year_count(Some(21)),
            base.clone().max_year_count(Some(0)),
            base.clone().max_quarter_r12_count(Some(41)),
        ] {
            let error = bad.query().expect_err("out of range");
            assert_eq!(error.kind(), ClientErrorKind::Precondition);
        }

        let edge = base
            .max_year_count(Some(20))
            .max_quarter_r12_count(None)
            .original_currency(true)
            .query()
            .expect("edge values are valid");
        assert_eq!(edge.get("maxYearCount"), Some("20"));
        assert_eq!(edge.get("maxQuarterR12Count"), None);
        assert_eq!(edge.get("original"), Some("1"));
    }

    #[test]
    fn kpi_paths_embed_types() {
        let single = KpiHistoryRequest::new(3, 2, ReportType::R12).price_type(PriceType::High);
        assert_eq!(single.path(), "/instruments/3/kpis/2/r12/high/history");
        assert!(single.query().expect("valid").is_empty());

        let batch = KpiHistoryBatchRequest::new(vec![3, 4], 2, ReportType::Year)
            .expect("valid")
            .max_count(Some(5));
        assert_eq!(batch.path(), "/instruments/kpis/2/year/mean/history");
        let query = batch.query().expect("valid");
        assert_eq!(query.get("instList"), Some("3,4"));
        assert_eq!(query.get("maxCount"), Some("5"));

        let summary = KpiSummaryRequest::new(3, ReportType::Quarter);
        assert_eq!(summary.path(), "/instruments/3/kpis/quarter/summary");
    }

    #[test]
    fn parses_enum_names() {
        assert_eq!("R12".parse::<ReportType>().ok(), Some(ReportType::R12));
        assert_eq!("low".parse::<PriceType>().ok(), Some(PriceType::Low));
        assert!("weekly".parse::<ReportType>().is_err());
        assert_eq!(PriceType::default(), PriceType::Mean);
    }
}
