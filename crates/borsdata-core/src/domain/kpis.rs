use serde::{Deserialize, Serialize};

use super::batch::{nullable_vec, rows_or_error, BatchRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiMetadata {
    #[serde(rename(deserialize = "kpiId"), alias = "kpi_id")]
    pub kpi_id: i64,
    #[serde(rename(deserialize = "nameSv"), alias = "name_sv")]
    pub name_sv: Option<String>,
    #[serde(rename(deserialize = "nameEn"), alias = "name_en")]
    pub name_en: Option<String>,
    pub format: Option<String>,
    #[serde(rename(deserialize = "isString"), alias = "is_string")]
    pub is_string: bool,
}

/// KPI value for one instrument: numeric, textual, or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKpiValue")]
pub struct KpiValue {
    pub ins_id: i64,
    pub numeric: Option<f64>,
    pub text: Option<String>,
}

#[derive(Deserialize)]
struct RawKpiValue {
    #[serde(rename = "i", alias = "ins_id")]
    ins_id: i64,
    #[serde(rename = "n", alias = "numeric", default)]
    numeric: Option<f64>,
    #[serde(rename = "s", alias = "text", default)]
    text: Option<String>,
}

impl TryFrom<RawKpiValue> for KpiValue {
    type Error = String;

    fn try_from(raw: RawKpiValue) -> Result<Self, Self::Error> {
        if raw.numeric.is_some() && raw.text.is_some() {
            return Err(format!(
                "kpi value for instrument {} has both a numeric and a string value",
                raw.ins_id
            ));
        }
        Ok(Self {
            ins_id: raw.ins_id,
            numeric: raw.numeric,
            text: raw.text,
        })
    }
}

/// One `(year, period)` observation of a KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiHistoryPoint {
    #[serde(rename(deserialize = "y"), alias = "year")]
    pub year: i32,
    #[serde(rename(deserialize = "p"), alias = "period")]
    pub period: i32,
    #[serde(rename(deserialize = "v"), alias = "value", default)]
    pub value: Option<f64>,
}

/// Single-instrument KPI response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiHistory {
    #[serde(rename(deserialize = "kpiId"), alias = "kpi_id")]
    pub kpi_id: i64,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub calculation: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<KpiValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiHistoryForInstrument {
    pub instrument: i64,
    #[serde(rename(deserialize = "kpiId"), alias = "kpi_id", default)]
    pub kpi_id: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<KpiHistoryPoint>,
}

impl KpiHistoryForInstrument {
    pub fn result(&self) -> Result<&[KpiHistoryPoint], &str> {
        rows_or_error(self.error.as_deref(), &self.values)
    }
}

impl BatchRecord for KpiHistoryForInstrument {
    fn instrument_id(&self) -> i64 {
        self.instrument
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Multi-instrument KPI history response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiHistoryBatch {
    #[serde(rename(deserialize = "kpiId"), alias = "kpi_id")]
    pub kpi_id: i64,
    #[serde(rename(deserialize = "reportTime"), alias = "report_time", default)]
    pub report_time: Option<String>,
    #[serde(rename(deserialize = "priceValue"), alias = "price_value", default)]
    pub price_value: Option<String>,
    #[serde(
        rename(deserialize = "kpisList"),
        alias = "kpis_list",
        default,
        deserialize_with = "nullable_vec"
    )]
    pub kpis_list: Vec<KpiHistoryForInstrument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummaryGroup {
    // Capitalized on the wire, unlike every other KPI id.
    #[serde(rename(deserialize = "KpiId"), alias = "kpi_id")]
    pub kpi_id: i64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<KpiHistoryPoint>,
}
