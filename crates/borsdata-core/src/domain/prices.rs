use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use super::batch::{nullable_vec, rows_or_error, BatchRecord};
use super::dates::{ApiDate, ApiDateTime};

/// One daily price point. Only the close is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    #[serde(rename(deserialize = "d"), alias = "date")]
    pub date: Option<ApiDate>,
    #[serde(rename(deserialize = "o"), alias = "open")]
    pub open: Option<f64>,
    #[serde(rename(deserialize = "h"), alias = "high")]
    pub high: Option<f64>,
    #[serde(rename(deserialize = "l"), alias = "low")]
    pub low: Option<f64>,
    #[serde(rename(deserialize = "c"), alias = "close")]
    pub close: f64,
    #[serde(rename(deserialize = "v"), alias = "volume")]
    pub volume: Option<i64>,
}

/// Per-instrument record of the batch price endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPricesForInstrument {
    pub instrument: i64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(
        rename(deserialize = "stockPricesList"),
        alias = "stock_prices",
        default,
        deserialize_with = "nullable_vec"
    )]
    pub stock_prices: Vec<StockPrice>,
}

impl StockPricesForInstrument {
    /// Prices for this instrument, or the server's per-record error.
    pub fn result(&self) -> Result<&[StockPrice], &str> {
        rows_or_error(self.error.as_deref(), &self.stock_prices)
    }
}

impl BatchRecord for StockPricesForInstrument {
    fn instrument_id(&self) -> i64 {
        self.instrument
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Latest (or by-date) price snapshot for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPriceLastValue {
    #[serde(rename(deserialize = "i"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(rename(deserialize = "d"), alias = "date")]
    pub date: ApiDate,
    #[serde(rename(deserialize = "o"), alias = "open")]
    pub open: f64,
    #[serde(rename(deserialize = "h"), alias = "high")]
    pub high: f64,
    #[serde(rename(deserialize = "l"), alias = "low")]
    pub low: f64,
    #[serde(rename(deserialize = "c"), alias = "close")]
    pub close: f64,
    #[serde(rename(deserialize = "v"), alias = "volume")]
    pub volume: Option<i64>,
}

/// Stock split event. The ratio is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSplit {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(rename(deserialize = "splitDate"), alias = "split_date")]
    pub split_date: ApiDateTime,
    #[serde(
        rename(deserialize = "splitRatio"),
        alias = "split_ratio",
        deserialize_with = "positive_ratio"
    )]
    pub split_ratio: f64,
    #[serde(rename(deserialize = "splitType"), alias = "split_type")]
    pub split_type: String,
}

fn positive_ratio<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let ratio = f64::deserialize(deserializer)?;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(D::Error::custom(format!(
            "split ratio must be positive, got {ratio}"
        )));
    }
    Ok(ratio)
}
