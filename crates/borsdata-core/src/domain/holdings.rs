//! Ownership data: insider trades, short positions and buybacks.

use serde::{Deserialize, Serialize};

use super::batch::{nullable_vec, rows_or_error, BatchRecord};
use super::dates::ApiDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderRow {
    pub misc: bool,
    #[serde(rename(deserialize = "ownerName"), alias = "owner_name", default)]
    pub owner_name: Option<String>,
    #[serde(
        rename(deserialize = "ownerPosition"),
        alias = "owner_position",
        default
    )]
    pub owner_position: Option<String>,
    #[serde(rename(deserialize = "equityProgram"), alias = "equity_program")]
    pub equity_program: bool,
    pub shares: i64,
    pub price: f64,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename(deserialize = "transactionType"), alias = "transaction_type")]
    pub transaction_type: i64,
    #[serde(rename(deserialize = "verificationDate"), alias = "verification_date")]
    pub verification_date: ApiDateTime,
    #[serde(
        rename(deserialize = "transactionDate"),
        alias = "transaction_date",
        default
    )]
    pub transaction_date: Option<ApiDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderHoldings {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<InsiderRow>,
    #[serde(default)]
    pub error: Option<String>,
}

impl InsiderHoldings {
    pub fn result(&self) -> Result<&[InsiderRow], &str> {
        rows_or_error(self.error.as_deref(), &self.values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortPosition {
    #[serde(rename(deserialize = "positionHolder"), alias = "position_holder")]
    pub position_holder: String,
    pub position: f64,
    pub date: ApiDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortPositions {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<ShortPosition>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ShortPositions {
    pub fn result(&self) -> Result<&[ShortPosition], &str> {
        rows_or_error(self.error.as_deref(), &self.values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuybackRow {
    pub change: i64,
    #[serde(rename(deserialize = "changeProc"), alias = "change_proc")]
    pub change_proc: f64,
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub shares: i64,
    #[serde(rename(deserialize = "sharesProc"), alias = "shares_proc")]
    pub shares_proc: f64,
    pub date: ApiDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buybacks {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<BuybackRow>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Buybacks {
    pub fn result(&self) -> Result<&[BuybackRow], &str> {
        rows_or_error(self.error.as_deref(), &self.values)
    }
}

impl BatchRecord for InsiderHoldings {
    fn instrument_id(&self) -> i64 {
        self.ins_id
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl BatchRecord for ShortPositions {
    fn instrument_id(&self) -> i64 {
        self.ins_id
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl BatchRecord for Buybacks {
    fn instrument_id(&self) -> i64 {
        self.ins_id
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
