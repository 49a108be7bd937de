//! Reference data: instruments and the classifications they point to.
//!
//! Canonical field names are snake_case; the `rename(deserialize = ..)`
//! attribute names the spelling the API sends and `alias` keeps the canonical
//! spelling readable, so serialized output parses back to the same values.

use serde::{Deserialize, Serialize};

use super::dates::ApiDateTime;

/// Tradable security tracked by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    pub name: Option<String>,
    #[serde(rename(deserialize = "urlName"), alias = "url_name")]
    pub url_name: Option<String>,
    #[serde(rename(deserialize = "instrument"), alias = "instrument_type")]
    pub instrument_type: i64,
    pub isin: Option<String>,
    pub ticker: Option<String>,
    #[serde(rename(deserialize = "yahoo"), alias = "yahoo_symbol")]
    pub yahoo_symbol: Option<String>,
    #[serde(rename(deserialize = "sectorId"), alias = "sector_id")]
    pub sector_id: Option<i64>,
    #[serde(rename(deserialize = "marketId"), alias = "market_id")]
    pub market_id: i64,
    #[serde(rename(deserialize = "branchId"), alias = "branch_id")]
    pub branch_id: Option<i64>,
    #[serde(rename(deserialize = "countryId"), alias = "country_id")]
    pub country_id: Option<i64>,
    #[serde(rename(deserialize = "listingDate"), alias = "listing_date")]
    pub listing_date: Option<ApiDateTime>,
    #[serde(
        rename(deserialize = "stockPriceCurrency"),
        alias = "stock_price_currency"
    )]
    pub stock_price_currency: Option<String>,
    #[serde(rename(deserialize = "reportCurrency"), alias = "report_currency")]
    pub report_currency: Option<String>,
}

/// Exchange or list where instruments trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename(deserialize = "countryId"), alias = "country_id")]
    pub country_id: Option<i64>,
    #[serde(rename(deserialize = "isIndex"), alias = "is_index")]
    pub is_index: Option<bool>,
    #[serde(rename(deserialize = "exchangeName"), alias = "exchange_name")]
    pub exchange_name: Option<String>,
}

/// Industry classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename(deserialize = "sectorId"), alias = "sector_id")]
    pub sector_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instrument_accepts_api_and_canonical_spellings() {
        let from_api: Instrument = serde_json::from_value(json!({
            "insId": 3,
            "name": "ABB",
            "urlName": "abb",
            "instrument": 0,
            "isin": "CH0012221716",
            "ticker": "ABB",
            "yahoo": "ABB.ST",
            "sectorId": 4,
            "marketId": 1,
            "branchId": 20,
            "countryId": 1,
            "listingDate": "1999-06-22T00:00:00",
            "stockPriceCurrency": "SEK",
            "reportCurrency": "USD"
        }))
        .expect("api spelling parses");

        let canonical = serde_json::to_value(&from_api).expect("serializes");
        assert_eq!(canonical["ins_id"], 3);
        assert_eq!(canonical["listing_date"], "1999-06-22T00:00:00");

        let reparsed: Instrument = serde_json::from_value(canonical).expect("canonical parses");
        assert_eq!(reparsed, from_api);
    }

    #[test]
    fn instrument_optional_fields_may_be_null_or_absent() {
        let instrument: Instrument = serde_json::from_value(json!({
            "insId": 7,
            "name": null,
            "instrument": 0,
            "marketId": 2
        }))
        .expect("parses");

        assert_eq!(instrument.ins_id, 7);
        assert!(instrument.name.is_none());
        assert!(instrument.sector_id.is_none());
        assert!(instrument.listing_date.is_none());
    }

    #[test]
    fn instrument_id_must_be_an_integer() {
        for bad in [json!("7"), json!(7.5)] {
            let result = serde_json::from_value::<Instrument>(json!({
                "insId": bad,
                "instrument": 0,
                "marketId": 2
            }));
            assert!(result.is_err());
        }
    }

    #[test]
    fn market_requires_id() {
        let result = serde_json::from_value::<Market>(json!({ "name": "Large Cap" }));
        assert!(result.is_err());
    }
}
