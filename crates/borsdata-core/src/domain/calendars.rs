use serde::{Deserialize, Serialize};

use super::batch::{nullable_vec, rows_or_error, BatchRecord};
use super::dates::ApiDateTime;

/// Company description text in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentDescription {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(rename(deserialize = "languageCode"), alias = "language_code")]
    pub language_code: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl InstrumentDescription {
    /// Description text (absent when none exists), or the server's error.
    pub fn result(&self) -> Result<Option<&str>, &str> {
        match self.error.as_deref() {
            Some(error) => Err(error),
            None => Ok(self.text.as_deref()),
        }
    }
}

impl BatchRecord for InstrumentDescription {
    fn instrument_id(&self) -> i64 {
        self.ins_id
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCalendarDate {
    #[serde(rename(deserialize = "releaseDate"), alias = "release_date")]
    pub release_date: ApiDateTime,
    #[serde(rename(deserialize = "reportType"), alias = "report_type", default)]
    pub report_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCalendar {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<ReportCalendarDate>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ReportCalendar {
    pub fn result(&self) -> Result<&[ReportCalendarDate], &str> {
        rows_or_error(self.error.as_deref(), &self.values)
    }
}

impl BatchRecord for ReportCalendar {
    fn instrument_id(&self) -> i64 {
        self.ins_id
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendDate {
    #[serde(rename(deserialize = "amountPaid"), alias = "amount_paid", default)]
    pub amount_paid: Option<f64>,
    #[serde(
        rename(deserialize = "currencyShortName"),
        alias = "currency_short_name",
        default
    )]
    pub currency_short_name: Option<String>,
    #[serde(
        rename(deserialize = "distributionFrequency"),
        alias = "distribution_frequency",
        default
    )]
    pub distribution_frequency: Option<i64>,
    #[serde(
        rename(deserialize = "excludingDate"),
        alias = "excluding_date",
        default
    )]
    pub excluding_date: Option<ApiDateTime>,
    #[serde(rename(deserialize = "dividendType"), alias = "dividend_type")]
    pub dividend_type: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendCalendar {
    #[serde(rename(deserialize = "insId"), alias = "ins_id")]
    pub ins_id: i64,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub values: Vec<DividendDate>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DividendCalendar {
    pub fn result(&self) -> Result<&[DividendDate], &str> {
        rows_or_error(self.error.as_deref(), &self.values)
    }
}

impl BatchRecord for DividendCalendar {
    fn instrument_id(&self) -> i64 {
        self.ins_id
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn report_calendar_parses_release_dates() {
        let calendar: ReportCalendar = serde_json::from_value(json!({
            "insId": 3,
            "values": [
                { "releaseDate": "2024-04-25T00:00:00", "reportType": "Kvartalsrapport" },
                { "releaseDate": "2024-07-18T00:00:00" }
            ]
        }))
        .expect("parses");

        let dates = calendar.result().expect("no error");
        assert_eq!(dates[0].release_date.date(), date!(2024 - 04 - 25));
        assert!(dates[1].report_type.is_none());
    }

    #[test]
    fn dividend_calendar_requires_dividend_type() {
        let result = serde_json::from_value::<DividendCalendar>(json!({
            "insId": 3,
            "values": [{ "amountPaid": 2.5, "currencyShortName": "SEK" }]
        }));
        assert!(result.is_err());

        let calendar: DividendCalendar = serde_json::from_value(json!({
            "insId": 3,
            "values": [{
                "amountPaid": 2.5, "currencyShortName": "SEK", "distributionFrequency": 1,
                "excludingDate": "2024-05-03T00:00:00", "dividendType": 0
            }]
        }))
        .expect("parses");
        assert_eq!(calendar.values[0].amount_paid, Some(2.5));
    }

    #[test]
    fn description_surfaces_error() {
        let description: InstrumentDescription = serde_json::from_value(json!({
            "insId": 4, "languageCode": "en", "text": null, "error": "Missing"
        }))
        .expect("parses");
        assert!(!description.is_ok());
        assert_eq!(description.instrument_id(), 4);
    }
}
