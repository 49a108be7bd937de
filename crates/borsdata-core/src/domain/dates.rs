use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Calendar date as sent by the API (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiDate(Date);

impl ApiDate {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parse `YYYY-MM-DD`, or the date part of an ISO-8601 date-time.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
            return Some(Self(date));
        }
        ApiDateTime::parse(trimmed).map(|value| Self(value.date()))
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }
}

impl From<Date> for ApiDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for ApiDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_date(f, self.0)
    }
}

impl Serialize for ApiDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid date '{value}', expected YYYY-MM-DD")))
    }
}

/// Naive date-time as sent by the API; offsets are normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiDateTime(PrimitiveDateTime);

impl ApiDateTime {
    pub const fn new(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    /// Accepts ISO-8601 dates and date-times, with or without fractional
    /// seconds and offset.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        if let Ok(with_offset) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            let utc = with_offset.to_offset(UtcOffset::UTC);
            return Some(Self(PrimitiveDateTime::new(utc.date(), utc.time())));
        }

        let formats = [
            format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
            format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
            format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        ];
        for format in formats {
            if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, format) {
                return Some(Self(parsed));
            }
        }

        Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| Self(PrimitiveDateTime::new(date, Time::MIDNIGHT)))
    }

    pub const fn date(self) -> Date {
        self.0.date()
    }

    pub const fn into_inner(self) -> PrimitiveDateTime {
        self.0
    }
}

impl From<PrimitiveDateTime> for ApiDateTime {
    fn from(value: PrimitiveDateTime) -> Self {
        Self(value)
    }
}

impl Display for ApiDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_date(f, self.0.date())?;
        write!(
            f,
            "T{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

impl Serialize for ApiDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).ok_or_else(|| {
            D::Error::custom(format!("invalid date-time '{value}', expected ISO-8601"))
        })
    }
}

/// Format a date the way every query parameter expects it.
pub fn format_query_date(date: Date) -> String {
    ApiDate(date).to_string()
}

fn write_date(f: &mut Formatter<'_>, date: Date) -> std::fmt::Result {
    write!(
        f,
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
