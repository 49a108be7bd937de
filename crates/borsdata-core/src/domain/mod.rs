//! # Domain Models
//!
//! Typed entities for every payload the Borsdata API returns.
//!
//! ## Field names
//!
//! Each entity serializes with snake_case names. The API's own spelling
//! (`insId`, `gross_Income`, single letters like `c` for close) is declared
//! on the field and accepted on input alongside the snake_case name, so a
//! value written by this crate parses back unchanged.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Instrument`], [`Market`], [`Branch`], [`Sector`], [`Country`] | Reference data |
//! | [`StockPrice`], [`StockPriceLastValue`], [`StockSplit`] | Prices and splits |
//! | [`Report`], [`ReportMetadata`] | Financial reports |
//! | [`KpiMetadata`], [`KpiValue`], [`KpiHistory`], [`KpiHistoryBatch`], [`KpiSummaryGroup`] | Key figures |
//! | [`InsiderHoldings`], [`ShortPositions`], [`Buybacks`] | Ownership |
//! | [`InstrumentDescription`], [`ReportCalendar`], [`DividendCalendar`] | Calendars and descriptions |
//! | [`TranslationMetadata`] | Localized names of branches, sectors and countries |
//!
//! ## Batch records
//!
//! Batch endpoints return one record per requested instrument. A record may
//! carry an `error` string instead of data while the HTTP call itself
//! succeeded; see [`BatchRecord`].

mod batch;
mod calendars;
mod dates;
mod holdings;
mod kpis;
mod prices;
mod reference;
mod reports;
mod translations;

pub use batch::{partition_errors, BatchRecord};
pub use calendars::{
    DividendCalendar, DividendDate, InstrumentDescription, ReportCalendar, ReportCalendarDate,
};
pub use dates::{format_query_date, ApiDate, ApiDateTime};
pub use holdings::{
    BuybackRow, Buybacks, InsiderHoldings, InsiderRow, ShortPosition, ShortPositions,
};
pub use kpis::{
    KpiHistory, KpiHistoryBatch, KpiHistoryForInstrument, KpiHistoryPoint, KpiMetadata,
    KpiSummaryGroup, KpiValue,
};
pub use prices::{StockPrice, StockPriceLastValue, StockPricesForInstrument, StockSplit};
pub use reference::{Branch, Country, Instrument, Market, Sector};
pub use reports::{Report, ReportMetadata, ReportsForInstrument};
pub use translations::{
    derive_translations, TranslationCategory, TranslationItem, TranslationMetadata,
    TranslationRecord,
};
