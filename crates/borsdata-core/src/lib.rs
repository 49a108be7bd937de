//! # Borsdata Core
//!
//! Typed client for the Borsdata financial data REST API.
//!
//! ## Overview
//!
//! - **Domain models** for instruments, prices, reports, KPIs, holdings and
//!   calendars, parsed from the API's mixed field spellings
//! - **Transport** that authenticates every GET, retries rate-limited calls
//!   with randomized exponential backoff and classifies failures
//! - **Endpoint operations**, one async method per API capability on
//!   [`BorsdataClient`]
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`BorsdataClient`] and its 28 operations |
//! | [`config`] | API key, base URL, retry and timeout settings |
//! | [`domain`] | Domain models |
//! | [`endpoint`] | Operation names and response envelope keys |
//! | [`error`] | [`ClientError`] taxonomy |
//! | [`http_client`] | HTTP abstraction with reqwest and scripted implementations |
//! | [`requests`] | Validated request parameters |
//! | [`retry`] | Backoff, retry budget and retry policy |
//! | [`transport`] | Authenticated GET with retry loop |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use borsdata_core::{BorsdataClient, ClientConfig, StockPricesRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BorsdataClient::new(ClientConfig::from_env()?);
//!
//!     let prices = client
//!         .get_stock_prices(&StockPricesRequest::new(3).max_count(5))
//!         .await?;
//!     for price in prices {
//!         println!("{:?} close {}", price.date, price.close);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use borsdata_core::{ClientError, ClientErrorKind};
//!
//! fn describe(error: &ClientError) -> &'static str {
//!     match error.kind() {
//!         ClientErrorKind::Precondition => "bad input",
//!         ClientErrorKind::Transport => "network unreachable",
//!         ClientErrorKind::Api => "server rejected request",
//!         ClientErrorKind::Decode | ClientErrorKind::Validation => "unexpected response",
//!         ClientErrorKind::Configuration => "misconfigured client",
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod http_client;
pub mod requests;
pub mod retry;
pub mod transport;

pub use client::BorsdataClient;

pub use config::{ApiKey, ClientConfig, DEFAULT_BASE_URL};

pub use domain::{
    derive_translations, format_query_date, partition_errors, ApiDate, ApiDateTime, BatchRecord,
    Branch, BuybackRow, Buybacks, Country, DividendCalendar, DividendDate, InsiderHoldings,
    InsiderRow, Instrument, InstrumentDescription, KpiHistory, KpiHistoryBatch,
    KpiHistoryForInstrument, KpiHistoryPoint, KpiMetadata, KpiSummaryGroup, KpiValue, Market,
    Report, ReportCalendar, ReportCalendarDate, ReportMetadata, ReportsForInstrument, Sector,
    ShortPosition, ShortPositions, StockPrice, StockPriceLastValue, StockPricesForInstrument,
    StockSplit, TranslationCategory, TranslationItem, TranslationMetadata, TranslationRecord,
};

pub use endpoint::{Endpoint, PriceSnapshot};

pub use error::{ClientError, ClientErrorKind};

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};

pub use requests::{
    join_instrument_ids, InstrumentIds, KpiHistoryBatchRequest, KpiHistoryRequest,
    KpiSummaryRequest, PriceType, ReportType, ReportsBatchRequest, ReportsRequest,
    StockPricesBatchRequest, StockPricesRequest, MAX_BATCH_INSTRUMENTS, MAX_QUARTER_R12_COUNT,
    MAX_YEAR_COUNT,
};

pub use retry::{Backoff, RateLimitPolicy, RetryConfig, RetryDecision, RetryPolicy, RetryState};

pub use transport::{QueryParams, Transport};
