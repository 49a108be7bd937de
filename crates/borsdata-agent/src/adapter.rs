//! # Tool Adapter
//!
//! Translates a tool call (name plus JSON arguments) into one client
//! operation and its result back into a [`ToolResult`].
//!
//! Errors never escape [`ToolAdapter::call`]: unknown tools, bad arguments
//! and failed operations all become `{"error": .., "tool": ..}` results.
//!
//! ## Example
//!
//! ```rust,ignore
//! use borsdata_agent::ToolAdapter;
//! use serde_json::json;
//!
//! let adapter = ToolAdapter::from_env()?;
//! let result = adapter
//!     .call("get_stock_prices", json!({ "instrument_id": 3, "max_count": 5 }))
//!     .await;
//! println!("{}", result.text);
//! ```

use std::sync::{Arc, OnceLock};

use borsdata_core::{ApiDate, BorsdataClient, ClientConfig, ClientError, Endpoint, HttpClient};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::arguments::{
    argument_object, parse, DateArgs, InstrumentIdsArgs, KpiHistoryArgs, KpiHistoryBatchArgs,
    KpiSummaryArgs, ReportsArgs, ReportsBatchArgs, StockPricesArgs, StockPricesBatchArgs,
    StockSplitsArgs,
};
use crate::catalog::ToolCatalog;
use crate::envelope::ToolResult;
use crate::error::ToolError;

/// Holds one lazily created [`BorsdataClient`] and dispatches tool calls to it.
pub struct ToolAdapter {
    config: ClientConfig,
    http_client: Option<Arc<dyn HttpClient>>,
    client: OnceLock<BorsdataClient>,
    catalog: ToolCatalog,
}

impl ToolAdapter {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: None,
            client: OnceLock::new(),
            catalog: ToolCatalog::new(),
        }
    }

    /// Adapter whose client will use the given HTTP implementation.
    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client: Some(http_client),
            ..Self::new(config)
        }
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Whether a call has created the client yet.
    pub fn is_connected(&self) -> bool {
        self.client.get().is_some()
    }

    /// Drop the client; the next call creates a new one.
    pub fn close(&mut self) {
        if let Some(client) = self.client.take() {
            client.close();
        }
    }

    /// Invoke one tool. Always yields exactly one result.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        debug!(tool = name, "dispatching tool call");
        match self.dispatch(name, arguments).await {
            Ok(payload) => ToolResult::success(&payload),
            Err(error) => {
                warn!(tool = name, code = error.code(), error = %error, "tool call failed");
                ToolResult::failure(name, error.to_string())
            }
        }
    }

    fn client(&self) -> &BorsdataClient {
        self.client.get_or_init(|| {
            debug!("creating borsdata client");
            let config = self.config.clone();
            match &self.http_client {
                Some(http) => BorsdataClient::with_http_client(config, Arc::clone(http)),
                None => BorsdataClient::new(config),
            }
        })
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let endpoint =
            Endpoint::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_owned()))?;
        let args = argument_object(name, arguments)?;

        match endpoint {
            Endpoint::GetBranches => to_json(self.client().get_branches().await?),
            Endpoint::GetCountries => to_json(self.client().get_countries().await?),
            Endpoint::GetMarkets => to_json(self.client().get_markets().await?),
            Endpoint::GetSectors => to_json(self.client().get_sectors().await?),
            Endpoint::GetInstruments => to_json(self.client().get_instruments().await?),
            Endpoint::GetGlobalInstruments => {
                to_json(self.client().get_global_instruments().await?)
            }
            Endpoint::GetStockPrices => {
                let args: StockPricesArgs = parse(name, args)?;
                to_json(self.client().get_stock_prices(&args.request()).await?)
            }
            Endpoint::GetStockPricesBatch => {
                let args: StockPricesBatchArgs = parse(name, args)?;
                let request = args.request()?;
                to_json(self.client().get_stock_prices_batch(&request).await?)
            }
            Endpoint::GetReports => {
                let args: ReportsArgs = parse(name, args)?;
                to_json(self.client().get_reports(&args.request()).await?)
            }
            Endpoint::GetReportsBatch => {
                let args: ReportsBatchArgs = parse(name, args)?;
                let request = args.request()?;
                to_json(self.client().get_reports_batch(&request).await?)
            }
            Endpoint::GetReportsMetadata => to_json(self.client().get_reports_metadata().await?),
            Endpoint::GetKpiMetadata => to_json(self.client().get_kpi_metadata().await?),
            Endpoint::GetKpiUpdated => {
                let updated = self.client().get_kpi_updated().await?;
                Ok(json!({ "kpis_calc_updated": updated }))
            }
            Endpoint::GetKpiHistory => {
                let args: KpiHistoryArgs = parse(name, args)?;
                to_json(self.client().get_kpi_history(&args.request()).await?)
            }
            Endpoint::GetKpiHistoryBatch => {
                let args: KpiHistoryBatchArgs = parse(name, args)?;
                let request = args.request()?;
                to_json(self.client().get_kpi_history_batch(&request).await?)
            }
            Endpoint::GetKpiSummary => {
                let args: KpiSummaryArgs = parse(name, args)?;
                to_json(self.client().get_kpi_summary(&args.request()).await?)
            }
            Endpoint::GetInsiderHoldings => {
                let ids = instrument_ids(name, args)?;
                to_json(self.client().get_insider_holdings(&ids).await?)
            }
            Endpoint::GetShortPositions => to_json(self.client().get_short_positions().await?),
            Endpoint::GetBuybacks => {
                let ids = instrument_ids(name, args)?;
                to_json(self.client().get_buybacks(&ids).await?)
            }
            Endpoint::GetInstrumentDescriptions => {
                let ids = instrument_ids(name, args)?;
                to_json(self.client().get_instrument_descriptions(&ids).await?)
            }
            Endpoint::GetReportCalendar => {
                let ids = instrument_ids(name, args)?;
                to_json(self.client().get_report_calendar(&ids).await?)
            }
            Endpoint::GetDividendCalendar => {
                let ids = instrument_ids(name, args)?;
                to_json(self.client().get_dividend_calendar(&ids).await?)
            }
            Endpoint::GetLastStockPrices => to_json(self.client().get_last_stock_prices().await?),
            Endpoint::GetLastGlobalStockPrices => {
                to_json(self.client().get_last_global_stock_prices().await?)
            }
            Endpoint::GetStockPricesByDate => {
                let args: DateArgs = parse(name, args)?;
                to_json(
                    self.client()
                        .get_stock_prices_by_date(args.date.into_inner())
                        .await?,
                )
            }
            Endpoint::GetGlobalStockPricesByDate => {
                let args: DateArgs = parse(name, args)?;
                to_json(
                    self.client()
                        .get_global_stock_prices_by_date(args.date.into_inner())
                        .await?,
                )
            }
            Endpoint::GetStockSplits => {
                let args: StockSplitsArgs = parse(name, args)?;
                let from = args.from_date.map(ApiDate::into_inner);
                to_json(self.client().get_stock_splits(from).await?)
            }
            Endpoint::GetTranslationMetadata => {
                to_json(self.client().get_translation_metadata().await?)
            }
        }
    }
}

impl std::fmt::Debug for ToolAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolAdapter")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .field("tools", &self.catalog.len())
            .finish()
    }
}

fn instrument_ids(tool: &str, args: Map<String, Value>) -> Result<Vec<i64>, ToolError> {
    let args: InstrumentIdsArgs = parse(tool, args)?;
    Ok(args.instrument_ids)
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(ToolError::Serialize)
}
