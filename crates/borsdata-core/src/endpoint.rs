use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Every operation the client exposes, named as the agent tools are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    GetBranches,
    GetCountries,
    GetMarkets,
    GetSectors,
    GetInstruments,
    GetGlobalInstruments,
    GetStockPrices,
    GetStockPricesBatch,
    GetReports,
    GetReportsBatch,
    GetReportsMetadata,
    GetKpiMetadata,
    GetKpiUpdated,
    GetKpiHistory,
    GetKpiHistoryBatch,
    GetKpiSummary,
    GetInsiderHoldings,
    GetShortPositions,
    GetBuybacks,
    GetInstrumentDescriptions,
    GetReportCalendar,
    GetDividendCalendar,
    GetLastStockPrices,
    GetLastGlobalStockPrices,
    GetStockPricesByDate,
    GetGlobalStockPricesByDate,
    GetStockSplits,
    GetTranslationMetadata,
}

impl Endpoint {
    pub const ALL: [Endpoint; 28] = [
        Self::GetBranches,
        Self::GetCountries,
        Self::GetMarkets,
        Self::GetSectors,
        Self::GetInstruments,
        Self::GetGlobalInstruments,
        Self::GetStockPrices,
        Self::GetStockPricesBatch,
        Self::GetReports,
        Self::GetReportsBatch,
        Self::GetReportsMetadata,
        Self::GetKpiMetadata,
        Self::GetKpiUpdated,
        Self::GetKpiHistory,
        Self::GetKpiHistoryBatch,
        Self::GetKpiSummary,
        Self::GetInsiderHoldings,
        Self::GetShortPositions,
        Self::GetBuybacks,
        Self::GetInstrumentDescriptions,
        Self::GetReportCalendar,
        Self::GetDividendCalendar,
        Self::GetLastStockPrices,
        Self::GetLastGlobalStockPrices,
        Self::GetStockPricesByDate,
        Self::GetGlobalStockPricesByDate,
        Self::GetStockSplits,
        Self::GetTranslationMetadata,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetBranches => "get_branches",
            Self::GetCountries => "get_countries",
            Self::GetMarkets => "get_markets",
            Self::GetSectors => "get_sectors",
            Self::GetInstruments => "get_instruments",
            Self::GetGlobalInstruments => "get_global_instruments",
            Self::GetStockPrices => "get_stock_prices",
            Self::GetStockPricesBatch => "get_stock_prices_batch",
            Self::GetReports => "get_reports",
            Self::GetReportsBatch => "get_reports_batch",
            Self::GetReportsMetadata => "get_reports_metadata",
            Self::GetKpiMetadata => "get_kpi_metadata",
            Self::GetKpiUpdated => "get_kpi_updated",
            Self::GetKpiHistory => "get_kpi_history",
            Self::GetKpiHistoryBatch => "get_kpi_history_batch",
            Self::GetKpiSummary => "get_kpi_summary",
            Self::GetInsiderHoldings => "get_insider_holdings",
            Self::GetShortPositions => "get_short_positions",
            Self::GetBuybacks => "get_buybacks",
            Self::GetInstrumentDescriptions => "get_instrument_descriptions",
            Self::GetReportCalendar => "get_report_calendar",
            Self::GetDividendCalendar => "get_dividend_calendar",
            Self::GetLastStockPrices => "get_last_stock_prices",
            Self::GetLastGlobalStockPrices => "get_last_global_stock_prices",
            Self::GetStockPricesByDate => "get_stock_prices_by_date",
            Self::GetGlobalStockPricesByDate => "get_global_stock_prices_by_date",
            Self::GetStockSplits => "get_stock_splits",
            Self::GetTranslationMetadata => "get_translation_metadata",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.as_str() == name)
    }

    /// Top-level key holding the payload, or `None` when the whole body is it.
    pub const fn envelope_key(self) -> Option<&'static str> {
        match self {
            Self::GetBranches => Some("branches"),
            Self::GetCountries => Some("countries"),
            Self::GetMarkets => Some("markets"),
            Self::GetSectors => Some("sectors"),
            Self::GetInstruments | Self::GetGlobalInstruments => Some("instruments"),
            Self::GetStockPrices
            | Self::GetLastStockPrices
            | Self::GetLastGlobalStockPrices
            | Self::GetStockPricesByDate
            | Self::GetGlobalStockPricesByDate => Some("stockPricesList"),
            Self::GetStockPricesBatch => Some("stockPricesArrayList"),
            Self::GetReports => Some("reports"),
            Self::GetReportsBatch => Some("reportList"),
            Self::GetReportsMetadata => Some("reportMetadatas"),
            Self::GetKpiMetadata => Some("kpiHistoryMetadatas"),
            Self::GetKpiUpdated => Some("kpisCalcUpdated"),
            Self::GetKpiHistory | Self::GetKpiHistoryBatch => None,
            Self::GetKpiSummary => Some("kpis"),
            Self::GetInsiderHoldings
            | Self::GetShortPositions
            | Self::GetBuybacks
            | Self::GetInstrumentDescriptions
            | Self::GetReportCalendar
            | Self::GetDividendCalendar => Some("list"),
            Self::GetStockSplits => Some("stockSplits"),
            Self::GetTranslationMetadata => Some("translationMetadatas"),
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four endpoints returning one latest-price row per instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceSnapshot {
    Last,
    GlobalLast,
    ByDate,
    GlobalByDate,
}

impl PriceSnapshot {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Last => "/instruments/stockprices/last",
            Self::GlobalLast => "/instruments/stockprices/global/last",
            Self::ByDate => "/instruments/stockprices/date",
            Self::GlobalByDate => "/instruments/stockprices/global/date",
        }
    }

    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Last => Endpoint::GetLastStockPrices,
            Self::GlobalLast => Endpoint::GetLastGlobalStockPrices,
            Self::ByDate => Endpoint::GetStockPricesByDate,
            Self::GlobalByDate => Endpoint::GetGlobalStockPricesByDate,
        }
    }
}
