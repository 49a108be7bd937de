//! # Tool Catalogue
//!
//! One [`ToolDefinition`] per client operation, with a JSON-schema
//! description of its arguments.
//!
//! ## Example
//!
//! ```rust,ignore
//! use borsdata_agent::ToolCatalog;
//!
//! let catalog = ToolCatalog::new();
//! let prices = catalog.get("get_stock_prices").expect("known tool");
//! assert_eq!(prices.input_schema["required"][0], "instrument_id");
//! ```

use borsdata_core::{
    Endpoint, PriceType, ReportType, MAX_BATCH_INSTRUMENTS, MAX_QUARTER_R12_COUNT, MAX_YEAR_COUNT,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Name, description and argument schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The complete, ordered set of tools.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            tools: Endpoint::ALL.into_iter().map(definition).collect(),
        }
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(|tool| tool.name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn to_json(&self) -> Value {
        json!({ "tools": self.tools })
    }
}

/// Build the definition for one operation.
pub fn definition(endpoint: Endpoint) -> ToolDefinition {
    let (description, input_schema) = match endpoint {
        Endpoint::GetInstruments => (
            "Get all Nordic instruments (stocks) with name, ISIN, ticker, market, sector and branch. Use it to look up instrument ids.",
            no_arguments(),
        ),
        Endpoint::GetGlobalInstruments => (
            "Get all global instruments (requires a Pro+ subscription).",
            no_arguments(),
        ),
        Endpoint::GetMarkets => (
            "Get all markets and exchanges instruments trade on.",
            no_arguments(),
        ),
        Endpoint::GetBranches => (
            "Get all branches (industry classifications).",
            no_arguments(),
        ),
        Endpoint::GetSectors => ("Get all sectors.", no_arguments()),
        Endpoint::GetCountries => ("Get all countries.", no_arguments()),
        Endpoint::GetStockPrices => (
            "Get daily stock prices (open, high, low, close, volume) for one instrument.",
            object(
                [
                    ("instrument_id", instrument_id()),
                    ("from_date", date("Start date in YYYY-MM-DD format (optional)")),
                    ("to_date", date("End date in YYYY-MM-DD format (optional)")),
                    (
                        "max_count",
                        integer_with_default("Maximum number of price points to return", 20),
                    ),
                ],
                &["instrument_id"],
            ),
        ),
        Endpoint::GetStockPricesBatch => (
            "Get daily stock prices for up to 50 instruments in one call.",
            object(
                [
                    ("instrument_ids", instrument_ids()),
                    ("from_date", date("Start date in YYYY-MM-DD format (optional)")),
                    ("to_date", date("End date in YYYY-MM-DD format (optional)")),
                ],
                &["instrument_ids"],
            ),
        ),
        Endpoint::GetLastStockPrices => (
            "Get the latest stock price for every Nordic instrument.",
            no_arguments(),
        ),
        Endpoint::GetLastGlobalStockPrices => (
            "Get the latest stock price for every global instrument (requires Pro+).",
            no_arguments(),
        ),
        Endpoint::GetStockPricesByDate => (
            "Get the stock price of every Nordic instrument on one date.",
            object([("date", date("Date in YYYY-MM-DD format"))], &["date"]),
        ),
        Endpoint::GetGlobalStockPricesByDate => (
            "Get the stock price of every global instrument on one date (requires Pro+).",
            object([("date", date("Date in YYYY-MM-DD format"))], &["date"]),
        ),
        Endpoint::GetReports => (
            "Get financial reports (income statement, balance sheet, cash flow) for one instrument.",
            object(
                [
                    ("instrument_id", instrument_id()),
                    ("report_type", report_type(true)),
                    (
                        "max_count",
                        integer_with_default("Maximum number of reports to return", 10),
                    ),
                    ("original_currency", original_currency()),
                ],
                &["instrument_id"],
            ),
        ),
        Endpoint::GetReportsBatch => (
            "Get yearly, quarterly and R12 reports for up to 50 instruments in one call.",
            object(
                [
                    ("instrument_ids", instrument_ids()),
                    (
                        "max_year_count",
                        bounded_integer("Max yearly reports to return", 10, MAX_YEAR_COUNT),
                    ),
                    (
                        "max_quarter_r12_count",
                        bounded_integer(
                            "Max quarterly and R12 reports to return",
                            10,
                            MAX_QUARTER_R12_COUNT,
                        ),
                    ),
                    ("original_currency", original_currency()),
                ],
                &["instrument_ids"],
            ),
        ),
        Endpoint::GetReportsMetadata => (
            "Get the names and formats of every financial report field.",
            no_arguments(),
        ),
        Endpoint::GetKpiMetadata => (
            "Get metadata for every KPI (P/E, ROE, debt ratios and so on), including KPI ids.",
            no_arguments(),
        ),
        Endpoint::GetKpiUpdated => (
            "Get when KPI values were last recalculated.",
            no_arguments(),
        ),
        Endpoint::GetKpiHistory => (
            "Get the history of one KPI for one instrument.",
            object(
                [
                    ("instrument_id", instrument_id()),
                    ("kpi_id", kpi_id()),
                    ("report_type", report_type(false)),
                    ("price_type", price_type()),
                    ("max_count", integer("Maximum number of data points (optional)")),
                ],
                &["instrument_id", "kpi_id", "report_type"],
            ),
        ),
        Endpoint::GetKpiHistoryBatch => (
            "Get the history of one KPI for up to 50 instruments in one call.",
            object(
                [
                    ("instrument_ids", instrument_ids()),
                    ("kpi_id", kpi_id()),
                    ("report_type", report_type(false)),
                    ("price_type", price_type()),
                    (
                        "max_count",
                        integer("Max data points: year up to 20, r12 and quarter up to 40"),
                    ),
                ],
                &["instrument_ids", "kpi_id", "report_type"],
            ),
        ),
        Endpoint::GetKpiSummary => (
            "Get a summary of many KPIs for one instrument.",
            object(
                [
                    ("instrument_id", instrument_id()),
                    ("report_type", report_type(false)),
                    ("max_count", integer("Maximum number of periods (optional)")),
                ],
                &["instrument_id", "report_type"],
            ),
        ),
        Endpoint::GetInsiderHoldings => (
            "Get insider transactions (executives, board members) for the given instruments.",
            ids_only(),
        ),
        Endpoint::GetShortPositions => (
            "Get reported short positions for all instruments.",
            no_arguments(),
        ),
        Endpoint::GetBuybacks => (
            "Get share buyback activity for the given instruments.",
            ids_only(),
        ),
        Endpoint::GetInstrumentDescriptions => (
            "Get company descriptions for the given instruments.",
            ids_only(),
        ),
        Endpoint::GetReportCalendar => (
            "Get upcoming report release dates for the given instruments.",
            ids_only(),
        ),
        Endpoint::GetDividendCalendar => (
            "Get upcoming dividends and ex-dividend dates for the given instruments.",
            ids_only(),
        ),
        Endpoint::GetStockSplits => (
            "Get stock splits, useful for adjusting historical prices.",
            object(
                [("from_date", date("Start date in YYYY-MM-DD format (optional)"))],
                &[],
            ),
        ),
        Endpoint::GetTranslationMetadata => (
            "Get Swedish and English names for branches, sectors and countries.",
            no_arguments(),
        ),
    };

    ToolDefinition {
        name: endpoint.as_str(),
        description,
        input_schema,
    }
}

fn object<const N: usize>(properties: [(&str, Value); N], required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_owned(), schema))
        .collect();
    let mut schema = json!({ "type": "object", "properties": properties });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn ids_only() -> Value {
    object([("instrument_ids", instrument_ids())], &["instrument_ids"])
}

fn integer(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

fn integer_with_default(description: &str, default: u32) -> Value {
    json!({
        "type": "integer",
        "description": format!("{description} (default: {default})"),
        "default": default,
        "minimum": 1
    })
}

fn bounded_integer(description: &str, default: u32, max: u32) -> Value {
    json!({
        "type": "integer",
        "description": format!("{description} (max {max}, default: {default})"),
        "default": default,
        "minimum": 1,
        "maximum": max
    })
}

fn date(description: &str) -> Value {
    json!({ "type": "string", "format": "date", "description": description })
}

fn instrument_id() -> Value {
    integer("The instrument id (ins_id from get_instruments)")
}

fn instrument_ids() -> Value {
    json!({
        "type": "array",
        "items": { "type": "integer" },
        "maxItems": MAX_BATCH_INSTRUMENTS,
        "description": format!("List of instrument ids (max {MAX_BATCH_INSTRUMENTS})")
    })
}

fn kpi_id() -> Value {
    integer("The KPI id (from get_kpi_metadata)")
}

fn report_type(with_default: bool) -> Value {
    let names: Vec<&str> = ReportType::ALL.iter().map(|t| t.as_str()).collect();
    let mut schema = json!({
        "type": "string",
        "enum": names,
        "description": "Report period: year, r12 (rolling 12 months) or quarter"
    });
    if with_default {
        schema["default"] = json!(ReportType::default().as_str());
    }
    schema
}

fn price_type() -> Value {
    let names: Vec<&str> = PriceType::ALL.iter().map(|t| t.as_str()).collect();
    json!({
        "type": "string",
        "enum": names,
        "default": PriceType::default().as_str(),
        "description": "Price the KPI is computed from (default: mean)"
    })
}

fn original_currency() -> Value {
    json!({
        "type": "boolean",
        "description": "Return values in the company's reporting currency (default: false)",
        "default": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_one_tool_per_operation() {
        let catalog = ToolCatalog::new();
        assert_eq!(catalog.len(), 28);
        for endpoint in Endpoint::ALL {
            assert!(catalog.get(endpoint.as_str()).is_some(), "{endpoint}");
        }
    }

    #[test]
    fn schemas_declare_enums_and_defaults() {
        let catalog = ToolCatalog::new();
        let reports = catalog.get("get_reports").expect("tool");
        let props = &reports.input_schema["properties"];
        assert_eq!(props["report_type"]["enum"], json!(["year", "r12", "quarter"]));
        assert_eq!(props["report_type"]["default"], "year");
        assert_eq!(props["max_count"]["default"], 10);

        let history = catalog.get("get_kpi_history").expect("tool");
        assert_eq!(
            history.input_schema["properties"]["price_type"]["enum"],
            json!(["mean", "high", "low"])
        );
        assert_eq!(
            history.input_schema["required"],
            json!(["instrument_id", "kpi_id", "report_type"])
        );
    }

    #[test]
    fn argument_free_tools_have_no_required_list() {
        let catalog = ToolCatalog::new();
        let markets = catalog.get("get_markets").expect("tool");
        assert!(markets.input_schema.get("required").is_none());

        let serialized = serde_json::to_value(markets).expect("serializes");
        assert!(serialized.get("inputSchema").is_some());
    }
}
