//! Behavior-driven tests for the agent tool adapter
//!
//! These tests verify HOW tool calls are dispatched and what an agent sees:
//! one JSON result per call, with failures turned into error objects.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use borsdata_agent::{ToolAdapter, ToolCatalog};
use borsdata_core::{ClientConfig, Endpoint, HttpError, RetryConfig, ScriptedHttpClient};
use serde_json::{json, Value};

const BASE: &str = "https://api.test/v1";

fn adapter(http: &Arc<ScriptedHttpClient>) -> ToolAdapter {
    let config = ClientConfig::new("secret-key")
        .expect("valid key")
        .with_base_url(BASE)
        .with_retry(RetryConfig::fixed(Duration::from_millis(1), 3));
    ToolAdapter::with_http_client(config, Arc::clone(http) as Arc<dyn borsdata_core::HttpClient>)
}

fn parsed(text: &str) -> Value {
    serde_json::from_str(text).expect("result text is JSON")
}

// =============================================================================
// Tool Adapter: Catalogue
// =============================================================================

#[test]
fn when_catalog_is_listed_every_operation_has_exactly_one_tool() {
    // Given: The tool catalogue
    let catalog = ToolCatalog::new();

    // When: Tool names are collected
    let names: HashSet<&str> = catalog.names().collect();

    // Then: There is one uniquely named tool per operation
    assert_eq!(catalog.len(), 28);
    assert_eq!(names.len(), 28);
    for endpoint in Endpoint::ALL {
        assert!(names.contains(endpoint.as_str()), "missing {endpoint}");
    }
}

#[test]
fn when_catalog_is_serialized_schemas_describe_required_arguments() {
    let catalog = ToolCatalog::new().to_json();
    let tools = catalog["tools"].as_array().expect("tools array");

    let kpi_history = tools
        .iter()
        .find(|tool| tool["name"] == "get_kpi_history")
        .expect("kpi history tool");
    let required = kpi_history["inputSchema"]["required"]
        .as_array()
        .expect("required list");

    assert!(required.contains(&json!("instrument_id")));
    assert!(required.contains(&json!("kpi_id")));
    assert!(required.contains(&json!("report_type")));
    assert_eq!(
        kpi_history["inputSchema"]["properties"]["report_type"]["enum"],
        json!(["year", "r12", "quarter"])
    );
}

// =============================================================================
// Tool Adapter: Successful Calls
// =============================================================================

#[tokio::test]
async fn when_tool_succeeds_result_is_json_of_the_parsed_rows() {
    // Given: A server with one price row
    let http = Arc::new(ScriptedHttpClient::new().with_json(
        200,
        r#"{"stockPricesList": [{"d": "2023-01-01", "h": 110.0, "l": 90.0, "c": 100.0, "o": 95.0, "v": 1000}]}"#,
    ));
    let adapter = adapter(&http);

    // When: The price tool is called with object arguments
    let result = adapter
        .call("get_stock_prices", json!({ "instrument_id": 3, "max_count": 5 }))
        .await;

    // Then: The text is a JSON array with canonical field names
    assert!(!result.is_error, "{}", result.text);
    let rows = parsed(&result.text);
    assert_eq!(rows[0]["close"], 100.0);
    assert_eq!(rows[0]["date"], "2023-01-01");
    assert_eq!(rows[0]["volume"], 1000);

    let request = &http.requests()[0];
    assert!(request.url.starts_with(&format!("{BASE}/instruments/3/stockprices?")));
    assert!(request.url.contains("maxCount=5"));
}

#[tokio::test]
async fn when_arguments_arrive_as_text_they_are_parsed_as_json() {
    let http = Arc::new(ScriptedHttpClient::new().with_json(200, r#"{"reports": []}"#));
    let adapter = adapter(&http);

    let result = adapter
        .call(
            "get_reports",
            json!(r#"{"instrument_id": 7, "report_type": "quarter"}"#),
        )
        .await;

    assert!(!result.is_error, "{}", result.text);
    assert_eq!(parsed(&result.text), json!([]));
    assert!(http.requests()[0].url.contains("/instruments/7/reports/quarter?"));
}

#[tokio::test]
async fn when_kpi_update_time_is_requested_it_is_wrapped_in_an_object() {
    let http = Arc::new(
        ScriptedHttpClient::new().with_json(200, r#"{"kpisCalcUpdated": "2024-03-01T06:12:00"}"#),
    );
    let adapter = adapter(&http);

    let result = adapter.call("get_kpi_updated", Value::Null).await;

    assert!(!result.is_error, "{}", result.text);
    let updated = parsed(&result.text)["kpis_calc_updated"]
        .as_str()
        .expect("iso string")
        .to_owned();
    assert!(updated.starts_with("2024-03-01T06:12:00"), "{updated}");
}

// =============================================================================
// Tool Adapter: Error Envelopes
// =============================================================================

#[tokio::test]
async fn when_tool_is_unknown_error_names_it_and_no_request_is_sent() {
    // Given: An adapter
    let http = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));
    let adapter = adapter(&http);

    // When: A tool that does not exist is called
    let result = adapter.call("get_everything", json!({})).await;

    // Then: An error object naming the tool comes back without network use
    assert!(result.is_error);
    assert_eq!(
        parsed(&result.text),
        json!({ "error": "Unknown tool: get_everything", "tool": "get_everything" })
    );
    assert_eq!(http.call_count(), 0);
    assert!(!adapter.is_connected());
}

#[tokio::test]
async fn when_server_fails_error_is_returned_as_data() {
    let http = Arc::new(ScriptedHttpClient::new().with_json(500, "Internal Server Error"));
    let adapter = adapter(&http);

    let result = adapter.call("get_markets", json!({})).await;

    assert!(result.is_error);
    let body = parsed(&result.text);
    assert_eq!(body["tool"], "get_markets");
    let message = body["error"].as_str().expect("message");
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("Internal Server Error"), "{message}");
    assert_eq!(http.call_count(), 1);
}

#[tokio::test]
async fn when_required_argument_is_missing_no_request_is_sent() {
    let http = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));
    let adapter = adapter(&http);

    let result = adapter.call("get_kpi_history", json!({ "instrument_id": 3 })).await;

    assert!(result.is_error);
    let message = parsed(&result.text)["error"]
        .as_str()
        .expect("message")
        .to_owned();
    assert!(message.contains("get_kpi_history"), "{message}");
    assert_eq!(http.call_count(), 0);
}

#[tokio::test]
async fn when_too_many_ids_are_passed_precondition_becomes_error_result() {
    let http = Arc::new(ScriptedHttpClient::new().with_json(200, r#"{"list": []}"#));
    let adapter = adapter(&http);
    let ids: Vec<i64> = (1..=51).collect();

    let result = adapter
        .call("get_buybacks", json!({ "instrument_ids": ids }))
        .await;

    assert!(result.is_error);
    assert_eq!(http.call_count(), 0);
}

#[tokio::test]
async fn when_network_fails_error_result_is_returned() {
    let http = Arc::new(
        ScriptedHttpClient::new().with_error(HttpError::timeout("request timed out")),
    );
    let adapter = adapter(&http);

    let result = adapter.call("get_countries", json!({})).await;

    assert!(result.is_error);
    assert_eq!(parsed(&result.text)["tool"], "get_countries");
}

// =============================================================================
// Tool Adapter: Client Lifecycle
// =============================================================================

#[tokio::test]
async fn when_first_tool_runs_client_is_created_and_reused() {
    // Given: A fresh adapter
    let http = Arc::new(ScriptedHttpClient::new().with_json(200, r#"{"sectors": []}"#));
    let mut adapter = adapter(&http);
    assert!(!adapter.is_connected());

    // When: Two tools are called
    adapter.call("get_sectors", json!({})).await;
    adapter.call("get_sectors", json!({})).await;

    // Then: The client exists after the first call and serves both
    assert!(adapter.is_connected());
    assert_eq!(http.call_count(), 2);

    adapter.close();
    assert!(!adapter.is_connected());
}
