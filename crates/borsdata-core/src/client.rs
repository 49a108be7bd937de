use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use time::Date;
use tracing::debug;

use crate::config::ClientConfig;
use crate::domain::{
    format_query_date, ApiDateTime, Branch, Buybacks, Country, DividendCalendar, InsiderHoldings,
    Instrument, InstrumentDescription, KpiHistory, KpiHistoryBatch, KpiMetadata, KpiSummaryGroup,
    Market, Report, ReportCalendar, ReportMetadata, ReportsForInstrument, Sector, ShortPositions,
    StockPrice, StockPriceLastValue, StockPricesForInstrument, StockSplit, TranslationMetadata,
    TranslationRecord,
};
use crate::endpoint::{Endpoint, PriceSnapshot};
use crate::error::ClientError;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::requests::{
    InstrumentIds, KpiHistoryBatchRequest, KpiHistoryRequest, KpiSummaryRequest,
    ReportsBatchRequest, ReportsRequest, StockPricesBatchRequest, StockPricesRequest,
};
use crate::retry::RetryPolicy;
use crate::transport::{QueryParams, Transport};

/// Typed client for the Borsdata REST API.
///
/// Every operation issues one GET (plus rate-limit retries) and returns
/// parsed domain values. Batch operations report per-instrument failures in
/// the returned records rather than as errors.
pub struct BorsdataClient {
    transport: Transport,
}

impl BorsdataClient {
    /// Client over the default reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            transport: Transport::new(config, http_client),
        }
    }

    /// Replace which failures are retried (default: HTTP 429 only).
    pub fn with_retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.transport = self.transport.with_policy(policy);
        self
    }

    /// Release the underlying connection pool.
    pub fn close(self) {
        drop(self);
    }

    pub async fn get_branches(&self) -> Result<Vec<Branch>, ClientError> {
        self.list(Endpoint::GetBranches, "/branches", &QueryParams::new())
            .await
    }

    pub async fn get_countries(&self) -> Result<Vec<Country>, ClientError> {
        self.list(Endpoint::GetCountries, "/countries", &QueryParams::new())
            .await
    }

    pub async fn get_markets(&self) -> Result<Vec<Market>, ClientError> {
        self.list(Endpoint::GetMarkets, "/markets", &QueryParams::new())
            .await
    }

    pub async fn get_sectors(&self) -> Result<Vec<Sector>, ClientError> {
        self.list(Endpoint::GetSectors, "/sectors", &QueryParams::new())
            .await
    }

    /// Nordic instruments.
    pub async fn get_instruments(&self) -> Result<Vec<Instrument>, ClientError> {
        self.list(Endpoint::GetInstruments, "/instruments", &QueryParams::new())
            .await
    }

    /// Global instruments; requires a Pro+ subscription.
    pub async fn get_global_instruments(&self) -> Result<Vec<Instrument>, ClientError> {
        self.list(
            Endpoint::GetGlobalInstruments,
            "/instruments/global",
            &QueryParams::new(),
        )
        .await
    }

    pub async fn get_stock_prices(
        &self,
        request: &StockPricesRequest,
    ) -> Result<Vec<StockPrice>, ClientError> {
        let params = request.query()?;
        self.list(Endpoint::GetStockPrices, &request.path(), &params)
            .await
    }

    pub async fn get_stock_prices_batch(
        &self,
        request: &StockPricesBatchRequest,
    ) -> Result<Vec<StockPricesForInstrument>, ClientError> {
        self.list(
            Endpoint::GetStockPricesBatch,
            "/instruments/stockprices",
            &request.query(),
        )
        .await
    }

    pub async fn get_reports(&self, request: &ReportsRequest) -> Result<Vec<Report>, ClientError> {
        let params = request.query()?;
        self.list(Endpoint::GetReports, &request.path(), &params)
            .await
    }

    pub async fn get_reports_batch(
        &self,
        request: &ReportsBatchRequest,
    ) -> Result<Vec<ReportsForInstrument>, ClientError> {
        let params = request.query()?;
        self.list(Endpoint::GetReportsBatch, "/instruments/reports", &params)
            .await
    }

    pub async fn get_reports_metadata(&self) -> Result<Vec<ReportMetadata>, ClientError> {
        self.list(
            Endpoint::GetReportsMetadata,
            "/instruments/reports/metadata",
            &QueryParams::new(),
        )
        .await
    }

    pub async fn get_kpi_metadata(&self) -> Result<Vec<KpiMetadata>, ClientError> {
        self.list(
            Endpoint::GetKpiMetadata,
            "/instruments/kpis/metadata",
            &QueryParams::new(),
        )
        .await
    }

    /// Time of the last KPI recalculation, if the server reports one.
    pub async fn get_kpi_updated(&self) -> Result<Option<ApiDateTime>, ClientError> {
        self.envelope(
            Endpoint::GetKpiUpdated,
            "/instruments/kpis/updated",
            &QueryParams::new(),
        )
        .await
    }

    pub async fn get_kpi_history(
        &self,
        request: &KpiHistoryRequest,
    ) -> Result<KpiHistory, ClientError> {
        let params = request.query()?;
        self.whole(Endpoint::GetKpiHistory, &request.path(), &params)
            .await
    }

    pub async fn get_kpi_history_batch(
        &self,
        request: &KpiHistoryBatchRequest,
    ) -> Result<KpiHistoryBatch, ClientError> {
        let params = request.query()?;
        self.whole(Endpoint::GetKpiHistoryBatch, &request.path(), &params)
            .await
    }

    pub async fn get_kpi_summary(
        &self,
        request: &KpiSummaryRequest,
    ) -> Result<Vec<KpiSummaryGroup>, ClientError> {
        let params = request.query()?;
        self.list(Endpoint::GetKpiSummary, &request.path(), &params)
            .await
    }

    pub async fn get_insider_holdings(
        &self,
        ins_ids: &[i64],
    ) -> Result<Vec<InsiderHoldings>, ClientError> {
        self.list(
            Endpoint::GetInsiderHoldings,
            "/holdings/insider",
            &inst_list(ins_ids)?,
        )
        .await
    }

    pub async fn get_short_positions(&self) -> Result<Vec<ShortPositions>, ClientError> {
        self.list(
            Endpoint::GetShortPositions,
            "/holdings/shorts",
            &QueryParams::new(),
        )
        .await
    }

    pub async fn get_buybacks(&self, ins_ids: &[i64]) -> Result<Vec<Buybacks>, ClientError> {
        self.list(Endpoint::GetBuybacks, "/holdings/buyback", &inst_list(ins_ids)?)
            .await
    }

    pub async fn get_instrument_descriptions(
        &self,
        ins_ids: &[i64],
    ) -> Result<Vec<InstrumentDescription>, ClientError> {
        self.list(
            Endpoint::GetInstrumentDescriptions,
            "/instruments/description",
            &inst_list(ins_ids)?,
        )
        .await
    }

    pub async fn get_report_calendar(
        &self,
        ins_ids: &[i64],
    ) -> Result<Vec<ReportCalendar>, ClientError> {
        self.list(
            Endpoint::GetReportCalendar,
            "/instruments/report/calendar",
            &inst_list(ins_ids)?,
        )
        .await
    }

    pub async fn get_dividend_calendar(
        &self,
        ins_ids: &[i64],
    ) -> Result<Vec<DividendCalendar>, ClientError> {
        self.list(
            Endpoint::GetDividendCalendar,
            "/instruments/dividend/calendar",
            &inst_list(ins_ids)?,
        )
        .await
    }

    pub async fn get_last_stock_prices(&self) -> Result<Vec<StockPriceLastValue>, ClientError> {
        self.price_snapshot(PriceSnapshot::Last, None).await
    }

    pub async fn get_last_global_stock_prices(
        &self,
    ) -> Result<Vec<StockPriceLastValue>, ClientError> {
        self.price_snapshot(PriceSnapshot::GlobalLast, None).await
    }

    pub async fn get_stock_prices_by_date(
        &self,
        date: Date,
    ) -> Result<Vec<StockPriceLastValue>, ClientError> {
        self.price_snapshot(PriceSnapshot::ByDate, Some(date)).await
    }

    pub async fn get_global_stock_prices_by_date(
        &self,
        date: Date,
    ) -> Result<Vec<StockPriceLastValue>, ClientError> {
        self.price_snapshot(PriceSnapshot::GlobalByDate, Some(date))
            .await
    }

    /// Splits since `from`, or the server's default window when omitted.
    pub async fn get_stock_splits(
        &self,
        from: Option<Date>,
    ) -> Result<Vec<StockSplit>, ClientError> {
        let params = QueryParams::new().with_opt("from", from.map(format_query_date));
        self.list(Endpoint::GetStockSplits, "/instruments/stocksplits", &params)
            .await
    }

    pub async fn get_translation_metadata(&self) -> Result<TranslationMetadata, ClientError> {
        let records: Vec<TranslationRecord> = self
            .list(
                Endpoint::GetTranslationMetadata,
                "/translationmetadata",
                &QueryParams::new(),
            )
            .await?;
        Ok(TranslationMetadata::from_records(records))
    }

    async fn price_snapshot(
        &self,
        snapshot: PriceSnapshot,
        date: Option<Date>,
    ) -> Result<Vec<StockPriceLastValue>, ClientError> {
        let params = QueryParams::new().with_opt("date", date.map(format_query_date));
        self.list(snapshot.endpoint(), snapshot.path(), &params)
            .await
    }

    /// Fetch and parse the list under the endpoint's envelope key.
    async fn list<T>(
        &self,
        endpoint: Endpoint,
        path: &str,
        params: &QueryParams,
    ) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let rows: Option<Vec<T>> = self.envelope(endpoint, path, params).await?;
        let rows = rows.unwrap_or_default();
        debug!(endpoint = endpoint.as_str(), rows = rows.len(), "parsed response");
        Ok(rows)
    }

    /// Fetch and parse the value under the endpoint's envelope key.
    async fn envelope<T>(
        &self,
        endpoint: Endpoint,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let body = self.transport.get(path, params).await?;
        let payload = match endpoint.envelope_key() {
            Some(key) => unwrap_envelope(endpoint, body, key)?,
            None => body,
        };
        parse(endpoint, payload)
    }

    /// Fetch and parse the whole response body.
    async fn whole<T>(
        &self,
        endpoint: Endpoint,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let body = self.transport.get(path, params).await?;
        parse(endpoint, body)
    }
}

fn inst_list(ins_ids: &[i64]) -> Result<QueryParams, ClientError> {
    let ids = InstrumentIds::new(ins_ids)?;
    Ok(QueryParams::new().with("instList", ids.join()))
}

/// Take `key` out of a JSON object body; a missing key reads as `null`.
fn unwrap_envelope(endpoint: Endpoint, body: Value, key: &str) -> Result<Value, ClientError> {
    let mut object: Map<String, Value> =
        serde_json::from_value(body).map_err(|e| ClientError::validation(endpoint.as_str(), e))?;
    Ok(object.remove(key).unwrap_or(Value::Null))
}

fn parse<T: DeserializeOwned>(endpoint: Endpoint, payload: Value) -> Result<T, ClientError> {
    serde_json::from_value(payload).map_err(|e| ClientError::validation(endpoint.as_str(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientErrorKind;
    use crate::http_client::ScriptedHttpClient;
    use crate::retry::RetryConfig;

    fn client_with(http: Arc<ScriptedHttpClient>) -> BorsdataClient {
        let config = ClientConfig::new("test-key")
            .expect("valid key")
            .with_base_url("https://api.test/v1")
            .with_retry(RetryConfig::no_retry());
        BorsdataClient::with_http_client(config, http)
    }

    #[tokio::test]
    async fn missing_or_null_envelope_key_yields_empty_list() {
        let http = Arc::new(
            ScriptedHttpClient::new()
                .with_json(200, r#"{}"#)
                .with_json(200, r#"{"markets": null}"#),
        );
        let client = client_with(Arc::clone(&http));

        assert!(client.get_branches().await.expect("ok").is_empty());
        assert!(client.get_markets().await.expect("ok").is_empty());
        assert_eq!(http.call_count(), 2);
    }

    #[tokio::test]
    async fn non_object_body_is_a_validation_error() {
        let http = Arc::new(ScriptedHttpClient::new().with_json(200, "[1, 2]"));
        let client = client_with(http);

        let error = client.get_sectors().await.expect_err("array body");
        assert_eq!(error.kind(), ClientErrorKind::Validation);
        assert!(error.to_string().contains("get_sectors"));
    }

    #[tokio::test]
    async fn kpi_updated_reads_timestamp_or_none() {
        let http = Arc::new(
            ScriptedHttpClient::new()
                .with_json(200, r#"{"kpisCalcUpdated": "2024-03-01T06:12:00"}"#)
                .with_json(200, r#"{"kpisCalcUpdated": null}"#),
        );
        let client = client_with(http);

        let updated = client.get_kpi_updated().await.expect("ok");
        assert_eq!(
            updated.map(|value| value.to_string()),
            Some(String::from("2024-03-01T06:12:00"))
        );
        assert!(client.get_kpi_updated().await.expect("ok").is_none());
    }

    #[tokio::test]
    async fn batch_with_too_many_ids_never_reaches_transport() {
        let http = Arc::new(ScriptedHttpClient::new().with_json(200, r#"{"list": []}"#));
        let client = client_with(Arc::clone(&http));
        let ids: Vec<i64> = (0..51).collect();

        let error = client.get_buybacks(&ids).await.expect_err("too many");
        assert_eq!(error.kind(), ClientErrorKind::Precondition);
        assert_eq!(http.call_count(), 0);
    }
}
