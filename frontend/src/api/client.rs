use reqwest::{header, Client, RequestBuilder, Response};

use crate::{api::types::*, config};

const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=minimal";
const DAY_STATUS_COLUMNS: &str = "date,is_holiday,updated_at";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            api_key: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    async fn resolved(&self) -> (String, Option<String>) {
        if let Some(base) = &self.base_url {
            return (base.trim_end_matches('/').to_string(), self.api_key.clone());
        }
        let cfg = config::await_config().await;
        (cfg.api_base_url, self.api_key.clone().or(cfg.api_key))
    }

    fn authorize(builder: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
        match api_key {
            Some(key) => builder
                .header("apikey", key)
                .header(header::AUTHORIZATION, format!("Bearer {}", key)),
            None => builder,
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        match response.json::<RestErrorBody>().await {
            Ok(body) => body.into(),
            Err(_) => ApiError::request_failed(format!("Request failed with HTTP {}", status)),
        }
    }

    /// Bulk read of the day status rows whose `date` is one of `keys`.
    pub async fn list_day_statuses(&self, keys: &[DateKey]) -> Result<Vec<DayStatus>, ApiError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let (base_url, api_key) = self.resolved().await;
        let request = self
            .client
            .get(format!("{}/{}", base_url, DAY_STATUS_TABLE))
            .query(&[
                ("select", DAY_STATUS_COLUMNS.to_string()),
                ("date", in_filter(keys)),
            ]);
        let response = Self::authorize(request, api_key.as_deref())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Insert-or-replace keyed on `date`; exactly one row per date afterwards.
    pub async fn upsert_day_status(&self, record: &DayStatusUpsert) -> Result<(), ApiError> {
        let (base_url, api_key) = self.resolved().await;
        let request = self
            .client
            .post(format!("{}/{}", base_url, DAY_STATUS_TABLE))
            .query(&[("on_conflict", DAY_STATUS_CONFLICT_KEY)])
            .header("Prefer", PREFER_UPSERT)
            .json(record);
        let response = Self::authorize(request, api_key.as_deref())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

/// PostgREST `in.(...)` filter value for the given keys.
pub fn in_filter(keys: &[DateKey]) -> String {
    let joined = keys
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}
