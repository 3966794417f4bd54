use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::BoundaryGeometry;
use crate::services::boundary_source::BoundarySource;
use crate::services::geojson_decoder::decode_geometry_object;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// One entry of a Nominatim search response. Only the fields used here.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    #[serde(default)]
    pub display_name: Option<String>,
    /// Present when the request asked for `polygon_geojson=1`
    #[serde(default)]
    pub geojson: Option<JsonValue>,
}

/// Country boundaries from a Nominatim search endpoint.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
    max_retries: usize,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_NOMINATIM_BASE_URL.to_string(),
            DEFAULT_NOMINATIM_USER_AGENT.to_string(),
        )
    }

    pub fn with_config(base_url: String, user_agent: String) -> Self {
        NominatimClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
            max_retries: NOMINATIM_MAX_RETRIES,
        }
    }

    /// Override the retry budget (0 = single attempt).
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Query parameters for a country boundary search.
    pub fn search_params(country: &str) -> Vec<(&'static str, String)> {
        vec![
            ("country", country.trim().to_string()),
            ("format", "json".to_string()),
            ("polygon_geojson", "1".to_string()),
            ("polygon_threshold", NOMINATIM_POLYGON_THRESHOLD.to_string()),
        ]
    }

    /// Search for `country` and return the raw places.
    /// Retries timeouts and HTTP 429/504 with exponential backoff.
    pub async fn search_country(&self, country: &str) -> Result<Vec<NominatimPlace>> {
        let url = self.search_url();
        let params = Self::search_params(country);
        let mut retry_count = 0;

        loop {
            tracing::debug!(country = %country, url = %url, "Nominatim search");

            let response_result = self
                .client
                .get(&url)
                .query(&params)
                .header(reqwest::header::USER_AGENT, &self.user_agent)
                .timeout(Duration::from_secs(NOMINATIM_TIMEOUT_SECONDS))
                .send()
                .await;

            let response = match response_result {
                Ok(resp) => resp,
                Err(e) => {
                    let error_msg = if e.is_timeout() {
                        "Request timed out".to_string()
                    } else {
                        format!("Request failed: {}", e)
                    };

                    if retry_count < self.max_retries {
                        retry_count += 1;
                        let backoff_ms = backoff_ms(retry_count);
                        tracing::warn!(
                            "Nominatim search {}, retrying in {}ms (attempt {}/{})",
                            error_msg,
                            backoff_ms,
                            retry_count + 1,
                            self.max_retries + 1
                        );
                        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                        continue;
                    }

                    return Err(AppError::BoundaryService(format!(
                        "{} after {} attempts",
                        error_msg,
                        self.max_retries + 1
                    )));
                }
            };

            let status = response.status();

            if status.is_success() {
                return response.json::<Vec<NominatimPlace>>().await.map_err(|e| {
                    AppError::BoundaryService(format!("Failed to parse response: {}", e))
                });
            }

            let is_retryable =
                status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::GATEWAY_TIMEOUT;

            if is_retryable && retry_count < self.max_retries {
                retry_count += 1;
                let backoff_ms = backoff_ms(retry_count);
                tracing::warn!(
                    "Nominatim returned HTTP {}, retrying in {}ms (attempt {}/{})",
                    status,
                    backoff_ms,
                    retry_count + 1,
                    self.max_retries + 1
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                continue;
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(AppError::BoundaryService(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoundarySource for NominatimClient {
    async fn fetch_boundary(&self, name: &str) -> Result<BoundaryGeometry> {
        let places = self.search_country(name).await?;
        Ok(boundary_from_places(&places))
    }

    fn source_name(&self) -> &'static str {
        "nominatim"
    }
}

/// Boundary of the first place in a search response.
/// No places, or a first place without `geojson`, gives `Empty`.
pub fn boundary_from_places(places: &[NominatimPlace]) -> BoundaryGeometry {
    let Some(first) = places.first() else {
        tracing::debug!("Nominatim returned no places");
        return BoundaryGeometry::Empty;
    };

    match &first.geojson {
        Some(geometry) => decode_geometry_object(geometry),
        None => {
            tracing::warn!(
                "Nominatim place {} has no geojson",
                first.display_name.as_deref().unwrap_or("<unnamed>")
            );
            BoundaryGeometry::Empty
        }
    }
}

/// `base * 2^n`, saturating and capped at `NOMINATIM_MAX_BACKOFF_MS`.
fn backoff_ms(retry_count: usize) -> u64 {
    let exponent = u32::try_from(retry_count).unwrap_or(u32::MAX);
    NOMINATIM_BACKOFF_BASE_MS
        .saturating_mul(2_u64.saturating_pow(exponent))
        .min(NOMINATIM_MAX_BACKOFF_MS)
}
