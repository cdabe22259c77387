//! HTTP client for the resort catalog API.
//!
//! Fetches the full resort catalog as JSON with:
//! - Connection pooling and request timeouts
//! - Automatic retry with exponential backoff on 429 and transport errors
//! - A client injected at construction, never a process-wide singleton
//!
//! The catalog endpoint returns a JSON array of resort records; fields the
//! clustering engine does not use are ignored during parsing.

use log::{info, warn};
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::Resort;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Result of fetching the resort catalog.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct CatalogResult {
    pub resorts: Vec<Resort>,
    pub success: bool,
    pub error: Option<String>,
}

impl CatalogResult {
    fn failure(error: String) -> Self {
        Self {
            resorts: vec![],
            success: false,
            error: Some(error),
        }
    }
}

/// Parse a catalog response body, dropping records with invalid coordinates.
fn parse_catalog(bytes: &[u8]) -> Result<Vec<Resort>, String> {
    let records: Vec<Resort> =
        serde_json::from_slice(bytes).map_err(|e| format!("JSON parse error: {}", e))?;

    let total = records.len();
    let resorts: Vec<Resort> = records.into_iter().filter(|r| r.is_valid()).collect();

    if resorts.len() < total {
        warn!(
            "[ResortFetcher] dropped {} catalog records with invalid coordinates",
            total - resorts.len()
        );
    }

    Ok(resorts)
}

/// Resort catalog fetcher with an injected HTTP client.
pub struct ResortFetcher {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ResortFetcher {
    /// Create a fetcher for the given catalog base URL.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, String> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_keepalive(Duration::from_secs(30))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
        })
    }

    /// Fetch the full resort catalog.
    ///
    /// Retries up to three times on 429 responses and transport errors with
    /// exponential backoff; any other non-success status fails immediately.
    pub async fn fetch_catalog(&self) -> CatalogResult {
        let url = format!("{}/resorts", self.base_url);
        let start = Instant::now();
        let mut retries = 0;

        loop {
            let mut request = self.client.get(&url);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        retries += 1;
                        if retries > MAX_RETRIES {
                            return CatalogResult::failure(
                                "Max retries exceeded (429)".to_string(),
                            );
                        }
                        let wait = Duration::from_millis(500 * (1 << retries.min(3)));
                        warn!(
                            "[ResortFetcher] 429 Too Many Requests, retry {} after {:?}",
                            retries, wait
                        );
                        tokio::time::sleep(wait).await;
                        continue;
                    }

                    if !status.is_success() {
                        return CatalogResult::failure(format!("HTTP {}", status));
                    }

                    let bytes = match resp.bytes().await {
                        Ok(b) => b,
                        Err(e) => {
                            return CatalogResult::failure(format!(
                                "Body download error: {}",
                                e
                            ));
                        }
                    };

                    return match parse_catalog(&bytes) {
                        Ok(resorts) => {
                            info!(
                                "[ResortFetcher] fetched {} resorts ({:.1}KB) in {:?}",
                                resorts.len(),
                                bytes.len() as f64 / 1024.0,
                                start.elapsed()
                            );
                            CatalogResult {
                                resorts,
                                success: true,
                                error: None,
                            }
                        }
                        Err(e) => CatalogResult::failure(e),
                    };
                }
                Err(e) => {
                    retries += 1;
                    if retries > MAX_RETRIES {
                        return CatalogResult::failure(format!("Request error: {}", e));
                    }
                    let wait = Duration::from_millis(200 * (1 << retries));
                    warn!(
                        "[ResortFetcher] request error: {}, retry {} after {:?}",
                        e, retries, wait
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

/// Synchronous wrapper for FFI - runs the async fetch on a tokio runtime.
#[cfg(feature = "ffi")]
pub fn fetch_catalog_sync(base_url: String, api_key: Option<String>) -> CatalogResult {
    use tokio::runtime::Builder;

    let rt = match Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            warn!("Failed to create tokio runtime: {}", e);
            return CatalogResult::failure(format!("Runtime error: {}", e));
        }
    };

    let fetcher = match ResortFetcher::new(&base_url, api_key.as_deref()) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to create fetcher: {}", e);
            return CatalogResult::failure(e);
        }
    };

    rt.block_on(fetcher.fetch_catalog())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let body = br#"[
            {
                "id": "vail",
                "name": "Vail",
                "state": "CO",
                "region": "Rocky Mountains",
                "latitude": 39.6061,
                "longitude": -106.3550,
                "elevation": 11570,
                "isOpen": true
            }
        ]"#;

        let resorts = parse_catalog(body).unwrap();
        assert_eq!(resorts.len(), 1);
        assert_eq!(resorts[0].id, "vail");
        assert_eq!(resorts[0].state, "CO");
    }

    #[test]
    fn test_parse_catalog_drops_invalid_coordinates() {
        let body = br#"[
            {"id": "ok", "name": "Ok", "state": "CO", "region": "Rocky Mountains",
             "latitude": 39.0, "longitude": -106.0},
            {"id": "bad", "name": "Bad", "state": "CO", "region": "Rocky Mountains",
             "latitude": 99.0, "longitude": 0.0}
        ]"#;

        let resorts = parse_catalog(body).unwrap();
        assert_eq!(resorts.len(), 1);
        assert_eq!(resorts[0].id, "ok");
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_body() {
        assert!(parse_catalog(b"not json").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let fetcher = ResortFetcher::new("https://api.example.com/v1/", None).unwrap();
        assert_eq!(fetcher.base_url, "https://api.example.com/v1");
    }
}
