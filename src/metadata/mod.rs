//! Metadata fetchers for the npm APIs and GitHub repositories

pub mod github;
pub mod npm;

pub use github::fetch_repository_health;
pub use npm::{fetch_download_stat, fetch_package_document};

use crate::config::NetworkConfig;
use crate::error::{CheckError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every request of a run
pub fn build_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout())
        .build()
        .map_err(|e| CheckError::network(format!("Failed to build HTTP client: {}", e)))
}

/// Send a GET request, retrying transport errors and HTTP 429 with
/// exponential backoff.
///
/// Any other response, successful or not, is returned to the caller.
async fn retry_request(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
    service: &str,
    config: &NetworkConfig,
) -> Result<Response> {
    let mut attempts = 0;
    let mut delay = config.request_delay();

    loop {
        match client.get(url).headers(headers.clone()).send().await {
            Ok(response) => {
                if response.status().as_u16() == 429 {
                    if attempts >= config.max_retries {
                        return Err(CheckError::RateLimitExceeded {
                            service: service.to_string(),
                            retry_after: Some(delay),
                        });
                    }
                    warn!("Rate limited by {}, retrying after {:?}", service, delay);
                    tokio::time::sleep(delay).await;
                    attempts += 1;
                    delay *= 2;
                    continue;
                }
                return Ok(response);
            }
            Err(e) => {
                if attempts >= config.max_retries {
                    return Err(CheckError::network(format!("{} request failed: {}", service, e)));
                }
                warn!("{} request failed, retrying: {}", service, e);
                tokio::time::sleep(delay).await;
                attempts += 1;
                delay *= 2;
            }
        }
    }
}

/// Decode a JSON body into a typed schema
async fn decode_json<T: DeserializeOwned>(response: Response, service: &str) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| CheckError::decode(service, e.to_string()))
}
