//! Fetch download statistics and package documents from npm

use super::{decode_json, retry_request};
use crate::config::NetworkConfig;
use crate::error::{CheckError, Result};
use crate::repository::RepositoryDescriptor;
use crate::types::DownloadStat;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const DOWNLOADS_SERVICE: &str = "npm downloads";
const REGISTRY_SERVICE: &str = "npm registry";

/// Response from the download statistics point endpoint
#[derive(Debug, Deserialize)]
struct DownloadsPoint {
    downloads: u64,
    #[serde(default)]
    package: Option<String>,
}

/// The parts of a registry package document the checks read
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDocument {
    pub name: String,
    #[serde(default)]
    pub repository: Option<RepositoryDescriptor>,
}

/// Fetch last week's download count for a package
pub async fn fetch_download_stat(
    client: &Client,
    package: &str,
    config: &NetworkConfig,
) -> Result<DownloadStat> {
    debug!("Fetching weekly downloads for {}", package);

    let url = format!(
        "{}/downloads/point/last-week/{}",
        config.npm_downloads_api.trim_end_matches('/'),
        package
    );
    let response = retry_request(client, &url, &HeaderMap::new(), DOWNLOADS_SERVICE, config).await?;

    if !response.status().is_success() {
        if response.status().as_u16() == 404 {
            return Err(CheckError::not_found(DOWNLOADS_SERVICE, package));
        }
        return Err(CheckError::api(DOWNLOADS_SERVICE, response.status().as_u16()));
    }

    let point: DownloadsPoint = decode_json(response, DOWNLOADS_SERVICE).await?;

    Ok(DownloadStat {
        package: point.package.unwrap_or_else(|| package.to_string()),
        weekly_downloads: point.downloads,
    })
}

/// Fetch the registry document for a package
pub async fn fetch_package_document(
    client: &Client,
    package: &str,
    config: &NetworkConfig,
) -> Result<PackageDocument> {
    debug!("Fetching registry document for {}", package);

    let url = format!(
        "{}/{}",
        config.npm_registry_api.trim_end_matches('/'),
        registry_path(package)
    );
    let response = retry_request(client, &url, &HeaderMap::new(), REGISTRY_SERVICE, config).await?;

    if !response.status().is_success() {
        if response.status().as_u16() == 404 {
            return Err(CheckError::not_found(REGISTRY_SERVICE, package));
        }
        return Err(CheckError::api(REGISTRY_SERVICE, response.status().as_u16()));
    }

    decode_json(response, REGISTRY_SERVICE).await
}

/// Registry path segment for a package name. Scoped names keep their `@` but
/// have the separating `/` encoded.
fn registry_path(package: &str) -> String {
    urlencoding::encode(package).replace("%40", "@")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::build_client;

    fn test_config(base: &str) -> NetworkConfig {
        NetworkConfig {
            max_retries: 0,
            request_delay_ms: 1,
            github_token: None,
            ..NetworkConfig::default()
        }
        .with_base_url(base)
    }

    #[test]
    fn test_registry_path() {
        assert_eq!(registry_path("left-pad"), "left-pad");
        assert_eq!(registry_path("@types/node"), "@types%2Fnode");
    }

    #[tokio::test]
    async fn test_fetch_download_stat() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/downloads/point/last-week/left-pad")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"downloads":500000,"start":"2024-01-01","end":"2024-01-07","package":"left-pad"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let client = build_client(&config).unwrap();
        let stat = fetch_download_stat(&client, "left-pad", &config).await.unwrap();

        assert_eq!(stat.package, "left-pad");
        assert_eq!(stat.weekly_downloads, 500_000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_stat_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/downloads/point/last-week/no-such-package")
            .with_status(404)
            .with_body(r#"{"error":"package no-such-package not found"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let client = build_client(&config).unwrap();
        let result = fetch_download_stat(&client, "no-such-package", &config).await;

        assert!(matches!(result, Err(CheckError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_download_stat_rejects_missing_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/downloads/point/last-week/odd")
            .with_status(200)
            .with_body(r#"{"package":"odd"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let client = build_client(&config).unwrap();
        let result = fetch_download_stat(&client, "odd", &config).await;

        assert!(matches!(result, Err(CheckError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_fetch_package_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/express")
            .with_status(200)
            .with_body(
                r#"{"name":"express","versions":{},"repository":{"type":"git","url":"git+https://github.com/expressjs/express.git"}}"#,
            )
            .create_async()
            .await;

        let config = test_config(&server.url());
        let client = build_client(&config).unwrap();
        let doc = fetch_package_document(&client, "express", &config).await.unwrap();

        assert_eq!(doc.name, "express");
        assert_eq!(
            doc.repository.as_ref().and_then(|r| r.url()),
            Some("git+https://github.com/expressjs/express.git")
        );
    }

    #[tokio::test]
    async fn test_package_document_without_repository() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_body(r#"{"name":"left-pad"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let client = build_client(&config).unwrap();
        let doc = fetch_package_document(&client, "left-pad", &config).await.unwrap();

        assert!(doc.repository.is_none());
    }
}
