//! HTTP client for the published expense documents.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::{
    types::{parse_legislators, LegislatorMap, RankingsDocument},
    Error,
};

/// File name of the per-legislator expense document on the data host.
pub const LEGISLATORS_DOCUMENT: &str = "gastos_por_parlamentar.json";

/// File name of the precomputed rankings document on the data host.
pub const RANKINGS_DOCUMENT: &str = "rankings.json";

/// HTTP client for the two static JSON documents.
///
/// Each request builds a fresh `reqwest::Client` with the configured timeout
/// (30 seconds by default).
pub struct Client {
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client with the default 30-second timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Resolves a document file name against a base URL such as
    /// `https://example.org/assets/data`.
    pub fn document_url(base_url: &str, document: &str) -> Result<Url, Error> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| {
            tracing::error!("Invalid base URL '{}': {}", base_url, e);
            Error::InvalidUrl(base_url.to_string())
        })?;
        base.join(document).map_err(|e| {
            tracing::error!("Invalid document path '{}': {}", document, e);
            Error::InvalidUrl(format!("{}{}", base, document))
        })
    }

    async fn get_value(&self, url: &str) -> Result<Value, Error> {
        let url = Url::parse(url).map_err(|e| {
            tracing::error!("Invalid URL '{}': {}", url, e);
            Error::InvalidUrl(url.to_string())
        })?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get document: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<Value>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse document: {} | body: {}", e, snippet);
            Error::RequestFailed
        })
    }

    /// Fetches the legislator document. Returns the parsed records and the
    /// number of malformed records that were skipped.
    pub async fn get_legislators(&self, url: &str) -> Result<(LegislatorMap, usize), Error> {
        let document = self.get_value(url).await?;
        Ok(parse_legislators(document))
    }

    /// Fetches the precomputed rankings document.
    pub async fn get_rankings(&self, url: &str) -> Result<RankingsDocument, Error> {
        let document = self.get_value(url).await?;
        serde_json::from_value(document).map_err(|e| {
            tracing::error!("Rankings document has an unexpected shape: {}", e);
            Error::RequestFailed
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
