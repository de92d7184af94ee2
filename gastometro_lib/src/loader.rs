//! Loads the two source documents from local files or over HTTP.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gastometro_data::types::{parse_legislators, LegislatorMap, RankingsDocument};
use gastometro_data::Client;
use rand::Rng;

use crate::config::{env_u64, env_usize, DataConfig};
use crate::dataset::Dataset;
use crate::error::GastometroError;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    /// `http://` and `https://` locations are remote; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Remote(trimmed.to_string())
        } else {
            DataSource::Local(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Exponential backoff with +/-20% jitter for remote fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 15000,
        }
    }
}

impl RetryPolicy {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("GASTOMETRO_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("GASTOMETRO_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("GASTOMETRO_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// Builds a [`Dataset`] from a legislator source and an optional rankings
/// source.
pub struct Loader {
    client: Client,
    retry: RetryPolicy,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// A loader with the default HTTP client and retry settings from the
    /// environment.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            retry: RetryPolicy::from_env(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Load both documents named by a [`DataConfig`].
    pub async fn load_config(&self, data: &DataConfig) -> Result<Dataset, GastometroError> {
        let legislators = DataSource::parse(&data.legislators);
        let rankings = data.rankings.as_deref().map(DataSource::parse);
        self.load(&legislators, rankings.as_ref()).await
    }

    /// Load the legislator document (required) and the rankings document
    /// (optional). A rankings failure is logged and the dataset is built
    /// without the cache tier.
    pub async fn load(
        &self,
        legislators: &DataSource,
        rankings: Option<&DataSource>,
    ) -> Result<Dataset, GastometroError> {
        let legislator_map = self.load_legislators(legislators).await?;
        let rankings_doc = match rankings {
            Some(source) => match self.load_rankings(source).await {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::warn!(
                        "Rankings unavailable from {} ({}); deriving from records",
                        source,
                        e
                    );
                    None
                }
            },
            None => None,
        };
        tracing::info!(
            "Loaded {} legislators from {}{}",
            legislator_map.len(),
            legislators,
            if rankings_doc.is_some() {
                " with precomputed rankings"
            } else {
                ""
            }
        );
        Ok(Dataset::new(legislator_map, rankings_doc))
    }

    async fn load_legislators(
        &self,
        source: &DataSource,
    ) -> Result<LegislatorMap, GastometroError> {
        let (map, skipped) = match source {
            DataSource::Local(path) => {
                let value = read_json(path).await?;
                parse_legislators(value)
            }
            DataSource::Remote(url) => {
                self.retrying("legislators", || async {
                    Ok(self.client.get_legislators(url).await?)
                })
                .await?
            }
        };
        if skipped > 0 {
            tracing::warn!("Skipped {} malformed legislator records", skipped);
        }
        Ok(map)
    }

    async fn load_rankings(
        &self,
        source: &DataSource,
    ) -> Result<RankingsDocument, GastometroError> {
        match source {
            DataSource::Local(path) => {
                let value = read_json(path).await?;
                Ok(serde_json::from_value(value)?)
            }
            DataSource::Remote(url) => {
                self.retrying("rankings", || async {
                    Ok(self.client.get_rankings(url).await?)
                })
                .await
            }
        }
    }

    async fn retrying<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, GastometroError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, GastometroError>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

async fn read_json(path: &Path) -> Result<serde_json::Value, GastometroError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| GastometroError::Load {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&text)?)
}

fn is_retryable(err: &GastometroError) -> bool {
    match err {
        GastometroError::Feed(feed_err) => match feed_err {
            gastometro_data::Error::RequestFailed => true,
            gastometro_data::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            gastometro_data::Error::InvalidUrl(_) => false,
        },
        _ => false,
    }
}
