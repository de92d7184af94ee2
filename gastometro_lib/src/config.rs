//! Settings file and environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::browse::DEFAULT_SUGGESTIONS;
use crate::error::GastometroError;

pub const DEFAULT_CONFIG_FILE: &str = "gastometro.toml";
pub const DEFAULT_LEGISLATORS: &str = "assets/data/gastos_por_parlamentar.json";
pub const DEFAULT_RANKINGS: &str = "assets/data/rankings.json";
pub const DEFAULT_TOP: usize = 25;

/// Settings loaded from `gastometro.toml`.
///
/// ```toml
/// [data]
/// legislators = "assets/data/gastos_por_parlamentar.json"
/// rankings = "assets/data/rankings.json"
///
/// [display]
/// top = 25
/// suggestions = 8
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub display: DisplayConfig,
}

/// Where the two documents live: a local path or an http(s) URL each.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub legislators: String,
    /// The rankings document is optional; without it every ranking is
    /// derived from the legislator records.
    pub rankings: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            legislators: DEFAULT_LEGISLATORS.to_string(),
            rankings: Some(DEFAULT_RANKINGS.to_string()),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown per ranking.
    pub top: usize,
    /// Cap on name suggestions.
    pub suggestions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, GastometroError> {
        toml::from_str(content).map_err(|e| GastometroError::Config(e.to_string()))
    }

    /// Read a settings file. A missing file is an error here; use
    /// [`Config::discover`] for the optional lookup.
    pub fn from_file(path: &Path) -> Result<Self, GastometroError> {
        let content = std::fs::read_to_string(path).map_err(|source| GastometroError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            GastometroError::Config(msg) => {
                GastometroError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Resolve the settings file: the explicit path, else `$GASTOMETRO_CONFIG`,
    /// else `gastometro.toml` in the working directory if it exists, else
    /// defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, GastometroError> {
        let chosen: Option<PathBuf> = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("GASTOMETRO_CONFIG").ok().map(PathBuf::from));
        if let Some(path) = chosen {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(&path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!("Loading config from {}", fallback.display());
            return Self::from_file(fallback);
        }
        Ok(Self::default())
    }

    /// Apply `GASTOMETRO_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. An empty `GASTOMETRO_RANKINGS`
    /// disables the rankings document; unparseable numbers are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("GASTOMETRO_LEGISLATORS").filter(|v| !v.trim().is_empty()) {
            self.data.legislators = path;
        }
        if let Some(path) = lookup("GASTOMETRO_RANKINGS") {
            self.data.rankings = if path.trim().is_empty() {
                None
            } else {
                Some(path)
            };
        }
        if let Some(top) = lookup("GASTOMETRO_TOP").and_then(|v| v.trim().parse().ok()) {
            self.display.top = top;
        }
        if let Some(n) = lookup("GASTOMETRO_SUGGESTIONS").and_then(|v| v.trim().parse().ok()) {
            self.display.suggestions = n;
        }
        self
    }
}

pub(crate) fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}
