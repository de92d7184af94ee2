//! Library layer for Gastômetro: dataset loading, the ranking engine, and
//! browse helpers over legislator expense data.
//!
//! Wraps the `gastometro_data` feed crate with a path-or-URL loader, a
//! settings file, input validation, and the aggregation pipeline.

pub mod aggregate;
pub mod breakdown;
pub mod browse;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod ranking;
pub mod request;
pub mod validation;

pub use gastometro_data;
pub use gastometro_data::types;
pub use gastometro_data::{parse_amount, Amount};

pub use config::Config;
pub use dataset::Dataset;
pub use error::GastometroError;
pub use loader::{DataSource, Loader, RetryPolicy};
pub use ranking::{compute_ranking, RankingEntry};
pub use request::{Dimension, RankingFilters, RankingRequest, Scope, SortDirection};
