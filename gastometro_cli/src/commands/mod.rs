//! CLI subcommand implementations.

pub mod chamber;
pub mod legislator;
pub mod options;
pub mod rank;
pub mod suggest;
