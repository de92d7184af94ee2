mod catalog;
mod commands;
mod output;
mod xml_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gastometro_lib::config::Config;
use gastometro_lib::Loader;

use crate::catalog::Catalog;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "gastometro")]
#[command(about = "Rank Brazilian federal deputies by parliamentary expenses")]
struct Cli {
    /// Output format: table, json, csv, md, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Path to a gastometro.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Legislator document (file path or http(s) URL)
    #[arg(long, global = true)]
    legislators: Option<String>,

    /// Precomputed rankings document (file path or http(s) URL)
    #[arg(long, global = true, conflicts_with = "no_rankings")]
    rankings: Option<String>,

    /// Ignore the precomputed rankings and derive everything
    #[arg(long, global = true)]
    no_rankings: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank legislators, parties or years by spending
    Rank(commands::rank::RankArgs),
    /// Show one legislator's expenses for a year
    Legislator(commands::legislator::LegislatorArgs),
    /// Show chamber-wide expenses for a year
    Chamber(commands::chamber::ChamberArgs),
    /// List the values a selector accepts
    Options(commands::options::OptionsArgs),
    /// Suggest legislator names matching a query
    Suggest(commands::suggest::SuggestArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gastometro=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_name(&cli.output);

    let mut config = Config::discover(cli.config.as_deref())?.with_env_overrides();
    if let Some(ref legislators) = cli.legislators {
        config.data.legislators = legislators.clone();
    }
    if let Some(ref rankings) = cli.rankings {
        config.data.rankings = Some(rankings.clone());
    }
    if cli.no_rankings {
        config.data.rankings = None;
    }

    let catalog = Catalog::embedded()?;
    let dataset = Loader::new().load_config(&config.data).await?;

    match &cli.command {
        Commands::Rank(args) => commands::rank::run(args, &dataset, &config, &catalog, &format)?,
        Commands::Legislator(args) => {
            commands::legislator::run(args, &dataset, &catalog, &format)?
        }
        Commands::Chamber(args) => commands::chamber::run(args, &dataset, &catalog, &format)?,
        Commands::Options(args) => commands::options::run(args, &dataset, &catalog, &format)?,
        Commands::Suggest(args) => commands::suggest::run(args, &dataset, &config, &format)?,
    }

    Ok(())
}
