use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use salequery::history::{group_history, HistoryRow, DAY_SECONDS};
use salequery::{
    compile_aggregate_query, compile_record_query, parser, verify_parameters, AggregateMode, Clock,
    CompiledQuery, CompilerConfig, FixedClock, QueryParams, ReferenceData, ReferenceKind, StaticSource,
    SystemClock,
};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "salequery-demo")]
#[command(about = "Verify sale query parameters and print the compiled ClickHouse SQL")]
#[command(version)]
struct Args {
    /// Compiler configuration YAML (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// YAML file listing known collection_names, symbol_codes and chains
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Print the full compiled query as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a sales listing query
    Record {
        /// URL query string, e.g. "collection_name=pomelo&limit=10"
        query: String,
    },
    /// Compile an aggregate query
    Aggregate {
        query: String,

        /// Daily buckets per chain and currency instead of a single value
        #[arg(long)]
        history: bool,

        /// Current time in epoch seconds, for reproducible history windows
        #[arg(long)]
        now: Option<i64>,
    },
    /// Only verify the parameters
    Verify { query: String },
    /// Fold history rows (a JSON array) into one series per chain and currency
    Fold { rows: PathBuf },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReferenceFile {
    collection_names: Vec<String>,
    symbol_codes: Vec<String>,
    chains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => parser::parse_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => CompilerConfig::default(),
    };

    match &args.command {
        Commands::Record { query } => {
            let params = checked_params(query, &args, &config).await?;
            let compiled = compile_record_query(&params, &config)?;
            print_query(&compiled, args.json)
        }
        Commands::Aggregate { query, history, now } => {
            let params = checked_params(query, &args, &config).await?;
            let mode = if *history { AggregateMode::History } else { AggregateMode::Point };
            let clock: Box<dyn Clock> = match now {
                Some(secs) => Box::new(FixedClock(*secs)),
                None => Box::new(SystemClock),
            };
            let compiled = compile_aggregate_query(&params, mode, &config, clock.as_ref())?;
            print_query(&compiled, args.json)
        }
        Commands::Verify { query } => {
            checked_params(query, &args, &config).await?;
            println!("ok");
            Ok(())
        }
        Commands::Fold { rows } => {
            let contents =
                std::fs::read_to_string(rows).with_context(|| format!("reading {}", rows.display()))?;
            let rows: Vec<HistoryRow> = serde_json::from_str(&contents)?;
            let series = group_history(&rows, DAY_SECONDS);
            println!("{}", serde_json::to_string_pretty(&series)?);
            Ok(())
        }
    }
}

/// Parse the query string and, when reference data was given, verify it
async fn checked_params(query: &str, args: &Args, config: &CompilerConfig) -> anyhow::Result<QueryParams> {
    let params = QueryParams::parse(query);
    let Some(path) = &args.reference else {
        info!("no reference data given, skipping verification");
        return Ok(params);
    };

    let reference = load_reference(path)?;
    if let Err(rejection) = verify_parameters(&params, &reference, config).await {
        anyhow::bail!("{} ({})", rejection, rejection.status());
    }
    Ok(params)
}

fn load_reference(path: &Path) -> anyhow::Result<ReferenceData> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: ReferenceFile = serde_yaml::from_str(&contents)?;
    let source = StaticSource::new()
        .with(ReferenceKind::CollectionNames, file.collection_names)
        .with(ReferenceKind::SymbolCodes, file.symbol_codes)
        .with(ReferenceKind::Chains, file.chains);
    Ok(ReferenceData::new(Arc::new(source)))
}

fn print_query(compiled: &CompiledQuery, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(compiled)?);
    } else {
        println!("{}", compiled.sql());
        for param in compiled.params() {
            let (name, value) = param.http_pair();
            println!("  {}={}", name, value);
        }
    }
    Ok(())
}
