use crate::conf::load_config;
use crate::enrichment::Enricher;
use crate::ingest::{BatchLoader, LoadReport};
use crate::logging::{OutputFormat, default_output_format};
use crate::store::connect;
use anyhow::{Context, Result};
use clap::Args;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Access log to load; `-` reads stdin
    pub file: PathBuf,

    /// Target collection
    #[arg(long, short)]
    pub collection: String,

    /// Path to an HCL config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format (defaults to pretty on a terminal, json otherwise)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Runs the load and prints its report. The returned report tells the
/// caller whether the collection exists afterwards.
pub fn run_load(args: LoadArgs) -> Result<LoadReport> {
    let cfg = load_config(args.config.as_deref())?;

    let enricher =
        Enricher::from_config(&cfg.enrichment).context("failed to load enrichment data")?;
    let mut store = connect(&cfg.store)
        .with_context(|| format!("failed to open store at {}", cfg.store.uri))?;

    let mut loader = BatchLoader::new(store.as_mut(), &enricher);
    let report = if args.file.as_os_str() == "-" {
        loader.load_reader(io::stdin().lock(), &args.collection)?
    } else {
        loader.load(&args.file, &args.collection)?
    };

    print_report(&report, args.format.unwrap_or_else(default_output_format))?;
    Ok(report)
}

fn print_report(report: &LoadReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.render_json()?),
        OutputFormat::Plain => print!("{}", report.render_plain()),
        OutputFormat::Pretty => print!("{}", report.render_pretty()),
    }
    Ok(())
}
