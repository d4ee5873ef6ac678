use crate::analysis::types::{Envelope, LabeledValue};
use crate::analysis::{AnalyzeError, Aggregator, DEFAULT_PAGE_SIZE, Field};
use crate::cli::parse_cli_date;
use crate::conf::load_config;
use crate::store::{DateRange, connect};
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Collection and time window shared by every read command.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Collection to read
    #[arg(long, short)]
    pub collection: String,

    /// Inclusive lower bound (defaults to the Unix epoch)
    #[arg(long, value_parser = parse_cli_date)]
    pub from: Option<NaiveDateTime>,

    /// Exclusive upper bound (defaults to now)
    #[arg(long, value_parser = parse_cli_date)]
    pub to: Option<NaiveDateTime>,

    /// Path to an HCL config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl QueryArgs {
    pub fn range(&self) -> DateRange {
        DateRange::from_bounds(self.from, self.to)
    }
}

fn with_aggregator<T>(
    args: &QueryArgs,
    f: impl FnOnce(&Aggregator<'_>, &DateRange) -> Result<T, AnalyzeError>,
) -> Result<T> {
    let cfg = load_config(args.config.as_deref())?;
    let store = connect(&cfg.store)
        .with_context(|| format!("failed to open store at {}", cfg.store.uri))?;

    let aggregator = Aggregator::new(store.as_ref(), &args.collection)?;
    Ok(f(&aggregator, &args.range())?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

pub fn stats(args: &QueryArgs) -> Result<()> {
    let report = with_aggregator(args, |agg, range| agg.stats(range))?;
    print_json(&report.to_transport())
}

pub fn records(args: &QueryArgs, page: usize, page_size: Option<usize>) -> Result<()> {
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let page = with_aggregator(args, |agg, range| agg.paginate(range, page, page_size))?;
    print_json(&page.to_transport())
}

pub fn range(args: &QueryArgs) -> Result<()> {
    let span = with_aggregator(args, |agg, range| agg.date_range(range))?;
    print_json(&span.to_transport())
}

pub fn group(args: &QueryArgs, field: Field) -> Result<()> {
    let counts = with_aggregator(args, |agg, range| agg.count_by_group(range, field))?;
    print_json(&counts.to_transport())
}

pub fn sum(args: &QueryArgs, field: Field) -> Result<()> {
    let Some(total) = with_aggregator(args, |agg, range| agg.sum(range, field))? else {
        bail!("field '{field}' is not numeric");
    };

    print_json(&Envelope {
        data: vec![LabeledValue {
            label: field.name().to_string(),
            value: total,
        }],
    })
}

pub fn median(args: &QueryArgs, field: Field, group_by: Option<Field>) -> Result<()> {
    let medians = with_aggregator(args, |agg, range| agg.median(range, field, group_by))?;

    match medians {
        Some(m) => print_json(&m.to_transport()),
        None => print_json(&Envelope::<LabeledValue<f64>> { data: Vec::new() }),
    }
}
