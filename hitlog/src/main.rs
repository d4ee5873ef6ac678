use clap::{Parser, Subcommand};
use hitlog_core::analysis::Field;
use hitlog_core::cli;
use hitlog_core::cli::load::LoadArgs;
use hitlog_core::cli::query::QueryArgs;
use hitlog_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "hitlog",
    version,
    about = "hitlog: access log loader and traffic statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse, enrich and store an access log
    Load(LoadArgs),

    /// Summary statistics for a collection
    Stats(QueryArgs),

    /// One page of records
    Records {
        #[command(flatten)]
        query: QueryArgs,

        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Earliest and latest timestamp
    Range(QueryArgs),

    /// Record counts per distinct value of a field
    Group {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long)]
        field: Field,
    },

    /// Sum of a numeric field
    Sum {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long)]
        field: Field,
    },

    /// Median of a numeric field, optionally per group
    Median {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long)]
        field: Field,

        #[arg(long)]
        by: Option<Field>,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result: anyhow::Result<()> = match cli.command {
        Command::Load(args) => match cli::load::run_load(args) {
            Ok(report) if !report.success => std::process::exit(1),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        },
        Command::Stats(query) => cli::query::stats(&query),
        Command::Records {
            query,
            page,
            page_size,
        } => cli::query::records(&query, page, page_size),
        Command::Range(query) => cli::query::range(&query),
        Command::Group { query, field } => cli::query::group(&query, field),
        Command::Sum { query, field } => cli::query::sum(&query, field),
        Command::Median { query, field, by } => cli::query::median(&query, field, by),
        Command::Config { cmd } => cli::config::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("hitlog error: {e:#}");
        std::process::exit(1);
    }
}
