use crate::conf::{ConfigError, HitlogConfig, load_config};
use crate::enrichment::Enricher;
use clap::Subcommand;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration, open the enrichment data and exit
    Check {
        /// Path to an HCL config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print errors without colors or hints
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print the resolved configuration as JSON
    Dump {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { config, plain } => check(config, plain),
        ConfigCmd::Dump { config } => dump(config),
    }
}

pub fn check(path: Option<PathBuf>, plain: bool) -> anyhow::Result<()> {
    let cfg = match load_config(path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    };

    println!("✔ Config loaded successfully");
    println!("✔ store: {} (database '{}')", cfg.store.uri, cfg.store.database);

    if let Err(err) = Enricher::from_config(&cfg.enrichment) {
        if plain {
            eprintln!("{err}");
        } else {
            eprintln!("{} {err}", "✘".red().bold());
        }
        std::process::exit(1);
    }

    println!("✔ geoip database: {}", cfg.enrichment.geoip_db.display());
    println!("✔ user-agent engine: {:?}", cfg.enrichment.ua_engine);
    Ok(())
}

pub fn dump(path: Option<PathBuf>) -> anyhow::Result<()> {
    let cfg: HitlogConfig = load_config(path.as_deref())?;
    let s = serde_json::to_string_pretty(&cfg)?;
    println!("{s}");
    Ok(())
}

fn print_config_error(err: &ConfigError, plain: bool) {
    if plain {
        eprintln!("{err}");
        return;
    }

    eprintln!();
    eprintln!("{} {err}", "error:".red().bold());
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => None,

        ConfigError::Parse { .. } => Some(
            "The config file is HCL with two optional blocks.\n\
             \n\
             Example:\n\
             \n\
             store {\n\
             \x20 uri      = \"./data\"\n\
             \x20 database = \"test\"\n\
             }\n\
             \n\
             enrichment {\n\
             \x20 geoip_db  = \"./GeoLite2-Country.mmdb\"\n\
             \x20 ua_engine = \"woothee\"\n\
             }",
        ),

        ConfigError::EmptyStoreUri => Some(
            "Set store.uri to a directory, a file:// uri or memory://,\n\
             or export HITLOG_STORE_URI.",
        ),

        ConfigError::InvalidDatabase { .. } => Some(
            "Database names become directory names: no path separators\n\
             and no leading dot.",
        ),

        ConfigError::MissingUaRegexes => Some(
            "The uaparser engine needs the regexes.yaml from the uap-core project.\n\
             \n\
             Example:\n\
             \n\
             enrichment {\n\
             \x20 ua_engine  = \"uaparser\"\n\
             \x20 ua_regexes = \"./regexes.yaml\"\n\
             }",
        ),
    }
}
