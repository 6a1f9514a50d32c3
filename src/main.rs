//! DocLoader CLI
//!
//! Loads a delimited text file into a document store collection.
//!
//! ```text
//! docloader -u file:///var/lib/docs -b school -c scores -i scores.csv \
//!     -n id,name,score -t I,S,F -s ';' -l 1 -d 500
//! ```

use anyhow::Context;
use clap::Parser;
use docloader::csv::Separator;
use docloader::database::load;
use docloader::utils::{Helpers, Logger};
use docloader::LoadConfig;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "docloader", version)]
#[command(about = "Load a delimited text file into a document store", long_about = None)]
struct Cli {
    /// Store connection target (memory://, file://<dir>, http(s)://..., mongodb://...)
    #[arg(short, long)]
    uri: String,

    /// Database name
    #[arg(short = 'b', long)]
    database: String,

    /// Collection name
    #[arg(short, long)]
    collection: String,

    /// Input file
    #[arg(short, long)]
    input: PathBuf,

    /// Column separator (';', ',' or TAB)
    #[arg(short, long, default_value = ";", value_parser = Separator::from_str)]
    separator: Separator,

    /// Number of leading lines to skip
    #[arg(short = 'l', long = "lines", default_value_t = 0)]
    skip_lines: u64,

    /// Comma-separated column names
    #[arg(short, long)]
    names: String,

    /// Comma-separated column types (i - int, I - int64, F - float, S - string)
    #[arg(short, long)]
    types: String,

    /// Documents per insert call
    #[arg(short = 'd', long = "doc", default_value_t = docloader::config::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> LoadConfig {
        LoadConfig::new(
            self.uri,
            self.database,
            self.collection,
            self.input,
            self.names,
            self.types,
        )
        .with_separator(self.separator)
        .with_skip_lines(self.skip_lines)
        .with_batch_size(self.batch_size)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    Logger::init_with_level(Logger::level_for_verbosity(cli.verbose));

    let config = cli.into_config();
    log::info!(
        "loading {} into {}.{}",
        config.input.display(),
        config.database,
        config.collection
    );

    let mut progress = |total: u64| {
        print!("Insert {} done.\r", total);
        let _ = std::io::stdout().flush();
    };
    let result = load(&config, Some(&mut progress));
    println!();

    if let Some(committed) = result.as_ref().err().and_then(|e| e.committed()) {
        log::warn!(
            "{} documents were inserted before the failure and remain in {}.{}",
            Helpers::format_count(committed),
            config.database,
            config.collection
        );
    }
    let summary = result.with_context(|| format!("failed to load {}", config.input.display()))?;

    log::info!(
        "inserted {} documents in {} batches ({}, {:.0} rows/s)",
        Helpers::format_count(summary.rows_loaded),
        summary.batches,
        Helpers::format_duration(summary.elapsed),
        Helpers::rows_per_second(summary.rows_loaded, summary.elapsed)
    );
    if let Some(total) = summary.total_in_store {
        log::info!("collection now holds {} documents", Helpers::format_count(total));
    }

    Ok(())
}
