mod config;
mod transcode;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;

use crate::config::{Config, Format};
use crate::transcode::Options;

fn main() -> Result<()> {
    let flags = xflags::parse_or_exit! {
        /// Configuration file
        optional -c,--config CONFIG: PathBuf
        /// Input format: json, cbor or auto
        optional --from FMT: Format
        /// Output format: json, cbor or auto
        optional --to FMT: Format
        /// Output file, stdout when omitted
        optional -o,--output OUTPUT: PathBuf
        /// Print the merged audience instead of the item
        optional --recipients
        /// Replace embedded actor, object and target with references
        optional --flatten
        /// Log at debug level
        optional --verbose
        /// Input file
        required input: PathBuf
    };

    let config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let level = if flags.verbose {
        Level::DEBUG
    } else {
        config
            .log
            .level
            .parse()
            .with_context(|| format!("invalid log level {:?}", config.log.level))?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut options = Options::from(&config.codec);
    if let Some(from) = flags.from {
        options.from = from;
    }
    if let Some(to) = flags.to {
        options.to = to;
    }
    options.flatten |= flags.flatten;
    options.recipients = flags.recipients;

    transcode::run(&flags.input, flags.output.as_deref(), &options)
}
