//! Main library for the JSON to XML bridge.
//!
//! This crate fetches JSON resources and re-serializes them as well-formed
//! XML documents, so XML-only consumers can read JSON APIs. The pure
//! transformation lives in [`transcode`]; [`fetch`] and [`server`] are the
//! I/O around it.

pub mod config;
pub mod errors;
pub mod fetch;
pub mod formats;
pub mod server;
pub mod transcode;

use errors::BridgeError;
use fetch::{FetchConfig, Fetcher};
use log::info;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Where a one-shot conversion reads its JSON from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Url(String),
}

/// Top-level configuration for a one-shot conversion run.
#[derive(Debug)]
pub struct Config {
    pub source: Source,
    /// Write to this file instead of stdout.
    pub output: Option<PathBuf>,
    pub fetch: FetchConfig,
}

/// Convert a single JSON input into an XML document.
pub fn run(config: Config) -> Result<(), BridgeError> {
    let start_time = Instant::now();
    info!("Starting conversion from {:?}", config.source);

    let value = load(&config.source, config.fetch)?;

    match &config.output {
        Some(path) => {
            info!("  Output: {}", path.display());
            let file = File::create(path)
                .map_err(|e| BridgeError::Io(e, "Failed to create output file".to_string()))?;
            formats::xml::write(BufWriter::new(file), &value)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            formats::xml::write(&mut handle, &value)?;
            handle
                .write_all(b"\n")
                .map_err(|e| BridgeError::Io(e, "Failed to write to stdout".to_string()))?;
        }
    }

    info!("Total execution time: {:.2?}", start_time.elapsed());
    Ok(())
}

fn load(source: &Source, fetch: FetchConfig) -> Result<Value, BridgeError> {
    match source {
        Source::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| BridgeError::Io(e, "Failed to read stdin".to_string()))?;
            formats::json::parse(&bytes)
        }
        Source::File(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                BridgeError::Io(e, format!("Failed to read input file: {}", path.display()))
            })?;
            formats::json::parse(&bytes)
        }
        Source::Url(url) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| BridgeError::Io(e, "Failed to start async runtime".to_string()))?;
            let fetcher = Fetcher::new(fetch)?;
            Ok(runtime.block_on(fetcher.fetch_json(url))?)
        }
    }
}
