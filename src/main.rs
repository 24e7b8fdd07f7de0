//! Main binary entry point for json2xml-bridge.

use clap::{Parser, Subcommand};
use json2xml_bridge::config::{FetchArgs, ServeArgs, ServerConfig};
use json2xml_bridge::errors::BridgeError;
use json2xml_bridge::{Config, Source};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a local JSON file (or stdin) to XML
    Convert {
        /// Input JSON file, or '-' for stdin
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Fetch a remote JSON resource and print it as XML
    Fetch {
        url: String,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Serve the bridge over HTTP
    Serve(ServeArgs),
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<(), BridgeError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Command::Convert { input, output } => {
            let source = if input.as_os_str() == "-" {
                Source::Stdin
            } else {
                Source::File(input)
            };
            json2xml_bridge::run(Config {
                source,
                output,
                fetch: Default::default(),
            })
        }
        Command::Fetch { url, output, fetch } => json2xml_bridge::run(Config {
            source: Source::Url(url),
            output,
            fetch: fetch.to_fetch_config(),
        }),
        Command::Serve(args) => {
            let config = ServerConfig::from(&args);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| BridgeError::Io(e, "Failed to start async runtime".to_string()))?;
            runtime.block_on(json2xml_bridge::server::serve(config))
        }
    }
}

fn main() -> ExitCode {
    match run_app() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
