#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use asset_bundle_build::Options;
use clap::{ArgAction, Parser};
use tracing_subscriber::prelude::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(eval_logging(&cli))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("error initializing logging")?;

    cli.run()
}

fn eval_logging(cli: &Cli) -> tracing_subscriber::EnvFilter {
    let directives = match (cli.verbose, cli.quiet) {
        // quiet overrides verbose
        (_, true) => "error",
        (0, false) => "error,asset_bundle_build=warn",
        (1, false) => "error,asset_bundle_build=info",
        (2, false) => "error,asset_bundle_build=debug",
        (_, false) => "error,asset_bundle_build=trace",
    };
    tracing_subscriber::EnvFilter::new(directives)
}

/// Embed static web assets into a generated Rust source file.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Directory the asset root, config file and output are resolved against [default: current directory]
    #[arg(short = 'C', long)]
    dir: Option<PathBuf>,
    /// Path to the config file [default: bundle.toml]
    #[arg(long, env = "ASSET_BUNDLE_CONFIG")]
    config: Option<PathBuf>,
    /// Where to write the generated source, overriding the config file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Fail instead of writing if the generated source would change
    #[arg(long)]
    check: bool,
    /// Enable verbose logging.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Be more quiet, conflicts with --verbose
    #[arg(short, long, conflicts_with("verbose"))]
    quiet: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let dir = match self.dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        let mut opts = Options::new(dir).with_check(self.check);
        if let Some(config) = self.config {
            opts = opts.with_config_file(config);
        }
        if let Some(output) = self.output {
            opts = opts.with_output_file(output);
        }

        let report = asset_bundle_build::generate(opts)?;
        if !self.quiet {
            print!("{report}");
        }
        Ok(())
    }
}
