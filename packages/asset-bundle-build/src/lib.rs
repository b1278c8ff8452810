mod assets;
mod codegen;
mod config;
mod error;
mod report;
mod shell;

use anyhow::{Context, Result};
use tracing::info;

pub use assets::{AssetRecord, SHELL_NAME, encode, etag};
pub use config::Options;
pub use error::Error;
pub use report::{Report, ReportRow};

/// Collects, encodes and emits every asset, finishing with the rendered shell.
pub fn generate(mut opts: Options) -> Result<Report> {
    let settings = config::parse(&mut opts).context("error loading bundle config")?;
    let mut assets = assets::collect(&mut opts, &settings).context("error collecting assets")?;
    let shell = shell::render(&mut opts, &settings).context("error rendering shell")?;
    let source = settings.root_display.join(&settings.shell_display);
    let shell = AssetRecord::new(SHELL_NAME.to_string(), &shell, source)
        .context("error encoding shell")?;
    assets.push(shell);
    codegen::generate(&opts, &settings, &assets).context("error writing bundle")?;
    info!("bundled {} assets from {}", assets.len(), settings.root.display());
    Ok(Report::new(&assets))
}
