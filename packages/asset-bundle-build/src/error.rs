use std::{io, path::PathBuf};

use thiserror::Error;

/// Every way a bundle run can fail. All of them abort the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read asset {}", path.display())]
    AssetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode asset {name}")]
    Encode {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("asset {name} is produced more than once")]
    DuplicateAsset { name: String },
    #[error("invalid asset pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("failed to render {}:{line}: {message}", path.display())]
    TemplateRender {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("could not write {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is out of date", path.display())]
    OutOfDate { path: PathBuf },
    #[error("could not read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
