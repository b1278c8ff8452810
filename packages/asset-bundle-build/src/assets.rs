mod codec;

use std::{
    collections::HashSet,
    fs, io,
    path::{Component, Path, PathBuf},
};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;
use walkdir::WalkDir;

use crate::{Options, config::Settings, error::Error};
pub use codec::{encode, etag};

/// Name the rendered shell is registered under.
pub const SHELL_NAME: &str = "index.html";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRecord {
    pub name: String,
    pub etag: String,
    pub body: String,
    pub original_len: usize,
    /// Where the bytes came from, for diagnostics.
    pub source: PathBuf,
}

impl AssetRecord {
    pub fn new(name: String, bytes: &[u8], source: PathBuf) -> Result<Self, Error> {
        let body = encode(bytes).map_err(|err| Error::Encode {
            name: name.clone(),
            source: err,
        })?;
        Ok(Self {
            etag: etag(bytes),
            body,
            original_len: bytes.len(),
            name,
            source,
        })
    }
}

/// Matches of one pattern are sorted by name.
pub fn collect(opts: &mut Options, settings: &Settings) -> Result<Vec<AssetRecord>, Error> {
    let matchers = settings
        .patterns
        .iter()
        .map(|pattern| compile(pattern))
        .collect::<Result<Vec<_>, _>>()?;
    let files = list_files(&settings.root)?;

    let mut seen = HashSet::new();
    let mut assets = vec![];
    for matcher in &matchers {
        for (name, path) in files.iter().filter(|(name, _)| matcher.is_match(name)) {
            if !seen.insert(name.as_str()) {
                debug!("{name} already matched by an earlier pattern");
                continue;
            }
            if name == SHELL_NAME {
                return Err(Error::DuplicateAsset { name: name.clone() });
            }
            opts.track(path);
            let bytes = fs::read(path).map_err(|source| Error::AssetRead {
                path: path.clone(),
                source,
            })?;
            let record =
                AssetRecord::new(name.clone(), &bytes, settings.root_display.join(name))?;
            debug!(
                name = %record.name,
                etag = %record.etag,
                original = record.original_len,
                encoded = record.body.len(),
                "collected asset"
            );
            assets.push(record);
        }
    }
    Ok(assets)
}

fn compile(pattern: &str) -> Result<GlobMatcher, Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Files below `root` keyed by their `/`-separated relative name. Symlinks
/// are followed.
fn list_files(root: &Path) -> Result<Vec<(String, PathBuf)>, Error> {
    let mut files = vec![];
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::AssetRead {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: io::Error::from(err),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let name = asset_name(root, &path)?;
        files.push((name, path));
    }
    files.sort();
    Ok(files)
}

fn asset_name(root: &Path, path: &Path) -> Result<String, Error> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts = vec![];
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| Error::AssetRead {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "file name is not UTF-8"),
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
