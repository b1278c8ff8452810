use crate::{Asset, DecodeError};

const SHELL: &str = "index.html";

/// A static name-to-asset table, in the order the generator emitted it.
#[derive(Debug)]
pub struct Bundle {
    entries: &'static [(&'static str, Asset)],
}

impl Bundle {
    pub const fn new(entries: &'static [(&'static str, Asset)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&'static Asset> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, asset)| asset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static Asset)> + use<> {
        self.entries.iter().map(|(name, asset)| (*name, asset))
    }

    /// Resolves a request path. The leading `/` and any query or fragment
    /// are dropped; the bare root resolves to the shell.
    pub fn lookup(&self, path: &str, if_none_match: Option<&str>) -> Lookup {
        let Some(asset) = self.get(asset_name(path)) else {
            return Lookup::NotFound;
        };
        if if_none_match.is_some_and(|header| etag_matches(header, asset.etag)) {
            return Lookup::NotModified { etag: asset.etag };
        }
        match asset.decode() {
            Ok(body) => Lookup::Found {
                etag: asset.etag,
                body,
            },
            Err(err) => Lookup::Invalid(err),
        }
    }
}

#[derive(Debug)]
pub enum Lookup {
    Found { etag: &'static str, body: Vec<u8> },
    NotModified { etag: &'static str },
    NotFound,
    /// The entry exists but its body could not be decoded.
    Invalid(DecodeError),
}

fn asset_name(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let name = path[..end].trim_start_matches('/');
    if name.is_empty() { SHELL } else { name }
}

fn etag_matches(header: &str, etag: &str) -> bool {
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.trim_start_matches("W/").trim_matches('"') == etag
    })
}
