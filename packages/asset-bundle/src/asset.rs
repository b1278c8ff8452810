use std::io::Read;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use flate2::read::GzDecoder;
use thiserror::Error;

/// One embedded file: a content tag and the base64 text of its gzip stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asset {
    pub etag: &'static str,
    pub body: &'static str,
}

impl Asset {
    pub const fn new(etag: &'static str, body: &'static str) -> Self {
        Self { etag, body }
    }

    /// Returns the original file bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        let compressed = STANDARD.decode(self.body)?;
        let mut bytes = Vec::new();
        GzDecoder::new(compressed.as_slice()).read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("asset body is not valid base64")]
    Base64(#[from] base64::DecodeError),
    #[error("asset body is not a valid gzip stream")]
    Gzip(#[from] std::io::Error),
}
