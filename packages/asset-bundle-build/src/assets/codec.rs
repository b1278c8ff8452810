use std::io::{self, Write as _};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use flate2::{Compression, write::GzEncoder};
use sha2::{Digest, Sha256};

const ETAG_LEN: usize = 16;

/// Short content tag: the leading hex digits of the SHA-256 digest.
pub fn etag(bytes: &[u8]) -> String {
    let mut digest = hex::encode(Sha256::digest(bytes));
    digest.truncate(ETAG_LEN);
    digest
}

/// Gzip at the default level, then standard padded base64.
pub fn encode(bytes: &[u8]) -> io::Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(STANDARD.encode(encoder.finish()?))
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use flate2::read::GzDecoder;
    use rstest::rstest;

    use super::*;

    fn decode(body: &str) -> Vec<u8> {
        let compressed = STANDARD.decode(body).unwrap();
        let mut bytes = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut bytes)
            .unwrap();
        bytes
    }

    #[rstest]
    #[case(b"", "e3b0c44298fc1c14")]
    #[case(b"abc", "ba7816bf8f01cfea")]
    #[case(b"hello", "2cf24dba5fb0a30e")]
    fn etag_is_truncated_sha256(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(etag(bytes), expected);
    }

    #[test]
    fn etag_tracks_every_byte() {
        let original = b"<svg viewBox=\"0 0 10 10\"/>".to_vec();
        let tag = etag(&original);
        assert_eq!(etag(&original), tag);
        for index in 0..original.len() {
            let mut changed = original.clone();
            changed[index] ^= 1;
            assert_ne!(etag(&changed), tag, "flipping byte {index}");
        }
    }

    #[rstest]
    #[case(b"")]
    #[case(b"hello")]
    #[case(&[0u8, 255, 1, 254, 0x1f, 0x8b])]
    #[case(&[b'x'; 4096])]
    fn body_round_trips(#[case] bytes: &[u8]) {
        let body = encode(bytes).unwrap();
        assert_eq!(decode(&body), bytes);
        assert_eq!(encode(bytes).unwrap(), body);
    }

    #[test]
    fn body_is_padded_standard_base64() {
        let body = encode(b"").unwrap();
        assert_eq!(body.len() % 4, 0);
        assert!(body.starts_with("H4sI"));
        assert!(
            body.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"+/=".contains(&b))
        );
    }
}
