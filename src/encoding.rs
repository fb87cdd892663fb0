//! Text encoding for keys and nonces
//!
//! Keys and nonces travel through terminals, environment variables and
//! config as standard base64 (with padding). Surrounding whitespace,
//! such as the trailing newline from `echo`, is ignored on input.

use crate::error::{ErrorCategory, ErrorKind, Result, SealboxError};
use crate::secretbox::{self, Key, Nonce};
use base64::{Engine, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

/// Encode a key as base64.
pub fn key_to_base64(key: &Key) -> Zeroizing<String> {
    Zeroizing::new(STANDARD.encode(key.as_bytes()))
}

/// Decode a base64 key, requiring exactly 32 decoded bytes.
pub fn key_from_base64(encoded: &str) -> Result<Key> {
    let bytes = decode(encoded, "key")?;
    secretbox::convert_key(&bytes)
}

/// Encode a nonce as base64.
pub fn nonce_to_base64(nonce: &Nonce) -> String {
    STANDARD.encode(nonce.as_bytes())
}

/// Decode a base64 nonce, requiring exactly 24 decoded bytes.
pub fn nonce_from_base64(encoded: &str) -> Result<Nonce> {
    let bytes = decode(encoded, "nonce")?;
    secretbox::convert_nonce(&bytes)
}

fn decode(encoded: &str, what: &str) -> Result<Zeroizing<Vec<u8>>> {
    STANDARD
        .decode(encoded.trim())
        .map(Zeroizing::new)
        .map_err(|e| {
            SealboxError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::EncodingInvalid,
                format!("{} is not valid base64: {}", what, e),
                e,
            )
        })
}
