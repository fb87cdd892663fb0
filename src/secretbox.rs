//! Authenticated encryption using NaCl secretbox (XSalsa20Poly1305)
//!
//! Stateless wrappers around `crypto_secretbox` plus conversion between
//! byte buffers and the fixed-size [`Key`] and [`Nonce`] types.
//!
//! The ciphertext is the NaCl combined format, with no framing:
//! - tag: 16 bytes (Poly1305)
//! - encrypted payload: same length as the plaintext
//!
//! Output is byte-for-byte compatible with libsodium's
//! `crypto_secretbox_easy` and Go's `nacl/secretbox.Seal`.

use crate::error::{ErrorCategory, ErrorKind, Result, SealboxError};
use crypto_secretbox::XSalsa20Poly1305;
use crypto_secretbox::aead::{Aead, KeyInit};
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of a key in bytes
pub const KEY_LEN: usize = 32;

/// Length of a nonce in bytes
pub const NONCE_LEN: usize = 24;

/// Number of bytes a sealed box adds to its plaintext (the Poly1305 tag)
pub const OVERHEAD: usize = 16;

const DECRYPT_FAILED: &str =
    "error decrypting ciphertext: corrupt input, tampered-with data, wrong key or wrong nonce";

/// A 256-bit secretbox key.
///
/// The bytes are wiped when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Seal `plaintext` under this key and `nonce`.
    ///
    /// Returns tag(16) + encrypted payload.
    pub fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = XSalsa20Poly1305::new(crypto_secretbox::Key::from_slice(&self.0));
        cipher
            .encrypt(crypto_secretbox::Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| {
                SealboxError::with_kind(
                    ErrorCategory::Internal,
                    ErrorKind::SecretboxFailure,
                    format!("encryption failed: {}", e),
                )
            })
    }

    /// Authenticate and open a sealed box produced by [`Key::seal`].
    ///
    /// No plaintext is returned unless the tag verifies.
    pub fn open(&self, nonce: &Nonce, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() {
            return Err(SealboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::DecryptEmpty,
                "error decrypting empty ciphertext",
            ));
        }

        let cipher = XSalsa20Poly1305::new(crypto_secretbox::Key::from_slice(&self.0));
        cipher
            .decrypt(crypto_secretbox::Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|_| {
                SealboxError::with_kind(ErrorCategory::User, ErrorKind::Decrypt, DECRYPT_FAILED)
            })
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key([REDACTED])")
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = SealboxError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        convert_key(bytes)
    }
}

/// A 192-bit secretbox nonce. Public, but must never repeat under one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = SealboxError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        convert_nonce(bytes)
    }
}

fn nil_nonce() -> SealboxError {
    SealboxError::with_kind(ErrorCategory::User, ErrorKind::NilNonce, "nil nonce")
}

fn nil_key() -> SealboxError {
    SealboxError::with_kind(ErrorCategory::User, ErrorKind::NilKey, "nil key")
}

/// Encrypt `plaintext` under `nonce` and `key`.
///
/// The nonce is checked for absence before the key.
pub fn encrypt(plaintext: &[u8], nonce: Option<&Nonce>, key: Option<&Key>) -> Result<Vec<u8>> {
    let nonce = nonce.ok_or_else(nil_nonce)?;
    let key = key.ok_or_else(nil_key)?;
    key.seal(nonce, plaintext)
}

/// Decrypt and authenticate `ciphertext` under `nonce` and `key`.
///
/// A zero-length ciphertext fails with [`ErrorKind::DecryptEmpty`]; every
/// other failure is [`ErrorKind::Decrypt`] and says nothing about the cause.
pub fn decrypt(ciphertext: &[u8], nonce: Option<&Nonce>, key: Option<&Key>) -> Result<Vec<u8>> {
    let nonce = nonce.ok_or_else(nil_nonce)?;
    let key = key.ok_or_else(nil_key)?;
    key.open(nonce, ciphertext)
}

/// Copy a 32-byte buffer into a [`Key`].
pub fn convert_key(bytes: &[u8]) -> Result<Key> {
    let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
        SealboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::InvalidKey,
            format!(
                "invalid key; must be of length {}, has length {}",
                KEY_LEN,
                bytes.len()
            ),
        )
    })?;
    Ok(Key(bytes))
}

/// Raw bytes of `key`, in a buffer that is wiped on drop.
pub fn unconvert_key(key: Option<&Key>) -> Result<Zeroizing<Vec<u8>>> {
    let key = key.ok_or_else(nil_key)?;
    Ok(Zeroizing::new(key.0.to_vec()))
}

/// Copy a 24-byte buffer into a [`Nonce`].
pub fn convert_nonce(bytes: &[u8]) -> Result<Nonce> {
    let bytes: [u8; NONCE_LEN] = bytes.try_into().map_err(|_| {
        SealboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::InvalidNonce,
            format!(
                "invalid nonce; must be of length {}, has length {}",
                NONCE_LEN,
                bytes.len()
            ),
        )
    })?;
    Ok(Nonce(bytes))
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(buf).map_err(|e| {
        SealboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::RandomSource,
            format!("failed to read from the OS random source: {}", e),
            e,
        )
    })
}

/// Generate a nonce from the OS random source.
pub fn random_nonce() -> Result<Nonce> {
    let mut nonce = Nonce([0u8; NONCE_LEN]);
    fill_random(&mut nonce.0)?;
    Ok(nonce)
}

/// Generate a key from the OS random source.
pub fn random_key() -> Result<Key> {
    let mut key = Key([0u8; KEY_LEN]);
    fill_random(&mut key.0)?;
    Ok(key)
}

/// Generate a key and return its raw bytes.
pub fn random_key_slice() -> Result<Zeroizing<Vec<u8>>> {
    let key = random_key()?;
    unconvert_key(Some(&key))
}
