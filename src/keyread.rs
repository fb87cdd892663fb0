//! Key reading functionality
//!
//! Keys are read as base64 text (see [`crate::encoding`]) and decoded
//! immediately; the raw text is held in zeroizing buffers throughout.

use crate::encoding;
use crate::error::{ErrorCategory, ErrorKind, Result, SealboxError};
use crate::secretbox::Key;
use std::io::{self, IsTerminal, Read, Write};
use zeroize::Zeroizing;

/// Trait for obtaining a key from various sources
pub trait KeyReader {
    fn read_key(&mut self) -> Result<Key>;
}

/// Returns a fixed key (for tests, and keys given on the command line)
pub struct ConstantKeyReader {
    key: Key,
}

impl ConstantKeyReader {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

impl KeyReader for ConstantKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        Ok(self.key.clone())
    }
}

/// Reads a base64 key from any io::Read source
pub struct ReaderKeyReader {
    reader: Box<dyn Read>,
}

impl ReaderKeyReader {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl KeyReader for ReaderKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        let mut data = Zeroizing::new(String::new());
        self.reader.read_to_string(&mut data).map_err(|e| {
            SealboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::KeyUnavailable,
                format!("error reading key: {}", e),
                e,
            )
        })?;
        encoding::key_from_base64(&data)
    }
}

/// Reads a base64 key from the terminal with no echo
pub struct TerminalKeyReader;

impl TerminalKeyReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalKeyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyReader for TerminalKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        if !io::stdin().is_terminal() {
            return Err(SealboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::KeyUnavailable,
                "cannot read key from terminal - stdin is not a terminal",
            ));
        }

        let mut stderr = io::stderr();
        stderr
            .write_all(b"Key (sealbox, base64): ")
            .and_then(|_| stderr.flush())
            .map_err(|e| {
                SealboxError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    format!("failed to write prompt: {}", e),
                    e,
                )
            })?;

        let text = rpassword::read_password().map(Zeroizing::new).map_err(|e| {
            SealboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::KeyUnavailable,
                format!("failure reading key: {}", e),
                e,
            )
        })?;
        encoding::key_from_base64(&text)
    }
}
