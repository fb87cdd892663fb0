//! File encryption/decryption operations
//!
//! Reads a whole file, seals or opens it with a caller-supplied key and
//! nonce, and writes the result. The file contents are exactly the
//! secretbox output: no header, no nonce, no armoring. The caller keeps
//! track of the nonce.

use crate::error::{ErrorCategory, ErrorKind, Result, SealboxError};
use crate::keyread::KeyReader;
use crate::secretbox::Nonce;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Encrypt a file
///
/// Reads plaintext from `input_path`, seals it under `nonce` and the key
/// from `key_reader`, and writes the ciphertext to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    nonce: &Nonce,
    key_reader: &mut dyn KeyReader,
) -> Result<()> {
    let plaintext = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    debug!(path = %input_path.display(), bytes = plaintext.len(), "read plaintext");

    let key = key_reader.read_key()?;
    let ciphertext = key
        .seal(nonce, &plaintext)
        .map_err(|e| e.with_context("encryption failed"))?;
    write_file_atomic(output_path, &ciphertext)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    debug!(path = %output_path.display(), bytes = ciphertext.len(), "wrote ciphertext");

    Ok(())
}

/// Decrypt a file
///
/// Reads ciphertext from `input_path`, opens it under `nonce` and the key
/// from `key_reader`, and writes the plaintext to `output_path`. Nothing is
/// written unless authentication succeeds.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    nonce: &Nonce,
    key_reader: &mut dyn KeyReader,
) -> Result<()> {
    let ciphertext = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    debug!(path = %input_path.display(), bytes = ciphertext.len(), "read ciphertext");

    let key = key_reader.read_key()?;
    let plaintext = key
        .open(nonce, &ciphertext)
        .map_err(|e| e.with_context("failed to decrypt"))?;
    write_file_atomic(output_path, &plaintext)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    debug!(path = %output_path.display(), bytes = plaintext.len(), "wrote plaintext");

    Ok(())
}

/// Write `contents` to `path` via a tempfile in the same directory
///
/// Either the previous file or the complete new file exists afterwards,
/// never a partial one. The file has mode 0o600 on Unix.
fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        SealboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("failed to create tempfile in {}", dir.display()),
            e,
        )
    })?;

    temp_file.write_all(contents).map_err(|e| {
        SealboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to write to tempfile",
            e,
        )
    })?;
    // Flush and fsync() such that the rename later, if it succeeds, will
    // always point to a valid file.
    temp_file.flush().map_err(|e| {
        SealboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to flush tempfile",
            e,
        )
    })?;
    temp_file.as_file().sync_all().map_err(|e| {
        SealboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to sync file prior to rename",
            e,
        )
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| {
                SealboxError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    "failed to set tempfile permissions",
                    e,
                )
            })?;
    }

    temp_file.persist(path).map_err(|e| {
        SealboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

fn read_error(path: &Path, err: io::Error) -> SealboxError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    SealboxError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
