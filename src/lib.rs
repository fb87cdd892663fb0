//! Sealbox - stateless NaCl secretbox encryption with key and nonce helpers

#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod file_ops;
pub mod keyread;
pub mod secretbox;

pub use error::{ErrorCategory, ErrorKind, Result, SealboxError};
pub use secretbox::{
    KEY_LEN, Key, NONCE_LEN, Nonce, OVERHEAD, convert_key, convert_nonce, decrypt, encrypt,
    random_key, random_key_slice, random_nonce, unconvert_key,
};
