//! Golden test vector validation
//!
//! Every vector must seal to exactly the recorded ciphertext and open back
//! to the recorded plaintext. The first vector is the NaCl
//! `tests/secretbox.c` reference.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use sealbox::{ErrorKind, OVERHEAD, convert_key, convert_nonce, decrypt, encrypt};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GoldenVector {
    key: String,
    nonce: String,
    plaintext: String,
    ciphertext: String,
    comment: String,
}

fn load_golden_vectors() -> Vec<GoldenVector> {
    let json_data = include_str!("../testdata/golden-vectors.json");
    serde_json::from_str(json_data).expect("failed to parse golden vectors")
}

fn decode(field: &str) -> Vec<u8> {
    BASE64_STANDARD.decode(field).expect("failed to decode field")
}

#[test]
fn test_golden_vectors_encrypt() {
    let vectors = load_golden_vectors();
    assert!(!vectors.is_empty(), "No golden vectors were loaded");

    for (i, vector) in vectors.iter().enumerate() {
        let key = convert_key(&decode(&vector.key)).unwrap();
        let nonce = convert_nonce(&decode(&vector.nonce)).unwrap();
        let plaintext = decode(&vector.plaintext);
        let expected = decode(&vector.ciphertext);

        let ciphertext = encrypt(&plaintext, Some(&nonce), Some(&key)).unwrap();

        assert_eq!(
            ciphertext, expected,
            "Vector {}: ciphertext mismatch ({})",
            i, vector.comment
        );
        assert_eq!(ciphertext.len(), plaintext.len() + OVERHEAD);
    }
}

#[test]
fn test_golden_vectors_decrypt() {
    for (i, vector) in load_golden_vectors().iter().enumerate() {
        let key = convert_key(&decode(&vector.key)).unwrap();
        let nonce = convert_nonce(&decode(&vector.nonce)).unwrap();
        let ciphertext = decode(&vector.ciphertext);

        let plaintext = decrypt(&ciphertext, Some(&nonce), Some(&key)).unwrap();

        assert_eq!(
            plaintext,
            decode(&vector.plaintext),
            "Vector {}: plaintext mismatch ({})",
            i,
            vector.comment
        );
    }
}

#[test]
fn test_golden_vectors_reject_tag_tamper() {
    for (i, vector) in load_golden_vectors().iter().enumerate() {
        let key = convert_key(&decode(&vector.key)).unwrap();
        let nonce = convert_nonce(&decode(&vector.nonce)).unwrap();
        let mut ciphertext = decode(&vector.ciphertext);

        ciphertext[0] ^= 0xaa;

        let err = decrypt(&ciphertext, Some(&nonce), Some(&key)).unwrap_err();
        assert!(err.is(ErrorKind::Decrypt), "Vector {}: {}", i, vector.comment);
    }
}
