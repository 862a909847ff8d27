//! End-to-end batch tests: encrypt a set of files, verify artifact digests
//! against independently computed values, decrypt, and compare contents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use md5::Md5;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

use arx_batch::{decrypt_files, encrypt_files, DecryptRequest, EncryptRequest};
use arx_core::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use arx_crypto::{SecretKey, StreamNonce};

fn write_test_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}

fn test_key() -> SecretKey {
    SecretKey::from_bytes([0x42u8; KEY_SIZE])
}

fn test_nonce() -> StreamNonce {
    StreamNonce::from_bytes([0x24u8; NONCE_SIZE])
}

fn independent_digests(data: &[u8]) -> (String, String) {
    (
        hex::encode(Md5::digest(data)),
        hex::encode(Sha256::digest(data)),
    )
}

/// Encrypted length: one 16-byte tag per frame, 64 KiB plaintext per frame.
fn expected_encrypted_len(plaintext_len: usize) -> usize {
    let frames = plaintext_len.div_ceil(64 * 1024);
    plaintext_len + frames * TAG_SIZE
}

#[test]
fn three_target_batch_roundtrip() {
    let tmp = TempDir::new().unwrap();

    let small = b"attack at dawn".to_vec();
    let large: Vec<u8> = (0..150_000u32).map(|i| (i % 251) as u8).collect();
    let empty = Vec::new();

    let contents: [(&str, &Vec<u8>); 3] =
        [("small.txt", &small), ("large.bin", &large), ("empty.dat", &empty)];

    let mut targets = BTreeMap::new();
    for (name, content) in &contents {
        let source = write_test_file(tmp.path(), name, content);
        targets.insert(source, tmp.path().join(format!("enc/{name}")));
    }

    let request = EncryptRequest::new(test_key(), test_nonce(), targets.clone());
    let response = encrypt_files(&request).expect("batch encryption should succeed");

    assert_eq!(response.nonce, test_nonce().to_hex());
    assert_eq!(response.encrypted_artifacts.len(), 3);

    // Artifact digests must match digests computed over the destination
    // bytes, and the container adds exactly one tag per frame.
    for (name, content) in &contents {
        let destination = tmp.path().join(format!("enc/{name}"));
        let written = std::fs::read(&destination).unwrap();
        assert_eq!(written.len(), expected_encrypted_len(content.len()));

        let record = &response.encrypted_artifacts[&destination];
        let (md5, sha256) = independent_digests(&written);
        assert_eq!(record.md5, md5);
        assert_eq!(record.sha256, sha256);
    }

    // Decrypt into a third directory and compare to the originals.
    let mut decrypt_targets = BTreeMap::new();
    for (name, _) in &contents {
        decrypt_targets.insert(
            tmp.path().join(format!("enc/{name}")),
            tmp.path().join(format!("dec/{name}")),
        );
    }
    let request = DecryptRequest::new(test_key(), test_nonce(), decrypt_targets);
    let response = decrypt_files(&request).expect("batch decryption should succeed");

    for (name, content) in &contents {
        let destination = tmp.path().join(format!("dec/{name}"));
        let recovered = std::fs::read(&destination).unwrap();
        assert_eq!(&recovered, *content, "content mismatch for {name}");

        let record = &response.decrypted_artifacts[&destination];
        let (md5, sha256) = independent_digests(content);
        assert_eq!(record.md5, md5);
        assert_eq!(record.sha256, sha256);
    }
}

#[test]
fn corrupted_ciphertext_fails_decryption() {
    let tmp = TempDir::new().unwrap();
    let source = write_test_file(tmp.path(), "plain.bin", &[0x7Au8; 5000]);
    let encrypted = tmp.path().join("plain.enc");

    let mut targets = BTreeMap::new();
    targets.insert(source, encrypted.clone());
    encrypt_files(&EncryptRequest::new(test_key(), test_nonce(), targets)).unwrap();

    // Flip one bit in the middle of the ciphertext.
    let mut data = std::fs::read(&encrypted).unwrap();
    let middle = data.len() / 2;
    data[middle] ^= 0x01;
    std::fs::write(&encrypted, &data).unwrap();

    let output = tmp.path().join("plain.out");
    let mut targets = BTreeMap::new();
    targets.insert(encrypted, output.clone());
    let err = decrypt_files(&DecryptRequest::new(test_key(), test_nonce(), targets))
        .expect_err("tampered ciphertext must not decrypt");

    assert!(
        err.chain().any(|cause| matches!(
            cause.downcast_ref::<arx_core::ArxError>(),
            Some(arx_core::ArxError::Framing(_))
        )),
        "expected a framing error, got: {err:#}"
    );
}

#[test]
fn wrong_key_fails_decryption() {
    let tmp = TempDir::new().unwrap();
    let source = write_test_file(tmp.path(), "plain.bin", b"sensitive payload");
    let encrypted = tmp.path().join("plain.enc");

    let mut targets = BTreeMap::new();
    targets.insert(source, encrypted.clone());
    encrypt_files(&EncryptRequest::new(test_key(), test_nonce(), targets)).unwrap();

    let mut targets = BTreeMap::new();
    targets.insert(encrypted, tmp.path().join("plain.out"));
    let wrong_key = SecretKey::from_bytes([0x43u8; KEY_SIZE]);
    assert!(decrypt_files(&DecryptRequest::new(wrong_key, test_nonce(), targets)).is_err());
}

#[test]
fn response_serializes_to_json() {
    let tmp = TempDir::new().unwrap();
    let source = write_test_file(tmp.path(), "doc.txt", b"serialize me");
    let destination = tmp.path().join("doc.enc");

    let mut targets = BTreeMap::new();
    targets.insert(source, destination);
    let response =
        encrypt_files(&EncryptRequest::new(test_key(), test_nonce(), targets)).unwrap();

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"nonce\""));
    assert!(json.contains("\"encrypted_artifacts\""));
    assert!(json.contains("\"md5\""));
    assert!(json.contains("\"sha256\""));
}
