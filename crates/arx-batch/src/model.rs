//! Batch request and response types

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use arx_core::{ArxError, ArxResult, FramingConfig};
use arx_crypto::{DigestSet, SecretKey, StreamNonce};

/// A batch encryption request.
///
/// One key and one nonce cover every target in the batch: each target's
/// stream is sealed under the same {key, nonce} pair, with frame indices
/// restarting at zero per target. Callers must treat the nonce as spent for
/// this key once the request runs; reusing it for a later request with
/// different plaintext reuses keystream.
///
/// `targets` maps source path → destination path. The map keys make
/// sources unique, and the sorted order makes processing deterministic.
pub struct EncryptRequest {
    pub key: SecretKey,
    pub nonce: StreamNonce,
    pub framing: FramingConfig,
    pub targets: BTreeMap<PathBuf, PathBuf>,
}

impl EncryptRequest {
    pub fn new(
        key: SecretKey,
        nonce: StreamNonce,
        targets: BTreeMap<PathBuf, PathBuf>,
    ) -> Self {
        Self {
            key,
            nonce,
            framing: FramingConfig::default(),
            targets,
        }
    }

    /// Checked once per request, before any I/O.
    pub fn validate(&self) -> ArxResult<()> {
        self.framing.validate()?;
        validate_targets(&self.targets)
    }
}

/// A batch decryption request. Key, nonce, and framing must match the
/// values the ciphertext was produced with.
pub struct DecryptRequest {
    pub key: SecretKey,
    pub nonce: StreamNonce,
    pub framing: FramingConfig,
    pub targets: BTreeMap<PathBuf, PathBuf>,
}

impl DecryptRequest {
    pub fn new(
        key: SecretKey,
        nonce: StreamNonce,
        targets: BTreeMap<PathBuf, PathBuf>,
    ) -> Self {
        Self {
            key,
            nonce,
            framing: FramingConfig::default(),
            targets,
        }
    }

    pub fn validate(&self) -> ArxResult<()> {
        self.framing.validate()?;
        validate_targets(&self.targets)
    }
}

fn validate_targets(targets: &BTreeMap<PathBuf, PathBuf>) -> ArxResult<()> {
    if targets.is_empty() {
        return Err(ArxError::Validation("request has no targets".into()));
    }
    Ok(())
}

/// Result of a batch encryption: the nonce used (hex) and one artifact
/// record per destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Hex encoding of the stream nonce, echoed for the caller to store
    /// alongside the ciphertext.
    pub nonce: String,
    /// Destination path → digests of the encrypted bytes written there.
    pub encrypted_artifacts: BTreeMap<PathBuf, DigestSet>,
}

impl EncryptResponse {
    pub fn validate(&self) -> ArxResult<()> {
        validate_artifacts(&self.encrypted_artifacts)
    }
}

/// Result of a batch decryption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// Destination path → digests of the recovered plaintext written there.
    pub decrypted_artifacts: BTreeMap<PathBuf, DigestSet>,
}

impl DecryptResponse {
    pub fn validate(&self) -> ArxResult<()> {
        validate_artifacts(&self.decrypted_artifacts)
    }
}

fn validate_artifacts(artifacts: &BTreeMap<PathBuf, DigestSet>) -> ArxResult<()> {
    if artifacts.is_empty() {
        return Err(ArxError::Validation(
            "response has no artifact records".into(),
        ));
    }
    Ok(())
}
