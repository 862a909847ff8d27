//! Batch engine: drive the stream codec over each target

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use arx_core::ArxError;
use arx_crypto::{DecryptWriter, DigestSet, DigestWriter, EncryptWriter, FrameCodec};

use crate::fs;
use crate::model::{DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse};

/// Encrypt every target in the request, sequentially and in sorted order.
///
/// Returns the first error encountered; destination files fully written by
/// earlier targets remain on disk.
pub fn encrypt_files(request: &EncryptRequest) -> Result<EncryptResponse> {
    request.validate()?;

    let mut artifacts = BTreeMap::new();
    for (source, destination) in &request.targets {
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            "encrypting target"
        );
        let digests = encrypt_target(request, source, destination).with_context(|| {
            format!(
                "could not encrypt `{}` into `{}`",
                source.display(),
                destination.display()
            )
        })?;
        artifacts.insert(destination.clone(), digests);
    }

    let response = EncryptResponse {
        nonce: request.nonce.to_hex(),
        encrypted_artifacts: artifacts,
    };
    response.validate()?;
    info!(
        targets = response.encrypted_artifacts.len(),
        "batch encryption complete"
    );
    Ok(response)
}

/// Decrypt every target in the request, sequentially and in sorted order.
///
/// Fail-fast: a verification failure in any target aborts the request with
/// no plaintext emitted for the failing frame.
pub fn decrypt_files(request: &DecryptRequest) -> Result<DecryptResponse> {
    request.validate()?;

    let mut artifacts = BTreeMap::new();
    for (source, destination) in &request.targets {
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            "decrypting target"
        );
        let digests = decrypt_target(request, source, destination).with_context(|| {
            format!(
                "could not decrypt `{}` into `{}`",
                source.display(),
                destination.display()
            )
        })?;
        artifacts.insert(destination.clone(), digests);
    }

    let response = DecryptResponse {
        decrypted_artifacts: artifacts,
    };
    response.validate()?;
    info!(
        targets = response.decrypted_artifacts.len(),
        "batch decryption complete"
    );
    Ok(response)
}

fn encrypt_target(
    request: &EncryptRequest,
    source: &Path,
    destination: &Path,
) -> Result<DigestSet> {
    let mut reader = fs::open_source(source)?;
    let sink = fs::prepare_destination(destination)?;

    let codec = FrameCodec::new(&request.key, &request.nonce);
    let mut writer = EncryptWriter::new(codec, &request.framing, DigestWriter::new(sink));

    let mut buffer = vec![0u8; request.framing.chunk_size];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(ArxError::Io)
            .with_context(|| format!("could not read from `{}`", source.display()))?;
        if read == 0 {
            break;
        }
        writer.push(&buffer[..read])?;
    }

    let digest_writer = writer.finish()?;
    let (_sink, digests) = digest_writer.finish().map_err(ArxError::Io)?;
    Ok(digests)
}

fn decrypt_target(
    request: &DecryptRequest,
    source: &Path,
    destination: &Path,
) -> Result<DigestSet> {
    let mut reader = fs::open_source(source)?;
    let sink = fs::prepare_destination(destination)?;

    let codec = FrameCodec::new(&request.key, &request.nonce);
    let mut writer = DecryptWriter::new(codec, &request.framing, DigestWriter::new(sink));

    // The ciphertext framing unit is larger than the plaintext chunk.
    let mut buffer = vec![0u8; request.framing.frame_size()];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(ArxError::Io)
            .with_context(|| format!("could not read from `{}`", source.display()))?;
        if read == 0 {
            break;
        }
        writer.push(&buffer[..read])?;
    }

    let digest_writer = writer.finish()?;
    let (_sink, digests) = digest_writer.finish().map_err(ArxError::Io)?;
    Ok(digests)
}
