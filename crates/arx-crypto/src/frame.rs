//! Per-frame XChaCha20-Poly1305 sealing and opening
//!
//! Sealed frame format (binary):
//! ```text
//! [N bytes: ciphertext][16 bytes: Poly1305 tag]
//! nonce = stream_nonce XOR (frame_index as u64 BE, into bytes 16..24)
//! AAD = frame_index (8 bytes, big-endian)
//! ```
//!
//! The frame index participates in both the derived nonce and the AAD, so a
//! frame only authenticates at the position it was sealed for. Indices are
//! assigned 0, 1, 2, ... by the stream layer and never repeat within a
//! stream, which keeps every {key, nonce, index} sealing context unique for
//! streams below 2^64 frames.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};

use arx_core::{ArxError, ArxResult, NONCE_SIZE, TAG_SIZE};

use crate::keys::{SecretKey, StreamNonce};

/// Seals and opens individual frames of one stream.
///
/// Pure transform: no I/O, no frame-boundary policy. The stream adapters in
/// [`crate::stream`] own chunking and index assignment.
pub struct FrameCodec {
    cipher: XChaCha20Poly1305,
    stream_nonce: [u8; NONCE_SIZE],
}

impl FrameCodec {
    pub fn new(key: &SecretKey, nonce: &StreamNonce) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(key.as_bytes().into()),
            stream_nonce: *nonce.as_bytes(),
        }
    }

    /// Seal one frame at the given index.
    ///
    /// Returns `[ciphertext][16-byte tag]`, exactly `plaintext.len() + 16`
    /// bytes.
    pub fn seal(&self, index: u64, plaintext: &[u8]) -> ArxResult<Vec<u8>> {
        let nonce = derive_frame_nonce(&self.stream_nonce, index);
        let aad = index.to_be_bytes();

        self.cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: &aad,
                },
            )
            .map_err(|_| ArxError::Framing(format!("could not seal frame {index}")))
    }

    /// Verify and open one frame at the given index.
    ///
    /// Fail-closed: on any verification failure no plaintext is returned.
    pub fn open(&self, index: u64, frame: &[u8]) -> ArxResult<Vec<u8>> {
        if frame.len() < TAG_SIZE {
            return Err(ArxError::Framing(format!(
                "frame {index} is too short: {} bytes (minimum {TAG_SIZE})",
                frame.len()
            )));
        }

        let nonce = derive_frame_nonce(&self.stream_nonce, index);
        let aad = index.to_be_bytes();

        self.cipher
            .decrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: frame,
                    aad: &aad,
                },
            )
            .map_err(|_| {
                ArxError::Framing(format!(
                    "authentication failed for frame {index}: wrong key/nonce, \
                     corrupted data, or a frame out of position"
                ))
            })
    }
}

/// Derive the per-frame nonce: XOR the big-endian index into the last 8
/// bytes of the stream nonce.
fn derive_frame_nonce(base: &[u8; NONCE_SIZE], index: u64) -> [u8; NONCE_SIZE] {
    let mut nonce = *base;
    let idx = index.to_be_bytes();
    for (n, b) in nonce[NONCE_SIZE - 8..].iter_mut().zip(idx) {
        *n ^= b;
    }
    nonce
}
