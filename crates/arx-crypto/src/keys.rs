//! Stream key and nonce newtypes

use zeroize::Zeroize;

use arx_core::{ArxError, ArxResult, KEY_SIZE, NONCE_SIZE};

/// A 256-bit symmetric stream key. Zeroized on drop.
#[derive(Clone)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a key from a caller-supplied slice, enforcing the 32-byte size.
    pub fn from_slice(bytes: &[u8]) -> ArxResult<Self> {
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            ArxError::Validation(format!(
                "key must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A 192-bit per-stream nonce.
///
/// Not secret, but it must be unique per {key, stream}: sealing two
/// different streams under the same key and nonce reuses keystream.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct StreamNonce {
    bytes: [u8; NONCE_SIZE],
}

impl StreamNonce {
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a nonce from a caller-supplied slice, enforcing the 24-byte size.
    pub fn from_slice(bytes: &[u8]) -> ArxResult<Self> {
        let bytes: [u8; NONCE_SIZE] = bytes.try_into().map_err(|_| {
            ArxError::Validation(format!(
                "nonce must be {} bytes, got {}",
                NONCE_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl std::fmt::Debug for StreamNonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamNonce")
            .field("bytes", &self.to_hex())
            .finish()
    }
}
