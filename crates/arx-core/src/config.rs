use serde::{Deserialize, Serialize};

use crate::error::{ArxError, ArxResult};
use crate::TAG_SIZE;

/// Default maximum plaintext bytes per frame (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Framing parameters for the chunked ciphertext container.
///
/// These are wire-format parameters: encoder and decoder must agree on them,
/// and the container carries no header recording which values were used.
/// Decoding a file with a different `chunk_size` than it was produced with
/// fails authentication on the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Maximum plaintext bytes per frame (default: 65536)
    pub chunk_size: usize,
    /// Authentication bytes appended per frame (default: 16, the Poly1305 tag)
    pub overhead: usize,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overhead: TAG_SIZE,
        }
    }
}

impl FramingConfig {
    /// Size of one complete ciphertext frame unit.
    pub fn frame_size(&self) -> usize {
        self.chunk_size + self.overhead
    }

    pub fn validate(&self) -> ArxResult<()> {
        if self.chunk_size == 0 {
            return Err(ArxError::Validation(
                "framing chunk_size must be non-zero".into(),
            ));
        }
        if self.overhead != TAG_SIZE {
            return Err(ArxError::Validation(format!(
                "framing overhead must be {} (Poly1305 tag size), got {}",
                TAG_SIZE, self.overhead
            )));
        }
        Ok(())
    }
}
