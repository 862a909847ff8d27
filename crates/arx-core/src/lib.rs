pub mod config;
pub mod error;

pub use config::{FramingConfig, DEFAULT_CHUNK_SIZE};
pub use error::{ArxError, ArxResult};

/// Size of a stream key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an XChaCha20-Poly1305 stream nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;
