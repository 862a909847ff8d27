//! arx-crypto: chunked authenticated stream encryption
//!
//! Architecture: fixed-size framing with XChaCha20-Poly1305
//!
//! Encoded stream format (binary):
//! ```text
//! frame 0: [<=chunk_size bytes: ciphertext][16 bytes: Poly1305 tag]
//! frame 1: [<=chunk_size bytes: ciphertext][16 bytes: Poly1305 tag]
//! ...
//! per-frame nonce = stream nonce with frame_index (u64, big-endian)
//!                   XORed into bytes 16..24; AAD = frame_index
//! ```
//!
//! Frames are concatenated flat: no stream header, no length prefixes, no
//! version marker. Every frame except the last carries exactly `chunk_size`
//! plaintext bytes, so the decoder consumes input in fixed
//! `chunk_size + 16` units. Binding the frame index into the nonce and AAD
//! prevents reordering, duplication, and cross-stream splicing.

pub mod digest;
pub mod frame;
pub mod keys;
pub mod stream;

pub use digest::{DigestSet, DigestWriter};
pub use frame::FrameCodec;
pub use keys::{SecretKey, StreamNonce};
pub use stream::{DecryptWriter, EncryptWriter};

pub use arx_core::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
