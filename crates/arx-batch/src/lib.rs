//! arx-batch: batch at-rest file encryption
//!
//! Drives the chunked stream codec from `arx-crypto` over a set of
//! source → destination file pairs:
//!
//! ```text
//! validate request
//!   → per target (deterministic order):
//!       open source → prepare destination
//!       → EncryptWriter/DecryptWriter → DigestWriter → destination
//!   → assemble response (destination → {md5, sha256})
//! ```
//!
//! Processing is single-threaded and strictly sequential. The first error
//! aborts the request; destination files fully written by earlier targets
//! stay on disk.

pub mod engine;
pub mod fs;
pub mod model;

pub use engine::{decrypt_files, encrypt_files};
pub use model::{DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse};
