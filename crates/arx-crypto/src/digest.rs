//! Content digest recorder
//!
//! Wraps a destination sink and updates MD5 and SHA-256 over every byte the
//! sink accepts. Digests are only available from [`DigestWriter::finish`],
//! which consumes the writer, so a partial mid-stream digest cannot be
//! observed.

use std::io::{self, Write};

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex-encoded content digests of one written stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestSet {
    pub md5: String,
    pub sha256: String,
}

/// Passes writes through to the inner sink while recording content digests.
pub struct DigestWriter<W> {
    md5: Md5,
    sha256: Sha256,
    inner: W,
}

impl<W> DigestWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            md5: Md5::new(),
            sha256: Sha256::new(),
            inner,
        }
    }
}

impl<W: Write> DigestWriter<W> {
    /// Flush the sink and render the digests of everything written.
    pub fn finish(mut self) -> io::Result<(W, DigestSet)> {
        self.inner.flush()?;
        let digests = DigestSet {
            md5: hex::encode(self.md5.finalize()),
            sha256: hex::encode(self.sha256.finalize()),
        };
        Ok((self.inner, digests))
    }
}

impl<W: Write> Write for DigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = self.inner.write(buf)?;
        self.md5.update(&buf[..len]);
        self.sha256.update(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
