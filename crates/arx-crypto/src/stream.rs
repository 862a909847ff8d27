//! Push-style stream adapters over the frame codec
//!
//! The writers accept arbitrarily sized input buffers and own the frame
//! boundaries: an internal buffer accumulates up to one frame, complete
//! frames are transformed and forwarded to the downstream sink
//! synchronously, and `finish` processes the terminal partial frame. Memory
//! stays bounded by one frame regardless of stream length.
//!
//! An empty stream produces empty output on both paths: encoding zero
//! plaintext bytes emits no frames, and decoding zero ciphertext bytes
//! yields zero plaintext bytes.

use std::io::Write;

use arx_core::{ArxError, ArxResult, FramingConfig};

use crate::frame::FrameCodec;

/// Accumulates plaintext and writes sealed frames downstream.
///
/// Call [`EncryptWriter::finish`] after the last push; dropping the writer
/// without finishing loses any buffered partial frame.
pub struct EncryptWriter<W: Write> {
    codec: FrameCodec,
    chunk_size: usize,
    // Plaintext of the currently accumulated frame.
    buf: Vec<u8>,
    next_index: u64,
    inner: W,
}

impl<W: Write> EncryptWriter<W> {
    pub fn new(codec: FrameCodec, framing: &FramingConfig, inner: W) -> Self {
        Self {
            codec,
            chunk_size: framing.chunk_size,
            buf: Vec::with_capacity(framing.chunk_size),
            next_index: 0,
            inner,
        }
    }

    /// Feed plaintext bytes; every completed frame is sealed and written
    /// downstream before this returns.
    pub fn push(&mut self, data: &[u8]) -> ArxResult<()> {
        self.buf.extend_from_slice(data);
        while self.buf.len() >= self.chunk_size {
            self.seal_buffered(self.chunk_size)?;
        }
        Ok(())
    }

    fn seal_buffered(&mut self, len: usize) -> ArxResult<()> {
        let frame = self.codec.seal(self.next_index, &self.buf[..len])?;
        self.inner.write_all(&frame)?;
        self.next_index += 1;
        self.buf.drain(..len);
        Ok(())
    }

    /// Seal the terminal partial frame, flush, and hand back the sink.
    pub fn finish(mut self) -> ArxResult<W> {
        if !self.buf.is_empty() {
            let len = self.buf.len();
            self.seal_buffered(len)?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Accumulates ciphertext, verifies complete frames, and writes the
/// recovered plaintext downstream.
///
/// Fail-closed: the first verification failure poisons the writer. No
/// plaintext is emitted for the failing frame and every later call errors.
pub struct DecryptWriter<W: Write> {
    codec: FrameCodec,
    frame_size: usize,
    overhead: usize,
    // Ciphertext not yet opened.
    buf: Vec<u8>,
    next_index: u64,
    poisoned: bool,
    inner: W,
}

impl<W: Write> DecryptWriter<W> {
    pub fn new(codec: FrameCodec, framing: &FramingConfig, inner: W) -> Self {
        Self {
            codec,
            frame_size: framing.frame_size(),
            overhead: framing.overhead,
            buf: Vec::with_capacity(framing.frame_size()),
            next_index: 0,
            poisoned: false,
            inner,
        }
    }

    /// Feed ciphertext bytes; every complete frame unit is verified and its
    /// plaintext written downstream before this returns.
    pub fn push(&mut self, data: &[u8]) -> ArxResult<()> {
        self.check_poisoned()?;
        self.buf.extend_from_slice(data);
        while self.buf.len() >= self.frame_size {
            self.open_buffered(self.frame_size)?;
        }
        Ok(())
    }

    fn check_poisoned(&self) -> ArxResult<()> {
        if self.poisoned {
            return Err(ArxError::Framing(
                "stream already failed verification".into(),
            ));
        }
        Ok(())
    }

    fn open_buffered(&mut self, len: usize) -> ArxResult<()> {
        let plaintext = match self.codec.open(self.next_index, &self.buf[..len]) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                self.poisoned = true;
                return Err(err);
            }
        };
        self.inner.write_all(&plaintext)?;
        self.next_index += 1;
        self.buf.drain(..len);
        Ok(())
    }

    /// Verify the terminal short frame (if any), flush, and hand back the
    /// sink.
    ///
    /// A trailing unit shorter than the authentication tag means the stream
    /// was truncated mid-frame and is rejected.
    pub fn finish(mut self) -> ArxResult<W> {
        self.check_poisoned()?;
        if !self.buf.is_empty() {
            if self.buf.len() < self.overhead {
                return Err(ArxError::Framing(format!(
                    "truncated stream: {} trailing bytes, expected at least \
                     the {}-byte tag",
                    self.buf.len(),
                    self.overhead
                )));
            }
            let len = self.buf.len();
            self.open_buffered(len)?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}


#[cfg(test)]
mod proptest_suite {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip_arbitrary_streams(
            data in proptest::collection::vec(any::<u8>(), 0..=1024),
            push_size in 1usize..=300,
        ) {
            let encoded = encode_for_proptest(&data, push_size);
            let decoded = decode_for_proptest(&encoded, push_size).unwrap();
            prop_assert_eq!(decoded, data);
        }
    }

    fn encode_for_proptest(data: &[u8], push_size: usize) -> Vec<u8> {
        let framing = FramingConfig {
            chunk_size: 256,
            overhead: arx_core::TAG_SIZE,
        };
        let mut writer = EncryptWriter::new(proptest_codec(), &framing, Vec::new());
        for piece in data.chunks(push_size) {
            writer.push(piece).unwrap();
        }
        writer.finish().unwrap()
    }

    fn decode_for_proptest(data: &[u8], push_size: usize) -> ArxResult<Vec<u8>> {
        let framing = FramingConfig {
            chunk_size: 256,
            overhead: arx_core::TAG_SIZE,
        };
        let mut writer = DecryptWriter::new(proptest_codec(), &framing, Vec::new());
        for piece in data.chunks(push_size) {
            writer.push(piece)?;
        }
        writer.finish()
    }

    fn proptest_codec() -> FrameCodec {
        use crate::keys::{SecretKey, StreamNonce};
        let key = SecretKey::from_bytes([9u8; arx_core::KEY_SIZE]);
        let nonce = StreamNonce::from_bytes([5u8; arx_core::NONCE_SIZE]);
        FrameCodec::new(&key, &nonce)
    }
}
