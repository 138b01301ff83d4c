// Sequential little-endian reader with a latched error
//
// Header decoders issue a run of fixed-width reads and check the outcome once.
// The first failure is stored; every later read returns zero without touching
// the underlying reader.

use std::io::{self, Read};

use crate::error::{Error, Result};

/// Byte cursor over any `Read` source.
pub struct ByteCursor<R> {
    inner: R,
    error: Option<io::Error>,
    consumed: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        ByteCursor {
            inner,
            error: None,
            consumed: 0,
        }
    }

    /// Fill `buf` completely or latch the error.
    fn fill(&mut self, buf: &mut [u8]) -> bool {
        if self.has_failed() {
            return false;
        }
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.consumed += buf.len() as u64;
                true
            }
            Err(e) => {
                self.latch(e);
                false
            }
        }
    }

    fn latch(&mut self, e: io::Error) {
        self.error = Some(e);
    }

    /// Read a fixed-size byte array, all zeroes on failure.
    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        if !self.fill(&mut buf) {
            return [0u8; N];
        }
        buf
    }

    pub fn read_u8(&mut self) -> u8 {
        self.read_array::<1>()[0]
    }

    /// Read little-endian 16-bit integer
    pub fn read_u16(&mut self) -> u16 {
        u16::from_le_bytes(self.read_array())
    }

    /// Read little-endian 32-bit integer
    pub fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.read_array())
    }

    /// Read little-endian 64-bit integer
    pub fn read_u64(&mut self) -> u64 {
        u64::from_le_bytes(self.read_array())
    }

    /// Read exactly `len` bytes, empty on failure.
    ///
    /// The buffer grows with the bytes actually delivered, so a corrupt length
    /// prefix cannot force a huge allocation up front.
    pub fn read_bytes(&mut self, len: usize) -> Vec<u8> {
        if self.has_failed() {
            return Vec::new();
        }
        let mut buf = Vec::new();
        match (&mut self.inner).take(len as u64).read_to_end(&mut buf) {
            Ok(n) if n == len => {
                self.consumed += n as u64;
                buf
            }
            Ok(n) => {
                self.consumed += n as u64;
                self.latch(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("expected {} bytes, got {}", len, n),
                ));
                Vec::new()
            }
            Err(e) => {
                self.latch(e);
                Vec::new()
            }
        }
    }

    /// The latched error, if any read has failed.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Number of bytes consumed from the underlying reader.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Surface the latched error as a stream error.
    ///
    /// The error stays latched; `error()` still returns it afterwards.
    pub fn check(&self) -> Result<()> {
        match &self.error {
            Some(e) => Err(Error::Stream(io::Error::new(e.kind(), e.to_string()))),
            None => Ok(()),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
