use std::io::{self, Read};

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Forward-only reader over an itemdb container.
///
/// Tracks the absolute offset so that short reads can be reported precisely. There is no
/// seeking: every byte is consumed exactly once, in stream order.
#[derive(Debug)]
pub struct ByteStream<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ByteStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read exactly `len` bytes. `context` names what is being read, for error messages.
    pub fn read_bytes(&mut self, len: usize, context: &str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = self.inner.by_ref().take(len as u64).read_to_end(&mut buf)?;
        self.offset += read as u64;
        if read < len {
            return Err(Error::TruncatedStream {
                offset: self.offset,
                needed: len - read,
                context: context.to_owned(),
            });
        }
        Ok(buf)
    }

    /// Read a little-endian unsigned integer of `width` bytes (0..=8).
    pub fn read_uint(&mut self, width: usize, context: &str) -> Result<u64> {
        match width {
            0 => Ok(0),
            1..=8 => {
                let mut buf = [0u8; 8];
                self.fill(&mut buf[..width], context)?;
                Ok(LittleEndian::read_uint(&buf[..width], width))
            }
            w => Err(Error::Decode {
                field: context.to_owned(),
                offset: self.offset,
                reason: format!("integer width {w} exceeds 8 bytes"),
            }),
        }
    }

    /// Consume and drop `len` bytes.
    pub fn skip(&mut self, len: usize, context: &str) -> Result<()> {
        let copied = io::copy(&mut self.inner.by_ref().take(len as u64), &mut io::sink())?;
        self.offset += copied;
        let copied = copied as usize;
        if copied < len {
            return Err(Error::TruncatedStream {
                offset: self.offset,
                needed: len - copied,
                context: context.to_owned(),
            });
        }
        Ok(())
    }

    fn fill(&mut self, buf: &mut [u8], context: &str) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.offset += filled as u64;
        if filled < buf.len() {
            return Err(Error::TruncatedStream {
                offset: self.offset,
                needed: buf.len() - filled,
                context: context.to_owned(),
            });
        }
        Ok(())
    }
}
