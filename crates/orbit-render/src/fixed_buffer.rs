#![forbid(unsafe_code)]

//! Overflow-safe writer over a caller-provided byte buffer.
//!
//! Every append either fits completely or leaves the buffer untouched, so a
//! sequence that does not fit never ends up half-written. Multi-step
//! compositions get the same guarantee through
//! [`FixedBufferWriter::try_append`].
//!
//! ```
//! use orbit_render::FixedBufferWriter;
//!
//! let mut storage = [0u8; 5];
//! let mut w = FixedBufferWriter::new(&mut storage);
//! assert!(w.append_str("Hello"));
//! assert!(!w.append_char('!'));
//! assert_eq!(w.text(), "Hello");
//! ```

use std::fmt::{self, Write as _};
use std::io;

/// Bounded UTF-8 writer over `&mut [u8]`.
#[derive(Debug)]
pub struct FixedBufferWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> FixedBufferWriter<'a> {
    /// Wrap `buf`; its previous contents are ignored.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn written_len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Text written so far.
    pub fn text(&self) -> &str {
        // Only whole UTF-8 sequences are ever accepted.
        std::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Forget everything written.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Rewind to `len` bytes.
    ///
    /// Fails without changing anything when `len` is past the written length
    /// or not on a character boundary.
    pub fn truncate(&mut self, len: usize) -> bool {
        if len > self.len || !self.text().is_char_boundary(len) {
            return false;
        }
        self.len = len;
        true
    }

    pub fn append_char(&mut self, c: char) -> bool {
        let mut tmp = [0u8; 4];
        self.push_bytes(c.encode_utf8(&mut tmp).as_bytes())
    }

    pub fn append_pair(&mut self, a: char, b: char) -> bool {
        if a.len_utf8() + b.len_utf8() > self.remaining() {
            return false;
        }
        self.append_char(a) && self.append_char(b)
    }

    pub fn append_triple(&mut self, a: char, b: char, c: char) -> bool {
        if a.len_utf8() + b.len_utf8() + c.len_utf8() > self.remaining() {
            return false;
        }
        self.append_char(a) && self.append_char(b) && self.append_char(c)
    }

    /// Append `c` `count` times.
    pub fn append_repeat(&mut self, c: char, count: usize) -> bool {
        let needed = c.len_utf8().saturating_mul(count);
        if needed > self.remaining() {
            return false;
        }
        let mut tmp = [0u8; 4];
        let encoded = c.encode_utf8(&mut tmp).as_bytes();
        for _ in 0..count {
            self.buf[self.len..self.len + encoded.len()].copy_from_slice(encoded);
            self.len += encoded.len();
        }
        true
    }

    pub fn append_str(&mut self, s: &str) -> bool {
        self.push_bytes(s.as_bytes())
    }

    /// Append formatted text.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> bool {
        let mark = self.len;
        if self.write_fmt(args).is_err() {
            self.len = mark;
            return false;
        }
        true
    }

    pub fn append_display<T: fmt::Display + ?Sized>(&mut self, value: &T) -> bool {
        self.append_fmt(format_args!("{value}"))
    }

    /// Run a multi-step composition, rolling back if any step fails.
    pub fn try_append<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Self) -> bool,
    {
        let mark = self.len;
        if f(self) {
            true
        } else {
            self.len = mark;
            false
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() > self.remaining() {
            return false;
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        true
    }
}

impl fmt::Write for FixedBufferWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.append_str(s) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

impl io::Write for FixedBufferWriter<'_> {
    /// Writes all of `buf` or nothing.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "fixed buffer is full",
            ));
        }
        let text = std::str::from_utf8(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.push_bytes(text.as_bytes());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
