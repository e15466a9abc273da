// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OSC cursor for reading 4-byte aligned, big-endian OSC data.
//!
//! All numeric fields on the OSC wire are big-endian. Strings and blobs are
//! padded with zero bytes to the next multiple of four, measured from the
//! start of the packet (or bundle element) being read.

use byteorder::{BigEndian, ByteOrder};

use crate::core::pad4;
use crate::{OscError, Result};

/// Reason a padded string could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFault {
    /// No null terminator before the end of the buffer
    Unterminated,
    /// Terminator found but the padding runs past the end of the buffer
    Truncated,
    /// A padding byte after the terminator is not zero
    NonZeroPadding,
}

impl StringFault {
    /// Human-readable description used in decode errors.
    pub fn describe(self) -> &'static str {
        match self {
            StringFault::Unterminated => "missing null terminator",
            StringFault::Truncated => "padding runs past end of buffer",
            StringFault::NonZeroPadding => "non-zero padding byte",
        }
    }
}

/// OSC cursor that tracks the read position within one packet.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use osctree::encoding::cursor::OscCursor;
///
/// let data = [0x00, 0x00, 0x10, 0x00, b'h', b'i', 0, 0];
/// let mut cursor = OscCursor::new(&data);
/// assert_eq!(cursor.read_i32()?, 4096);
/// assert_eq!(cursor.read_padded_str(true).unwrap(), b"hi");
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
pub struct OscCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> OscCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current position relative to the data start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Peek at the next byte without advancing the position.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(OscError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Split off a cursor over the next `len` bytes.
    ///
    /// The new cursor reports positions relative to the same buffer start, so
    /// errors inside a bundle element carry absolute offsets. The parent
    /// cursor does not move.
    pub fn sub_cursor(&self, len: usize) -> Result<OscCursor<'a>> {
        if len > self.remaining() {
            return Err(OscError::buffer_too_short(
                len,
                self.remaining(),
                self.offset as u64,
            ));
        }
        Ok(OscCursor {
            data: &self.data[..self.offset + len],
            offset: self.offset,
        })
    }

    /// Read a big-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    /// Read a big-endian i64.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    /// Read a big-endian u64.
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.read_bytes(8)?))
    }

    /// Read a big-endian f32.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.read_bytes(4)?))
    }

    /// Read a big-endian f64.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.read_bytes(8)?))
    }

    /// Read a null-terminated, 4-byte padded string and return its content
    /// without the terminator.
    ///
    /// On failure the cursor does not move. With `strict_padding` every byte
    /// between the terminator and the next 4-byte boundary must be zero.
    pub fn read_padded_str(
        &mut self,
        strict_padding: bool,
    ) -> std::result::Result<&'a [u8], StringFault> {
        let rest = &self.data[self.offset.min(self.data.len())..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(StringFault::Unterminated)?;
        let padded = pad4(len + 1);
        if padded > rest.len() {
            return Err(StringFault::Truncated);
        }
        if strict_padding && rest[len..padded].iter().any(|&b| b != 0) {
            return Err(StringFault::NonZeroPadding);
        }
        self.offset += padded;
        Ok(&rest[..len])
    }

    /// Skip the zero padding that follows `len` payload bytes.
    ///
    /// Returns `false` without moving if the padding is not all zero and
    /// `strict_padding` is set.
    pub fn skip_padding(&mut self, len: usize, strict_padding: bool) -> Result<bool> {
        let padding = pad4(len) - len;
        if padding > self.remaining() {
            return Err(OscError::buffer_too_short(
                padding,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let bytes = &self.data[self.offset..self.offset + padding];
        if strict_padding && bytes.iter().any(|&b| b != 0) {
            return Ok(false);
        }
        self.offset += padding;
        Ok(true)
    }
}
