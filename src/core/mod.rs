// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout osctree.
//!
//! This module provides the foundational types for the library:
//! - [`OscError`] - Error handling for construction, encoding and decoding
//! - [`OscValue`] - Typed argument value representation
//! - [`OscType`] - Standard OSC type tags
//! - [`TimeTag`] - NTP time tags for bundles and `t` arguments

pub mod error;
pub mod time_tag;
pub mod value;

pub use error::{OscError, Result};
pub use time_tag::TimeTag;
pub use value::{FromOscValue, OscType, OscValue};

/// Largest payload length accepted for a blob, the signed 32-bit length
/// field minus the reserved top value.
pub const MAX_BLOB_SIZE: usize = (i32::MAX - 1) as usize;

/// Check that a blob of `len` bytes fits the wire length field.
pub fn check_blob_size(len: usize) -> Result<()> {
    if len > MAX_BLOB_SIZE {
        return Err(OscError::size_limit_exceeded(len, MAX_BLOB_SIZE));
    }
    Ok(())
}

/// Round `len` up to the next multiple of four.
#[inline]
pub const fn pad4(len: usize) -> usize {
    (len + 3) & !3
}
