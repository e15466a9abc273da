// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OSC encoder for writing OSC packets.
//!
//! The encoder has two layers: primitive writers that keep every field
//! big-endian and 4-byte aligned, and [`OscEncoder::node`] which walks a
//! [`Node`] tree and emits a message or bundle.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::BUNDLE_MARKER;
use crate::core::{check_blob_size, pad4, OscType, OscValue};
use crate::tree::{Node, NodeKind};
use crate::{OscError, Result};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// OSC encoder for writing OSC-encoded data.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use osctree::encoding::encoder::OscEncoder;
///
/// let mut encoder = OscEncoder::new();
/// encoder.padded_str(b"/ping")?.padded_str(b",i")?.int32(1)?;
/// let data = encoder.finish();
/// assert_eq!(data.len(), 16);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OscEncoder {
    /// Output buffer
    buffer: Vec<u8>,
}

impl Default for OscEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OscEncoder {
    /// Create a new, empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new encoder with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Get the current size of the encoded data.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Write a big-endian i32.
    pub fn int32(&mut self, value: i32) -> Result<&mut Self> {
        self.buffer.write_i32::<BigEndian>(value)?;
        Ok(self)
    }

    /// Write a big-endian u32.
    pub fn uint32(&mut self, value: u32) -> Result<&mut Self> {
        self.buffer.write_u32::<BigEndian>(value)?;
        Ok(self)
    }

    /// Write a big-endian i64.
    pub fn int64(&mut self, value: i64) -> Result<&mut Self> {
        self.buffer.write_i64::<BigEndian>(value)?;
        Ok(self)
    }

    /// Write a big-endian u64.
    pub fn uint64(&mut self, value: u64) -> Result<&mut Self> {
        self.buffer.write_u64::<BigEndian>(value)?;
        Ok(self)
    }

    /// Write a big-endian f32.
    pub fn float32(&mut self, value: f32) -> Result<&mut Self> {
        self.buffer.write_f32::<BigEndian>(value)?;
        Ok(self)
    }

    /// Write a big-endian f64.
    pub fn float64(&mut self, value: f64) -> Result<&mut Self> {
        self.buffer.write_f64::<BigEndian>(value)?;
        Ok(self)
    }

    /// Write raw bytes followed by zero padding to the next 4-byte boundary.
    pub fn padded_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.buffer.extend_from_slice(bytes);
        self.buffer.resize(self.buffer.len() + pad4(bytes.len()) - bytes.len(), 0);
        Ok(self)
    }

    /// Write a string, its null terminator, and zero padding.
    pub fn padded_str(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.buffer.extend_from_slice(bytes);
        let padded = pad4(bytes.len() + 1);
        self.buffer.resize(self.buffer.len() + padded - bytes.len(), 0);
        Ok(self)
    }

    /// Write a blob: signed 32-bit length, payload, zero padding.
    pub fn blob(&mut self, data: &[u8]) -> Result<&mut Self> {
        check_blob_size(data.len())?;
        self.int32(data.len() as i32)?;
        self.padded_bytes(data)
    }

    /// Encode a node tree.
    ///
    /// Arguments encode as their padded payload, messages as address, type
    /// tag string and arguments, bundles as marker, time tag and
    /// length-prefixed elements. An empty node writes nothing.
    pub fn node(&mut self, node: &Node) -> Result<&mut Self> {
        match node.kind() {
            NodeKind::Empty => Ok(self),
            NodeKind::Argument => {
                if node.has_children() {
                    return Err(OscError::invalid_element(
                        "an argument node cannot have children",
                    ));
                }
                self.argument(node.value(), node.type_tag())
            }
            NodeKind::Message => self.message(node),
            NodeKind::Bundle => self.bundle(node),
        }
    }

    /// Encode a single argument payload.
    ///
    /// A `b` tag always gets the length prefix; every other tag writes the
    /// canonical payload bytes as they are. A standard tag must match the
    /// layout of the value it carries, otherwise the packet would not decode
    /// back to the same arguments. Non-standard tags are written as given.
    pub fn argument(&mut self, value: &OscValue, type_tag: u8) -> Result<&mut Self> {
        let position = self.size();
        if let Some(ty) = OscType::from_tag(type_tag) {
            if !ty.accepts(value) {
                return Err(OscError::invalid_element(format!(
                    "type tag '{}' ({ty}) cannot carry a {} value",
                    type_tag.escape_ascii(),
                    value.type_name()
                )));
            }
        }
        if let OscValue::String(s) = value {
            if s.contains('\0') {
                return Err(OscError::malformed_argument(
                    type_tag,
                    position,
                    "string contains an interior null byte",
                ));
            }
        }
        let payload = value.payload_bytes();
        if type_tag == OscType::Blob.tag() {
            self.blob(&payload)
        } else {
            self.padded_bytes(&payload)
        }
    }

    fn message(&mut self, node: &Node) -> Result<&mut Self> {
        let address = node.address().unwrap_or_default();
        if !address.starts_with('/') {
            return Err(OscError::malformed_address(
                self.size(),
                format!("address {address:?} must start with '/'"),
            ));
        }
        if address.contains('\0') {
            return Err(OscError::malformed_address(
                self.size(),
                "address contains an interior null byte",
            ));
        }
        self.padded_str(address.as_bytes())?;

        let mut tags = Vec::with_capacity(node.children().len() + 1);
        tags.push(b',');
        for child in node.children() {
            if child.kind() != NodeKind::Argument {
                return Err(OscError::invalid_element(format!(
                    "message {address} contains a {} element, only arguments are allowed",
                    child.kind()
                )));
            }
            tags.push(child.type_tag());
        }
        self.padded_str(&tags)?;

        for child in node.children() {
            self.node(child)?;
        }
        Ok(self)
    }

    fn bundle(&mut self, node: &Node) -> Result<&mut Self> {
        let time_tag = node.time_tag().unwrap_or_default();
        self.buffer.extend_from_slice(BUNDLE_MARKER);
        self.uint64(time_tag.to_bits())?;

        for child in node.children() {
            match child.kind() {
                NodeKind::Argument => {
                    return Err(OscError::invalid_element(
                        "bundle elements must be messages or bundles, found an argument",
                    ))
                }
                NodeKind::Empty => {
                    return Err(OscError::invalid_element(
                        "bundle elements must not be empty",
                    ))
                }
                NodeKind::Message | NodeKind::Bundle => {}
            }

            // Reserve the size field and patch it once the element is written.
            let size_pos = self.size();
            self.int32(0)?;
            self.node(child)?;
            let len = self.size() - size_pos - 4;
            if len > i32::MAX as usize {
                return Err(OscError::size_limit_exceeded(len, i32::MAX as usize));
            }
            BigEndian::write_i32(&mut self.buffer[size_pos..size_pos + 4], len as i32);
        }
        Ok(self)
    }
}
