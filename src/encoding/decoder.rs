// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OSC decoder: wire bytes to [`Node`] trees.
//!
//! Decoding is a single forward pass over the buffer:
//!
//! ```text
//! Start -> ReadMarker -> Bundle | Message
//! Message -> ReadAddress -> ReadTypeTags -> ReadArguments* -> Done
//! Bundle  -> ReadTimeTag -> (ReadElementSize -> Message | Bundle)* -> Done
//! ```
//!
//! Arguments follow each other with no extra padding; only strings and blobs
//! carry their own padding.

use tracing::{debug, trace, warn};

use super::cursor::OscCursor;
use super::{DecoderConfig, BUNDLE_MARKER};
use crate::core::{OscType, OscValue, TimeTag};
use crate::tree::Node;
use crate::{OscError, Result};

/// Decoder that builds [`Node`] trees from OSC packets.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use osctree::encoding::{DecoderConfig, OscDecoder};
///
/// let packet = b"/ping\0\0\0,i\0\0\0\0\0\x2a";
/// let decoder = OscDecoder::new(DecoderConfig::default())?;
/// let message = decoder.decode(packet)?;
/// assert_eq!(message.address(), Some("/ping"));
/// assert_eq!(message.children()[0].typed_value::<i32>()?, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OscDecoder {
    config: DecoderConfig,
}

impl OscDecoder {
    /// Create a decoder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::Config`] when the configuration fails
    /// [`DecoderConfig::validate`], e.g. a struct literal with
    /// `max_bundle_depth: 0`.
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one OSC packet (message or bundle).
    pub fn decode(&self, data: &[u8]) -> Result<Node> {
        if data.is_empty() {
            return Err(OscError::buffer_too_short(1, 0, 0));
        }
        trace!(len = data.len(), "decoding OSC packet");
        let mut cursor = OscCursor::new(data);
        self.decode_packet(&mut cursor, 0)
    }

    fn decode_packet(&self, cursor: &mut OscCursor<'_>, depth: usize) -> Result<Node> {
        match cursor.peek() {
            Some(b'#') => self.decode_bundle(cursor, depth + 1),
            _ => self.decode_message(cursor),
        }
    }

    fn decode_bundle(&self, cursor: &mut OscCursor<'_>, depth: usize) -> Result<Node> {
        if depth > self.config.max_bundle_depth {
            return Err(OscError::depth_exceeded(
                depth,
                self.config.max_bundle_depth,
            ));
        }

        let start = cursor.position();
        let marker = cursor
            .read_bytes(BUNDLE_MARKER.len())
            .map_err(|_| OscError::malformed_bundle(start, "truncated bundle marker"))?;
        if marker != BUNDLE_MARKER {
            return Err(OscError::malformed_bundle(
                start,
                "expected '#bundle' marker",
            ));
        }
        let time_tag_pos = cursor.position();
        let time_tag = cursor
            .read_u64()
            .map(TimeTag::from_bits)
            .map_err(|_| OscError::malformed_bundle(time_tag_pos, "missing time tag"))?;
        trace!(depth, %time_tag, "bundle header");

        let mut bundle = Node::bundle(time_tag);
        while !cursor.is_at_end() {
            let element_pos = cursor.position();
            let size = cursor.read_i32().map_err(|_| {
                OscError::malformed_bundle(element_pos, "truncated element size")
            })?;
            if size <= 0 || size % 4 != 0 {
                return Err(OscError::malformed_bundle(
                    element_pos,
                    format!("invalid element size {size}"),
                ));
            }
            let size = size as usize;
            if size > cursor.remaining() {
                return Err(OscError::malformed_bundle(
                    element_pos,
                    format!(
                        "element size {size} exceeds the {} remaining bytes",
                        cursor.remaining()
                    ),
                ));
            }

            let mut element = cursor.sub_cursor(size)?;
            let child = self.decode_packet(&mut element, depth)?;
            cursor.skip(size)?;
            bundle.push_back(child);
        }

        debug!(
            depth,
            elements = bundle.children().len(),
            "decoded OSC bundle"
        );
        Ok(bundle)
    }

    fn decode_message(&self, cursor: &mut OscCursor<'_>) -> Result<Node> {
        let strict = self.config.strict_padding;

        // Address
        let address_pos = cursor.position();
        let raw_address = cursor
            .read_padded_str(strict)
            .map_err(|fault| OscError::malformed_address(address_pos, fault.describe()))?;
        if raw_address.first() != Some(&b'/') {
            return Err(OscError::malformed_address(
                address_pos,
                "address must start with '/'",
            ));
        }
        let address = std::str::from_utf8(raw_address)
            .map_err(|_| OscError::malformed_address(address_pos, "address is not valid UTF-8"))?;
        let mut message = Node::message(address);

        // Type tags
        let tags_pos = cursor.position();
        if cursor.is_at_end() {
            if self.config.allow_missing_type_tags {
                warn!(address, "message without type tag string");
                return Ok(message);
            }
            return Err(OscError::malformed_type_tags(
                tags_pos,
                "missing type tag string",
            ));
        }
        let raw_tags = cursor
            .read_padded_str(strict)
            .map_err(|fault| OscError::malformed_type_tags(tags_pos, fault.describe()))?;
        let tags = match raw_tags.split_first() {
            Some((b',', tags)) => tags,
            _ => {
                return Err(OscError::malformed_type_tags(
                    tags_pos,
                    "type tag string must start with ','",
                ))
            }
        };

        // Arguments
        for &tag in tags {
            let argument = self.decode_argument(cursor, tag)?;
            message.push_back(argument);
        }

        if !cursor.is_at_end() {
            if !self.config.allow_trailing_bytes {
                return Err(OscError::trailing_bytes(
                    cursor.position(),
                    cursor.remaining(),
                ));
            }
            debug!(
                address,
                position = cursor.position(),
                remaining = cursor.remaining(),
                "ignoring trailing bytes after message"
            );
        }

        trace!(address, arguments = tags.len(), "decoded OSC message");
        Ok(message)
    }

    fn decode_argument(&self, cursor: &mut OscCursor<'_>, tag: u8) -> Result<Node> {
        let position = cursor.position();
        let ty = OscType::from_tag(tag).ok_or(OscError::unknown_type_tag(tag, position))?;

        let value = match ty {
            OscType::Int32 => OscValue::Int32(cursor.read_i32()?),
            OscType::Float32 => OscValue::Float32(cursor.read_f32()?),
            OscType::Int64 => OscValue::Int64(cursor.read_i64()?),
            OscType::Float64 => OscValue::Float64(cursor.read_f64()?),
            OscType::TimeTag => OscValue::TimeTag(TimeTag::from_bits(cursor.read_u64()?)),
            OscType::String => {
                let raw = cursor
                    .read_padded_str(self.config.strict_padding)
                    .map_err(|fault| OscError::malformed_argument(tag, position, fault.describe()))?;
                let text = std::str::from_utf8(raw)
                    .map_err(|_| OscError::malformed_argument(tag, position, "invalid UTF-8"))?;
                OscValue::String(text.to_owned())
            }
            OscType::Blob => {
                let len = cursor.read_i32()?;
                if len < 0 {
                    return Err(OscError::malformed_argument(
                        tag,
                        position,
                        format!("negative blob length {len}"),
                    ));
                }
                let len = len as usize;
                let data = cursor.read_bytes(len)?;
                if !cursor.skip_padding(len, self.config.strict_padding)? {
                    return Err(OscError::malformed_argument(
                        tag,
                        position,
                        "non-zero padding byte",
                    ));
                }
                OscValue::Blob(data.to_vec())
            }
            OscType::True => OscValue::Bool(true),
            OscType::False => OscValue::Bool(false),
            OscType::Nil | OscType::Infinitum => OscValue::Empty,
        };

        Ok(Node::from_decoded(value, tag))
    }
}
