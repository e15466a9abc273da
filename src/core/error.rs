// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for osctree.
//!
//! Provides error types for every stage of OSC handling:
//! - Argument construction (size limits)
//! - Wire decoding (addresses, type tags, arguments, bundles)
//! - Tree encoding (structural validation)
//! - Typed value access and decoder configuration

use std::fmt;

/// Render a type tag byte for messages and log fields.
fn tag_str(tag: u8) -> String {
    std::ascii::escape_default(tag).to_string()
}

/// Errors that can occur while building, encoding or decoding OSC trees.
#[derive(Debug, Clone, PartialEq)]
pub enum OscError {
    /// Payload length not representable in the signed 32-bit length field
    SizeLimitExceeded {
        /// Requested size in bytes
        size: usize,
        /// Largest accepted size
        limit: usize,
    },

    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Address string is missing, unterminated, badly padded or not rooted at `/`
    MalformedAddress {
        /// Offset of the address in the buffer
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Type tag string is missing, unterminated, badly padded or lacks the leading `,`
    MalformedTypeTagString {
        /// Offset of the type tag string in the buffer
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Argument payload could not be read
    MalformedArgument {
        /// Type tag of the argument
        tag: u8,
        /// Offset of the argument in the buffer
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Bundle framing is invalid
    MalformedBundle {
        /// Offset in the buffer
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Type tag with no known payload layout
    UnknownTypeTag {
        /// The offending tag
        tag: u8,
        /// Offset of the argument the tag describes
        position: usize,
    },

    /// Typed read requested for a type the node does not hold
    TypeMismatch {
        /// Name of the requested Rust type
        requested: &'static str,
        /// Type tag actually stored
        type_tag: u8,
    },

    /// Tree shape cannot be expressed on the wire
    InvalidElement {
        /// What was wrong
        reason: String,
    },

    /// Bundle nesting deeper than the configured limit
    DepthExceeded {
        /// Depth that was reached
        depth: usize,
        /// Configured limit
        limit: usize,
    },

    /// Unconsumed bytes after the last argument of a message
    TrailingBytes {
        /// Offset of the first unconsumed byte
        position: usize,
        /// Number of unconsumed bytes
        remaining: usize,
    },

    /// Decoder configuration could not be loaded
    Config {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl OscError {
    /// Create a size limit error.
    pub fn size_limit_exceeded(size: usize, limit: usize) -> Self {
        OscError::SizeLimitExceeded { size, limit }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        OscError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a malformed address error.
    pub fn malformed_address(position: usize, reason: impl Into<String>) -> Self {
        OscError::MalformedAddress {
            position,
            reason: reason.into(),
        }
    }

    /// Create a malformed type tag string error.
    pub fn malformed_type_tags(position: usize, reason: impl Into<String>) -> Self {
        OscError::MalformedTypeTagString {
            position,
            reason: reason.into(),
        }
    }

    /// Create a malformed argument error.
    pub fn malformed_argument(tag: u8, position: usize, reason: impl Into<String>) -> Self {
        OscError::MalformedArgument {
            tag,
            position,
            reason: reason.into(),
        }
    }

    /// Create a malformed bundle error.
    pub fn malformed_bundle(position: usize, reason: impl Into<String>) -> Self {
        OscError::MalformedBundle {
            position,
            reason: reason.into(),
        }
    }

    /// Create an unknown type tag error.
    pub fn unknown_type_tag(tag: u8, position: usize) -> Self {
        OscError::UnknownTypeTag { tag, position }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(requested: &'static str, type_tag: u8) -> Self {
        OscError::TypeMismatch {
            requested,
            type_tag,
        }
    }

    /// Create an invalid element error.
    pub fn invalid_element(reason: impl Into<String>) -> Self {
        OscError::InvalidElement {
            reason: reason.into(),
        }
    }

    /// Create a depth exceeded error.
    pub fn depth_exceeded(depth: usize, limit: usize) -> Self {
        OscError::DepthExceeded { depth, limit }
    }

    /// Create a trailing bytes error.
    pub fn trailing_bytes(position: usize, remaining: usize) -> Self {
        OscError::TrailingBytes {
            position,
            remaining,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        OscError::Config {
            message: message.into(),
        }
    }

    /// Whether this error was raised while reading wire data.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            OscError::BufferTooShort { .. }
                | OscError::MalformedAddress { .. }
                | OscError::MalformedTypeTagString { .. }
                | OscError::MalformedArgument { .. }
                | OscError::MalformedBundle { .. }
                | OscError::UnknownTypeTag { .. }
                | OscError::DepthExceeded { .. }
                | OscError::TrailingBytes { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            OscError::SizeLimitExceeded { size, limit } => {
                vec![("size", size.to_string()), ("limit", limit.to_string())]
            }
            OscError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            OscError::MalformedAddress { position, reason }
            | OscError::MalformedTypeTagString { position, reason }
            | OscError::MalformedBundle { position, reason } => vec![
                ("position", position.to_string()),
                ("reason", reason.clone()),
            ],
            OscError::MalformedArgument {
                tag,
                position,
                reason,
            } => vec![
                ("tag", tag_str(*tag)),
                ("position", position.to_string()),
                ("reason", reason.clone()),
            ],
            OscError::UnknownTypeTag { tag, position } => {
                vec![("tag", tag_str(*tag)), ("position", position.to_string())]
            }
            OscError::TypeMismatch {
                requested,
                type_tag,
            } => vec![
                ("requested", requested.to_string()),
                ("tag", tag_str(*type_tag)),
            ],
            OscError::InvalidElement { reason } => vec![("reason", reason.clone())],
            OscError::DepthExceeded { depth, limit } => {
                vec![("depth", depth.to_string()), ("limit", limit.to_string())]
            }
            OscError::TrailingBytes {
                position,
                remaining,
            } => vec![
                ("position", position.to_string()),
                ("remaining", remaining.to_string()),
            ],
            OscError::Config { message } => vec![("message", message.clone())],
            OscError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscError::SizeLimitExceeded { size, limit } => write!(
                f,
                "Size limit exceeded: {size} bytes requested, at most {limit} bytes allowed"
            ),
            OscError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            OscError::MalformedAddress { position, reason } => {
                write!(f, "Malformed address at position {position}: {reason}")
            }
            OscError::MalformedTypeTagString { position, reason } => {
                write!(
                    f,
                    "Malformed type tag string at position {position}: {reason}"
                )
            }
            OscError::MalformedArgument {
                tag,
                position,
                reason,
            } => write!(
                f,
                "Malformed '{}' argument at position {position}: {reason}",
                tag_str(*tag)
            ),
            OscError::MalformedBundle { position, reason } => {
                write!(f, "Malformed bundle at position {position}: {reason}")
            }
            OscError::UnknownTypeTag { tag, position } => write!(
                f,
                "Unknown type tag '{}' for argument at position {position}",
                tag_str(*tag)
            ),
            OscError::TypeMismatch {
                requested,
                type_tag,
            } => write!(
                f,
                "Type mismatch: requested {requested}, but value has type tag '{}'",
                tag_str(*type_tag)
            ),
            OscError::InvalidElement { reason } => write!(f, "Invalid element: {reason}"),
            OscError::DepthExceeded { depth, limit } => {
                write!(f, "Bundle nesting depth {depth} exceeds limit of {limit}")
            }
            OscError::TrailingBytes {
                position,
                remaining,
            } => write!(
                f,
                "{remaining} trailing bytes after last argument at position {position}"
            ),
            OscError::Config { message } => write!(f, "Configuration error: {message}"),
            OscError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for OscError {}

/// The encoder only writes into a `Vec<u8>`; any I/O failure there carries
/// no packet position, so it is reported as [`OscError::Other`].
impl From<std::io::Error> for OscError {
    fn from(err: std::io::Error) -> Self {
        OscError::Other(err.to_string())
    }
}

/// Result type for osctree operations.
pub type Result<T> = std::result::Result<T, OscError>;
