// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OSC argument value type system.
//!
//! Every argument carries a typed [`OscValue`] next to its one-byte type tag.
//! The value is what the tag describes on the wire; [`OscType`] names the
//! standard tags and knows their payload layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::time_tag::TimeTag;

/// Typed value of an OSC argument.
///
/// Each variant owns its data. `Bool` covers both the `T` and `F` tags, and
/// `Empty` is used for payload-less tags such as `N`, `I` or custom tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OscValue {
    // 32-bit integer (i)
    Int32(i32),

    // 32-bit IEEE 754 float (f)
    Float32(f32),

    // UTF-8 string (s)
    String(String),

    // Opaque binary data (b)
    Blob(Vec<u8>),

    // 64-bit integer (h)
    Int64(i64),

    // 64-bit IEEE 754 float (d)
    Float64(f64),

    // NTP time tag (t)
    TimeTag(TimeTag),

    // True (T) or false (F), no payload
    Bool(bool),

    // No payload (N, I, custom tags)
    Empty,
}

impl OscValue {
    /// The standard type tag for this value.
    pub fn default_tag(&self) -> u8 {
        match self {
            OscValue::Int32(_) => OscType::Int32.tag(),
            OscValue::Float32(_) => OscType::Float32.tag(),
            OscValue::String(_) => OscType::String.tag(),
            OscValue::Blob(_) => OscType::Blob.tag(),
            OscValue::Int64(_) => OscType::Int64.tag(),
            OscValue::Float64(_) => OscType::Float64.tag(),
            OscValue::TimeTag(_) => OscType::TimeTag.tag(),
            OscValue::Bool(true) => OscType::True.tag(),
            OscValue::Bool(false) => OscType::False.tag(),
            OscValue::Empty => OscType::Nil.tag(),
        }
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            OscValue::Int32(_) => "int32",
            OscValue::Float32(_) => "float32",
            OscValue::String(_) => "string",
            OscValue::Blob(_) => "blob",
            OscValue::Int64(_) => "int64",
            OscValue::Float64(_) => "float64",
            OscValue::TimeTag(_) => "timetag",
            OscValue::Bool(_) => "bool",
            OscValue::Empty => "empty",
        }
    }

    /// Canonical payload bytes, big-endian and unpadded.
    ///
    /// Strings include their single null terminator. Blobs return their raw
    /// bytes without the length prefix.
    pub fn payload_bytes(&self) -> Vec<u8> {
        match self {
            OscValue::Int32(v) => v.to_be_bytes().to_vec(),
            OscValue::Float32(v) => v.to_be_bytes().to_vec(),
            OscValue::String(s) => {
                let mut bytes = Vec::with_capacity(s.len() + 1);
                bytes.extend_from_slice(s.as_bytes());
                bytes.push(0);
                bytes
            }
            OscValue::Blob(data) => data.clone(),
            OscValue::Int64(v) => v.to_be_bytes().to_vec(),
            OscValue::Float64(v) => v.to_be_bytes().to_vec(),
            OscValue::TimeTag(t) => t.to_bits().to_be_bytes().to_vec(),
            OscValue::Bool(_) | OscValue::Empty => Vec::new(),
        }
    }

    /// Check if this value carries no payload bytes.
    pub fn is_payloadless(&self) -> bool {
        matches!(self, OscValue::Bool(_) | OscValue::Empty)
    }

    /// Try to read as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            OscValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to read as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OscValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to read as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            OscValue::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to read as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OscValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to read as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OscValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to read as blob bytes.
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            OscValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Try to read as a time tag.
    pub fn as_time_tag(&self) -> Option<TimeTag> {
        match self {
            OscValue::TimeTag(t) => Some(*t),
            _ => None,
        }
    }

    /// Try to read as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OscValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for OscValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscValue::Int32(v) => write!(f, "{v}"),
            OscValue::Float32(v) => write!(f, "{v}"),
            OscValue::String(s) => write!(f, "{s:?}"),
            OscValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
            OscValue::Int64(v) => write!(f, "{v}"),
            OscValue::Float64(v) => write!(f, "{v}"),
            OscValue::TimeTag(t) => write!(f, "{t}"),
            OscValue::Bool(b) => write!(f, "{b}"),
            OscValue::Empty => write!(f, "-"),
        }
    }
}

/// Conversion from a stored [`OscValue`] into a concrete Rust type.
///
/// Used by `Node::typed_value` to give a checked, per-type read of an
/// argument instead of reinterpreting raw bytes.
pub trait FromOscValue: Sized {
    /// Name reported in type mismatch errors.
    const TYPE_NAME: &'static str;

    /// Extract the value, or `None` if the variant does not match.
    fn from_osc_value(value: &OscValue) -> Option<Self>;
}

impl FromOscValue for i32 {
    const TYPE_NAME: &'static str = "i32";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_i32()
    }
}

impl FromOscValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_f32()
    }
}

impl FromOscValue for i64 {
    const TYPE_NAME: &'static str = "i64";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromOscValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromOscValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromOscValue for Vec<u8> {
    const TYPE_NAME: &'static str = "Vec<u8>";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_blob().map(<[u8]>::to_vec)
    }
}

impl FromOscValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromOscValue for TimeTag {
    const TYPE_NAME: &'static str = "TimeTag";

    fn from_osc_value(value: &OscValue) -> Option<Self> {
        value.as_time_tag()
    }
}

/// Standard OSC argument types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OscType {
    /// 32-bit big-endian two's complement integer
    Int32,
    /// 32-bit big-endian IEEE 754 float
    Float32,
    /// Null-terminated, 4-byte padded string
    String,
    /// Length-prefixed, 4-byte padded byte array
    Blob,
    /// 64-bit big-endian two's complement integer
    Int64,
    /// 64-bit big-endian IEEE 754 float
    Float64,
    /// 64-bit NTP time tag
    TimeTag,
    /// True, no payload
    True,
    /// False, no payload
    False,
    /// Nil, no payload
    Nil,
    /// Infinitum (impulse), no payload
    Infinitum,
}

impl OscType {
    /// The ASCII type tag.
    pub const fn tag(self) -> u8 {
        match self {
            OscType::Int32 => b'i',
            OscType::Float32 => b'f',
            OscType::String => b's',
            OscType::Blob => b'b',
            OscType::Int64 => b'h',
            OscType::Float64 => b'd',
            OscType::TimeTag => b't',
            OscType::True => b'T',
            OscType::False => b'F',
            OscType::Nil => b'N',
            OscType::Infinitum => b'I',
        }
    }

    /// Look up a standard type by its tag.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'i' => Some(OscType::Int32),
            b'f' => Some(OscType::Float32),
            b's' => Some(OscType::String),
            b'b' => Some(OscType::Blob),
            b'h' => Some(OscType::Int64),
            b'd' => Some(OscType::Float64),
            b't' => Some(OscType::TimeTag),
            b'T' => Some(OscType::True),
            b'F' => Some(OscType::False),
            b'N' => Some(OscType::Nil),
            b'I' => Some(OscType::Infinitum),
            _ => None,
        }
    }

    /// Payload size in bytes, if fixed.
    pub const fn payload_size(self) -> Option<usize> {
        match self {
            OscType::Int32 | OscType::Float32 => Some(4),
            OscType::Int64 | OscType::Float64 | OscType::TimeTag => Some(8),
            OscType::True | OscType::False | OscType::Nil | OscType::Infinitum => Some(0),
            OscType::String | OscType::Blob => None,
        }
    }

    /// Whether `value` has the wire layout this type tag announces.
    ///
    /// A blob tag takes any value, since every payload can be framed with a
    /// length prefix. `T` and `F` also accept the matching boolean.
    pub fn accepts(self, value: &OscValue) -> bool {
        match (self, value) {
            (OscType::Blob, _) => true,
            (OscType::Int32, OscValue::Int32(_))
            | (OscType::Float32, OscValue::Float32(_))
            | (OscType::String, OscValue::String(_))
            | (OscType::Int64, OscValue::Int64(_))
            | (OscType::Float64, OscValue::Float64(_))
            | (OscType::TimeTag, OscValue::TimeTag(_)) => true,
            (OscType::True, OscValue::Bool(true) | OscValue::Empty)
            | (OscType::False, OscValue::Bool(false) | OscValue::Empty) => true,
            (OscType::Nil | OscType::Infinitum, OscValue::Empty) => true,
            _ => false,
        }
    }
}

impl fmt::Display for OscType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OscType::Int32 => write!(f, "int32"),
            OscType::Float32 => write!(f, "float32"),
            OscType::String => write!(f, "string"),
            OscType::Blob => write!(f, "blob"),
            OscType::Int64 => write!(f, "int64"),
            OscType::Float64 => write!(f, "float64"),
            OscType::TimeTag => write!(f, "timetag"),
            OscType::True => write!(f, "true"),
            OscType::False => write!(f, "false"),
            OscType::Nil => write!(f, "nil"),
            OscType::Infinitum => write!(f, "infinitum"),
        }
    }
}
