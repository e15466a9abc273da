// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The OSC node tree.
//!
//! A [`Node`] is one of four things: an empty root, a typed argument, a
//! message (address plus argument children) or a bundle (time tag plus
//! message/bundle children). Children are owned by value; appending copies
//! nothing the caller still holds.

use std::fmt;

use serde::{Serialize, Serializer};

use super::view::NodeRef;
use crate::core::{check_blob_size, FromOscValue, OscType, OscValue, TimeTag};
use crate::encoding::{OscDecoder, OscEncoder};
use crate::{OscError, Result};

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Freshly constructed, nothing assigned yet
    Empty,
    /// A typed leaf argument
    Argument,
    /// An address with argument children
    Message,
    /// A time tag with message or bundle children
    Bundle,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Empty => write!(f, "empty"),
            NodeKind::Argument => write!(f, "argument"),
            NodeKind::Message => write!(f, "message"),
            NodeKind::Bundle => write!(f, "bundle"),
        }
    }
}

fn serialize_tag<S: Serializer>(tag: &u8, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_char(*tag as char)
}

fn is_untagged(tag: &u8) -> bool {
    *tag == 0
}

fn is_empty_value(value: &OscValue) -> bool {
    matches!(value, OscValue::Empty)
}

/// A node in an OSC tree.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use osctree::Node;
///
/// let mut message = Node::message("/foo/bar/baz");
/// message.push_back(Node::int32(4096)).push_back(Node::string("Hello, OSC"));
///
/// let bytes = message.to_bytes()?;
/// let decoded = Node::from_bytes(&bytes)?;
/// assert_eq!(decoded.address(), Some("/foo/bar/baz"));
/// assert_eq!(decoded.children()[0].typed_value::<i32>()?, 4096);
/// assert_eq!(decoded.children()[1].typed_value::<String>()?, "Hello, OSC");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Serialize)]
pub struct Node {
    kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_tag: Option<TimeTag>,
    #[serde(serialize_with = "serialize_tag", skip_serializing_if = "is_untagged")]
    type_tag: u8,
    #[serde(skip_serializing_if = "is_empty_value")]
    value: OscValue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
    #[serde(skip)]
    attached: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a new, detached tree: the copy itself has no parent, while
/// the copied children still belong to the copy.
impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            address: self.address.clone(),
            time_tag: self.time_tag,
            type_tag: self.type_tag,
            value: self.value.clone(),
            children: self
                .children
                .iter()
                .map(|child| Node {
                    attached: true,
                    ..child.clone()
                })
                .collect(),
            attached: false,
        }
    }
}

/// Equality compares content only. Whether a node sits in some parent's
/// child list does not take part.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.address == other.address
            && self.time_tag == other.time_tag
            && self.type_tag == other.type_tag
            && self.value == other.value
            && self.children == other.children
    }
}

impl Node {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an empty node.
    pub fn new() -> Self {
        Self {
            kind: NodeKind::Empty,
            address: None,
            time_tag: None,
            type_tag: 0,
            value: OscValue::Empty,
            children: Vec::new(),
            attached: false,
        }
    }

    /// Decode a node from an OSC packet with the default decoder settings.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        OscDecoder::default().decode(data)
    }

    /// Create a message node with no arguments.
    pub fn message(address: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Message,
            address: Some(address.into()),
            ..Self::new()
        }
    }

    /// Create a bundle node with no elements.
    pub fn bundle(time_tag: TimeTag) -> Self {
        Self {
            kind: NodeKind::Bundle,
            time_tag: Some(time_tag),
            ..Self::new()
        }
    }

    /// Create a bundle node stamped with the current time.
    pub fn bundle_now() -> Self {
        Self::bundle(TimeTag::now())
    }

    /// Create an argument from any value, using its standard type tag.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::SizeLimitExceeded`] for a blob longer than the
    /// signed 32-bit length field allows.
    pub fn argument(value: OscValue) -> Result<Self> {
        if let OscValue::Blob(data) = &value {
            check_blob_size(data.len())?;
        }
        let tag = value.default_tag();
        Ok(Self::leaf(value, tag))
    }

    /// 32-bit integer argument (`i`).
    pub fn int32(value: i32) -> Self {
        Self::leaf(OscValue::Int32(value), OscType::Int32.tag())
    }

    /// 32-bit float argument (`f`).
    pub fn float32(value: f32) -> Self {
        Self::leaf(OscValue::Float32(value), OscType::Float32.tag())
    }

    /// String argument (`s`).
    pub fn string(value: impl Into<String>) -> Self {
        Self::leaf(OscValue::String(value.into()), OscType::String.tag())
    }

    /// Blob argument (`b`).
    ///
    /// # Errors
    ///
    /// Returns [`OscError::SizeLimitExceeded`] when `data` is 2^31 - 1 bytes
    /// or longer.
    pub fn blob(data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::argument(OscValue::Blob(data.into()))
    }

    /// 64-bit integer argument (`h`).
    pub fn int64(value: i64) -> Self {
        Self::leaf(OscValue::Int64(value), OscType::Int64.tag())
    }

    /// 64-bit float argument (`d`).
    pub fn float64(value: f64) -> Self {
        Self::leaf(OscValue::Float64(value), OscType::Float64.tag())
    }

    /// Boolean argument (`T` or `F`).
    pub fn bool(value: bool) -> Self {
        let tag = if value {
            OscType::True.tag()
        } else {
            OscType::False.tag()
        };
        Self::leaf(OscValue::Bool(value), tag)
    }

    /// Time tag argument (`t`).
    pub fn timestamp(value: TimeTag) -> Self {
        Self::leaf(OscValue::TimeTag(value), OscType::TimeTag.tag())
    }

    /// Nil argument (`N`).
    pub fn nil() -> Self {
        Self::tagged(OscType::Nil.tag())
    }

    /// Infinitum argument (`I`).
    pub fn infinitum() -> Self {
        Self::tagged(OscType::Infinitum.tag())
    }

    /// Argument with a custom type tag and no payload.
    pub fn tagged(type_tag: u8) -> Self {
        Self::leaf(OscValue::Empty, type_tag)
    }

    /// Replace the type tag of an argument.
    ///
    /// A standard tag must still match the stored value when encoding, see
    /// [`OscEncoder::argument`].
    pub fn with_type_tag(mut self, type_tag: u8) -> Self {
        self.type_tag = type_tag;
        self
    }

    /// Builder form of [`push_back`](Self::push_back).
    pub fn with_child(mut self, child: Node) -> Self {
        self.push_back(child);
        self
    }

    pub(crate) fn from_decoded(value: OscValue, type_tag: u8) -> Self {
        Self::leaf(value, type_tag)
    }

    fn leaf(value: OscValue, type_tag: u8) -> Self {
        Self {
            kind: NodeKind::Argument,
            type_tag,
            value,
            ..Self::new()
        }
    }

    // ========================================================================
    // Tree assembly
    // ========================================================================

    /// Append a child and mark it as attached to this node.
    pub fn push_back(&mut self, mut child: Node) -> &mut Self {
        child.attached = true;
        self.children.push(child);
        self
    }

    /// Set the address, turning an empty node into a message.
    pub fn set_address(&mut self, address: impl Into<String>) {
        if self.kind == NodeKind::Empty {
            self.kind = NodeKind::Message;
        }
        self.address = Some(address.into());
    }

    /// Set the time tag, turning an empty node into a bundle.
    pub fn set_time_tag(&mut self, time_tag: TimeTag) {
        if self.kind == NodeKind::Empty {
            self.kind = NodeKind::Bundle;
        }
        self.time_tag = Some(time_tag);
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// What this node represents.
    ///
    /// An empty node that has been given children is classified by shape: a
    /// bundle if any child has children of its own, otherwise a message.
    pub fn kind(&self) -> NodeKind {
        match self.kind {
            NodeKind::Empty if !self.children.is_empty() => {
                if self.children.iter().any(Node::has_children) {
                    NodeKind::Bundle
                } else {
                    NodeKind::Message
                }
            }
            kind => kind,
        }
    }

    /// Check if this node is an argument.
    pub fn is_argument(&self) -> bool {
        self.kind() == NodeKind::Argument
    }

    /// Check if this node is a message.
    pub fn is_message(&self) -> bool {
        self.kind() == NodeKind::Message
    }

    /// Check if this node is a bundle.
    pub fn is_bundle(&self) -> bool {
        self.kind() == NodeKind::Bundle
    }

    /// Check if this node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The children in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Check if this node was appended to another node.
    pub fn has_parent(&self) -> bool {
        self.attached
    }

    /// Borrowed view of this node that can answer `parent()` for its
    /// descendants.
    pub fn view(&self) -> NodeRef<'_> {
        NodeRef::root(self)
    }

    /// The message address, if set.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The bundle time tag, if set.
    pub fn time_tag(&self) -> Option<TimeTag> {
        self.time_tag
    }

    /// The argument type tag, or 0 for non-arguments.
    pub fn type_tag(&self) -> u8 {
        self.type_tag
    }

    /// The type tag string of a message (`,` followed by each child's tag).
    pub fn type_tag_string(&self) -> String {
        std::iter::once(',')
            .chain(self.children.iter().map(|c| c.type_tag as char))
            .collect()
    }

    /// The typed argument value.
    pub fn value(&self) -> &OscValue {
        &self.value
    }

    /// The argument's canonical wire payload, big-endian and unpadded.
    pub fn value_bytes(&self) -> Vec<u8> {
        self.value.payload_bytes()
    }

    /// Read the argument as a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`OscError::TypeMismatch`] when the stored value is not a `T`.
    pub fn typed_value<T: FromOscValue>(&self) -> Result<T> {
        T::from_osc_value(&self.value)
            .ok_or_else(|| OscError::type_mismatch(T::TYPE_NAME, self.type_tag))
    }

    /// Declared length of a blob argument.
    pub fn blob_size(&self) -> Option<usize> {
        self.value.as_blob().map(<[u8]>::len)
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Encode this node to OSC wire bytes.
    ///
    /// The result length is always a multiple of four.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut encoder = OscEncoder::new();
        encoder.node(self)?;
        Ok(encoder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let node = Node::new();
        assert_eq!(node.kind(), NodeKind::Empty);
        assert!(!node.has_children());
        assert!(!node.has_parent());
        assert_eq!(node.address(), None);
        assert_eq!(node.time_tag(), None);
    }

    #[test]
    fn test_typed_constructors_stamp_tags() {
        assert_eq!(Node::int32(1).type_tag(), b'i');
        assert_eq!(Node::float32(1.0).type_tag(), b'f');
        assert_eq!(Node::string("s").type_tag(), b's');
        assert_eq!(Node::blob(vec![1, 2]).unwrap().type_tag(), b'b');
        assert_eq!(Node::int64(1).type_tag(), b'h');
        assert_eq!(Node::float64(1.0).type_tag(), b'd');
        assert_eq!(Node::bool(true).type_tag(), b'T');
        assert_eq!(Node::bool(false).type_tag(), b'F');
        assert_eq!(Node::timestamp(TimeTag::IMMEDIATELY).type_tag(), b't');
        assert_eq!(Node::nil().type_tag(), b'N');
        assert_eq!(Node::infinitum().type_tag(), b'I');
        assert_eq!(Node::tagged(b'X').type_tag(), b'X');
    }

    #[test]
    fn test_type_tag_override() {
        let node = Node::int32(0x00FF00FF).with_type_tag(b'r');
        assert_eq!(node.type_tag(), b'r');
        assert_eq!(node.typed_value::<i32>().unwrap(), 0x00FF00FF);
    }

    #[test]
    fn test_string_value_bytes_have_one_terminator() {
        let node = Node::string("abc");
        assert_eq!(node.value_bytes(), b"abc\0".to_vec());
    }

    #[test]
    fn test_blob_size() {
        let node = Node::blob(vec![0u8; 5]).unwrap();
        assert_eq!(node.blob_size(), Some(5));
        assert_eq!(Node::int32(5).blob_size(), None);
    }

    #[test]
    fn test_argument_uses_default_tag() {
        let node = Node::argument(OscValue::Blob(vec![0; 16])).unwrap();
        assert_eq!(node.type_tag(), b'b');
        let node = Node::argument(OscValue::Bool(false)).unwrap();
        assert_eq!(node.type_tag(), b'F');
    }

    #[test]
    fn test_typed_value_mismatch() {
        let node = Node::string("hello");
        let err = node.typed_value::<i32>().unwrap_err();
        assert_eq!(err, OscError::type_mismatch("i32", b's'));
        assert_eq!(node.typed_value::<String>().unwrap(), "hello");
    }

    #[test]
    fn test_push_back_marks_child_attached() {
        let child = Node::int32(1);
        let mut message = Node::message("/a");
        message.push_back(child.clone());
        assert!(!child.has_parent());
        assert!(message.children()[0].has_parent());
        assert!(!message.has_parent());
    }

    #[test]
    fn test_push_back_chains() {
        let mut message = Node::message("/a");
        message
            .push_back(Node::int32(1))
            .push_back(Node::int32(2))
            .push_back(Node::int32(3));
        assert_eq!(message.children().len(), 3);
        assert_eq!(message.type_tag_string(), ",iii");
    }

    #[test]
    fn test_clone_of_child_is_detached() {
        let message = Node::message("/a").with_child(Node::int32(1));
        let copy = message.children()[0].clone();
        assert!(!copy.has_parent());
        assert_eq!(copy, Node::int32(1));
    }

    #[test]
    fn test_clone_of_tree_keeps_children_attached() {
        let bundle = Node::bundle(TimeTag::IMMEDIATELY)
            .with_child(Node::message("/a").with_child(Node::int32(1)));
        let copy = bundle.clone();
        assert!(!copy.has_parent());
        assert!(copy.children()[0].has_parent());
        assert!(copy.children()[0].children()[0].has_parent());
        assert_eq!(copy, bundle);
    }

    #[test]
    fn test_equality_ignores_attachment() {
        let message = Node::message("/a").with_child(Node::int32(4096));
        assert_eq!(message.children()[0], Node::int32(4096));
        assert_ne!(message.children()[0], Node::int32(4095));
        assert_ne!(Node::int32(1), Node::int32(1).with_type_tag(b'r'));
    }

    #[test]
    fn test_set_address_promotes_empty_node() {
        let mut node = Node::new();
        node.set_address("/x");
        assert!(node.is_message());
        assert_eq!(node.address(), Some("/x"));
    }

    #[test]
    fn test_set_time_tag_promotes_empty_node() {
        let mut node = Node::new();
        node.set_time_tag(TimeTag::new(5, 0));
        assert!(node.is_bundle());
        assert_eq!(node.time_tag(), Some(TimeTag::new(5, 0)));
    }

    #[test]
    fn test_kind_inference_for_empty_root() {
        let mut flat = Node::new();
        flat.push_back(Node::int32(1));
        assert_eq!(flat.kind(), NodeKind::Message);

        let mut nested = Node::new();
        nested.push_back(Node::message("/a").with_child(Node::int32(1)));
        assert_eq!(nested.kind(), NodeKind::Bundle);
    }

    #[test]
    fn test_bundle_of_empty_messages_stays_a_bundle() {
        let bundle = Node::bundle(TimeTag::IMMEDIATELY).with_child(Node::message("/a"));
        assert!(bundle.is_bundle());
    }

    #[test]
    fn test_to_bytes_length_is_aligned() {
        let message = Node::message("/abc")
            .with_child(Node::string("hello"))
            .with_child(Node::blob(vec![1, 2, 3]).unwrap())
            .with_child(Node::bool(true));
        let bytes = message.to_bytes().unwrap();
        assert_eq!(bytes.len() % 4, 0);
    }

    #[test]
    fn test_to_bytes_is_deterministic() {
        let message = Node::message("/a").with_child(Node::float64(0.5));
        assert_eq!(message.to_bytes().unwrap(), message.to_bytes().unwrap());
    }

    #[test]
    fn test_serialize_json() {
        let message = Node::message("/a").with_child(Node::int32(7));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["kind"], "Message");
        assert_eq!(json["address"], "/a");
        assert_eq!(json["children"][0]["type_tag"], "i");
        assert_eq!(json["children"][0]["value"]["Int32"], 7);
        assert!(json.get("time_tag").is_none());
        assert!(json.get("type_tag").is_none());
        assert!(json.get("value").is_none());
    }
}
