// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # osctree
//!
//! Open Sound Control (OSC 1.0) packets as an in-memory tree.
//!
//! A packet is modelled as a [`Node`]: bundles contain messages and nested
//! bundles, messages contain typed arguments. The same tree is produced by
//! decoding and consumed by encoding, so a packet can be built by hand,
//! serialized, parsed back and inspected with the same API.
//!
//! ## Architecture
//!
//! - `core/` - Errors, typed values, type tags and NTP time tags
//! - `encoding/` - Aligned big-endian cursor and encoder, the packet decoder
//!   and its configuration
//! - `tree/` - The node tree and borrowed views with parent navigation
//!
//! ## Example: Building and Parsing a Message
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use osctree::{Node, TimeTag};
//!
//! let mut bundle = Node::bundle(TimeTag::IMMEDIATELY);
//! bundle.push_back(
//!     Node::message("/synth/freq")
//!         .with_child(Node::float32(440.0))
//!         .with_child(Node::string("sine")),
//! );
//!
//! let bytes = bundle.to_bytes()?;
//! assert_eq!(bytes.len() % 4, 0);
//!
//! let parsed = Node::from_bytes(&bytes)?;
//! let message = &parsed.children()[0];
//! assert_eq!(message.address(), Some("/synth/freq"));
//! assert_eq!(message.type_tag_string(), ",fs");
//! assert_eq!(message.children()[0].typed_value::<f32>()?, 440.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Tolerant Decoding
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use osctree::{DecoderConfig, OscDecoder};
//!
//! let config = DecoderConfig::builder()
//!     .allow_missing_type_tags(true)
//!     .build()?;
//! let node = OscDecoder::new(config)?.decode(b"/old\0\0\0\0")?;
//! assert_eq!(node.address(), Some("/old"));
//! assert!(!node.has_children());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{FromOscValue, OscError, OscType, OscValue, Result, TimeTag};

// Wire format encoding/decoding
pub mod encoding;

pub use encoding::{DecoderConfig, OscDecoder, OscEncoder};

// Node tree
pub mod tree;

pub use tree::{Node, NodeKind, NodeRef};
