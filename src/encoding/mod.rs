// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OSC wire format encoding/decoding.
//!
//! This module provides the codec between [`Node`](crate::Node) trees and
//! OSC 1.0 packets:
//! - [`cursor`] - Aligned, big-endian reader over a packet
//! - [`encoder`] - Aligned, big-endian writer and tree encoder
//! - [`decoder`] - Packet to tree decoder
//! - [`config`] - Decoder configuration and TOML loading

pub mod config;
pub mod cursor;
pub mod decoder;
pub mod encoder;

pub use config::{
    DecoderConfig, DecoderConfigBuilder, BUNDLE_DEPTH_CEILING, DEFAULT_MAX_BUNDLE_DEPTH,
};
pub use cursor::{OscCursor, StringFault};
pub use decoder::OscDecoder;
pub use encoder::OscEncoder;

/// The 8-byte marker that starts every bundle.
pub const BUNDLE_MARKER: &[u8; 8] = b"#bundle\0";
