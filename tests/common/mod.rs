// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use osctree::{Node, TimeTag};

// ============================================================================
// Packet Builders
// ============================================================================

/// The message used throughout the tests: `/foo/bar/baz` with one argument
/// of each numeric, string and blob type.
pub fn sample_message() -> Node {
    Node::message("/foo/bar/baz")
        .with_child(Node::int32(4096))
        .with_child(Node::float32(3.14159))
        .with_child(Node::string("Hello, OSC"))
        .with_child(Node::blob(vec![0xde, 0xad, 0xbe, 0xef, 0x01]).unwrap())
        .with_child(Node::int64(-9_876_543_210))
        .with_child(Node::float64(2.718281828459045))
}

/// A bundle holding `sample_message` and a nested bundle with one message.
pub fn sample_bundle() -> Node {
    Node::bundle(TimeTag::new(3_586_867_200, 0x8000_0000))
        .with_child(sample_message())
        .with_child(
            Node::bundle(TimeTag::IMMEDIATELY)
                .with_child(Node::message("/nested").with_child(Node::bool(true))),
        )
}

/// `depth` bundles nested inside each other around a single message.
pub fn nested_bundles(depth: usize) -> Node {
    let mut node = Node::message("/leaf").with_child(Node::int32(depth as i32));
    for _ in 0..depth {
        node = Node::bundle(TimeTag::IMMEDIATELY).with_child(node);
    }
    node
}

// ============================================================================
// Wire Helpers
// ============================================================================

/// Big-endian i32 at `offset`.
pub fn read_i32_be(data: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Encode a node, asserting the 4-byte alignment every packet must have.
pub fn encode_aligned(node: &Node) -> Vec<u8> {
    let bytes = node.to_bytes().expect("encode failed");
    assert_eq!(bytes.len() % 4, 0, "packet length {} not aligned", bytes.len());
    bytes
}

// ============================================================================
// Temporary Files
// ============================================================================

/// A unique path under the system temp directory. The file is removed when
/// the guard drops.
pub fn temp_file(name: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let path = std::env::temp_dir().join(format!(
        "osctree_test_{}_{}_{}",
        std::process::id(),
        random,
        name
    ));
    (path.clone(), CleanupGuard(path))
}

/// Removes a file on drop.
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
