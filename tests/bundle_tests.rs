// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bundle framing, nesting and time tag tests.

mod common;

use common::{encode_aligned, nested_bundles, read_i32_be, sample_bundle};
use osctree::encoding::BUNDLE_DEPTH_CEILING;
use osctree::{DecoderConfig, Node, NodeKind, OscDecoder, OscError, TimeTag};

#[test]
fn test_bundle_header_layout() {
    let bundle = Node::bundle(TimeTag::new(1, 2)).with_child(Node::message("/a"));
    let bytes = encode_aligned(&bundle);

    assert_eq!(&bytes[..8], b"#bundle\0");
    assert_eq!(&bytes[8..16], &[0, 0, 0, 1, 0, 0, 0, 2]);
    // element size, then "/a\0\0" ",\0\0\0"
    assert_eq!(read_i32_be(&bytes, 16), 8);
    assert_eq!(&bytes[20..], b"/a\0\0,\0\0\0");
}

#[test]
fn test_element_sizes_match_elements() {
    let bundle = sample_bundle();
    let bytes = encode_aligned(&bundle);

    let mut offset = 16;
    for child in bundle.children() {
        let size = read_i32_be(&bytes, offset) as usize;
        assert_eq!(size, child.to_bytes().unwrap().len());
        offset += 4 + size;
    }
    assert_eq!(offset, bytes.len());
}

#[test]
fn test_empty_bundle() {
    let bytes = encode_aligned(&Node::bundle(TimeTag::IMMEDIATELY));
    assert_eq!(bytes.len(), 16);

    let decoded = Node::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.kind(), NodeKind::Bundle);
    assert!(!decoded.has_children());
    assert_eq!(decoded.time_tag(), Some(TimeTag::IMMEDIATELY));
}

#[test]
fn test_bundle_of_empty_messages_stays_bundle() {
    let bundle = Node::bundle(TimeTag::IMMEDIATELY)
        .with_child(Node::message("/a"))
        .with_child(Node::message("/b"));
    let decoded = Node::from_bytes(&encode_aligned(&bundle)).unwrap();
    assert!(decoded.is_bundle());
    assert!(decoded.children().iter().all(Node::is_message));
}

#[test]
fn test_nested_bundles_round_trip() {
    let tree = nested_bundles(8);
    let decoded = Node::from_bytes(&encode_aligned(&tree)).unwrap();
    assert_eq!(decoded, tree);

    let leaf = decoded
        .view()
        .descendants()
        .find(|n| n.is_message())
        .unwrap();
    assert_eq!(leaf.depth(), 8);
    assert_eq!(leaf.address(), Some("/leaf"));
}

#[test]
fn test_depth_limit() {
    let bytes = encode_aligned(&nested_bundles(9));
    assert_eq!(
        Node::from_bytes(&bytes).unwrap_err(),
        OscError::depth_exceeded(9, 8)
    );

    let config = DecoderConfig::builder().max_bundle_depth(16).build().unwrap();
    assert!(OscDecoder::new(config).unwrap().decode(&bytes).is_ok());

    let config = DecoderConfig::builder().max_bundle_depth(1).build().unwrap();
    let err = OscDecoder::new(config)
        .unwrap()
        .decode(&encode_aligned(&nested_bundles(2)))
        .unwrap_err();
    assert_eq!(err, OscError::depth_exceeded(2, 1));
}

#[test]
fn test_depth_limit_cannot_be_lifted_past_ceiling() {
    let config = DecoderConfig {
        max_bundle_depth: BUNDLE_DEPTH_CEILING + 1,
        ..DecoderConfig::default()
    };
    assert!(matches!(
        OscDecoder::new(config),
        Err(OscError::Config { .. })
    ));

    let config = DecoderConfig::builder()
        .max_bundle_depth(BUNDLE_DEPTH_CEILING)
        .build()
        .unwrap();
    let bytes = encode_aligned(&nested_bundles(BUNDLE_DEPTH_CEILING + 1));
    assert_eq!(
        OscDecoder::new(config).unwrap().decode(&bytes).unwrap_err(),
        OscError::depth_exceeded(BUNDLE_DEPTH_CEILING + 1, BUNDLE_DEPTH_CEILING)
    );
}

#[test]
fn test_bad_marker() {
    let mut bytes = encode_aligned(&Node::bundle(TimeTag::IMMEDIATELY));
    bytes[6] = b'X';
    assert!(matches!(
        Node::from_bytes(&bytes),
        Err(OscError::MalformedBundle { position: 0, .. })
    ));
}

#[test]
fn test_missing_time_tag() {
    assert!(matches!(
        Node::from_bytes(b"#bundle\0"),
        Err(OscError::MalformedBundle { position: 8, .. })
    ));
}

#[test]
fn test_unaligned_element_size() {
    let bundle = Node::bundle(TimeTag::IMMEDIATELY).with_child(Node::message("/a"));
    let mut bytes = encode_aligned(&bundle);
    bytes[19] = 6;
    assert!(matches!(
        Node::from_bytes(&bytes),
        Err(OscError::MalformedBundle { position: 16, .. })
    ));
}

#[test]
fn test_element_size_overrun() {
    let bundle = Node::bundle(TimeTag::IMMEDIATELY).with_child(Node::message("/a"));
    let mut bytes = encode_aligned(&bundle);
    bytes[19] = 12;
    assert!(matches!(
        Node::from_bytes(&bytes),
        Err(OscError::MalformedBundle { position: 16, .. })
    ));
}

#[test]
fn test_errors_inside_elements_report_packet_offsets() {
    let bundle = Node::bundle(TimeTag::IMMEDIATELY)
        .with_child(Node::message("/a").with_child(Node::int32(1)));
    let mut bytes = encode_aligned(&bundle);
    // "/a\0\0" at 20, ",i\0\0" at 24, tag 'i' at 25
    bytes[25] = b'z';
    assert_eq!(
        Node::from_bytes(&bytes).unwrap_err(),
        OscError::unknown_type_tag(b'z', 28)
    );
}

#[test]
fn test_argument_cannot_be_bundle_element() {
    let bundle = Node::bundle(TimeTag::IMMEDIATELY).with_child(Node::int32(1));
    assert!(matches!(
        bundle.to_bytes(),
        Err(OscError::InvalidElement { .. })
    ));
}

#[test]
fn test_bundle_time_tag_to_datetime() {
    let now = TimeTag::now();
    let decoded = Node::from_bytes(&encode_aligned(&Node::bundle(now))).unwrap();
    let tag = decoded.time_tag().unwrap();
    assert_eq!(tag, now);
    assert!(tag.to_datetime().is_some());
}

#[test]
fn test_empty_node_promoted_by_time_tag() {
    let mut node = Node::new();
    node.set_time_tag(TimeTag::IMMEDIATELY);
    node.push_back(Node::message("/a"));
    assert_eq!(node.kind(), NodeKind::Bundle);
    assert!(Node::from_bytes(&encode_aligned(&node)).unwrap().is_bundle());
}
