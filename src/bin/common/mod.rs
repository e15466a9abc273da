// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fmt::Write as _;
use std::io::Read as _;
use std::path::Path;

use osctree::{DecoderConfig, Node, NodeKind, OscDecoder, OscValue, TimeTag};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Parse a command-line argument into an argument node.
///
/// Accepts `T`, `F`, `N` and `I` on their own, or `TAG:VALUE` where TAG is
/// one of `i f s h d b t`. Blobs are given as hex, time tags as a raw
/// 64-bit NTP value or `now`.
pub fn parse_argument(arg: &str) -> CliResult<Node> {
    match arg {
        "T" => return Ok(Node::bool(true)),
        "F" => return Ok(Node::bool(false)),
        "N" => return Ok(Node::nil()),
        "I" => return Ok(Node::infinitum()),
        _ => {}
    }

    let (tag, value) = arg
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Argument {arg:?} must be TAG:VALUE or one of T F N I"))?;

    let node = match tag {
        "i" => Node::int32(
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid int32 {value:?}: {e}"))?,
        ),
        "f" => Node::float32(
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid float32 {value:?}: {e}"))?,
        ),
        "s" => Node::string(value),
        "h" => Node::int64(
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid int64 {value:?}: {e}"))?,
        ),
        "d" => Node::float64(
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid float64 {value:?}: {e}"))?,
        ),
        "b" => Node::blob(
            hex::decode(value).map_err(|e| anyhow::anyhow!("Invalid blob hex {value:?}: {e}"))?,
        )?,
        "t" if value == "now" => Node::timestamp(TimeTag::now()),
        "t" => Node::timestamp(TimeTag::from_bits(
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid time tag {value:?}: {e}"))?,
        )),
        _ => return Err(anyhow::anyhow!("Unknown argument type {tag:?} in {arg:?}")),
    };

    Ok(node)
}

/// Read packet bytes from a hex string, a file or stdin, in that order.
pub fn read_input(file: Option<&Path>, hex: Option<&str>) -> CliResult<Vec<u8>> {
    if let Some(text) = hex {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        return hex::decode(&compact).map_err(|e| anyhow::anyhow!("Invalid hex input: {e}"));
    }

    if let Some(path) = file {
        return std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()));
    }

    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data)?;
    Ok(data)
}

/// Build a decoder from an optional TOML configuration file.
pub fn load_decoder(config: Option<&Path>) -> CliResult<OscDecoder> {
    let config = match config {
        Some(path) => DecoderConfig::load(path)?,
        None => DecoderConfig::default(),
    };
    Ok(OscDecoder::new(config)?)
}

/// Render a node tree with two spaces of indentation per level.
pub fn format_tree(root: &Node) -> String {
    let mut out = String::new();
    for node in root.view().descendants() {
        let indent = "  ".repeat(node.depth());
        let line = match node.kind() {
            NodeKind::Bundle => format!(
                "bundle @ {} ({} elements)",
                node.time_tag().unwrap_or_default(),
                node.node().children().len()
            ),
            NodeKind::Message => format!(
                "message {} {}",
                node.address().unwrap_or_default(),
                node.type_tag_string()
            ),
            NodeKind::Argument => match node.value() {
                OscValue::Blob(data) => format!(
                    "{} <{} bytes> {}",
                    node.type_tag() as char,
                    data.len(),
                    hex::encode(data)
                ),
                value => format!("{} {}", node.type_tag() as char, value),
            },
            NodeKind::Empty => "empty".to_string(),
        };
        let _ = writeln!(out, "{indent}{line}");
    }
    out
}
