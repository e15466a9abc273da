// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - build a message from typed arguments.

use std::path::PathBuf;

use clap::Args;

use crate::common::{parse_argument, Result};
use osctree::Node;

/// Encode a message.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Message address, e.g. /foo/bar
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Arguments as TAG:VALUE (i:42 f:1.5 s:text b:00ff t:now) or T F N I
    #[arg(value_name = "ARG")]
    args: Vec<String>,

    /// Write raw bytes to this file instead of printing hex
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Wrap the message in a bundle stamped with the current time
    #[arg(long)]
    bundle: bool,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let mut message = Node::message(&self.address);
        for arg in &self.args {
            message.push_back(parse_argument(arg)?);
        }

        let packet = if self.bundle {
            Node::bundle_now().with_child(message)
        } else {
            message
        };
        let bytes = packet.to_bytes()?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, &bytes)?;
                eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
            }
            None => println!("{}", hex::encode(&bytes)),
        }

        Ok(())
    }
}
