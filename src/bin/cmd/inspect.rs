// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - print a decoded packet as an indented tree.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::common::{format_tree, load_decoder, read_input, Result};

/// Decode a packet and print its tree.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Packet file (reads stdin when neither FILE nor --hex is given)
    #[arg(value_name = "FILE", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Packet bytes as a hex string
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,
}

impl InspectCmd {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let decoder = load_decoder(config)?;
        let data = read_input(self.input.as_deref(), self.hex.as_deref())?;
        let node = decoder.decode(&data)?;

        println!("{} bytes", data.len());
        print!("{}", format_tree(&node));
        Ok(())
    }
}
