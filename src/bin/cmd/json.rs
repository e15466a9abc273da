// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON command - print a decoded packet as JSON.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::common::{load_decoder, read_input, Result};

/// Decode a packet and print it as JSON.
#[derive(Args, Clone, Debug)]
pub struct JsonCmd {
    /// Packet file (reads stdin when neither FILE nor --hex is given)
    #[arg(value_name = "FILE", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Packet bytes as a hex string
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

impl JsonCmd {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let decoder = load_decoder(config)?;
        let data = read_input(self.input.as_deref(), self.hex.as_deref())?;
        let node = decoder.decode(&data)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&node)?
        } else {
            serde_json::to_string(&node)?
        };
        println!("{json}");
        Ok(())
    }
}
