// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # osctree CLI
//!
//! Build, decode and inspect OSC packets from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a message and print it as hex
//! osctree encode /foo/bar/baz i:4096 s:"Hello, OSC"
//!
//! # Wrap the message in a bundle and write raw bytes to a file
//! osctree encode /synth/freq f:440 --bundle --output packet.osc
//!
//! # Print the packet as an indented tree
//! osctree inspect packet.osc
//!
//! # Print the packet as JSON
//! osctree json --hex 2f70696e670000002c000000 --pretty
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{EncodeCmd, InspectCmd, JsonCmd};
use common::Result;

/// osctree - Open Sound Control packet toolkit
///
/// Encode messages from typed arguments and decode packets into a tree.
#[derive(Parser, Clone)]
#[command(name = "osctree")]
#[command(about = "Open Sound Control packet toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Decoder configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Encode a message from an address and typed arguments
    Encode(EncodeCmd),

    /// Decode a packet and print it as a tree
    Inspect(InspectCmd),

    /// Decode a packet and print it as JSON
    Json(JsonCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Encode(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(config),
        Commands::Json(cmd) => cmd.run(config),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
