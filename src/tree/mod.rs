// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The OSC node tree and borrowed views over it.

pub mod node;
pub mod view;

pub use node::{Node, NodeKind};
pub use view::{Descendants, NodeRef};
