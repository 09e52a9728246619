// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal drawable-node tree for `chartframe_charts`.
//!
//! Chart code never talks to a concrete renderer. It builds nested elements through the
//! [`DrawTree`] capability:
//! - **create** an element by name,
//! - **append** it under a parent,
//! - **set** attributes and text content,
//! - **serialize** a subtree to markup.
//!
//! [`SvgDocument`] is the in-memory implementation. It needs no display surface and its output
//! is deterministic: attributes keep insertion order and children keep append order.

mod svg;
mod tree;

pub use svg::{SvgDocument, SvgDocumentProvider, escape_xml};
pub use tree::{CollaboratorUnavailable, DrawTree, DrawTreeProvider, NodeId};
