// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawable-tree capability.

/// Identifies a node inside one [`DrawTree`].
///
/// Ids are only meaningful for the tree that minted them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the arena index for this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tree of named elements with attributes, children and text.
///
/// This is the whole surface the chart layer needs from a rendering backend. Implementations
/// may panic when handed a [`NodeId`] they did not create.
pub trait DrawTree {
    /// Creates a detached element named `name` and returns its id.
    fn create_element(&mut self, name: &str) -> NodeId;

    /// Appends `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Sets (or replaces) an attribute on `node`.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Sets the text content of `node`.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Serializes the subtree rooted at `root` to markup.
    fn serialize(&self, root: NodeId) -> String;
}

/// Creates fresh [`DrawTree`]s, one per render.
pub trait DrawTreeProvider {
    /// The tree type produced by this provider.
    type Tree: DrawTree;

    /// Creates an empty tree.
    fn create(&self) -> Result<Self::Tree, CollaboratorUnavailable>;
}

/// The drawable-tree capability could not be initialized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("drawing surface unavailable: {reason}")]
pub struct CollaboratorUnavailable {
    /// Why the backend could not be created.
    pub reason: String,
}

impl CollaboratorUnavailable {
    /// Creates an error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
