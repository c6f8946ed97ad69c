//! The output data structure of a hierarchy computation.
//!
//! A [`HierarchyNode`] holds a group, the chain of ancestor short ids
//! leading to it, and its ordered children. The tree is produced by
//! [`GroupCollection::get_hierarchy`](super::collection::GroupCollection::get_hierarchy)
//! and consumed either directly (diagnostics, internal callers) or by the
//! projection in [`view`](super::view).
//!
//! # Path invariant
//!
//! `path` lists every ancestor's short id from the root downward, so path
//! length equals tree depth (the root's path is empty). A child's path is
//! always the parent's path plus the parent's own short id — both
//! [`HierarchyNode::add_child`] and [`HierarchyNode::children_path`]
//! derive it from that single rule.

#![allow(clippy::must_use_candidate)]

use serde::Serialize;
use serde_json::{Value, json};

use crate::model::Group;

/// One node of a computed hierarchy: a group, its root-relative path, and
/// its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub group: Group,
    pub path: Vec<String>,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Create the root node of a new tree (empty path, no children).
    pub fn new_root(group: Group) -> Self {
        Self {
            group,
            path: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The path a child of this node carries: this node's path plus this
    /// node's own short id.
    ///
    /// The recursive builder asks for this to request the next layer, so
    /// the path rule lives in exactly one place.
    pub fn children_path(&self) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(self.group.short_id.clone());
        path
    }

    /// Attach `group` as a new child and return a mutable reference to it.
    pub fn add_child(&mut self, group: Group) -> &mut Self {
        let child = Self {
            group,
            path: self.children_path(),
            children: Vec::new(),
        };
        self.children.push(child);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    /// Depth of this node (distance from the root).
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Number of nodes in this subtree, including this node.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }

    /// Find the node carrying `short_id` in this subtree, if any.
    pub fn find(&self, short_id: &str) -> Option<&Self> {
        if self.group.short_id == short_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(short_id))
    }

    /// Serialize the tree to a JSON value by a direct structural walk.
    ///
    /// No filtering happens here — inactive groups and all record fields
    /// are emitted as-is. The client-safe, filtered form is the
    /// projection's job, not serialization's.
    pub fn to_value(&self) -> Value {
        json!({
            "group": self.group,
            "path": self.path,
            "children": self.children.iter().map(Self::to_value).collect::<Vec<_>>(),
        })
    }
}
