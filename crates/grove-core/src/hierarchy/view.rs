//! Client-safe projection of a computed hierarchy.
//!
//! # Overview
//!
//! A [`GroupView`] is the only form of a hierarchy handed across the
//! external boundary: it carries display fields and structure, nothing
//! else — no raw referring sets, no inactive data. Inactive groups and
//! their entire subtrees are omitted (not flagged) during projection;
//! siblings are unaffected. An inactive *root* is different: the whole
//! projection fails, since there is nothing presentable to return.
//!
//! # Roles
//!
//! `roles` stays empty unless an access-control collaborator decorates
//! the view after the fact via [`GroupView::attach_roles`], keyed by
//! short id.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::collection::{GroupCollection, HierarchyError};
use super::tree::HierarchyNode;
use crate::error::ErrorCode;
use crate::model::Group;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from projecting a hierarchy into its external view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The group at the top of the projected (sub)tree is inactive.
    ///
    /// During recursion this is caught per child and the subtree is
    /// silently omitted; surfaced from a top-level call it means the
    /// root itself is inactive, which is a hard failure.
    #[error("group '{short_id}' is inactive")]
    Inactive { short_id: String },

    /// No usable hierarchy could be produced for this head at all —
    /// the head record is missing or the build failed. Both look the
    /// same to a caller wanting a view.
    #[error("no hierarchy available under '{head}': {reason}")]
    Unavailable { head: String, reason: String },
}

impl ViewError {
    /// Stable machine-readable code for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Inactive { .. } => ErrorCode::InactiveRoot,
            Self::Unavailable { .. } => ErrorCode::HierarchyUnavailable,
        }
    }
}

impl ViewError {
    fn unavailable(head: &str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            head: head.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<HierarchyError> for ViewError {
    fn from(err: HierarchyError) -> Self {
        let head = match &err {
            HierarchyError::NotInHierarchy { head, .. }
            | HierarchyError::TooDeep { head, .. } => head.clone(),
        };
        Self::Unavailable {
            head,
            reason: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// GroupView
// ---------------------------------------------------------------------------

/// The external, filtered representation of one group in a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub short_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub children: Vec<GroupView>,
}

impl GroupView {
    /// Project a [`HierarchyNode`] tree into a view.
    ///
    /// Children whose group is inactive are dropped together with their
    /// whole subtree; their siblings are unaffected. Any other child
    /// error propagates unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Inactive`] when `node`'s own group is
    /// inactive. At the top level that is the "inactive root" failure.
    pub fn from_node(node: &HierarchyNode) -> Result<Self, ViewError> {
        if !node.group.active {
            return Err(ViewError::Inactive {
                short_id: node.group.short_id.clone(),
            });
        }

        let mut children = Vec::new();
        for child in &node.children {
            match Self::from_node(child) {
                Ok(view) => children.push(view),
                Err(ViewError::Inactive { short_id }) => {
                    debug!(%short_id, "omitting inactive subtree from view");
                }
                Err(other) => return Err(other),
            }
        }

        Ok(Self {
            short_id: node.group.short_id.clone(),
            name: node.group.name.clone(),
            description: node.group.description.clone(),
            roles: Vec::new(),
            children,
        })
    }

    /// Convenience entry point: assemble a collection from a flat record
    /// set, build the tree, and project it in one step.
    ///
    /// Records whose referring set does not contain `head` are skipped
    /// with a warning — this wrapper's contract is "best view over
    /// whatever the persistence query returned", so pre-filter noise is
    /// tolerated rather than fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Unavailable`] when the head record is absent
    /// from `records` or the build fails, and [`ViewError::Inactive`]
    /// when the head group is inactive.
    pub fn from_record_set<I>(head: &str, records: I, max_depth: usize) -> Result<Self, ViewError>
    where
        I: IntoIterator<Item = Group>,
    {
        let mut head_element: Option<Group> = None;
        let mut rest: Vec<Group> = Vec::new();
        for record in records {
            if record.short_id == head && head_element.is_none() {
                head_element = Some(record);
            } else {
                rest.push(record);
            }
        }

        let Some(head_element) = head_element else {
            return Err(ViewError::unavailable(head, "head group not in record set"));
        };

        let mut collection = GroupCollection::new(head_element, max_depth);
        for record in rest {
            if let Err(err) = collection.add_element(record) {
                warn!(%err, "skipping record outside this hierarchy");
            }
        }

        let tree = collection.get_hierarchy()?;
        Self::from_node(&tree)
    }

    /// Merge role annotations into this view, keyed by short id.
    ///
    /// Entries for short ids not present in the view are ignored; views
    /// without an entry keep their roles untouched.
    pub fn attach_roles(&mut self, roles: &HashMap<String, Vec<String>>) {
        if let Some(assigned) = roles.get(&self.short_id) {
            self.roles = assigned.clone();
        }
        for child in &mut self.children {
            child.attach_roles(roles);
        }
    }

    /// Number of groups visible in this view, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }

    /// Find the view node carrying `short_id`, if visible.
    pub fn find(&self, short_id: &str) -> Option<&Self> {
        if self.short_id == short_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(short_id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
