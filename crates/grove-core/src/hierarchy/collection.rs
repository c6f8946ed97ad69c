//! Group topology engine: layered tree building over a flat member set.
//!
//! # Overview
//!
//! A [`GroupCollection`] owns a working set of group records anchored at one
//! head group and answers "which groups sit directly under path P", building
//! a full [`HierarchyNode`] tree from that. The input is never trusted to be
//! a proper tree or even acyclic: records carry unordered referring sets,
//! may reference groups in other hierarchies, and may form cycles.
//!
//! # Layering policy
//!
//! [`layer_under`] assigns each reachable candidate to the shallowest layer
//! consistent with its referring set, in four stages:
//!
//! 1. Candidates whose referring set contains every entry of the path are
//!    reachable somewhere below it. Of those, a referring set that matches
//!    the path exactly leaves no ambiguity: the candidate is a direct child.
//! 2. Reachable candidates with extra references (a sibling, a deeper
//!    ancestor, or a group outside this hierarchy entirely) are deferred.
//! 3. A deferred candidate referencing one of the direct children from
//!    stage 1 is strictly deeper than this layer; it is dropped here and
//!    surfaces again in a deeper recursive call.
//! 4. Among the leftovers, only the roots remain: a leftover referencing
//!    another leftover hangs below it and is not a peer at this layer.
//!    Mutually-referencing leftovers (reference cycles) eliminate each
//!    other and never enter the tree.
//!
//! An extra reference pointing outside the known path is treated as
//! not-yet-discovered rather than disqualifying, so legitimately
//! cross-attached groups still land in the tree.
//!
//! # Cycle and depth protection
//!
//! There is no explicit cycle detector. Stage 4 keeps genuinely cyclic
//! records out of every layer, and recursion depth is bounded twice: by
//! the configured maximum and by [`HARD_DEPTH_CAP`], so malformed input
//! terminates even when the instance is misconfigured. Hitting the bound
//! aborts the whole build — a truncated tree would misrepresent the real
//! topology, so there is no partial-tree recovery.
//!
//! # Lifecycle
//!
//! One collection per traversal: build it, call
//! [`GroupCollection::get_hierarchy`], discard it. Instances are not
//! shared across threads; concurrent computations each get their own
//! collection over their own record copies (see
//! [`Group::detached`](crate::model::Group::detached)).

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

use std::collections::HashSet;

use tracing::debug;

use super::tree::HierarchyNode;
use crate::error::ErrorCode;
use crate::model::Group;

/// Fixed safety bound on recursion depth, applied on top of the configured
/// maximum so arbitrarily malformed input can never recurse unboundedly.
pub const HARD_DEPTH_CAP: usize = 64;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from membership validation and tree building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// The record's referring set does not contain the collection's head.
    /// Rejected immediately; the collection is unchanged.
    #[error("group '{short_id}' is not part of the hierarchy under '{head}'")]
    NotInHierarchy { short_id: String, head: String },

    /// The recursion bound was reached while building the tree. The whole
    /// build aborts; the recorded topology is over-deep or cyclic.
    #[error(
        "hierarchy under '{head}' reached the maximum depth of {max_depth} at '{short_id}' \
         (over-deep chain or reference cycle)"
    )]
    TooDeep {
        head: String,
        short_id: String,
        max_depth: usize,
    },
}

impl HierarchyError {
    /// Stable machine-readable code for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotInHierarchy { .. } => ErrorCode::NotInHierarchy,
            Self::TooDeep { .. } => ErrorCode::TooDeep,
        }
    }
}

// ---------------------------------------------------------------------------
// GroupCollection
// ---------------------------------------------------------------------------

/// A transient computation context: the head group, the working set of
/// candidate members, and the configured depth bound.
///
/// Members are kept in insertion order, and every tree-building step
/// iterates them in that order — two builds over the same collection
/// produce identical trees.
#[derive(Debug, Clone)]
pub struct GroupCollection {
    head: String,
    members: Vec<Group>,
    max_depth: usize,
}

impl GroupCollection {
    /// Create a collection rooted at `root` with the given depth bound.
    ///
    /// `max_depth` counts tree levels including the root; see
    /// [`crate::config::HierarchyConfig`].
    pub fn new(root: Group, max_depth: usize) -> Self {
        Self {
            head: root.short_id.clone(),
            members: vec![root],
            max_depth,
        }
    }

    /// Short id of the head group.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Full record of the head group.
    pub fn head_element(&self) -> &Group {
        &self.members[0]
    }

    /// Number of records in the working set, root included.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Accept a candidate member into the working set.
    ///
    /// Callers are expected to pre-filter records to the hierarchy under
    /// this collection's head; this check is the engine refusing to
    /// silently absorb unrelated records anyway.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::NotInHierarchy`] when the record's
    /// referring set does not contain the head. The collection is left
    /// unchanged.
    pub fn add_element(&mut self, group: Group) -> Result<(), HierarchyError> {
        if !group.refers_to(&self.head) {
            return Err(HierarchyError::NotInHierarchy {
                short_id: group.short_id,
                head: self.head.clone(),
            });
        }
        self.members.push(group);
        Ok(())
    }

    /// Every member whose referring set contains `short_id`, regardless of
    /// depth — a flat "is this group anywhere below that node" query.
    ///
    /// The recursive builder does not use this; it exists for tests and
    /// introspection.
    pub fn get_under(&self, short_id: &str) -> Vec<&Group> {
        self.members
            .iter()
            .filter(|group| group.refers_to(short_id))
            .collect()
    }

    /// The members that belong directly under the node at the end of
    /// `path`, per the layering policy.
    ///
    /// `path` is the short-id chain from the head down to and including
    /// the current node. The head record itself is never a candidate.
    pub fn next_level(&self, path: &[String]) -> Vec<&Group> {
        let candidates: Vec<&Group> = self.members.iter().skip(1).collect();
        layer_under(path, &candidates)
    }

    /// Build the full tree from the head.
    ///
    /// The recursion bound is the configured maximum clamped to
    /// [`HARD_DEPTH_CAP`]. Each group is placed at most once: the first
    /// branch (in member insertion order) that can claim a multi-parent
    /// group wins, and later branches no longer see it.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::TooDeep`] when a node would sit at the
    /// recursion bound; the in-progress tree is discarded.
    pub fn get_hierarchy(&self) -> Result<HierarchyNode, HierarchyError> {
        let bound = self.max_depth.min(HARD_DEPTH_CAP);
        let mut root = HierarchyNode::new_root(self.head_element().clone());
        let mut placed: HashSet<String> = HashSet::new();
        placed.insert(self.head.clone());

        self.build_level(&mut root, &mut placed, 0, bound)?;
        debug!(
            head = %self.head,
            nodes = root.size(),
            members = self.members.len(),
            "hierarchy built"
        );
        Ok(root)
    }

    /// Attach the layer under `node`, then recurse into each child.
    ///
    /// `placed` carries the short ids already claimed anywhere in the
    /// tree; the whole layer is marked placed before any recursion so a
    /// subtree cannot re-claim one of its siblings.
    fn build_level(
        &self,
        node: &mut HierarchyNode,
        placed: &mut HashSet<String>,
        depth: usize,
        max_depth: usize,
    ) -> Result<(), HierarchyError> {
        if depth >= max_depth {
            return Err(HierarchyError::TooDeep {
                head: self.head.clone(),
                short_id: node.group.short_id.clone(),
                max_depth,
            });
        }

        let path = node.children_path();
        let candidates: Vec<&Group> = self
            .members
            .iter()
            .filter(|group| !placed.contains(&group.short_id))
            .collect();
        let layer: Vec<Group> = layer_under(&path, &candidates)
            .into_iter()
            .cloned()
            .collect();

        for group in &layer {
            placed.insert(group.short_id.clone());
        }
        for group in layer {
            let child = node.add_child(group);
            self.build_level(child, placed, depth + 1, max_depth)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layering
// ---------------------------------------------------------------------------

/// Pure layering rule: which of `candidates` belong directly under the
/// node at the end of `path`.
///
/// Stateless over its inputs — the recursive builder threads the shrinking
/// candidate set through, and tests exercise the stages in isolation.
/// Result order: direct children first, then surviving leftovers, each in
/// candidate order.
pub fn layer_under<'a>(path: &[String], candidates: &[&'a Group]) -> Vec<&'a Group> {
    // Stage 1/2: reachability, then direct vs deferred.
    let mut direct: Vec<&Group> = Vec::new();
    let mut deferred: Vec<&Group> = Vec::new();
    for &group in candidates {
        if !path.iter().all(|ancestor| group.refers_to(ancestor)) {
            continue; // not reachable anywhere under this path
        }
        if group.referring_groups.len() == path.len() {
            // References exactly the known path: unambiguous direct child.
            direct.push(group);
        } else {
            deferred.push(group);
        }
    }

    // Stage 3: a deferred candidate hanging under one of this layer's
    // direct children belongs to a deeper layer.
    let direct_ids: HashSet<&str> = direct.iter().map(|g| g.short_id.as_str()).collect();
    let mut residue: Vec<&Group> = Vec::new();
    for group in deferred {
        if group
            .referring_groups
            .iter()
            .any(|r| direct_ids.contains(r.as_str()))
        {
            debug!(short_id = %group.short_id, "deferred below a direct child");
            continue;
        }
        residue.push(group);
    }

    // Stage 4: keep only the roots of the residue. A leftover referencing
    // another leftover (or itself) hangs below it; members of a reference
    // cycle all reference each other here and drop out together.
    let residue_ids: HashSet<&str> = residue.iter().map(|g| g.short_id.as_str()).collect();
    let survivors: Vec<&Group> = residue
        .into_iter()
        .filter(|group| {
            let hangs_below = group
                .referring_groups
                .iter()
                .any(|r| residue_ids.contains(r.as_str()));
            if hangs_below {
                debug!(short_id = %group.short_id, "dropped from layer: not a root of the residue");
            }
            !hangs_below
        })
        .collect();

    direct.into_iter().chain(survivors).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
