//! Hierarchy computation over flat group records.
//!
//! This module turns a flat set of group records — each carrying only an
//! unordered set of referring-group ids — into a rooted, layered display
//! tree, and projects that tree into a client-safe view.
//!
//! ## Submodules
//!
//! - [`collection`] — the topology engine: membership validation, the
//!   layering rule, and depth-bounded tree building.
//! - [`tree`] — the output structure: a group, its root-relative path,
//!   and ordered children.
//! - [`view`] — the filtered external projection (inactive subtrees
//!   dropped, optional role annotations).
//!
//! A collection has exactly one root. A group participating in several
//! hierarchies simply appears in several collections, each built over its
//! own copy of the records — there is no shared multi-root graph.

pub mod collection;
pub mod tree;
pub mod view;

pub use collection::{GroupCollection, HierarchyError, HARD_DEPTH_CAP};
pub use tree::HierarchyNode;
pub use view::{GroupView, ViewError};
