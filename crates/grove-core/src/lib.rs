//! grove-core: deterministic group-hierarchy engine.
//!
//! Given a flat collection of group records, each carrying an unordered
//! set of referring-group ids, grove computes a rooted display hierarchy
//! that is consistent, loop-safe, and deterministic — without ever
//! trusting the input to be a proper tree or even acyclic.
//!
//! The pieces, leaf first:
//!
//! - [`model::Group`] — the record: identity, display fields, and the
//!   referring set that encodes candidate parentage.
//! - [`hierarchy::GroupCollection`] — the topology engine: one root per
//!   instance, layered placement, cycle containment, bounded depth.
//! - [`hierarchy::HierarchyNode`] — the computed tree.
//! - [`hierarchy::GroupView`] — the filtered projection handed across
//!   the external boundary.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums per module; `anyhow::Result` at the
//!   config/IO edge.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`).

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod model;

pub use error::ErrorCode;
pub use hierarchy::{GroupCollection, GroupView, HierarchyNode};
pub use model::Group;
