//! Record types shared across the hierarchy engine.

pub mod group;

pub use group::Group;
