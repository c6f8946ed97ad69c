use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A group record: identity, display fields, and the set of referring
/// groups that encodes candidate parentage.
///
/// The record itself carries no topology validation — a record is always
/// valid in isolation. Whether its referring set describes a consistent
/// position only emerges relative to a particular traversal root, and
/// deciding that is the job of
/// [`GroupCollection`](crate::hierarchy::collection::GroupCollection).
///
/// # Identity
///
/// - `id` is the stable opaque identity assigned by the persistence layer.
/// - `short_id` is the short reference-grade identifier used inside
///   referring sets and tree paths (kept separate from `id` so wire
///   payloads stay compact).
///
/// # Referring groups
///
/// `referring_groups` holds the short ids of groups this group is attached
/// under. An empty set means root-level with no recorded parent. A group
/// created under a parent inherits the parent's full chain plus the parent
/// itself, so every member of a hierarchy also references that hierarchy's
/// head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub active: bool,
    pub referring_groups: HashSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            id: String::new(),
            short_id: String::new(),
            name: String::new(),
            description: None,
            language: None,
            active: true,
            referring_groups: HashSet::new(),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }
}

impl Group {
    /// Create an active group with the given identity and display name.
    #[must_use]
    pub fn new(id: impl Into<String>, short_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short_id: short_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Return `true` if this group's referring set contains `short_id`.
    #[must_use]
    pub fn refers_to(&self, short_id: &str) -> bool {
        self.referring_groups.contains(short_id)
    }

    /// Return `true` if this group records no parent at all.
    #[must_use]
    pub fn is_root_level(&self) -> bool {
        self.referring_groups.is_empty()
    }

    /// Produce an independent copy safe to hand to a concurrent hierarchy
    /// computation.
    ///
    /// All fields (including the referring set) are owned, so the copy
    /// shares no state with `self`; a cached instance can keep being
    /// mutated upstream without the computation observing it.
    #[must_use]
    pub fn detached(&self) -> Self {
        self.clone()
    }
}
