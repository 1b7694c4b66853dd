//! Weak entity references and the directory they resolve through

use crate::layers::InteractionLayers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weak reference to an entity in an external directory.
///
/// The trace system never owns entity lifetime; an id is only
/// meaningful for as long as the directory can resolve it. Resolve at
/// the point of use, never cache the resolved record across queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create from a raw id
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Collision-hierarchy identifier grouping an entity with its sub-parts.
///
/// Zero is a valid hierarchy id; "no hierarchy" is the all-ones
/// sentinel [`HierarchyId::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HierarchyId(pub u16);

impl HierarchyId {
    /// Sentinel for "no collision hierarchy"
    pub const NONE: Self = Self(u16::MAX);

    /// True if this is the no-hierarchy sentinel
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for HierarchyId {
    fn default() -> Self {
        Self::NONE
    }
}

/// Snapshot of the directory facts a trace needs about one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityInfo {
    /// Owning entity, if any
    pub owner: Option<EntityId>,
    /// Collision hierarchy the entity belongs to
    pub hierarchy: HierarchyId,
    /// Layers the entity presents to queries
    pub layers: InteractionLayers,
}

/// Resolver for weak entity references.
///
/// Implemented by whatever owns entity storage; the trace core only
/// ever asks questions through this seam.
pub trait EntityDirectory: Send + Sync {
    /// Resolve an id to its current record, or `None` if the entity is gone
    fn resolve(&self, id: EntityId) -> Option<EntityInfo>;
}
