//! Per-query candidate filtering

use crate::entity::{EntityDirectory, EntityId, HierarchyId};
use crate::layers::InteractionLayers;
use crate::request::TraceOptions;

/// The facts the engine knows about one candidate it is testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Entity behind the candidate geometry; `None` for world geometry
    pub entity: Option<EntityId>,
    /// Owner of that entity, if any
    pub owner: Option<EntityId>,
    /// Collision hierarchy of the candidate
    pub hierarchy: HierarchyId,
    /// Layers the candidate presents
    pub layers: InteractionLayers,
}

impl Candidate {
    /// Candidate for world geometry carrying the given layers
    pub fn world(layers: InteractionLayers) -> Self {
        Self {
            entity: None,
            owner: None,
            hierarchy: HierarchyId::NONE,
            layers,
        }
    }
}

/// Accept/reject predicate consulted per-candidate during a trace.
///
/// Built from a request immediately before the engine is invoked and
/// discarded right after; it never outlives the query. World terrain
/// is always included: there is no variant that skips static level
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceFilter {
    /// Entity whose hits are ignored
    pub ignore_entity: Option<EntityId>,
    /// That entity's owner, ignored as well
    pub ignore_owner: Option<EntityId>,
    /// Hierarchy the ignored entity belongs to; the sentinel disables
    /// hierarchy-based rejection
    pub ignore_hierarchy: HierarchyId,
    /// Layers the querying object identifies as
    pub interacts_as: InteractionLayers,
    /// A candidate must overlap this mask
    pub interacts_with: InteractionLayers,
    /// Overlap with this mask disqualifies
    pub interacts_exclude: InteractionLayers,
}

impl TraceFilter {
    /// Filter with the given masks and no entity exclusion
    pub fn new(with: InteractionLayers, exclude: InteractionLayers) -> Self {
        Self {
            ignore_entity: None,
            ignore_owner: None,
            ignore_hierarchy: HierarchyId::NONE,
            interacts_as: InteractionLayers::NONE,
            interacts_with: with,
            interacts_exclude: exclude,
        }
    }

    /// Build the filter for one query.
    ///
    /// Looks up the ignored entity's owner and hierarchy through the
    /// directory; a missing or hierarchy-less entity records the
    /// sentinel, not zero (zero is a valid hierarchy id).
    pub fn from_request(
        ignore: Option<EntityId>,
        options: &TraceOptions,
        directory: &dyn EntityDirectory,
    ) -> Self {
        let info = ignore.and_then(|id| directory.resolve(id));
        Self {
            ignore_entity: ignore,
            ignore_owner: info.and_then(|i| i.owner),
            ignore_hierarchy: info.map(|i| i.hierarchy).unwrap_or(HierarchyId::NONE),
            interacts_as: options.interacts_as,
            interacts_with: options.interacts_with,
            interacts_exclude: options.interacts_exclude,
        }
    }

    /// Decide whether a candidate participates in this query.
    ///
    /// Rejects the ignored entity, its owner, anything in the ignored
    /// hierarchy (unless the sentinel is recorded), and anything whose
    /// layers fail [`InteractionLayers::matches`].
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        if candidate.entity.is_some() {
            if candidate.entity == self.ignore_entity {
                return false;
            }
            if candidate.entity == self.ignore_owner {
                return false;
            }
        }
        if !self.ignore_hierarchy.is_none() && candidate.hierarchy == self.ignore_hierarchy {
            return false;
        }
        InteractionLayers::matches(candidate.layers, self.interacts_with, self.interacts_exclude)
    }
}

impl Default for TraceFilter {
    fn default() -> Self {
        Self::new(InteractionLayers::SHOT_PHYSICS, InteractionLayers::NONE)
    }
}
