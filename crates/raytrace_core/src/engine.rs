//! Seam to the external world query engine

use crate::entity::EntityId;
use crate::filter::TraceFilter;
use glam::Vec3;

/// Shape swept along the trace path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceShape {
    /// Infinitely thin ray
    Ray,
    /// Axis-aligned hull given as corner offsets from the path point
    Hull { min: Vec3, max: Vec3 },
}

/// The surface the engine reports having struck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHit {
    /// Entity behind the struck geometry; `None` for world geometry
    pub entity: Option<EntityId>,
    /// Impact point
    pub point: Vec3,
    /// Surface normal at the impact
    pub normal: Vec3,
}

/// Raw engine output for one cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCast {
    /// Where the swept shape stopped
    pub end_point: Vec3,
    /// Portion of the path traveled before stopping
    pub fraction: f32,
    /// The start position was already embedded in blocking geometry
    pub all_solid: bool,
    /// First accepted hit, if any
    pub hit: Option<RawHit>,
}

impl RawCast {
    /// Cast that traveled the whole path without striking anything
    pub fn clear(end_point: Vec3) -> Self {
        Self {
            end_point,
            fraction: 1.0,
            all_solid: false,
            hit: None,
        }
    }
}

/// External engine that performs the geometric intersection.
///
/// The trace core treats this as an already-synchronized collaborator:
/// each call is synchronous and the core adds no locking of its own.
pub trait WorldQueryEngine: Send + Sync {
    /// Sweep `shape` from `start` to `end`, consulting `filter` for
    /// every candidate.
    ///
    /// Returns `None` when the query cannot be evaluated at all
    /// (scene not ready, degenerate shape); a clear path is a present
    /// [`RawCast`] with fraction 1.0.
    fn cast(&self, start: Vec3, end: Vec3, shape: &TraceShape, filter: &TraceFilter)
        -> Option<RawCast>;

    /// Diagnostic-beam hook for queries that asked to be marked
    fn debug_beam(&self, _start: Vec3, _end: Vec3) {}
}
