//! Trace outcome type

use crate::entity::EntityId;
use glam::Vec3;

/// Outcome of a trace query.
///
/// Only produced when the engine could evaluate the query; an absent
/// result at the service boundary means "could not evaluate", which is
/// distinct from this type with `fraction == 1.0` and no hit entity
/// ("reached the end, nothing struck").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Where the trace stopped
    pub end_pos: Vec3,
    /// Entity that was struck; `None` for world geometry or a clear path
    pub hit_entity: Option<EntityId>,
    /// Portion of the requested path traveled: 0.0 = blocked at the
    /// start, 1.0 = unobstructed
    pub fraction: f32,
    /// The starting point was already inside blocking geometry
    pub all_solid: bool,
    /// Surface normal at the impact; zero when nothing was struck
    pub normal: Vec3,
}

impl TraceResult {
    /// Result for a path that reached its end unobstructed
    pub fn unobstructed(end_pos: Vec3) -> Self {
        Self {
            end_pos,
            hit_entity: None,
            fraction: 1.0,
            all_solid: false,
            normal: Vec3::ZERO,
        }
    }

    /// True if a surface or entity was struck.
    ///
    /// A hit exactly at fraction 1.0 still counts: the presence of a
    /// hit entity or a non-zero normal is what distinguishes "hit at
    /// the very end" from "unobstructed".
    pub fn did_hit(&self) -> bool {
        self.hit_entity.is_some() || self.normal != Vec3::ZERO || self.all_solid
    }
}
