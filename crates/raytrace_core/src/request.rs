//! Trace request description and per-query options

use crate::entity::EntityId;
use crate::layers::InteractionLayers;
use crate::math::ViewAngles;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Per-query filter parameters.
///
/// Every field has a default, so callers usually tweak one or two via
/// the `with_*` builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceOptions {
    /// Layers the querying object identifies as
    pub interacts_as: InteractionLayers,
    /// A candidate must share at least one of these layers
    pub interacts_with: InteractionLayers,
    /// Any overlap with these layers disqualifies a candidate
    pub interacts_exclude: InteractionLayers,
    /// Request a visual marker for this query
    pub draw_debug_beam: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            interacts_as: InteractionLayers::NONE,
            interacts_with: InteractionLayers::SHOT_PHYSICS,
            interacts_exclude: InteractionLayers::NONE,
            draw_debug_beam: false,
        }
    }
}

impl TraceOptions {
    /// Set the self-identification mask
    pub fn with_interacts_as(mut self, mask: InteractionLayers) -> Self {
        self.interacts_as = mask;
        self
    }

    /// Set the required-overlap mask
    pub fn with_interacts_with(mut self, mask: InteractionLayers) -> Self {
        self.interacts_with = mask;
        self
    }

    /// Set the disqualifying mask
    pub fn with_interacts_exclude(mut self, mask: InteractionLayers) -> Self {
        self.interacts_exclude = mask;
        self
    }

    /// Request a diagnostic beam for this query
    pub fn with_debug_beam(mut self, draw: bool) -> Self {
        self.draw_debug_beam = draw;
        self
    }
}

/// Axis-aligned hull extents for a swept-volume trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullExtents {
    /// Minimum corner offset from the path point
    pub min: Vec3,
    /// Maximum corner offset from the path point
    pub max: Vec3,
}

impl HullExtents {
    /// Create from corner offsets
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Symmetric hull from half extents
    pub fn symmetric(half: Vec3) -> Self {
        Self { min: -half, max: half }
    }
}

/// The path a trace travels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TracePath {
    /// Forward projection from a point along a view direction; travel
    /// distance comes from the service configuration.
    Directed { origin: Vec3, angles: ViewAngles },
    /// Explicit start and end points
    Segment { start: Vec3, end: Vec3 },
}

/// Immutable description of one trace query.
///
/// Caller-owned and read-only once constructed; the service never
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRequest {
    /// Path to sweep
    pub path: TracePath,
    /// Optional hull extents; `None` traces a point ray
    pub hull: Option<HullExtents>,
    /// Entity excluded from hits (along with its owner and hierarchy)
    pub ignore: Option<EntityId>,
    /// Filter parameters
    pub options: TraceOptions,
}

impl TraceRequest {
    /// Forward-projected request from origin and view angles
    pub fn directed(origin: Vec3, angles: ViewAngles) -> Self {
        Self {
            path: TracePath::Directed { origin, angles },
            hull: None,
            ignore: None,
            options: TraceOptions::default(),
        }
    }

    /// Explicit start-to-end request
    pub fn segment(start: Vec3, end: Vec3) -> Self {
        Self {
            path: TracePath::Segment { start, end },
            hull: None,
            ignore: None,
            options: TraceOptions::default(),
        }
    }

    /// Sweep a hull instead of a point ray
    pub fn with_hull(mut self, hull: HullExtents) -> Self {
        self.hull = Some(hull);
        self
    }

    /// Exclude an entity (and its owner and hierarchy) from hits
    pub fn with_ignore(mut self, entity: EntityId) -> Self {
        self.ignore = Some(entity);
        self
    }

    /// Replace the filter options
    pub fn with_options(mut self, options: TraceOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the path to concrete start/end points.
    ///
    /// `max_distance` is the fixed travel distance applied to directed
    /// paths; segments already carry their endpoints.
    pub fn resolve_segment(&self, max_distance: f32) -> (Vec3, Vec3) {
        match self.path {
            TracePath::Directed { origin, angles } => {
                (origin, origin + angles.forward() * max_distance)
            }
            TracePath::Segment { start, end } => (start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = TraceOptions::default();
        assert_eq!(opts.interacts_as, InteractionLayers::NONE);
        assert_eq!(opts.interacts_with, InteractionLayers::SHOT_PHYSICS);
        assert_eq!(opts.interacts_exclude, InteractionLayers::NONE);
        assert!(!opts.draw_debug_beam);
    }

    #[test]
    fn test_options_builders() {
        let opts = TraceOptions::default()
            .with_interacts_with(InteractionLayers::SHOT_HITBOX)
            .with_interacts_exclude(InteractionLayers::WATER)
            .with_debug_beam(true);
        assert_eq!(opts.interacts_with, InteractionLayers::SHOT_HITBOX);
        assert_eq!(opts.interacts_exclude, InteractionLayers::WATER);
        assert!(opts.draw_debug_beam);
    }

    #[test]
    fn test_directed_resolves_with_travel_distance() {
        let req = TraceRequest::directed(Vec3::new(1.0, 2.0, 3.0), ViewAngles::default());
        let (start, end) = req.resolve_segment(100.0);
        assert_eq!(start, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(end, Vec3::new(101.0, 2.0, 3.0));
    }

    #[test]
    fn test_segment_ignores_travel_distance() {
        let req = TraceRequest::segment(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        let (start, end) = req.resolve_segment(9999.0);
        assert_eq!(start, Vec3::ZERO);
        assert_eq!(end, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_symmetric_hull() {
        let hull = HullExtents::symmetric(Vec3::new(16.0, 16.0, 36.0));
        assert_eq!(hull.min, Vec3::new(-16.0, -16.0, -36.0));
        assert_eq!(hull.max, Vec3::new(16.0, 16.0, 36.0));
    }
}
