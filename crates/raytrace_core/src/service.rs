//! Trace service facade

use crate::config::TraceConfig;
use crate::engine::{RawCast, TraceShape, WorldQueryEngine};
use crate::entity::{EntityDirectory, EntityId};
use crate::filter::TraceFilter;
use crate::math::ViewAngles;
use crate::request::{HullExtents, TraceOptions, TraceRequest};
use crate::result::TraceResult;
use glam::Vec3;
use std::sync::Arc;

/// Facade composing filter construction, engine delegation and result
/// mapping.
///
/// Stateless between calls: every query builds its filter, delegates
/// one cast, maps the output, and leaves nothing behind. Independent
/// queries have no ordering requirement and share no mutable state.
///
/// Requests are not validated here; contradictory or out-of-range
/// parameters (such as inverted hull extents) are passed through to
/// the engine and fall under its tolerance.
pub struct TraceService {
    engine: Arc<dyn WorldQueryEngine>,
    directory: Arc<dyn EntityDirectory>,
    config: TraceConfig,
}

impl TraceService {
    /// Create a service over an engine and entity directory
    pub fn new(engine: Arc<dyn WorldQueryEngine>, directory: Arc<dyn EntityDirectory>) -> Self {
        Self {
            engine,
            directory,
            config: TraceConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Project a ray from `origin` along the view direction.
    ///
    /// Travel distance is fixed by [`TraceConfig::max_trace_distance`].
    /// `None` means the engine could not evaluate the query.
    pub fn trace_shape(
        &self,
        origin: Vec3,
        angles: ViewAngles,
        ignore: Option<EntityId>,
        options: Option<TraceOptions>,
    ) -> Option<TraceResult> {
        let mut request = TraceRequest::directed(origin, angles)
            .with_options(options.unwrap_or_default());
        request.ignore = ignore;
        self.trace(&request)
    }

    /// Trace an explicit start-to-end path
    pub fn trace_end_shape(
        &self,
        origin: Vec3,
        end_origin: Vec3,
        ignore: Option<EntityId>,
        options: Option<TraceOptions>,
    ) -> Option<TraceResult> {
        let mut request = TraceRequest::segment(origin, end_origin)
            .with_options(options.unwrap_or_default());
        request.ignore = ignore;
        self.trace(&request)
    }

    /// Sweep an axis-aligned hull from `start` to `end`
    pub fn trace_hull_shape(
        &self,
        start: Vec3,
        end: Vec3,
        hull_min: Vec3,
        hull_max: Vec3,
        ignore: Option<EntityId>,
        options: Option<TraceOptions>,
    ) -> Option<TraceResult> {
        let mut request = TraceRequest::segment(start, end)
            .with_hull(HullExtents::new(hull_min, hull_max))
            .with_options(options.unwrap_or_default());
        request.ignore = ignore;
        self.trace(&request)
    }

    /// Execute a prepared request
    pub fn trace(&self, request: &TraceRequest) -> Option<TraceResult> {
        let (start, end) = request.resolve_segment(self.config.max_trace_distance);
        let shape = match request.hull {
            Some(hull) => TraceShape::Hull {
                min: hull.min,
                max: hull.max,
            },
            None => TraceShape::Ray,
        };
        let filter = TraceFilter::from_request(request.ignore, &request.options, &*self.directory);
        if request.options.draw_debug_beam && self.config.debug_beams_enabled {
            log::debug!("trace beam {start} -> {end}");
            self.engine.debug_beam(start, end);
        }
        self.trace_with_filter(start, end, &filter, &shape)
    }

    /// Escape hatch: caller supplies the filter and shape directly.
    ///
    /// No filter synthesis happens here, only delegation and result
    /// mapping; use this for filter semantics the options struct
    /// cannot express.
    pub fn trace_shape_ex(
        &self,
        start: Vec3,
        end: Vec3,
        filter: &TraceFilter,
        shape: &TraceShape,
    ) -> Option<TraceResult> {
        self.trace_with_filter(start, end, filter, shape)
    }

    fn trace_with_filter(
        &self,
        start: Vec3,
        end: Vec3,
        filter: &TraceFilter,
        shape: &TraceShape,
    ) -> Option<TraceResult> {
        let raw = self.engine.cast(start, end, shape, filter)?;
        Some(Self::map_raw(raw))
    }

    fn map_raw(raw: RawCast) -> TraceResult {
        TraceResult {
            end_pos: raw.end_point,
            hit_entity: raw.hit.and_then(|h| h.entity),
            fraction: raw.fraction,
            all_solid: raw.all_solid,
            normal: raw.hit.map(|h| h.normal).unwrap_or(Vec3::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RawHit;
    use crate::entity::{EntityInfo, HierarchyId};
    use crate::layers::InteractionLayers;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapDirectory(HashMap<EntityId, EntityInfo>);

    impl EntityDirectory for MapDirectory {
        fn resolve(&self, id: EntityId) -> Option<EntityInfo> {
            self.0.get(&id).copied()
        }
    }

    /// Engine with a single blocking plane at x = `wall_x`, presenting
    /// `wall_layers`, attributed to `wall_entity`.
    struct PlaneEngine {
        wall_x: f32,
        wall_layers: InteractionLayers,
        wall_entity: Option<EntityId>,
        wall_hierarchy: HierarchyId,
        beams: Mutex<Vec<(Vec3, Vec3)>>,
    }

    impl PlaneEngine {
        fn new(wall_x: f32, wall_layers: InteractionLayers, wall_entity: Option<EntityId>) -> Self {
            Self {
                wall_x,
                wall_layers,
                wall_entity,
                wall_hierarchy: HierarchyId::NONE,
                beams: Mutex::new(Vec::new()),
            }
        }
    }

    impl WorldQueryEngine for PlaneEngine {
        fn cast(
            &self,
            start: Vec3,
            end: Vec3,
            _shape: &TraceShape,
            filter: &TraceFilter,
        ) -> Option<RawCast> {
            let candidate = crate::filter::Candidate {
                entity: self.wall_entity,
                owner: None,
                hierarchy: self.wall_hierarchy,
                layers: self.wall_layers,
            };
            let crossing = (start.x - self.wall_x) * (end.x - self.wall_x) < 0.0;
            if !crossing || !filter.accepts(&candidate) {
                return Some(RawCast::clear(end));
            }
            let fraction = (self.wall_x - start.x) / (end.x - start.x);
            let point = start + (end - start) * fraction;
            Some(RawCast {
                end_point: point,
                fraction,
                all_solid: false,
                hit: Some(RawHit {
                    entity: self.wall_entity,
                    point,
                    normal: -Vec3::X,
                }),
            })
        }

        fn debug_beam(&self, start: Vec3, end: Vec3) {
            self.beams.lock().unwrap().push((start, end));
        }
    }

    /// Engine that can never evaluate anything.
    struct DeadEngine;

    impl WorldQueryEngine for DeadEngine {
        fn cast(&self, _: Vec3, _: Vec3, _: &TraceShape, _: &TraceFilter) -> Option<RawCast> {
            None
        }
    }

    fn service_with(engine: Arc<dyn WorldQueryEngine>) -> TraceService {
        TraceService::new(engine, Arc::new(MapDirectory(HashMap::new())))
    }

    #[test]
    fn test_clear_path_is_present_with_fraction_one() {
        let engine = Arc::new(PlaneEngine::new(
            10_000.0,
            InteractionLayers::SOLID,
            None,
        ));
        let service = service_with(engine);

        let res = service
            .trace_end_shape(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), None, None)
            .unwrap();
        assert_eq!(res.fraction, 1.0);
        assert!(res.hit_entity.is_none());
        assert_eq!(res.normal, Vec3::ZERO);
        assert!(!res.did_hit());
    }

    #[test]
    fn test_dead_engine_yields_absent_result() {
        let service = service_with(Arc::new(DeadEngine));
        assert!(service
            .trace_end_shape(Vec3::ZERO, Vec3::X, None, None)
            .is_none());
    }

    #[test]
    fn test_directed_and_segment_paths_agree() {
        let engine = Arc::new(PlaneEngine::new(
            100.0,
            InteractionLayers::SOLID,
            Some(EntityId(4)),
        ));
        let service = service_with(engine);

        // Level gaze down +X; the directed trace travels the
        // configured max distance.
        let by_angles = service
            .trace_shape(Vec3::ZERO, ViewAngles::default(), None, None)
            .unwrap();
        let end = Vec3::new(service.config().max_trace_distance, 0.0, 0.0);
        let by_segment = service.trace_end_shape(Vec3::ZERO, end, None, None).unwrap();

        assert_eq!(by_angles, by_segment);
        assert_eq!(by_angles.hit_entity, Some(EntityId(4)));
        assert_relative_eq!(by_angles.end_pos.x, 100.0);
    }

    #[test]
    fn test_non_matching_layers_pass_through() {
        let engine = Arc::new(PlaneEngine::new(50.0, InteractionLayers::WATER, None));
        let service = service_with(engine);

        // Default mask is SHOT_PHYSICS, which has no Water bit.
        let res = service
            .trace_end_shape(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), None, None)
            .unwrap();
        assert_eq!(res.fraction, 1.0);
        assert!(!res.did_hit());
    }

    #[test]
    fn test_ignored_entity_is_not_hit() {
        let wall = EntityId(7);
        let engine = Arc::new(PlaneEngine::new(
            50.0,
            InteractionLayers::SOLID,
            Some(wall),
        ));
        let service = service_with(engine);

        let res = service
            .trace_end_shape(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Some(wall), None)
            .unwrap();
        assert_eq!(res.fraction, 1.0);
        assert!(res.hit_entity.is_none());
    }

    #[test]
    fn test_hit_fraction_and_normal_mapping() {
        let engine = Arc::new(PlaneEngine::new(
            70.0,
            InteractionLayers::HITBOXES | InteractionLayers::PLAYER,
            Some(EntityId(9)),
        ));
        let service = service_with(engine);

        let options = TraceOptions::default()
            .with_interacts_with(InteractionLayers::HITBOXES | InteractionLayers::PLAYER);
        let res = service
            .trace_end_shape(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), None, Some(options))
            .unwrap();
        assert_relative_eq!(res.fraction, 0.7);
        assert_eq!(res.hit_entity, Some(EntityId(9)));
        assert_eq!(res.normal, -Vec3::X);
        assert!(res.did_hit());
    }

    #[test]
    fn test_trace_shape_ex_skips_filter_synthesis() {
        let wall = EntityId(7);
        let engine = Arc::new(PlaneEngine::new(
            50.0,
            InteractionLayers::SOLID,
            Some(wall),
        ));
        let service = service_with(Arc::clone(&engine) as Arc<dyn WorldQueryEngine>);

        // Caller-built filter that excludes Solid entirely.
        let filter = TraceFilter::new(InteractionLayers::HITBOXES, InteractionLayers::SOLID);
        let res = service
            .trace_shape_ex(
                Vec3::ZERO,
                Vec3::new(100.0, 0.0, 0.0),
                &filter,
                &TraceShape::Ray,
            )
            .unwrap();
        assert_eq!(res.fraction, 1.0);
    }

    #[test]
    fn test_debug_beam_respects_master_toggle() {
        let engine = Arc::new(PlaneEngine::new(50.0, InteractionLayers::SOLID, None));
        let options = TraceOptions::default().with_debug_beam(true);

        let service = TraceService::new(
            Arc::clone(&engine) as Arc<dyn WorldQueryEngine>,
            Arc::new(MapDirectory(HashMap::new())),
        );
        service.trace_end_shape(Vec3::ZERO, Vec3::X, None, Some(options));
        assert_eq!(engine.beams.lock().unwrap().len(), 1);

        let muted = TraceService::new(
            Arc::clone(&engine) as Arc<dyn WorldQueryEngine>,
            Arc::new(MapDirectory(HashMap::new())),
        )
        .with_config(TraceConfig::default().with_debug_beams(false));
        muted.trace_end_shape(Vec3::ZERO, Vec3::X, None, Some(options));
        assert_eq!(engine.beams.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_hull_request_reaches_engine_as_hull() {
        struct ShapeProbe(Mutex<Option<TraceShape>>);
        impl WorldQueryEngine for ShapeProbe {
            fn cast(
                &self,
                _start: Vec3,
                end: Vec3,
                shape: &TraceShape,
                _filter: &TraceFilter,
            ) -> Option<RawCast> {
                *self.0.lock().unwrap() = Some(*shape);
                Some(RawCast::clear(end))
            }
        }

        let probe = Arc::new(ShapeProbe(Mutex::new(None)));
        let service = service_with(Arc::clone(&probe) as Arc<dyn WorldQueryEngine>);
        service.trace_hull_shape(
            Vec3::ZERO,
            Vec3::X,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
            None,
            None,
        );
        assert_eq!(
            *probe.0.lock().unwrap(),
            Some(TraceShape::Hull {
                min: Vec3::splat(-1.0),
                max: Vec3::splat(1.0),
            })
        );
    }
}
