//! World query engine implementation over rapier

use crate::world::{SceneState, TraceWorld};
use glam::Vec3;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude as rapier;
use raytrace_core::engine::{RawCast, RawHit, TraceShape, WorldQueryEngine};
use raytrace_core::filter::TraceFilter;

impl WorldQueryEngine for TraceWorld {
    fn cast(
        &self,
        start: Vec3,
        end: Vec3,
        shape: &TraceShape,
        filter: &TraceFilter,
    ) -> Option<RawCast> {
        let scene = self.scene().read();
        cast_in_scene(&scene, start, end, shape, filter)
    }

    fn debug_beam(&self, start: Vec3, end: Vec3) {
        log::debug!("debug beam {start} -> {end}");
    }
}

fn to_point(v: Vec3) -> rapier::Point<f32> {
    rapier::Point::new(v.x, v.y, v.z)
}

fn to_vector(v: Vec3) -> rapier::Vector<f32> {
    rapier::Vector::new(v.x, v.y, v.z)
}

fn from_vector(v: rapier::Vector<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn cast_in_scene(
    scene: &SceneState,
    start: Vec3,
    end: Vec3,
    shape: &TraceShape,
    filter: &TraceFilter,
) -> Option<RawCast> {
    let travel = end - start;
    if !travel.is_finite() {
        return None;
    }

    let predicate = |_handle: rapier::ColliderHandle, collider: &rapier::Collider| -> bool {
        filter.accepts(&scene.candidate_for(collider))
    };
    let query_filter = rapier::QueryFilter::new().predicate(&predicate);

    // A start embedded in accepted geometry short-circuits the sweep.
    if let Some(embedded_in) = embedded_at_start(scene, start, shape, query_filter) {
        return Some(RawCast {
            end_point: start,
            fraction: 0.0,
            all_solid: true,
            hit: Some(RawHit {
                entity: embedded_in,
                point: start,
                normal: Vec3::ZERO,
            }),
        });
    }

    let length = travel.length();
    if length == 0.0 {
        return Some(RawCast::clear(start));
    }

    match shape {
        TraceShape::Ray => {
            let direction = travel / length;
            let ray = rapier::Ray::new(to_point(start), to_vector(direction));
            let hit = scene.query_pipeline.cast_ray_and_get_normal(
                &scene.bodies,
                &scene.colliders,
                &ray,
                length,
                true,
                query_filter,
            );
            Some(match hit {
                Some((handle, intersection)) => {
                    let fraction = intersection.time_of_impact / length;
                    let point = start + direction * intersection.time_of_impact;
                    let (entity, _) =
                        crate::world::unpack_user_data(scene.colliders[handle].user_data);
                    RawCast {
                        end_point: point,
                        fraction,
                        all_solid: false,
                        hit: Some(RawHit {
                            entity,
                            point,
                            normal: from_vector(intersection.normal),
                        }),
                    }
                }
                None => RawCast::clear(end),
            })
        }
        TraceShape::Hull { min, max } => {
            let half = (*max - *min) * 0.5;
            let center = (*max + *min) * 0.5;
            let cuboid = rapier::SharedShape::cuboid(half.x, half.y, half.z);
            let position = rapier::Isometry::translation(
                start.x + center.x,
                start.y + center.y,
                start.z + center.z,
            );
            let velocity = to_vector(travel);
            let options = ShapeCastOptions {
                max_time_of_impact: 1.0,
                stop_at_penetration: true,
                ..Default::default()
            };

            let hit = scene.query_pipeline.cast_shape(
                &scene.bodies,
                &scene.colliders,
                &position,
                &velocity,
                cuboid.as_ref(),
                options,
                query_filter,
            );
            Some(match hit {
                Some((handle, cast)) => {
                    let fraction = cast.time_of_impact;
                    let point = start + travel * fraction;
                    let (entity, _) =
                        crate::world::unpack_user_data(scene.colliders[handle].user_data);
                    // normal1 points outward from the swept hull; the
                    // struck surface faces the opposite way.
                    let normal = -Vec3::new(cast.normal1.x, cast.normal1.y, cast.normal1.z);
                    RawCast {
                        end_point: point,
                        fraction,
                        all_solid: false,
                        hit: Some(RawHit {
                            entity,
                            point,
                            normal,
                        }),
                    }
                }
                None => RawCast::clear(end),
            })
        }
    }
}

/// Find an accepted collider the start position is embedded in.
///
/// Returns the entity behind it (`None` inside the option for world
/// geometry); outer `None` means the start is free.
fn embedded_at_start(
    scene: &SceneState,
    start: Vec3,
    shape: &TraceShape,
    query_filter: rapier::QueryFilter,
) -> Option<Option<raytrace_core::entity::EntityId>> {
    let mut found = None;
    match shape {
        TraceShape::Ray => {
            scene.query_pipeline.intersections_with_point(
                &scene.bodies,
                &scene.colliders,
                &to_point(start),
                query_filter,
                |handle| {
                    let (entity, _) =
                        crate::world::unpack_user_data(scene.colliders[handle].user_data);
                    found = Some(entity);
                    false
                },
            );
        }
        TraceShape::Hull { min, max } => {
            let half = (*max - *min) * 0.5;
            let center = (*max + *min) * 0.5;
            let cuboid = rapier::SharedShape::cuboid(half.x, half.y, half.z);
            let position = rapier::Isometry::translation(
                start.x + center.x,
                start.y + center.y,
                start.z + center.z,
            );
            scene.query_pipeline.intersections_with_shape(
                &scene.bodies,
                &scene.colliders,
                &position,
                cuboid.as_ref(),
                query_filter,
                |handle| {
                    let (entity, _) =
                        crate::world::unpack_user_data(scene.colliders[handle].user_data);
                    found = Some(entity);
                    false
                },
            );
        }
    }
    found
}
