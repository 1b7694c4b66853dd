//! Trace world - rapier-backed scene container

use crate::shapes::WorldShape;
use glam::Vec3;
use parking_lot::RwLock;
use rapier3d::prelude as rapier;
use raytrace_core::entity::{EntityDirectory, EntityId, EntityInfo, HierarchyId};
use raytrace_core::filter::Candidate;
use raytrace_core::layers::InteractionLayers;
use std::collections::HashMap;

/// Description of an entity's collision presence
#[derive(Debug, Clone)]
pub struct EntityDesc {
    /// Collision shape
    pub shape: WorldShape,
    /// World-space position
    pub position: Vec3,
    /// Layers presented to queries
    pub layers: InteractionLayers,
    /// Owning entity, if any
    pub owner: Option<EntityId>,
    /// Collision hierarchy; defaults to the no-hierarchy sentinel
    pub hierarchy: HierarchyId,
}

impl EntityDesc {
    /// Create a description with no owner and no hierarchy
    pub fn new(shape: WorldShape, position: Vec3, layers: InteractionLayers) -> Self {
        Self {
            shape,
            position,
            layers,
            owner: None,
            hierarchy: HierarchyId::NONE,
        }
    }

    /// Set the owning entity
    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the collision hierarchy
    pub fn with_hierarchy(mut self, hierarchy: HierarchyId) -> Self {
        self.hierarchy = hierarchy;
        self
    }
}

pub(crate) struct EntityRecord {
    pub owner: Option<EntityId>,
    pub hierarchy: HierarchyId,
    pub layers: InteractionLayers,
    colliders: Vec<rapier::ColliderHandle>,
}

/// Everything rapier needs for queries, plus the entity records.
///
/// Bodies exist only because rapier's query API wants a body set; the
/// world never steps dynamics.
pub(crate) struct SceneState {
    pub bodies: rapier::RigidBodySet,
    pub colliders: rapier::ColliderSet,
    pub query_pipeline: rapier::QueryPipeline,
    pub entities: HashMap<EntityId, EntityRecord>,
    islands: rapier::IslandManager,
}

impl SceneState {
    fn new() -> Self {
        Self {
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            entities: HashMap::new(),
            islands: rapier::IslandManager::new(),
        }
    }

    /// Build the filter candidate for a collider the engine is testing
    pub(crate) fn candidate_for(&self, collider: &rapier::Collider) -> Candidate {
        let (entity, layers) = unpack_user_data(collider.user_data);
        match entity {
            Some(id) => {
                let record = self.entities.get(&id);
                Candidate {
                    entity: Some(id),
                    owner: record.and_then(|r| r.owner),
                    hierarchy: record.map(|r| r.hierarchy).unwrap_or(HierarchyId::NONE),
                    layers,
                }
            }
            None => Candidate::world(layers),
        }
    }
}

/// Scene container implementing both collaborator seams of the trace
/// core: the world query engine and the entity directory.
///
/// Query-only: colliders are inserted fixed and no dynamics step ever
/// runs. Mutations and queries are serialized through an internal
/// lock; queries observe the scene as of the last [`sync_queries`]
/// call.
///
/// [`sync_queries`]: TraceWorld::sync_queries
pub struct TraceWorld {
    scene: RwLock<SceneState>,
}

impl TraceWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            scene: RwLock::new(SceneState::new()),
        }
    }

    /// Add static level geometry carrying the given layers.
    ///
    /// World geometry has no entity behind it; hits report no entity
    /// reference.
    pub fn add_world_geometry(&self, shape: &WorldShape, position: Vec3, layers: InteractionLayers) {
        let mut scene = self.scene.write();
        let builder = rapier::ColliderBuilder::new(shape.to_rapier())
            .translation(rapier::Vector::new(position.x, position.y, position.z))
            .user_data(pack_user_data(None, layers));
        scene.colliders.insert(builder);
    }

    /// Add an entity's collision presence.
    ///
    /// Replaces any previous presence registered under the same id.
    pub fn add_entity(&self, id: EntityId, desc: EntityDesc) {
        let mut scene = self.scene.write();
        Self::remove_entity_locked(&mut scene, id);

        let builder = rapier::ColliderBuilder::new(desc.shape.to_rapier())
            .translation(rapier::Vector::new(
                desc.position.x,
                desc.position.y,
                desc.position.z,
            ))
            .user_data(pack_user_data(Some(id), desc.layers));
        let handle = scene.colliders.insert(builder);

        scene.entities.insert(
            id,
            EntityRecord {
                owner: desc.owner,
                hierarchy: desc.hierarchy,
                layers: desc.layers,
                colliders: vec![handle],
            },
        );
    }

    /// Remove an entity and its colliders
    pub fn remove_entity(&self, id: EntityId) {
        let mut scene = self.scene.write();
        Self::remove_entity_locked(&mut scene, id);
    }

    fn remove_entity_locked(scene: &mut SceneState, id: EntityId) {
        if let Some(record) = scene.entities.remove(&id) {
            let SceneState {
                colliders,
                islands,
                bodies,
                ..
            } = scene;
            for handle in record.colliders {
                colliders.remove(handle, islands, bodies, true);
            }
        }
    }

    /// Rebuild query acceleration after scene mutations.
    ///
    /// Queries issued before the first sync see an empty scene.
    pub fn sync_queries(&self) {
        let mut scene = self.scene.write();
        let SceneState {
            query_pipeline,
            colliders,
            ..
        } = &mut *scene;
        query_pipeline.update(colliders);
    }

    /// Number of colliders currently placed
    pub fn collider_count(&self) -> usize {
        self.scene.read().colliders.len()
    }

    /// Number of registered entities
    pub fn entity_count(&self) -> usize {
        self.scene.read().entities.len()
    }

    pub(crate) fn scene(&self) -> &RwLock<SceneState> {
        &self.scene
    }
}

impl Default for TraceWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityDirectory for TraceWorld {
    fn resolve(&self, id: EntityId) -> Option<EntityInfo> {
        let scene = self.scene.read();
        scene.entities.get(&id).map(|record| EntityInfo {
            owner: record.owner,
            hierarchy: record.hierarchy,
            layers: record.layers,
        })
    }
}

// Collider user_data packs (entity id, layer mask) so the filter can
// be evaluated without a map lookup for world geometry. Entity ids are
// stored off by one; a zero tag means "no entity behind this collider".
pub(crate) fn pack_user_data(entity: Option<EntityId>, layers: InteractionLayers) -> u128 {
    let tag = entity.map(|e| e.raw().wrapping_add(1)).unwrap_or(0);
    ((tag as u128) << 64) | layers.bits() as u128
}

pub(crate) fn unpack_user_data(data: u128) -> (Option<EntityId>, InteractionLayers) {
    let tag = (data >> 64) as u64;
    let layers = InteractionLayers::from_bits(data as u64);
    (tag.checked_sub(1).map(EntityId::from_raw), layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_round_trip() {
        let layers = InteractionLayers::SHOT_PHYSICS;
        let (entity, back) = unpack_user_data(pack_user_data(Some(EntityId(0)), layers));
        assert_eq!(entity, Some(EntityId(0)));
        assert_eq!(back, layers);

        let (entity, back) = unpack_user_data(pack_user_data(None, InteractionLayers::SOLID));
        assert_eq!(entity, None);
        assert_eq!(back, InteractionLayers::SOLID);
    }

    #[test]
    fn test_directory_resolution() {
        let world = TraceWorld::new();
        let player = EntityId(1);
        let weapon = EntityId(2);

        world.add_entity(
            player,
            EntityDesc::new(WorldShape::capsule(32.0, 16.0), Vec3::ZERO, InteractionLayers::PLAYER)
                .with_hierarchy(HierarchyId(3)),
        );
        world.add_entity(
            weapon,
            EntityDesc::new(
                WorldShape::cuboid(2.0, 2.0, 2.0),
                Vec3::ZERO,
                InteractionLayers::CARRIED_WEAPON,
            )
            .with_owner(player),
        );

        let info = world.resolve(player).unwrap();
        assert_eq!(info.hierarchy, HierarchyId(3));
        assert_eq!(info.owner, None);

        let info = world.resolve(weapon).unwrap();
        assert_eq!(info.owner, Some(player));
        assert_eq!(info.hierarchy, HierarchyId::NONE);

        assert!(world.resolve(EntityId(99)).is_none());
    }

    #[test]
    fn test_remove_entity_drops_colliders() {
        let world = TraceWorld::new();
        world.add_entity(
            EntityId(1),
            EntityDesc::new(WorldShape::sphere(1.0), Vec3::ZERO, InteractionLayers::SOLID),
        );
        assert_eq!(world.collider_count(), 1);
        assert_eq!(world.entity_count(), 1);

        world.remove_entity(EntityId(1));
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.entity_count(), 0);
        assert!(world.resolve(EntityId(1)).is_none());
    }

    #[test]
    fn test_add_entity_replaces_previous_presence() {
        let world = TraceWorld::new();
        let id = EntityId(5);
        world.add_entity(
            id,
            EntityDesc::new(WorldShape::sphere(1.0), Vec3::ZERO, InteractionLayers::SOLID),
        );
        world.add_entity(
            id,
            EntityDesc::new(WorldShape::sphere(2.0), Vec3::ZERO, InteractionLayers::DEBRIS),
        );

        assert_eq!(world.collider_count(), 1);
        assert_eq!(world.resolve(id).unwrap().layers, InteractionLayers::DEBRIS);
    }
}
