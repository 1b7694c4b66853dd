//! RayTrace World - Rapier 3D query backend
//!
//! Production implementation of the `raytrace_core` collaborator
//! seams: [`TraceWorld`] owns a rapier collider scene and serves both
//! as the world query engine (ray and swept-hull casts with
//! per-candidate filtering) and as the entity directory (owner,
//! hierarchy and layer lookups for weak entity references).
//!
//! The scene is query-only: colliders are placed and removed, but no
//! dynamics step ever runs.
//!
//! # Example
//!
//! ```ignore
//! use raytrace_core::prelude::*;
//! use raytrace_world::{EntityDesc, TraceWorld, WorldShape};
//!
//! let world = Arc::new(TraceWorld::new());
//! world.add_world_geometry(&WorldShape::cuboid(64.0, 64.0, 4.0), floor_pos, InteractionLayers::SOLID);
//! world.add_entity(player_id, EntityDesc::new(player_shape, spawn, InteractionLayers::PLAYER));
//! world.sync_queries();
//!
//! let service = TraceService::new(world.clone(), world);
//! ```

pub mod engine;
pub mod shapes;
pub mod world;

pub use shapes::WorldShape;
pub use world::{EntityDesc, TraceWorld};
