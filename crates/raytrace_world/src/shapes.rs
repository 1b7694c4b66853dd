//! Collision shapes placeable in the trace world

use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Shape of a world-geometry brush or an entity's collision volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldShape {
    /// Sphere with radius
    Sphere { radius: f32 },
    /// Box with half-extents
    Cuboid { half_extents: [f32; 3] },
    /// Capsule aligned along Z (up axis)
    Capsule { half_height: f32, radius: f32 },
    /// Triangle mesh (static level geometry)
    TriMesh {
        vertices: Vec<[f32; 3]>,
        indices: Vec<[u32; 3]>,
    },
}

impl WorldShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Cuboid {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a capsule shape (Z-aligned)
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self::Capsule {
            half_height,
            radius,
        }
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(&self) -> rapier::SharedShape {
        match self {
            Self::Sphere { radius } => rapier::SharedShape::ball(*radius),
            Self::Cuboid { half_extents } => {
                rapier::SharedShape::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
            Self::Capsule {
                half_height,
                radius,
            } => rapier::SharedShape::capsule_z(*half_height, *radius),
            Self::TriMesh { vertices, indices } => {
                let points: Vec<_> = vertices
                    .iter()
                    .map(|v| rapier::Point::new(v[0], v[1], v[2]))
                    .collect();
                rapier::SharedShape::trimesh(points, indices.clone())
            }
        }
    }
}

impl Default for WorldShape {
    fn default() -> Self {
        Self::Cuboid {
            half_extents: [0.5, 0.5, 0.5],
        }
    }
}
