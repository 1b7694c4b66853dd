//! Interaction layers and mask filtering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A 64-bit set of interaction layers.
///
/// Each named constant occupies a single bit; composite masks are
/// bitwise unions of named layers. The catalog is closed: arbitrary
/// bit patterns can be carried (`from_bits`) but only cataloged bits
/// have names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InteractionLayers(u64);

impl InteractionLayers {
    /// Empty set (matches nothing)
    pub const NONE: Self = Self(0);
    /// Every possible bit
    pub const ALL: Self = Self(u64::MAX);

    pub const SOLID: Self = Self(0x1);
    pub const HITBOXES: Self = Self(0x2);
    pub const TRIGGER: Self = Self(0x4);
    pub const SKY: Self = Self(0x8);
    pub const PLAYER_CLIP: Self = Self(0x10);
    pub const NPC_CLIP: Self = Self(0x20);
    pub const BLOCK_LOS: Self = Self(0x40);
    pub const BLOCK_LIGHT: Self = Self(0x80);
    pub const LADDER: Self = Self(0x100);
    pub const PICKUP: Self = Self(0x200);
    pub const BLOCK_SOUND: Self = Self(0x400);
    pub const NO_DRAW: Self = Self(0x800);
    pub const WINDOW: Self = Self(0x1000);
    pub const PASS_BULLETS: Self = Self(0x2000);
    pub const WORLD_GEOMETRY: Self = Self(0x4000);
    pub const WATER: Self = Self(0x8000);
    pub const SLIME: Self = Self(0x10000);
    pub const TOUCH_ALL: Self = Self(0x20000);
    pub const PLAYER: Self = Self(0x40000);
    pub const NPC: Self = Self(0x80000);
    pub const DEBRIS: Self = Self(0x100000);
    pub const PHYSICS_PROP: Self = Self(0x200000);
    pub const NAV_IGNORE: Self = Self(0x400000);
    pub const NAV_LOCAL_IGNORE: Self = Self(0x800000);
    pub const POST_PROCESSING_VOLUME: Self = Self(0x1000000);
    pub const UNUSED_LAYER3: Self = Self(0x2000000);
    pub const CARRIED_OBJECT: Self = Self(0x4000000);
    pub const PUSH_AWAY: Self = Self(0x8000000);
    pub const SERVER_ENTITY_ON_CLIENT: Self = Self(0x10000000);
    pub const CARRIED_WEAPON: Self = Self(0x20000000);
    pub const STATIC_LEVEL: Self = Self(0x40000000);
    pub const CSGO_TEAM1: Self = Self(0x80000000);
    pub const CSGO_TEAM2: Self = Self(0x1_00000000);
    pub const CSGO_GRENADE_CLIP: Self = Self(0x2_00000000);
    pub const CSGO_DRONE_CLIP: Self = Self(0x4_00000000);
    pub const CSGO_MOVEABLE: Self = Self(0x8_00000000);
    pub const CSGO_OPAQUE: Self = Self(0x10_00000000);
    pub const CSGO_MONSTER: Self = Self(0x20_00000000);
    // Bit 38 is unassigned in the catalog.
    pub const CSGO_THROWN_GRENADE: Self = Self(0x80_00000000);
    pub const IGNORE_PLAYER: Self = Self(0x100_00000000);

    // ==================== Composite masks ====================

    /// What bullets stop against, hitboxes aside. Must stay 0x2c3011.
    pub const SHOT_PHYSICS: Self = Self::SOLID
        .union(Self::PLAYER_CLIP)
        .union(Self::WINDOW)
        .union(Self::PASS_BULLETS)
        .union(Self::PLAYER)
        .union(Self::NPC)
        .union(Self::PHYSICS_PROP);

    /// Hitbox-only shot mask
    pub const SHOT_HITBOX: Self = Self::HITBOXES.union(Self::PLAYER).union(Self::NPC);

    /// Physics and hitbox shot layers combined
    pub const SHOT_FULL: Self = Self::SHOT_PHYSICS.union(Self::HITBOXES);

    /// Static level geometry only
    pub const WORLD_ONLY: Self = Self::SOLID
        .union(Self::WINDOW)
        .union(Self::WORLD_GEOMETRY)
        .union(Self::STATIC_LEVEL);

    /// Brush geometry, no entities
    pub const BRUSH_ONLY: Self = Self::SOLID
        .union(Self::WINDOW)
        .union(Self::PASS_BULLETS)
        .union(Self::CSGO_MOVEABLE);

    /// What a thrown grenade bounces off
    pub const GRENADE: Self = Self::BRUSH_ONLY.union(Self::CSGO_GRENADE_CLIP);

    /// Player movement collision
    pub const PLAYER_MOVE: Self = Self::SOLID
        .union(Self::PLAYER_CLIP)
        .union(Self::WINDOW)
        .union(Self::PASS_BULLETS)
        .union(Self::PLAYER)
        .union(Self::NPC)
        .union(Self::CSGO_MOVEABLE);

    /// NPC movement collision
    pub const NPC_MOVE: Self = Self::SOLID
        .union(Self::NPC_CLIP)
        .union(Self::WINDOW)
        .union(Self::PASS_BULLETS)
        .union(Self::PLAYER)
        .union(Self::NPC)
        .union(Self::CSGO_MOVEABLE);

    /// Create from a raw bit pattern
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bit pattern
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Union of both sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Layers present in both sets
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Every layer not in this set
    pub const fn complement(self) -> Self {
        Self(!self.0)
    }

    /// True if every layer of `other` is present
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no layers are set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The participation rule applied per-candidate during a trace.
    ///
    /// A candidate takes part in a query iff it shares no layer with
    /// `exclude` and at least one layer with `with`. Every query shape
    /// (ray, hull, explicit filter) goes through this same predicate.
    pub const fn matches(candidate: Self, with: Self, exclude: Self) -> bool {
        candidate.intersect(exclude).is_empty() && !candidate.intersect(with).is_empty()
    }

    /// Iterate over the individual set bits, lowest first
    pub fn iter(self) -> impl Iterator<Item = InteractionLayers> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let bit = rest & rest.wrapping_neg();
            rest &= !bit;
            Some(InteractionLayers(bit))
        })
    }

    /// Catalog name of a single-bit value, if it has one
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::SOLID => "Solid",
            Self::HITBOXES => "Hitboxes",
            Self::TRIGGER => "Trigger",
            Self::SKY => "Sky",
            Self::PLAYER_CLIP => "PlayerClip",
            Self::NPC_CLIP => "NpcClip",
            Self::BLOCK_LOS => "BlockLos",
            Self::BLOCK_LIGHT => "BlockLight",
            Self::LADDER => "Ladder",
            Self::PICKUP => "Pickup",
            Self::BLOCK_SOUND => "BlockSound",
            Self::NO_DRAW => "NoDraw",
            Self::WINDOW => "Window",
            Self::PASS_BULLETS => "PassBullets",
            Self::WORLD_GEOMETRY => "WorldGeometry",
            Self::WATER => "Water",
            Self::SLIME => "Slime",
            Self::TOUCH_ALL => "TouchAll",
            Self::PLAYER => "Player",
            Self::NPC => "Npc",
            Self::DEBRIS => "Debris",
            Self::PHYSICS_PROP => "PhysicsProp",
            Self::NAV_IGNORE => "NavIgnore",
            Self::NAV_LOCAL_IGNORE => "NavLocalIgnore",
            Self::POST_PROCESSING_VOLUME => "PostProcessingVolume",
            Self::UNUSED_LAYER3 => "UnusedLayer3",
            Self::CARRIED_OBJECT => "CarriedObject",
            Self::PUSH_AWAY => "PushAway",
            Self::SERVER_ENTITY_ON_CLIENT => "ServerEntityOnClient",
            Self::CARRIED_WEAPON => "CarriedWeapon",
            Self::STATIC_LEVEL => "StaticLevel",
            Self::CSGO_TEAM1 => "CsgoTeam1",
            Self::CSGO_TEAM2 => "CsgoTeam2",
            Self::CSGO_GRENADE_CLIP => "CsgoGrenadeClip",
            Self::CSGO_DRONE_CLIP => "CsgoDroneClip",
            Self::CSGO_MOVEABLE => "CsgoMoveable",
            Self::CSGO_OPAQUE => "CsgoOpaque",
            Self::CSGO_MONSTER => "CsgoMonster",
            Self::CSGO_THROWN_GRENADE => "CsgoThrownGrenade",
            Self::IGNORE_PLAYER => "IgnorePlayer",
            _ => return None,
        })
    }
}

impl BitOr for InteractionLayers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for InteractionLayers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for InteractionLayers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl BitAndAssign for InteractionLayers {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersect(rhs);
    }
}

impl BitXor for InteractionLayers {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for InteractionLayers {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for InteractionLayers {
    type Output = Self;
    fn not(self) -> Self {
        self.complement()
    }
}

impl fmt::Display for InteractionLayers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let mut first = true;
        for bit in self.iter() {
            if !first {
                write!(f, "|")?;
            }
            first = false;
            match bit.name() {
                Some(name) => write!(f, "{}", name)?,
                None => write!(f, "{:#x}", bit.bits())?,
            }
        }
        Ok(())
    }
}
