use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Half extents of a fighter's body box
pub const FIGHTER_HALF_EXTENTS: (Real, Real) = (0.5, 0.5);

/// Half extents of a directional attack hitbox
pub const HITBOX_HALF_EXTENTS: (Real, Real) = (0.5, 0.5);

/// How far a hitbox sits from the body center
pub const HITBOX_REACH: Real = 0.9;

/// Collision groups for fighters and their hitboxes
///
/// Hitboxes only ever test against fighter bodies; bodies never test against
/// each other because nothing here resolves contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// A fighter's own body
    Fighter = 0b0000_0001,

    /// A directional attack region
    Hitbox = 0b0000_0010,
}

impl CollisionGroups {
    fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let filter = match self {
            CollisionGroups::Fighter => CollisionGroups::Hitbox.group(),
            CollisionGroups::Hitbox => CollisionGroups::Fighter.group(),
        };
        InteractionGroups::new(self.group(), filter)
    }

    /// Check if a collider belongs to this group
    pub fn contains(self, collider: &Collider) -> bool {
        collider.collision_groups().memberships.contains(self.group())
    }
}

/// Common body/collider configurations for arena objects
pub mod presets {
    use super::*;
    use glam::Vec2;

    /// A fighter body: kinematic, moved only by the velocity its character sets
    pub fn fighter_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::kinematic_velocity_based()
            .translation(vector![x, y])
            .lock_rotations()
            .can_sleep(false)
            .build()
    }

    /// The fighter's hurt box
    pub fn fighter_collider() -> Collider {
        let (hx, hy) = FIGHTER_HALF_EXTENTS;
        ColliderBuilder::cuboid(hx, hy)
            .sensor(true)
            .collision_groups(CollisionGroups::Fighter.to_interaction_groups())
            .build()
    }

    /// An attack hitbox offset along `toward`, created disabled
    pub fn hitbox_collider(toward: Vec2) -> Collider {
        let (hx, hy) = HITBOX_HALF_EXTENTS;
        let offset = toward * HITBOX_REACH;
        ColliderBuilder::cuboid(hx, hy)
            .sensor(true)
            .translation(vector![offset.x, offset.y])
            .collision_groups(CollisionGroups::Hitbox.to_interaction_groups())
            .enabled(false)
            .build()
    }
}
