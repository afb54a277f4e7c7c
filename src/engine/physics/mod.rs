// Hitbox storage using rapier2d

pub mod body;
mod world;

pub use body::{ColliderHandle, RigidBodyHandle};

// Re-export for future collision filtering outside the world
#[allow(unused_imports)]
pub use body::CollisionGroups;
pub use world::HitboxWorld;

/// Physics lookup errors
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Unknown rigid body: {0:?}")]
    UnknownBody(RigidBodyHandle),

    #[error("Unknown collider: {0:?}")]
    UnknownCollider(ColliderHandle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_error_display() {
        let err = PhysicsError::UnknownBody(RigidBodyHandle::from_raw_parts(3, 0));
        assert!(err.to_string().starts_with("Unknown rigid body"));
    }
}
