use glam::Vec2;
use rapier2d::parry::query;
use rapier2d::prelude::*;

use super::body::{presets, CollisionGroups};
use super::PhysicsError;

/// Storage for fighter bodies and their attack hitboxes
///
/// Bodies are kinematic: they carry the velocity their character last set
/// and `advance` moves them by it. There is no contact solving; the only
/// query is whether an enabled hitbox overlaps another fighter.
#[derive(Default)]
pub struct HitboxWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
}

impl HitboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a fighter body with its hurt box at `(x, y)`
    pub fn spawn_body(&mut self, x: Real, y: Real) -> RigidBodyHandle {
        let body = self.rigid_body_set.insert(presets::fighter_body(x, y));
        self.collider_set.insert_with_parent(
            presets::fighter_collider(),
            body,
            &mut self.rigid_body_set,
        );
        body
    }

    /// Attach a disabled hitbox to `body`, offset along `toward`
    pub fn attach_hitbox(
        &mut self,
        body: RigidBodyHandle,
        toward: Vec2,
    ) -> Result<ColliderHandle, PhysicsError> {
        if !self.rigid_body_set.contains(body) {
            return Err(PhysicsError::UnknownBody(body));
        }
        Ok(self.collider_set.insert_with_parent(
            presets::hitbox_collider(toward),
            body,
            &mut self.rigid_body_set,
        ))
    }

    pub fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) -> Result<(), PhysicsError> {
        let rb = self
            .rigid_body_set
            .get_mut(body)
            .ok_or(PhysicsError::UnknownBody(body))?;
        rb.set_linvel(vector![velocity.x, velocity.y], true);
        Ok(())
    }

    pub fn velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(body)
            .map(|rb| Vec2::new(rb.linvel().x, rb.linvel().y))
    }

    pub fn position(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(body)
            .map(|rb| Vec2::new(rb.translation().x, rb.translation().y))
    }

    /// Teleport a body and stop it
    pub fn set_position(&mut self, body: RigidBodyHandle, x: Real, y: Real) -> Result<(), PhysicsError> {
        let rb = self
            .rigid_body_set
            .get_mut(body)
            .ok_or(PhysicsError::UnknownBody(body))?;
        rb.set_translation(vector![x, y], true);
        rb.set_linvel(vector![0.0, 0.0], true);
        Ok(())
    }

    pub fn set_hitbox_enabled(&mut self, hitbox: ColliderHandle, enabled: bool) -> Result<(), PhysicsError> {
        let collider = self
            .collider_set
            .get_mut(hitbox)
            .ok_or(PhysicsError::UnknownCollider(hitbox))?;
        collider.set_enabled(enabled);
        Ok(())
    }

    pub fn is_hitbox_enabled(&self, hitbox: ColliderHandle) -> Option<bool> {
        self.collider_set.get(hitbox).map(|c| c.is_enabled())
    }

    /// Move every body by its velocity over `dt` seconds
    pub fn advance(&mut self, dt: Real) {
        for (_, rb) in self.rigid_body_set.iter_mut() {
            let next = rb.translation() + rb.linvel() * dt;
            rb.set_translation(next, true);
        }
    }

    fn world_pose(&self, collider: &Collider) -> Option<Isometry<Real>> {
        let parent = self.rigid_body_set.get(collider.parent()?)?;
        let local = collider
            .position_wrt_parent()
            .copied()
            .unwrap_or_else(Isometry::identity);
        Some(parent.position() * local)
    }

    /// Bodies of other fighters touching an enabled hitbox
    ///
    /// A disabled hitbox touches nothing.
    pub fn hitbox_overlaps(&self, hitbox: ColliderHandle) -> Vec<RigidBodyHandle> {
        let Some(attacker) = self.collider_set.get(hitbox) else {
            return Vec::new();
        };
        if !attacker.is_enabled() {
            return Vec::new();
        }
        let Some(attacker_pose) = self.world_pose(attacker) else {
            return Vec::new();
        };

        self.collider_set
            .iter()
            .filter(|(_, other)| {
                other.is_enabled()
                    && CollisionGroups::Fighter.contains(other)
                    && other.parent() != attacker.parent()
            })
            .filter_map(|(_, other)| {
                let pose = self.world_pose(other)?;
                let touching =
                    query::intersection_test(&attacker_pose, attacker.shape(), &pose, other.shape())
                        .unwrap_or(false);
                if touching {
                    other.parent()
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }
}
