//! Thin owner of the Rapier pipeline and body sets.
//!
//! [`PhysicsWorld`] exposes the handful of operations the simulation needs:
//! create static/dynamic rectangles and circles, advance by `dt`, overwrite
//! velocities, wake a sleeping body, and read back each body's pose.
//! Everything else (integration, contacts, sleeping heuristics, restitution)
//! stays inside Rapier.
//!
//! Coordinates are surface pixels with `y` pointing down; gravity is given in
//! the same frame, so a positive `y` pulls bodies toward the bottom edge.

use crate::error::{SimError, SimResult};
use bevy::math::Vec2;
use bevy_rapier2d::rapier::prelude::*;

/// Position and rotation of a body as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub angle: f32,
}

/// Pose plus the kinematic state the launch protocol writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub pose: BodyPose,
    pub linvel: Vec2,
    pub angvel: f32,
    pub sleeping: bool,
}

/// Rapier sets, pipeline and gravity for one simulation.
pub struct PhysicsWorld {
    gravity: Vec2,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Empty world with the given gravity and default Rapier settings.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Immovable rectangle centred on `center`.
    pub fn add_static_rect(&mut self, center: Vec2, size: Vec2) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(center.x, center.y))
            .build();
        let collider = ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0).build();
        self.insert(body, collider)
    }

    /// Dynamic rectangle centred on `center`.
    pub fn add_dynamic_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        restitution: f32,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(center.x, center.y))
            .build();
        let collider = ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0)
            .restitution(restitution)
            .build();
        self.insert(body, collider)
    }

    /// Dynamic circle, optionally created asleep.
    pub fn add_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        restitution: f32,
        sleeping: bool,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(center.x, center.y))
            .sleeping(sleeping)
            .build();
        let collider = ColliderBuilder::ball(radius)
            .restitution(restitution)
            .build();
        self.insert(body, collider)
    }

    fn insert(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Advance the world by exactly `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        let gravity = Vector::new(self.gravity.x, self.gravity.y);
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Current pose of `handle`, or `None` if it has been removed.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<BodyPose> {
        self.bodies.get(handle).map(|body| {
            let translation = body.translation();
            BodyPose {
                x: translation.x,
                y: translation.y,
                angle: body.rotation().angle(),
            }
        })
    }

    /// Pose, velocities and sleep flag of `handle`.
    pub fn state(&self, handle: RigidBodyHandle) -> Option<BodyState> {
        let pose = self.pose(handle)?;
        self.bodies.get(handle).map(|body| {
            let linvel = body.linvel();
            BodyState {
                pose,
                linvel: Vec2::new(linvel.x, linvel.y),
                angvel: body.angvel(),
                sleeping: body.is_sleeping(),
            }
        })
    }

    /// Wake `handle` if it is sleeping.
    pub fn wake(&mut self, handle: RigidBodyHandle) -> SimResult<()> {
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or(SimError::BodyNotFound { context: "wake" })?;
        body.wake_up(true);
        Ok(())
    }

    /// Overwrite both velocities of `handle`.
    pub fn set_velocity(
        &mut self,
        handle: RigidBodyHandle,
        linvel: Vec2,
        angvel: f32,
    ) -> SimResult<()> {
        let body = self.bodies.get_mut(handle).ok_or(SimError::BodyNotFound {
            context: "set_velocity",
        })?;
        body.set_angvel(angvel, true);
        body.set_linvel(Vector::new(linvel.x, linvel.y), true);
        Ok(())
    }

    /// Remove `handle` and its colliders.  Returns `false` if it was already gone.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Number of bodies in the world, static ones included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether `handle` still resolves.
    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, 980.0))
    }

    #[test]
    fn dynamic_rect_falls_toward_positive_y() {
        let mut world = world();
        let handle = world.add_dynamic_rect(Vec2::new(100.0, 100.0), Vec2::splat(50.0), 0.9);
        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        let pose = world.pose(handle).unwrap();
        assert!(pose.y > 100.0, "body should fall, y = {}", pose.y);
        assert_eq!(pose.x, 100.0);
    }

    #[test]
    fn static_rect_does_not_move() {
        let mut world = world();
        let handle = world.add_static_rect(Vec2::new(50.0, 400.0), Vec2::new(100.0, 10.0));
        world.step(1.0 / 60.0);
        let pose = world.pose(handle).unwrap();
        assert_eq!((pose.x, pose.y, pose.angle), (50.0, 400.0, 0.0));
    }

    #[test]
    fn circle_created_asleep_reports_sleeping() {
        let mut world = world();
        let handle = world.add_circle(Vec2::new(10.0, 10.0), 5.0, 0.9, true);
        assert!(world.state(handle).unwrap().sleeping);
        world.wake(handle).unwrap();
        assert!(!world.state(handle).unwrap().sleeping);
    }

    #[test]
    fn removed_body_no_longer_resolves() {
        let mut world = world();
        let handle = world.add_dynamic_rect(Vec2::ZERO, Vec2::splat(10.0), 0.5);
        assert!(world.remove(handle));
        assert!(world.pose(handle).is_none());
        assert!(!world.remove(handle));
        assert_eq!(
            world.set_velocity(handle, Vec2::X, 0.0),
            Err(SimError::BodyNotFound {
                context: "set_velocity"
            })
        );
        assert_eq!(world.body_count(), 0);
    }
}
