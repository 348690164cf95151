//! Ball launch: wake the body and overwrite its velocities.

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::physics::PhysicsWorld;
use bevy::math::Vec2;
use bevy_rapier2d::rapier::prelude::RigidBodyHandle;

/// Velocities written by a launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParams {
    pub angular_velocity: f32,
    pub linear_velocity: Vec2,
}

impl LaunchParams {
    pub fn from_config(config: &SimConfig) -> Self {
        let [x, y] = config.launch_linear_velocity;
        Self {
            angular_velocity: config.launch_angular_velocity,
            linear_velocity: Vec2::new(x, y),
        }
    }
}

/// Wake `body` and set its velocities to `params`.
///
/// Velocities are replaced, not added: launching twice in a row leaves the
/// body in the same state as launching once.
pub fn launch(world: &mut PhysicsWorld, body: RigidBodyHandle, params: LaunchParams) -> SimResult<()> {
    world.wake(body)?;
    world.set_velocity(body, params.linear_velocity, params.angular_velocity)
}
