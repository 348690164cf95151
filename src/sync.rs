//! Frame clock and physics → record synchronization.
//!
//! Each displayed frame the simulation asks the [`FrameClock`] how many
//! physics steps to take, runs them, and then [`sync_records`] copies every
//! registered body's pose into its record.  Stepping always finishes before
//! the read-back starts.

use crate::config::FrameClockMode;
use crate::physics::PhysicsWorld;
use crate::registry::BodyRegistry;

/// Translates wall-clock frame time into a number of `fixed_dt` steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    mode: FrameClockMode,
    fixed_dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(mode: FrameClockMode, fixed_dt: f32, max_substeps: u32) -> Self {
        Self {
            mode,
            fixed_dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Steps to run for a frame that took `elapsed` seconds of wall time.
    ///
    /// - `Fixed`: always one, `elapsed` is ignored.
    /// - `Accumulated`: whole `fixed_dt` multiples of the accumulated time,
    ///   capped at `max_substeps`.  Time beyond the cap is discarded.
    pub fn steps_for(&mut self, elapsed: f32) -> u32 {
        match self.mode {
            FrameClockMode::Fixed => 1,
            FrameClockMode::Accumulated => {
                self.accumulator += elapsed.max(0.0);
                let mut steps = 0;
                while self.accumulator >= self.fixed_dt && steps < self.max_substeps {
                    self.accumulator -= self.fixed_dt;
                    steps += 1;
                }
                if steps == self.max_substeps && self.accumulator >= self.fixed_dt {
                    // Drop the backlog instead of carrying it into later frames.
                    self.accumulator %= self.fixed_dt;
                }
                steps
            }
        }
    }
}

/// Copy each registered body's pose into its paired record.
///
/// Entries whose body has vanished from the world keep their last record.
pub fn sync_records(world: &PhysicsWorld, registry: &mut BodyRegistry) {
    for entry in registry.entries_mut() {
        if let Some(pose) = world.pose(entry.body) {
            entry.record.apply_pose(pose);
        }
    }
}

/// Run one frame: step according to `clock`, then sync.  Returns the step count.
pub fn advance_frame(
    world: &mut PhysicsWorld,
    registry: &mut BodyRegistry,
    clock: &mut FrameClock,
    elapsed: f32,
) -> u32 {
    let steps = clock.steps_for(elapsed);
    for _ in 0..steps {
        world.step(clock.fixed_dt());
    }
    sync_records(world, registry);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BoxRecord, RenderRecord};
    use bevy::math::Vec2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn fixed_clock_ignores_wall_time() {
        let mut clock = FrameClock::new(FrameClockMode::Fixed, DT, 4);
        assert_eq!(clock.steps_for(0.0), 1);
        assert_eq!(clock.steps_for(0.5), 1);
        assert_eq!(clock.steps_for(DT), 1);
    }

    #[test]
    fn accumulated_clock_carries_remainder() {
        let mut clock = FrameClock::new(FrameClockMode::Accumulated, 0.25, 4);
        assert_eq!(clock.steps_for(0.125), 0);
        assert_eq!(clock.steps_for(0.125), 1);
        assert_eq!(clock.steps_for(0.5), 2);
    }

    #[test]
    fn accumulated_clock_caps_substeps_and_drops_backlog() {
        let mut clock = FrameClock::new(FrameClockMode::Accumulated, 0.25, 2);
        assert_eq!(clock.steps_for(2.0), 2);
        // The remaining 1.5 s was discarded, not replayed.
        assert_eq!(clock.steps_for(0.0), 0);
    }

    #[test]
    fn advance_frame_steps_before_sync() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 980.0));
        let mut registry = BodyRegistry::with_capacity(4);
        let body = world.add_dynamic_rect(Vec2::new(100.0, 100.0), Vec2::splat(50.0), 0.9);
        registry.push(
            body,
            RenderRecord::Box(BoxRecord::new(100.0, 100.0, 50.0, 50.0)),
        );
        let mut clock = FrameClock::new(FrameClockMode::Fixed, DT, 1);

        let steps = advance_frame(&mut world, &mut registry, &mut clock, 0.0);

        assert_eq!(steps, 1);
        let pose = world.pose(body).unwrap();
        assert!(pose.y > 100.0);
        assert_eq!(registry.entries()[0].record.position(), Vec2::new(pose.x, pose.y));
    }
}
