//! Box spawning: offset policy and atomic registration.

use crate::config::{SimConfig, SpawnOffsetPolicy};
use crate::physics::PhysicsWorld;
use crate::record::{BoxRecord, RenderRecord};
use crate::registry::BodyRegistry;
use bevy::math::Vec2;
use bevy_rapier2d::rapier::prelude::RigidBodyHandle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stateful offset generator for successive spawns.
#[derive(Debug, Clone)]
pub struct SpawnCursor {
    policy: SpawnOffsetPolicy,
    next_slot: u32,
    rng: StdRng,
}

impl SpawnCursor {
    pub fn new(policy: SpawnOffsetPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            policy,
            next_slot: 0,
            rng,
        }
    }

    /// Horizontal offset for the next box, advancing the cursor.
    pub fn next_offset(&mut self, box_size: f32) -> f32 {
        match self.policy {
            SpawnOffsetPolicy::RoundRobin { slots } => {
                let slot = self.next_slot;
                self.next_slot = (self.next_slot + 1) % slots.max(1);
                slot as f32 * box_size
            }
            SpawnOffsetPolicy::Random { max_offset } => {
                if max_offset > 0.0 {
                    self.rng.gen_range(0.0..max_offset)
                } else {
                    0.0
                }
            }
        }
    }
}

/// What a single spawn did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOutcome {
    pub body: RigidBodyHandle,
    pub offset: f32,
    /// Box that was removed to make room, if the registry was full.
    pub recycled: Option<RigidBodyHandle>,
}

/// Create a box body and its record, and register them as one entry.
///
/// When the registry is full the oldest box is removed from both the world
/// and the registry first, so this always succeeds.
pub fn spawn_box(
    world: &mut PhysicsWorld,
    registry: &mut BodyRegistry,
    cursor: &mut SpawnCursor,
    config: &SimConfig,
) -> SpawnOutcome {
    let recycled = if registry.is_full() {
        registry.evict_oldest_box().map(|entry| {
            world.remove(entry.body);
            entry.body
        })
    } else {
        None
    };

    let size = config.box_size;
    let offset = cursor.next_offset(size);
    let position = Vec2::new(config.spawn_base_x() + offset, config.spawn_base_y);

    let body = world.add_dynamic_rect(position, Vec2::splat(size), config.restitution);
    let record = RenderRecord::Box(BoxRecord::new(position.x, position.y, size, size));
    registry.push(body, record);

    SpawnOutcome {
        body,
        offset,
        recycled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_mod_three_cycles_from_zero() {
        let mut cursor = SpawnCursor::new(SpawnOffsetPolicy::RoundRobin { slots: 3 }, None);
        let offsets: Vec<f32> = (0..5).map(|_| cursor.next_offset(50.0)).collect();
        assert_eq!(offsets, vec![0.0, 50.0, 100.0, 0.0, 50.0]);
    }

    #[test]
    fn round_robin_mod_two_alternates() {
        let mut cursor = SpawnCursor::new(SpawnOffsetPolicy::RoundRobin { slots: 2 }, None);
        let offsets: Vec<f32> = (0..4).map(|_| cursor.next_offset(40.0)).collect();
        assert_eq!(offsets, vec![0.0, 40.0, 0.0, 40.0]);
    }

    #[test]
    fn random_offsets_stay_in_range_and_follow_seed() {
        let policy = SpawnOffsetPolicy::Random { max_offset: 80.0 };
        let mut a = SpawnCursor::new(policy, Some(7));
        let mut b = SpawnCursor::new(policy, Some(7));
        for _ in 0..50 {
            let offset = a.next_offset(50.0);
            assert!((0.0..80.0).contains(&offset), "offset {offset} out of range");
            assert_eq!(offset, b.next_offset(50.0));
        }
    }

    #[test]
    fn random_with_zero_range_is_zero() {
        let mut cursor = SpawnCursor::new(SpawnOffsetPolicy::Random { max_offset: 0.0 }, None);
        assert_eq!(cursor.next_offset(50.0), 0.0);
    }

    #[test]
    fn spawn_registers_body_and_record_together() {
        let config = SimConfig::default();
        let mut world = PhysicsWorld::new(Vec2::new(0.0, config.gravity));
        let mut registry = BodyRegistry::with_capacity(config.max_bodies);
        let mut cursor = SpawnCursor::new(config.spawn_offset, None);

        let outcome = spawn_box(&mut world, &mut registry, &mut cursor, &config);

        assert_eq!(registry.len(), 1);
        assert_eq!(world.body_count(), 1);
        assert_eq!(outcome.recycled, None);
        let pose = world.pose(outcome.body).unwrap();
        assert_eq!(pose.x, config.spawn_base_x());
        assert_eq!(pose.y, config.spawn_base_y);
        assert_eq!(
            registry.record_for(outcome.body).unwrap().position(),
            Vec2::new(pose.x, pose.y)
        );
    }

    #[test]
    fn full_registry_recycles_oldest_box() {
        let config = SimConfig {
            max_bodies: 2,
            ..Default::default()
        };
        let mut world = PhysicsWorld::new(Vec2::new(0.0, config.gravity));
        let mut registry = BodyRegistry::with_capacity(config.max_bodies);
        let mut cursor = SpawnCursor::new(config.spawn_offset, None);

        let first = spawn_box(&mut world, &mut registry, &mut cursor, &config);
        let second = spawn_box(&mut world, &mut registry, &mut cursor, &config);
        let third = spawn_box(&mut world, &mut registry, &mut cursor, &config);

        assert_eq!(second.recycled, None);
        assert_eq!(third.recycled, Some(first.body));
        assert_eq!(registry.len(), 2);
        assert_eq!(world.body_count(), 2);
        assert!(!world.contains(first.body));
    }
}
