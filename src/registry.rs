//! Body registry: pairs every registered Rapier body with its render record.
//!
//! The pairing lives in a single sequence of [`RegistryEntry`] values, so a
//! body and its record are always appended and removed together and the two
//! counts can never drift apart.  Static geometry is never registered.

use crate::record::RenderRecord;
use bevy_rapier2d::rapier::prelude::RigidBodyHandle;

/// One registered body and the record it drives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryEntry {
    pub body: RigidBodyHandle,
    pub record: RenderRecord,
}

/// Ordered, bounded collection of body/record pairs.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    entries: Vec<RegistryEntry>,
    capacity: usize,
}

impl BodyRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a pair.  Callers make room first with [`Self::evict_oldest_box`].
    pub fn push(&mut self, body: RigidBodyHandle, record: RenderRecord) {
        debug_assert!(!self.is_full(), "registry push past capacity");
        self.entries.push(RegistryEntry { body, record });
    }

    /// Remove the earliest-registered box entry, if any.
    ///
    /// Non-box entries (the ball) are never evicted.
    pub fn evict_oldest_box(&mut self) -> Option<RegistryEntry> {
        let index = self.entries.iter().position(|e| e.record.is_box())?;
        Some(self.entries.remove(index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [RegistryEntry] {
        &mut self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &RenderRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Record paired with `body`, if registered.
    pub fn record_for(&self, body: RigidBodyHandle) -> Option<&RenderRecord> {
        self.entries
            .iter()
            .find(|e| e.body == body)
            .map(|e| &e.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BallRecord, BoxRecord};

    fn handle(i: u32) -> RigidBodyHandle {
        RigidBodyHandle::from_raw_parts(i, 0)
    }

    fn boxed(x: f32) -> RenderRecord {
        RenderRecord::Box(BoxRecord::new(x, 0.0, 10.0, 10.0))
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut registry = BodyRegistry::with_capacity(4);
        assert!(registry.is_empty());
        registry.push(handle(0), RenderRecord::Ball(BallRecord::new(0.0, 0.0, 5.0)));
        registry.push(handle(1), boxed(1.0));
        registry.push(handle(2), boxed(2.0));

        let bodies: Vec<_> = registry.entries().iter().map(|e| e.body).collect();
        assert_eq!(bodies, vec![handle(0), handle(1), handle(2)]);
        assert_eq!(registry.records().count(), registry.len());
    }

    #[test]
    fn evict_skips_the_ball() {
        let mut registry = BodyRegistry::with_capacity(3);
        registry.push(handle(0), RenderRecord::Ball(BallRecord::new(0.0, 0.0, 5.0)));
        registry.push(handle(1), boxed(1.0));
        registry.push(handle(2), boxed(2.0));
        assert!(registry.is_full());

        let evicted = registry.evict_oldest_box().unwrap();
        assert_eq!(evicted.body, handle(1));
        assert_eq!(registry.len(), 2);
        assert!(registry.record_for(handle(0)).is_some());
        assert!(registry.record_for(handle(1)).is_none());
    }

    #[test]
    fn evict_with_only_ball_returns_none() {
        let mut registry = BodyRegistry::with_capacity(2);
        registry.push(handle(0), RenderRecord::Ball(BallRecord::new(0.0, 0.0, 5.0)));
        assert!(registry.evict_oldest_box().is_none());
        assert_eq!(registry.len(), 1);
    }
}
