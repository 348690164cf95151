//! Renderable records: the drawing-facing mirror of each registered body.
//!
//! A record never reads from Rapier on its own.  The synchronization loop
//! pushes a [`BodyPose`] into it once per frame, and the render surface only
//! ever sees records.

use crate::physics::BodyPose;
use bevy::math::Vec2;

/// Box mirror.
///
/// `(x, y)` anchors the rectangle the way a canvas does, and the rectangle is
/// rotated by `angle` about `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRecord {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    /// Always `(x + width / 2, y + height / 2)`.
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl BoxRecord {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            angle: 0.0,
            origin: Self::center_of(x, y, width, height),
            width,
            height,
        }
    }

    #[inline]
    fn center_of(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        Vec2::new(x + width / 2.0, y + height / 2.0)
    }

    pub fn set_pose(&mut self, pose: BodyPose) {
        self.x = pose.x;
        self.y = pose.y;
        self.angle = pose.angle;
        self.origin = Self::center_of(self.x, self.y, self.width, self.height);
    }
}

/// Ball mirror; circles are centre-anchored so no origin is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallRecord {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl BallRecord {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

/// A single renderable record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderRecord {
    Box(BoxRecord),
    Ball(BallRecord),
}

impl RenderRecord {
    /// Copy the engine's pose into this record.
    ///
    /// Balls ignore the angle; boxes also refresh their rotation origin.
    pub fn apply_pose(&mut self, pose: BodyPose) {
        match self {
            RenderRecord::Box(record) => record.set_pose(pose),
            RenderRecord::Ball(record) => {
                record.x = pose.x;
                record.y = pose.y;
            }
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        match self {
            RenderRecord::Box(record) => Vec2::new(record.x, record.y),
            RenderRecord::Ball(record) => Vec2::new(record.x, record.y),
        }
    }

    #[inline]
    pub fn is_box(&self) -> bool {
        matches!(self, RenderRecord::Box(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_box_origin_is_centre() {
        let record = BoxRecord::new(10.0, 20.0, 50.0, 30.0);
        assert_eq!(record.origin, Vec2::new(35.0, 35.0));
        assert_eq!(record.angle, 0.0);
    }

    #[test]
    fn box_pose_update_recomputes_origin() {
        let mut record = RenderRecord::Box(BoxRecord::new(0.0, 0.0, 50.0, 50.0));
        record.apply_pose(BodyPose {
            x: 100.0,
            y: 200.0,
            angle: 0.3,
        });
        let RenderRecord::Box(b) = record else {
            panic!("expected box record");
        };
        assert_eq!((b.x, b.y, b.angle), (100.0, 200.0, 0.3));
        assert_eq!(b.origin, Vec2::new(125.0, 225.0));
    }

    #[test]
    fn ball_pose_update_copies_position_only() {
        let mut record = RenderRecord::Ball(BallRecord::new(0.0, 0.0, 30.0));
        record.apply_pose(BodyPose {
            x: 7.0,
            y: 9.0,
            angle: 1.2,
        });
        assert_eq!(record, RenderRecord::Ball(BallRecord::new(7.0, 9.0, 30.0)));
        assert_eq!(record.position(), Vec2::new(7.0, 9.0));
        assert!(!record.is_box());
    }
}
