//! Falling boxes and a launchable ball.
//!
//! Rapier owns the physics; this crate owns the glue around it: a body
//! registry pairing each body with a render record, a per-frame
//! synchronization loop, and the spawn and launch protocols behind the two
//! on-screen buttons.

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod input;
pub mod launch;
pub mod menu;
pub mod physics;
pub mod record;
pub mod registry;
pub mod rendering;
pub mod simulation;
pub mod spawn;
pub mod sync;
