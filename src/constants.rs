//! Centralised simulation and layout constants.
//!
//! Every tuneable value lives here so it can be found and changed in one place.
//! [`crate::config::SimConfig::default`] mirrors these values; a
//! `assets/sim.toml` file can override any subset at startup.
//!
//! All lengths are surface pixels.  The surface origin is the top-left corner
//! and `y` grows downward, so positive gravity pulls toward the bottom edge.

// ── Surface ───────────────────────────────────────────────────────────────────

/// Width of the drawing surface and of the physics arena.
pub const SURFACE_WIDTH: f32 = 420.0;

/// Height of the drawing surface and of the physics arena.
pub const SURFACE_HEIGHT: f32 = 860.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward acceleration in px/s².
pub const GRAVITY: f32 = 980.0;

/// Nominal physics step: one display refresh at 60 Hz.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Upper bound on physics steps per frame in accumulated mode.
///
/// Wall time beyond `FIXED_DT * MAX_SUBSTEPS` in a single frame is dropped
/// rather than replayed, so a long stall cannot snowball into a longer one.
pub const MAX_SUBSTEPS: u32 = 4;

/// Bounciness shared by every dynamic body.
pub const RESTITUTION: f32 = 0.9;

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Side length of a spawned box.
pub const BOX_SIZE: f32 = 50.0;

/// Radius of the launchable ball.
pub const BALL_RADIUS: f32 = 30.0;

/// Ball start position as a fraction of the surface size.
pub const BALL_START_X_FRACTION: f32 = 0.12;
pub const BALL_START_Y_FRACTION: f32 = 0.85;

/// Most registry entries (ball included) alive at once.
///
/// Spawning past this recycles the oldest box.
pub const MAX_BODIES: usize = 200;

/// Smallest usable capacity: the ball plus one box.
pub const MIN_BODIES: usize = 2;

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Horizontal spawn base relative to the surface centre.
pub const SPAWN_CENTER_OFFSET: f32 = -20.0;

/// Spawn height measured from the top edge.
pub const SPAWN_BASE_Y: f32 = 200.0;

/// Slot count for the round-robin offset policy.
pub const ROUND_ROBIN_SLOTS: u32 = 3;

/// Default upper bound (exclusive) for the random offset policy.
pub const RANDOM_MAX_OFFSET: f32 = 100.0;

// ── Launch ────────────────────────────────────────────────────────────────────

/// Angular velocity written on launch (rad/s).
pub const LAUNCH_ANGULAR_VELOCITY: f32 = 5.0;

/// Linear velocity written on launch (px/s).
pub const LAUNCH_LINEAR_VELOCITY: [f32; 2] = [63.0, 0.0];

// ── Static geometry ───────────────────────────────────────────────────────────

/// Thickness of the top, left and right walls.
pub const WALL_THICKNESS: f32 = 10.0;

/// Thickness of the physics floor slab.
///
/// The slab is centred `WALL_THICKNESS / 2` above the bottom edge so that most
/// of it sits below the visible surface.
pub const FLOOR_THICKNESS: f32 = 160.0;

/// Height of the drawn ground strip at the bottom of the surface.
pub const GROUND_HEIGHT: f32 = 60.0;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Stroke width of box outlines.
pub const STROKE_WIDTH: f32 = 3.0;
