//! Runtime simulation configuration loaded from `assets/sim.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  Before the app starts, [`load_sim_config`] reads
//! `assets/sim.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! frame_clock = "accumulated"
//!
//! [spawn_offset]
//! kind = "random"
//! max_offset = 80.0
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `SimConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_at_least, validate_non_negative, validate_positive, validate_unit_interval,
    SimResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Where on disk the optional override file lives, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/sim.toml";

/// How the horizontal spawn offset is chosen for each new box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnOffsetPolicy {
    /// Cycle through `slots` positions, one box-width apart, starting at zero.
    RoundRobin { slots: u32 },
    /// Uniform offset in `[0, max_offset)`.
    Random {
        #[serde(default = "default_random_max_offset")]
        max_offset: f32,
    },
}

fn default_random_max_offset() -> f32 {
    RANDOM_MAX_OFFSET
}

impl Default for SpawnOffsetPolicy {
    fn default() -> Self {
        SpawnOffsetPolicy::RoundRobin {
            slots: ROUND_ROBIN_SLOTS,
        }
    }
}

/// How displayed frames translate into physics steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameClockMode {
    /// Exactly one `fixed_dt` step per frame, whatever the wall time.
    #[default]
    Fixed,
    /// Accumulate wall time and consume it in `fixed_dt` steps.
    Accumulated,
}

/// Runtime-tunable simulation configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Surface ──────────────────────────────────────────────────────────────
    pub surface_width: f32,
    pub surface_height: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub fixed_dt: f32,
    pub max_substeps: u32,
    pub frame_clock: FrameClockMode,
    pub restitution: f32,

    // ── Bodies ───────────────────────────────────────────────────────────────
    pub box_size: f32,
    pub ball_radius: f32,
    pub ball_start_x_fraction: f32,
    pub ball_start_y_fraction: f32,
    pub max_bodies: usize,

    // ── Spawn ────────────────────────────────────────────────────────────────
    pub spawn_center_offset: f32,
    pub spawn_base_y: f32,
    pub spawn_offset: SpawnOffsetPolicy,
    /// Seed for the random offset policy; `None` seeds from entropy.
    pub rng_seed: Option<u64>,

    // ── Launch ───────────────────────────────────────────────────────────────
    pub launch_angular_velocity: f32,
    pub launch_linear_velocity: [f32; 2],

    // ── Static geometry ──────────────────────────────────────────────────────
    pub wall_thickness: f32,
    pub floor_thickness: f32,
    pub ground_height: f32,

    // ── Rendering ────────────────────────────────────────────────────────────
    pub stroke_width: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Surface
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            // Physics
            gravity: GRAVITY,
            fixed_dt: FIXED_DT,
            max_substeps: MAX_SUBSTEPS,
            frame_clock: FrameClockMode::default(),
            restitution: RESTITUTION,
            // Bodies
            box_size: BOX_SIZE,
            ball_radius: BALL_RADIUS,
            ball_start_x_fraction: BALL_START_X_FRACTION,
            ball_start_y_fraction: BALL_START_Y_FRACTION,
            max_bodies: MAX_BODIES,
            // Spawn
            spawn_center_offset: SPAWN_CENTER_OFFSET,
            spawn_base_y: SPAWN_BASE_Y,
            spawn_offset: SpawnOffsetPolicy::default(),
            rng_seed: None,
            // Launch
            launch_angular_velocity: LAUNCH_ANGULAR_VELOCITY,
            launch_linear_velocity: LAUNCH_LINEAR_VELOCITY,
            // Static geometry
            wall_thickness: WALL_THICKNESS,
            floor_thickness: FLOOR_THICKNESS,
            ground_height: GROUND_HEIGHT,
            // Rendering
            stroke_width: STROKE_WIDTH,
        }
    }
}

impl SimConfig {
    /// Horizontal spawn base in surface coordinates.
    #[inline]
    pub fn spawn_base_x(&self) -> f32 {
        self.surface_width / 2.0 + self.spawn_center_offset
    }

    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config = toml::from_str::<SimConfig>(contents).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("surface_width", self.surface_width)?;
        validate_positive("surface_height", self.surface_height)?;
        validate_positive("fixed_dt", self.fixed_dt)?;
        validate_at_least(
            "max_substeps",
            self.max_substeps as usize,
            1,
            "[1, ∞)",
        )?;
        validate_unit_interval("restitution", self.restitution)?;
        validate_positive("box_size", self.box_size)?;
        validate_positive("ball_radius", self.ball_radius)?;
        validate_at_least("max_bodies", self.max_bodies, MIN_BODIES, "[2, ∞)")?;
        match self.spawn_offset {
            SpawnOffsetPolicy::RoundRobin { slots } => {
                validate_at_least("spawn_offset.slots", slots as usize, 1, "[1, ∞)")?
            }
            SpawnOffsetPolicy::Random { max_offset } => {
                validate_non_negative("spawn_offset.max_offset", max_offset)?
            }
        }
        validate_non_negative("wall_thickness", self.wall_thickness)?;
        validate_non_negative("floor_thickness", self.floor_thickness)?;
        validate_non_negative("ground_height", self.ground_height)?;
        validate_positive("stroke_width", self.stroke_width)?;
        Ok(())
    }
}

/// Read `assets/sim.toml` on top of the compiled defaults.
///
/// Runs once in `main`, before the window is created, so the window can be
/// sized from the loaded surface dimensions.  Missing keys retain their
/// compiled defaults.  Parse and validation errors are printed to stderr and
/// fall back to the defaults; a missing file is not an error.  The logger is
/// not installed yet at this point.
pub fn load_sim_config() -> SimConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match SimConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                println!("✓ Loaded sim config from {CONFIG_PATH}");
                loaded
            }
            Err(e) => {
                eprintln!("⚠ Failed to load {CONFIG_PATH}: {e}; using defaults");
                SimConfig::default()
            }
        },
        Err(_) => {
            // No override file.
            println!("ℹ No {CONFIG_PATH} found; using compiled defaults");
            SimConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = SimConfig::from_toml_str(
            r#"
            box_size = 40.0
            frame_clock = "accumulated"

            [spawn_offset]
            kind = "random"
            max_offset = 80.0
            "#,
        )
        .unwrap();

        assert_eq!(config.box_size, 40.0);
        assert_eq!(config.frame_clock, FrameClockMode::Accumulated);
        assert_eq!(
            config.spawn_offset,
            SpawnOffsetPolicy::Random { max_offset: 80.0 }
        );
        assert_eq!(config.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn random_policy_without_range_uses_default_range() {
        let config = SimConfig::from_toml_str(
            r#"
            [spawn_offset]
            kind = "random"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.spawn_offset,
            SpawnOffsetPolicy::Random {
                max_offset: RANDOM_MAX_OFFSET
            }
        );
    }

    #[test]
    fn round_robin_with_zero_slots_is_rejected() {
        let err = SimConfig::from_toml_str(
            r#"
            [spawn_offset]
            kind = "round_robin"
            slots = 0
            "#,
        )
        .unwrap_err();
        assert!(err.contains("spawn_offset.slots"), "got: {err}");
    }

    #[test]
    fn restitution_above_one_is_rejected() {
        let config = SimConfig {
            restitution: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn spawn_base_x_is_relative_to_centre() {
        let config = SimConfig::default();
        assert_eq!(config.spawn_base_x(), SURFACE_WIDTH / 2.0 + SPAWN_CENTER_OFFSET);
    }
}
