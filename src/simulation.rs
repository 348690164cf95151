//! Simulation context, request messages, and the Bevy plugin that drives them.
//!
//! ## Lifecycle
//!
//! | Schedule              | System                     | Purpose                                 |
//! |-----------------------|----------------------------|-----------------------------------------|
//! | `OnEnter(Playing)`    | `setup_simulation`         | Build world, statics, ball, registry    |
//! | `Update / Playing`    | `apply_requests_system`    | Run spawn / launch requests             |
//! | `Update / Playing`    | `frame_system`             | Step physics, then sync records         |
//! | `OnExit(Playing)`     | `teardown_simulation`      | Drop the context; frame work stops      |
//!
//! The context is a resource that only exists while `Playing`, and the frame
//! system is gated on it, so nothing keeps stepping once the view is gone.

use crate::config::SimConfig;
use crate::constants::MIN_BODIES;
use crate::error::SimResult;
use crate::launch::{launch, LaunchParams};
use crate::menu::GameState;
use crate::physics::PhysicsWorld;
use crate::record::{BallRecord, BoxRecord, RenderRecord};
use crate::registry::BodyRegistry;
use crate::spawn::{spawn_box, SpawnCursor, SpawnOutcome};
use crate::sync::{advance_frame, FrameClock};
use bevy::prelude::*;
use bevy_rapier2d::rapier::prelude::RigidBodyHandle;

// ── Request messages ──────────────────────────────────────────────────────────

/// "ADD BOX" was triggered.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct SpawnBoxRequest;

/// "LAUNCH" was triggered.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct LaunchRequest;

// ── Context ───────────────────────────────────────────────────────────────────

/// Everything one running simulation owns.
///
/// Built from a [`SimConfig`] snapshot; later config changes do not affect a
/// context that already exists.
#[derive(Resource)]
pub struct SimulationContext {
    config: SimConfig,
    world: PhysicsWorld,
    registry: BodyRegistry,
    ball: RigidBodyHandle,
    ground: BoxRecord,
    cursor: SpawnCursor,
    clock: FrameClock,
    launch: LaunchParams,
    frames: u64,
}

impl SimulationContext {
    /// Build the arena walls, the sleeping ball and an empty box registry.
    pub fn new(config: &SimConfig) -> Self {
        let width = config.surface_width;
        let height = config.surface_height;
        let wall = config.wall_thickness;

        let mut world = PhysicsWorld::new(Vec2::new(0.0, config.gravity));

        // Static geometry: never registered, never synced.
        world.add_static_rect(
            Vec2::new(width / 2.0, height - wall / 2.0),
            Vec2::new(width, config.floor_thickness),
        );
        world.add_static_rect(Vec2::new(width / 2.0, wall), Vec2::new(width * 2.0, wall));
        world.add_static_rect(Vec2::new(0.0, 0.0), Vec2::new(wall, height * 2.0));
        world.add_static_rect(Vec2::new(width, 0.0), Vec2::new(wall, height * 2.0));

        let ball_pos = Vec2::new(
            width * config.ball_start_x_fraction,
            height * config.ball_start_y_fraction,
        );
        let ball = world.add_circle(ball_pos, config.ball_radius, config.restitution, true);

        // An unvalidated config may ask for room below the ball plus one box.
        let mut registry = BodyRegistry::with_capacity(config.max_bodies.max(MIN_BODIES));
        registry.push(
            ball,
            RenderRecord::Ball(BallRecord::new(ball_pos.x, ball_pos.y, config.ball_radius)),
        );

        Self {
            config: config.clone(),
            world,
            registry,
            ball,
            ground: BoxRecord::new(
                0.0,
                height - config.ground_height,
                width,
                config.ground_height,
            ),
            cursor: SpawnCursor::new(config.spawn_offset, config.rng_seed),
            clock: FrameClock::new(config.frame_clock, config.fixed_dt, config.max_substeps),
            launch: LaunchParams::from_config(config),
            frames: 0,
        }
    }

    /// Step physics for one displayed frame and refresh every record.
    pub fn advance_frame(&mut self, elapsed: f32) -> u32 {
        self.frames += 1;
        advance_frame(&mut self.world, &mut self.registry, &mut self.clock, elapsed)
    }

    /// Spawn one box near the top centre.
    pub fn spawn_box(&mut self) -> SpawnOutcome {
        spawn_box(
            &mut self.world,
            &mut self.registry,
            &mut self.cursor,
            &self.config,
        )
    }

    /// Wake the ball and overwrite its velocities with the configured launch.
    pub fn launch_ball(&mut self) -> SimResult<()> {
        launch(&mut self.world, self.ball, self.launch)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    #[inline]
    pub fn ball(&self) -> RigidBodyHandle {
        self.ball
    }

    /// Fixed record the ground strip is drawn from.
    pub fn ground(&self) -> &BoxRecord {
        &self.ground
    }

    #[inline]
    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.config.surface_width, self.config.surface_height)
    }

    /// Frames advanced since the context was built.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the request messages and the context lifecycle.
///
/// Expects `GameState` to be registered already (see
/// [`crate::menu::MainMenuPlugin`]).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .add_message::<SpawnBoxRequest>()
            .add_message::<LaunchRequest>()
            .add_systems(OnEnter(GameState::Playing), setup_simulation)
            .add_systems(OnExit(GameState::Playing), teardown_simulation)
            .add_systems(
                Update,
                (apply_requests_system, frame_system)
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_exists::<SimulationContext>),
            );
    }
}

/// Build a fresh context from the current config.
pub fn setup_simulation(mut commands: Commands, config: Res<SimConfig>) {
    commands.insert_resource(SimulationContext::new(&config));
    info!(
        "Simulation started: {}x{} surface, {:?} clock, capacity {}",
        config.surface_width, config.surface_height, config.frame_clock, config.max_bodies
    );
}

/// Drop the context so no frame work outlives the view.
pub fn teardown_simulation(mut commands: Commands, context: Option<Res<SimulationContext>>) {
    if let Some(context) = context {
        info!(
            "Simulation stopped after {} frames with {} bodies",
            context.frames(),
            context.registry().len()
        );
    }
    commands.remove_resource::<SimulationContext>();
}

/// Apply every pending spawn and launch request before the frame step.
pub fn apply_requests_system(
    mut context: ResMut<SimulationContext>,
    mut spawns: MessageReader<SpawnBoxRequest>,
    mut launches: MessageReader<LaunchRequest>,
) {
    for _ in spawns.read() {
        let outcome = context.spawn_box();
        if let Some(recycled) = outcome.recycled {
            info!("Registry full; recycled box {:?}", recycled);
        }
        debug!(
            "Spawned box {:?} at offset {:.1} ({} registered)",
            outcome.body,
            outcome.offset,
            context.registry().len()
        );
    }

    for _ in launches.read() {
        match context.launch_ball() {
            Ok(()) => debug!("Ball launched"),
            Err(err) => error!("Launch failed: {err}"),
        }
    }
}

/// Advance physics by the frame clock and copy poses into records.
pub fn frame_system(time: Res<Time>, mut context: ResMut<SimulationContext>) {
    context.advance_frame(time.delta_secs());
}
