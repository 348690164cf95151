//! Headless lifecycle tests for [`SimulationPlugin`].
//!
//! The app runs with [`MinimalPlugins`] and no renderer; the simulation
//! context is a plain resource, so everything here is observable through
//! the `World`.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use boxfall::config::SimConfig;
use boxfall::menu::GameState;
use boxfall::simulation::{LaunchRequest, SimulationContext, SimulationPlugin, SpawnBoxRequest};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn app_in_main_menu() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(SimConfig::default());
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

fn enter(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

fn app_playing() -> App {
    let mut app = app_in_main_menu();
    enter(&mut app, GameState::Playing);
    app
}

fn context(app: &App) -> &SimulationContext {
    app.world().resource::<SimulationContext>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn no_context_in_main_menu() {
    let app = app_in_main_menu();
    assert!(app.world().get_resource::<SimulationContext>().is_none());
}

#[test]
fn entering_playing_builds_context_with_sleeping_ball() {
    let app = app_playing();
    let context = context(&app);
    assert_eq!(context.registry().len(), 1);
    let ball = context.world().state(context.ball()).unwrap();
    assert!(ball.sleeping, "ball must stay asleep until launched");
}

#[test]
fn frames_advance_once_per_update() {
    let mut app = app_playing();
    let before = context(&app).frames();
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(context(&app).frames(), before + 5);
}

#[test]
fn spawn_requests_register_boxes() {
    let mut app = app_playing();
    for _ in 0..3 {
        app.world_mut().write_message(SpawnBoxRequest);
    }
    app.update();

    let context = context(&app);
    assert_eq!(context.registry().len(), 4);
    assert_eq!(
        context.registry().records().filter(|r| r.is_box()).count(),
        3
    );
}

#[test]
fn launch_request_wakes_the_ball() {
    let mut app = app_playing();
    app.world_mut().write_message(LaunchRequest);
    app.update();

    let context = context(&app);
    let ball = context.world().state(context.ball()).unwrap();
    assert!(!ball.sleeping);
    assert!(ball.linvel.x > 0.0, "ball should be heading right");
}

#[test]
fn leaving_playing_tears_the_context_down() {
    let mut app = app_playing();
    app.world_mut().write_message(SpawnBoxRequest);
    app.update();

    enter(&mut app, GameState::MainMenu);
    assert!(app.world().get_resource::<SimulationContext>().is_none());

    // Frame systems are gated on the context; further frames must be inert.
    app.update();
    app.update();
}

#[test]
fn re_entering_playing_starts_a_fresh_scene() {
    let mut app = app_playing();
    for _ in 0..2 {
        app.world_mut().write_message(SpawnBoxRequest);
    }
    app.update();
    assert_eq!(context(&app).registry().len(), 3);

    enter(&mut app, GameState::MainMenu);
    enter(&mut app, GameState::Playing);

    let context = context(&app);
    assert_eq!(context.registry().len(), 1);
    assert!(context.frames() <= 1);
}
