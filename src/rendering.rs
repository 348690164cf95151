//! Render surface: turns the current records into shapes and paints them.
//!
//! ## Layer Model
//!
//! | Layer          | Technology | Source record          |
//! |----------------|------------|------------------------|
//! | Ground strip   | `Mesh2d`   | fixed ground record    |
//! | Ball           | `Mesh2d`   | ball record            |
//! | Box outlines   | Gizmos     | box records            |
//!
//! [`draw_list`] is a pure function of the simulation context.  The systems
//! below only map its output from surface space (top-left origin, `y` down)
//! into Bevy world space (centre origin, `y` up) and hand it to the GPU.

use crate::config::SimConfig;
use crate::menu::GameState;
use crate::record::RenderRecord;
use crate::simulation::{self, SimulationContext};
use bevy::math::{Isometry2d, Rot2};
use bevy::prelude::*;

// ── Colours ───────────────────────────────────────────────────────────────────

pub fn body_color() -> Color {
    Color::srgb(0.196, 0.804, 0.196)
}
pub fn ground_color() -> Color {
    Color::srgb(0.5, 0.5, 0.5)
}

// ── Draw list ─────────────────────────────────────────────────────────────────

/// One primitive in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawShape {
    /// Outline rotated by `angle` about `center`.
    StrokedRect { center: Vec2, size: Vec2, angle: f32 },
    FilledCircle { center: Vec2, radius: f32 },
    FilledRect { center: Vec2, size: Vec2 },
}

/// Everything to paint this frame, back to front.
///
/// Box records are anchored at their top-left corner, which sits on the
/// collider centre, so outlines land half a box down and right of the body.
/// The ball gets the same shift so both rest on the drawn ground line.
pub fn draw_list(context: &SimulationContext) -> Vec<DrawShape> {
    let ground = context.ground();
    let anchor_shift = Vec2::splat(context.config().box_size / 2.0);
    let mut shapes = Vec::with_capacity(context.registry().len() + 1);
    shapes.push(DrawShape::FilledRect {
        center: ground.origin,
        size: Vec2::new(ground.width, ground.height),
    });
    for record in context.registry().records() {
        shapes.push(match *record {
            RenderRecord::Box(b) => DrawShape::StrokedRect {
                center: b.origin,
                size: Vec2::new(b.width, b.height),
                angle: b.angle,
            },
            RenderRecord::Ball(b) => DrawShape::FilledCircle {
                center: Vec2::new(b.x, b.y) + anchor_shift,
                radius: b.radius,
            },
        });
    }
    shapes
}

/// Map a surface point to Bevy world space for a camera centred on the surface.
#[inline]
pub fn surface_to_world(point: Vec2, surface: Vec2) -> Vec2 {
    Vec2::new(point.x - surface.x / 2.0, surface.y / 2.0 - point.y)
}

// ── Components ────────────────────────────────────────────────────────────────

/// Any entity spawned for the scene; despawned on `OnExit(Playing)`.
#[derive(Component)]
pub struct SceneVisual;

/// Retained mesh that follows the ball record.
#[derive(Component)]
pub struct BallVisual;

/// Retained mesh for the ground strip.
#[derive(Component)]
pub struct GroundVisual;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_gizmos)
            .add_systems(OnEnter(GameState::Playing), setup_scene_visuals)
            .add_systems(OnExit(GameState::Playing), cleanup_scene_visuals)
            .add_systems(
                Update,
                draw_system
                    .after(simulation::frame_system)
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_exists::<SimulationContext>),
            );
    }
}

/// Apply the configured outline width to the default gizmo group.
pub fn configure_gizmos(mut store: ResMut<GizmoConfigStore>, config: Res<SimConfig>) {
    let (gizmo_config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    gizmo_config.line.width = config.stroke_width;
}

/// Spawn the retained meshes for the ground and the ball.
pub fn setup_scene_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<SimConfig>,
) {
    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(config.surface_width, config.ground_height))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(ground_color()))),
        Transform::default(),
        GroundVisual,
        SceneVisual,
    ));
    commands.spawn((
        Mesh2d(meshes.add(Circle::new(config.ball_radius))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(body_color()))),
        Transform::from_xyz(0.0, 0.0, 1.0),
        BallVisual,
        SceneVisual,
    ));
}

pub fn cleanup_scene_visuals(mut commands: Commands, query: Query<Entity, With<SceneVisual>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Paint the current draw list: strokes via gizmos, fills by moving meshes.
#[allow(clippy::type_complexity)]
pub fn draw_system(
    context: Res<SimulationContext>,
    mut gizmos: Gizmos,
    mut ball: Query<&mut Transform, (With<BallVisual>, Without<GroundVisual>)>,
    mut ground: Query<&mut Transform, (With<GroundVisual>, Without<BallVisual>)>,
) {
    let surface = context.surface_size();
    for shape in draw_list(&context) {
        match shape {
            DrawShape::StrokedRect {
                center,
                size,
                angle,
            } => {
                // y flips between spaces, so rotation direction flips too.
                let isometry =
                    Isometry2d::new(surface_to_world(center, surface), Rot2::radians(-angle));
                gizmos.rect_2d(isometry, size, body_color());
            }
            DrawShape::FilledCircle { center, .. } => {
                if let Ok(mut transform) = ball.single_mut() {
                    let world = surface_to_world(center, surface);
                    transform.translation.x = world.x;
                    transform.translation.y = world.y;
                }
            }
            DrawShape::FilledRect { center, .. } => {
                if let Ok(mut transform) = ground.single_mut() {
                    let world = surface_to_world(center, surface);
                    transform.translation.x = world.x;
                    transform.translation.y = world.y;
                }
            }
        }
    }
}
