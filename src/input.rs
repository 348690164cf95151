//! Input surface: the ADD BOX / LAUNCH buttons and their keyboard shortcuts.
//!
//! Both inputs only write request messages; the simulation applies them in
//! [`crate::simulation::apply_requests_system`] before the next frame step.
//!
//! | Trigger             | Message            |
//! |---------------------|--------------------|
//! | ADD BOX button, `B` | `SpawnBoxRequest`  |
//! | LAUNCH button, `␣`  | `LaunchRequest`    |
//! | `Esc`               | back to main menu  |

use crate::menu::GameState;
use crate::simulation::{self, LaunchRequest, SpawnBoxRequest};
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Root node of the in-game buttons; despawned on `OnExit(Playing)`.
#[derive(Component)]
pub struct HudRoot;

/// Which request a HUD button sends.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudButton {
    AddBox,
    Launch,
}

impl HudButton {
    fn label(self) -> &'static str {
        match self {
            HudButton::AddBox => "ADD BOX",
            HudButton::Launch => "LAUNCH",
        }
    }

    fn top(self) -> f32 {
        match self {
            HudButton::AddBox => 50.0,
            HudButton::Launch => 100.0,
        }
    }
}

fn button_bg() -> Color {
    Color::srgb(0.196, 0.804, 0.196)
}
fn button_text() -> Color {
    Color::BLACK
}
fn button_text_hover() -> Color {
    Color::WHITE
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(OnExit(GameState::Playing), cleanup_hud)
            .add_systems(
                Update,
                (
                    hud_button_system,
                    keyboard_shortcut_system,
                    back_to_menu_system,
                )
                    .before(simulation::apply_requests_system)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Spawn two full-width buttons near the top of the surface.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|root| {
            for button in [HudButton::AddBox, HudButton::Launch] {
                root.spawn((
                    Button,
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Px(button.top()),
                        left: Val::Px(0.0),
                        width: Val::Percent(100.0),
                        height: Val::Px(50.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(button_bg()),
                    button,
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new(button.label()),
                        TextFont {
                            font_size: 40.0,
                            ..default()
                        },
                        TextColor(button_text()),
                    ));
                });
            }
        });
}

pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Turn button presses into request messages; tint text on hover.
pub fn hud_button_system(
    query: Query<(&Interaction, &HudButton, &Children), Changed<Interaction>>,
    mut btn_text: Query<&mut TextColor>,
    mut spawns: MessageWriter<SpawnBoxRequest>,
    mut launches: MessageWriter<LaunchRequest>,
) {
    for (interaction, button, children) in query.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                match button {
                    HudButton::AddBox => {
                        spawns.write(SpawnBoxRequest);
                    }
                    HudButton::Launch => {
                        launches.write(LaunchRequest);
                    }
                }
                button_text_hover()
            }
            Interaction::Hovered => button_text_hover(),
            Interaction::None => button_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }
}

/// `B` spawns a box, `Space` launches the ball.
pub fn keyboard_shortcut_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut spawns: MessageWriter<SpawnBoxRequest>,
    mut launches: MessageWriter<LaunchRequest>,
) {
    if keys.just_pressed(KeyCode::KeyB) {
        spawns.write(SpawnBoxRequest);
    }
    if keys.just_pressed(KeyCode::Space) {
        launches.write(LaunchRequest);
    }
}

/// `Esc` while playing → main menu, which tears the simulation down.
pub fn back_to_menu_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::MainMenu);
    }
}
