//! Title screen and the two-state flow around it.
//!
//! `MainMenu` shows a title card with START and QUIT.  START moves to
//! `Playing`, where the simulation, HUD and scene visuals mount themselves on
//! `OnEnter(Playing)` and unmount on `OnExit(Playing)`.  `Esc` in `Playing`
//! comes back here.

use bevy::prelude::*;

/// Top-level application state.
///
/// The simulation context only exists in `Playing`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
}

/// Root of the title card; despawned with its children on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// What a title-card button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [MenuAction::Start, MenuAction::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Start => "START",
            MenuAction::Quit => "QUIT",
        }
    }

    /// `(fill, border, text)`
    fn palette(self) -> (Color, Color, Color) {
        match self {
            MenuAction::Start => (
                Color::srgb(0.06, 0.30, 0.06),
                Color::srgb(0.196, 0.804, 0.196),
                Color::srgb(0.80, 1.0, 0.80),
            ),
            MenuAction::Quit => (
                Color::srgb(0.22, 0.22, 0.22),
                Color::srgb(0.5, 0.5, 0.5),
                Color::srgb(0.85, 0.85, 0.85),
            ),
        }
    }
}

pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                menu_button_system.run_if(in_state(GameState::MainMenu)),
            );
    }
}

fn label_font(size: f32) -> TextFont {
    TextFont {
        font_size: size,
        ..default()
    }
}

/// Title, tagline, one button per [`MenuAction`], then a key hint, stacked
/// in a centred column.
pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|column| {
            column.spawn((
                Text::new("BOXFALL"),
                label_font(56.0),
                TextColor(Color::srgb(0.196, 0.804, 0.196)),
            ));
            column.spawn((
                Text::new("Stack the boxes, then knock them over"),
                label_font(16.0),
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(36.0)),
                    ..default()
                },
            ));

            for action in MenuAction::ALL {
                let (fill, border, text) = action.palette();
                column
                    .spawn((
                        Button,
                        Node {
                            width: Val::Px(200.0),
                            height: Val::Px(48.0),
                            border: UiRect::all(Val::Px(2.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(fill),
                        BorderColor::all(border),
                        action,
                    ))
                    .with_child((Text::new(action.label()), label_font(20.0), TextColor(text)));
            }

            column.spawn((
                Text::new("B  add box    Space  launch    Esc  menu"),
                label_font(12.0),
                TextColor(Color::srgb(0.35, 0.35, 0.35)),
                Node {
                    margin: UiRect::top(Val::Px(36.0)),
                    ..default()
                },
            ));
        });
}

pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// START enters `Playing`, QUIT exits the app.  Hovered labels turn white.
pub fn menu_button_system(
    query: Query<(&Interaction, &MenuAction, &Children), Changed<Interaction>>,
    mut labels: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, action, children) in query.iter() {
        let tint = match (interaction, action) {
            (Interaction::Pressed, MenuAction::Start) => {
                info!("Starting simulation");
                next_state.set(GameState::Playing);
                continue;
            }
            (Interaction::Pressed, MenuAction::Quit) => {
                exit.write(AppExit::Success);
                continue;
            }
            (Interaction::Hovered, _) => Color::WHITE,
            (Interaction::None, _) => action.palette().2,
        };
        for child in children.iter() {
            if let Ok(mut color) = labels.get_mut(child) {
                color.0 = tint;
            }
        }
    }
}
