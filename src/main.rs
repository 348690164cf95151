use bevy::prelude::*;
use bevy::window::WindowResolution;

use boxfall::config;
use boxfall::graphics;
use boxfall::input::InputPlugin;
use boxfall::menu::MainMenuPlugin;
use boxfall::rendering::RenderingPlugin;
use boxfall::simulation::SimulationPlugin;

fn main() {
    let sim_config = config::load_sim_config();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Boxfall".into(),
            resolution: WindowResolution::new(
                sim_config.surface_width as u32,
                sim_config.surface_height as u32,
            ),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    .insert_resource(sim_config)
    // GameState must be registered before the plugins that hook its transitions.
    .add_plugins(MainMenuPlugin)
    .add_plugins((SimulationPlugin, InputPlugin, RenderingPlugin))
    .add_systems(Startup, graphics::setup_camera);

    app.run();
}
