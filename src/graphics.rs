use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The camera sits at the world origin, which is the centre of the drawing
/// surface, so one world unit is one surface pixel at the default window size.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("Camera spawned");
}
