mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod player;
mod progression;
mod rewards;
mod timing;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Spellrunner".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        content::ContentPlugin,
        core::CorePlugin,
        player::PlayerPlugin,
        combat::CombatPlugin,
        progression::ProgressionPlugin,
        rewards::RewardsPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
