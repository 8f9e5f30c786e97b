//! Debug domain: hotkey systems driving the run and the player.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{Bounty, DamageEvent, DamageSource, Damageable, ReloadPickup};
use crate::core::{RunCommand, SceneChangedEvent, SceneScoped};
use crate::player::Player;
use crate::progression::ActiveRun;
use crate::rewards::{Currency, CurrencyGainedEvent, CurrencySource};

const DUMMY_HEALTH: f32 = 100.0;
const DUMMY_RADIUS: f32 = 0.5;
const DUMMY_BOUNTY: u32 = 25;
const PICKUP_RADIUS: f32 = 0.75;

fn ctrl_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight)
}

/// Handle keyboard shortcuts for run and currency actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<Entity, With<Player>>,
    mut run_commands: MessageWriter<RunCommand>,
    mut currency: MessageWriter<CurrencyGainedEvent>,
    mut damage: MessageWriter<DamageEvent>,
) {
    if !ctrl_held(&keyboard) {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        currency.write(CurrencyGainedEvent {
            currency: Currency::Gold,
            amount: 100,
            source: CurrencySource::Debug,
        });
    }
    if keyboard.just_pressed(KeyCode::KeyH) {
        currency.write(CurrencyGainedEvent {
            currency: Currency::Gems,
            amount: 10,
            source: CurrencySource::Debug,
        });
    }

    let command = if keyboard.just_pressed(KeyCode::Digit1) {
        Some(RunCommand::StartGame { map: 1 })
    } else if keyboard.just_pressed(KeyCode::Digit2) {
        Some(RunCommand::StartGame { map: 2 })
    } else if keyboard.just_pressed(KeyCode::KeyN) {
        Some(RunCommand::NextStage)
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        Some(RunCommand::RestartMap)
    } else if keyboard.just_pressed(KeyCode::KeyL) {
        Some(RunCommand::ReturnToLobby)
    } else {
        None
    };
    if let Some(command) = command {
        info!("[DEBUG] {:?}", command);
        run_commands.write(command);
    }

    if keyboard.just_pressed(KeyCode::KeyK) {
        for player in &players {
            info!("[DEBUG] Killing player {:?}", player);
            damage.write(DamageEvent {
                target: player,
                amount: f32::MAX,
                source: DamageSource::Debug,
            });
        }
    }
}

/// Spawn combat props around the player
pub(crate) fn spawn_debug_props(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<&Transform, With<Player>>,
) {
    if !ctrl_held(&keyboard) {
        return;
    }
    let Some(player) = players.iter().next() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::KeyE) {
        let position = player.translation + Vec3::Z * 2.0;
        commands.spawn((
            Name::new("TrainingDummy"),
            Damageable::new(DUMMY_HEALTH, DUMMY_RADIUS),
            Bounty { gold: DUMMY_BOUNTY },
            SceneScoped,
            Transform::from_translation(position),
            Visibility::default(),
        ));
        info!("[DEBUG] Spawned training dummy at {:?}", position);
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        let position = player.translation + Vec3::X * 1.5;
        commands.spawn((
            Name::new("ReloadPickup"),
            ReloadPickup {
                radius: PICKUP_RADIUS,
            },
            SceneScoped,
            Transform::from_translation(position),
            Visibility::default(),
        ));
        info!("[DEBUG] Dropped reload pickup at {:?}", position);
    }
}

pub(crate) fn log_scene_changes(
    mut events: MessageReader<SceneChangedEvent>,
    run: Option<Res<ActiveRun>>,
) {
    for event in events.read() {
        match run.as_deref() {
            Some(run) => info!(
                "[DEBUG] Scene loaded: {} (run in progress: {}, respawn in {:?}s)",
                event.scene,
                run.is_game_in_progress(),
                run.respawn_pending()
            ),
            None => info!("[DEBUG] Scene loaded: {}", event.scene),
        }
    }
}
