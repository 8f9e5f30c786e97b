//! Core domain: events for run flow and scene changes.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Event fired once when a player's health reaches zero
#[derive(Debug)]
pub struct PlayerDiedEvent {
    pub player: Entity,
}

impl Message for PlayerDiedEvent {}

/// Event fired after a scene has been loaded
#[derive(Debug)]
pub struct SceneChangedEvent {
    pub scene: String,
}

impl Message for SceneChangedEvent {}

/// Requests to drive the run from outside the run manager (portals, menus,
/// debug hotkeys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    StartGame { map: u32 },
    NextStage,
    RestartMap,
    ReturnToLobby,
}

impl Message for RunCommand {}
