//! Player-controlled entity components.

use bevy_ecs::prelude::*;

/// Marker component for the player-controlled entity. Players
/// participate in trades but never run behaviors themselves.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Status line shown to the player, updated whenever a pawn interacts
/// with them. The full history is retained in order.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerStatus {
    messages: Vec<String>,
}

impl PlayerStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Most recent status message, if any has been posted.
    pub fn latest(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
