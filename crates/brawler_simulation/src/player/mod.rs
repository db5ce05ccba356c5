//! Player module (input adapter)

use bevy::prelude::*;

use crate::TickSet;

pub mod player;

pub use player::{apply_player_input, Player, PlayerInput};

/// Plugin: player input → intents
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_player_input.in_set(TickSet::Intent));
    }
}
