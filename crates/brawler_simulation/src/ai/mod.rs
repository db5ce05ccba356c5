//! AI decision-making module
//!
//! Event-driven AI для side-scroller бойца:
//! - патруль по платформе, разворот на краю / у препятствия
//! - цель из sight/melee сенсоров, удар при входе врага в melee зону
//! - кулдауны повтора удара и подъёма блока

use bevy::prelude::*;

use crate::TickSet;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{AiBrain, AiState};
pub use systems::*;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. react_to_sensors, confirm_line_of_sight (Perception)
/// 2. tick_ai_timers (Timers) - разворот, повтор удара, блок
/// 3. drive_ai_motion (Intent) - brain → MovementIntent
/// 4. halt_cooldowns_on_attack, react_to_damage, handle_ai_death (Combat, после урона)
/// 5. schedule_ai_cooldowns, remove_fallen_ai (Finish, после снятия lock'ов)
/// 6. update_ai_state, update_debug_label (Finish)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                (react_to_sensors, confirm_line_of_sight)
                    .chain()
                    .in_set(TickSet::Perception)
                    .after(crate::sensors::track_sensor_contacts),
                tick_ai_timers.in_set(TickSet::Timers),
                drive_ai_motion.in_set(TickSet::Intent),
                (halt_cooldowns_on_attack, react_to_damage, handle_ai_death)
                    .chain()
                    .in_set(TickSet::Combat)
                    .after(crate::combat::apply_damage),
                (schedule_ai_cooldowns, remove_fallen_ai, update_ai_state, update_debug_label)
                    .chain()
                    .in_set(TickSet::Finish)
                    .after(crate::animation::release_locks_on_finish),
            ),
        );
    }
}
