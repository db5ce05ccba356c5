//! Combat system module
//!
//! ECS ответственность:
//! - Combo counter и его reset таймер
//! - Attack resolution: AttackIntent → удар по телам в melee сенсоре
//! - Damage/death: health, реакции на удар, Knockdown, death collision layers
//!
//! Host ответственность:
//! - Проигрывание клипов и сигнал их окончания (AnimationFinished)
//! - Area2D сенсоры (SensorEvent)

use bevy::prelude::*;

use crate::TickSet;

pub mod attacker;
pub mod combo;
pub mod damage;

// Re-export основных типов
pub use attacker::{is_hostile, resolve_attacks, AttackIntent, AttackStarted};
pub use combo::{schedule_combo_reset, tick_combo_resets, ComboCounter};
pub use damage::{apply_damage, die, CombatantRemoved, DamageDealt, DamageRequest, Dead, EntityDied};

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. tick_combo_resets (Timers) - истёкший reset сбрасывает комбо до удара
/// 2. resolve_attacks (Combat) - AttackIntent → DamageRequest
/// 3. apply_damage (Combat) - DamageRequest → DamageDealt / EntityDied
/// 4. schedule_combo_reset (Finish) - удар доигран → старт reset таймера
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<AttackIntent>()
            .add_event::<AttackStarted>()
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<CombatantRemoved>();

        app.add_systems(
            FixedUpdate,
            (
                tick_combo_resets.in_set(TickSet::Timers),
                (resolve_attacks, apply_damage).chain().in_set(TickSet::Combat),
                schedule_combo_reset
                    .in_set(TickSet::Finish)
                    .after(crate::animation::release_locks_on_finish),
            ),
        );
    }
}
