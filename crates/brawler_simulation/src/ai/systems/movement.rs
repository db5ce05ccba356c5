//! AI movement systems.

use bevy::prelude::*;

use crate::ai::AiBrain;
use crate::animation::AnimationLock;
use crate::components::{CombatantState, Facing, MovementIntent, WALK_DEAD_ZONE};
use crate::config::{AiConfig, CombatantConfig};
use crate::sensors::{SensorContacts, SensorKind};

/// Система: AI brain → MovementIntent
///
/// Двигаемся только если жив, не бьём, не получаем удар и `can_walk`.
/// С `pursue_target` идём к видимой цели, которая ещё не в melee сенсоре.
pub fn drive_ai_motion(
    mut ai: Query<(
        &mut AiBrain,
        &mut MovementIntent,
        &CombatantState,
        &AnimationLock,
        &CombatantConfig,
        &AiConfig,
        &SensorContacts,
        &Transform,
    )>,
    targets: Query<&Transform>,
) {
    for (mut brain, mut intent, state, lock, config, ai_config, contacts, transform) in ai.iter_mut() {
        intent.running = false;
        intent.guarding = false;

        if state.dead {
            intent.horizontal = Some(0.0);
            continue;
        }

        let can_move = brain.can_walk && !lock.attacking && !lock.being_damaged;

        if can_move && ai_config.pursue_target && brain.line_of_sight {
            if let Some(target) = brain.target {
                if !contacts.contains(SensorKind::Melee, target) {
                    if let Ok(target_transform) = targets.get(target) {
                        let dx = target_transform.translation.x - transform.translation.x;
                        if dx.abs() > WALK_DEAD_ZONE {
                            brain.walk_direction = if dx > 0.0 { Facing::Right } else { Facing::Left };
                        }
                    }
                }
            }
        }

        intent.horizontal = Some(if can_move {
            config.movement_speed * brain.walk_direction.sign()
        } else {
            0.0
        });
    }
}
