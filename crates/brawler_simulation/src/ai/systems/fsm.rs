//! FSM AI systems: кулдауны и классификация состояния.

use bevy::prelude::*;

use crate::ai::{AiBrain, AiState};
use crate::animation::AnimationLock;
use crate::combat::{is_hostile, AttackIntent};
use crate::components::{CombatantState, Groups};
use crate::config::AiConfig;
use crate::sensors::{SensorContacts, SensorKind};

/// System: тик кулдаунов AI
///
/// - turnaround → разворот и снова идём
/// - attack_repeat → повторный удар, если враг всё ещё в melee сенсоре;
///   во время реакции на удар таймер перезапускается
///   (успешный удар сам останавливает его через `halt_cooldowns_on_attack`)
/// - block → поднимаем блок (если не бьём)
pub fn tick_ai_timers(
    mut ai: Query<(
        Entity,
        &mut AiBrain,
        &mut CombatantState,
        &AnimationLock,
        &AiConfig,
        &SensorContacts,
        &Groups,
    )>,
    bodies: Query<(&Groups, &CombatantState), Without<AiBrain>>,
    mut attack_intents: EventWriter<AttackIntent>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut brain, mut state, lock, config, contacts, groups) in ai.iter_mut() {
        if state.dead {
            continue;
        }

        if brain.turnaround_timer.tick(delta) {
            brain.turn_around();
            crate::logger::log(&format!("↩️ {:?} turned around → {:?}", entity, brain.walk_direction));
        }

        if brain.attack_repeat_timer.tick(delta) {
            let enemy_in_reach = contacts.overlapping(SensorKind::Melee).iter().any(|body| {
                bodies
                    .get(*body)
                    .is_ok_and(|(body_groups, body_state)| is_hostile(groups, body_groups) && !body_state.dead)
            });

            if enemy_in_reach && lock.being_damaged {
                // Повтор не теряется: ждём следующего срабатывания
                brain.attack_repeat_timer.start(config.attack_repeat);
            } else if enemy_in_reach {
                attack_intents.write(AttackIntent { attacker: entity });
            }
        }

        if brain.block_timer.tick(delta) && config.can_block && !lock.attacking {
            state.blocking = true;
            crate::logger::log(&format!("🛡️ {:?} raised block", entity));
        }
    }
}

/// System: AiState из brain + сенсоров (для host'а / отладки)
pub fn update_ai_state(mut ai: Query<(&AiBrain, &CombatantState, &SensorContacts, &mut AiState)>) {
    for (brain, state, contacts, mut ai_state) in ai.iter_mut() {
        let next = if state.dead {
            AiState::Dead
        } else {
            match brain.target {
                None => AiState::Patrol,
                Some(target) if contacts.contains(SensorKind::Melee, target) => AiState::Engage { target },
                Some(target) => AiState::Pursue { target },
            }
        };

        if *ai_state != next {
            crate::logger::log(&format!("🧠 AI state {:?} → {:?}", *ai_state, next));
            *ai_state = next;
        }
    }
}
