//! AI reaction systems (attack, damage, death, animation end).

use bevy::prelude::*;

use crate::ai::{AiBrain, AiState};
use crate::animation::{AnimationClip, ExclusiveActionEnded};
use crate::combat::{AttackStarted, CombatantRemoved, DamageDealt, EntityDied};
use crate::components::{CombatantState, DebugLabel};
use crate::config::AiConfig;
use crate::physics::CollisionWorld;

/// System: начало удара останавливает кулдауны повтора и блока
pub fn halt_cooldowns_on_attack(
    mut started: EventReader<AttackStarted>,
    mut ai: Query<&mut AiBrain>,
) {
    for event in started.read() {
        let Ok(mut brain) = ai.get_mut(event.attacker) else {
            continue;
        };

        brain.attack_repeat_timer.stop();
        brain.block_timer.stop();
    }
}

/// System: AI реакция на полученный урон
///
/// Если кулдаун повтора удара не остановлен:
/// - блокирующий AI (can_block) перезапускает его с полной длительности
/// - иначе кулдаун ставится на паузу до конца реакции на удар
pub fn react_to_damage(
    mut damage_events: EventReader<DamageDealt>,
    mut ai: Query<(&mut AiBrain, &CombatantState, &AiConfig)>,
) {
    for event in damage_events.read() {
        if event.target_died {
            continue;
        }

        let Ok((mut brain, state, config)) = ai.get_mut(event.target) else {
            continue;
        };

        if brain.attack_repeat_timer.is_stopped() {
            continue;
        }

        if config.can_block && state.blocking {
            brain.attack_repeat_timer.start(config.attack_repeat);
        } else {
            brain.attack_repeat_timer.pause();
        }
    }
}

/// System: обработка смерти → AI отключен (Dead state)
pub fn handle_ai_death(
    mut died: EventReader<EntityDied>,
    mut ai: Query<(&mut AiBrain, &mut AiState)>,
) {
    for event in died.read() {
        let Ok((mut brain, mut state)) = ai.get_mut(event.entity) else {
            continue;
        };

        brain.shut_down();
        *state = AiState::Dead;
        crate::logger::log(&format!("Actor {:?} died → AI disabled (Dead state)", event.entity));
    }
}

/// System: exclusive-клип доигран → кулдауны
///
/// - конец удара: старт attack_repeat (и block, если умеет блокировать)
/// - конец реакции на удар: снимаем паузу с attack_repeat
pub fn schedule_ai_cooldowns(
    mut ended: EventReader<ExclusiveActionEnded>,
    mut ai: Query<(&mut AiBrain, &CombatantState, &AiConfig)>,
) {
    for event in ended.read() {
        let Ok((mut brain, state, config)) = ai.get_mut(event.entity) else {
            continue;
        };

        if state.dead {
            continue;
        }

        if event.was_attacking {
            brain.attack_repeat_timer.start(config.attack_repeat);
            if config.can_block {
                brain.block_timer.start(config.block_reopen);
            }
        }

        if event.was_being_damaged {
            brain.attack_repeat_timer.resume();
        }
    }
}

/// System: Knockdown доигран → тело AI убирается из мира
pub fn remove_fallen_ai(
    mut ended: EventReader<ExclusiveActionEnded>,
    ai: Query<(&CombatantState, &AiConfig), With<AiBrain>>,
    mut world: ResMut<CollisionWorld>,
    mut commands: Commands,
    mut removed: EventWriter<CombatantRemoved>,
) {
    for event in ended.read() {
        if event.clip != AnimationClip::Knockdown {
            continue;
        }

        let Ok((state, config)) = ai.get(event.entity) else {
            continue;
        };

        if !state.dead || !config.remove_corpse {
            continue;
        }

        world.remove_body(event.entity);
        commands.entity(event.entity).despawn();
        removed.write(CombatantRemoved { entity: event.entity });

        crate::logger::log_info(&format!("🪦 {:?} removed after knockdown", event.entity));
    }
}

/// System: отладочная подпись (health, кулдаун удара, индикатор)
pub fn update_debug_label(mut ai: Query<(&AiBrain, &CombatantState, &AiConfig, &mut DebugLabel)>) {
    for (brain, state, config, mut label) in ai.iter_mut() {
        if !config.display_debug_info {
            continue;
        }

        label.text = format!("{}\n{:.2}", state.health, brain.attack_repeat_timer.time_left());
        label.indicator = if state.blocking {
            Some('x')
        } else if brain.attack_repeat_timer.is_running() {
            Some('!')
        } else {
            None
        };
    }
}
