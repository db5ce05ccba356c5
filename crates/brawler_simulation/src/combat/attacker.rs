//! Attack resolution: AttackIntent → анимация удара + DamageRequest
//!
//! Удар мгновенный: в момент начала удара урон получают все враждебные тела
//! внутри melee сенсора. Hitbox-таймингов нет.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::{AnimationClip, AnimationLock, PlayAnimation, COMBO_LENGTH};
use crate::components::{CombatantState, Group, Groups};
use crate::config::{AiConfig, CombatantConfig};
use crate::sensors::{SensorContacts, SensorKind, Sensors};
use crate::DeterministicRng;

use super::combo::ComboCounter;
use super::damage::DamageRequest;

/// Event: боец хочет ударить (игрок нажал кнопку / AI решил атаковать)
#[derive(Event, Debug, Clone)]
pub struct AttackIntent {
    pub attacker: Entity,
}

/// Event: удар начался
#[derive(Event, Debug, Clone)]
pub struct AttackStarted {
    pub attacker: Entity,
    pub clip: AnimationClip,
    pub combo_step: u8,
}

/// Может ли `attacker` задеть тело с группами `body`
///
/// Игрок бьёт любого Character, AI бьёт только игроков.
pub fn is_hostile(attacker: &Groups, body: &Groups) -> bool {
    if !body.contains(Group::Character) {
        return false;
    }

    attacker.contains(Group::Player) || body.contains(Group::Player)
}

/// System: обработка AttackIntent
///
/// Удар игнорируется, если боец мёртв, уже бьёт или получает удар.
/// Несколько intent'ов за тик от одного бойца = один удар.
pub fn resolve_attacks(
    mut intents: EventReader<AttackIntent>,
    mut attackers: Query<(
        &mut CombatantState,
        &mut AnimationLock,
        &mut ComboCounter,
        &CombatantConfig,
        &Sensors,
        &SensorContacts,
        &Groups,
        Option<&AiConfig>,
    )>,
    bodies: Query<&Groups>,
    mut rng: ResMut<DeterministicRng>,
    mut play_events: EventWriter<PlayAnimation>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut started_events: EventWriter<AttackStarted>,
) {
    for intent in intents.read() {
        let Ok((mut state, mut lock, mut combo, config, sensors, contacts, groups, ai_config)) =
            attackers.get_mut(intent.attacker)
        else {
            continue;
        };

        if state.dead || lock.attacking || lock.being_damaged {
            continue;
        }

        state.blocking = false;

        if ai_config.is_some_and(|ai| ai.randomize_combo) {
            combo.step = rng.rng.gen_range(0..COMBO_LENGTH);
        }

        let step = combo.step;
        let clip = combo.next_clip();

        lock.attacking = true;
        if let Some(clip) = lock.play_exclusive(clip, true) {
            play_events.write(PlayAnimation::exclusive(intent.attacker, clip));
        }
        combo.reset_timer.stop();

        let mut hits = 0;
        if sensors.has_melee_sensor() {
            for &body in contacts.overlapping(SensorKind::Melee) {
                if body == intent.attacker {
                    continue;
                }
                let Ok(body_groups) = bodies.get(body) else {
                    continue;
                };
                if !is_hostile(groups, body_groups) {
                    continue;
                }

                damage_requests.write(DamageRequest {
                    attacker: intent.attacker,
                    target: body,
                    attack_kind: i32::from(step),
                    amount: config.attack_damage,
                });
                hits += 1;
            }
        }

        combo.advance();

        crate::logger::log(&format!(
            "⚔️ {:?} {} (combo step {}, targets: {})",
            intent.attacker,
            clip.name(),
            step,
            hits
        ));

        started_events.write(AttackStarted {
            attacker: intent.attacker,
            clip,
            combo_step: step,
        });
    }
}
