//! AI perception: реакции на сенсоры + line-of-sight.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ai::AiBrain;
use crate::combat::{is_hostile, AttackIntent};
use crate::components::{CombatantState, Group, Groups};
use crate::config::AiConfig;
use crate::physics::CollisionWorld;
use crate::sensors::{SensorContacts, SensorEvent, SensorKind, Sensors};

/// Снимок тела на момент обработки сенсоров
#[derive(Debug, Clone, Copy)]
struct BodyInfo {
    groups: Groups,
    dead: bool,
}

/// System: SensorEvent → решения AI
///
/// Запускается после `track_sensor_contacts`, так что `SensorContacts`
/// уже отражает текущее перекрытие.
///
/// - Ground: край платформы / препятствие → стоп + таймер разворота
/// - Melee: враг вошёл → удар, стоп; враг вышел → идём дальше
/// - Sight: враг вошёл → цель; цель вышла → сброс цели
pub fn react_to_sensors(
    mut events: EventReader<SensorEvent>,
    mut set: ParamSet<(
        Query<(
            &mut AiBrain,
            &mut CombatantState,
            &AiConfig,
            &Groups,
            &Sensors,
            &SensorContacts,
        )>,
        Query<(Entity, &Groups, Option<&CombatantState>)>,
    )>,
    mut attack_intents: EventWriter<AttackIntent>,
) {
    let events: Vec<SensorEvent> = events.read().cloned().collect();
    if events.is_empty() {
        return;
    }

    let bodies: HashMap<Entity, BodyInfo> = set
        .p1()
        .iter()
        .map(|(entity, groups, state)| {
            (
                entity,
                BodyInfo {
                    groups: *groups,
                    dead: state.is_some_and(|s| s.dead),
                },
            )
        })
        .collect();

    let mut ai = set.p0();
    for event in events {
        let owner = event.owner();
        let kind = event.sensor();
        let body = event.body();

        let Ok((mut brain, mut state, config, groups, sensors, contacts)) = ai.get_mut(owner) else {
            continue;
        };

        if state.dead || !sensors.has(kind) || body == owner {
            continue;
        }

        let info = bodies.get(&body).copied();
        let hostile_alive = info.is_some_and(|b| is_hostile(groups, &b.groups) && !b.dead);

        match (kind, event.is_enter()) {
            (SensorKind::Ground, true) => {
                let is_ground_or_character = info.is_some_and(|b| {
                    b.groups.contains(Group::Ground) || b.groups.contains(Group::Character)
                });
                if !is_ground_or_character {
                    brain.halt_for_turnaround(config.turnaround_wait);
                    crate::logger::log(&format!("🧱 {:?} obstacle {:?} → waiting to turn", owner, body));
                }
            }
            (SensorKind::Ground, false) => {
                let left_ground = info.is_some_and(|b| b.groups.contains(Group::Ground));
                let still_grounded = contacts
                    .overlapping(SensorKind::Ground)
                    .iter()
                    .any(|e| bodies.get(e).is_some_and(|b| b.groups.contains(Group::Ground)));

                if left_ground && !still_grounded {
                    brain.halt_for_turnaround(config.turnaround_wait);
                    crate::logger::log(&format!("🪂 {:?} reached ledge → waiting to turn", owner));
                }
            }
            (SensorKind::Melee, true) => {
                if hostile_alive {
                    brain.can_walk = false;
                    if brain.acquire(body) {
                        crate::logger::log(&format!("🎯 {:?} acquired {:?} (melee)", owner, body));
                    }
                    attack_intents.write(AttackIntent { attacker: owner });
                }
            }
            (SensorKind::Melee, false) => {
                if info.is_some_and(|b| is_hostile(groups, &b.groups)) {
                    brain.can_walk = true;
                    brain.attack_repeat_timer.stop();
                }
            }
            (SensorKind::Sight, true) => {
                if hostile_alive && brain.acquire(body) {
                    crate::logger::log(&format!("👁️ {:?} spotted {:?}", owner, body));
                }
            }
            (SensorKind::Sight, false) => {
                if brain.lose_target(body) {
                    state.blocking = false;
                    crate::logger::log(&format!("❌ {:?} lost {:?}", owner, body));
                }
            }
        }
    }
}

/// System: line-of-sight до цели (raycast через CollisionWorld)
///
/// Без `sight_mask` видимость считается свободной.
/// Исчезнувшая цель сбрасывается.
pub fn confirm_line_of_sight(
    mut ai: Query<(Entity, &mut AiBrain, &mut CombatantState, &AiConfig, &Transform)>,
    targets: Query<&Transform>,
    world: Res<CollisionWorld>,
) {
    for (entity, mut brain, mut state, config, transform) in ai.iter_mut() {
        if state.dead {
            continue;
        }

        let Some(target) = brain.target else {
            brain.line_of_sight = false;
            continue;
        };

        let Ok(target_transform) = targets.get(target) else {
            brain.lose_target(target);
            state.blocking = false;
            crate::logger::log(&format!("❌ {:?} target {:?} vanished", entity, target));
            continue;
        };

        brain.line_of_sight = match config.sight_mask {
            None => true,
            Some(mask) => {
                let from = transform.translation.truncate();
                let to = target_transform.translation.truncate();
                match world.intersect_ray(from, to, &[entity], mask) {
                    None => true,
                    Some(hit) => hit == target,
                }
            }
        };
    }
}
