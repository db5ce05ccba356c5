//! Damage + death
//!
//! DamageRequest → разворот к атакующему → health -= amount → реакция на удар.
//! Смерть при health < 0: death collision layers, Knockdown, EntityDied.

use bevy::prelude::*;

use crate::animation::{AnimationClip, AnimationLock, PlayAnimation};
use crate::components::{CollisionLayers, CombatantState};
use crate::config::CombatantConfig;
use crate::physics::CollisionWorld;

/// Event: нанести урон `target` (BeDamaged)
///
/// `attack_kind` - шаг комбо атакующего, выбирает анимацию реакции.
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub attacker: Entity,
    pub target: Entity,
    pub attack_kind: i32,
    pub amount: i32,
}

/// Событие: урон нанесен
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: i32,
    pub attack_kind: i32,
    pub target_died: bool,
}

/// Событие: entity умер (health < 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Событие: тело убрано из мира после Knockdown
#[derive(Event, Debug, Clone)]
pub struct CombatantRemoved {
    pub entity: Entity,
}

/// Компонент-маркер: entity мертв
///
/// Ставится вместе с `CombatantState::dead` (через Commands, виден со следующего apply).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Смерть бойца. Повторный вызов - no-op, возвращает false.
///
/// Меняет только состояние; события/физику выставляет вызывающая система.
pub fn die(
    state: &mut CombatantState,
    lock: &mut AnimationLock,
    layers: &mut CollisionLayers,
    death_layers: CollisionLayers,
) -> bool {
    if state.dead {
        return false;
    }

    state.dead = true;
    state.blocking = false;
    *layers = death_layers;
    lock.play_exclusive(AnimationClip::Knockdown, true);

    true
}

/// Система: DamageRequest → health, реакция, смерть
///
/// Мёртвые урон не получают. Блок урон не отменяет.
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(
        &mut CombatantState,
        &mut AnimationLock,
        &mut CollisionLayers,
        &CombatantConfig,
        &Transform,
    )>,
    positions: Query<&Transform>,
    mut world: ResMut<CollisionWorld>,
    mut commands: Commands,
    mut play_events: EventWriter<PlayAnimation>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let attacker_x = positions.get(request.attacker).ok().map(|t| t.translation.x);

        let Ok((mut state, mut lock, mut layers, config, transform)) = targets.get_mut(request.target) else {
            crate::logger::log_warning(&format!(
                "DamageRequest: target {:?} is not a combatant",
                request.target
            ));
            continue;
        };

        if state.dead {
            continue;
        }

        if let Some(attacker_x) = attacker_x {
            state.face_toward(transform.translation.x, attacker_x);
        }

        let crossed_zero = state.take_damage(request.amount);

        // Неизвестный attack_kind: ни анимации, ни lock'а
        if let Some(reaction) = AnimationClip::hit_reaction(request.attack_kind) {
            lock.being_damaged = true;
            if let Some(clip) = lock.play_exclusive(reaction, true) {
                play_events.write(PlayAnimation::exclusive(request.target, clip));
            }
        }

        crate::logger::log(&format!(
            "💥 {:?} hit {:?} (kind {}, -{} HP → {})",
            request.attacker, request.target, request.attack_kind, request.amount, state.health
        ));

        let died = crossed_zero && die(&mut state, &mut lock, &mut layers, config.death_layers);
        if died {
            world.set_collision_layers(request.target, *layers);
            play_events.write(PlayAnimation::exclusive(request.target, AnimationClip::Knockdown));
            commands.entity(request.target).insert(Dead);

            entity_died_events.write(EntityDied {
                entity: request.target,
                killer: Some(request.attacker),
            });

            crate::logger::log_info(&format!(
                "💀 {:?} killed by {:?}",
                request.target, request.attacker
            ));
        }

        damage_dealt_events.write(DamageDealt {
            attacker: request.attacker,
            target: request.target,
            damage: request.amount,
            attack_kind: request.attack_kind,
            target_died: died,
        });
    }
}
