//! Player control: marker + input snapshot + input adapter
//!
//! Host (Godot Input) каждый кадр заполняет `PlayerInput`, ECS переводит его
//! в `MovementIntent` / `AttackIntent` / блок.

use bevy::prelude::*;

use crate::animation::{AnimationClip, AnimationLock, PlayAnimation};
use crate::combat::AttackIntent;
use crate::components::{CombatantState, MotionState, MovementIntent};
use crate::config::CombatantConfig;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI systems.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(PlayerInput)]
pub struct Player;

/// Снимок input'а игрока на текущий тик
///
/// `jump` / `attack` - "just pressed", сбрасываются после обработки.
/// Остальные - удерживаемые кнопки.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub run: bool,
    pub jump: bool,
    pub attack: bool,
    pub block: bool,
}

impl PlayerInput {
    /// Горизонтальная ось: -1 / 0 / +1
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.move_right {
            axis += 1.0;
        }
        if self.move_left {
            axis -= 1.0;
        }
        axis
    }

    fn clear_presses(&mut self) {
        self.jump = false;
        self.attack = false;
    }
}

/// Система: PlayerInput → MovementIntent / AttackIntent / блок
///
/// - на полу и без lock'а: скорость из оси (бег × run_multiplier), прыжок
/// - в воздухе или под lock'ом: горизонталь не трогаем (momentum)
/// - блок: только пока не бьём, стоим на месте
/// - удар: если не бьём и не держим блок
pub fn apply_player_input(
    mut players: Query<
        (
            Entity,
            &mut PlayerInput,
            &mut MovementIntent,
            &mut CombatantState,
            &mut AnimationLock,
            &MotionState,
            &CombatantConfig,
        ),
        With<Player>,
    >,
    mut attack_intents: EventWriter<AttackIntent>,
    mut play_events: EventWriter<PlayAnimation>,
) {
    for (entity, mut input, mut intent, mut state, mut lock, motion, config) in players.iter_mut() {
        if state.dead {
            intent.horizontal = Some(0.0);
            intent.guarding = false;
            input.clear_presses();
            continue;
        }

        let wants_block = input.block && !lock.attacking;
        if state.blocking != wants_block {
            state.blocking = wants_block;
            crate::logger::log(&format!(
                "🛡️ {:?} block {}",
                entity,
                if wants_block { "up" } else { "down" }
            ));
        }

        intent.running = input.run;
        intent.guarding = state.blocking;
        intent.horizontal = None;

        if lock.can_update_locomotion(state.dead) && motion.on_floor {
            let speed = if input.run {
                config.movement_speed * config.run_multiplier
            } else {
                config.movement_speed
            };

            intent.horizontal = Some(if state.blocking { 0.0 } else { input.axis() * speed });

            if input.jump && !state.blocking {
                intent.jump_impulse = Some(config.jump_force);
                if let Some(clip) = lock.play_exclusive(AnimationClip::JumpStart, false) {
                    play_events.write(PlayAnimation::exclusive(entity, clip));
                }
            }
        } else if state.blocking && motion.on_floor {
            intent.horizontal = Some(0.0);
        }

        if input.attack && !lock.attacking && !state.blocking {
            attack_intents.write(AttackIntent { attacker: entity });
        }

        input.clear_presses();
    }
}
