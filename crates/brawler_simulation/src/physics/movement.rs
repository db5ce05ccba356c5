//! Motion controller: intent → velocity → gravity → move_and_slide
//!
//! Порядок внутри тика для каждого бойца:
//! 1. горизонталь из `MovementIntent` (None = сохраняем momentum)
//! 2. импульс прыжка
//! 3. гравитация
//! 4. `move_and_slide` через `CollisionWorld`
//! 5. приземление → Jump_End (exclusive, с override)
//! 6. классификация `MovementType`

use bevy::prelude::*;

use crate::animation::{AnimationClip, AnimationLock, PlayAnimation};
use crate::components::{CombatantState, MotionState, MovementIntent, MovementType};
use crate::config::CombatantConfig;
use super::backend::CollisionWorld;

/// System: интеграция движения всех бойцов
pub fn integrate_motion(
    mut bodies: Query<(
        Entity,
        &mut Transform,
        &mut MotionState,
        &mut MovementIntent,
        &mut AnimationLock,
        &CombatantState,
        &CombatantConfig,
    )>,
    mut world: ResMut<CollisionWorld>,
    mut play_events: EventWriter<PlayAnimation>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (entity, mut transform, mut motion, mut intent, mut lock, state, config) in bodies.iter_mut() {
        if state.dead {
            // Труп не ходит, но продолжает падать
            motion.velocity.x = 0.0;
            intent.jump_impulse = None;
        } else {
            if let Some(horizontal) = intent.horizontal {
                motion.velocity.x = horizontal;
            }
            if let Some(impulse) = intent.jump_impulse.take() {
                motion.velocity.y += impulse;
            }
        }

        motion.velocity.y -= config.gravity * delta;

        let position = transform.translation.truncate();
        let result = world.move_and_slide(entity, position, motion.velocity, Vec2::Y, delta);

        transform.translation.x = result.position.x;
        transform.translation.y = result.position.y;
        motion.velocity = result.velocity;

        let landed = result.on_floor && !motion.on_floor;
        motion.on_floor = result.on_floor;
        motion.movement = MovementType::derive(
            motion.on_floor,
            motion.velocity.x,
            intent.running,
            intent.guarding && !state.dead,
        );

        if landed && !state.dead {
            if let Some(clip) = lock.play_exclusive(AnimationClip::JumpEnd, true) {
                play_events.write(PlayAnimation::exclusive(entity, clip));
            }
        }
    }
}
