//! Animation module
//!
//! ECS решает КАКОЙ клип играть, host (AnimatedSprite2D) его проигрывает:
//! - `PlayAnimation` (ECS → host)
//! - `AnimationFinished` (host → ECS), только для exclusive клипов
//! - `ExclusiveActionEnded` (внутренний) - lock снят, подписчики запускают кулдауны

pub mod clip;
pub mod lock;
pub mod playback;

use bevy::prelude::*;

use crate::components::{CombatantState, Facing, MotionState, MovementType};
use crate::TickSet;

pub use clip::{AnimationClip, COMBO_LENGTH};
pub use lock::{AnimationLock, ReleasedLocks};
pub use playback::{ClipDurations, HeadlessAnimator, HeadlessPlaybackPlugin};

/// Event: host должен начать играть клип
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayAnimation {
    pub entity: Entity,
    pub clip: AnimationClip,
    pub exclusive: bool,
}

impl PlayAnimation {
    pub fn exclusive(entity: Entity, clip: AnimationClip) -> Self {
        Self {
            entity,
            clip,
            exclusive: true,
        }
    }

    pub fn locomotion(entity: Entity, clip: AnimationClip) -> Self {
        Self {
            entity,
            clip,
            exclusive: false,
        }
    }
}

/// Event: host доиграл клип до конца
#[derive(Event, Debug, Clone)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: AnimationClip,
}

/// Event: exclusive-клип закончился и lock снят
#[derive(Event, Debug, Clone)]
pub struct ExclusiveActionEnded {
    pub entity: Entity,
    pub clip: AnimationClip,
    pub was_attacking: bool,
    pub was_being_damaged: bool,
}

/// System: locomotion анимация + facing по скорости
///
/// Пропускает бойцов под lock'ом и мёртвых.
pub fn select_locomotion_animation(
    mut combatants: Query<(Entity, &mut AnimationLock, &mut CombatantState, &MotionState)>,
    mut play_events: EventWriter<PlayAnimation>,
) {
    for (entity, mut lock, mut state, motion) in combatants.iter_mut() {
        if !lock.can_update_locomotion(state.dead) {
            continue;
        }

        if matches!(motion.movement, MovementType::Walk | MovementType::Run) {
            if let Some(facing) = Facing::from_velocity(motion.velocity.x) {
                state.facing = facing;
            }
        }

        let Some(clip) = AnimationClip::for_movement(motion.movement) else {
            continue;
        };

        if let Some(clip) = lock.play_locomotion(clip) {
            play_events.write(PlayAnimation::locomotion(entity, clip));
        }
    }
}

/// System: AnimationFinished → снятие lock'ов → ExclusiveActionEnded
pub fn release_locks_on_finish(
    mut finished: EventReader<AnimationFinished>,
    mut locks: Query<&mut AnimationLock>,
    mut ended: EventWriter<ExclusiveActionEnded>,
) {
    for event in finished.read() {
        let Ok(mut lock) = locks.get_mut(event.entity) else {
            continue;
        };

        let Some(released) = lock.finish(event.clip) else {
            continue;
        };

        crate::logger::log(&format!(
            "🎬 {:?} finished {} (attack: {}, hit: {})",
            event.entity,
            event.clip.name(),
            released.was_attacking,
            released.was_being_damaged
        ));

        ended.write(ExclusiveActionEnded {
            entity: event.entity,
            clip: event.clip,
            was_attacking: released.was_attacking,
            was_being_damaged: released.was_being_damaged,
        });
    }
}

/// Animation Plugin
///
/// Регистрирует events и системы выбора/снятия анимаций.
/// Проигрывание клипов - забота host'а (или `HeadlessPlaybackPlugin`).
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayAnimation>()
            .add_event::<AnimationFinished>()
            .add_event::<ExclusiveActionEnded>()
            .add_systems(
                FixedUpdate,
                (
                    select_locomotion_animation.in_set(TickSet::Animation),
                    release_locks_on_finish.in_set(TickSet::Finish),
                ),
            );
    }
}
