//! Headless проигрывание клипов (без host engine)
//!
//! Для тестов и demo binary: слушает `PlayAnimation`, отсчитывает длительность
//! exclusive-клипа и шлёт `AnimationFinished`, как это сделал бы AnimatedSprite2D.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{AnimationClip, AnimationFinished, PlayAnimation};
use crate::TickSet;

/// Длительности клипов (секунды)
#[derive(Resource, Debug, Clone)]
pub struct ClipDurations {
    durations: HashMap<AnimationClip, f32>,
    pub fallback: f32,
}

impl Default for ClipDurations {
    fn default() -> Self {
        let durations = HashMap::from([
            (AnimationClip::JumpStart, 0.2),
            (AnimationClip::JumpEnd, 0.2),
            (AnimationClip::Punch, 0.3),
            (AnimationClip::Uppercut, 0.4),
            (AnimationClip::Kick, 0.4),
            (AnimationClip::HitUppercut, 0.3),
            (AnimationClip::HitMiddle, 0.3),
            (AnimationClip::HitHeavy, 0.4),
            (AnimationClip::Knockdown, 0.8),
        ]);

        Self {
            durations,
            fallback: 0.3,
        }
    }
}

impl ClipDurations {
    pub fn with(mut self, clip: AnimationClip, seconds: f32) -> Self {
        self.durations.insert(clip, seconds);
        self
    }

    pub fn get(&self, clip: AnimationClip) -> f32 {
        self.durations.get(&clip).copied().unwrap_or(self.fallback)
    }
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    clip: AnimationClip,
    elapsed: f32,
}

/// Текущий exclusive-клип каждого entity
#[derive(Resource, Debug, Default)]
pub struct HeadlessAnimator {
    playing: HashMap<Entity, Playback>,
}

impl HeadlessAnimator {
    pub fn current(&self, entity: Entity) -> Option<AnimationClip> {
        self.playing.get(&entity).map(|playback| playback.clip)
    }
}

/// System: PlayAnimation → запуск/замена клипа, тик, AnimationFinished
///
/// Locomotion клип вытесняет exclusive (клип заменён → сигнала не будет).
pub fn advance_headless_playback(
    mut requests: EventReader<PlayAnimation>,
    mut animator: ResMut<HeadlessAnimator>,
    mut finished: EventWriter<AnimationFinished>,
    durations: Res<ClipDurations>,
    time: Res<Time<Fixed>>,
) {
    for request in requests.read() {
        if request.exclusive {
            animator.playing.insert(
                request.entity,
                Playback {
                    clip: request.clip,
                    elapsed: 0.0,
                },
            );
        } else {
            animator.playing.remove(&request.entity);
        }
    }

    let delta = time.delta_secs();
    let mut done = Vec::new();
    for (entity, playback) in animator.playing.iter_mut() {
        playback.elapsed += delta;
        if playback.elapsed >= durations.get(playback.clip) {
            done.push((*entity, playback.clip));
        }
    }

    // Детерминированный порядок сигналов
    done.sort_by_key(|(entity, _)| entity.index());
    for (entity, clip) in done {
        animator.playing.remove(&entity);
        finished.write(AnimationFinished { entity, clip });
    }
}

/// Plugin: headless замена host-анимаций
pub struct HeadlessPlaybackPlugin;

impl Plugin for HeadlessPlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClipDurations>()
            .init_resource::<HeadlessAnimator>()
            .add_systems(
                FixedUpdate,
                advance_headless_playback
                    .in_set(TickSet::Animation)
                    .after(super::select_locomotion_animation),
            );
    }
}
