//! Animation lock: exclusive-анимации блокируют locomotion
//!
//! Пока играет one-shot клип (удар, реакция на удар, прыжок, падение),
//! locomotion система не имеет права менять анимацию. Lock снимается только
//! сигналом окончания именно того клипа, который сейчас играет.

use bevy::prelude::*;

use super::clip::AnimationClip;

/// Что было снято при окончании exclusive-клипа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleasedLocks {
    pub was_attacking: bool,
    pub was_being_damaged: bool,
}

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AnimationLock {
    /// Идёт удар
    pub attacking: bool,
    /// Идёт реакция на полученный удар
    pub being_damaged: bool,
    /// Играет exclusive-клип (PlayingOneShot)
    pub one_shot: bool,
    /// Последний запрошенный клип
    pub clip: Option<AnimationClip>,
}

impl AnimationLock {
    /// Запрос exclusive-клипа.
    ///
    /// Без `allow_override` запрос во время другого exclusive-клипа игнорируется.
    /// Возвращает клип, который host должен начать играть.
    pub fn play_exclusive(&mut self, clip: AnimationClip, allow_override: bool) -> Option<AnimationClip> {
        if self.one_shot && !allow_override {
            return None;
        }

        self.one_shot = true;
        self.clip = Some(clip);
        Some(clip)
    }

    /// Запрос locomotion-клипа. Повторный запрос того же клипа не перезапускает его.
    pub fn play_locomotion(&mut self, clip: AnimationClip) -> Option<AnimationClip> {
        if self.one_shot || self.clip == Some(clip) {
            return None;
        }

        self.clip = Some(clip);
        Some(clip)
    }

    pub fn can_update_locomotion(&self, dead: bool) -> bool {
        !self.attacking && !self.being_damaged && !self.one_shot && !dead
    }

    /// Сигнал окончания клипа от host'а.
    ///
    /// Устаревшие сигналы (клип уже сменился) и loop-клипы игнорируются.
    pub fn finish(&mut self, clip: AnimationClip) -> Option<ReleasedLocks> {
        if !clip.is_exclusive() || !self.one_shot || self.clip != Some(clip) {
            return None;
        }

        let released = ReleasedLocks {
            was_attacking: self.attacking,
            was_being_damaged: self.being_damaged,
        };
        self.attacking = false;
        self.being_damaged = false;
        self.one_shot = false;

        Some(released)
    }
}
