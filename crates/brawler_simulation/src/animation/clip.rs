//! Animation clips бойца
//!
//! Имена совпадают с анимациями в SpriteFrames host'а.

use bevy::prelude::*;

use crate::components::MovementType;

/// Количество шагов комбо (Punch → Uppercut → Kick)
pub const COMBO_LENGTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationClip {
    IdleNormal,
    WalkBattle,
    RunNormal,
    Air,
    JumpStart,
    JumpEnd,
    Punch,
    Uppercut,
    Kick,
    HitUppercut,
    HitMiddle,
    HitHeavy,
    Knockdown,
}

impl AnimationClip {
    pub const ALL: [AnimationClip; 13] = [
        AnimationClip::IdleNormal,
        AnimationClip::WalkBattle,
        AnimationClip::RunNormal,
        AnimationClip::Air,
        AnimationClip::JumpStart,
        AnimationClip::JumpEnd,
        AnimationClip::Punch,
        AnimationClip::Uppercut,
        AnimationClip::Kick,
        AnimationClip::HitUppercut,
        AnimationClip::HitMiddle,
        AnimationClip::HitHeavy,
        AnimationClip::Knockdown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationClip::IdleNormal => "Idle_Normal",
            AnimationClip::WalkBattle => "Walk_Battle",
            AnimationClip::RunNormal => "Run_Normal",
            AnimationClip::Air => "Air",
            AnimationClip::JumpStart => "Jump_Start",
            AnimationClip::JumpEnd => "Jump_End",
            AnimationClip::Punch => "Punch",
            AnimationClip::Uppercut => "Uppercut",
            AnimationClip::Kick => "Kick",
            AnimationClip::HitUppercut => "Hit_Uppercut",
            AnimationClip::HitMiddle => "Hit_Middle",
            AnimationClip::HitHeavy => "Hit_Heavy",
            AnimationClip::Knockdown => "Knockdown",
        }
    }

    /// Обратное преобразование для events от host'а
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|clip| clip.name() == name)
    }

    /// Loop-анимации locomotion никогда не сигналят окончание
    pub fn is_exclusive(self) -> bool {
        !matches!(
            self,
            AnimationClip::IdleNormal
                | AnimationClip::WalkBattle
                | AnimationClip::RunNormal
                | AnimationClip::Air
        )
    }

    pub fn is_attack(self) -> bool {
        matches!(self, AnimationClip::Punch | AnimationClip::Uppercut | AnimationClip::Kick)
    }

    /// Клип удара для шага комбо (0 Punch, 1 Uppercut, 2 Kick)
    pub fn for_combo_step(step: u8) -> Self {
        match step % COMBO_LENGTH {
            0 => AnimationClip::Punch,
            1 => AnimationClip::Uppercut,
            _ => AnimationClip::Kick,
        }
    }

    /// Реакция на удар по виду атаки. Неизвестный вид → None (реакции нет).
    pub fn hit_reaction(attack_kind: i32) -> Option<Self> {
        match attack_kind {
            0 => Some(AnimationClip::HitUppercut),
            1 => Some(AnimationClip::HitMiddle),
            2 => Some(AnimationClip::HitHeavy),
            _ => None,
        }
    }

    /// Locomotion клип. Block своей анимации не имеет.
    pub fn for_movement(movement: MovementType) -> Option<Self> {
        match movement {
            MovementType::Idle => Some(AnimationClip::IdleNormal),
            MovementType::Walk => Some(AnimationClip::WalkBattle),
            MovementType::Run => Some(AnimationClip::RunNormal),
            MovementType::Air => Some(AnimationClip::Air),
            MovementType::Block => None,
        }
    }
}
