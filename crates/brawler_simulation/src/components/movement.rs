//! Movement компоненты: скорость, намерение движения, locomotion state

use bevy::prelude::*;

/// Порог |velocity.x|, ниже которого персонаж считается стоящим
pub const WALK_DEAD_ZONE: f32 = 1.0;

/// Locomotion состояние (выводится каждый тик из скорости и контакта с полом)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MovementType {
    #[default]
    Idle,
    Walk,
    Run,
    /// Игрок держит блок стоя на полу
    Block,
    Air,
}

impl MovementType {
    /// Классификация движения.
    ///
    /// Порядок проверок: воздух → блок → dead-zone → бег/шаг.
    pub fn derive(on_floor: bool, velocity_x: f32, running: bool, guarding: bool) -> Self {
        if !on_floor {
            MovementType::Air
        } else if guarding {
            MovementType::Block
        } else if velocity_x.abs() <= WALK_DEAD_ZONE {
            MovementType::Idle
        } else if running {
            MovementType::Run
        } else {
            MovementType::Walk
        }
    }
}

/// Кинематическое состояние персонажа (y-up, units/sec)
///
/// Обновляется только motion системой после `move_and_slide`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    pub velocity: Vec2,
    /// Контакт с полом по результату последнего `move_and_slide`
    pub on_floor: bool,
    pub movement: MovementType,
}

impl Default for MotionState {
    fn default() -> Self {
        // Спавн считаем "на полу", иначе первый же тик сыграет приземление
        Self {
            velocity: Vec2::ZERO,
            on_floor: true,
            movement: MovementType::Idle,
        }
    }
}

/// Намерение движения на текущий тик (пишут player input / AI, читает motion)
///
/// `horizontal == None` → горизонтальная скорость сохраняется (momentum в воздухе).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    pub horizontal: Option<f32>,
    /// Одноразовый вертикальный импульс (прыжок), motion забирает через `take()`
    pub jump_impulse: Option<f32>,
    pub running: bool,
    /// Стойка блока (только игрок)
    pub guarding: bool,
}
