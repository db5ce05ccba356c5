//! Базовые компоненты бойца: CombatantState, Facing, DebugLabel

use bevy::prelude::*;

/// Направление взгляда персонажа (2D side-scroller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1.0 для Right, -1.0 для Left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Направление по горизонтальной скорости. Нулевая скорость → None (facing не меняем).
    pub fn from_velocity(velocity_x: f32) -> Option<Self> {
        if velocity_x > 0.0 {
            Some(Facing::Right)
        } else if velocity_x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Куда смотреть персонажу в `own_x`, чтобы видеть того, кто стоит в `other_x`.
    ///
    /// Совпадающие координаты → Right.
    pub fn toward(own_x: f32, other_x: f32) -> Self {
        if own_x > other_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Состояние бойца (игрок или AI)
///
/// Инварианты:
/// - `dead == true` навсегда (возврата нет)
/// - `health` может уйти ниже нуля; смерть наступает при `health < 0`
/// - `blocking` не может быть true одновременно с attack lock
///
/// Остальное runtime-состояние подтягивается через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(
    crate::components::MotionState,
    crate::components::MovementIntent,
    crate::sensors::SensorContacts,
    crate::animation::AnimationLock,
    crate::combat::ComboCounter
)]
pub struct CombatantState {
    pub health: i32,
    pub max_health: i32,
    pub facing: Facing,
    pub blocking: bool,
    pub dead: bool,
}

impl Default for CombatantState {
    fn default() -> Self {
        Self::new(5)
    }
}

impl CombatantState {
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            facing: Facing::Right,
            blocking: false,
            dead: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Вычитает урон. Возвращает true, если health ушёл ниже нуля.
    ///
    /// Блок урон не отменяет.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health < 0
    }

    /// Разворот лицом к атакующему
    pub fn face_toward(&mut self, own_x: f32, other_x: f32) {
        self.facing = Facing::toward(own_x, other_x);
    }
}

/// Отладочная подпись над AI (health, cooldown, индикатор атаки/блока)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct DebugLabel {
    pub text: String,
    pub indicator: Option<char>,
}
