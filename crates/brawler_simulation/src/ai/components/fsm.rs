//! FSM AI components (brain, state).

use bevy::prelude::*;

use crate::components::Facing;
use crate::timer::CountdownTimer;

/// AI FSM состояния (выводятся каждый тик из brain + сенсоров)
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum AiState {
    /// Патруль: ходим по платформе, разворачиваемся на краях
    #[default]
    Patrol,

    /// Цель замечена, но ещё не в зоне удара
    Pursue { target: Entity },

    /// Цель в melee сенсоре
    Engage { target: Entity },

    /// Мёртв, AI отключен
    Dead,
}

/// Runtime-состояние AI бойца
///
/// Три независимых кулдауна:
/// - turnaround: пауза на краю платформы перед разворотом
/// - attack_repeat: пауза между ударами
/// - block: пауза после удара перед подъёмом блока
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AiBrain {
    /// Текущая цель (weak reference - entity может исчезнуть)
    pub target: Option<Entity>,
    pub can_walk: bool,
    pub walk_direction: Facing,
    /// Результат последнего line-of-sight raycast'а
    pub line_of_sight: bool,
    pub turnaround_timer: CountdownTimer,
    pub attack_repeat_timer: CountdownTimer,
    pub block_timer: CountdownTimer,
}

impl Default for AiBrain {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AiBrain {
    pub fn new(walk_right: bool) -> Self {
        Self {
            target: None,
            can_walk: true,
            walk_direction: if walk_right { Facing::Right } else { Facing::Left },
            line_of_sight: false,
            turnaround_timer: CountdownTimer::default(),
            attack_repeat_timer: CountdownTimer::default(),
            block_timer: CountdownTimer::default(),
        }
    }

    /// Край платформы / препятствие: стоим и ждём разворота
    pub fn halt_for_turnaround(&mut self, wait: f32) {
        self.can_walk = false;
        self.turnaround_timer.start(wait);
    }

    pub fn turn_around(&mut self) {
        self.walk_direction = self.walk_direction.flipped();
        self.can_walk = true;
    }

    /// Берём цель, только если другой нет. true = цель взята.
    pub fn acquire(&mut self, body: Entity) -> bool {
        if self.target.is_some() {
            return false;
        }
        self.target = Some(body);
        true
    }

    /// Теряем цель (только если это именно она). true = цель сброшена.
    pub fn lose_target(&mut self, body: Entity) -> bool {
        if self.target != Some(body) {
            return false;
        }
        self.target = None;
        self.line_of_sight = false;
        self.attack_repeat_timer.stop();
        true
    }

    /// Смерть: всё останавливаем
    pub fn shut_down(&mut self) {
        self.target = None;
        self.can_walk = false;
        self.line_of_sight = false;
        self.turnaround_timer.stop();
        self.attack_repeat_timer.stop();
        self.block_timer.stop();
    }
}
