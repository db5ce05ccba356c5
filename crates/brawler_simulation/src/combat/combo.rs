//! Combo counter: Punch → Uppercut → Kick → Punch …
//!
//! Reset таймер стартует, когда анимация удара доиграла. Если за
//! `attack_reset_duration` новый удар не начался, комбо возвращается к Punch.

use bevy::prelude::*;

use crate::animation::{AnimationClip, ExclusiveActionEnded, COMBO_LENGTH};
use crate::components::CombatantState;
use crate::config::CombatantConfig;
use crate::timer::CountdownTimer;

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ComboCounter {
    /// Шаг комбо следующего удара (0..COMBO_LENGTH)
    pub step: u8,
    pub reset_timer: CountdownTimer,
}

impl ComboCounter {
    pub fn advance(&mut self) {
        self.step = (self.step + 1) % COMBO_LENGTH;
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    pub fn next_clip(&self) -> AnimationClip {
        AnimationClip::for_combo_step(self.step)
    }
}

/// System: тик reset таймеров
pub fn tick_combo_resets(mut combos: Query<(Entity, &mut ComboCounter)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (entity, mut combo) in combos.iter_mut() {
        if combo.reset_timer.tick(delta) {
            combo.reset();
            crate::logger::log(&format!("🔄 {:?} combo reset", entity));
        }
    }
}

/// System: удар доигран → старт reset таймера
pub fn schedule_combo_reset(
    mut ended: EventReader<ExclusiveActionEnded>,
    mut combos: Query<(&mut ComboCounter, &CombatantState, &CombatantConfig)>,
) {
    for event in ended.read() {
        if !event.was_attacking {
            continue;
        }

        let Ok((mut combo, state, config)) = combos.get_mut(event.entity) else {
            continue;
        };

        if state.dead {
            continue;
        }

        combo.reset_timer.start(config.attack_reset_duration);
    }
}
