//! Конфигурация бойцов (RON)
//!
//! Все поля имеют defaults, поэтому в `.ron` файле достаточно указать
//! только то, что отличается:
//!
//! ```ron
//! (movement_speed: 80.0, max_health: 3)
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::CollisionLayers;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AI combatant requires a ground detection sensor")]
    MissingGroundSensor,

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected finite value >= 0, got {}", value),
        });
    }
    Ok(())
}

/// Параметры бойца (общие для игрока и AI)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct CombatantConfig {
    /// Ускорение свободного падения (units/sec²)
    pub gravity: f32,
    /// Скорость шага (units/sec)
    pub movement_speed: f32,
    /// Множитель скорости бега
    pub run_multiplier: f32,
    /// Вертикальный импульс прыжка
    pub jump_force: f32,
    pub max_health: i32,
    /// Урон одного удара
    pub attack_damage: i32,
    /// Пауза после удара, после которой комбо сбрасывается на первый шаг
    pub attack_reset_duration: f32,
    /// Слои живого бойца
    pub collision_layers: CollisionLayers,
    /// Слои после смерти
    pub death_layers: CollisionLayers,
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self {
            gravity: 500.0,
            movement_speed: 100.0,
            run_multiplier: 2.0,
            jump_force: 300.0,
            max_health: 5,
            attack_damage: 1,
            attack_reset_duration: 0.5,
            collision_layers: CollisionLayers::default(),
            death_layers: CollisionLayers::corpse(),
        }
    }
}

impl CombatantConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("gravity", self.gravity)?;
        require_non_negative("movement_speed", self.movement_speed)?;
        require_non_negative("run_multiplier", self.run_multiplier)?;
        require_non_negative("jump_force", self.jump_force)?;
        require_non_negative("attack_reset_duration", self.attack_reset_duration)?;

        if self.max_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                reason: format!("expected > 0, got {}", self.max_health),
            });
        }

        Ok(())
    }
}

/// Параметры AI-бойца
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AiConfig {
    /// Сколько стоять на краю/у препятствия перед разворотом
    pub turnaround_wait: f32,
    /// Начальное направление патруля
    pub walk_right: bool,
    /// Кулдаун между ударами
    pub attack_repeat: f32,
    pub can_block: bool,
    /// Через сколько после удара снова поднять блок
    pub block_reopen: f32,
    /// Маска raycast'а line-of-sight. None = проверка отключена
    pub sight_mask: Option<u32>,
    /// Случайный шаг комбо вместо последовательного
    pub randomize_combo: bool,
    /// Идти к замеченной цели (иначе только патруль)
    pub pursue_target: bool,
    pub display_debug_info: bool,
    /// Убирать тело после окончания анимации падения
    pub remove_corpse: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            turnaround_wait: 1.0,
            walk_right: true,
            attack_repeat: 0.5,
            can_block: false,
            block_reopen: 0.5,
            sight_mask: None,
            randomize_combo: false,
            pursue_target: true,
            display_debug_info: false,
            remove_corpse: true,
        }
    }
}

impl AiConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("turnaround_wait", self.turnaround_wait)?;
        require_non_negative("attack_repeat", self.attack_repeat)?;
        require_non_negative("block_reopen", self.block_reopen)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = CombatantConfig::from_ron("(movement_speed: 80.0, max_health: 3)")
            .expect("valid config");

        assert_eq!(config.movement_speed, 80.0);
        assert_eq!(config.max_health, 3);
        assert_eq!(config.gravity, 500.0);
        assert_eq!(config.attack_reset_duration, 0.5);
    }

    #[test]
    fn test_ai_config_from_ron() {
        let config = AiConfig::from_ron("(can_block: true, sight_mask: Some(3), walk_right: false)")
            .expect("valid config");

        assert!(config.can_block);
        assert_eq!(config.sight_mask, Some(3));
        assert!(!config.walk_right);
        assert_eq!(config.attack_repeat, 0.5);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result = AiConfig::from_ron("(attack_repeat: -1.0)");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "attack_repeat", .. })
        ));
    }

    #[test]
    fn test_zero_health_rejected() {
        let config = CombatantConfig {
            max_health: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = CombatantConfig::from_ron("(gravity: \"heavy\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
