//! Spawn bundles для бойцов
//!
//! Host создаёт body + сенсоры у себя, затем спавнит ECS entity через эти bundles
//! и передаёт handles подключённых сенсоров.

use bevy::prelude::*;

use crate::ai::{AiBrain, AiState};
use crate::components::{CollisionLayers, CombatantState, DebugLabel, Groups};
use crate::config::{AiConfig, CombatantConfig, ConfigError};
use crate::player::Player;
use crate::sensors::Sensors;

/// Общая часть любого бойца
///
/// MotionState, MovementIntent, AnimationLock, ComboCounter, SensorContacts
/// добавляются Required Components от `CombatantState`.
#[derive(Bundle)]
pub struct CombatantBundle {
    pub transform: Transform,
    pub state: CombatantState,
    pub config: CombatantConfig,
    pub groups: Groups,
    pub layers: CollisionLayers,
    pub sensors: Sensors,
}

impl CombatantBundle {
    pub fn new(position: Vec2, config: CombatantConfig, groups: Groups, sensors: Sensors) -> Self {
        Self {
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            state: CombatantState::new(config.max_health),
            layers: config.collision_layers,
            config,
            groups,
            sensors,
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub combatant: CombatantBundle,
    pub player: Player,
}

#[derive(Bundle)]
pub struct AiCombatantBundle {
    pub combatant: CombatantBundle,
    pub brain: AiBrain,
    pub ai_state: AiState,
    pub ai_config: AiConfig,
    pub label: DebugLabel,
}

/// Игрок: группы Character + Player
pub fn player_bundle(
    position: Vec2,
    config: CombatantConfig,
    sensors: Sensors,
) -> Result<PlayerBundle, ConfigError> {
    config.validate()?;

    if !sensors.has_melee_sensor() {
        crate::logger::log_warning("Player spawned without melee sensor: attacks will hit nothing");
    }

    Ok(PlayerBundle {
        combatant: CombatantBundle::new(position, config, Groups::player(), sensors),
        player: Player,
    })
}

/// AI боец: группа Character
///
/// Ground сенсор обязателен (без него AI падает с платформ).
/// Без melee/sight сенсоров AI работает, но не видит/не бьёт.
pub fn ai_bundle(
    position: Vec2,
    config: CombatantConfig,
    ai_config: AiConfig,
    sensors: Sensors,
) -> Result<AiCombatantBundle, ConfigError> {
    config.validate()?;
    ai_config.validate()?;

    if !sensors.has_ground_sensor() {
        return Err(ConfigError::MissingGroundSensor);
    }
    if !sensors.has_melee_sensor() {
        crate::logger::log_warning("AI spawned without melee sensor: it will never attack");
    }
    if !sensors.has_sight_sensor() {
        crate::logger::log_warning("AI spawned without sight sensor: it will only notice enemies in melee range");
    }

    Ok(AiCombatantBundle {
        brain: AiBrain::new(ai_config.walk_right),
        ai_state: AiState::Patrol,
        label: DebugLabel::default(),
        combatant: CombatantBundle::new(position, config, Groups::character(), sensors),
        ai_config,
    })
}
