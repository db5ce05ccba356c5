//! World компоненты: группы тел и слои коллизий

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тег тела в мире (аналог engine groups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Group {
    /// Пол / платформы
    Ground,
    /// Любой боец
    Character,
    /// Управляемый игроком боец
    Player,
}

impl Group {
    fn bit(self) -> u8 {
        match self {
            Group::Ground => 1 << 0,
            Group::Character => 1 << 1,
            Group::Player => 1 << 2,
        }
    }
}

/// Набор групп тела (bit set)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct Groups {
    bits: u8,
}

impl Groups {
    pub fn new(groups: &[Group]) -> Self {
        groups.iter().fold(Self::default(), |acc, group| acc.with(*group))
    }

    pub fn ground() -> Self {
        Self::new(&[Group::Ground])
    }

    pub fn character() -> Self {
        Self::new(&[Group::Character])
    }

    pub fn player() -> Self {
        Self::new(&[Group::Character, Group::Player])
    }

    pub fn with(mut self, group: Group) -> Self {
        self.bits |= group.bit();
        self
    }

    pub fn contains(&self, group: Group) -> bool {
        self.bits & group.bit() != 0
    }
}

/// Collision layer/mask (как в host physics engine)
///
/// `layer` - в каких слоях тело, `mask` - с какими слоями сталкивается.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CollisionLayers {
    pub layer: u32,
    pub mask: u32,
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self {
            layer: 0b10,
            mask: 0b11,
        }
    }
}

impl CollisionLayers {
    pub const fn new(layer: u32, mask: u32) -> Self {
        Self { layer, mask }
    }

    /// Слои трупа: ни с кем не взаимодействует кроме пола
    pub const fn corpse() -> Self {
        Self { layer: 0, mask: 0b01 }
    }

    pub fn intersects(&self, mask: u32) -> bool {
        self.layer & mask != 0
    }
}
