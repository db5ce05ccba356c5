//! Collision backend: граница между ECS и host physics
//!
//! ECS не владеет коллизиями. Host (Godot CharacterBody2D) или headless
//! `FlatWorld` реализуют `CollisionBackend`, а motion/AI системы зовут его
//! через `CollisionWorld` resource.

use bevy::prelude::*;

use crate::components::CollisionLayers;
use super::headless::FlatWorld;

/// Результат `move_and_slide`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_floor: bool,
}

/// Kinematic body movement + raycast + смена слоёв
pub trait CollisionBackend: Send + Sync {
    /// Двигает тело на `velocity * delta` со скольжением вдоль препятствий.
    ///
    /// `up` задаёт, какая поверхность считается полом.
    fn move_and_slide(
        &mut self,
        body: Entity,
        position: Vec2,
        velocity: Vec2,
        up: Vec2,
        delta: f32,
    ) -> SlideResult;

    /// Первое тело на отрезке `from → to`, чьи слои пересекаются с `mask`.
    fn intersect_ray(&self, from: Vec2, to: Vec2, exclude: &[Entity], mask: u32) -> Option<Entity>;

    fn set_collision_layers(&mut self, body: Entity, layers: CollisionLayers);

    /// Тело исчезло из мира
    fn remove_body(&mut self, _body: Entity) {}
}

/// Resource: активный collision backend
///
/// По умолчанию - пустой `FlatWorld` (пол на y = 0).
#[derive(Resource)]
pub struct CollisionWorld {
    backend: Box<dyn CollisionBackend>,
}

impl CollisionWorld {
    pub fn new(backend: impl CollisionBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(FlatWorld::default())
    }
}

impl std::ops::Deref for CollisionWorld {
    type Target = dyn CollisionBackend;

    fn deref(&self) -> &Self::Target {
        self.backend.as_ref()
    }
}

impl std::ops::DerefMut for CollisionWorld {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend.as_mut()
    }
}
