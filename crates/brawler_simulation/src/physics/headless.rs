//! Headless collision backend: плоский пол + вертикальные стены
//!
//! Достаточно для тестов и demo binary. Позиция тела = центр AABB,
//! тело стоит на полу, когда нижняя грань касается `floor_y`.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::CollisionLayers;
use super::backend::{CollisionBackend, SlideResult};

/// Размер тела по умолчанию (half extents)
pub const DEFAULT_HALF_EXTENTS: Vec2 = Vec2::new(10.0, 20.0);

/// Вертикальная стена `x = const`, `y ∈ [bottom, top]`
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    pub entity: Entity,
    pub x: f32,
    pub bottom: f32,
    pub top: f32,
    pub layer: u32,
}

#[derive(Debug, Clone, Copy)]
struct BodyRecord {
    position: Vec2,
    half_extents: Vec2,
    layers: CollisionLayers,
}

impl BodyRecord {
    fn min(&self) -> Vec2 {
        self.position - self.half_extents
    }

    fn max(&self) -> Vec2 {
        self.position + self.half_extents
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlatWorld {
    pub floor_y: f32,
    walls: Vec<Wall>,
    bodies: HashMap<Entity, BodyRecord>,
}

impl FlatWorld {
    pub fn new(floor_y: f32) -> Self {
        Self {
            floor_y,
            ..Default::default()
        }
    }

    pub fn with_wall(mut self, wall: Wall) -> Self {
        self.walls.push(wall);
        self
    }

    /// Регистрирует тело заранее (иначе оно появится при первом `move_and_slide`)
    pub fn register_body(
        &mut self,
        body: Entity,
        position: Vec2,
        half_extents: Vec2,
        layers: CollisionLayers,
    ) {
        self.bodies.insert(
            body,
            BodyRecord {
                position,
                half_extents,
                layers,
            },
        );
    }

    pub fn body_layers(&self, body: Entity) -> Option<CollisionLayers> {
        self.bodies.get(&body).map(|record| record.layers)
    }

    fn record_mut(&mut self, body: Entity, position: Vec2) -> &mut BodyRecord {
        self.bodies.entry(body).or_insert(BodyRecord {
            position,
            half_extents: DEFAULT_HALF_EXTENTS,
            layers: CollisionLayers::default(),
        })
    }
}

impl CollisionBackend for FlatWorld {
    fn move_and_slide(
        &mut self,
        body: Entity,
        position: Vec2,
        velocity: Vec2,
        up: Vec2,
        delta: f32,
    ) -> SlideResult {
        let half = self.record_mut(body, position).half_extents;
        let mut next = position + velocity * delta;
        let mut velocity = velocity;

        // Стены блокируют только горизонталь
        for wall in &self.walls {
            let overlaps_vertically = next.y - half.y < wall.top && next.y + half.y > wall.bottom;
            if !overlaps_vertically {
                continue;
            }

            if velocity.x > 0.0 && position.x + half.x <= wall.x && next.x + half.x > wall.x {
                next.x = wall.x - half.x;
                velocity.x = 0.0;
            } else if velocity.x < 0.0 && position.x - half.x >= wall.x && next.x - half.x < wall.x {
                next.x = wall.x + half.x;
                velocity.x = 0.0;
            }
        }

        let rest_y = self.floor_y + half.y;
        let on_floor = next.y <= rest_y;
        if on_floor {
            next.y = rest_y;
            // Гасим только компоненту, направленную в пол
            if velocity.dot(up) < 0.0 {
                velocity -= up * velocity.dot(up);
            }
        }

        self.record_mut(body, position).position = next;

        SlideResult {
            position: next,
            velocity,
            on_floor,
        }
    }

    fn intersect_ray(&self, from: Vec2, to: Vec2, exclude: &[Entity], mask: u32) -> Option<Entity> {
        let direction = to - from;
        let mut closest: Option<(f32, Entity)> = None;
        let mut consider = |t: f32, entity: Entity| {
            if closest.is_none_or(|(best, _)| t < best) {
                closest = Some((t, entity));
            }
        };

        for wall in &self.walls {
            if wall.layer & mask == 0 || exclude.contains(&wall.entity) || direction.x == 0.0 {
                continue;
            }
            let t = (wall.x - from.x) / direction.x;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let y = from.y + direction.y * t;
            if y >= wall.bottom && y <= wall.top {
                consider(t, wall.entity);
            }
        }

        for (entity, record) in &self.bodies {
            if !record.layers.intersects(mask) || exclude.contains(entity) {
                continue;
            }
            if let Some(t) = segment_aabb(from, direction, record.min(), record.max()) {
                consider(t, *entity);
            }
        }

        closest.map(|(_, entity)| entity)
    }

    fn set_collision_layers(&mut self, body: Entity, layers: CollisionLayers) {
        if let Some(record) = self.bodies.get_mut(&body) {
            record.layers = layers;
        }
    }

    fn remove_body(&mut self, body: Entity) {
        self.bodies.remove(&body);
    }
}

/// Slab test: параметр входа отрезка `from + direction * t, t ∈ [0, 1]` в AABB
fn segment_aabb(from: Vec2, direction: Vec2, min: Vec2, max: Vec2) -> Option<f32> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    for axis in 0..2 {
        let origin = from[axis];
        let dir = direction[axis];
        if dir == 0.0 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - origin) / dir;
        let t2 = (max[axis] - origin) / dir;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}
