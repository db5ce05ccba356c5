//! Physics module
//!
//! ECS не симулирует коллизии сам: kinematic движение идёт через
//! `CollisionBackend` (host engine или headless `FlatWorld`).

pub mod backend;
pub mod headless;
pub mod movement;

use bevy::prelude::*;

use crate::TickSet;

// Re-export основных типов
pub use backend::{CollisionBackend, CollisionWorld, SlideResult};
pub use headless::{FlatWorld, Wall, DEFAULT_HALF_EXTENTS};
pub use movement::integrate_motion;

/// Plugin: motion controller в FixedUpdate
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionWorld>()
            .add_systems(FixedUpdate, integrate_motion.in_set(TickSet::Motion));
    }
}
