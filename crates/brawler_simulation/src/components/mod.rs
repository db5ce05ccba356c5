//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: состояние бойца (CombatantState, Facing, Dead, DebugLabel)
//! - movement: скорость и намерение движения (MotionState, MovementIntent, MovementType)
//! - world: группы тел и слои коллизий (Groups, CollisionLayers)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
