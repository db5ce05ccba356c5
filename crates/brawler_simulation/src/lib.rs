//! Brawler Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: поведение бойцов 2D side-scroller'а
//! (комбо, урон, смерть, патрульный AI, input игрока).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = правила боя, AI, анимационные lock'и, kinematic интеграция
//! - Host engine = физика (move_and_slide, raycast), сенсоры, проигрывание клипов
//!
//! Один тик = один прогон FixedUpdate, фазы идут строго по `TickSet`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod player;
pub mod sensors;
pub mod spawn;
pub mod timer;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AiBrain, AiState};
pub use animation::{
    AnimationClip, AnimationFinished, AnimationLock, AnimationPlugin, ClipDurations, ExclusiveActionEnded,
    HeadlessPlaybackPlugin, PlayAnimation,
};
pub use combat::{
    AttackIntent, AttackStarted, CombatPlugin, CombatantRemoved, ComboCounter, DamageDealt, DamageRequest, Dead,
    EntityDied,
};
pub use components::*;
pub use config::{AiConfig, CombatantConfig, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use physics::{CollisionBackend, CollisionWorld, FlatWorld, MotionPlugin, SlideResult, Wall};
pub use player::{Player, PlayerInput, PlayerPlugin};
pub use sensors::{SensorContacts, SensorEvent, SensorHandle, SensorKind, Sensors};
pub use spawn::{ai_bundle, player_bundle, AiCombatantBundle, CombatantBundle, PlayerBundle};
pub use timer::CountdownTimer;

/// Фазы одного тика (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// SensorEvent → контакты, реакции AI, line-of-sight
    Perception,
    /// Кулдауны: разворот, повтор удара, блок, сброс комбо
    Timers,
    /// Input игрока / AI brain → MovementIntent, AttackIntent
    Intent,
    /// AttackIntent → DamageRequest → урон / смерть
    Combat,
    /// Гравитация + move_and_slide
    Motion,
    /// Locomotion клипы (+ headless playback)
    Animation,
    /// AnimationFinished → снятие lock'ов → кулдауны, уборка трупов
    Finish,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Не включает `HeadlessPlaybackPlugin`: клипы проигрывает host.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed мог поставить create_headless_app, не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.register_type::<CombatantState>()
            .register_type::<MotionState>()
            .register_type::<AnimationLock>()
            .register_type::<ComboCounter>()
            .register_type::<AiBrain>()
            .register_type::<AiState>()
            .register_type::<CombatantConfig>()
            .register_type::<AiConfig>()
            .add_event::<SensorEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Perception,
                    TickSet::Timers,
                    TickSet::Intent,
                    TickSet::Combat,
                    TickSet::Motion,
                    TickSet::Animation,
                    TickSet::Finish,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    sensors::track_sensor_contacts.in_set(TickSet::Perception),
                    sensors::forget_removed_bodies.in_set(TickSet::Perception).before(sensors::track_sensor_contacts),
                ),
            )
            // Подсистемы
            .add_plugins((AnimationPlugin, CombatPlugin, AIPlugin, PlayerPlugin, MotionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Один тик симуляции с явным `delta` (секунды)
///
/// Host вызывает из своего physics callback'а; тесты - напрямую.
///
/// После тика очереди событий сдвигаются (double buffer): событие живёт
/// до конца следующего `step`, дальше отбрасывается.
pub fn step(app: &mut App, delta: f32) {
    let world = app.world_mut();
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(delta));
    world.run_schedule(FixedUpdate);
    update_event_queues(world);
}

/// Events::update для всех событий симуляции
fn update_event_queues(world: &mut World) {
    fn rotate<E: Event>(world: &mut World) {
        if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
            events.update();
        }
    }

    rotate::<SensorEvent>(world);
    rotate::<PlayAnimation>(world);
    rotate::<AnimationFinished>(world);
    rotate::<ExclusiveActionEnded>(world);
    rotate::<AttackIntent>(world);
    rotate::<AttackStarted>(world);
    rotate::<DamageRequest>(world);
    rotate::<DamageDealt>(world);
    rotate::<EntityDied>(world);
    rotate::<CombatantRemoved>(world);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
