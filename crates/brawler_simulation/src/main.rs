//! Headless симуляция арены
//!
//! Игрок (скриптованный input) против двух AI на плоском полу.
//! Сенсоры эмулируются по дистанции, клипы - через HeadlessPlaybackPlugin.

use bevy::prelude::*;
use std::collections::HashSet;

use brawler_simulation::*;

const DELTA: f32 = 1.0 / 60.0;
const MELEE_REACH: f32 = 30.0;
const SIGHT_RANGE: f32 = 150.0;

/// Простейший host: сенсоры по дистанции вдоль X
#[derive(Default)]
struct ProximitySensors {
    overlaps: HashSet<(Entity, SensorKind, Entity)>,
}

impl ProximitySensors {
    fn update(&mut self, world: &mut World, floor: Entity) {
        let mut query = world.query::<(Entity, &Transform, &CombatantState, &Sensors)>();
        let combatants: Vec<(Entity, f32, Facing, Sensors)> = query
            .iter(world)
            .map(|(entity, transform, state, sensors)| (entity, transform.translation.x, state.facing, sensors.clone()))
            .collect();

        let mut current = HashSet::new();
        for (owner, x, facing, sensors) in &combatants {
            if sensors.has_ground_sensor() {
                current.insert((*owner, SensorKind::Ground, floor));
            }
            for (body, body_x, _, _) in &combatants {
                if body == owner {
                    continue;
                }
                let dx = (body_x - x) * facing.sign();
                if sensors.has_melee_sensor() && (0.0..=MELEE_REACH).contains(&dx) {
                    current.insert((*owner, SensorKind::Melee, *body));
                }
                if sensors.has_sight_sensor() && (0.0..=SIGHT_RANGE).contains(&dx) {
                    current.insert((*owner, SensorKind::Sight, *body));
                }
            }
        }

        let mut exited: Vec<_> = self.overlaps.difference(&current).copied().collect();
        let mut entered: Vec<_> = current.difference(&self.overlaps).copied().collect();
        exited.sort_by_key(|(owner, _, body)| (owner.index(), body.index()));
        entered.sort_by_key(|(owner, _, body)| (owner.index(), body.index()));

        for (owner, sensor, body) in exited {
            world.send_event(SensorEvent::BodyExited { owner, sensor, body });
        }
        for (owner, sensor, body) in entered {
            world.send_event(SensorEvent::BodyEntered { owner, sensor, body });
        }

        self.overlaps = current;
    }
}

fn sensors_for(id: u64) -> Sensors {
    Sensors::default()
        .with_ground(SensorHandle(id * 10))
        .with_melee(SensorHandle(id * 10 + 1))
        .with_sight(SensorHandle(id * 10 + 2))
}

fn main() {
    let seed = 42;
    println!("Starting brawler headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessPlaybackPlugin));

    let world = app.world_mut();
    let floor = world.spawn(Groups::ground()).id();

    let player = match player_bundle(Vec2::new(0.0, 20.0), CombatantConfig::default(), sensors_for(1)) {
        Ok(bundle) => world.spawn(bundle).id(),
        Err(err) => {
            log_error(&format!("player spawn failed: {}", err));
            return;
        }
    };

    let brawler_config = AiConfig {
        walk_right: false,
        can_block: true,
        ..Default::default()
    };
    let enemies = [
        ai_bundle(Vec2::new(200.0, 20.0), CombatantConfig::default(), brawler_config, sensors_for(2)),
        ai_bundle(
            Vec2::new(-250.0, 20.0),
            CombatantConfig::default(),
            AiConfig {
                randomize_combo: true,
                ..Default::default()
            },
            sensors_for(3),
        ),
    ];
    for bundle in enemies {
        match bundle {
            Ok(bundle) => {
                world.spawn(bundle);
            }
            Err(err) => log_error(&format!("AI spawn failed: {}", err)),
        }
    }

    let mut host = ProximitySensors::default();

    // 20 секунд симуляции
    for tick in 0..1200 {
        host.update(app.world_mut(), floor);

        if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
            // Стоим на месте и бьём каждые полсекунды
            input.attack = tick % 30 == 0;
        }

        step(&mut app, DELTA);

        if tick % 120 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<(Entity, &CombatantState)>();
            for (entity, state) in query.iter(world) {
                println!(
                    "Tick {}: {:?} health {} {}",
                    tick,
                    entity,
                    state.health,
                    if state.dead { "(dead)" } else { "" }
                );
            }
        }
    }

    println!("Simulation complete!");
}
