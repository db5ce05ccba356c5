//! Combat integration test
//!
//! Сценарии одного тика/нескольких секунд на headless App:
//! - комбо игрока и его сброс
//! - урон, разворот к атакующему, смерть при health < 0
//! - AI: разворот на краю, цель, повтор удара, блок
//! - locomotion / прыжок игрока

use bevy::prelude::*;
use brawler_simulation::*;

const DT: f32 = 1.0 / 60.0;

/// Helper: арена без host'а (сенсоры и AnimationFinished шлём руками)
fn create_arena() -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    let floor = app.world_mut().spawn(Groups::ground()).id();
    (app, floor)
}

fn full_sensors() -> Sensors {
    Sensors::default()
        .with_ground(SensorHandle(1))
        .with_melee(SensorHandle(2))
        .with_sight(SensorHandle(3))
}

fn spawn_player(app: &mut App, x: f32) -> Entity {
    let bundle = player_bundle(Vec2::new(x, 20.0), CombatantConfig::default(), full_sensors()).unwrap();
    app.world_mut().spawn(bundle).id()
}

fn spawn_ai(app: &mut App, x: f32, config: CombatantConfig, ai_config: AiConfig) -> Entity {
    let bundle = ai_bundle(Vec2::new(x, 20.0), config, ai_config, full_sensors()).unwrap();
    app.world_mut().spawn(bundle).id()
}

/// AI, который стоит на месте (не уходит из сценария)
fn spawn_standing_ai(app: &mut App, x: f32, ai_config: AiConfig) -> Entity {
    let config = CombatantConfig {
        movement_speed: 0.0,
        ..Default::default()
    };
    spawn_ai(app, x, config, ai_config)
}

fn enter(app: &mut App, owner: Entity, sensor: SensorKind, body: Entity) {
    app.world_mut().send_event(SensorEvent::BodyEntered { owner, sensor, body });
}

fn exit(app: &mut App, owner: Entity, sensor: SensorKind, body: Entity) {
    app.world_mut().send_event(SensorEvent::BodyExited { owner, sensor, body });
}

fn finish(app: &mut App, entity: Entity, clip: AnimationClip) {
    app.world_mut().send_event(AnimationFinished { entity, clip });
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step(app, DT);
    }
}

fn press_attack(app: &mut App, player: Entity) {
    app.world_mut().get_mut::<PlayerInput>(player).unwrap().attack = true;
    step(app, DT);
}

fn state(app: &App, entity: Entity) -> CombatantState {
    app.world().get::<CombatantState>(entity).unwrap().clone()
}

fn lock(app: &App, entity: Entity) -> AnimationLock {
    app.world().get::<AnimationLock>(entity).unwrap().clone()
}

fn brain(app: &App, entity: Entity) -> AiBrain {
    app.world().get::<AiBrain>(entity).unwrap().clone()
}

fn combo(app: &App, entity: Entity) -> ComboCounter {
    app.world().get::<ComboCounter>(entity).unwrap().clone()
}

// ============================================================================
// Player combo
// ============================================================================

#[test]
fn test_player_combo_cycles_punch_uppercut_kick() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    let enemy = spawn_standing_ai(&mut app, 20.0, AiConfig::default());
    step(&mut app, DT);

    enter(&mut app, player, SensorKind::Melee, enemy);

    let expected = [AnimationClip::Punch, AnimationClip::Uppercut, AnimationClip::Kick, AnimationClip::Punch];
    for (i, clip) in expected.iter().enumerate() {
        press_attack(&mut app, player);
        assert_eq!(lock(&app, player).clip, Some(*clip), "attack #{}", i);
        assert!(lock(&app, player).attacking);

        finish(&mut app, player, *clip);
        step(&mut app, DT);
        assert!(!lock(&app, player).attacking);
    }

    // 5 HP - 4 удара = 1
    assert_eq!(state(&app, enemy).health, 1);
    assert_eq!(combo(&app, player).step, 1);
}

#[test]
fn test_combo_resets_after_pause() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    step(&mut app, DT);

    press_attack(&mut app, player);
    assert_eq!(combo(&app, player).step, 1);

    finish(&mut app, player, AnimationClip::Punch);
    step(&mut app, DT);
    assert!(combo(&app, player).reset_timer.is_running());

    // 0.33s: ещё рано
    run_ticks(&mut app, 20);
    assert_eq!(combo(&app, player).step, 1);

    // > 0.5s после окончания удара
    run_ticks(&mut app, 15);
    assert_eq!(combo(&app, player).step, 0);

    press_attack(&mut app, player);
    assert_eq!(lock(&app, player).clip, Some(AnimationClip::Punch));
}

#[test]
fn test_attack_ignored_while_attacking() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    step(&mut app, DT);

    press_attack(&mut app, player);
    press_attack(&mut app, player);

    assert_eq!(lock(&app, player).clip, Some(AnimationClip::Punch));
    assert_eq!(combo(&app, player).step, 1);
}

#[test]
fn test_stale_animation_finished_is_ignored() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    step(&mut app, DT);

    press_attack(&mut app, player);
    finish(&mut app, player, AnimationClip::Kick);
    finish(&mut app, player, AnimationClip::IdleNormal);
    step(&mut app, DT);

    assert!(lock(&app, player).attacking);
    assert!(combo(&app, player).reset_timer.is_stopped());
}

// ============================================================================
// Damage / death
// ============================================================================

#[test]
fn test_damage_turns_target_toward_attacker() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    let enemy = spawn_standing_ai(&mut app, 20.0, AiConfig::default());
    step(&mut app, DT);

    enter(&mut app, player, SensorKind::Melee, enemy);
    press_attack(&mut app, player);

    let enemy_state = state(&app, enemy);
    assert_eq!(enemy_state.health, 4);
    assert_eq!(enemy_state.facing, Facing::Left);

    let enemy_lock = lock(&app, enemy);
    assert!(enemy_lock.being_damaged);
    assert_eq!(enemy_lock.clip, Some(AnimationClip::HitUppercut));
}

#[test]
fn test_health_zero_is_alive_below_zero_is_dead() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    let config = CombatantConfig {
        max_health: 1,
        movement_speed: 0.0,
        ..Default::default()
    };
    let enemy = spawn_ai(&mut app, 20.0, config, AiConfig::default());
    step(&mut app, DT);

    enter(&mut app, player, SensorKind::Melee, enemy);

    press_attack(&mut app, player);
    assert_eq!(state(&app, enemy).health, 0);
    assert!(!state(&app, enemy).dead);

    finish(&mut app, player, AnimationClip::Punch);
    step(&mut app, DT);
    press_attack(&mut app, player);

    let enemy_state = state(&app, enemy);
    assert_eq!(enemy_state.health, -1);
    assert!(enemy_state.dead);
    assert!(app.world().get::<Dead>(enemy).is_some());
    assert_eq!(lock(&app, enemy).clip, Some(AnimationClip::Knockdown));
    assert_eq!(
        *app.world().get::<CollisionLayers>(enemy).unwrap(),
        CombatantConfig::default().death_layers
    );
    assert_eq!(*app.world().get::<AiState>(enemy).unwrap(), AiState::Dead);

    // Мёртвых больше не бьют
    finish(&mut app, player, AnimationClip::Uppercut);
    step(&mut app, DT);
    press_attack(&mut app, player);
    assert_eq!(state(&app, enemy).health, -1);
}

#[test]
fn test_fallen_ai_removed_after_knockdown() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    let enemy = spawn_standing_ai(&mut app, 20.0, AiConfig::default());
    app.world_mut().get_mut::<CombatantState>(enemy).unwrap().health = 0;
    step(&mut app, DT);

    enter(&mut app, player, SensorKind::Melee, enemy);
    press_attack(&mut app, player);
    assert!(state(&app, enemy).dead);

    finish(&mut app, enemy, AnimationClip::Knockdown);
    step(&mut app, DT);
    assert!(!app.world().entities().contains(enemy));

    // Контакты игрока чистятся на следующем тике
    step(&mut app, DT);
    let contacts = app.world().get::<SensorContacts>(player).unwrap();
    assert!(contacts.overlapping(SensorKind::Melee).is_empty());
}

#[test]
fn test_dead_player_stays_in_world() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    let enemy = spawn_standing_ai(&mut app, 20.0, AiConfig::default());
    step(&mut app, DT);

    app.world_mut().get_mut::<CombatantState>(player).unwrap().health = 0;
    app.world_mut().send_event(DamageRequest {
        attacker: enemy,
        target: player,
        attack_kind: 2,
        amount: 1,
    });
    step(&mut app, DT);
    assert!(state(&app, player).dead);

    finish(&mut app, player, AnimationClip::Knockdown);
    run_ticks(&mut app, 5);
    assert!(app.world().get_entity(player).is_ok());

    // Мёртвый игрок не двигается и не бьёт
    {
        let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
        input.move_right = true;
        input.attack = true;
    }
    step(&mut app, DT);
    assert_eq!(app.world().get::<MotionState>(player).unwrap().velocity.x, 0.0);
    assert_eq!(lock(&app, player).clip, Some(AnimationClip::Knockdown));
}

#[test]
fn test_unknown_attack_kind_only_costs_health() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    let enemy = spawn_standing_ai(&mut app, 20.0, AiConfig::default());
    step(&mut app, DT);

    app.world_mut().send_event(DamageRequest {
        attacker: enemy,
        target: player,
        attack_kind: 7,
        amount: 1,
    });
    step(&mut app, DT);

    assert_eq!(state(&app, player).health, 4);
    assert!(!lock(&app, player).being_damaged);
}

// ============================================================================
// AI patrol
// ============================================================================

#[test]
fn test_ai_waits_at_ledge_then_turns_around() {
    let (mut app, floor) = create_arena();
    let enemy = spawn_ai(&mut app, 0.0, CombatantConfig::default(), AiConfig::default());

    enter(&mut app, enemy, SensorKind::Ground, floor);
    run_ticks(&mut app, 3);
    assert!(app.world().get::<MotionState>(enemy).unwrap().velocity.x > 0.0);

    exit(&mut app, enemy, SensorKind::Ground, floor);
    step(&mut app, DT);
    assert!(!brain(&app, enemy).can_walk);
    assert_eq!(app.world().get::<MotionState>(enemy).unwrap().velocity.x, 0.0);

    // turnaround_wait = 1.0s
    run_ticks(&mut app, 65);
    let ai = brain(&app, enemy);
    assert!(ai.can_walk);
    assert_eq!(ai.walk_direction, Facing::Left);
    assert!(app.world().get::<MotionState>(enemy).unwrap().velocity.x < 0.0);
    assert_eq!(state(&app, enemy).facing, Facing::Left);
}

#[test]
fn test_ai_halts_at_obstacle() {
    let (mut app, floor) = create_arena();
    let enemy = spawn_ai(&mut app, 0.0, CombatantConfig::default(), AiConfig::default());
    let crate_body = app.world_mut().spawn_empty().id();

    enter(&mut app, enemy, SensorKind::Ground, floor);
    step(&mut app, DT);
    assert!(brain(&app, enemy).can_walk);

    enter(&mut app, enemy, SensorKind::Ground, crate_body);
    step(&mut app, DT);
    assert!(!brain(&app, enemy).can_walk);
    assert!(brain(&app, enemy).turnaround_timer.is_running());
}

#[test]
fn test_ai_keeps_walking_while_other_ground_remains() {
    let (mut app, floor) = create_arena();
    let enemy = spawn_ai(&mut app, 0.0, CombatantConfig::default(), AiConfig::default());
    let next_platform = app.world_mut().spawn(Groups::ground()).id();

    enter(&mut app, enemy, SensorKind::Ground, floor);
    enter(&mut app, enemy, SensorKind::Ground, next_platform);
    step(&mut app, DT);

    exit(&mut app, enemy, SensorKind::Ground, floor);
    step(&mut app, DT);
    assert!(brain(&app, enemy).can_walk);
}

// ============================================================================
// AI targeting
// ============================================================================

#[test]
fn test_ai_target_acquire_lose_reacquire() {
    let (mut app, _floor) = create_arena();
    let first = spawn_player(&mut app, 100.0);
    let second = spawn_player(&mut app, 120.0);
    let other_ai = spawn_standing_ai(&mut app, 60.0, AiConfig::default());
    let enemy = spawn_standing_ai(&mut app, 0.0, AiConfig::default());
    step(&mut app, DT);

    // Другой AI целью не становится
    enter(&mut app, enemy, SensorKind::Sight, other_ai);
    step(&mut app, DT);
    assert_eq!(brain(&app, enemy).target, None);

    enter(&mut app, enemy, SensorKind::Sight, first);
    enter(&mut app, enemy, SensorKind::Sight, second);
    step(&mut app, DT);
    assert_eq!(brain(&app, enemy).target, Some(first));
    assert_eq!(
        *app.world().get::<AiState>(enemy).unwrap(),
        AiState::Pursue { target: first }
    );

    // Выход не-цели ничего не меняет
    exit(&mut app, enemy, SensorKind::Sight, second);
    step(&mut app, DT);
    assert_eq!(brain(&app, enemy).target, Some(first));

    exit(&mut app, enemy, SensorKind::Sight, first);
    step(&mut app, DT);
    assert_eq!(brain(&app, enemy).target, None);
    assert_eq!(*app.world().get::<AiState>(enemy).unwrap(), AiState::Patrol);

    enter(&mut app, enemy, SensorKind::Sight, second);
    step(&mut app, DT);
    assert_eq!(brain(&app, enemy).target, Some(second));
}

#[test]
fn test_ai_attacks_when_player_enters_melee() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 20.0);
    let enemy = spawn_ai(&mut app, 0.0, CombatantConfig::default(), AiConfig::default());
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);

    let ai = brain(&app, enemy);
    assert!(!ai.can_walk);
    assert_eq!(ai.target, Some(player));
    assert!(lock(&app, enemy).attacking);
    assert_eq!(state(&app, player).health, 4);
    assert_eq!(state(&app, player).facing, Facing::Left);
    assert_eq!(
        *app.world().get::<AiState>(enemy).unwrap(),
        AiState::Engage { target: player }
    );

    // Игрок вышел из зоны удара → идём дальше
    finish(&mut app, enemy, AnimationClip::Punch);
    step(&mut app, DT);
    exit(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);

    let ai = brain(&app, enemy);
    assert!(ai.can_walk);
    assert!(ai.attack_repeat_timer.is_stopped());
}

#[test]
fn test_ai_repeats_attack_every_cooldown() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 20.0);
    let enemy = spawn_standing_ai(&mut app, 0.0, AiConfig::default());
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);
    assert_eq!(state(&app, player).health, 4);

    finish(&mut app, enemy, AnimationClip::Punch);
    step(&mut app, DT);
    assert!(brain(&app, enemy).attack_repeat_timer.is_running());

    // 0.33s: кулдаун ещё идёт
    run_ticks(&mut app, 20);
    assert_eq!(state(&app, player).health, 4);

    // > 0.5s: второй удар. Сброс комбо истёк в том же тике → снова Punch
    run_ticks(&mut app, 15);
    assert_eq!(state(&app, player).health, 3);
    assert!(lock(&app, enemy).attacking);
    assert_eq!(lock(&app, enemy).clip, Some(AnimationClip::Punch));
}

#[test]
fn test_ai_raises_block_between_attacks() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 20.0);
    let ai_config = AiConfig {
        can_block: true,
        block_reopen: 0.2,
        attack_repeat: 1.0,
        ..Default::default()
    };
    let enemy = spawn_standing_ai(&mut app, 0.0, ai_config);
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);
    assert!(!state(&app, enemy).blocking);

    finish(&mut app, enemy, AnimationClip::Punch);
    step(&mut app, DT);

    // 0.1s после удара: окно для контратаки, блока ещё нет
    run_ticks(&mut app, 6);
    assert!(!state(&app, enemy).blocking);

    run_ticks(&mut app, 9);
    assert!(state(&app, enemy).blocking);

    // Повторный удар опускает блок
    run_ticks(&mut app, 50);
    assert!(lock(&app, enemy).attacking);
    assert!(!state(&app, enemy).blocking);
}

#[test]
fn test_hit_pauses_attack_cooldown_until_reaction_ends() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 20.0);
    let enemy = spawn_standing_ai(&mut app, 0.0, AiConfig::default());
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);
    finish(&mut app, enemy, AnimationClip::Punch);
    step(&mut app, DT);
    assert!(brain(&app, enemy).attack_repeat_timer.is_running());

    app.world_mut().send_event(DamageRequest {
        attacker: player,
        target: enemy,
        attack_kind: 1,
        amount: 1,
    });
    step(&mut app, DT);
    assert!(brain(&app, enemy).attack_repeat_timer.is_paused());

    // Пауза держится сколько угодно
    run_ticks(&mut app, 60);
    assert_eq!(state(&app, player).health, 4);

    finish(&mut app, enemy, AnimationClip::HitMiddle);
    step(&mut app, DT);
    assert!(brain(&app, enemy).attack_repeat_timer.is_running());
}

#[test]
fn test_hit_while_blocking_restarts_attack_cooldown() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 20.0);
    let ai_config = AiConfig {
        can_block: true,
        block_reopen: 0.1,
        attack_repeat: 1.0,
        ..Default::default()
    };
    let enemy = spawn_standing_ai(&mut app, 0.0, ai_config);
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);
    finish(&mut app, enemy, AnimationClip::Punch);
    step(&mut app, DT);
    run_ticks(&mut app, 15);
    assert!(state(&app, enemy).blocking);
    assert!(brain(&app, enemy).attack_repeat_timer.time_left() < 0.8);

    app.world_mut().send_event(DamageRequest {
        attacker: player,
        target: enemy,
        attack_kind: 0,
        amount: 1,
    });
    step(&mut app, DT);

    let ai = brain(&app, enemy);
    assert!(ai.attack_repeat_timer.is_running());
    assert!(ai.attack_repeat_timer.time_left() > 0.95);
    // Блок урон не отменяет
    assert_eq!(state(&app, enemy).health, 4);
}

#[test]
fn test_attack_cooldown_survives_firing_during_hit_reaction() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 20.0);
    let ai_config = AiConfig {
        can_block: true,
        block_reopen: 0.05,
        attack_repeat: 0.2,
        ..Default::default()
    };
    let enemy = spawn_standing_ai(&mut app, 0.0, ai_config);
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Melee, player);
    step(&mut app, DT);
    finish(&mut app, enemy, AnimationClip::Punch);
    step(&mut app, DT);
    run_ticks(&mut app, 6);
    assert!(state(&app, enemy).blocking);
    assert_eq!(state(&app, player).health, 4);

    // Тяжёлый удар по блокирующему AI: кулдаун с начала, реакция дольше кулдауна
    app.world_mut().send_event(DamageRequest {
        attacker: player,
        target: enemy,
        attack_kind: 2,
        amount: 1,
    });
    step(&mut app, DT);
    assert!(lock(&app, enemy).being_damaged);

    // Кулдаун срабатывает во время реакции и перезапускается, удара нет
    run_ticks(&mut app, 20);
    assert!(brain(&app, enemy).attack_repeat_timer.is_running());
    assert_eq!(state(&app, player).health, 4);

    // Реакция закончилась → следующий повтор бьёт игрока
    finish(&mut app, enemy, AnimationClip::HitHeavy);
    step(&mut app, DT);
    run_ticks(&mut app, 15);
    assert_eq!(state(&app, player).health, 3);
    assert!(lock(&app, enemy).attacking);
}

#[test]
fn test_line_of_sight_blocked_by_wall() {
    let (mut app, _floor) = create_arena();
    let wall = app.world_mut().spawn_empty().id();
    app.insert_resource(CollisionWorld::new(FlatWorld::new(0.0).with_wall(Wall {
        entity: wall,
        x: 50.0,
        bottom: 0.0,
        top: 100.0,
        layer: 0b01,
    })));

    let player = spawn_player(&mut app, 100.0);
    let ai_config = AiConfig {
        sight_mask: Some(0b11),
        ..Default::default()
    };
    let enemy = spawn_standing_ai(&mut app, 0.0, ai_config);
    step(&mut app, DT);

    enter(&mut app, enemy, SensorKind::Sight, player);
    run_ticks(&mut app, 2);

    let ai = brain(&app, enemy);
    assert_eq!(ai.target, Some(player));
    assert!(!ai.line_of_sight);
}

#[test]
fn test_ai_pursues_visible_target() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, -100.0);
    let enemy = spawn_ai(&mut app, 0.0, CombatantConfig::default(), AiConfig::default());
    step(&mut app, DT);
    assert_eq!(brain(&app, enemy).walk_direction, Facing::Right);

    enter(&mut app, enemy, SensorKind::Sight, player);
    run_ticks(&mut app, 3);

    assert_eq!(brain(&app, enemy).walk_direction, Facing::Left);
    assert!(app.world().get::<MotionState>(enemy).unwrap().velocity.x < 0.0);
}

// ============================================================================
// Player locomotion
// ============================================================================

#[test]
fn test_player_walk_run_and_facing() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    step(&mut app, DT);

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().move_right = true;
    step(&mut app, DT);
    let motion = app.world().get::<MotionState>(player).unwrap().clone();
    assert_eq!(motion.velocity.x, 100.0);
    assert_eq!(motion.movement, MovementType::Walk);
    assert_eq!(lock(&app, player).clip, Some(AnimationClip::WalkBattle));

    {
        let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
        input.move_right = false;
        input.move_left = true;
        input.run = true;
    }
    step(&mut app, DT);
    let motion = app.world().get::<MotionState>(player).unwrap().clone();
    assert_eq!(motion.velocity.x, -200.0);
    assert_eq!(motion.movement, MovementType::Run);
    assert_eq!(state(&app, player).facing, Facing::Left);
    assert_eq!(lock(&app, player).clip, Some(AnimationClip::RunNormal));
}

#[test]
fn test_player_block_stops_movement_and_attacks() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    step(&mut app, DT);

    {
        let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
        input.block = true;
        input.move_right = true;
        input.attack = true;
    }
    step(&mut app, DT);

    assert!(state(&app, player).blocking);
    assert!(!lock(&app, player).attacking);
    let motion = app.world().get::<MotionState>(player).unwrap().clone();
    assert_eq!(motion.velocity.x, 0.0);
    assert_eq!(motion.movement, MovementType::Block);

    app.world_mut().get_mut::<PlayerInput>(player).unwrap().block = false;
    step(&mut app, DT);
    assert!(!state(&app, player).blocking);
}

#[test]
fn test_player_jump_keeps_momentum_and_lands() {
    let (mut app, _floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);
    step(&mut app, DT);

    {
        let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
        input.move_right = true;
        input.jump = true;
    }
    step(&mut app, DT);

    let motion = app.world().get::<MotionState>(player).unwrap().clone();
    assert!(!motion.on_floor);
    assert_eq!(motion.movement, MovementType::Air);
    assert_eq!(lock(&app, player).clip, Some(AnimationClip::JumpStart));

    // В воздухе input не влияет на горизонталь
    {
        let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
        input.move_right = false;
        input.move_left = true;
    }
    run_ticks(&mut app, 10);
    assert_eq!(app.world().get::<MotionState>(player).unwrap().velocity.x, 100.0);

    // v = 300, g = 500 → ~1.2s полёта
    run_ticks(&mut app, 80);
    let motion = app.world().get::<MotionState>(player).unwrap().clone();
    assert!(motion.on_floor);
    assert_eq!(lock(&app, player).clip, Some(AnimationClip::JumpEnd));
}

// ============================================================================
// Event queues
// ============================================================================

#[test]
fn test_event_queues_stay_bounded_across_steps() {
    let (mut app, floor) = create_arena();
    let player = spawn_player(&mut app, 0.0);

    for tick in 0..5000 {
        if tick % 2 == 0 {
            enter(&mut app, player, SensorKind::Ground, floor);
        } else {
            exit(&mut app, player, SensorKind::Ground, floor);
        }
        step(&mut app, DT);
    }

    // Double buffer: не больше событий двух последних тиков
    assert!(app.world().resource::<Events<SensorEvent>>().len() <= 2);
    assert!(app.world().resource::<Events<PlayAnimation>>().len() <= 2);
}
