use std::path::Path;
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use raycast_shooter::core::entity::DEAD_ENEMY_GLYPH;
use raycast_shooter::core::level;
use raycast_shooter::core::simulator::Simulator;
use raycast_shooter::render::raycaster::{Raycaster, strip_height};
use raycast_shooter::{
    Action, Entity, EntityKind, Framebuffer, GameConfig, GameState, InputSnapshot, Status,
    WorldMap, driver::FrameDriver, driver::Host, driver::StopReason,
};

fn arena() -> WorldMap {
    let mut rows = vec![vec![0u8; 24]; 24];
    for i in 0..24 {
        rows[0][i] = 1;
        rows[23][i] = 1;
        rows[i][0] = 1;
        rows[i][23] = 1;
    }
    WorldMap::from_rows(rows).unwrap()
}

fn start(map: WorldMap, roster: Vec<Entity>, spawn: Vec2, facing: Vec2) -> GameState {
    GameState::new(map, roster, spawn, facing, &GameConfig::default()).unwrap()
}

#[test]
fn shooting_an_enemy_straight_ahead() {
    let roster = vec![Entity::new(7, 8.0, 12.0, EntityKind::Enemy, "M")];
    let mut state = start(arena(), roster, Vec2::new(12.0, 12.0), Vec2::new(-1.0, 0.0));
    let sim = Simulator::new(GameConfig::default());
    let mut last = None;

    let fire = InputSnapshot::new().with(Action::Fire);
    sim.advance(&mut state, &fire, 0.016, &mut |s: Status| last = Some(s));

    assert_eq!(last, Some(Status { health: 100, ammo: 31, score: 100 }));
    let enemy = state.entities.get(7).unwrap();
    assert!(enemy.is_dead());
    assert_eq!(enemy.glyph, DEAD_ENEMY_GLYPH);
    assert!(state.is_shooting);

    // the corpse is not scored twice once the cooldown lets a second round go
    for _ in 0..4 {
        sim.advance(&mut state, &fire, 0.05, &mut |s: Status| last = Some(s));
    }
    assert_eq!(last, Some(Status { health: 100, ammo: 30, score: 100 }));
}

#[test]
fn corridor_wall_ten_units_ahead() {
    let map = WorldMap::parse(
        "1111111111111\n\
         1000000000003\n\
         1111111111111",
    )
    .unwrap();
    let state = start(map, vec![], Vec2::new(2.0, 1.5), Vec2::X);
    let mut fb = Framebuffer::new(640, 400);
    let depth = Raycaster::new(256).render(&mut fb, &state);

    let center = depth.get(320).unwrap();
    assert_abs_diff_eq!(center, 10.0, epsilon = 1e-4);
    assert_eq!(strip_height(center, 400), 40);
}

#[test]
fn walking_into_a_wall_slides_along_it() {
    let state = &mut start(arena(), vec![], Vec2::new(2.0, 12.0), Vec2::new(-1.0, 1.0).normalize());
    let sim = Simulator::new(GameConfig::default());
    let forward = InputSnapshot::new().with(Action::MoveForward);
    for _ in 0..40 {
        sim.advance(state, &forward, 0.05, &mut |_: Status| {});
    }
    let p = state.player.pos;
    // pinned against the west wall but still travelling south
    assert!(p.x >= 1.25 - 1e-4 && p.x < 1.5);
    assert!(p.y > 14.0);
    assert!(state.map.is_open_at(p));
}

#[test]
fn collecting_the_whole_supply_run() {
    let roster = vec![
        Entity::new(1, 10.0, 12.0, EntityKind::Treasure, "$"),
        Entity::new(2, 8.0, 12.0, EntityKind::Ammo, "="),
        Entity::new(3, 6.0, 12.0, EntityKind::Medkit, "+"),
    ];
    let mut state = start(arena(), roster, Vec2::new(12.0, 12.0), Vec2::new(-1.0, 0.0));
    state.player.health = 60;
    let sim = Simulator::new(GameConfig::default());
    let forward = InputSnapshot::new().with(Action::MoveForward);
    let mut last = state.status();
    // 3 units/s for 2.5 s walks from x=12 to x=4.5
    for _ in 0..50 {
        sim.advance(&mut state, &forward, 0.05, &mut |s: Status| last = s);
    }
    assert_eq!(last, Status { health: 85, ammo: 42, score: 50 });
    assert!(state.entities.iter().all(|e| e.is_collected()));
}

#[test]
fn tuned_config_changes_play() {
    let cfg = GameConfig::from_toml(
        "kill_bonus = 250\nstart_ammo = 1\n",
        Path::new("tuned.toml"),
    )
    .unwrap();
    let roster = vec![
        Entity::new(1, 8.0, 12.0, EntityKind::Enemy, "M"),
        Entity::new(2, 12.0, 8.0, EntityKind::Enemy, "M"),
    ];
    let mut state = GameState::new(arena(), roster, Vec2::new(12.0, 12.0), Vec2::new(-1.0, 0.0), &cfg)
        .unwrap();
    let sim = Simulator::new(cfg);
    assert!(sim.fire(&mut state));
    state.time += 1.0;
    assert!(!sim.fire(&mut state));
    assert_eq!(state.status(), Status { health: 100, ammo: 0, score: 250 });
    assert_eq!(state.entities.live_enemies(), 1);
}

struct ScriptedHost {
    fb: Framebuffer,
    script: Vec<InputSnapshot>,
    frame: usize,
}

impl Host for ScriptedHost {
    type Input = InputSnapshot;
    type Surface = Framebuffer;

    fn next_frame(&mut self) -> bool {
        self.frame < self.script.len()
    }

    fn input(&mut self) -> InputSnapshot {
        self.script[self.frame]
    }

    fn surface(&mut self) -> &mut Framebuffer {
        self.fb.clear();
        &mut self.fb
    }

    fn present(&mut self) {
        self.frame += 1;
    }
}

fn built_in_session(cfg: &GameConfig) -> GameState {
    GameState::new(
        level::default_map().unwrap(),
        level::default_roster(),
        level::SPAWN,
        level::FACING,
        cfg,
    )
    .unwrap()
}

#[test]
fn built_in_level_plays_through_the_frame_loop() {
    let cfg = GameConfig::default();
    let mut state = built_in_session(&cfg);
    let mut script = vec![InputSnapshot::new(); 10];
    script.push(InputSnapshot::new().with(Action::Fire));
    script.extend(vec![InputSnapshot::new(); 5]);
    let mut host = ScriptedHost { fb: Framebuffer::new(160, 100), script, frame: 0 };

    let mut driver = FrameDriver::new(cfg);
    let mut reports = Vec::new();
    let mut rng = StdRng::seed_from_u64(11);
    let reason = driver.run(&mut state, &mut host, &mut |s: Status| reports.push(s), &mut rng);

    assert_eq!(reason, StopReason::HostClosed);
    assert_eq!(reports.len(), 16);
    assert_eq!(driver.frames(), 16);
    assert_eq!(reports[9].ammo, 32);
    assert_eq!(reports[10].ammo, 31);
    assert!(state.map.is_open_at(state.player.pos));
    // every frame ends with the weapon overlay on top
    assert!(!host.fb.glyphs.is_empty());
}

#[test]
fn frames_at_sixty_hertz_turn_and_walk_the_player() {
    let cfg = GameConfig::default();
    let mut state = built_in_session(&cfg);
    let mut driver = FrameDriver::new(cfg);
    let mut fb = Framebuffer::new(160, 100);
    let mut rng = StdRng::seed_from_u64(5);
    let t0 = Instant::now();
    let frame = Duration::from_millis(16);

    // the first tick has no previous frame and so no delta
    let turn = InputSnapshot::new().with(Action::TurnLeft);
    for k in 0..11 {
        driver.tick(t0 + frame * k, &mut state, &turn, &mut fb, &mut |_: Status| {}, &mut rng);
    }
    let turned = Vec2::from_angle(10.0 * 0.016 * 2.0).rotate(level::FACING);
    assert_abs_diff_eq!(state.player.dir.x, turned.x, epsilon = 1e-4);
    assert_abs_diff_eq!(state.player.dir.y, turned.y, epsilon = 1e-4);
    assert_abs_diff_eq!(state.time, 0.16, epsilon = 1e-5);

    let before = state.player.pos;
    let forward = InputSnapshot::new().with(Action::MoveForward);
    for k in 11..16 {
        driver.tick(t0 + frame * k, &mut state, &forward, &mut fb, &mut |_: Status| {}, &mut rng);
    }
    let walked = state.player.pos - before;
    assert_abs_diff_eq!(walked.length(), 5.0 * 0.016 * 3.0, epsilon = 1e-4);
    assert!(walked.dot(turned) > 0.0);
    assert_eq!(driver.frames(), 16);
}
