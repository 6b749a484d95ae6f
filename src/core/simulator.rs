//! Per-frame game update: movement, turning, shooting and pickups.
use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::config::GameConfig;
use crate::core::entity::EntityKind;
use crate::core::input::{Action, InputSource};
use crate::core::map::WorldMap;
use crate::core::state::{GameState, StatusSink};

/// Targets closer than this are hit whatever the facing.
const POINT_BLANK: f32 = 1e-3;

/// Wraps an angle into (-π, π].
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    let a = a.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

/// Angular half-width of the bullet cone at `distance`. Shrinks as the
/// target gets farther away, capped for point-blank targets.
#[inline]
pub fn hit_tolerance(distance: f32, cfg: &GameConfig) -> f32 {
    (cfg.hit_radius / (distance + 1e-3)).min(cfg.max_hit_angle)
}

/// Whether a target `offset` radians off the crosshair at `distance` is hit.
#[inline]
pub fn aims_at(offset: f32, distance: f32, cfg: &GameConfig) -> bool {
    offset.abs() <= hit_tolerance(distance, cfg)
}

// step plus the collision buffer in the direction of travel
#[inline]
fn lead(step: f32, buffer: f32) -> f32 {
    if step > 0.0 {
        step + buffer
    } else {
        step - buffer
    }
}

/// Moves `pos` by `step`, resolving each axis on its own so that a blocked
/// axis does not stop movement along the other one. An axis moves only if
/// both the landing cell and the cell `buffer` beyond it are open; with
/// `|step| + buffer < 1` that also rules out hopping over a one-cell wall.
pub fn try_move_with_slide(map: &WorldMap, pos: &mut Vec2, step: Vec2, buffer: f32) {
    if step.x != 0.0 {
        let y = pos.y;
        let land = pos.x + step.x;
        if map.is_open_at(Vec2::new(land, y))
            && map.is_open_at(Vec2::new(pos.x + lead(step.x, buffer), y))
        {
            pos.x = land;
        }
    }
    if step.y != 0.0 {
        let x = pos.x;
        let land = pos.y + step.y;
        if map.is_open_at(Vec2::new(x, land))
            && map.is_open_at(Vec2::new(x, pos.y + lead(step.y, buffer)))
        {
            pos.y = land;
        }
    }
}

pub struct Simulator {
    cfg: GameConfig,
}

impl Simulator {
    pub fn new(cfg: GameConfig) -> Self {
        Self { cfg }
    }

    /// Advances `state` by `dt` seconds under the held `input`, then reports
    /// the resulting status to `sink`.
    pub fn advance(
        &self,
        state: &mut GameState,
        input: &impl InputSource,
        dt: f32,
        sink: &mut impl StatusSink,
    ) {
        let dt = dt.max(0.0).min(self.cfg.max_dt);
        state.time += f64::from(dt);

        if state.is_shooting
            && state
                .last_shot_time
                .is_none_or(|t| state.time - t >= f64::from(self.cfg.flash_duration))
        {
            state.is_shooting = false;
        }

        self.walk(state, input, dt);
        self.turn(state, input, dt);
        if input.is_pressed(Action::Fire) {
            self.fire(state);
        }
        self.collect_pickups(state);

        sink.report(state.status());
    }

    fn walk(&self, state: &mut GameState, input: &impl InputSource, dt: f32) {
        let mut forward = 0.0;
        if input.is_pressed(Action::MoveForward) {
            forward += 1.0;
        }
        if input.is_pressed(Action::MoveBack) {
            forward -= 1.0;
        }
        if forward == 0.0 {
            return;
        }
        let step = state.player.dir * (forward * self.cfg.move_speed * dt);
        try_move_with_slide(&state.map, &mut state.player.pos, step, self.cfg.collision_buffer);
    }

    fn turn(&self, state: &mut GameState, input: &impl InputSource, dt: f32) {
        let mut turn = 0.0;
        if input.is_pressed(Action::TurnLeft) {
            turn += 1.0;
        }
        if input.is_pressed(Action::TurnRight) {
            turn -= 1.0;
        }
        if turn != 0.0 {
            state.player.rotate(turn * self.cfg.rot_speed * dt);
        }
    }

    /// Fires if ammo and cooldown allow. Returns whether a shot went off.
    pub fn fire(&self, state: &mut GameState) -> bool {
        if state.player.ammo == 0 {
            return false;
        }
        let ready = state
            .last_shot_time
            .is_none_or(|t| state.time - t >= f64::from(self.cfg.fire_cooldown));
        if !ready {
            return false;
        }
        state.player.ammo -= 1;
        state.last_shot_time = Some(state.time);
        state.is_shooting = true;
        let kills = self.resolve_hits(state);
        log::debug!(
            "shot at t={:.3}s, {} kill(s), ammo {}",
            state.time,
            kills,
            state.player.ammo
        );
        true
    }

    // Every live enemy inside the cone dies; a single shot can take out
    // several lined-up targets.
    fn resolve_hits(&self, state: &mut GameState) -> usize {
        let player = &mut state.player;
        let facing = player.facing_angle();
        let mut kills = 0;
        for e in state.entities.iter_mut().filter(|e| e.is_live_enemy()) {
            let to = e.pos - player.pos;
            let distance = to.length();
            // no bearing exists for a target on top of the player
            let hit = distance < POINT_BLANK
                || aims_at(normalize_angle(to.y.atan2(to.x) - facing), distance, &self.cfg);
            if hit && e.kill() {
                player.add_score(self.cfg.kill_bonus);
                kills += 1;
                log::debug!("enemy {} down", e.id);
            }
        }
        kills
    }

    fn collect_pickups(&self, state: &mut GameState) {
        let player = &mut state.player;
        for e in state.entities.iter_mut() {
            if !e.kind.is_pickup() || e.is_collected() {
                continue;
            }
            if e.pos.distance_squared(player.pos) >= self.cfg.pickup_radius_sq {
                continue;
            }
            match e.kind {
                EntityKind::Treasure => player.add_score(self.cfg.treasure_bonus),
                EntityKind::Medkit => {
                    player.heal(self.cfg.medkit_heal);
                }
                EntityKind::Ammo => player.ammo = player.ammo.saturating_add(self.cfg.ammo_pack),
                EntityKind::Enemy => continue,
            }
            e.collect();
            log::debug!("picked up {:?} {}", e.kind, e.id);
        }
    }
}
