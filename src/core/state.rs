use glam::Vec2;

use crate::config::GameConfig;
use crate::core::entity::{Entity, EntityStore};
use crate::core::map::WorldMap;
use crate::core::player::Player;
use crate::error::WorldError;

/// Health, ammo and score as shown by the status display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub health: i32,
    pub ammo: u32,
    pub score: u32,
}

/// Receives the status once per frame. Fire-and-forget.
pub trait StatusSink {
    fn report(&mut self, status: Status);
}

impl<F: FnMut(Status)> StatusSink for F {
    fn report(&mut self, status: Status) {
        self(status)
    }
}

/// Everything the simulator mutates and the renderer reads.
pub struct GameState {
    pub player: Player,
    pub entities: EntityStore,
    pub map: WorldMap,
    /// Simulation clock in seconds, advanced by each clamped delta.
    pub time: f64,
    pub last_shot_time: Option<f64>,
    pub is_shooting: bool,
}

impl GameState {
    pub fn new(
        map: WorldMap,
        roster: Vec<Entity>,
        spawn: Vec2,
        facing: Vec2,
        cfg: &GameConfig,
    ) -> Result<Self, WorldError> {
        if !map.is_open_at(spawn) {
            return Err(WorldError::SpawnBlocked { x: spawn.x, y: spawn.y });
        }
        if let Some(e) = roster.iter().find(|e| !map.contains(e.pos)) {
            return Err(WorldError::EntityOutOfBounds { id: e.id, x: e.pos.x, y: e.pos.y });
        }
        log::info!(
            "new session: {}x{} map, {} entities, spawn ({:.1}, {:.1})",
            map.width(),
            map.height(),
            roster.len(),
            spawn.x,
            spawn.y
        );
        Ok(Self {
            player: Player::new(spawn, facing, cfg.plane_length, cfg.start_health, cfg.start_ammo),
            entities: EntityStore::new(roster),
            map,
            time: 0.0,
            last_shot_time: None,
            is_shooting: false,
        })
    }

    pub fn status(&self) -> Status {
        Status {
            health: self.player.health,
            ammo: self.player.ammo,
            score: self.player.score,
        }
    }
}
