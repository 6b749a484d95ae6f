//! Tunable game constants, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. A missing file yields [`GameConfig::default`].

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Display
    pub screen_width: u32,
    pub screen_height: u32,

    // Movement (cells per second, radians per second)
    pub move_speed: f32,
    pub rot_speed: f32,
    /// Lookahead added in the direction of travel when probing for walls.
    pub collision_buffer: f32,
    /// Upper bound on a single frame's delta, in seconds.
    pub max_dt: f32,
    /// Length of the camera plane for a unit facing vector (0.66 ≈ 66° FOV).
    pub plane_length: f32,

    // Weapon
    pub fire_cooldown: f32,
    pub flash_duration: f32,
    /// Half-width of the bullet cone in world units; angular tolerance is
    /// `hit_radius / distance`, capped at `max_hit_angle`.
    pub hit_radius: f32,
    pub max_hit_angle: f32,
    pub recoil_jitter: f32,

    // Pickups and scoring
    pub pickup_radius_sq: f32,
    pub kill_bonus: u32,
    pub treasure_bonus: u32,
    pub medkit_heal: i32,
    pub ammo_pack: u32,

    // Player start
    pub start_health: i32,
    pub start_ammo: u32,

    pub max_ray_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 400,
            move_speed: 3.0,
            rot_speed: 2.0,
            collision_buffer: 0.25,
            max_dt: 0.05,
            plane_length: 0.66,
            fire_cooldown: 0.18,
            flash_duration: 0.08,
            hit_radius: 0.4,
            max_hit_angle: 0.3,
            recoil_jitter: 6.0,
            pickup_radius_sq: 0.5,
            kill_bonus: 100,
            treasure_bonus: 50,
            medkit_heal: 25,
            ammo_pack: 10,
            start_health: 100,
            start_ammo: 32,
            max_ray_steps: 256,
        }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(cfg)
    }

    /// Rejects negative rates and durations, and any frame step that could
    /// carry the player (plus the collision buffer) a whole cell or more.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("move_speed", self.move_speed),
            ("rot_speed", self.rot_speed),
            ("collision_buffer", self.collision_buffer),
            ("max_dt", self.max_dt),
            ("fire_cooldown", self.fire_cooldown),
            ("flash_duration", self.flash_duration),
            ("hit_radius", self.hit_radius),
            ("max_hit_angle", self.max_hit_angle),
            ("recoil_jitter", self.recoil_jitter),
            ("pickup_radius_sq", self.pickup_radius_sq),
        ];
        if let Some((name, v)) = non_negative.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            return Err(format!("{name} must be non-negative, got {v}"));
        }
        let reach = self.move_speed * self.max_dt + self.collision_buffer;
        if reach >= 1.0 {
            return Err(format!(
                "move_speed * max_dt + collision_buffer is {reach:.3}, must stay below one cell"
            ));
        }
        if self.medkit_heal < 0 {
            return Err(format!("medkit_heal must be non-negative, got {}", self.medkit_heal));
        }
        Ok(())
    }
}

/// Reads `path` if it exists, otherwise returns the defaults.
pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
    if !path.is_file() {
        log::info!("no config at {}, using defaults", path.display());
        return Ok(GameConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = GameConfig::from_toml(&text, path)?;
    log::info!("loaded config from {}", path.display());
    Ok(cfg)
}
