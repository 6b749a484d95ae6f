use glam::Vec2;

pub const MAX_HEALTH: i32 = 100;

pub struct Player {
    pub pos: Vec2,
    pub dir: Vec2,   // facing
    pub plane: Vec2, // camera plane, perpendicular to dir
    pub health: i32,
    pub ammo: u32,
    pub score: u32,
}

impl Player {
    /// Player at `pos` looking along `dir`. The camera plane is `dir`
    /// turned a quarter clockwise and scaled to `plane_length`.
    pub fn new(pos: Vec2, dir: Vec2, plane_length: f32, health: i32, ammo: u32) -> Self {
        let plane = Vec2::new(-dir.y, dir.x) * -plane_length;
        Self {
            pos,
            dir,
            plane,
            health: health.clamp(0, MAX_HEALTH),
            ammo,
            score: 0,
        }
    }

    /// Rotates facing and camera plane together by `angle` radians
    /// (counter-clockwise in map coordinates).
    pub fn rotate(&mut self, angle: f32) {
        let rot = Vec2::from_angle(angle);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }

    #[inline]
    pub fn facing_angle(&self) -> f32 {
        self.dir.y.atan2(self.dir.x)
    }

    /// Heals up to [`MAX_HEALTH`]. Returns the amount actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        if self.health < MAX_HEALTH {
            self.health = (self.health + amount).min(MAX_HEALTH);
        }
        self.health - before
    }

    pub fn add_score(&mut self, bonus: u32) {
        self.score = self.score.saturating_add(bonus);
    }
}
