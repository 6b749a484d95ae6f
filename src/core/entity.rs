//! World objects: enemies and pickups.
use glam::Vec2;

pub const DEAD_ENEMY_GLYPH: &str = "x_x";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Enemy,
    Treasure,
    Medkit,
    Ammo,
}

impl EntityKind {
    #[inline]
    pub fn is_pickup(self) -> bool {
        !matches!(self, EntityKind::Enemy)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub kind: EntityKind,
    pub glyph: String,
    dead: bool,
    collected: bool,
}

impl Entity {
    pub fn new(id: u32, x: f32, y: f32, kind: EntityKind, glyph: impl Into<String>) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            kind,
            glyph: glyph.into(),
            dead: false,
            collected: false,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Marks an enemy as killed and swaps in the defeated glyph. Returns
    /// false if it was not a live enemy.
    pub fn kill(&mut self) -> bool {
        if self.kind != EntityKind::Enemy || self.dead {
            return false;
        }
        self.dead = true;
        self.glyph = DEAD_ENEMY_GLYPH.to_string();
        true
    }

    /// Returns false if already collected or not a pickup.
    pub fn collect(&mut self) -> bool {
        if !self.kind.is_pickup() || self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    #[inline]
    pub fn is_live_enemy(&self) -> bool {
        self.kind == EntityKind::Enemy && !self.dead
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.collected
    }
}

/// Fixed roster of entities. Nothing is added or removed after creation;
/// entities only change state.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn live_enemies(&self) -> usize {
        self.entities.iter().filter(|e| e.is_live_enemy()).count()
    }
}
