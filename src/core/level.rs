//! Built-in level: a 24x24 walled arena and its starting roster.
use glam::Vec2;

use crate::core::entity::{Entity, EntityKind};
use crate::core::map::WorldMap;
use crate::error::WorldError;

const LEVEL: &str = include_str!("../../assets/level.txt");

pub const SPAWN: Vec2 = Vec2::new(12.0, 12.0);
pub const FACING: Vec2 = Vec2::new(-1.0, 0.0);

pub const ENEMY_GLYPH: &str = "M";
pub const TREASURE_GLYPH: &str = "$";
pub const MEDKIT_GLYPH: &str = "+";
pub const AMMO_GLYPH: &str = "=";

pub fn glyph_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Enemy => ENEMY_GLYPH,
        EntityKind::Treasure => TREASURE_GLYPH,
        EntityKind::Medkit => MEDKIT_GLYPH,
        EntityKind::Ammo => AMMO_GLYPH,
    }
}

pub fn default_map() -> Result<WorldMap, WorldError> {
    WorldMap::parse(LEVEL)
}

pub fn default_roster() -> Vec<Entity> {
    use EntityKind::*;
    let spots = [
        (6.5, 10.5, Enemy),
        (18.5, 9.5, Enemy),
        (5.5, 4.5, Enemy),
        (17.5, 18.5, Enemy),
        (4.5, 5.5, Treasure),
        (16.5, 4.5, Treasure),
        (6.5, 18.5, Treasure),
        (9.5, 18.5, Medkit),
        (21.5, 2.5, Medkit),
        (20.5, 12.5, Ammo),
        (2.5, 21.5, Ammo),
    ];
    spots
        .into_iter()
        .zip(1..)
        .map(|((x, y, kind), id)| Entity::new(id, x, y, kind, glyph_for(kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_level_is_well_formed() {
        let map = default_map().unwrap();
        assert_eq!((map.width(), map.height()), (24, 24));
        assert!(map.is_enclosed());
        assert!(map.is_open_at(SPAWN));
        for e in default_roster() {
            assert!(map.is_open_at(e.pos), "entity {} sits in a wall", e.id);
        }
    }

    #[test]
    fn roster_ids_are_unique() {
        let roster = default_roster();
        let mut ids: Vec<u32> = roster.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }
}
