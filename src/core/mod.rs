//! Core game types and logic (world, entities, input, simulation).
//!
//! Re-exports:
//! - `map`: Tile grid loading and queries
//! - `entity`: Enemies and pickups
//! - `player`: Player pose and stats
//! - `input`: Logical actions and held-key snapshots
//! - `state`: The per-session game state
//! - `level`: Built-in level and roster
//! - `simulator`: Per-frame update

pub mod map;
pub mod entity;
pub mod player;
pub mod input;
pub mod state;
pub mod level;
pub mod simulator;
