//! Error types for world loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell {ch:?} at ({x}, {y})")]
    BadCell { x: usize, y: usize, ch: char },
    #[error("spawn point ({x:.2}, {y:.2}) is not an open cell")]
    SpawnBlocked { x: f32, y: f32 },
    #[error("entity {id} at ({x:.2}, {y:.2}) lies outside the map")]
    EntityOutOfBounds { id: u32, x: f32, y: f32 },
    #[error("cannot read map {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}
