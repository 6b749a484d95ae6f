//! First-person raycasting shooter on a tile grid.
//!
//! The [`driver::FrameDriver`] threads one [`GameState`]
//! through simulation, wall casting and sprite compositing each frame.
//! Window, keyboard and status display are supplied by the host.

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod render;

pub use config::GameConfig;
pub use crate::core::entity::{Entity, EntityKind, EntityStore};
pub use crate::core::input::{Action, InputSnapshot, InputSource};
pub use crate::core::map::WorldMap;
pub use crate::core::state::{GameState, Status, StatusSink};
pub use driver::{CancelToken, FrameDriver, Host, StopReason};
pub use error::{ConfigError, WorldError};
pub use render::framebuffer::Framebuffer;
pub use render::surface::{Color, Surface};
