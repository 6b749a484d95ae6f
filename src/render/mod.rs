//! Rendering: surface abstraction, raycaster and sprites.
//!
//! Re-exports:
//! - `surface`: Colors and the host drawing interface
//! - `framebuffer`: CPU framebuffer implementing `Surface`
//! - `raycaster`: Column walls and the depth buffer
//! - `sprites`: Billboard sprites and weapon overlay

pub mod surface;
pub mod framebuffer;
pub mod raycaster;
pub mod sprites;
