//! Frame loop: clamps the frame delta and runs simulate → walls → sprites
//! once per display frame until cancelled.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::Rng;

use crate::config::GameConfig;
use crate::core::input::InputSource;
use crate::core::simulator::Simulator;
use crate::core::state::{GameState, StatusSink};
use crate::render::raycaster::Raycaster;
use crate::render::sprites::SpriteCompositor;
use crate::render::surface::Surface;

/// Shared stop flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The window system side of the loop.
pub trait Host {
    type Input: InputSource;
    type Surface: Surface;

    /// Waits for the next display frame. Returns false once the host is
    /// closing and no further frames will be presented.
    fn next_frame(&mut self) -> bool;

    /// Held keys as of this frame.
    fn input(&mut self) -> Self::Input;

    /// Surface to draw this frame into, already cleared.
    fn surface(&mut self) -> &mut Self::Surface;

    fn present(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    HostClosed,
}

pub struct FrameDriver {
    simulator: Simulator,
    raycaster: Raycaster,
    sprites: SpriteCompositor,
    max_dt: f32,
    last_tick: Option<Instant>,
    cancel: CancelToken,
    frames: u64,
}

impl FrameDriver {
    pub fn new(cfg: GameConfig) -> Self {
        Self {
            raycaster: Raycaster::new(cfg.max_ray_steps),
            sprites: SpriteCompositor::new(cfg.recoil_jitter),
            max_dt: cfg.max_dt,
            simulator: Simulator::new(cfg),
            last_tick: None,
            cancel: CancelToken::new(),
            frames: 0,
        }
    }

    /// Handle that stops [`FrameDriver::run`] before its next frame.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds since the previous tick, clamped to `[0, max_dt]`. The first
    /// tick yields zero.
    pub fn frame_delta(&mut self, now: Instant) -> f32 {
        let dt = match self.last_tick {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        dt.min(self.max_dt)
    }

    /// Runs one whole frame at time `now`.
    pub fn tick(
        &mut self,
        now: Instant,
        state: &mut GameState,
        input: &impl InputSource,
        fb: &mut impl Surface,
        sink: &mut impl StatusSink,
        rng: &mut impl Rng,
    ) {
        let dt = self.frame_delta(now);
        self.simulator.advance(state, input, dt, sink);
        let depth = self.raycaster.render(fb, state);
        self.sprites.render(fb, state, &depth, rng);
        self.frames += 1;
    }

    /// Drives frames from `host` until cancelled or the host closes.
    pub fn run<H: Host>(
        &mut self,
        state: &mut GameState,
        host: &mut H,
        sink: &mut impl StatusSink,
        rng: &mut impl Rng,
    ) -> StopReason {
        log::info!("frame loop started");
        let reason = loop {
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if !host.next_frame() {
                break StopReason::HostClosed;
            }
            // the host may have cancelled while we waited for the frame
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            let input = host.input();
            self.tick(Instant::now(), state, &input, host.surface(), sink, rng);
            host.present();
        };
        log::info!("frame loop stopped after {} frames: {:?}", self.frames, reason);
        reason
    }
}
