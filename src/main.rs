// main.rs
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

use raycast_shooter::core::level;
use raycast_shooter::{
    Action, CancelToken, FrameDriver, Framebuffer, GameConfig, GameState, Host, InputSnapshot,
    InputSource, Status, WorldMap, config,
};

const KEYMAP: &[(KeyboardKey, Action)] = &[
    (KeyboardKey::KEY_W, Action::MoveForward),
    (KeyboardKey::KEY_UP, Action::MoveForward),
    (KeyboardKey::KEY_S, Action::MoveBack),
    (KeyboardKey::KEY_DOWN, Action::MoveBack),
    (KeyboardKey::KEY_A, Action::TurnLeft),
    (KeyboardKey::KEY_LEFT, Action::TurnLeft),
    (KeyboardKey::KEY_D, Action::TurnRight),
    (KeyboardKey::KEY_RIGHT, Action::TurnRight),
    (KeyboardKey::KEY_SPACE, Action::Fire),
];

#[inline]
fn to_rl(c: raycast_shooter::Color) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

// any bound key held counts as the action being pressed
struct Keys<'a>(&'a RaylibHandle);

impl InputSource for Keys<'_> {
    fn is_pressed(&self, action: Action) -> bool {
        KEYMAP
            .iter()
            .any(|&(key, bound)| bound == action && self.0.is_key_down(key))
    }
}

struct RaylibHost {
    rl: RaylibHandle,
    thread: RaylibThread,
    framebuffer: Framebuffer,
    texture: Texture2D,
    status: Rc<Cell<Status>>,
    cancel: CancelToken,
}

impl Host for RaylibHost {
    type Input = InputSnapshot;
    type Surface = Framebuffer;

    fn next_frame(&mut self) -> bool {
        if self.rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            self.cancel.cancel();
        }
        !self.rl.window_should_close()
    }

    fn input(&mut self) -> InputSnapshot {
        InputSnapshot::capture(&Keys(&self.rl))
    }

    fn surface(&mut self) -> &mut Framebuffer {
        self.framebuffer.clear();
        &mut self.framebuffer
    }

    fn present(&mut self) {
        if let Err(e) = self.texture.update_texture(&self.framebuffer.to_rgba_bytes()) {
            log::warn!("framebuffer upload failed: {e}");
        }
        let status = self.status.get();
        let fps = self.rl.get_fps();

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&self.texture, 0, 0, Color::WHITE);
        for g in &self.framebuffer.glyphs {
            let size = g.size.round() as i32;
            let w = raylib::core::text::measure_text(&g.text, size);
            d.draw_text(
                &g.text,
                g.cx as i32 - w / 2,
                g.cy as i32 - size / 2,
                size,
                to_rl(g.color),
            );
        }
        d.draw_text(
            &format!("HP {}  AMMO {}  SCORE {}", status.health, status.ammo, status.score),
            10,
            10,
            20,
            Color::WHITE,
        );
        d.draw_text(&format!("FPS: {fps}"), 10, 34, 16, Color::GRAY);
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cfg_path = std::env::var_os("RAYCAST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("raycast.toml"));
    let cfg: GameConfig = config::load(&cfg_path).context("load config")?;

    let map = match std::env::var_os("RAYCAST_MAP") {
        Some(path) => WorldMap::load(&PathBuf::from(path)).context("load map")?,
        None => level::default_map().context("built-in level")?,
    };
    let mut state = GameState::new(map, level::default_roster(), level::SPAWN, level::FACING, &cfg)
        .context("start session")?;

    let (w, h) = (cfg.screen_width, cfg.screen_height);
    let (mut rl, thread) = raylib::init()
        .size(w as i32, h as i32)
        .title("Raycast Shooter")
        .build();
    rl.set_target_fps(60);
    rl.set_exit_key(None);

    let img = Image::gen_image_color(w as i32, h as i32, Color::BLACK);
    let texture = rl
        .load_texture_from_image(&thread, &img)
        .map_err(|e| anyhow!("framebuffer texture: {e}"))?;

    let mut driver = FrameDriver::new(cfg);
    let status = Rc::new(Cell::new(state.status()));
    let mut host = RaylibHost {
        rl,
        thread,
        framebuffer: Framebuffer::new(w, h),
        texture,
        status: Rc::clone(&status),
        cancel: driver.cancel_token(),
    };

    let mut rng = rand::thread_rng();
    let reason = driver.run(&mut state, &mut host, &mut |s: Status| status.set(s), &mut rng);
    let last = status.get();
    log::info!(
        "session over ({reason:?}): health {}, ammo {}, score {}",
        last.health,
        last.ammo,
        last.score
    );
    Ok(())
}
