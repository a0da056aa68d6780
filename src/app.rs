//! Frame driver: polls for quit, advances the camera, renders and presents
//! until the user closes the view.

use crate::config::{Args, FRAME_DELAY_MS};
use crate::context::RenderContext;
use crate::error::ContextError;
use crate::scene::Scene;
use crate::state::SceneState;
use crate::terminal::Terminal;
use anyhow::Context;
use log::info;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Terminated,
}

/// Caps the loop at a target frame rate
pub struct FrameLimiter {
    frame_budget: Duration,
    last_tick: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        FrameLimiter {
            frame_budget: Duration::from_secs(1) / fps.max(1),
            last_tick: Instant::now(),
        }
    }

    /// Sleeps until a full frame budget has passed since the previous tick
    pub fn tick(&mut self) {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.last_tick = Instant::now();
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.frame_budget
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }
}

/// Measures frames per second over one-second windows
pub struct FpsCounter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn frame(&mut self) {
        self.frame_at(Instant::now());
    }

    fn frame_at(&mut self, now: Instant) {
        self.frames_since_last_update += 1;
        let duration = now.saturating_duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

pub struct App {
    args: Args,
    terminal: Terminal,
    ctx: RenderContext,
    scene: Scene,
    state: SceneState,
    run_state: RunState,
    started: Instant,
}

impl App {
    /// Opens the terminal surface and prepares the scene
    pub fn new(args: Args) -> anyhow::Result<Self> {
        let terminal = Terminal::open()?;
        let (width, height) = terminal.pixel_size();
        let ctx = RenderContext::new(width, height)?;
        info!("render surface {}x{} pixels", ctx.width(), ctx.height());
        let scene = Scene::new().context("failed to tessellate the scene")?;

        Ok(App {
            args,
            terminal,
            ctx,
            scene,
            state: SceneState::new(),
            run_state: RunState::Running,
            started: Instant::now(),
        })
    }

    pub fn run(&mut self) -> Result<(), ContextError> {
        info!("running at up to {} fps", self.args.fps);
        let mut limiter = FrameLimiter::new(self.args.fps);
        let mut fps = FpsCounter::new();
        let frame_delay = Duration::from_millis(FRAME_DELAY_MS);
        let mut frames: u64 = 0;

        while self.run_state == RunState::Running {
            if self.terminal.poll_quit()? {
                self.run_state = RunState::Terminated;
                continue;
            }

            self.state.advance();
            let elapsed = self.started.elapsed().as_secs_f64();
            self.scene.draw(&mut self.ctx, &self.state, elapsed);

            let overlay = if self.args.debug {
                self.overlay(elapsed, fps.fps())
            } else {
                Vec::new()
            };
            self.terminal.present(self.ctx.frame(), &overlay)?;
            fps.frame();
            frames += 1;

            thread::sleep(frame_delay);
            limiter.tick();
        }

        info!(
            "quit after {frames} frames, {:.1}s",
            self.started.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn overlay(&self, elapsed: f64, fps: f64) -> Vec<String> {
        vec![
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!(
                "Rotation X: {:.0}, Rotation Y: {:.0}",
                self.state.rotation_x, self.state.rotation_y
            ),
            format!("Elapsed: {elapsed:.2}s"),
            format!("FPS: {fps:.2}"),
            "Esc/q to quit".to_string(),
        ]
    }
}
