//! Terminal tower stacking runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer. The
//! game runs on a fixed timestep; rendering is throttled while nothing moves.

use std::ffi::OsString;
use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tower_stack::engine::config::ENV_LOG_FILE;
use tower_stack::engine::{Config, Scene, Session};
use tower_stack::input::{handle_key_event, handle_mouse_event, should_quit};
use tower_stack::term::{
    scene_fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};

/// Redraw interval when the scene is not changing.
const STATIC_REDRAW_MS: u64 = 250;

/// Ticks to catch up on after a stall before dropping the backlog.
const MAX_CATCH_UP_TICKS: u32 = 8;

fn main() -> Result<()> {
    init_logging(std::env::var_os(ENV_LOG_FILE))?;

    let config = Config::from_env();
    let mut session = Session::new(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        "exit at {}ms, phase {}, score {}",
        session.clock_ms(),
        session.phase().as_str(),
        session.game().score()
    );
    result
}

/// Send log output to a file; stderr belongs to the alternate screen.
fn init_logging(path: Option<OsString>) -> Result<()> {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);
    let mut scene = Scene::default();

    let started = Instant::now();
    let tick_duration = Duration::from_millis(session.tick_ms() as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.scene_into(&mut scene);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, scene_fingerprint(&scene), scene.is_static()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&scene, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                // Terminal auto-repeat and releases are ignored; one press is one action.
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = handle_mouse_event(mouse) {
                        session.apply(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let mut caught_up = 0;
        while last_tick.elapsed() >= tick_duration {
            if caught_up == MAX_CATCH_UP_TICKS {
                last_tick = Instant::now();
                break;
            }
            last_tick += tick_duration;
            session.step();
            caught_up += 1;
        }
    }
}
