//! Terminal memory-match runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Score storage runs on a background worker so saving or loading the
//! leaderboard never stalls the clock.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use memory_match::app::{App, Control};
use memory_match::config::AppConfig;
use memory_match::core::Dealer;
use memory_match::logging::init_file_logging;
use memory_match::store::{ScoreStore, StoreWorker};
use memory_match::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use memory_match::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let _log_guard = match &config.log_path {
        Some(path) => Some(init_file_logging(path)?),
        None => None,
    };

    let store = ScoreStore::from_config(&config.store)?;
    if !store.has_remote() {
        info!(path = %config.store.local_path.display(), "remote store not configured, scores stay local");
    }
    let mut worker = StoreWorker::start(store)?;

    let seed = config.seed.unwrap_or_else(|| Dealer::from_entropy().seed());
    let mut app = App::new(seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &mut worker);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!(error = %e, "failed to restore terminal");
    }
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, worker: &mut StoreWorker) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&app.scene(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Control::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Store traffic.
        for (id, request) in app.drain_requests() {
            worker.dispatch(id, request);
        }
        while let Some(reply) = worker.try_recv() {
            app.on_store_reply(reply);
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }
}
