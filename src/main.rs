//! Terminal stacker runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `stacker-term`.
//! Each frame: render, poll input until the next tick, apply any action, then
//! step the game with the time that actually passed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::info;

use stacker::cli::{load_config, parse_args, USAGE};
use stacker::core::TetrisGame;
use stacker::input::{map_key, InputCommand};
use stacker::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use stacker::types::{GameConfig, TICK_MS};

fn main() -> Result<()> {
    // Silent unless RUST_LOG is set; stderr shares the terminal with the view.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }
    let config = load_config(&options)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// A started game. Without a configured seed every game gets a fresh one.
fn new_game(config: GameConfig) -> Result<TetrisGame> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut game = TetrisGame::new(GameConfig {
        seed: Some(seed),
        ..config
    })
    .context("invalid config")?;
    info!("new game, seed {}", seed);
    game.start();
    Ok(game)
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut game = new_game(config)?;
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut paused = false;

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Overlay { paused }, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(InputCommand::Quit) => return Ok(()),
                    Some(InputCommand::Pause) => paused = !paused,
                    Some(InputCommand::Restart) => {
                        game = new_game(config)?;
                        paused = false;
                    }
                    Some(InputCommand::Play(action)) if !paused => {
                        game.apply(action)?;
                    }
                    _ => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            if !paused {
                let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
                game.step(elapsed_ms)?;
            }
        }
    }
}
