//! Break Bricks headless runner
//!
//! Plays the game in demo mode against a virtual clock and reports the result.
//! With `--realtime` the runner sleeps through every scheduled delay.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use break_bricks::autopilot::Autopilot;
use break_bricks::render::{HudState, Presenter, RecordingCanvas};
use break_bricks::sim::GamePhase;
use break_bricks::{Game, GameConfig, VirtualClock};

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "break-bricks", about = "Headless brick breaker demo")]
struct Args {
    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this many scheduler wakeups
    #[arg(long, default_value_t = 100_000)]
    max_ticks: usize,
    /// Sleep for real through tick intervals and pauses
    #[arg(long)]
    realtime: bool,
    /// Games to restart after a win or loss
    #[arg(long, default_value_t = 0)]
    restarts: u32,
    /// Print every simulation event as a JSON line
    #[arg(long)]
    events: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    log::info!("Break Bricks starting...");

    let arena = config.arena();
    let step = config.paddle_step;
    let mut game = Game::new(config, VirtualClock::new()).context("building game")?;
    let mut presenter =
        Presenter::new(RecordingCanvas::new(arena.x), HudState::default(), arena);
    let mut pilot = Autopilot::new(step, args.restarts);

    let mut fired = 0;
    loop {
        if let Some(input) = pilot.next_input(game.state()) {
            log::debug!("Input {input:?}");
            game.handle_input(input);
        }

        let events = game.drain_events();
        if args.events {
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
        presenter.apply_all(&events);

        if fired >= args.max_ticks {
            log::warn!("Stopping after {fired} wakeups");
            break;
        }

        match game.scheduler_mut().pop_next() {
            Some((waited, wakeup)) => {
                if args.realtime {
                    std::thread::sleep(waited);
                }
                game.on_wakeup(wakeup);
                fired += 1;
            }
            None => match game.phase() {
                GamePhase::AwaitingStart => continue,
                phase if phase.is_over() && pilot.restarts_left() > 0 => continue,
                phase if phase.is_over() => break,
                phase => {
                    log::error!("Nothing scheduled in phase {phase:?}");
                    break;
                }
            },
        }
    }

    let hud = presenter.hud();
    let elapsed: Duration = game.scheduler().now();
    println!(
        "{:?} after {} wakeups ({:.1}s simulated): score {}, lives {}, bricks left {}",
        game.phase(),
        fired,
        elapsed.as_secs_f32(),
        hud.score,
        hud.lives.max(0),
        game.state().bricks.len()
    );
    Ok(())
}
