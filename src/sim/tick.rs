//! Fixed-interval simulation tick and the input-driven phase transitions
//!
//! Everything here is synchronous and deterministic. Scheduling of the next
//! tick belongs to the driver, which looks at the returned [`TickOutcome`].

use super::collision::check_collisions;
use super::physics::advance;
use super::state::{GameEvent, GamePhase, GameState, Prompt};
use crate::config::GameConfig;

/// What a tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// Ball moved, keep ticking
    Continue,
    /// Last brick gone
    Won,
    /// Ball left through the bottom, lives remain
    LifeLost,
    /// Ball left through the bottom with no lives to spare
    Lost,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, config: &GameConfig) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    state.time_ticks += 1;
    check_collisions(state, config.points_per_brick_hit);

    // A cleared board wins even if the ball is also leaving through the bottom
    if state.bricks.is_empty() {
        log::info!("All bricks cleared, score {}", state.score);
        state.set_phase(GamePhase::Won);
        state.events.push(GameEvent::PromptShown(Prompt::Won));
        return TickOutcome::Won;
    }

    if state.ball.bounds().max.y >= state.arena.y {
        return lose_life(state);
    }

    let delta = advance(&mut state.ball, state.arena);
    state.events.push(GameEvent::Moved {
        id: state.ball.id,
        delta,
    });
    log::trace!(
        "Tick {}: ball at {:?} heading {:?}",
        state.time_ticks,
        state.ball.body.center,
        state.ball.direction
    );
    TickOutcome::Continue
}

fn lose_life(state: &mut GameState) -> TickOutcome {
    if state.lives > 0 {
        state.events.push(GameEvent::LifeIndicatorRemoved);
    }
    state.lives -= 1;
    state.events.push(GameEvent::LivesChanged { lives: state.lives });

    if state.lives < 0 {
        log::info!("Game over, final score {}", state.score);
        state.set_phase(GamePhase::Lost);
        state.events.push(GameEvent::PromptShown(Prompt::GameOver {
            score: state.score,
        }));
        TickOutcome::Lost
    } else {
        log::info!("Ball lost, {} lives left", state.lives);
        state.set_phase(GamePhase::LifeLostPause);
        TickOutcome::LifeLost
    }
}

/// Launch the carried ball. Only valid while awaiting start.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::AwaitingStart {
        return false;
    }
    state.events.push(GameEvent::PromptCleared);
    state.paddle.carried = None;
    state.set_phase(GamePhase::Playing);
    log::info!("Round started, {} lives, score {}", state.lives, state.score);
    true
}

/// Set up the next serve once the life-lost pause has elapsed
pub fn resume_round(state: &mut GameState, config: &GameConfig) -> bool {
    if state.phase != GamePhase::LifeLostPause {
        return false;
    }
    state.setup_round(config);
    true
}

/// Reset score and lives after a win or loss and set up a new serve.
///
/// Bricks are left as they are unless `rebuild_bricks_on_restart` is set.
///
/// # Panics
///
/// If the bricks are rebuilt from a layout that fails validation. `config`
/// must be the one the state was built from.
pub fn restart(state: &mut GameState, config: &GameConfig) -> bool {
    if !state.phase.is_over() {
        return false;
    }

    if config.rebuild_bricks_on_restart {
        state
            .lay_out_bricks(config)
            .expect("brick layout was validated when the state was built");
    }

    state.score = 0;
    state.events.push(GameEvent::ScoreChanged { score: 0 });
    state.lives = config.initial_lives;
    state.events.push(GameEvent::PromptCleared);

    log::info!("Restarting with {} lives, {} bricks", state.lives, state.bricks.len());
    state.setup_round(config);
    true
}
