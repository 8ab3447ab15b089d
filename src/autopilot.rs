//! Demo mode - the computer plays the game
//!
//! Produces the same [`Input`]s a player would: start when waiting, chase the
//! ball with fixed-size paddle steps, restart after a game ends.

use crate::game::Input;
use crate::sim::state::{GamePhase, GameState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Offset of one paddle step
    step: f32,
    /// Games left to restart after a win or loss
    restarts_left: u32,
}

impl Autopilot {
    pub fn new(step: f32, restarts: u32) -> Self {
        Self {
            step,
            restarts_left: restarts,
        }
    }

    pub fn restarts_left(&self) -> u32 {
        self.restarts_left
    }

    /// Next input to send, if any
    pub fn next_input(&mut self, state: &GameState) -> Option<Input> {
        match state.phase {
            GamePhase::AwaitingStart => Some(Input::Start),
            GamePhase::Playing => self.steer(state),
            GamePhase::LifeLostPause => None,
            GamePhase::Won | GamePhase::Lost => {
                if self.restarts_left > 0 {
                    self.restarts_left -= 1;
                    Some(Input::Restart)
                } else {
                    None
                }
            }
        }
    }

    fn steer(&self, state: &GameState) -> Option<Input> {
        let paddle = state.paddle.bounds();
        let half_width = (paddle.max.x - paddle.min.x) * 0.5;

        // Drift the aim across the paddle so the ball sometimes catches an edge
        let time_factor = state.time_ticks as f32 * 0.05;
        let offset = (time_factor.sin() * 0.6 + (time_factor * 0.37).sin() * 0.3) * half_width;
        let target = state.ball.bounds().center_x() + offset;

        let error = target - paddle.center_x();
        if error.abs() < self.step * 0.5 {
            None
        } else if error > 0.0 {
            Some(Input::MovePaddle(self.step))
        } else {
            Some(Input::MovePaddle(-self.step))
        }
    }
}
