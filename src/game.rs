//! Single-writer game driver
//!
//! `Game` owns the [`GameState`] and is the only thing that mutates it. Input
//! and scheduler wakeups arrive as plain method calls from one thread; the
//! driver re-arms the next tick only while the state says `Playing`.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::schedule::{Scheduler, VirtualClock, Wakeup, WakeupKind};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::tick::{TickOutcome, resume_round, restart, start, tick};

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Horizontal paddle offset in pixels
    MovePaddle(f32),
    Start,
    Restart,
}

pub struct Game<S> {
    config: GameConfig,
    state: GameState,
    scheduler: S,
    /// The one wakeup the driver is waiting for, if any
    armed: Option<Wakeup>,
    generation: u64,
}

impl<S: Scheduler> Game<S> {
    pub fn new(config: GameConfig, scheduler: S) -> Result<Self, ConfigError> {
        let state = GameState::new(&config)?;
        Ok(Self {
            config,
            state,
            scheduler,
            armed: None,
            generation: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that script positions (level editors, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The wakeup currently awaited
    pub fn armed(&self) -> Option<Wakeup> {
        self.armed
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::MovePaddle(offset) => {
                self.state.move_paddle(offset);
            }
            Input::Start => {
                if start(&mut self.state) {
                    // First tick runs right away, later ones on the interval
                    self.run_tick();
                }
            }
            Input::Restart => {
                if restart(&mut self.state, &self.config) {
                    self.armed = None;
                }
            }
        }
    }

    /// Deliver a wakeup. Returns false if it was not the armed one and was dropped.
    pub fn on_wakeup(&mut self, wakeup: Wakeup) -> bool {
        if self.armed != Some(wakeup) {
            log::debug!("Dropping stale wakeup {wakeup:?} (armed {:?})", self.armed);
            return false;
        }
        self.armed = None;

        match wakeup.kind {
            WakeupKind::Tick => self.run_tick(),
            WakeupKind::ResumeRound => {
                resume_round(&mut self.state, &self.config);
            }
        }
        true
    }

    fn run_tick(&mut self) {
        match tick(&mut self.state, &self.config) {
            TickOutcome::Continue => self.arm(WakeupKind::Tick),
            TickOutcome::LifeLost => self.arm(WakeupKind::ResumeRound),
            TickOutcome::Won | TickOutcome::Lost | TickOutcome::Idle => {}
        }
    }

    fn arm(&mut self, kind: WakeupKind) {
        self.generation += 1;
        let wakeup = Wakeup {
            kind,
            generation: self.generation,
        };
        let delay = match kind {
            WakeupKind::Tick => self.config.tick_interval(),
            WakeupKind::ResumeRound => self.config.life_lost_pause(),
        };
        self.armed = Some(wakeup);
        self.scheduler.schedule_once(delay, wakeup);
    }
}

impl Game<VirtualClock> {
    /// Jump the virtual clock to the next wakeup and deliver it
    pub fn fire_next(&mut self) -> Option<Wakeup> {
        let (_, wakeup) = self.scheduler.pop_next()?;
        self.on_wakeup(wakeup);
        Some(wakeup)
    }

    /// Deliver wakeups until none are pending or `limit` have fired.
    /// Returns how many fired.
    pub fn run_until_idle(&mut self, limit: usize) -> usize {
        let mut fired = 0;
        while fired < limit && self.fire_next().is_some() {
            fired += 1;
        }
        fired
    }
}
