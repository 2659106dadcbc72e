//! External interface
//!
//! `Session` is the single object a host embeds: it owns the game state, the
//! tuning, and the RNG, and exposes the handful of calls a presentation
//! layer needs. Input arrives as pointer coordinates in the logical
//! `consts::VIEW_WIDTH` by `consts::VIEW_HEIGHT` space; output leaves as
//! `Snapshot` values. Two sessions built with the same seed and driven with
//! the same call sequence stay identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::Config;
use crate::sim::snapshot::Snapshot;
use crate::sim::state::{GameState, SessionPhase};
use crate::sim::{dispatch, tick, waves};

/// End-of-session result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalSummary {
    pub score: u64,
    pub wave_reached: u32,
}

/// A complete game session: state, tuning, and randomness under one owner
pub struct Session {
    state: GameState,
    config: Config,
    rng: Pcg32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Config::default())
    }

    pub fn with_config(seed: u64, config: Config) -> Self {
        Self {
            state: GameState::new(&config),
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start a fresh run. Also serves as restart after a game over.
    pub fn start_session(&mut self) {
        self.state.reset(&self.config);
        waves::start_next_wave(&mut self.state, &self.config);
        log::info!("session started");
    }

    /// Advance the simulation by `delta_ms` of wall time
    pub fn tick(&mut self, delta_ms: f32) {
        tick::tick(&mut self.state, &mut self.rng, &self.config, delta_ms);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        dispatch::handle_pointer_move(&mut self.state, &mut self.rng, x, y);
    }

    /// Primary action (click/tap) at the current pointer position
    pub fn on_primary_action(&mut self) {
        dispatch::handle_primary(&mut self.state, &mut self.rng, &self.config);
    }

    /// Secondary action: raise the shield
    pub fn on_secondary_action(&mut self) {
        dispatch::handle_secondary(&mut self.state, &self.config);
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == SessionPhase::GameOver
    }

    /// Result of the run; meaningful once `is_game_over` returns true
    pub fn final_summary(&self) -> FinalSummary {
        FinalSummary {
            score: self.state.player.score,
            wave_reached: self.state.wave_reached,
        }
    }

    /// Direct state access for tests and trusted embedders
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
