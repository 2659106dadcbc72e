//! Popup Panic - simulation core for a malicious-popup defense arcade game
//!
//! The player fends off a stream of hostile "ad" overlays by clicking their
//! real dismiss controls while avoiding decoy buttons, timed hazards, and a
//! periodic boss encounter. This crate is the whole game except pixels: a
//! presentation layer drives it with pointer events and `tick`, and draws
//! from read-only snapshots.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, interaction, waves)
//! - `session`: External interface the presentation/input layer talks to
//! - `config`: Data-driven tuning loaded from JSON

pub mod config;
pub mod session;
pub mod sim;

pub use config::Config;
pub use session::{FinalSummary, Session};

/// Game configuration constants
pub mod consts {
    /// Logical play area the presentation layer maps the screen onto
    pub const VIEW_WIDTH: f32 = 1280.0;
    pub const VIEW_HEIGHT: f32 = 720.0;

    /// Minimum gap between a spawned ad and the play area edge
    pub const SPAWN_MARGIN: f32 = 8.0;

    /// Damage dealt by any decoy/fake control
    pub const DECOY_DAMAGE: i32 = 15;

    /// Chaser contact damage and how often it re-applies while overlapped
    pub const CHASER_CONTACT_DAMAGE: i32 = 5;
    pub const CHASER_CONTACT_PERIOD_MS: f32 = 500.0;
    pub const CHASER_SPEED: f32 = 120.0;

    /// Virus scan runtime and the payload it delivers if it completes
    pub const VIRUS_SCAN_MS: f32 = 8_000.0;
    pub const VIRUS_PAYLOAD_DAMAGE: i32 = 20;

    /// Chat nag cadence and per-message damage after the first
    pub const CHAT_MESSAGE_PERIOD_MS: f32 = 1_500.0;
    pub const CHAT_MESSAGE_COUNT: u8 = 5;
    pub const CHAT_NAG_DAMAGE: i32 = 2;

    /// Video ads unlock their close control after this countdown
    pub const VIDEO_LOCK_MS: f32 = 5_000.0;

    /// Gremlin close buttons relocate at most this many times
    pub const GREMLIN_MAX_DODGES: u8 = 4;

    /// Survey length
    pub const SURVEY_QUESTIONS: u8 = 3;

    /// Boss tuning
    pub const BOSS_SCAN_MS: f32 = 10_000.0;
    pub const BOSS_CONFRONT_MS: f32 = 25_000.0;
    pub const BOSS_CLICKS_REQUIRED: u32 = 10;
    pub const BOSS_MINION_PERIOD_MS: f32 = 4_000.0;
    pub const BOSS_MINION_AD_CAP: usize = 10;
    pub const BOSS_SLAM_DAMAGE: i32 = 20;

    /// Visual particle budget
    pub const MAX_PARTICLES: usize = 256;
}
