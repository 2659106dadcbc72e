//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `tick` with an explicit delta
//! - Seeded RNG only, threaded in by the caller
//! - Stable entity order (spawn order; newest is topmost)
//! - No rendering or platform dependencies

pub mod ads;
pub mod dispatch;
pub mod rect;
pub mod resolver;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod waves;

pub use ads::{Ad, AdKind, Behavior, HitRegion, RegionRole};
pub use rect::Rect;
pub use snapshot::Snapshot;
pub use spawner::{WavePlan, generate_wave};
pub use state::{
    Boss, BossPhase, Buff, BuffKind, GameState, Particle, PlayerState, Powerup, PowerupKind,
    SessionPhase, WavePhase,
};
pub use tick::tick;
