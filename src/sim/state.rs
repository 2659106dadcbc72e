//! Game state and core simulation types
//!
//! All mutable session state lives in one [`GameState`]: player resources,
//! the active ad set, powerups, particles, the boss, and the wave machine.
//! Everything timed is a countdown in milliseconds, decremented by `tick`;
//! entity-owned countdowns live inside the entity record, so destroying the
//! entity cancels them by construction.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ads::{Ad, AdKind};
use crate::config::Config;

/// Top-level session phase gating the whole simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created but never started
    Idle,
    /// Active gameplay
    Running,
    /// Health hit zero; terminal until restart
    GameOver,
}

/// Wave/boss orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Wave announced, counting down to spawning (or the boss intro)
    WaveStarting { delay_ms: f32 },
    /// Staggered spawns still pending
    Spawning,
    /// All spawns staged; waiting for the active ad set to empty
    Clearing,
    /// Boss metadata on display, counting down to the fight
    BossIntro { delay_ms: f32 },
    /// Boss phase logic running; normal wave auto-advance suppressed
    BossActive,
    /// Boss beaten, short pause before the next wave
    BossDefeated { delay_ms: f32 },
}

/// Timed buff kinds granted by powerups (mutually exclusive with the shield
/// and with each other)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    IronCursor,
    ScoreSurge,
    SystemFreeze,
    AutoShield,
}

impl BuffKind {
    pub fn label(&self) -> &'static str {
        match self {
            BuffKind::IronCursor => "IRON CURSOR",
            BuffKind::ScoreSurge => "SCORE SURGE",
            BuffKind::SystemFreeze => "SYSTEM FREEZE",
            BuffKind::AutoShield => "AUTO SHIELD",
        }
    }
}

/// A running timed buff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    pub remaining_ms: f32,
}

/// Player resource state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Clamped to [0, max_health]
    pub health: i32,
    pub max_health: i32,
    pub score: u64,
    /// Applied to every score award; 1.0 unless ScoreSurge is running
    pub score_multiplier: f32,
    /// Post-hit invulnerability window (i-frames), counts down to 0
    pub invuln_ms: f32,
    /// > 0 while the shield is up
    pub shield_active_ms: f32,
    /// > 0 while shield reactivation is locked out (measured from activation)
    pub shield_cooldown_ms: f32,
    /// Timed powerup effect, if any
    pub buff: Option<Buff>,
}

impl PlayerState {
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            score: 0,
            score_multiplier: 1.0,
            invuln_ms: 0.0,
            shield_active_ms: 0.0,
            shield_cooldown_ms: 0.0,
            buff: None,
        }
    }

    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.invuln_ms > 0.0
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_active_ms > 0.0
    }

    #[inline]
    pub fn shield_on_cooldown(&self) -> bool {
        self.shield_cooldown_ms > 0.0
    }

    pub fn buff_kind(&self) -> Option<BuffKind> {
        self.buff.map(|b| b.kind)
    }

    /// True while damage is suppressed entirely
    pub fn protected(&self) -> bool {
        self.invulnerable()
            || self.shield_active()
            || matches!(
                self.buff_kind(),
                Some(BuffKind::IronCursor) | Some(BuffKind::AutoShield)
            )
    }

    /// True while any exclusive buff blocks activating another one
    pub fn exclusive_buff_active(&self) -> bool {
        self.shield_active() || self.buff.is_some()
    }
}

/// Collectible powerup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Clears every active ad for zero reward
    Bomb,
    /// Clears the few ads nearest the pickup for zero reward
    ClusterBomb,
    IronCursor,
    ScoreSurge,
    SystemFreeze,
    AutoShield,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 6] = [
        PowerupKind::Bomb,
        PowerupKind::ClusterBomb,
        PowerupKind::IronCursor,
        PowerupKind::ScoreSurge,
        PowerupKind::SystemFreeze,
        PowerupKind::AutoShield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerupKind::Bomb => "BOMB",
            PowerupKind::ClusterBomb => "CLUSTER BOMB",
            PowerupKind::IronCursor => "IRON CURSOR",
            PowerupKind::ScoreSurge => "SCORE SURGE",
            PowerupKind::SystemFreeze => "SYSTEM FREEZE",
            PowerupKind::AutoShield => "AUTO SHIELD",
        }
    }
}

/// Radius within which a click collects a powerup
pub const POWERUP_PICK_RADIUS: f32 = 28.0;

/// A collectible powerup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    /// Despawns uncollected when this hits 0
    pub ttl_ms: f32,
}

/// A particle for destruction bursts (visual only, never gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Boss encounter phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Scan bar filling; the dismiss control is a decoy during this phase
    Scanning { percent: f32 },
    /// Timed window where the dismiss control is real; runs out, boss slams
    Confrontation { clicks_left: u32, time_left_ms: f32 },
    Defeated,
}

/// The periodic boss encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub phase: BossPhase,
    pub bounds: crate::sim::rect::Rect,
    /// Counts down to the next minion spawn while active
    pub minion_timer_ms: f32,
}

impl Boss {
    pub fn new(area: &crate::sim::rect::Rect) -> Self {
        Self {
            phase: BossPhase::Scanning { percent: 0.0 },
            bounds: crate::sim::rect::Rect::centered_in(area, 480.0, 320.0),
            minion_timer_ms: crate::consts::BOSS_MINION_PERIOD_MS,
        }
    }

    pub fn name(&self) -> &'static str {
        "TOTAL SYSTEM SCAN"
    }

    pub fn description(&self) -> &'static str {
        "Definitely-legitimate antivirus auditing your machine"
    }

    /// The boss dismiss control (real during Confrontation, decoy otherwise)
    pub fn close_region(&self) -> crate::sim::rect::Rect {
        self.bounds.sub_top_right(8.0, 8.0, 32.0, 32.0)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: SessionPhase,
    /// Wave counter; 0 until the first wave starts
    pub wave: u32,
    pub wave_phase: WavePhase,
    pub player: PlayerState,
    /// Active ads in spawn order (newest last = visually topmost)
    pub ads: Vec<Ad>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    /// At most one boss at a time
    pub boss: Option<Boss>,
    /// Latest pointer position in view coordinates
    pub pointer: Vec2,
    /// Ad kinds staged by the spawner, drained on a stagger timer
    pub pending_spawns: VecDeque<AdKind>,
    /// Counts down to the next staggered spawn
    pub spawn_stagger_ms: f32,
    /// Total simulated time
    pub time_ms: f64,
    /// Highest wave started, recorded for the final summary
    pub wave_reached: u32,
    next_id: u32,
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        Self {
            phase: SessionPhase::Idle,
            wave: 0,
            wave_phase: WavePhase::WaveStarting { delay_ms: 0.0 },
            player: PlayerState::new(config.player.max_health),
            ads: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            boss: None,
            pointer: Vec2::new(
                crate::consts::VIEW_WIDTH / 2.0,
                crate::consts::VIEW_HEIGHT / 2.0,
            ),
            pending_spawns: VecDeque::new(),
            spawn_stagger_ms: 0.0,
            time_ms: 0.0,
            wave_reached: 0,
            next_id: 1,
        }
    }

    /// Shared reset path for start and restart
    pub fn reset(&mut self, config: &Config) {
        self.phase = SessionPhase::Running;
        self.wave = 0;
        self.wave_phase = WavePhase::WaveStarting { delay_ms: 0.0 };
        self.player = PlayerState::new(config.player.max_health);
        self.ads.clear();
        self.powerups.clear();
        self.particles.clear();
        self.boss = None;
        self.pending_spawns.clear();
        self.spawn_stagger_ms = 0.0;
        self.time_ms = 0.0;
        self.wave_reached = 0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up an active ad by id; stale ids resolve to None
    pub fn ad_by_id(&self, id: u32) -> Option<&Ad> {
        self.ads.iter().find(|a| a.id == id)
    }

    pub fn ad_by_id_mut(&mut self, id: u32) -> Option<&mut Ad> {
        self.ads.iter_mut().find(|a| a.id == id)
    }

    /// The whole logical play area
    pub fn play_area(&self) -> crate::sim::rect::Rect {
        crate::sim::rect::Rect::new(
            0.0,
            0.0,
            crate::consts::VIEW_WIDTH,
            crate::consts::VIEW_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_everything() {
        let config = Config::default();
        let mut state = GameState::new(&config);
        state.player.score = 500;
        state.player.health = 10;
        state.wave = 7;
        let id = state.next_entity_id();
        state.powerups.push(Powerup {
            id,
            kind: PowerupKind::Bomb,
            pos: Vec2::ZERO,
            ttl_ms: 1000.0,
        });

        state.reset(&config);
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.health, config.player.max_health);
        assert_eq!(state.wave, 0);
        assert!(state.powerups.is_empty());
        assert!(state.ads.is_empty());
        assert!(state.boss.is_none());
    }

    #[test]
    fn test_entity_ids_monotonic_across_reset() {
        let config = Config::default();
        let mut state = GameState::new(&config);
        let a = state.next_entity_id();
        state.reset(&config);
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_protected_flags() {
        let mut p = PlayerState::new(100);
        assert!(!p.protected());

        p.invuln_ms = 500.0;
        assert!(p.protected());
        p.invuln_ms = 0.0;

        p.shield_active_ms = 100.0;
        assert!(p.protected());
        assert!(p.exclusive_buff_active());
        p.shield_active_ms = 0.0;

        p.buff = Some(Buff {
            kind: BuffKind::IronCursor,
            remaining_ms: 100.0,
        });
        assert!(p.protected());

        // ScoreSurge is exclusive but does not suppress damage
        p.buff = Some(Buff {
            kind: BuffKind::ScoreSurge,
            remaining_ms: 100.0,
        });
        assert!(!p.protected());
        assert!(p.exclusive_buff_active());
    }
}
