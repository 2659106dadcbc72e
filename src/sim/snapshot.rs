//! Render-ready view of the simulation
//!
//! A `Snapshot` is a flat, serializable projection of `GameState` built once
//! per frame for whatever is drawing the game. It carries only what a
//! renderer or HUD needs; nothing in here feeds back into the simulation.

use serde::Serialize;

use super::ads::{Behavior, HitRegion};
use super::rect::Rect;
use super::state::{BossPhase, GameState, SessionPhase, WavePhase};

/// Shield status for the HUD
#[derive(Debug, Clone, Serialize)]
pub struct ShieldView {
    pub active: bool,
    pub on_cooldown: bool,
    /// Remaining active time if up, otherwise remaining cooldown
    pub remaining_ms: f32,
}

/// Active timed buff, if any
#[derive(Debug, Clone, Serialize)]
pub struct BuffView {
    pub label: &'static str,
    pub remaining_ms: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub health: i32,
    pub max_health: i32,
    pub score: u64,
    pub invulnerable: bool,
    pub shield: ShieldView,
    pub buff: Option<BuffView>,
}

/// One ad as the renderer sees it: where it is, what it looks like, and
/// which sub-rectangles are clickable right now
#[derive(Debug, Clone, Serialize)]
pub struct AdView {
    pub id: u32,
    pub kind: &'static str,
    pub bounds: Rect,
    pub regions: Vec<HitRegion>,
    /// Chat: messages delivered so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages_shown: Option<u8>,
    /// Survey: current question (0-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_index: Option<u8>,
    /// Video: time until the skip control is real
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_remaining_ms: Option<f32>,
    /// Virus: scan progress, 0..100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_percent: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerupView {
    pub id: u32,
    pub label: &'static str,
    pub pos: [f32; 2],
    pub ttl_ms: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: [f32; 2],
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub name: &'static str,
    pub description: &'static str,
    pub bounds: Rect,
    pub close: Rect,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_percent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left_ms: Option<f32>,
}

/// Wave machine status line for the HUD
#[derive(Debug, Clone, Serialize)]
pub struct WaveView {
    pub number: u32,
    pub phase: &'static str,
    /// Countdown for the phases that have one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown_ms: Option<f32>,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: &'static str,
    pub time_ms: f64,
    pub wave: WaveView,
    pub player: PlayerView,
    pub ads: Vec<AdView>,
    pub powerups: Vec<PowerupView>,
    pub particles: Vec<ParticleView>,
    pub boss: Option<BossView>,
}

impl Snapshot {
    pub fn of(state: &GameState) -> Self {
        let phase = match state.phase {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::GameOver => "game_over",
        };
        let (wave_phase, countdown_ms) = match state.wave_phase {
            WavePhase::WaveStarting { delay_ms } => ("starting", Some(delay_ms)),
            WavePhase::Spawning => ("spawning", None),
            WavePhase::Clearing => ("clearing", None),
            WavePhase::BossIntro { delay_ms } => ("boss_intro", Some(delay_ms)),
            WavePhase::BossActive => ("boss", None),
            WavePhase::BossDefeated { delay_ms } => ("boss_defeated", Some(delay_ms)),
        };
        let player = &state.player;
        let shield = ShieldView {
            active: player.shield_active(),
            on_cooldown: player.shield_on_cooldown(),
            remaining_ms: if player.shield_active() {
                player.shield_active_ms
            } else {
                player.shield_cooldown_ms
            },
        };
        let buff = player.buff.as_ref().map(|b| BuffView {
            label: b.kind.label(),
            remaining_ms: b.remaining_ms,
        });

        Self {
            phase,
            time_ms: state.time_ms,
            wave: WaveView {
                number: state.wave,
                phase: wave_phase,
                countdown_ms,
            },
            player: PlayerView {
                health: player.health,
                max_health: player.max_health,
                score: player.score,
                invulnerable: player.invulnerable(),
                shield,
                buff,
            },
            ads: state.ads.iter().map(ad_view).collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerupView {
                    id: p.id,
                    label: p.kind.label(),
                    pos: p.pos.to_array(),
                    ttl_ms: p.ttl_ms,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos.to_array(),
                    life: p.life,
                    size: p.size,
                })
                .collect(),
            boss: state.boss.as_ref().map(boss_view),
        }
    }
}

fn ad_view(ad: &super::ads::Ad) -> AdView {
    let mut view = AdView {
        id: ad.id,
        kind: ad.kind.name(),
        bounds: ad.bounds,
        regions: ad.hit_regions(),
        messages_shown: None,
        question_index: None,
        lock_remaining_ms: None,
        scan_percent: None,
    };
    match ad.behavior {
        Behavior::Chat { messages_shown, .. } => view.messages_shown = Some(messages_shown),
        Behavior::Survey { question_index } => view.question_index = Some(question_index),
        Behavior::Video { lock_ms } => view.lock_remaining_ms = Some(lock_ms.max(0.0)),
        Behavior::Virus { .. } => view.scan_percent = ad.scan_percent(),
        _ => {}
    }
    view
}

fn boss_view(boss: &super::state::Boss) -> BossView {
    let (phase, scan_percent, clicks_left, time_left_ms) = match boss.phase {
        BossPhase::Scanning { percent } => ("scanning", Some(percent), None, None),
        BossPhase::Confrontation {
            clicks_left,
            time_left_ms,
        } => ("confrontation", None, Some(clicks_left), Some(time_left_ms)),
        BossPhase::Defeated => ("defeated", None, None, None),
    };
    BossView {
        name: boss.name(),
        description: boss.description(),
        bounds: boss.bounds,
        close: boss.close_region(),
        phase,
        scan_percent,
        clicks_left,
        time_left_ms,
    }
}
