//! Wave and boss orchestration
//!
//! Drives the wave state machine: announce, stage staggered spawns, wait for
//! the field to clear, advance. Every boss-interval wave the normal spawn
//! list is replaced by a multi-phase boss encounter; while a boss is active
//! the empty-field auto-advance is suppressed.

use rand::Rng;

use super::ads::{Ad, AdKind};
use super::resolver;
use super::spawner;
use super::state::{Boss, BossPhase, GameState, WavePhase};
use crate::config::Config;
use crate::consts;

/// Begin the next wave: bump the counter and announce
pub fn start_next_wave(state: &mut GameState, config: &Config) {
    state.wave += 1;
    state.wave_reached = state.wave;
    state.wave_phase = WavePhase::WaveStarting {
        delay_ms: config.game.wave_start_delay_ms,
    };
    log::info!("wave {} starting", state.wave);
}

/// Advance the orchestrator by one tick. `frozen` gates everything that
/// counts as ad activity (staggered spawns, minion spawns) while a
/// SystemFreeze buff runs; boss clocks are deliberately not frozen.
pub fn step(state: &mut GameState, rng: &mut impl Rng, config: &Config, dt_ms: f32, frozen: bool) {
    match state.wave_phase {
        WavePhase::WaveStarting { delay_ms } => {
            let remaining = delay_ms - dt_ms;
            if remaining > 0.0 {
                state.wave_phase = WavePhase::WaveStarting {
                    delay_ms: remaining,
                };
                return;
            }
            let plan = spawner::generate_wave(rng, config, state.wave);
            if plan.boss_wave {
                state.wave_phase = WavePhase::BossIntro {
                    delay_ms: config.game.boss_intro_ms,
                };
            } else if plan.spawns.is_empty() {
                // Nothing affordable: fall straight through to Clearing so an
                // empty wave can never stall progression
                state.wave_phase = WavePhase::Clearing;
            } else {
                state.pending_spawns = plan.spawns.into();
                state.spawn_stagger_ms = 0.0;
                state.wave_phase = WavePhase::Spawning;
            }
        }

        WavePhase::Spawning => {
            if !frozen {
                state.spawn_stagger_ms -= dt_ms;
                while state.spawn_stagger_ms <= 0.0 {
                    let Some(kind) = state.pending_spawns.pop_front() else {
                        break;
                    };
                    spawn_ad(state, rng, kind);
                    state.spawn_stagger_ms += config.wave.spawn_stagger_ms;
                }
            }
            if state.pending_spawns.is_empty() {
                state.wave_phase = WavePhase::Clearing;
            }
        }

        WavePhase::Clearing => {
            if state.ads.is_empty() && state.boss.is_none() {
                start_next_wave(state, config);
            }
        }

        WavePhase::BossIntro { delay_ms } => {
            let remaining = delay_ms - dt_ms;
            if remaining > 0.0 {
                state.wave_phase = WavePhase::BossIntro {
                    delay_ms: remaining,
                };
                return;
            }
            let area = state.play_area();
            let boss = Boss::new(&area);
            log::info!("boss encounter: {}", boss.name());
            state.boss = Some(boss);
            state.wave_phase = WavePhase::BossActive;
        }

        WavePhase::BossActive => {
            update_boss(state, rng, config, dt_ms, frozen);
            if matches!(
                state.boss.as_ref().map(|b| b.phase),
                Some(BossPhase::Defeated)
            ) {
                resolver::award_score(state, config.game.boss_defeat_bonus);
                log::info!("boss defeated, +{} bonus", config.game.boss_defeat_bonus);
                // Sweep the remaining minions for zero reward
                let ids: Vec<u32> = state.ads.iter().map(|a| a.id).collect();
                for id in ids {
                    resolver::destroy_ad(state, rng, config, id, false);
                }
                state.boss = None;
                state.wave_phase = WavePhase::BossDefeated { delay_ms: 2_000.0 };
            }
        }

        WavePhase::BossDefeated { delay_ms } => {
            let remaining = delay_ms - dt_ms;
            if remaining > 0.0 {
                state.wave_phase = WavePhase::BossDefeated {
                    delay_ms: remaining,
                };
            } else {
                start_next_wave(state, config);
            }
        }
    }
}

fn update_boss(
    state: &mut GameState,
    rng: &mut impl Rng,
    config: &Config,
    dt_ms: f32,
    frozen: bool,
) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    // Phase clocks run even under SystemFreeze; freezing ad activity must
    // not double as a free boss stall
    let mut slam = false;
    match boss.phase {
        BossPhase::Scanning { ref mut percent } => {
            *percent += dt_ms / consts::BOSS_SCAN_MS * 100.0;
            if *percent >= 100.0 {
                boss.phase = BossPhase::Confrontation {
                    clicks_left: consts::BOSS_CLICKS_REQUIRED,
                    time_left_ms: consts::BOSS_CONFRONT_MS,
                };
            }
        }
        BossPhase::Confrontation {
            ref mut time_left_ms,
            ..
        } => {
            *time_left_ms -= dt_ms;
            if *time_left_ms <= 0.0 {
                // Survived the window: slam the player and start over
                boss.phase = BossPhase::Scanning { percent: 0.0 };
                slam = true;
            }
        }
        BossPhase::Defeated => return,
    }

    // Minions trickle in while the boss lives
    let mut spawn_minion = false;
    if !frozen {
        boss.minion_timer_ms -= dt_ms;
        if boss.minion_timer_ms <= 0.0 {
            boss.minion_timer_ms = consts::BOSS_MINION_PERIOD_MS;
            spawn_minion = true;
        }
    }

    if slam {
        resolver::apply_damage(state, config, consts::BOSS_SLAM_DAMAGE);
    }
    if spawn_minion && state.ads.len() < consts::BOSS_MINION_AD_CAP {
        let kind = if rng.random::<bool>() {
            AdKind::Popup
        } else {
            AdKind::Banner
        };
        spawn_ad(state, rng, kind);
    }
}

/// Stage one ad into the active set
pub fn spawn_ad(state: &mut GameState, rng: &mut impl Rng, kind: AdKind) {
    let id = state.next_entity_id();
    let area = state.play_area();
    let ad = Ad::spawn(id, kind, &area, rng);
    log::debug!("spawned {:?} as ad {}", kind, id);
    state.ads.push(ad);
}
