//! Damage and score resolution
//!
//! The single authority that mutates player health, score, shield state, and
//! buffs. Everything that hurts or rewards the player funnels through here so
//! the protection rules (i-frames, shield, iron cursor) and the multiplier
//! are applied in exactly one place.

use glam::Vec2;
use rand::Rng;

use super::state::{Buff, BuffKind, GameState, Particle, Powerup, PowerupKind, SessionPhase};
use crate::config::Config;

/// Apply damage to the player. Suppressed entirely while any protection is
/// up; otherwise clamps health at 0 and either ends the session or opens the
/// post-hit invulnerability window.
pub fn apply_damage(state: &mut GameState, config: &Config, amount: i32) {
    if amount <= 0 || state.phase != SessionPhase::Running {
        return;
    }
    if state.player.protected() {
        return;
    }

    state.player.health = (state.player.health - amount).max(0);
    if state.player.health == 0 {
        state.wave_reached = state.wave;
        state.phase = SessionPhase::GameOver;
        log::info!(
            "game over: wave {}, score {}",
            state.wave,
            state.player.score
        );
    } else {
        state.player.invuln_ms = config.player.iframe_duration_ms;
    }
}

/// Award points, scaled by the current score multiplier
pub fn award_score(state: &mut GameState, points: u32) {
    let scaled = (points as f32 * state.player.score_multiplier).round() as u64;
    state.player.score += scaled;
}

/// Destroy an ad by id. Idempotent: a stale id is a no-op. With `reward`,
/// awards the kind's points and rolls a powerup drop at the ad's center;
/// zero-reward destruction (bombs, iron cursor, self-expiry) never drops.
pub fn destroy_ad(
    state: &mut GameState,
    rng: &mut impl Rng,
    config: &Config,
    id: u32,
    reward: bool,
) -> bool {
    let Some(index) = state.ads.iter().position(|a| a.id == id) else {
        return false;
    };
    let ad = state.ads.remove(index);
    let center = ad.bounds.center();

    if reward && ad.kind.points() > 0 {
        award_score(state, ad.kind.points());
        if rng.random::<f32>() < config.powerups.spawn_chance {
            spawn_powerup(state, rng, config, center);
        }
    }
    spawn_destruction_burst(state, rng, center);
    true
}

/// Drop a random powerup at `pos`
pub fn spawn_powerup(state: &mut GameState, rng: &mut impl Rng, config: &Config, pos: Vec2) {
    let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
    let id = state.next_entity_id();
    state.powerups.push(Powerup {
        id,
        kind,
        pos,
        ttl_ms: config.powerups.despawn_ms,
    });
}

/// Activate the shield. Rejected (no state change) while it is already
/// active, on cooldown, or any exclusive buff is running.
pub fn activate_shield(state: &mut GameState, config: &Config) {
    let p = &mut state.player;
    if p.shield_active() || p.shield_on_cooldown() || p.exclusive_buff_active() {
        return;
    }
    p.shield_active_ms = config.player.shield_duration_ms;
    p.shield_cooldown_ms = config.player.shield_cooldown_ms;
}

/// Apply a collected powerup. Bombs fire instantly; timed buffs are silently
/// rejected while another exclusive buff (or the shield) is running.
pub fn collect_powerup(
    state: &mut GameState,
    rng: &mut impl Rng,
    config: &Config,
    kind: PowerupKind,
    pos: Vec2,
) {
    match kind {
        PowerupKind::Bomb => {
            let ids: Vec<u32> = state.ads.iter().map(|a| a.id).collect();
            for id in ids {
                destroy_ad(state, rng, config, id, false);
            }
        }
        PowerupKind::ClusterBomb => {
            let mut ids: Vec<(u32, f32)> = state
                .ads
                .iter()
                .map(|a| (a.id, (a.bounds.center() - pos).length()))
                .collect();
            ids.sort_by(|a, b| a.1.total_cmp(&b.1));
            for (id, _) in ids.into_iter().take(3) {
                destroy_ad(state, rng, config, id, false);
            }
        }
        PowerupKind::IronCursor => apply_buff(state, BuffKind::IronCursor, config),
        PowerupKind::ScoreSurge => apply_buff(state, BuffKind::ScoreSurge, config),
        PowerupKind::SystemFreeze => apply_buff(state, BuffKind::SystemFreeze, config),
        PowerupKind::AutoShield => apply_buff(state, BuffKind::AutoShield, config),
    }
}

fn apply_buff(state: &mut GameState, kind: BuffKind, config: &Config) {
    if state.player.exclusive_buff_active() {
        return;
    }
    let duration = match kind {
        BuffKind::IronCursor => config.powerups.iron_cursor_ms,
        BuffKind::ScoreSurge => config.powerups.score_surge_ms,
        BuffKind::SystemFreeze => config.powerups.system_freeze_ms,
        BuffKind::AutoShield => config.powerups.auto_shield_ms,
    };
    if kind == BuffKind::ScoreSurge {
        state.player.score_multiplier = config.powerups.score_surge_multiplier;
    }
    state.player.buff = Some(Buff {
        kind,
        remaining_ms: duration,
    });
}

/// Count down the player's windows: i-frames, shield, cooldown, active buff
pub fn advance_player_timers(state: &mut GameState, dt_ms: f32) {
    let p = &mut state.player;
    p.invuln_ms = (p.invuln_ms - dt_ms).max(0.0);
    p.shield_active_ms = (p.shield_active_ms - dt_ms).max(0.0);
    p.shield_cooldown_ms = (p.shield_cooldown_ms - dt_ms).max(0.0);

    if let Some(ref mut buff) = p.buff {
        buff.remaining_ms -= dt_ms;
        if buff.remaining_ms <= 0.0 {
            if buff.kind == BuffKind::ScoreSurge {
                p.score_multiplier = 1.0;
            }
            p.buff = None;
        }
    }
}

/// Short particle burst where an ad went down
fn spawn_destruction_burst(state: &mut GameState, rng: &mut impl Rng, center: Vec2) {
    for _ in 0..12 {
        if state.particles.len() >= crate::consts::MAX_PARTICLES {
            state.particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(60.0..220.0);
        state.particles.push(Particle {
            pos: center,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            size: rng.random_range(2.0..6.0),
        });
    }
}
