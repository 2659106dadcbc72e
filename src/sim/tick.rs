//! Per-frame simulation advance
//!
//! One `tick` call drives everything timed: player windows, ad behavior,
//! powerup lifetimes, particles, and the wave machine. Order inside a tick
//! is fixed: player timers, then entity updates (whose damage lands through
//! the resolver synchronously), then lifetimes, then orchestration, so a
//! snapshot taken right after `tick` always reads a consistent state.

use super::ads::AdEvent;
use super::dispatch;
use super::resolver;
use super::state::{BuffKind, GameState, SessionPhase};
use super::waves;
use crate::config::Config;
use rand::Rng;

/// Largest frame gap the simulation will integrate in one call; anything
/// longer (tab hidden, debugger) is truncated rather than fast-forwarded
const MAX_FRAME_MS: f32 = 250.0;

/// Advance the simulation by `dt_ms` of wall time
pub fn tick(state: &mut GameState, rng: &mut impl Rng, config: &Config, dt_ms: f32) {
    if state.phase != SessionPhase::Running {
        return;
    }
    let dt = dt_ms.clamp(0.0, MAX_FRAME_MS);
    state.time_ms += dt as f64;

    resolver::advance_player_timers(state, dt);
    let frozen = state.player.buff_kind() == Some(BuffKind::SystemFreeze);

    // Entity behavior first, so hit-testing and snapshots see settled state.
    // Events are collected then applied so behavior code never reaches back
    // into the player mid-iteration.
    if !frozen {
        let pointer = state.pointer;
        let mut fired: Vec<(u32, Vec<AdEvent>)> = Vec::new();
        for ad in &mut state.ads {
            let mut events = Vec::new();
            ad.update(dt, pointer, &mut events);
            if !events.is_empty() {
                fired.push((ad.id, events));
            }
        }
        for (id, events) in fired {
            dispatch::apply_ad_events(state, rng, config, id, &events);
            if state.phase != SessionPhase::Running {
                // A payload killed the player: freeze right here
                return;
            }
        }
    }

    // Uncollected powerups fade out
    for p in &mut state.powerups {
        p.ttl_ms -= dt;
    }
    state.powerups.retain(|p| p.ttl_ms > 0.0);

    // Particles drift, drag, and die
    let dt_s = dt / 1000.0;
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt_s;
        particle.vel *= 0.98;
        particle.life -= dt_s * 1.5;
        particle.size *= 0.995;
    }
    state.particles.retain(|p| p.life > 0.0);

    waves::step(state, rng, config, dt, frozen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ads::AdKind;
    use crate::sim::state::{Buff, WavePhase};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameState, Config, Pcg32) {
        let config = Config::default();
        let mut state = GameState::new(&config);
        state.phase = SessionPhase::Running;
        (state, config, Pcg32::seed_from_u64(2024))
    }

    fn run(state: &mut GameState, rng: &mut Pcg32, config: &Config, ms: f32) {
        let mut left = ms;
        while left > 0.0 {
            tick(state, rng, config, 16.0);
            left -= 16.0;
        }
    }

    #[test]
    fn test_first_wave_reaches_the_field() {
        let (mut state, config, mut rng) = setup();
        waves::start_next_wave(&mut state, &config);
        run(&mut state, &mut rng, &config, config.game.wave_start_delay_ms + 2000.0);
        assert_eq!(state.wave, 1);
        assert!(!state.ads.is_empty());
        // Wave 1 only fields the starter kinds
        assert!(state.ads.iter().all(|a| a.kind.unlock_wave() <= 1));
    }

    #[test]
    fn test_tick_is_inert_before_start_and_after_game_over() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&config);

        tick(&mut state, &mut rng, &config, 16.0);
        assert_eq!(state.time_ms, 0.0);

        state.phase = SessionPhase::GameOver;
        state.player.health = 0;
        tick(&mut state, &mut rng, &config, 16.0);
        assert_eq!(state.time_ms, 0.0);
        assert!(state.ads.is_empty());
    }

    #[test]
    fn test_virus_payload_can_end_the_session() {
        let (mut state, config, mut rng) = setup();
        state.player.health = crate::consts::VIRUS_PAYLOAD_DAMAGE;
        state.wave_phase = WavePhase::Clearing;
        waves::spawn_ad(&mut state, &mut rng, AdKind::Virus);

        run(&mut state, &mut rng, &config, crate::consts::VIRUS_SCAN_MS + 500.0);
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_virus_self_destruct_is_zero_reward() {
        let (mut state, config, mut rng) = setup();
        state.wave_phase = WavePhase::Clearing;
        waves::spawn_ad(&mut state, &mut rng, AdKind::Virus);

        run(&mut state, &mut rng, &config, crate::consts::VIRUS_SCAN_MS + 500.0);
        assert!(state.ads.iter().all(|a| a.kind != AdKind::Virus));
        assert_eq!(state.player.score, 0);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_system_freeze_halts_ad_behavior() {
        let (mut state, config, mut rng) = setup();
        state.wave_phase = WavePhase::Clearing;
        waves::spawn_ad(&mut state, &mut rng, AdKind::Virus);
        state.player.buff = Some(Buff {
            kind: BuffKind::SystemFreeze,
            remaining_ms: crate::consts::VIRUS_SCAN_MS * 2.0,
        });

        run(&mut state, &mut rng, &config, crate::consts::VIRUS_SCAN_MS + 500.0);
        // Scan never advanced while frozen
        assert_eq!(state.ads.len(), 1);
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn test_powerups_despawn_uncollected() {
        let (mut state, config, mut rng) = setup();
        state.wave_phase = WavePhase::Clearing;
        waves::spawn_ad(&mut state, &mut rng, AdKind::Popup); // keeps Clearing parked
        resolver::spawn_powerup(&mut state, &mut rng, &config, glam::Vec2::new(50.0, 50.0));
        assert_eq!(state.powerups.len(), 1);

        run(&mut state, &mut rng, &config, config.powerups.despawn_ms + 100.0);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_frame_gap_is_clamped() {
        let (mut state, config, mut rng) = setup();
        tick(&mut state, &mut rng, &config, 60_000.0);
        assert_eq!(state.time_ms, MAX_FRAME_MS as f64);
    }
}
