//! Threat-budget wave planning
//!
//! Each wave gets a budget of `base_threat + wave * threat_per_wave` and
//! spends it on ad kinds unlocked at that wave, picked uniformly among the
//! kinds still affordable, until nothing fits or the per-wave cap is hit.
//! The generator is injected so tests can pin the sequence.

use rand::Rng;

use super::ads::AdKind;
use crate::config::Config;

/// The spawn plan for one wave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavePlan {
    pub wave_number: u32,
    pub budget: u32,
    /// True when this wave is the boss encounter instead of a spawn list
    pub boss_wave: bool,
    /// Ordered kinds to stage, staggered in time by the orchestrator
    pub spawns: Vec<AdKind>,
}

/// Threat cost of a kind, honoring config overrides
pub fn threat_of(kind: AdKind, config: &Config) -> u32 {
    config
        .wave
        .threat_overrides
        .get(kind.name())
        .copied()
        .unwrap_or_else(|| kind.threat())
}

/// Build the plan for `wave_number` (1-based)
pub fn generate_wave(rng: &mut impl Rng, config: &Config, wave_number: u32) -> WavePlan {
    let budget = config.wave.base_threat + wave_number * config.wave.threat_per_wave;

    if config.game.boss_wave_interval > 0 && wave_number % config.game.boss_wave_interval == 0 {
        log::info!("wave {wave_number}: boss wave (budget {budget} unspent)");
        return WavePlan {
            wave_number,
            budget,
            boss_wave: true,
            spawns: Vec::new(),
        };
    }

    let unlocked: Vec<AdKind> = AdKind::ALL
        .iter()
        .copied()
        .filter(|k| k.unlock_wave() <= wave_number)
        .collect();

    let mut remaining = budget;
    let mut spawns = Vec::new();
    while spawns.len() < config.wave.max_spawns_per_wave {
        let affordable: Vec<AdKind> = unlocked
            .iter()
            .copied()
            .filter(|k| threat_of(*k, config) <= remaining)
            .collect();
        if affordable.is_empty() {
            break;
        }
        let kind = affordable[rng.random_range(0..affordable.len())];
        remaining -= threat_of(kind, config);
        spawns.push(kind);
    }

    log::info!(
        "wave {wave_number}: budget {budget}, {} spawns, {remaining} unspent",
        spawns.len()
    );
    WavePlan {
        wave_number,
        budget,
        boss_wave: false,
        spawns,
    }
}
