//! Gameplay tuning
//!
//! Every number a designer might want to turn lives here, grouped by the
//! system it feeds. Defaults are the shipped balance; `Config::from_json`
//! lets a host embed overrides without recompiling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Player survivability tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    /// How long the shield blocks damage once raised
    pub shield_duration_ms: f32,
    /// Cooldown measured from activation, not expiry
    pub shield_cooldown_ms: f32,
    /// Invulnerability window granted after each hit
    pub iframe_duration_ms: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            shield_duration_ms: 2_000.0,
            shield_cooldown_ms: 5_000.0,
            iframe_duration_ms: 1_000.0,
        }
    }
}

/// Session and wave pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Breather between clearing a wave and the next spawns
    pub wave_start_delay_ms: f32,
    /// Every Nth wave is a boss wave
    pub boss_wave_interval: u32,
    /// Pause before the boss panel becomes interactive
    pub boss_intro_ms: f32,
    /// Score awarded for defeating the boss
    pub boss_defeat_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wave_start_delay_ms: 3_000.0,
            boss_wave_interval: 5,
            boss_intro_ms: 2_500.0,
            boss_defeat_bonus: 2_000,
        }
    }
}

/// Powerup drop odds and effect durations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Chance a rewarded dismissal drops a powerup
    pub spawn_chance: f32,
    /// Uncollected powerups vanish after this long
    pub despawn_ms: f32,
    pub iron_cursor_ms: f32,
    pub score_surge_ms: f32,
    pub score_surge_multiplier: f32,
    pub system_freeze_ms: f32,
    pub auto_shield_ms: f32,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.15,
            despawn_ms: 7_000.0,
            iron_cursor_ms: 5_000.0,
            score_surge_ms: 6_000.0,
            score_surge_multiplier: 2.0,
            system_freeze_ms: 4_000.0,
            auto_shield_ms: 3_000.0,
        }
    }
}

/// Threat-budget spawner tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_threat: u32,
    pub threat_per_wave: u32,
    /// Hard cap on entities planned per wave
    pub max_spawns_per_wave: usize,
    /// Gap between consecutive spawns within a wave
    pub spawn_stagger_ms: f32,
    /// Per-kind threat cost overrides, keyed by ad kind name
    pub threat_overrides: HashMap<String, u32>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_threat: 50,
            threat_per_wave: 20,
            max_spawns_per_wave: 15,
            spawn_stagger_ms: 300.0,
            threat_overrides: HashMap::new(),
        }
    }
}

/// Root tuning bundle passed to every simulation system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub game: GameConfig,
    pub powerups: PowerupConfig,
    pub wave: WaveConfig,
}

impl Config {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Config = serde_json::from_str(json)?;
        config.drop_unknown_overrides();
        Ok(config)
    }

    /// Threat overrides naming kinds that do not exist are dropped with a
    /// warning instead of silently pricing nothing
    fn drop_unknown_overrides(&mut self) {
        self.wave.threat_overrides.retain(|name, _| {
            let known = crate::sim::ads::AdKind::from_name(name).is_some();
            if !known {
                log::warn!("ignoring threat override for unknown ad kind '{name}'");
            }
            known
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_balance() {
        let config = Config::default();
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.game.boss_wave_interval, 5);
        assert_eq!(config.wave.base_threat, 50);
        assert_eq!(config.wave.threat_per_wave, 20);
        assert!((config.powerups.spawn_chance - 0.15).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults_elsewhere() {
        let config = Config::from_json(r#"{"player": {"max_health": 50}}"#).unwrap();
        assert_eq!(config.player.max_health, 50);
        assert_eq!(config.player.iframe_duration_ms, 1_000.0);
        assert_eq!(config.wave.max_spawns_per_wave, 15);
    }

    #[test]
    fn test_unknown_threat_override_is_dropped() {
        let json = r#"{"wave": {"threat_overrides": {"popup": 99, "blimp": 7}}}"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.wave.threat_overrides.get("popup"), Some(&99));
        assert!(!config.wave.threat_overrides.contains_key("blimp"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Config::from_json("{not json").is_err());
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = Config::from_json(&json).unwrap();
        assert_eq!(back.game.boss_defeat_bonus, config.game.boss_defeat_bonus);
    }
}
