//! Pointer interaction dispatch
//!
//! Resolves a primary action against the active entity set top-most first:
//! powerup pickups float above everything, then the boss panel, then ads from
//! most recently spawned down. The first entity containing the pointer
//! consumes the action; nothing underneath reacts. That single-consumer rule
//! is the contract the presentation layer relies on for click routing.

use rand::Rng;

use super::ads::{AdEvent, RegionRole};
use super::resolver;
use super::state::{BossPhase, BuffKind, GameState, SessionPhase, POWERUP_PICK_RADIUS};
use crate::config::Config;
use crate::consts;

/// Handle a primary action (click/tap) at the current pointer position
pub fn handle_primary(state: &mut GameState, rng: &mut impl Rng, config: &Config) {
    if state.phase != SessionPhase::Running {
        return;
    }
    let pointer = state.pointer;

    // Powerup pickups first: they render above ads and are the thing the
    // player is deliberately aiming for
    if let Some(index) = state
        .powerups
        .iter()
        .rposition(|p| (p.pos - pointer).length() <= POWERUP_PICK_RADIUS)
    {
        let p = state.powerups.remove(index);
        log::debug!("collected powerup {:?}", p.kind);
        resolver::collect_powerup(state, rng, config, p.kind, p.pos);
        return;
    }

    // Boss panel sits above the ad stack while the encounter runs
    if let Some(boss) = state.boss.as_ref() {
        if boss.bounds.contains(pointer) {
            let on_close = boss.close_region().contains(pointer);
            let scanning = matches!(boss.phase, BossPhase::Scanning { .. });
            if on_close && scanning {
                // During the scan the dismiss control is bait
                resolver::apply_damage(state, config, consts::DECOY_DAMAGE);
            } else if on_close {
                if let Some(boss) = state.boss.as_mut() {
                    if let BossPhase::Confrontation {
                        ref mut clicks_left,
                        ..
                    } = boss.phase
                    {
                        *clicks_left = clicks_left.saturating_sub(1);
                        if *clicks_left == 0 {
                            boss.phase = BossPhase::Defeated;
                        }
                    }
                }
            }
            return;
        }
    }

    // Ads, newest (topmost) first; the first bounds hit consumes the action
    for i in (0..state.ads.len()).rev() {
        let Some(region) = state.ads[i].region_at(pointer) else {
            continue;
        };
        let id = state.ads[i].id;

        // Iron cursor disintegrates whatever it touches: zero reward, no harm
        if state.player.buff_kind() == Some(BuffKind::IronCursor) {
            resolver::destroy_ad(state, rng, config, id, false);
            return;
        }

        match region {
            Some(r) => match r.role {
                RegionRole::Close | RegionRole::Safe => {
                    resolver::destroy_ad(state, rng, config, id, true);
                }
                RegionRole::Answer => {
                    answer_survey(state, rng, config, id);
                }
                RegionRole::Decoy => {
                    resolver::apply_damage(state, config, consts::DECOY_DAMAGE);
                }
            },
            // Anywhere else inside the ad body
            None => {
                let damage = state.ads[i].kind.body_damage();
                resolver::apply_damage(state, config, damage);
            }
        }
        return;
    }

    // Empty space: silently ignored
}

/// Secondary action (right-click) maps exclusively to shield activation
pub fn handle_secondary(state: &mut GameState, config: &Config) {
    if state.phase != SessionPhase::Running {
        return;
    }
    resolver::activate_shield(state, config);
}

/// Pointer moved: track it and let hover-reactive ads respond
pub fn handle_pointer_move(state: &mut GameState, rng: &mut impl Rng, x: f32, y: f32) {
    state.pointer = glam::Vec2::new(x, y);
    if state.phase != SessionPhase::Running {
        return;
    }

    // Gremlin close buttons dodge when the pointer reaches them; only the
    // topmost ad under the pointer reacts, consistent with click routing
    let pointer = state.pointer;
    for i in (0..state.ads.len()).rev() {
        if !state.ads[i].bounds.contains(pointer) {
            continue;
        }
        let hovering_close = state.ads[i]
            .hit_regions()
            .iter()
            .any(|r| r.role == RegionRole::Close && r.rect.contains(pointer));
        if hovering_close {
            state.ads[i].gremlin_dodge(rng);
        }
        return;
    }
}

/// Advance a survey; the final answer dismisses the ad with full reward
fn answer_survey(state: &mut GameState, rng: &mut impl Rng, config: &Config, id: u32) {
    let finished = {
        let Some(ad) = state.ad_by_id_mut(id) else {
            return;
        };
        if let super::ads::Behavior::Survey {
            ref mut question_index,
        } = ad.behavior
        {
            *question_index += 1;
            *question_index >= consts::SURVEY_QUESTIONS
        } else {
            false
        }
    };
    if finished {
        resolver::destroy_ad(state, rng, config, id, true);
    }
}

/// Apply timer-driven behavior events for one ad (called from `tick`)
pub fn apply_ad_events(
    state: &mut GameState,
    rng: &mut impl Rng,
    config: &Config,
    id: u32,
    events: &[AdEvent],
) {
    for event in events {
        match event {
            AdEvent::Damage(amount) => resolver::apply_damage(state, config, *amount),
            AdEvent::Expired => {
                resolver::destroy_ad(state, rng, config, id, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ads::{Ad, AdKind};
    use crate::sim::state::{Boss, Powerup, PowerupKind};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameState, Config, Pcg32) {
        let config = Config::default();
        let mut state = GameState::new(&config);
        state.phase = SessionPhase::Running;
        (state, config, Pcg32::seed_from_u64(123))
    }

    fn add_ad_at(state: &mut GameState, kind: AdKind, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        let (w, h) = kind.size();
        let mut ad = Ad {
            id,
            kind,
            bounds: crate::sim::rect::Rect::new(x, y, w, h),
            behavior: crate::sim::ads::Behavior::initial(kind),
        };
        if kind == AdKind::CookieWall {
            ad.bounds = state.play_area();
        }
        state.ads.push(ad);
        id
    }

    fn click(state: &mut GameState, rng: &mut Pcg32, config: &Config, at: Vec2) {
        state.pointer = at;
        handle_primary(state, rng, config);
    }

    #[test]
    fn test_real_close_destroys_with_reward() {
        let (mut state, config, mut rng) = setup();
        let id = add_ad_at(&mut state, AdKind::Popup, 100.0, 100.0);
        let close = state.ad_by_id(id).unwrap().hit_regions()[0].rect.center();
        click(&mut state, &mut rng, &config, close);
        assert!(state.ads.is_empty());
        assert_eq!(state.player.score, 100);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_decoy_never_destroys_never_awards() {
        let (mut state, config, mut rng) = setup();
        let id = add_ad_at(&mut state, AdKind::Trap, 100.0, 100.0);
        let decoy = state
            .ad_by_id(id)
            .unwrap()
            .hit_regions()
            .into_iter()
            .find(|r| r.role == RegionRole::Decoy)
            .unwrap()
            .rect
            .center();

        for _ in 0..5 {
            state.player.invuln_ms = 0.0; // strip i-frames between clicks
            click(&mut state, &mut rng, &config, decoy);
        }
        assert_eq!(state.ads.len(), 1);
        assert_eq!(state.player.score, 0);
        assert!(state.player.health < 100);
    }

    #[test]
    fn test_body_click_damages_without_destroying() {
        let (mut state, config, mut rng) = setup();
        let id = add_ad_at(&mut state, AdKind::Popup, 100.0, 100.0);
        let body = state.ad_by_id(id).unwrap().bounds.center();
        click(&mut state, &mut rng, &config, body);
        assert_eq!(state.ads.len(), 1);
        assert_eq!(state.player.health, 90);
    }

    #[test]
    fn test_topmost_wins_single_consumer() {
        let (mut state, config, mut rng) = setup();
        // Two overlapping popups; the later spawn is on top
        let bottom = add_ad_at(&mut state, AdKind::Popup, 100.0, 100.0);
        let top = add_ad_at(&mut state, AdKind::Popup, 120.0, 120.0);

        // Click the top ad's close; only the top ad is destroyed even though
        // the point is also inside the bottom ad's body
        let close = state.ad_by_id(top).unwrap().hit_regions()[0].rect.center();
        assert!(state.ad_by_id(bottom).unwrap().bounds.contains(close));
        click(&mut state, &mut rng, &config, close);

        assert!(state.ad_by_id(top).is_none());
        assert!(state.ad_by_id(bottom).is_some());
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_iron_cursor_destroys_for_zero_reward_anywhere() {
        let (mut state, config, mut rng) = setup();
        state.player.buff = Some(crate::sim::state::Buff {
            kind: BuffKind::IronCursor,
            remaining_ms: 5000.0,
        });
        let id = add_ad_at(&mut state, AdKind::Trap, 100.0, 100.0);
        let decoy = state
            .ad_by_id(id)
            .unwrap()
            .hit_regions()
            .into_iter()
            .find(|r| r.role == RegionRole::Decoy)
            .unwrap()
            .rect
            .center();
        click(&mut state, &mut rng, &config, decoy);
        assert!(state.ads.is_empty());
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_empty_space_click_is_ignored() {
        let (mut state, config, mut rng) = setup();
        add_ad_at(&mut state, AdKind::Banner, 100.0, 100.0);
        click(&mut state, &mut rng, &config, Vec2::new(1000.0, 600.0));
        assert_eq!(state.ads.len(), 1);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_survey_answers_through_to_dismissal() {
        let (mut state, config, mut rng) = setup();
        let id = add_ad_at(&mut state, AdKind::Survey, 100.0, 100.0);
        let answer = state.ad_by_id(id).unwrap().hit_regions()[0].rect.center();

        for _ in 0..crate::consts::SURVEY_QUESTIONS - 1 {
            click(&mut state, &mut rng, &config, answer);
            assert!(state.ad_by_id(id).is_some());
        }
        click(&mut state, &mut rng, &config, answer);
        assert!(state.ad_by_id(id).is_none());
        assert_eq!(state.player.score, AdKind::Survey.points() as u64);
    }

    #[test]
    fn test_powerup_pickup_wins_over_ad_underneath() {
        let (mut state, config, mut rng) = setup();
        let ad = add_ad_at(&mut state, AdKind::Popup, 100.0, 100.0);
        let at = state.ad_by_id(ad).unwrap().bounds.center();
        let pid = state.next_entity_id();
        state.powerups.push(Powerup {
            id: pid,
            kind: PowerupKind::ScoreSurge,
            pos: at,
            ttl_ms: 7000.0,
        });

        click(&mut state, &mut rng, &config, at);
        // Pickup consumed the action: ad untouched, no body damage
        assert!(state.powerups.is_empty());
        assert!(state.ad_by_id(ad).is_some());
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.score_multiplier, 2.0);
    }

    #[test]
    fn test_secondary_action_only_activates_shield() {
        let (mut state, config, _) = setup();
        add_ad_at(&mut state, AdKind::Popup, 100.0, 100.0);
        state.pointer = state.ads[0].bounds.center();
        handle_secondary(&mut state, &config);
        assert!(state.player.shield_active());
        assert_eq!(state.ads.len(), 1);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_boss_close_is_decoy_while_scanning() {
        let (mut state, config, mut rng) = setup();
        let area = state.play_area();
        state.boss = Some(Boss::new(&area));
        let close = state.boss.as_ref().unwrap().close_region().center();

        click(&mut state, &mut rng, &config, close);
        assert_eq!(state.player.health, 100 - consts::DECOY_DAMAGE);
        assert!(matches!(
            state.boss.as_ref().unwrap().phase,
            BossPhase::Scanning { .. }
        ));
    }

    #[test]
    fn test_boss_confrontation_clicks_to_defeat() {
        let (mut state, config, mut rng) = setup();
        let area = state.play_area();
        let mut boss = Boss::new(&area);
        boss.phase = BossPhase::Confrontation {
            clicks_left: 2,
            time_left_ms: 10_000.0,
        };
        state.boss = Some(boss);
        let close = state.boss.as_ref().unwrap().close_region().center();

        click(&mut state, &mut rng, &config, close);
        assert!(matches!(
            state.boss.as_ref().unwrap().phase,
            BossPhase::Confrontation { clicks_left: 1, .. }
        ));
        click(&mut state, &mut rng, &config, close);
        assert_eq!(state.boss.as_ref().unwrap().phase, BossPhase::Defeated);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_gremlin_dodges_on_hover() {
        let (mut state, _config, mut rng) = setup();
        let id = add_ad_at(&mut state, AdKind::Gremlin, 100.0, 100.0);
        let home = state.ad_by_id(id).unwrap().hit_regions()[0].rect;

        let at = home.center();
        handle_pointer_move(&mut state, &mut rng, at.x, at.y);
        let moved = state.ad_by_id(id).unwrap().hit_regions()[0].rect;
        assert_ne!((moved.x, moved.y), (home.x, home.y));
    }
}
