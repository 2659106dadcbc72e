//! Ad entity model: the kind catalog, per-kind behavior state, and hit regions
//!
//! The original zoo of ad variants collapses into one tagged-variant [`Ad`]
//! with a [`AdKind`] discriminant; per-kind numbers (threat, reward, unlock
//! wave, body damage) are `match` tables on the kind, and per-kind runtime
//! state is the [`Behavior`] variant. Timers an ad owns (chat cadence, video
//! lock, virus scan, chaser contact) are fields of its behavior record, so a
//! destroyed ad takes its timers with it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts;

/// Every spawnable ad kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdKind {
    /// Thin strip, harmless body, honest close button
    Banner,
    /// Classic "1,000,000th visitor" popup; clicking the body hurts
    Popup,
    /// Support-chat window that keeps posting nagging messages
    Chat,
    /// The visible close button is a decoy; the real one hides in a corner
    Trap,
    /// Close button dodges the pointer a few times before giving up
    Gremlin,
    /// "Skip ad in 5s": the close control is fake until the countdown ends
    Video,
    /// Wall of DOWNLOAD buttons; only "continue without installing" is safe
    Download,
    /// Multi-question survey; answering through it dismisses the ad
    Survey,
    /// Full-screen consent wall; ACCEPT ALL is, for once, the way out
    CookieWall,
    /// Follows the pointer and deals contact damage while overlapped
    Chaser,
    /// Fake scanner; if its progress bar fills it delivers a payload
    Virus,
}

impl AdKind {
    pub const ALL: [AdKind; 11] = [
        AdKind::Banner,
        AdKind::Popup,
        AdKind::Chat,
        AdKind::Trap,
        AdKind::Gremlin,
        AdKind::Video,
        AdKind::Download,
        AdKind::Survey,
        AdKind::CookieWall,
        AdKind::Chaser,
        AdKind::Virus,
    ];

    /// Cost charged against the wave's threat budget
    pub fn threat(&self) -> u32 {
        match self {
            AdKind::Banner => 5,
            AdKind::Popup => 10,
            AdKind::Chat => 15,
            AdKind::Trap => 15,
            AdKind::Gremlin => 20,
            AdKind::Video => 20,
            AdKind::Download => 25,
            AdKind::Survey => 30,
            AdKind::CookieWall => 35,
            AdKind::Chaser => 40,
            AdKind::Virus => 45,
        }
    }

    /// Points awarded for a legitimate dismissal
    pub fn points(&self) -> u32 {
        match self {
            AdKind::Banner => 50,
            AdKind::Popup => 100,
            AdKind::Chat => 200,
            AdKind::Trap => 150,
            AdKind::Gremlin => 250,
            AdKind::Video => 300,
            AdKind::Download => 300,
            AdKind::Survey => 350,
            AdKind::CookieWall => 400,
            AdKind::Chaser => 500,
            AdKind::Virus => 600,
        }
    }

    /// First wave this kind may appear in
    pub fn unlock_wave(&self) -> u32 {
        match self {
            AdKind::Banner | AdKind::Popup => 1,
            AdKind::Chat | AdKind::Gremlin => 2,
            AdKind::Video | AdKind::Download | AdKind::CookieWall => 3,
            AdKind::Trap | AdKind::Survey => 4,
            AdKind::Chaser => 5,
            AdKind::Virus => 6,
        }
    }

    /// Damage for clicking anywhere in the body that is not a control
    pub fn body_damage(&self) -> i32 {
        match self {
            AdKind::Banner => 0,
            AdKind::Popup | AdKind::Gremlin | AdKind::Video | AdKind::Download | AdKind::Virus => {
                10
            }
            AdKind::Chat | AdKind::Trap | AdKind::Survey | AdKind::CookieWall | AdKind::Chaser => 5,
        }
    }

    /// Logical size; CookieWall ignores this and covers the play area
    pub fn size(&self) -> (f32, f32) {
        match self {
            AdKind::Banner => (320.0, 60.0),
            AdKind::Popup => (360.0, 240.0),
            AdKind::Chat => (300.0, 220.0),
            AdKind::Trap => (340.0, 220.0),
            AdKind::Gremlin => (360.0, 240.0),
            AdKind::Video => (420.0, 260.0),
            AdKind::Download => (420.0, 280.0),
            AdKind::Survey => (380.0, 300.0),
            AdKind::CookieWall => (0.0, 0.0),
            AdKind::Chaser => (240.0, 160.0),
            AdKind::Virus => (380.0, 200.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdKind::Banner => "banner",
            AdKind::Popup => "popup",
            AdKind::Chat => "chat",
            AdKind::Trap => "trap",
            AdKind::Gremlin => "gremlin",
            AdKind::Video => "video",
            AdKind::Download => "download",
            AdKind::Survey => "survey",
            AdKind::CookieWall => "cookie_wall",
            AdKind::Chaser => "chaser",
            AdKind::Virus => "virus",
        }
    }

    /// Inverse of [`AdKind::name`]; unknown names are a config error, not ours
    pub fn from_name(name: &str) -> Option<AdKind> {
        AdKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// Kind-specific runtime state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// No per-kind state (Banner, Popup, Trap, Download, CookieWall)
    Static,
    Chat {
        /// Messages delivered so far (first arrives with the ad)
        messages_shown: u8,
        next_message_ms: f32,
    },
    Gremlin {
        /// Close button offset from its home position, in ad-local space
        close_offset: Vec2,
        dodges_left: u8,
    },
    Video {
        /// Close control unlocks when this reaches 0
        lock_ms: f32,
    },
    Survey {
        question_index: u8,
    },
    Chaser {
        /// Counts down to the next contact tick while the pointer overlaps
        contact_ms: f32,
    },
    Virus {
        /// Elapsed scan time; payload fires at `consts::VIRUS_SCAN_MS`
        scan_ms: f32,
    },
}

/// What a hit region does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionRole {
    /// Real dismiss control: destroys the ad with full reward
    Close,
    /// Safe content button: same effect as Close
    Safe,
    /// Advances the survey; dismisses on the final question
    Answer,
    /// Fake control: damages the player, never destroys the ad
    Decoy,
}

/// A named sub-rectangle of an ad the player can click
#[derive(Debug, Clone, Serialize)]
pub struct HitRegion {
    pub name: &'static str,
    pub role: RegionRole,
    pub rect: Rect,
}

/// Something an ad's timer-driven behavior did this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdEvent {
    /// Behavior inflicted damage (chat nag, chaser contact, virus payload)
    Damage(i32),
    /// The ad removed itself (zero reward, no powerup roll)
    Expired,
}

/// An active ad entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    pub id: u32,
    pub kind: AdKind,
    pub bounds: Rect,
    pub behavior: Behavior,
}

impl Ad {
    /// Spawn at a random spot inside `area` (CookieWall covers it entirely)
    pub fn spawn(id: u32, kind: AdKind, area: &Rect, rng: &mut impl Rng) -> Self {
        let bounds = if kind == AdKind::CookieWall {
            *area
        } else {
            let (w, h) = kind.size();
            let max_x = (area.w - w - consts::SPAWN_MARGIN).max(consts::SPAWN_MARGIN);
            let max_y = (area.h - h - consts::SPAWN_MARGIN).max(consts::SPAWN_MARGIN);
            Rect::new(
                area.x + rng.random_range(consts::SPAWN_MARGIN..=max_x),
                area.y + rng.random_range(consts::SPAWN_MARGIN..=max_y),
                w,
                h,
            )
        };
        Self {
            id,
            kind,
            bounds,
            behavior: Behavior::initial(kind),
        }
    }

    /// Named clickable regions, in resolution priority order
    pub fn hit_regions(&self) -> Vec<HitRegion> {
        let b = &self.bounds;
        match self.kind {
            AdKind::Banner => vec![HitRegion {
                name: "close",
                role: RegionRole::Close,
                rect: b.sub_top_right(4.0, 4.0, 20.0, 20.0),
            }],
            AdKind::Popup | AdKind::Chat | AdKind::Chaser | AdKind::Virus => vec![HitRegion {
                name: "close",
                role: RegionRole::Close,
                rect: b.sub_top_right(4.0, 4.0, 24.0, 24.0),
            }],
            AdKind::Trap => vec![
                HitRegion {
                    name: "real_close",
                    role: RegionRole::Close,
                    rect: b.sub_bottom_left(2.0, 2.0, 12.0, 12.0),
                },
                HitRegion {
                    name: "close",
                    role: RegionRole::Decoy,
                    rect: b.sub_top_right(4.0, 4.0, 24.0, 24.0),
                },
            ],
            AdKind::Gremlin => {
                let offset = match self.behavior {
                    Behavior::Gremlin { close_offset, .. } => close_offset,
                    _ => Vec2::ZERO,
                };
                let home = b.sub_top_right(4.0, 4.0, 24.0, 24.0);
                vec![HitRegion {
                    name: "close",
                    role: RegionRole::Close,
                    rect: Rect::new(home.x + offset.x, home.y + offset.y, home.w, home.h),
                }]
            }
            AdKind::Video => {
                let locked = matches!(self.behavior, Behavior::Video { lock_ms } if lock_ms > 0.0);
                vec![HitRegion {
                    name: "skip",
                    role: if locked {
                        RegionRole::Decoy
                    } else {
                        RegionRole::Close
                    },
                    rect: b.sub_top_right(8.0, 8.0, 80.0, 28.0),
                }]
            }
            AdKind::Download => {
                let bw = (b.w - 36.0) / 2.0;
                vec![
                    HitRegion {
                        name: "continue",
                        role: RegionRole::Safe,
                        rect: b.sub(24.0 + bw, b.h - 48.0, bw, 36.0),
                    },
                    HitRegion {
                        name: "download",
                        role: RegionRole::Decoy,
                        rect: b.sub(12.0, b.h - 96.0, bw, 36.0),
                    },
                    HitRegion {
                        name: "download_now",
                        role: RegionRole::Decoy,
                        rect: b.sub(24.0 + bw, b.h - 96.0, bw, 36.0),
                    },
                    HitRegion {
                        name: "install_fast",
                        role: RegionRole::Decoy,
                        rect: b.sub(12.0, b.h - 48.0, bw, 36.0),
                    },
                ]
            }
            AdKind::Survey => {
                let row_w = b.w - 48.0;
                (0..3)
                    .map(|i| HitRegion {
                        name: "answer",
                        role: RegionRole::Answer,
                        rect: b.sub(24.0, 96.0 + i as f32 * 48.0, row_w, 32.0),
                    })
                    .collect()
            }
            AdKind::CookieWall => {
                let bw = 220.0;
                let y = b.h - 72.0;
                let cx = (b.w - bw * 2.0 - 24.0) / 2.0;
                vec![
                    HitRegion {
                        name: "accept_all",
                        role: RegionRole::Safe,
                        rect: b.sub(cx + bw + 24.0, y, bw, 40.0),
                    },
                    HitRegion {
                        name: "manage_prefs",
                        role: RegionRole::Decoy,
                        rect: b.sub(cx, y, bw, 40.0),
                    },
                ]
            }
        }
    }

    /// Resolve a point against this ad: first matching region, else the body
    /// if the point is inside the bounds at all
    pub fn region_at(&self, p: Vec2) -> Option<Option<HitRegion>> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(self.hit_regions().into_iter().find(|r| r.rect.contains(p)))
    }

    /// Relocate the gremlin close button away from the pointer, if it still
    /// has dodges left
    pub fn gremlin_dodge(&mut self, rng: &mut impl Rng) {
        if let Behavior::Gremlin {
            ref mut close_offset,
            ref mut dodges_left,
        } = self.behavior
        {
            if *dodges_left == 0 {
                return;
            }
            *dodges_left -= 1;
            // Anywhere in the lower body, relative to the button's home slot
            let dx = -rng.random_range(20.0..self.bounds.w - 40.0);
            let dy = rng.random_range(32.0..self.bounds.h - 60.0);
            *close_offset = Vec2::new(dx, dy);
        }
    }

    /// Advance timer-driven behavior by `dt_ms`; `pointer` feeds the chaser.
    /// Returns what happened so the caller can route damage and removal
    /// through the resolver.
    pub fn update(&mut self, dt_ms: f32, pointer: Vec2, events: &mut Vec<AdEvent>) {
        match self.behavior {
            Behavior::Chat {
                ref mut messages_shown,
                ref mut next_message_ms,
            } => {
                if *messages_shown >= consts::CHAT_MESSAGE_COUNT {
                    return;
                }
                *next_message_ms -= dt_ms;
                while *next_message_ms <= 0.0 && *messages_shown < consts::CHAT_MESSAGE_COUNT {
                    *messages_shown += 1;
                    *next_message_ms += consts::CHAT_MESSAGE_PERIOD_MS;
                    events.push(AdEvent::Damage(consts::CHAT_NAG_DAMAGE));
                }
            }
            Behavior::Video { ref mut lock_ms } => {
                *lock_ms = (*lock_ms - dt_ms).max(0.0);
            }
            Behavior::Virus { ref mut scan_ms } => {
                *scan_ms += dt_ms;
                if *scan_ms >= consts::VIRUS_SCAN_MS {
                    events.push(AdEvent::Damage(consts::VIRUS_PAYLOAD_DAMAGE));
                    events.push(AdEvent::Expired);
                }
            }
            Behavior::Chaser { ref mut contact_ms } => {
                // Steer toward the pointer
                let center = self.bounds.center();
                let to_pointer = pointer - center;
                if to_pointer.length() > 1.0 {
                    let step = to_pointer.normalize() * consts::CHASER_SPEED * (dt_ms / 1000.0);
                    self.bounds.x += step.x;
                    self.bounds.y += step.y;
                }
                // Contact damage while the pointer overlaps, on a repeat timer
                if self.bounds.contains(pointer) {
                    *contact_ms -= dt_ms;
                    if *contact_ms <= 0.0 {
                        events.push(AdEvent::Damage(consts::CHASER_CONTACT_DAMAGE));
                        *contact_ms = consts::CHASER_CONTACT_PERIOD_MS;
                    }
                } else {
                    *contact_ms = 0.0;
                }
            }
            Behavior::Static | Behavior::Gremlin { .. } | Behavior::Survey { .. } => {}
        }
    }

    /// Scan progress for the renderer (virus only)
    pub fn scan_percent(&self) -> Option<f32> {
        match self.behavior {
            Behavior::Virus { scan_ms } => {
                Some((scan_ms / consts::VIRUS_SCAN_MS * 100.0).min(100.0))
            }
            _ => None,
        }
    }
}

impl Behavior {
    pub fn initial(kind: AdKind) -> Self {
        match kind {
            AdKind::Chat => Behavior::Chat {
                messages_shown: 1,
                next_message_ms: consts::CHAT_MESSAGE_PERIOD_MS,
            },
            AdKind::Gremlin => Behavior::Gremlin {
                close_offset: Vec2::ZERO,
                dodges_left: consts::GREMLIN_MAX_DODGES,
            },
            AdKind::Video => Behavior::Video {
                lock_ms: consts::VIDEO_LOCK_MS,
            },
            AdKind::Survey => Behavior::Survey { question_index: 0 },
            AdKind::Chaser => Behavior::Chaser { contact_ms: 0.0 },
            AdKind::Virus => Behavior::Virus { scan_ms: 0.0 },
            _ => Behavior::Static,
        }
    }
}
