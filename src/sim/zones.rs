//! Zone classification over the track
//!
//! The track partitions into five life-stage bands:
//! - danger: near the bottom, resources are thin
//! - effort: below middle, progress takes constant work
//! - stable: the balanced middle, easiest to hover in
//! - climb: above middle, resistance increases
//! - throne: rare air next to the crown

use serde::{Deserialize, Serialize};

use crate::clamp_track;
use crate::tuning::ZoneThresholds;

/// Position-derived life-stage band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Danger,
    Effort,
    Stable,
    Climb,
    Throne,
}

impl Zone {
    /// Fixed iteration order, also the tie-break priority for
    /// dominant-zone selection
    pub const ALL: [Zone; 5] = [
        Zone::Danger,
        Zone::Effort,
        Zone::Stable,
        Zone::Climb,
        Zone::Throne,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Zone::Danger => "danger",
            Zone::Effort => "effort",
            Zone::Stable => "stable",
            Zone::Climb => "climb",
            Zone::Throne => "throne",
        }
    }

    /// Ordinal rank, ascending with position along the track
    pub fn rank(&self) -> usize {
        match self {
            Zone::Danger => 0,
            Zone::Effort => 1,
            Zone::Stable => 2,
            Zone::Climb => 3,
            Zone::Throne => 4,
        }
    }

    /// Whether time spent here counts toward the lifespan balance bonus
    pub fn is_good(&self) -> bool {
        matches!(self, Zone::Stable | Zone::Climb | Zone::Throne)
    }

    /// HUD metadata for this zone
    pub fn meta(&self) -> &'static ZoneMeta {
        match self {
            Zone::Danger => &ZoneMeta {
                msg: "Near bottom - life is hard; resources are thin.",
                color: "#ef4444",
            },
            Zone::Effort => &ZoneMeta {
                msg: "Below middle - limited options; keep moving.",
                color: "#eab308",
            },
            Zone::Stable => &ZoneMeta {
                msg: "Middle - stable footing.",
                color: "#22c55e",
            },
            Zone::Climb => &ZoneMeta {
                msg: "Above middle - challenges ease with stability and wealth.",
                color: "#c0c6d1",
            },
            Zone::Throne => &ZoneMeta {
                msg: "Crown - leverage makes problems lighter.",
                color: "#d97706",
            },
        }
    }
}

/// HUD message + color for a zone, so presenters never hardcode zone copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneMeta {
    pub msg: &'static str,
    pub color: &'static str,
}

/// Map a track position to its zone. Total: input is clamped to the track
/// range first, so every finite position classifies.
pub fn zone_for_pos(pos: f32, thresholds: &ZoneThresholds) -> Zone {
    let p = clamp_track(pos);
    if p < thresholds.effort_min {
        Zone::Danger
    } else if p < thresholds.stable_min {
        Zone::Effort
    } else if p < thresholds.climb_min {
        Zone::Stable
    } else if p < thresholds.throne_min {
        Zone::Climb
    } else {
        Zone::Throne
    }
}
