//! Data-driven game balance
//!
//! Every threshold the simulation cares about lives here so nothing is
//! hard-coded at a call site. Defaults carry the canonical values; the whole
//! bundle round-trips through serde for external tweaking.

use serde::{Deserialize, Serialize};

/// Center magnet: makes it easy to stay at / return to mid-track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterTuning {
    pub enabled: bool,
    /// Where the magnet pulls toward
    pub center_pos: f32,
    /// Pull strength, ~% of track per second at full distance
    pub k: f32,
}

impl Default for CenterTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            center_pos: 50.0,
            k: 14.0,
        }
    }
}

/// King-side resistance wall: makes it hard to reach/hold the right end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KingWallTuning {
    /// Resistance begins past this position
    pub start_at: f32,
    /// How sharply resistance ramps across the final stretch
    pub curve_power: f32,
    /// Max resistance multiplier at position 100; effective forward
    /// movement = movement / multiplier
    pub max_mult: f32,
}

impl Default for KingWallTuning {
    fn default() -> Self {
        Self {
            start_at: 72.0,
            curve_power: 2.1,
            max_mult: 6.0,
        }
    }
}

/// Extra leftward pull as the player nears the King, on top of normal drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraLeftPullTuning {
    pub enabled: bool,
    /// Additional % per second of left pull at position 100; scales
    /// linearly from the wall start to the edge
    pub rate_at_edge: f32,
}

impl Default for ExtraLeftPullTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            rate_at_edge: 12.0,
        }
    }
}

/// Guard bands that keep problems from killing the player outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemGuards {
    /// Below this position problems pause entirely; only drift can finish
    /// a run
    pub danger_band: f32,
    /// Problems can never drag the player below this position
    pub push_floor: f32,
}

impl Default for ProblemGuards {
    fn default() -> Self {
        Self {
            danger_band: 12.0,
            push_floor: 45.0,
        }
    }
}

/// Ascending zone cutoffs partitioning [0, 100].
///
/// danger [0, effort_min), effort [effort_min, stable_min),
/// stable [stable_min, climb_min), climb [climb_min, throne_min),
/// throne [throne_min, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneThresholds {
    pub effort_min: f32,
    pub stable_min: f32,
    pub climb_min: f32,
    pub throne_min: f32,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            effort_min: 30.0,
            stable_min: 40.0,
            climb_min: 60.0,
            throne_min: 80.0,
        }
    }
}

/// Ascending age breakpoints for difficulty phases.
///
/// child [0, teen_at), teen [teen_at, adult_at), adult [adult_at, senior_at),
/// senior [senior_at, ..).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseBreakpoints {
    pub teen_at: u32,
    pub adult_at: u32,
    pub senior_at: u32,
}

impl Default for PhaseBreakpoints {
    fn default() -> Self {
        Self {
            teen_at: 13,
            adult_at: 20,
            senior_at: 55,
        }
    }
}

/// Life-expectancy model constants (years).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifespanTuning {
    /// Average life expectancy
    pub base_life: f32,
    /// Hard cap
    pub max_life: f32,
    /// Sanity floor
    pub min_life: f32,
    /// The crown extends expectancy (still capped)
    pub king_bonus_years: f32,
    /// Bonus when life was spent mostly above the middle
    pub good_max_bonus: f32,
    /// Penalty when life was spent mostly below the middle
    pub bad_max_penalty: f32,
}

impl Default for LifespanTuning {
    fn default() -> Self {
        Self {
            base_life: 75.0,
            max_life: 122.0,
            min_life: 40.0,
            king_bonus_years: 7.0,
            good_max_bonus: 10.0,
            bad_max_penalty: -10.0,
        }
    }
}

/// Multipliers applied once the player has been crowned. Problems are still
/// there and aging still drags, but the baseline gets easier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrownBuffs {
    /// Problems drag only this fraction as much
    pub drag_mult: f32,
    /// Spawn windows stretch by this factor (less frequent)
    pub spawn_mult: f32,
    /// Problem speed slows by this factor
    pub speed_mult: f32,
    /// Center magnet strengthens by this factor
    pub center_bonus: f32,
    /// Forward nudges gain this factor
    pub nudge_forward: f32,
}

impl Default for CrownBuffs {
    fn default() -> Self {
        Self {
            drag_mult: 0.5,
            spawn_mult: 1.5,
            speed_mult: 0.7,
            center_bonus: 1.4,
            nudge_forward: 3.0,
        }
    }
}

/// The full balance bundle handed to the session controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tuning {
    pub center: CenterTuning,
    pub king_wall: KingWallTuning,
    pub extra_left_pull: ExtraLeftPullTuning,
    pub guards: ProblemGuards,
    pub zones: ZoneThresholds,
    pub phases: PhaseBreakpoints,
    pub lifespan: LifespanTuning,
    pub crown: CrownBuffs,
}
