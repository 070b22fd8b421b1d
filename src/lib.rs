//! Crown Drift - a life-track arcade simulation core
//!
//! A player marker slides along a 0-100 track between two fixed poles:
//! Death at 0 and King at 100. Background drift pulls toward Death, taps
//! nudge forward, roaming "problem" obstacles block and drag, and an
//! age/zone-driven mortality model ends the run.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement pipeline, problems, mortality)
//! - `session`: Session controller driving the frame and year clocks
//! - `platform`: Presenter abstraction and input boundary sanitation
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use platform::{Narrative, NullPresenter, Presenter, StartParams};
pub use session::SessionController;
pub use tuning::Tuning;

/// Track-space constants
pub mod consts {
    /// Left end of the track (Death pole anchor)
    pub const TRACK_MIN: f32 = 0.0;
    /// Right end of the track (King pole anchor)
    pub const TRACK_MAX: f32 = 100.0;

    /// Baseline world drift toward Death (% of track per second)
    pub const DRIFT_BASE: f32 = 6.0;
    /// Drift is halved once the player has been crowned
    pub const CROWNED_DRIFT_DIVISOR: f32 = 2.0;

    /// A pushing problem sits locked this far ahead of the player
    pub const LOCK_OFFSET: f32 = 2.0;
    /// Taps needed to clear a pushing problem
    pub const TAPS_TO_CLEAR: u32 = 10;
    /// Track position where new problems appear
    pub const PROBLEM_SPAWN_X: f32 = 96.0;

    /// Logical half-widths for interval-overlap collision (% of track)
    pub const PLAYER_HALF_WIDTH: f32 = 3.0;
    pub const PROBLEM_HALF_WIDTH: f32 = 3.0;
    pub const POLE_HALF_WIDTH: f32 = 2.0;
    /// Extra tolerance added on top of the half-widths when testing overlap
    pub const OVERLAP_PAD: f32 = 0.5;

    /// Real seconds per simulated year
    pub const YEAR_INTERVAL_SECS: f64 = 1.0;
}

/// Clamp a position to the track range
#[inline]
pub fn clamp_track(pos: f32) -> f32 {
    pos.clamp(consts::TRACK_MIN, consts::TRACK_MAX)
}

/// Clamp to [0, 1]
#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}
