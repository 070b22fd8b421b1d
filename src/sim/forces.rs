//! Movement pipeline
//!
//! Per-tick position updates run through an explicit ordered list of named
//! stages, each a pure function `(pos, dt, ctx) -> pos'` clamped to the track
//! after it runs. Later stages see the output of earlier stages; the order is
//! the contract:
//!
//! 1. `BaseDrift`   - background pull toward Death
//! 2. `ProblemDrag` - extra pull while a problem pushes, guard-banded and
//!    floor-clamped so problems slow progress but never finish a run
//! 3. `CenterPull`  - proportional magnet toward mid-track
//! 4. `KingSidePull`- extra leftward pull inside the final stretch
//!
//! Pushing problems are not a stage: after every movement (tick or nudge)
//! they re-pin to the player's new position, and pass prevention clamps
//! against the fresh pin. A forward nudge therefore gains its full magnitude
//! and carries the pusher with it.
//!
//! Nudges are edge-triggered inputs, not pipeline stages: forward nudges are
//! attenuated by the king wall (evaluated at the pre-nudge position) and then
//! scaled by the crown bonus.

use crate::tuning::Tuning;
use crate::{clamp01, clamp_track, consts};

/// Per-tick inputs to the pipeline, precomputed by the caller so every stage
/// stays pure
#[derive(Debug, Clone, Copy)]
pub struct ForceCtx<'a> {
    pub tuning: &'a Tuning,
    /// Phase-scaled base drift, % of track per second (already halved when
    /// crowned)
    pub drift_per_sec: f32,
    /// Pushing-problem drag, % per second; zero when nothing pushes
    pub drag_per_sec: f32,
    /// Center magnet strength, crown bonus already applied
    pub center_k: f32,
}

/// Named pipeline stages, applied in `STAGE_ORDER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceStage {
    BaseDrift,
    ProblemDrag,
    CenterPull,
    KingSidePull,
}

/// The documented evaluation order: drift and drag before the shaping forces
pub const STAGE_ORDER: [ForceStage; 4] = [
    ForceStage::BaseDrift,
    ForceStage::ProblemDrag,
    ForceStage::CenterPull,
    ForceStage::KingSidePull,
];

impl ForceStage {
    pub fn apply(self, pos: f32, dt: f32, ctx: &ForceCtx) -> f32 {
        match self {
            ForceStage::BaseDrift => pos - ctx.drift_per_sec * dt,

            ForceStage::ProblemDrag => {
                if ctx.drag_per_sec <= 0.0 {
                    return pos;
                }
                let g = &ctx.tuning.guards;
                // In the danger band or at/below the floor, problems add
                // no pull at all.
                if pos <= g.danger_band || pos <= g.push_floor {
                    return pos;
                }
                (pos - ctx.drag_per_sec * dt).max(g.push_floor)
            }

            ForceStage::CenterPull => {
                let c = &ctx.tuning.center;
                if !c.enabled {
                    return pos;
                }
                // Proportional controller: k is ~%/sec at full distance.
                pos + (ctx.center_k / 100.0) * (c.center_pos - pos) * dt
            }

            ForceStage::KingSidePull => {
                let ep = &ctx.tuning.extra_left_pull;
                let start = ctx.tuning.king_wall.start_at;
                if !ep.enabled || pos <= start {
                    return pos;
                }
                let t = clamp01((pos - start) / (consts::TRACK_MAX - start));
                pos - ep.rate_at_edge * t * dt
            }
        }
    }
}

/// Run every stage in order, clamping to the track after each
pub fn run_pipeline(pos: f32, dt: f32, ctx: &ForceCtx) -> f32 {
    STAGE_ORDER
        .iter()
        .fold(pos, |p, stage| clamp_track(stage.apply(p, dt, ctx)))
}

/// Resistance multiplier at a position: 1 below the wall start, growing
/// toward `max_mult` at 100 along a power curve of the normalized
/// penetration
pub fn king_wall_multiplier(pos: f32, tuning: &Tuning) -> f32 {
    let cfg = &tuning.king_wall;
    if pos <= cfg.start_at {
        return 1.0;
    }
    let t = clamp01((pos - cfg.start_at) / (consts::TRACK_MAX - cfg.start_at));
    1.0 + (cfg.max_mult - 1.0) * t.powf(cfg.curve_power)
}

/// Apply a forward nudge. The wall multiplier is evaluated at the position
/// held before the nudge; the crown bonus then scales the attenuated gain.
pub fn forward_nudge(pos: f32, magnitude: f32, crown_bonus: f32, tuning: &Tuning) -> f32 {
    let mult = king_wall_multiplier(pos, tuning).max(1.0);
    let effective = (magnitude / mult) * crown_bonus;
    clamp_track(pos + effective)
}

/// Apply a backward nudge. No wall, no bonus.
pub fn backward_nudge(pos: f32, magnitude: f32) -> f32 {
    clamp_track(pos - magnitude)
}
