//! Collision and milestone resolution
//!
//! Pure interval-overlap tests over logical track coordinates. Entities have
//! fixed logical half-widths; the poles sit at the track ends. Milestones
//! form a small state machine on the session:
//! alive(uncrowned) -> alive(crowned) -> dead, plus the direct
//! uncrowned -> dead edge. Crowned is a one-way latch; dead is terminal.

use super::state::Session;
use crate::consts::*;

/// Horizontal overlap of two centered intervals, with the shared tolerance pad
#[inline]
pub fn intervals_overlap(a_center: f32, a_half: f32, b_center: f32, b_half: f32) -> bool {
    a_center + a_half >= b_center - b_half - OVERLAP_PAD
        && a_center - a_half <= b_center + b_half + OVERLAP_PAD
}

/// Player extent against a problem extent
#[inline]
pub fn player_overlaps_problem(player_pos: f32, problem_x: f32) -> bool {
    intervals_overlap(player_pos, PLAYER_HALF_WIDTH, problem_x, PROBLEM_HALF_WIDTH)
}

/// Player extent against the Death pole at the left end
#[inline]
pub fn player_at_death(player_pos: f32) -> bool {
    intervals_overlap(player_pos, PLAYER_HALF_WIDTH, TRACK_MIN, POLE_HALF_WIDTH)
}

/// Player extent against the King pole at the right end
#[inline]
pub fn player_at_king(player_pos: f32) -> bool {
    intervals_overlap(player_pos, PLAYER_HALF_WIDTH, TRACK_MAX, POLE_HALF_WIDTH)
}

/// What a milestone pass newly observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MilestoneOutcome {
    /// The crown latched on this pass (at most once per run)
    pub newly_crowned: bool,
    /// Death-pole contact on this pass
    pub died: bool,
}

/// Check pole contact and update the session's milestone latches. Run after
/// every position adjustment, because a force can newly trigger a boundary.
pub fn resolve_milestones(session: &mut Session) -> MilestoneOutcome {
    let mut outcome = MilestoneOutcome::default();
    if session.dead {
        return outcome;
    }

    if !session.reached_king && player_at_king(session.position) {
        session.reached_king = true;
        outcome.newly_crowned = true;
    }

    if player_at_death(session.position) {
        session.dead = true;
        outcome.died = true;
    }

    outcome
}
