//! Age-driven difficulty
//!
//! Elapsed years map to a phase (child/teen/adult/senior); each phase selects
//! an immutable tuning snapshot (drift multiplier, nudge magnitudes, problem
//! spawn cadence/speed/drag, visual style). The live snapshot is owned by the
//! session controller as a `DifficultyState` and replaced wholesale once per
//! simulated year, so tuning stays stable within a year.
//!
//! Crown buffs are never baked into the snapshot: the accessors take the live
//! `reached_king` flag so the easing kicks in the instant the crown lands.

use serde::Serialize;

use crate::tuning::{CrownBuffs, PhaseBreakpoints, Tuning};

/// Age-derived difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Child,
    Teen,
    Adult,
    Senior,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Child => "child",
            Phase::Teen => "teen",
            Phase::Adult => "adult",
            Phase::Senior => "senior",
        }
    }

    /// Ordinal rank, ascending with age
    pub fn rank(&self) -> usize {
        match self {
            Phase::Child => 0,
            Phase::Teen => 1,
            Phase::Adult => 2,
            Phase::Senior => 3,
        }
    }
}

/// Map an age to its phase. Total over all ages, including ages below the
/// first breakpoint.
pub fn phase_for_age(age: u32, breakpoints: &PhaseBreakpoints) -> Phase {
    if age >= breakpoints.senior_at {
        Phase::Senior
    } else if age >= breakpoints.adult_at {
        Phase::Adult
    } else if age >= breakpoints.teen_at {
        Phase::Teen
    } else {
        Phase::Child
    }
}

/// Visual descriptor for problem boxes, handed to the presenter verbatim
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProblemStyle {
    pub bg: &'static str,
    pub border: &'static str,
    pub scale: f32,
}

/// Immutable tuning bundle selected by age phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultySnapshot {
    pub phase: Phase,
    /// Scales the baseline drift toward Death
    pub drift_mult: f32,
    /// Forward nudge magnitude (% of track per tap)
    pub nudge_forward: f32,
    /// Backward nudge magnitude
    pub nudge_back: f32,
    /// Problem spawn window bounds (seconds)
    pub spawn_min_secs: f32,
    pub spawn_max_secs: f32,
    /// Problem approach speed (% of track per second)
    pub problem_speed: f32,
    /// Extra drag while a problem is pushing, as a fraction of base drift
    pub drag_mult: f32,
    pub style: ProblemStyle,
}

/// Pure phase -> snapshot lookup
pub fn snapshot_for_phase(phase: Phase) -> DifficultySnapshot {
    match phase {
        Phase::Child => DifficultySnapshot {
            phase,
            drift_mult: 0.55,
            nudge_forward: 0.8,
            nudge_back: 1.6,
            spawn_min_secs: 8.0,
            spawn_max_secs: 13.0,
            problem_speed: 10.0,
            drag_mult: 0.3,
            style: ProblemStyle {
                bg: "#666",
                border: "#9aa",
                scale: 0.9,
            },
        },
        Phase::Teen => DifficultySnapshot {
            phase,
            drift_mult: 0.9,
            nudge_forward: 1.2,
            nudge_back: 2.4,
            spawn_min_secs: 5.0,
            spawn_max_secs: 9.0,
            problem_speed: 13.0,
            drag_mult: 0.6,
            style: ProblemStyle {
                bg: "#c9a227",
                border: "#ffd76a",
                scale: 1.0,
            },
        },
        Phase::Adult => DifficultySnapshot {
            phase,
            drift_mult: 1.0,
            nudge_forward: 1.5,
            nudge_back: 3.0,
            spawn_min_secs: 3.0,
            spawn_max_secs: 6.0,
            problem_speed: 15.0,
            drag_mult: 0.8,
            style: ProblemStyle {
                bg: "#d4b43a",
                border: "#ffe083",
                scale: 1.1,
            },
        },
        Phase::Senior => DifficultySnapshot {
            phase,
            drift_mult: 1.25,
            nudge_forward: 0.8,
            nudge_back: 2.4,
            spawn_min_secs: 2.0,
            spawn_max_secs: 4.0,
            problem_speed: 16.0,
            drag_mult: 1.0,
            style: ProblemStyle {
                bg: "#b22222",
                border: "#ff9a9a",
                scale: 1.2,
            },
        },
    }
}

/// The live difficulty handle owned by the session controller and passed by
/// reference to every component that reads tuning.
#[derive(Debug, Clone)]
pub struct DifficultyState {
    snapshot: DifficultySnapshot,
    breakpoints: PhaseBreakpoints,
    crown: CrownBuffs,
}

impl DifficultyState {
    pub fn new(tuning: &Tuning, age: u32) -> Self {
        let breakpoints = tuning.phases.clone();
        let snapshot = snapshot_for_phase(phase_for_age(age, &breakpoints));
        Self {
            snapshot,
            breakpoints,
            crown: tuning.crown.clone(),
        }
    }

    /// Recompute and atomically replace the live snapshot for a new age.
    /// Called once per simulated year.
    pub fn apply_for_age(&mut self, age: u32) {
        let phase = phase_for_age(age, &self.breakpoints);
        if phase != self.snapshot.phase {
            log::info!("difficulty phase -> {} at age {age}", phase.name());
        }
        self.snapshot = snapshot_for_phase(phase);
    }

    pub fn snapshot(&self) -> &DifficultySnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    pub fn drift_mult(&self) -> f32 {
        self.snapshot.drift_mult
    }

    /// Spawn window bounds; crowned players see spawns stretched out
    pub fn spawn_window(&self, reached_king: bool) -> (f32, f32) {
        let (min, max) = (self.snapshot.spawn_min_secs, self.snapshot.spawn_max_secs);
        if reached_king {
            (min * self.crown.spawn_mult, max * self.crown.spawn_mult)
        } else {
            (min, max)
        }
    }

    /// Problem approach speed; slowed after the crown
    pub fn problem_speed(&self, reached_king: bool) -> f32 {
        if reached_king {
            self.snapshot.problem_speed * self.crown.speed_mult
        } else {
            self.snapshot.problem_speed
        }
    }

    /// Pushing-problem drag as a fraction of base drift; halved after the crown
    pub fn drag_mult(&self, reached_king: bool) -> f32 {
        if reached_king {
            self.snapshot.drag_mult * self.crown.drag_mult
        } else {
            self.snapshot.drag_mult
        }
    }

    /// Center magnet strength gains after the crown
    pub fn center_strength(&self, base_k: f32, reached_king: bool) -> f32 {
        if reached_king {
            base_k * self.crown.center_bonus
        } else {
            base_k
        }
    }

    /// Forward-nudge gain multiplier from the crown
    pub fn crown_nudge_bonus(&self, reached_king: bool) -> f32 {
        if reached_king {
            self.crown.nudge_forward
        } else {
            1.0
        }
    }
}
