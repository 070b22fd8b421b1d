//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Host-supplied clock only (no wall-clock reads)
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the `Presenter` seam

pub mod collision;
pub mod difficulty;
pub mod forces;
pub mod lifespan;
pub mod problems;
pub mod state;
pub mod tick;
pub mod zones;

pub use collision::{MilestoneOutcome, resolve_milestones};
pub use difficulty::{DifficultySnapshot, DifficultyState, Phase, ProblemStyle, phase_for_age};
pub use forces::{ForceCtx, ForceStage, STAGE_ORDER, run_pipeline};
pub use lifespan::{DominantZone, LifeSpan, ZoneTimes};
pub use problems::{Problem, ProblemField};
pub use state::{DeathSummary, Session};
pub use tick::tick;
pub use zones::{Zone, ZoneMeta, zone_for_pos};
