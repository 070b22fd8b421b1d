//! Presentation-layer abstraction
//!
//! The core never touches a screen: everything the surrounding application
//! renders goes through the `Presenter` trait, and everything the player
//! types comes in through `StartParams` sanitation plus the controller's
//! edge-triggered input methods. Problem visuals are created and removed
//! only by the obstacle manager.

use serde::Serialize;

use crate::sim::difficulty::ProblemStyle;
use crate::sim::zones::{Zone, ZoneMeta};

/// Sanitized run-start parameters from form-like input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartParams {
    pub name: String,
    pub age: u32,
}

impl StartParams {
    pub const DEFAULT_NAME: &'static str = "Player";
    pub const DEFAULT_AGE: u32 = 10;

    /// Boundary sanitation: blank names default, non-finite ages default,
    /// and age clamps to [1, 120]. Bad input never propagates as a failure.
    pub fn sanitize(name: &str, age: f64) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            Self::DEFAULT_NAME.to_string()
        } else {
            name.to_string()
        };
        let age = if age.is_finite() {
            (age.round() as i64).clamp(1, 120) as u32
        } else {
            Self::DEFAULT_AGE
        };
        Self { name, age }
    }
}

/// Narrative bucket selected by the core at death. The presenter owns the
/// prose; the core only decides which story applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Narrative {
    /// The run reached the King at some point
    Crowned,
    /// Uncrowned: story follows the dominant life zone
    Zone(Zone),
}

/// Presentation sinks the core calls into. Default bodies are no-ops so
/// presenters implement only what they show.
pub trait Presenter {
    /// The player marker moved
    fn render_position(&mut self, _pos: f32) {}

    /// A problem exists at `x`; called on spawn and every tick after
    fn render_problem(&mut self, _id: u32, _x: f32, _style: &ProblemStyle, _pushing: bool) {}

    /// A problem's visual must be removed (cleared or session reset)
    fn remove_problem_visual(&mut self, _id: u32) {}

    /// The age HUD should update (fires once per simulated year)
    fn render_age(&mut self, _years: u32) {}

    /// The player crossed into a different zone
    fn zone_changed(&mut self, _zone: Zone, _meta: &ZoneMeta) {}

    /// The run ended; invoked exactly once per run
    fn show_result(&mut self, _message: &str, _narrative: Narrative) {}
}

/// Renders nothing; for tests and headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_defaults() {
        let p = StartParams::sanitize("", f64::NAN);
        assert_eq!(p.name, "Player");
        assert_eq!(p.age, 10);

        let p = StartParams::sanitize("   ", f64::INFINITY);
        assert_eq!(p.name, "Player");
        assert_eq!(p.age, 10);
    }

    #[test]
    fn test_sanitize_clamps_age() {
        assert_eq!(StartParams::sanitize("Ada", 0.0).age, 1);
        assert_eq!(StartParams::sanitize("Ada", -40.0).age, 1);
        assert_eq!(StartParams::sanitize("Ada", 500.0).age, 120);
        assert_eq!(StartParams::sanitize("Ada", 33.0).age, 33);
    }

    #[test]
    fn test_sanitize_trims_name() {
        let p = StartParams::sanitize("  Ada  ", 25.0);
        assert_eq!(p.name, "Ada");
    }
}
