//! Run state
//!
//! One `Session` per active run. Created/reset wholesale by the session
//! controller; position is clamped on every write and nothing mutates once
//! `dead` latches.

use serde::Serialize;

use super::lifespan::DominantZone;
use crate::clamp_track;

/// The single active run
#[derive(Debug, Clone)]
pub struct Session {
    pub player_name: String,
    /// % along the track: 0 = Death pole, 100 = King pole
    pub position: f32,
    /// One-way latch, set on first King contact, never cleared mid-run
    pub reached_king: bool,
    /// Terminal flag
    pub dead: bool,
    pub age_years: u32,
}

impl Session {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            player_name: name.to_string(),
            position: 50.0,
            reached_king: false,
            dead: false,
            age_years: age,
        }
    }

    /// Fresh-run reset: mid-track position, flags cleared, name applied.
    pub fn reset(&mut self, name: &str) {
        self.player_name = if name.trim().is_empty() {
            "Player".to_string()
        } else {
            name.to_string()
        };
        self.position = 50.0;
        self.reached_king = false;
        self.dead = false;
    }

    /// Write the position through the track clamp. No-op once dead.
    pub fn set_position(&mut self, pos: f32) {
        if self.dead {
            return;
        }
        self.position = clamp_track(pos);
    }
}

/// Final state handed to the presenter exactly once, at death
#[derive(Debug, Clone, Serialize)]
pub struct DeathSummary {
    pub player_name: String,
    pub age_years: u32,
    pub reached_king: bool,
    pub dominant: DominantZone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut s = Session::new("Ada", 10);
        s.set_position(88.0);
        s.reached_king = true;
        s.reset("Grace");
        assert_eq!(s.player_name, "Grace");
        assert_eq!(s.position, 50.0);
        assert!(!s.reached_king);
        assert!(!s.dead);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut s = Session::new("Ada", 10);
        s.set_position(12.0);
        s.reset("Grace");
        let once = s.clone();
        s.reset("Grace");
        assert_eq!(s.player_name, once.player_name);
        assert_eq!(s.position, once.position);
        assert_eq!(s.reached_king, once.reached_king);
        assert_eq!(s.dead, once.dead);
    }

    #[test]
    fn test_empty_name_defaults() {
        let mut s = Session::new("Ada", 10);
        s.reset("   ");
        assert_eq!(s.player_name, "Player");
    }

    #[test]
    fn test_position_clamps_and_freezes_when_dead() {
        let mut s = Session::new("Ada", 10);
        s.set_position(150.0);
        assert_eq!(s.position, 100.0);
        s.set_position(-3.0);
        assert_eq!(s.position, 0.0);

        s.set_position(40.0);
        s.dead = true;
        s.set_position(70.0);
        assert_eq!(s.position, 40.0);
    }
}
