//! Roaming "problem" obstacles
//!
//! Each problem runs a small state machine:
//! spawned (not pushing) -> pushing -> cleared. A spawned problem slides left
//! toward the player; on first extent overlap it locks just ahead of the
//! player and is carried there every tick until repeated taps clear it.
//! While anything is pushing, the player takes extra backward drag (applied
//! by the movement pipeline, guard-banded so problems never finish a run).
//!
//! The field owns problem visuals exclusively: it alone calls
//! `render_problem` / `remove_problem_visual` on the presenter.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::player_overlaps_problem;
use super::difficulty::{DifficultyState, ProblemStyle};
use crate::consts::{LOCK_OFFSET, PROBLEM_SPAWN_X, TAPS_TO_CLEAR};
use crate::platform::Presenter;
use crate::clamp_track;

/// A single problem entity
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub id: u32,
    pub x: f32,
    pub pushing: bool,
    pub taps: u32,
    pub cleared: bool,
    /// Captured from the live snapshot at spawn time, not live-updated
    pub speed: f32,
    /// Captured at spawn; phase styling does not restyle old problems
    pub style: ProblemStyle,
}

/// Spawns, advances, and retires problems on a randomized schedule
#[derive(Debug, Clone)]
pub struct ProblemField {
    problems: Vec<Problem>,
    counter: u32,
    rng: Pcg32,
    pub(crate) next_spawn_at: f64,
}

impl ProblemField {
    pub fn new(seed: u64) -> Self {
        Self {
            problems: Vec::new(),
            counter: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_spawn_at: f64::INFINITY,
        }
    }

    /// Remove every problem (and its visual) and restart the spawn schedule.
    pub fn reset<P: Presenter>(
        &mut self,
        now: f64,
        difficulty: &DifficultyState,
        reached_king: bool,
        presenter: &mut P,
    ) {
        for p in &self.problems {
            presenter.remove_problem_visual(p.id);
        }
        self.problems.clear();
        self.counter = 0;
        self.schedule_next(now, difficulty, reached_king);
    }

    /// Draw the next spawn delay from the live (crown-buffed) window.
    /// Re-read at schedule time so cadence tightens as phases advance.
    pub fn schedule_next(&mut self, now: f64, difficulty: &DifficultyState, reached_king: bool) {
        let (min, max) = difficulty.spawn_window(reached_king);
        let delay = if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        };
        self.next_spawn_at = now + delay as f64;
    }

    /// Spawn if the schedule is due, then immediately reschedule
    pub fn maybe_spawn<P: Presenter>(
        &mut self,
        now: f64,
        difficulty: &DifficultyState,
        reached_king: bool,
        presenter: &mut P,
    ) {
        if now < self.next_spawn_at {
            return;
        }
        self.spawn(difficulty, reached_king, presenter);
        self.schedule_next(now, difficulty, reached_king);
    }

    fn spawn<P: Presenter>(
        &mut self,
        difficulty: &DifficultyState,
        reached_king: bool,
        presenter: &mut P,
    ) {
        self.counter += 1;
        let snapshot = difficulty.snapshot();
        let problem = Problem {
            id: self.counter,
            x: clamp_track(PROBLEM_SPAWN_X),
            pushing: false,
            taps: 0,
            cleared: false,
            speed: difficulty.problem_speed(reached_king),
            style: snapshot.style,
        };
        log::debug!(
            "problem #{} spawned at {:.1} ({} speed {:.1}%/s)",
            problem.id,
            problem.x,
            snapshot.phase.name(),
            problem.speed
        );
        presenter.render_problem(problem.id, problem.x, &problem.style, false);
        self.problems.push(problem);
    }

    /// Advance non-pushing problems and pin pushing ones just ahead of the
    /// player. Runs once per frame before the force pipeline.
    pub fn update<P: Presenter>(&mut self, dt: f32, player_pos: f32, presenter: &mut P) {
        for p in &mut self.problems {
            if p.cleared {
                continue;
            }
            if !p.pushing {
                p.x = clamp_track(p.x - p.speed * dt);
                if player_overlaps_problem(player_pos, p.x) {
                    // Lock just in front of the player; they can't pass
                    // each other from here on.
                    p.pushing = true;
                    p.x = clamp_track(player_pos + LOCK_OFFSET);
                    log::debug!("problem #{} is pushing", p.id);
                }
            } else {
                p.x = clamp_track(player_pos + LOCK_OFFSET);
            }
            presenter.render_problem(p.id, p.x, &p.style, p.pushing);
        }
    }

    /// Whether any non-cleared problem is currently pushing
    pub fn any_pushing(&self) -> bool {
        self.problems.iter().any(|p| p.pushing && !p.cleared)
    }

    /// Forward limit imposed by pushing problems: the player cannot move
    /// past `x - LOCK_OFFSET` of the nearest one
    pub fn block_at(&self) -> Option<f32> {
        self.problems
            .iter()
            .filter(|p| p.pushing && !p.cleared)
            .map(|p| p.x - LOCK_OFFSET)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Route a directed tap at the pushing problem nearest the player.
    /// Exact distance ties resolve to the earliest-spawned problem. Returns
    /// the tapped id, or None when nothing is pushing (the tap then has no
    /// obstacle-side effect).
    pub fn tap_nearest<P: Presenter>(
        &mut self,
        player_pos: f32,
        presenter: &mut P,
    ) -> Option<u32> {
        let mut best: Option<usize> = None;
        let mut best_dist = f32::INFINITY;
        for (i, p) in self.problems.iter().enumerate() {
            if !p.pushing || p.cleared {
                continue;
            }
            let dist = (p.x - player_pos).abs();
            if dist < best_dist {
                best = Some(i);
                best_dist = dist;
            }
        }

        let idx = best?;
        let p = &mut self.problems[idx];
        p.taps += 1;
        let id = p.id;
        if p.taps >= TAPS_TO_CLEAR {
            p.cleared = true;
            log::info!("problem #{id} cleared after {} taps", p.taps);
            presenter.remove_problem_visual(id);
            self.problems.retain(|p| !p.cleared);
        }
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NullPresenter;
    use crate::tuning::Tuning;

    fn adult_difficulty() -> DifficultyState {
        let tuning = Tuning::default();
        DifficultyState::new(&tuning, 30)
    }

    fn spawn_one(field: &mut ProblemField, difficulty: &DifficultyState) {
        field.next_spawn_at = 0.0;
        field.maybe_spawn(0.0, difficulty, false, &mut NullPresenter);
    }

    #[test]
    fn test_spawn_captures_snapshot_values() {
        let difficulty = adult_difficulty();
        let mut field = ProblemField::new(7);
        spawn_one(&mut field, &difficulty);

        let p = field.iter().next().unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.x, 96.0);
        assert!(!p.pushing);
        assert_eq!(p.speed, 15.0);

        // Speed stays as captured even if the phase later changes.
        let mut older = difficulty.clone();
        older.apply_for_age(60);
        assert_eq!(field.iter().next().unwrap().speed, 15.0);
    }

    #[test]
    fn test_approach_lock_and_carry() {
        // Scenario C: problem at 96 moving left at 15%/s against a
        // stationary player at 50.
        let difficulty = adult_difficulty();
        let mut field = ProblemField::new(7);
        spawn_one(&mut field, &difficulty);
        let mut presenter = NullPresenter;

        let dt = 0.1;
        let mut locked_after = 0.0_f32;
        for _ in 0..60 {
            field.update(dt, 50.0, &mut presenter);
            locked_after += dt;
            if field.any_pushing() {
                break;
            }
        }
        assert!(field.any_pushing(), "problem never locked onto the player");
        // Overlap begins once extents touch, well before x reaches 50.
        assert!(locked_after < 3.5);

        // Locked: pinned exactly at player + LOCK_OFFSET every tick,
        // carried by the player's own movement.
        field.update(dt, 50.0, &mut presenter);
        assert_eq!(field.iter().next().unwrap().x, 52.0);
        field.update(dt, 47.0, &mut presenter);
        assert_eq!(field.iter().next().unwrap().x, 49.0);
        assert_eq!(field.block_at(), Some(47.0));
    }

    #[test]
    fn test_clear_threshold() {
        let difficulty = adult_difficulty();
        let mut field = ProblemField::new(7);
        spawn_one(&mut field, &difficulty);
        let mut presenter = NullPresenter;

        // Walk the problem in until it locks.
        for _ in 0..40 {
            field.update(0.1, 50.0, &mut presenter);
        }
        assert!(field.any_pushing());

        for _ in 0..9 {
            field.tap_nearest(50.0, &mut presenter);
        }
        assert_eq!(field.len(), 1, "nine taps must not clear");
        assert_eq!(field.iter().next().unwrap().taps, 9);

        field.tap_nearest(50.0, &mut presenter);
        assert!(field.is_empty(), "tenth tap clears");
    }

    #[test]
    fn test_tap_targets_nearest_with_stable_ties() {
        let difficulty = adult_difficulty();
        let mut field = ProblemField::new(7);
        let mut presenter = NullPresenter;
        spawn_one(&mut field, &difficulty);
        field.next_spawn_at = 0.0;
        field.maybe_spawn(0.0, &difficulty, false, &mut presenter);
        assert_eq!(field.len(), 2);

        // Both pushing at the same pinned position: exact tie, so the
        // earlier spawn takes the tap.
        for _ in 0..40 {
            field.update(0.1, 50.0, &mut presenter);
        }
        assert!(field.any_pushing());
        let tapped = field.tap_nearest(50.0, &mut presenter);
        assert_eq!(tapped, Some(1));
        let taps: Vec<u32> = field.iter().map(|p| p.taps).collect();
        assert_eq!(taps, vec![1, 0]);
    }

    #[test]
    fn test_tap_without_pushing_problem_is_inert() {
        let difficulty = adult_difficulty();
        let mut field = ProblemField::new(7);
        spawn_one(&mut field, &difficulty);

        // Still approaching, not pushing.
        assert_eq!(field.tap_nearest(50.0, &mut NullPresenter), None);
        assert_eq!(field.iter().next().unwrap().taps, 0);
    }

    #[test]
    fn test_spawn_schedule_within_window() {
        let difficulty = adult_difficulty(); // spawn window 3..6s
        let mut field = ProblemField::new(42);
        for _ in 0..50 {
            field.schedule_next(100.0, &difficulty, false);
            let delay = field.next_spawn_at - 100.0;
            assert!((3.0..6.0).contains(&(delay as f32)), "delay {delay}");
        }
    }

    #[test]
    fn test_schedule_is_deterministic_per_seed() {
        let difficulty = adult_difficulty();
        let mut a = ProblemField::new(9);
        let mut b = ProblemField::new(9);
        for _ in 0..10 {
            a.schedule_next(0.0, &difficulty, false);
            b.schedule_next(0.0, &difficulty, false);
            assert_eq!(a.next_spawn_at, b.next_spawn_at);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let difficulty = adult_difficulty();
        let mut field = ProblemField::new(7);
        spawn_one(&mut field, &difficulty);
        spawn_one(&mut field, &difficulty);

        field.reset(0.0, &difficulty, false, &mut NullPresenter);
        assert!(field.is_empty());

        // Counter restarts, so ids begin at 1 again.
        spawn_one(&mut field, &difficulty);
        assert_eq!(field.iter().next().unwrap().id, 1);
    }
}
