//! Per-frame simulation step
//!
//! One tick per rendered frame: run the movement pipeline, then spawn and
//! advance problems against the player's new position (pushing problems
//! re-pin there, so the pass-prevention clamp works on fresh pins and never
//! eats legitimate movement), accumulate zone time, then resolve milestones.
//! Milestones run after the combined adjustment because a force can newly
//! pull the player into a pole.

use super::collision::{MilestoneOutcome, resolve_milestones};
use super::difficulty::DifficultyState;
use super::forces::{ForceCtx, run_pipeline};
use super::lifespan::LifeSpan;
use super::problems::ProblemField;
use super::state::Session;
use crate::consts::{CROWNED_DRIFT_DIVISOR, DRIFT_BASE};
use crate::platform::Presenter;
use crate::tuning::Tuning;

/// Advance the run by one frame of `dt` seconds. A dead session is inert:
/// no movement, no aging, no spawns.
#[allow(clippy::too_many_arguments)]
pub fn tick<P: Presenter>(
    session: &mut Session,
    difficulty: &DifficultyState,
    lifespan: &mut LifeSpan,
    problems: &mut ProblemField,
    tuning: &Tuning,
    presenter: &mut P,
    now: f64,
    dt: f32,
) -> MilestoneOutcome {
    if session.dead {
        return MilestoneOutcome::default();
    }
    let dt = dt.max(0.0);

    let base = if session.reached_king {
        DRIFT_BASE / CROWNED_DRIFT_DIVISOR
    } else {
        DRIFT_BASE
    };
    let drift_per_sec = base * difficulty.drift_mult();
    let drag_per_sec = if problems.any_pushing() {
        drift_per_sec * difficulty.drag_mult(session.reached_king)
    } else {
        0.0
    };

    let ctx = ForceCtx {
        tuning,
        drift_per_sec,
        drag_per_sec,
        center_k: difficulty.center_strength(tuning.center.k, session.reached_king),
    };
    let new_pos = run_pipeline(session.position, dt, &ctx);
    session.set_position(new_pos);

    problems.maybe_spawn(now, difficulty, session.reached_king, presenter);
    problems.update(dt, session.position, presenter);
    // Pass prevention runs against the freshly pinned positions.
    if let Some(limit) = problems.block_at() {
        session.set_position(session.position.min(limit));
    }

    lifespan.on_tick(dt, session.position);

    let mut outcome = resolve_milestones(session);
    if !session.dead && lifespan.should_die(session.age_years, session.reached_king) {
        session.dead = true;
        outcome.died = true;
    }

    presenter.render_position(session.position);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NullPresenter;

    struct World {
        session: Session,
        difficulty: DifficultyState,
        lifespan: LifeSpan,
        problems: ProblemField,
        tuning: Tuning,
    }

    fn world(age: u32) -> World {
        let tuning = Tuning::default();
        World {
            session: Session::new("Ada", age),
            difficulty: DifficultyState::new(&tuning, age),
            lifespan: LifeSpan::new(tuning.zones.clone(), tuning.lifespan.clone()),
            problems: ProblemField::new(1),
            tuning,
        }
    }

    fn step(w: &mut World, now: f64, dt: f32) -> MilestoneOutcome {
        tick(
            &mut w.session,
            &w.difficulty,
            &mut w.lifespan,
            &mut w.problems,
            &w.tuning,
            &mut NullPresenter,
            now,
            dt,
        )
    }

    #[test]
    fn test_fresh_session_starts_centered() {
        // Scenario A: start at age 10, zero ticks.
        let w = world(10);
        assert_eq!(w.session.position, 50.0);
        assert_eq!(w.difficulty.phase(), crate::sim::Phase::Child);
    }

    #[test]
    fn test_dead_session_is_inert() {
        let mut w = world(30);
        w.session.dead = true;
        w.session.position = 40.0;
        w.problems.next_spawn_at = 0.0;

        let outcome = step(&mut w, 10.0, 0.5);
        assert_eq!(outcome, MilestoneOutcome::default());
        assert_eq!(w.session.position, 40.0);
        assert!(w.problems.is_empty(), "dead sessions must not spawn");
        assert_eq!(w.lifespan.times().total(), 0.0);
    }

    #[test]
    fn test_negative_dt_treated_as_zero() {
        let mut w = world(30);
        step(&mut w, 0.0, -1.0);
        assert_eq!(w.session.position, 50.0);
        assert_eq!(w.lifespan.times().total(), 0.0);
    }

    #[test]
    fn test_crowned_drift_is_halved() {
        let mut plain = world(30);
        let mut crowned = world(30);
        crowned.session.reached_king = true;
        plain.session.position = 60.0;
        crowned.session.position = 60.0;

        step(&mut plain, 0.0, 0.1);
        step(&mut crowned, 0.0, 0.1);
        // Same centering either way at 60 except the crown's center bonus;
        // the dominant difference is halved drift, so the crowned marker
        // ends further right.
        assert!(crowned.session.position > plain.session.position);
    }

    #[test]
    fn test_forces_can_newly_trigger_death() {
        let mut w = world(30);
        // Centering disabled so drift alone decides; just outside Death
        // contact, one frame pulls it in.
        w.tuning.center.enabled = false;
        w.session.position = 5.6;
        let outcome = step(&mut w, 0.0, 0.5);
        assert!(outcome.died);
        assert!(w.session.dead);
    }

    #[test]
    fn test_mortality_ends_run() {
        // Past even the best-case expectancy (base 75 + max balance 10).
        let mut w = world(90);
        let outcome = step(&mut w, 0.0, 1.0 / 60.0);
        assert!(outcome.died);
        assert!(w.session.dead);

        // Terminal: a later tick mutates nothing.
        let pos = w.session.position;
        let total = w.lifespan.times().total();
        step(&mut w, 1.0, 1.0 / 60.0);
        assert_eq!(w.session.position, pos);
        assert_eq!(w.lifespan.times().total(), total);
    }

    /// Walk a spawned problem onto a player held at `player_pos` until it
    /// locks on.
    fn lock_problem(w: &mut World, player_pos: f32) {
        w.problems.next_spawn_at = 0.0;
        w.problems
            .maybe_spawn(0.0, &w.difficulty, false, &mut NullPresenter);
        for _ in 0..60 {
            w.problems.update(0.1, player_pos, &mut NullPresenter);
            if w.problems.any_pushing() {
                return;
            }
        }
        panic!("problem never locked onto the player");
    }

    #[test]
    fn test_pushing_problem_drags_above_floor_only() {
        // Above the push floor a locked pusher costs extra ground.
        let mut pushed = world(30);
        lock_problem(&mut pushed, 60.0);
        pushed.session.position = 60.0;
        let mut free = world(30);
        free.session.position = 60.0;
        step(&mut pushed, 0.0, 0.1);
        step(&mut free, 0.0, 0.1);
        assert!(pushed.session.position < free.session.position);

        // At the push floor the drag vanishes: identical movement.
        let mut pushed = world(30);
        lock_problem(&mut pushed, 45.0);
        pushed.session.position = 45.0;
        let mut free = world(30);
        free.session.position = 45.0;
        step(&mut pushed, 0.0, 0.1);
        step(&mut free, 0.0, 0.1);
        assert_eq!(pushed.session.position, free.session.position);
    }

    #[test]
    fn test_center_recovery_carries_pusher() {
        // Below the centering equilibrium the magnet outpulls drift, and a
        // locked pusher must ride along instead of clamping the gain away.
        let mut w = world(30);
        lock_problem(&mut w, 6.0);
        w.session.position = 6.0;
        let before = w.session.position;
        step(&mut w, 0.0, 0.1);
        assert!(w.session.position > before);

        let pusher = w.problems.iter().find(|p| p.pushing).unwrap();
        let pinned = w.session.position + crate::consts::LOCK_OFFSET;
        assert!((pusher.x - pinned).abs() < 1e-4);
    }

    #[test]
    fn test_zone_time_accumulates() {
        let mut w = world(30);
        for i in 0..10 {
            step(&mut w, i as f64 * 0.1, 0.1);
        }
        assert!((w.lifespan.times().total() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_identical_runs_are_deterministic() {
        let mut a = world(30);
        let mut b = world(30);
        for i in 0..600 {
            let now = i as f64 / 60.0;
            step(&mut a, now, 1.0 / 60.0);
            step(&mut b, now, 1.0 / 60.0);
        }
        assert_eq!(a.session.position, b.session.position);
        assert_eq!(a.problems.len(), b.problems.len());
        assert_eq!(a.lifespan.times(), b.lifespan.times());
    }
}
