//! Session controller
//!
//! Owns the run: the session state, the live difficulty handle, the lifespan
//! model, the problem field, and the presenter. Drives two clocks from one
//! host-supplied timestamp: the per-frame tick and a fixed one-second year
//! cadence. Both are serialized through `frame`, so no two callbacks ever
//! overlap. Stopping cancels both clocks and is idempotent.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::consts::YEAR_INTERVAL_SECS;
use crate::platform::{Narrative, Presenter, StartParams};
use crate::sim::collision::resolve_milestones;
use crate::sim::difficulty::{DifficultyState, Phase};
use crate::sim::forces;
use crate::sim::lifespan::{DominantZone, LifeSpan, ZoneTimes};
use crate::sim::problems::ProblemField;
use crate::sim::state::{DeathSummary, Session};
use crate::sim::tick::tick;
use crate::sim::zones::{Zone, zone_for_pos};
use crate::tuning::Tuning;

pub struct SessionController<P: Presenter> {
    tuning: Tuning,
    presenter: P,
    session: Session,
    difficulty: DifficultyState,
    lifespan: LifeSpan,
    problems: ProblemField,
    running: bool,
    last_frame_ts: f64,
    next_year_at: Option<f64>,
    last_zone: Option<Zone>,
    result_shown: bool,
}

impl<P: Presenter> SessionController<P> {
    pub fn new(tuning: Tuning, presenter: P, seed: u64) -> Self {
        let difficulty = DifficultyState::new(&tuning, StartParams::DEFAULT_AGE);
        let lifespan = LifeSpan::new(tuning.zones.clone(), tuning.lifespan.clone());
        Self {
            tuning,
            presenter,
            session: Session::new(StartParams::DEFAULT_NAME, StartParams::DEFAULT_AGE),
            difficulty,
            lifespan,
            problems: ProblemField::new(seed),
            running: false,
            last_frame_ts: 0.0,
            next_year_at: None,
            last_zone: None,
            result_shown: false,
        }
    }

    /// Begin a fresh run: wholesale reset, difficulty from the start age,
    /// year timer armed, frame clock started.
    pub fn start(&mut self, params: StartParams, now: f64) {
        self.reset(&params.name, now);
        self.session.age_years = params.age;
        self.difficulty.apply_for_age(params.age);

        self.running = true;
        self.last_frame_ts = now;
        self.next_year_at = Some(now + YEAR_INTERVAL_SECS);

        log::info!(
            "run started: {} at age {} ({} phase)",
            self.session.player_name,
            params.age,
            self.difficulty.phase().name()
        );
        self.presenter.render_age(params.age);
        self.presenter.render_position(self.session.position);
        self.notify_zone();
    }

    /// Restore fresh-run state: position 50, flags cleared, problems and
    /// accumulators emptied. Idempotent; does not start the clocks.
    pub fn reset(&mut self, name: &str, now: f64) {
        self.session.reset(name);
        self.lifespan.reset();
        self.problems
            .reset(now, &self.difficulty, false, &mut self.presenter);
        self.last_zone = None;
        self.result_shown = false;
    }

    /// Cancel the frame loop and the year timer. Safe to call when already
    /// stopped.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("run stopped at age {}", self.session.age_years);
        }
        self.running = false;
        self.next_year_at = None;
    }

    /// One display-synchronized frame. Fires any due year ticks first (they
    /// keep their own one-second cadence and catch up after stalls), then
    /// advances the simulation by the elapsed time.
    pub fn frame(&mut self, now: f64) {
        if !self.running {
            return;
        }

        while let Some(at) = self.next_year_at {
            if now < at || self.session.dead {
                break;
            }
            self.year_tick();
            self.next_year_at = Some(at + YEAR_INTERVAL_SECS);
        }

        let dt = (now - self.last_frame_ts).max(0.0) as f32;
        self.last_frame_ts = now;

        let outcome = tick(
            &mut self.session,
            &self.difficulty,
            &mut self.lifespan,
            &mut self.problems,
            &self.tuning,
            &mut self.presenter,
            now,
            dt,
        );

        if outcome.newly_crowned {
            log::info!("{} reached the king", self.session.player_name);
        }
        self.notify_zone();
        if outcome.died {
            self.finish();
        }
    }

    /// One simulated year: age up and refresh the difficulty snapshot. The
    /// presenter's age HUD callback is isolated so a presentation bug can
    /// never stall aging.
    fn year_tick(&mut self) {
        self.session.age_years += 1;
        self.difficulty.apply_for_age(self.session.age_years);

        let years = self.session.age_years;
        let hud = catch_unwind(AssertUnwindSafe(|| self.presenter.render_age(years)));
        if hud.is_err() {
            log::warn!("presenter panicked in age HUD update; aging continues");
        }
    }

    /// Edge-triggered forward input: taps the nearest pushing problem and
    /// nudges the player toward the King.
    pub fn on_forward_input(&mut self) {
        if !self.running || self.session.dead {
            return;
        }
        self.problems
            .tap_nearest(self.session.position, &mut self.presenter);

        let nudged = forces::forward_nudge(
            self.session.position,
            self.difficulty.snapshot().nudge_forward,
            self.difficulty.crown_nudge_bonus(self.session.reached_king),
            &self.tuning,
        );
        self.session.set_position(nudged);
        // Pushing problems ride along; re-pin to the new position before the
        // pass-prevention clamp so the nudge keeps its full gain. A zero-dt
        // update also locks any problem the nudge just moved into.
        self.problems
            .update(0.0, self.session.position, &mut self.presenter);
        if let Some(limit) = self.problems.block_at() {
            self.session.set_position(self.session.position.min(limit));
        }

        let outcome = resolve_milestones(&mut self.session);
        if outcome.newly_crowned {
            log::info!("{} reached the king", self.session.player_name);
        }
        self.presenter.render_position(self.session.position);
        self.notify_zone();
        if outcome.died {
            self.finish();
        }
    }

    /// Edge-triggered backward input
    pub fn on_backward_input(&mut self) {
        if !self.running || self.session.dead {
            return;
        }
        let nudged = forces::backward_nudge(
            self.session.position,
            self.difficulty.snapshot().nudge_back,
        );
        self.session.set_position(nudged);
        self.problems
            .update(0.0, self.session.position, &mut self.presenter);

        let outcome = resolve_milestones(&mut self.session);
        self.presenter.render_position(self.session.position);
        self.notify_zone();
        if outcome.died {
            self.finish();
        }
    }

    /// Terminal handoff: stop the clocks and show the result exactly once.
    fn finish(&mut self) {
        if self.result_shown {
            return;
        }
        self.result_shown = true;
        self.stop();

        let summary = self.death_summary();
        let message = format!(
            "You died at age {} and you {} reach the king.",
            summary.age_years,
            if summary.reached_king {
                "did"
            } else {
                "did not"
            }
        );
        let narrative = if summary.reached_king {
            Narrative::Crowned
        } else {
            Narrative::Zone(summary.dominant.zone)
        };
        log::info!(
            "{} (dominant zone: {}, {:.0}% of the run)",
            message,
            summary.dominant.zone.name(),
            summary.dominant.share * 100.0
        );
        self.presenter.show_result(&message, narrative);
    }

    fn notify_zone(&mut self) {
        let zone = zone_for_pos(self.session.position, &self.tuning.zones);
        if self.last_zone != Some(zone) {
            self.last_zone = Some(zone);
            log::debug!("zone -> {}", zone.name());
            self.presenter.zone_changed(zone, zone.meta());
        }
    }

    // --- query accessors for the surrounding application ---

    pub fn position(&self) -> f32 {
        self.session.position
    }

    pub fn age_years(&self) -> u32 {
        self.session.age_years
    }

    pub fn reached_king(&self) -> bool {
        self.session.reached_king
    }

    pub fn is_dead(&self) -> bool {
        self.session.dead
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn player_name(&self) -> &str {
        &self.session.player_name
    }

    pub fn phase(&self) -> Phase {
        self.difficulty.phase()
    }

    pub fn dominant_zone(&self) -> DominantZone {
        self.lifespan.dominant_zone()
    }

    pub fn zone_times(&self) -> ZoneTimes {
        *self.lifespan.times()
    }

    pub fn death_summary(&self) -> DeathSummary {
        DeathSummary {
            player_name: self.session.player_name.clone(),
            age_years: self.session.age_years,
            reached_king: self.session.reached_king,
            dominant: self.lifespan.dominant_zone(),
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
