//! Lifespan and time-in-zone statistics
//!
//! Tracks seconds spent in each zone and computes a capped life expectancy.
//! The expected death age is recomputed continuously from accumulated
//! history, so the threshold drifts as the zone mix changes: death depends on
//! the full path of position-over-time, not on elapsed time alone.

use serde::Serialize;

use super::zones::{Zone, zone_for_pos};
use crate::tuning::{LifespanTuning, ZoneThresholds};

/// Seconds accumulated per zone, monotonically increasing while running
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ZoneTimes {
    pub danger: f32,
    pub effort: f32,
    pub stable: f32,
    pub climb: f32,
    pub throne: f32,
}

impl ZoneTimes {
    pub fn get(&self, zone: Zone) -> f32 {
        match zone {
            Zone::Danger => self.danger,
            Zone::Effort => self.effort,
            Zone::Stable => self.stable,
            Zone::Climb => self.climb,
            Zone::Throne => self.throne,
        }
    }

    fn add(&mut self, zone: Zone, dt: f32) {
        match zone {
            Zone::Danger => self.danger += dt,
            Zone::Effort => self.effort += dt,
            Zone::Stable => self.stable += dt,
            Zone::Climb => self.climb += dt,
            Zone::Throne => self.throne += dt,
        }
    }

    pub fn total(&self) -> f32 {
        self.danger + self.effort + self.stable + self.climb + self.throne
    }

    /// Time spent in the good zones (stable + climb + throne)
    pub fn good(&self) -> f32 {
        self.stable + self.climb + self.throne
    }
}

/// Dominant-zone summary for end-of-run reporting
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DominantZone {
    pub zone: Zone,
    /// Share of total accumulated time, 0 when nothing has accumulated
    pub share: f32,
    pub times: ZoneTimes,
    pub total: f32,
}

/// Mortality model over accumulated zone history
#[derive(Debug, Clone)]
pub struct LifeSpan {
    times: ZoneTimes,
    zones: ZoneThresholds,
    cfg: LifespanTuning,
}

impl LifeSpan {
    pub fn new(zones: ZoneThresholds, cfg: LifespanTuning) -> Self {
        Self {
            times: ZoneTimes::default(),
            zones,
            cfg,
        }
    }

    /// Zero all accumulators for a fresh run
    pub fn reset(&mut self) {
        self.times = ZoneTimes::default();
    }

    /// Classify the position and accumulate. Negative dt is treated as zero.
    pub fn on_tick(&mut self, dt: f32, pos: f32) {
        let dt = dt.max(0.0);
        self.times.add(zone_for_pos(pos, &self.zones), dt);
    }

    pub fn times(&self) -> &ZoneTimes {
        &self.times
    }

    /// Lifestyle adjustment in years: linear between the penalty bound and
    /// the bonus bound by the fraction of time spent in good zones. With no
    /// accumulated history the ratio is neutral and the adjustment is zero.
    pub fn balance_delta_years(&self) -> f32 {
        let total = self.times.total();
        if total <= 0.0 {
            return 0.0;
        }
        let good_ratio = self.times.good() / total;
        self.cfg.bad_max_penalty + (self.cfg.good_max_bonus - self.cfg.bad_max_penalty) * good_ratio
    }

    /// Base expectancy + balance adjustment + flat king bonus, clamped to
    /// [min_life, max_life]
    pub fn expected_death_age(&self, reached_king: bool) -> f32 {
        let king_bonus = if reached_king {
            self.cfg.king_bonus_years
        } else {
            0.0
        };
        let exp = self.cfg.base_life + self.balance_delta_years() + king_bonus;
        exp.clamp(self.cfg.min_life, self.cfg.max_life)
    }

    pub fn should_die(&self, age_years: u32, reached_king: bool) -> bool {
        age_years as f32 >= self.expected_death_age(reached_king)
    }

    /// The zone with the largest accumulated time. Exact ties resolve to the
    /// earliest zone in the fixed danger->effort->stable->climb->throne order.
    pub fn dominant_zone(&self) -> DominantZone {
        let mut best = Zone::Danger;
        let mut best_val = f32::NEG_INFINITY;
        for zone in Zone::ALL {
            let v = self.times.get(zone);
            if v > best_val {
                best = zone;
                best_val = v;
            }
        }
        let total = self.times.total();
        let share = if total > 0.0 { best_val / total } else { 0.0 };
        DominantZone {
            zone: best,
            share,
            times: self.times,
            total,
        }
    }
}
