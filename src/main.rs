//! Crown Drift headless demo
//!
//! Runs a scripted session against a console presenter at a simulated
//! 60 Hz: nudges forward whenever the marker slips toward the Death pole
//! and taps through problems as they latch on. Prints the run summary as
//! JSON when the session ends.
//!
//! Usage: crown-drift [name] [age] [seed]

use std::env;

use crown_drift::sim::difficulty::ProblemStyle;
use crown_drift::sim::zones::{Zone, ZoneMeta};
use crown_drift::{Narrative, Presenter, SessionController, StartParams, Tuning};

/// Logs presentation events instead of drawing them
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn render_problem(&mut self, id: u32, x: f32, style: &ProblemStyle, pushing: bool) {
        if pushing {
            log::debug!("problem #{id} latched at x={x:.1} ({})", style.border);
        }
    }

    fn remove_problem_visual(&mut self, id: u32) {
        log::debug!("problem #{id} cleared");
    }

    fn render_age(&mut self, years: u32) {
        log::info!("age {years}");
    }

    fn zone_changed(&mut self, _zone: Zone, meta: &ZoneMeta) {
        log::info!("{}", meta.msg);
    }

    fn show_result(&mut self, message: &str, _narrative: Narrative) {
        println!("{message}");
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let name = args.first().map(String::as_str).unwrap_or("Player");
    let age = args
        .get(1)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::from(StartParams::DEFAULT_AGE));
    let seed = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);

    let mut controller = SessionController::new(Tuning::default(), ConsolePresenter, seed);
    controller.start(StartParams::sanitize(name, age), 0.0);

    // 60 Hz frames; push toward the King whenever we slip below center.
    let mut frame = 0u64;
    while controller.is_running() {
        frame += 1;
        controller.frame(frame as f64 / 60.0);
        if frame % 6 == 0 && controller.position() < 50.0 {
            controller.on_forward_input();
        }
    }

    let summary = controller.death_summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize run summary: {err}"),
    }
}
