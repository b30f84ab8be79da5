//! Galactic Wrench entry point
//!
//! The browser build is a library (`platform::web::WebSession`) driven by the
//! page. Natively this runs a headless mission with a simple autopilot and
//! logs the result.
//!
//! Usage: `galactic-wrench [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use galactic_wrench::platform::JoystickGeometry;
    use galactic_wrench::sim::TickOutcome;
    use galactic_wrench::{InputEvent, Session, Tuning, format_score};
    use glam::Vec2;

    /// 60 Hz refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five minutes of play
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub fn run(seed: u64, tuning: Tuning) {
        let geometry = JoystickGeometry::default();
        let mut session = Session::seeded(tuning, geometry, seed);
        if let Err(e) = session.start() {
            log::error!("{e}");
            return;
        }

        let mut now = 0.0;
        session.push(now, InputEvent::FireDown);

        let mut frames = 0;
        while session.is_clock_running() && frames < MAX_FRAMES {
            // Chase the enemy closest to the bottom of the field
            let snapshot = session.snapshot();
            let target = snapshot
                .enemies
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos.x)
                .unwrap_or(50.0);
            let dx = (target - snapshot.player.x).clamp(-1.0, 1.0) * geometry.max_distance;
            session.push(now, InputEvent::PointerDown(Some(geometry.center + Vec2::new(dx, 0.0))));

            if session.frame(now) == TickOutcome::Skipped {
                log::warn!("Frame {} skipped", frames);
            }
            now += FRAME_MS;
            frames += 1;
        }

        let snapshot = session.snapshot();
        log::info!(
            "Run finished after {} frames: phase {:?}, score {}, health {}",
            frames,
            snapshot.phase,
            format_score(snapshot.score),
            snapshot.health
        );
    }

    /// Tuning from a JSON file, or defaults if it can't be read
    pub fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Failed to read {}: {}, using default tuning", path, e);
                Tuning::default()
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Galactic Wrench (native) starting...");
    log::info!("The browser build is a library - serve it with the page's renderer");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed {:?}: {}, using 0", args[0], e);
            0
        }
        None => 0,
    };
    let tuning = headless::load_tuning(args.get(1).map(String::as_str));

    log::info!("Headless run with seed: {}", seed);
    headless::run(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebSession, this is just to satisfy the compiler
}
