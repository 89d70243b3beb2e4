//! Rock Drift entry point
//!
//! Runs a headless session: a scripted pilot flies the ship for a fixed number
//! of ticks, every frame is rendered into a draw list, and a JSON summary is
//! printed at the end.
//!
//! Usage: `rock-drift [TUNING.json] [--ticks N]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use rock_drift::renderer::{DrawList, render_frame};
    use rock_drift::sim::{Arena, GameEvent, ScreenBounds, TickInput, Turn, tick};
    use rock_drift::{SimError, Tuning};

    const THRUST_EVERY: u64 = 45;

    /// Fly a scripted pilot through the asteroid field and print a JSON summary
    #[derive(Parser, Debug)]
    #[command(name = "rock-drift", version, about)]
    pub struct Args {
        /// Tuning JSON file; built-in defaults when omitted
        pub tuning: Option<PathBuf>,

        /// Number of simulation ticks to run
        #[arg(long, default_value_t = 3600)]
        pub ticks: u64,
    }

    /// Slow spin with the trigger held, plus an occasional burst of thrust
    fn pilot(tick_index: u64) -> TickInput {
        TickInput {
            rotate: Some(if (tick_index / 240) % 2 == 0 { Turn::Left } else { Turn::Right }),
            thrust: tick_index % THRUST_EVERY == 0,
            brake: tick_index % THRUST_EVERY == THRUST_EVERY / 2,
            fire: true,
            ..Default::default()
        }
    }

    pub fn run(options: Args) -> Result<(), SimError> {
        let tuning = match &options.tuning {
            Some(path) => Tuning::load_from_file(path)?,
            None => Tuning::default(),
        };
        let scale = tuning.pixels_per_unit;
        let bounds = ScreenBounds::new(-500.0, 500.0, -500.0, 500.0)?;
        let mut arena = Arena::new(bounds, tuning)?;
        log::info!("Rock Drift (headless) running {} ticks", options.ticks);

        let mut frame = DrawList::default();
        let mut best_score = 0;
        let mut ships_lost = 0u32;
        let mut asteroids_destroyed = 0u32;

        for i in 0..options.ticks {
            for event in tick(&mut arena, &pilot(i)) {
                match event {
                    GameEvent::AsteroidDestroyed { .. } => asteroids_destroyed += 1,
                    GameEvent::ShipDestroyed { .. } => ships_lost += 1,
                    _ => {}
                }
            }
            best_score = best_score.max(arena.score);

            if arena.ship.is_none() {
                arena.reset();
            } else if arena.field_cleared() {
                arena.advance_level();
            }

            frame.clear();
            render_frame(&arena, &mut frame, scale);
        }

        let summary = serde_json::json!({
            "best_score": best_score,
            "ships_lost": ships_lost,
            "asteroids_destroyed": asteroids_destroyed,
            "draw_calls_last_frame": frame.len(),
            "final": arena.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), rock_drift::SimError> {
    use clap::Parser;

    let args = headless::Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run(args)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; frontends embed the library directly
}
