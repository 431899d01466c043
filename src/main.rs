//! Brick Breaker entry point
//!
//! Native headless runner: steps the simulation at a fixed timestep with the
//! autopilot at the controls, renders every frame into a vertex batch and
//! logs overlay changes. Useful for soak tests and for checking tuning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use brick_breaker::{QualityPreset, Settings};
use brick_breaker::consts::*;
use brick_breaker::platform::{Autopilot, sample};
use brick_breaker::renderer::{ShapeBatch, draw_frame};
use brick_breaker::sim::{GameEvent, GamePhase, GameState, tick};
use brick_breaker::ui::OverlayTracker;

#[derive(Debug, Parser)]
#[command(name = "brick-breaker", about = "Run the brick breaker simulation headless")]
struct Args {
    /// RNG seed (defaults to a random one)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60 * 120)]
    frames: u32,

    /// Settings JSON file (without it, `brick-breaker.json` is used if present)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Quality preset override: low, medium or high
    #[arg(long)]
    quality: Option<String>,

    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,
}

/// Settings file picked up from the working directory
const DEFAULT_SETTINGS_FILE: &str = "brick-breaker.json";

/// Game instance holding all state
struct Game {
    state: GameState,
    pilot: Autopilot,
    overlay: OverlayTracker,
    batch: ShapeBatch,
    accumulator: f32,
    // Run statistics
    bricks_broken: u32,
    lives_lost: u32,
    levels_cleared: u32,
    peak_triangles: usize,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::with_settings(seed, settings),
            pilot: Autopilot::new(),
            overlay: OverlayTracker::new(),
            batch: ShapeBatch::new(),
            accumulator: 0.0,
            bricks_broken: 0,
            lives_lost: 0,
            levels_cleared: 0,
            peak_triangles: 0,
        }
    }

    /// Run simulation ticks for one frame of wall time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.pilot.observe(&self.state);
            let input = sample(&mut self.pilot);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.record_events();
            if let Some(overlay) = self.overlay.observe(&self.state) {
                if overlay.visible {
                    log::info!(
                        "Overlay: {} | {} [{}]",
                        overlay.title,
                        overlay.message,
                        overlay.button_label
                    );
                } else {
                    log::info!("Overlay hidden");
                }
            }
        }
    }

    fn record_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::BrickHit { destroyed: true } => self.bricks_broken += 1,
                GameEvent::LifeLost { lives_left } => {
                    self.lives_lost += 1;
                    log::debug!("Life lost, {} left", lives_left);
                }
                GameEvent::PhaseChanged {
                    to: GamePhase::Win,
                    ..
                } => self.levels_cleared += 1,
                _ => {}
            }
        }
    }

    /// Render the current frame
    fn render(&mut self) {
        draw_frame(&self.state, &mut self.batch);
        self.peak_triangles = self.peak_triangles.max(self.batch.triangle_count());
    }
}

/// Settings from `--settings` (must load) or the default file (optional),
/// with the `--quality` override applied
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::load(Path::new(DEFAULT_SETTINGS_FILE)),
    };
    if let Some(name) = &args.quality {
        settings.quality = QualityPreset::from_str(name)
            .with_context(|| format!("unknown quality preset {name:?}"))?;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(&args)?;
    log::debug!("Settings: {}", settings.to_json()?);
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Brick Breaker (headless) starting with seed {}", seed);

    let mut game = Game::new(seed, settings);
    for _ in 0..args.frames {
        game.update(SIM_DT);
        game.render();
    }

    let session = &game.state.session;
    println!(
        "seed {} | {} frames | phase {} | level {} | score {} | lives {}",
        seed,
        args.frames,
        session.phase.as_str(),
        session.level,
        session.score,
        session.lives
    );
    println!(
        "bricks broken {} | lives lost {} | levels cleared {} | peak triangles {}",
        game.bricks_broken, game.lives_lost, game.levels_cleared, game.peak_triangles
    );

    if args.dump_state {
        let json = serde_json::to_string_pretty(&game.state).context("serializing final state")?;
        println!("{}", json);
    }

    Ok(())
}
