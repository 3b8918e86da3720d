//! Wordwing entry point
//!
//! Headless native driver: loads settings, flies the run on autopilot (or
//! idles without it), and prints a JSON summary once the run ends.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use wordwing::consts::SIM_DT;
use wordwing::flavor::{CannedFlavor, CredentialGate};
use wordwing::renderer::build_scene;
use wordwing::sim::{GameEvent, GameState, RunPhase, TickInput};
use wordwing::{FlavorOutcome, FlavorRequest, FlavorStatus, FrameLoop, Settings};

const DEFAULT_SETTINGS_PATH: &str = "wordwing.json";
/// Credential the flavor text service needs
const FLAVOR_KEY_VAR: &str = "WORDWING_FLAVOR_KEY";
/// Frames to keep drawing while the flavor text loads
const FLAVOR_WAIT_FRAMES: u32 = 120;

/// Printed when the driver exits
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    level: usize,
    level_name: &'static str,
    phase: RunPhase,
    lives: u8,
    ticks: u64,
    words_completed: u32,
    letters: String,
    boss_health_percent: Option<f32>,
    events: Vec<GameEvent>,
    flavor_text: Option<String>,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    frames: FrameLoop,
    input: TickInput,
    events: Vec<GameEvent>,
    flavor: Option<FlavorRequest>,
}

impl Game {
    fn new(settings: &Settings, seed: u64) -> Self {
        let state = GameState::new_at_level(seed, settings.sim_config(), settings.start_level);
        Self {
            state,
            frames: FrameLoop::new(),
            input: TickInput {
                autopilot: settings.autopilot,
                ..Default::default()
            },
            events: Vec::new(),
            flavor: None,
        }
    }

    /// One display frame
    fn frame(&mut self, now: f64) {
        self.frames.advance(&mut self.state, &mut self.input, now);

        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
            let outcome = match event {
                GameEvent::Victory => Some(FlavorOutcome::Victory),
                GameEvent::GameOver { .. } => Some(FlavorOutcome::GameOver),
                _ => None,
            };
            if let Some(outcome) = outcome {
                self.request_flavor(outcome);
            }
            self.events.push(event);
        }

        let vertices = build_scene(&self.state);
        log::trace!("Frame at {:.3}s: {} vertices", now, vertices.len());
    }

    fn request_flavor(&mut self, outcome: FlavorOutcome) {
        let source = Arc::new(CredentialGate::new(FLAVOR_KEY_VAR, CannedFlavor));
        let progress = self.state.level_index as u32;
        self.flavor = Some(FlavorRequest::spawn(source, outcome, progress));
    }

    fn summary(self, seed: u64, flavor_text: Option<String>) -> RunSummary {
        let state = &self.state;
        let letters = state
            .config
            .target_word
            .iter()
            .zip(state.mask.slots().iter())
            .map(|(&c, &filled)| if filled { c } else { '_' })
            .collect();
        RunSummary {
            seed,
            level: state.level_index,
            level_name: state.level().theme.name,
            phase: state.phase,
            lives: state.lives,
            ticks: state.time_ticks,
            words_completed: state.words_completed,
            letters,
            boss_health_percent: state.boss.as_ref().map(|_| state.boss_health_percent()),
            events: self.events,
            flavor_text,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Wordwing (native) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load_or_default(&path);
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Seed {}", seed);

    let mut game = Game::new(&settings, seed);

    // Simulated display clock, a hair slower than the tick rate
    let frame_secs = f64::from(SIM_DT) * 1.0001;
    let mut frame = 0u32;
    while frame < settings.demo_frames && !game.state.phase.is_terminal() {
        game.frame(f64::from(frame) * frame_secs);
        frame += 1;
    }

    if !game.state.phase.is_terminal() {
        log::warn!("Run still going after {} frames", frame);
    }
    game.frames.teardown();

    let mut flavor_text = None;
    if let Some(mut request) = game.flavor.take() {
        for _ in 0..FLAVOR_WAIT_FRAMES {
            if let FlavorStatus::Ready(text) = request.poll() {
                flavor_text = Some(text);
                break;
            }
            std::thread::sleep(Duration::from_secs_f32(SIM_DT));
        }
        if flavor_text.is_none() {
            flavor_text = Some(request.wait());
        }
    }

    let summary = game.summary(seed, flavor_text);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}
