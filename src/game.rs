//! Game session
//!
//! Owns the simulation state plus everything around it that outlives a run:
//! settings, the stored high score and the fixed-timestep accumulator.
//! Frontends translate raw events into [`Command`]s and feed elapsed time to
//! [`Game::advance`].

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::platform::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Largest frame delta fed to the accumulator (tab switches, debugger stops)
const MAX_FRAME_DT: f32 = 0.1;

/// Player intents, already decoded from keys, clicks and buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Jump,
    TogglePause,
    Resume,
    ToggleMute,
    Restart,
    ToggleDemo,
}

pub struct Game<S: KeyValueStore> {
    state: GameState,
    store: S,
    settings: Settings,
    high_score: HighScore,
    /// Latched until the next tick consumes it
    input: TickInput,
    accumulator: f32,
    demo: bool,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(seed: u64, store: S, tuning: Tuning) -> Self {
        Self::with_default_settings(seed, store, tuning, Settings::default())
    }

    /// Like [`Game::new`], with `fallback` used when nothing is stored yet
    pub fn with_default_settings(seed: u64, store: S, tuning: Tuning, fallback: Settings) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store, fallback);
        let mut state = GameState::new(seed, tuning, high_score.0);
        state.countdown_step = settings.quality.countdown_step();
        Self {
            state,
            store,
            settings,
            high_score,
            input: TickInput::default(),
            accumulator: 0.0,
            demo: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and scenario tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the frontend should keep requesting animation frames
    pub fn wants_frames(&self) -> bool {
        match self.state.phase {
            GamePhase::Countdown | GamePhase::Running => true,
            GamePhase::Idle | GamePhase::GameOver => self.demo,
            GamePhase::Paused => false,
        }
    }

    /// Apply a command. Phase changes take effect immediately; jumps are
    /// latched for the next tick.
    pub fn handle(&mut self, command: Command) -> Vec<GameEvent> {
        let phase = self.state.phase;
        match command {
            Command::Jump => {
                if phase == GamePhase::Running {
                    self.input.jump = true;
                }
            }
            Command::Start if phase == GamePhase::Idle => self.apply(TickInput {
                start: true,
                ..Default::default()
            }),
            Command::TogglePause if matches!(phase, GamePhase::Running | GamePhase::Paused) => {
                self.apply(TickInput {
                    pause: true,
                    ..Default::default()
                })
            }
            Command::Resume if phase == GamePhase::Paused => self.apply(TickInput {
                resume: true,
                ..Default::default()
            }),
            Command::Restart if phase == GamePhase::GameOver => self.apply(TickInput {
                restart: true,
                ..Default::default()
            }),
            Command::ToggleMute => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                self.persist_settings();
                self.state.emit(GameEvent::SoundToggled {
                    enabled: self.settings.sound_enabled,
                });
            }
            Command::ToggleDemo => {
                self.demo = !self.demo;
                log::info!("Demo mode {}", if self.demo { "on" } else { "off" });
            }
            _ => log::debug!("Ignoring {command:?} while {phase:?}"),
        }
        self.drain_events()
    }

    /// Feed `dt_secs` of wall-clock time and run the fixed ticks it pays for
    pub fn advance(&mut self, dt_secs: f32) -> Vec<GameEvent> {
        if !self.wants_frames() {
            self.accumulator = 0.0;
            return self.drain_events();
        }

        let dt_secs = if dt_secs.is_finite() { dt_secs } else { 0.0 };
        self.accumulator += dt_secs.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                demo: self.demo,
                ..std::mem::take(&mut self.input)
            };
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if !self.wants_frames() {
                self.accumulator = 0.0;
                break;
            }
        }
        self.drain_events()
    }

    /// Run one tick with a phase-changing input, outside the accumulator
    fn apply(&mut self, input: TickInput) {
        tick(&mut self.state, &input);
        self.input = TickInput::default();
        self.accumulator = 0.0;
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.take_events();
        for event in &events {
            if let GameEvent::NewHighScore { score } = *event {
                self.record_high_score(score);
            }
        }
        events
    }

    fn record_high_score(&mut self, score: u32) {
        if !self.high_score.beaten_by(score) {
            return;
        }
        self.high_score = HighScore(score);
        if let Err(err) = self.high_score.save(&mut self.store) {
            log::warn!("Could not save high score: {err}");
        }
    }

    fn persist_settings(&mut self) {
        if let Err(err) = self.settings.save(&mut self.store) {
            log::warn!("Could not save settings: {err}");
        }
    }
}
