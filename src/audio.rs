//! Audio cues
//!
//! Three recorded sounds: a looping background track, a flap and a crash.
//! Mapping game events to playback is plain data and works on every target;
//! only [`AudioManager`] touches the browser.

use crate::sim::{GameEvent, GamePhase};

/// Sound assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Background loop while a run is in progress
    Music,
    Jump,
    Hit,
}

impl SoundCue {
    /// File name under the sounds directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::Music => "bg.mp3",
            SoundCue::Jump => "fly.mp3",
            SoundCue::Hit => "hit.mp3",
        }
    }
}

/// What the audio layer should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Play(SoundCue),
    StopMusic,
}

/// Playback for a game event. `phase` is the phase after the event.
pub fn playback_for(event: &GameEvent, phase: GamePhase) -> Vec<Playback> {
    match event {
        // Title screen keeps the loop going between runs
        GameEvent::RunStarted | GameEvent::Resumed | GameEvent::ReturnedToTitle => {
            vec![Playback::Play(SoundCue::Music)]
        }
        GameEvent::Jumped => vec![Playback::Play(SoundCue::Jump)],
        GameEvent::Crashed { .. } => vec![Playback::StopMusic, Playback::Play(SoundCue::Hit)],
        GameEvent::Paused => vec![Playback::StopMusic],
        GameEvent::SoundToggled { enabled: false } => vec![Playback::StopMusic],
        GameEvent::SoundToggled { enabled: true }
            if matches!(phase, GamePhase::Running | GamePhase::Idle) =>
        {
            vec![Playback::Play(SoundCue::Music)]
        }
        _ => Vec::new(),
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::Closure;
    use web_sys::HtmlAudioElement;

    use super::{Playback, SoundCue};

    /// Plays the game's sounds through `<audio>` elements
    pub struct AudioManager {
        music: Option<HtmlAudioElement>,
        jump: Option<HtmlAudioElement>,
        hit: Option<HtmlAudioElement>,
        enabled: bool,
        /// Catch handler for play() promises; autoplay blocks are expected
        swallow: Closure<dyn FnMut(JsValue)>,
    }

    impl AudioManager {
        pub fn new(sounds_dir: &str, enabled: bool) -> Self {
            let load = |cue: SoundCue| {
                let src = format!("{}/{}", sounds_dir.trim_end_matches('/'), cue.file_name());
                let element = HtmlAudioElement::new_with_src(&src).ok();
                if element.is_none() {
                    log::warn!("Failed to create audio element for {src}");
                }
                element
            };
            let music = load(SoundCue::Music);
            if let Some(music) = &music {
                music.set_loop(true);
            }
            Self {
                music,
                jump: load(SoundCue::Jump),
                hit: load(SoundCue::Hit),
                enabled,
                swallow: Closure::new(|_: JsValue| {}),
            }
        }

        pub fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
            if !enabled {
                self.stop_music();
            }
        }

        pub fn apply(&self, playback: &[Playback]) {
            for action in playback {
                match action {
                    Playback::Play(cue) => self.play(*cue),
                    Playback::StopMusic => self.stop_music(),
                }
            }
        }

        pub fn play(&self, cue: SoundCue) {
            if !self.enabled {
                return;
            }
            let element = match cue {
                SoundCue::Music => &self.music,
                SoundCue::Jump => &self.jump,
                SoundCue::Hit => &self.hit,
            };
            let Some(element) = element else { return };
            // Effects restart from the top so rapid flaps each sound
            if cue != SoundCue::Music {
                element.set_current_time(0.0);
            }
            if let Ok(promise) = element.play() {
                let _ = promise.catch(&self.swallow);
            }
        }

        fn stop_music(&self) {
            if let Some(music) = &self.music {
                let _ = music.pause();
            }
        }
    }
}
