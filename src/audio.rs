//! Audio system using HTML audio elements
//!
//! Each cue is a clip served next to the page. Loops (standby, champion)
//! follow the music volume, one-offs (cheer, boo) the effects volume.

use std::collections::HashMap;

use web_sys::HtmlAudioElement;

use crate::settings::Settings;
use crate::sim::{Cue, GameEvent};

/// Clip files for a cue. Booing layers two recordings.
fn clips(cue: Cue) -> &'static [&'static str] {
    match cue {
        Cue::Standby => &["assets/standby.mp3"],
        Cue::Champion => &["assets/champion.mp3"],
        Cue::HomeRun => &["assets/cheering.mp3"],
        Cue::Boo => &["assets/boo.mp3", "assets/Boo-sound.mp3"],
    }
}

fn is_loop(cue: Cue) -> bool {
    matches!(cue, Cue::Standby | Cue::Champion)
}

/// Audio manager for the game
pub struct AudioManager {
    elements: HashMap<Cue, Vec<HtmlAudioElement>>,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut elements = HashMap::new();
        for cue in [Cue::Standby, Cue::Champion, Cue::HomeRun, Cue::Boo] {
            let loaded: Vec<_> = clips(cue)
                .iter()
                .filter_map(|src| HtmlAudioElement::new_with_src(src).ok())
                .collect();
            if loaded.is_empty() {
                log::warn!("Failed to load audio for {:?} - cue disabled", cue);
                continue;
            }
            for element in &loaded {
                element.set_loop(is_loop(cue));
            }
            elements.insert(cue, loaded);
        }

        let mut manager = Self {
            elements,
            music_volume: 0.0,
            sfx_volume: 0.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pick up volume changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.music_volume = settings.effective_music_volume();
        self.sfx_volume = settings.effective_sfx_volume();
        self.refresh_volumes();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_volumes();
    }

    fn refresh_volumes(&self) {
        for (cue, elements) in &self.elements {
            let volume = if self.muted {
                0.0
            } else if is_loop(*cue) {
                self.music_volume
            } else {
                self.sfx_volume
            };
            for element in elements {
                element.set_volume(volume as f64);
            }
        }
    }

    pub fn play(&self, cue: Cue) {
        let Some(elements) = self.elements.get(&cue) else {
            return;
        };
        for element in elements {
            if !is_loop(cue) {
                element.set_current_time(0.0);
            }
            // Rejected until the page has seen a user gesture
            if element.play().is_err() {
                log::warn!("Playback of {:?} was blocked", cue);
            }
        }
    }

    pub fn pause(&self, cue: Cue) {
        if let Some(elements) = self.elements.get(&cue) {
            for element in elements {
                let _ = element.pause();
            }
        }
    }

    /// Act on the audio descriptors from a frame
    pub fn handle(&self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Play(cue) => self.play(cue),
                GameEvent::Pause(cue) => self.pause(cue),
                _ => {}
            }
        }
    }
}
