//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web build. Gameplay balance lives in
//! `Tuning`; these are the player's own choices.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Crowd cheers and boos (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Standby and victory loops (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Game ===
    /// Start under the lights
    pub night_time: bool,
    /// Simulation speed multiplier
    pub time_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            mute_on_blur: true,

            night_time: false,
            time_scale: 1.0,
        }
    }
}

impl Settings {
    /// Volume for one-off effects
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Volume for looping music
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Time scale the simulation can use (never runs backwards)
    pub fn effective_time_scale(&self) -> f32 {
        self.time_scale.max(0.0)
    }

    /// Flip the stored time of day, returning the new value
    pub fn toggle_night(&mut self) -> bool {
        self.night_time = !self.night_time;
        self.night_time
    }

    /// Parse what `to_storage_json` wrote. Unreadable entries are ignored.
    pub fn from_storage_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                None
            }
        }
    }

    pub fn to_storage_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "ball_dont_lie_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_storage_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Some(json) = self.to_storage_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            master_volume: 0.5,
            night_time: true,
            time_scale: 0.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_toggled_night_survives_storage() {
        let mut settings = Settings::default();
        assert!(settings.toggle_night());
        let stored = settings.to_storage_json().unwrap();
        let loaded = Settings::from_storage_json(&stored).unwrap();
        assert!(loaded.night_time);
        assert_eq!(loaded, settings);

        settings.toggle_night();
        let loaded = Settings::from_storage_json(&settings.to_storage_json().unwrap()).unwrap();
        assert!(!loaded.night_time);
    }

    #[test]
    fn test_corrupt_storage_is_ignored() {
        assert_eq!(Settings::from_storage_json("not json"), None);
        assert_eq!(Settings::from_storage_json(r#"{ "time_scale": "fast" }"#), None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "night_time": true }"#).unwrap();
        assert!(settings.night_time);
        assert_eq!(settings.time_scale, 1.0);
        assert!(settings.mute_on_blur);
    }

    #[test]
    fn test_effective_values() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            time_scale: -2.0,
            ..Default::default()
        };
        assert!((settings.effective_sfx_volume() - 0.25).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.35).abs() < 1e-6);
        assert_eq!(settings.effective_time_scale(), 0.0);
    }
}
