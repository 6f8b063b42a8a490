//! Data-driven game balance
//!
//! Every gameplay number lives here so it can be overridden from JSON
//! without a rebuild. Missing fields fall back to the shipped defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Match ===
    /// Pitches per game (the counter runs down to -1)
    pub pitch_count: i32,
    /// Home runs needed to win
    pub target_score: u32,

    // === Pitching ===
    /// Seconds between a cleared projectile and the next pitch
    pub pitch_cooldown: f32,
    /// Pitch speed range along +z, `[min, max)`, whole units
    pub pitch_speed_min: i32,
    pub pitch_speed_max: i32,
    /// Lateral offset steps `[min, max)`, multiplied by `pitch_lateral_step`
    pub pitch_lateral_min: i32,
    pub pitch_lateral_max: i32,
    pub pitch_lateral_step: f32,
    /// Constant lateral drift added to every pitch
    pub pitch_lateral_bias: f32,

    // === Batting ===
    /// Batter lateral range and key step
    pub batting_x_min: f32,
    pub batting_x_max: f32,
    pub batting_x_start: f32,
    pub batting_x_step: f32,
    /// Seconds a swing locks out further swings
    pub swing_duration: f32,
    /// Collider leeway added to the unit sphere radius²
    pub collider_leeway: f32,

    // === Batted ball ===
    /// Vertical boost range on contact `[min, max]`
    pub hit_lift_min: i32,
    pub hit_lift_max: i32,
    /// Cap on the depth multiplier applied to vz on contact
    pub hit_depth_gain_cap: f32,
    /// Height at which a batted ball counts as landed
    pub ground_height: f32,
    /// Velocity retained per ground bounce
    pub bounce_damping: f32,
    /// Fence test: `|x| < fence_half_width && |z| > fence_depth - |x|`
    pub fence_half_width: f32,
    pub fence_depth: f32,

    // === Clearing ===
    pub live_radius: f32,
    pub batted_radius: f32,
    pub rest_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            pitch_count: 20,
            target_score: 3,

            pitch_cooldown: 2.0,
            pitch_speed_min: 10,
            pitch_speed_max: 18,
            pitch_lateral_min: -2,
            pitch_lateral_max: 3,
            pitch_lateral_step: 0.3,
            pitch_lateral_bias: 0.4,

            batting_x_min: -6.0,
            batting_x_max: -2.0,
            batting_x_start: -4.0,
            batting_x_step: 0.5,
            swing_duration: std::f32::consts::FRAC_PI_4,
            collider_leeway: 0.7,

            hit_lift_min: 10,
            hit_lift_max: 30,
            hit_depth_gain_cap: 3.6,
            ground_height: -9.7,
            bounce_damping: 0.6,
            fence_half_width: 150.0,
            fence_depth: 160.0,

            live_radius: 40.0,
            batted_radius: 300.0,
            rest_speed: 0.5,
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// Parsed, but the values can't produce a playable game
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make ranges empty or the game unwinnable
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.pitch_count < 0 {
            return Err(TuningError::Invalid("pitch_count must be >= 0"));
        }
        if self.pitch_speed_min >= self.pitch_speed_max {
            return Err(TuningError::Invalid("pitch speed range is empty"));
        }
        if self.pitch_speed_min <= 0 {
            return Err(TuningError::Invalid("pitches must travel toward the batter"));
        }
        if self.pitch_lateral_min >= self.pitch_lateral_max {
            return Err(TuningError::Invalid("pitch lateral range is empty"));
        }
        if self.hit_lift_min > self.hit_lift_max {
            return Err(TuningError::Invalid("hit lift range is empty"));
        }
        if self.batting_x_min > self.batting_x_max
            || !(self.batting_x_min..=self.batting_x_max).contains(&self.batting_x_start)
        {
            return Err(TuningError::Invalid("batting start outside batting range"));
        }
        if self.swing_duration <= 0.0 || self.pitch_cooldown < 0.0 {
            return Err(TuningError::Invalid("durations must be positive"));
        }
        if !(0.0..1.0).contains(&self.bounce_damping) {
            return Err(TuningError::Invalid("bounce_damping must be in [0, 1)"));
        }
        if self.live_radius <= 0.0 || self.batted_radius <= self.live_radius {
            return Err(TuningError::Invalid("batted_radius must exceed live_radius"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pitch_count": 5, "target_score": 1 }"#).unwrap();
        assert_eq!(tuning.pitch_count, 5);
        assert_eq!(tuning.target_score, 1);
        assert_eq!(tuning.pitch_speed_min, 10);
        assert!((tuning.ground_height + 9.7).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_empty_speed_range() {
        let err = Tuning::from_json(r#"{ "pitch_speed_min": 18, "pitch_speed_max": 10 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_batting_start_out_of_range() {
        let err = Tuning::from_json(r#"{ "batting_x_start": 4.0 }"#).unwrap_err();
        assert!(err.to_string().contains("batting start"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
