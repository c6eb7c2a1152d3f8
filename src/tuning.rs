//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be re-tuned from JSON
//! without touching the simulation. Defaults come from [`crate::consts`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error type for tuning overrides
#[derive(Debug)]
pub enum TuningError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    ValidationError(String),
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::IoError(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::ParseError(e)
    }
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::IoError(e) => write!(f, "IO error: {}", e),
            TuningError::ParseError(e) => write!(f, "Parse error: {}", e),
            TuningError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::IoError(e) => Some(e),
            TuningError::ParseError(e) => Some(e),
            TuningError::ValidationError(_) => None,
        }
    }
}

/// Balance parameters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Frame ===
    pub max_frame_dt: f32,

    // === Player ===
    pub lane_width: f32,
    pub lane_smoothing: f32,
    pub ground_height: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub player_half_extents: Vec3,

    // === Session ===
    pub start_speed: f32,
    pub acceleration: f32,
    pub score_per_unit: f32,
    pub collectible_bonus: f32,

    // === Track ===
    pub tile_length: f32,
    pub tile_count: usize,
    pub recycle_z: f32,
    pub safe_start_tiles: usize,

    // === Spawner ===
    pub obstacle_chance: f32,
    pub collectible_chance: f32,
    pub obstacle_min_length: f32,
    pub obstacle_max_length: f32,
    pub spawn_spread: f32,

    // === Hitboxes ===
    pub obstacle_half_width: f32,
    pub obstacle_height: f32,
    pub collectible_half_extents: Vec3,
    /// Height of the pickup center above the track
    pub collectible_height: f32,

    // === Camera ===
    pub camera_follow_rate: f32,
    pub camera_offset: Vec3,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DT,

            lane_width: LANE_WIDTH,
            lane_smoothing: LANE_SMOOTHING,
            ground_height: GROUND_HEIGHT,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            player_half_extents: Vec3::from_array(PLAYER_HALF_EXTENTS),

            start_speed: START_SPEED,
            acceleration: ACCELERATION,
            score_per_unit: SCORE_PER_UNIT,
            collectible_bonus: COLLECTIBLE_BONUS,

            tile_length: TILE_LENGTH,
            tile_count: TILE_COUNT,
            recycle_z: RECYCLE_Z,
            safe_start_tiles: SAFE_START_TILES,

            obstacle_chance: OBSTACLE_CHANCE,
            collectible_chance: COLLECTIBLE_CHANCE,
            obstacle_min_length: OBSTACLE_MIN_LENGTH,
            obstacle_max_length: OBSTACLE_MAX_LENGTH,
            spawn_spread: SPAWN_SPREAD,

            obstacle_half_width: OBSTACLE_HALF_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            collectible_half_extents: Vec3::from_array(COLLECTIBLE_HALF_EXTENTS),
            collectible_height: COLLECTIBLE_HEIGHT,

            camera_follow_rate: CAMERA_FOLLOW_RATE,
            camera_offset: Vec3::from_array(CAMERA_OFFSET),
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total length of the tile ring
    pub fn track_span(&self) -> f32 {
        self.tile_count as f32 * self.tile_length
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("max_frame_dt", self.max_frame_dt),
            ("lane_width", self.lane_width),
            ("lane_smoothing", self.lane_smoothing),
            ("jump_velocity", self.jump_velocity),
            ("gravity", self.gravity),
            ("start_speed", self.start_speed),
            ("tile_length", self.tile_length),
            ("camera_follow_rate", self.camera_follow_rate),
            ("obstacle_half_width", self.obstacle_half_width),
            ("obstacle_height", self.obstacle_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::ValidationError(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("obstacle_chance", self.obstacle_chance),
            ("collectible_chance", self.collectible_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::ValidationError(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("ground_height", self.ground_height),
            ("collectible_height", self.collectible_height),
        ] {
            if !value.is_finite() {
                return Err(TuningError::ValidationError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        for (name, extents) in [
            ("player_half_extents", self.player_half_extents),
            ("collectible_half_extents", self.collectible_half_extents),
        ] {
            if !(extents.is_finite() && extents.cmpgt(Vec3::ZERO).all()) {
                return Err(TuningError::ValidationError(format!(
                    "{} must be positive on every axis, got {}",
                    name, extents
                )));
            }
        }

        if !self.camera_offset.is_finite() {
            return Err(TuningError::ValidationError(format!(
                "camera_offset must be finite, got {}",
                self.camera_offset
            )));
        }

        if self.acceleration < 0.0 || self.score_per_unit < 0.0 || self.collectible_bonus < 0.0 {
            return Err(TuningError::ValidationError(
                "acceleration and score rewards cannot be negative".to_string(),
            ));
        }

        if self.obstacle_min_length <= 0.0 || self.obstacle_min_length >= self.obstacle_max_length {
            return Err(TuningError::ValidationError(format!(
                "obstacle length range [{}, {}) is empty",
                self.obstacle_min_length, self.obstacle_max_length
            )));
        }

        if self.tile_count < 2 {
            return Err(TuningError::ValidationError(format!(
                "tile_count must be at least 2, got {}",
                self.tile_count
            )));
        }

        // A recycled tile has to land back in front of the player
        let span = self.track_span();
        if !(self.recycle_z.is_finite() && self.recycle_z > 0.0 && self.recycle_z < span) {
            return Err(TuningError::ValidationError(format!(
                "recycle_z must be within (0, {}), got {}",
                span, self.recycle_z
            )));
        }

        if !(0.0..=0.5).contains(&self.spawn_spread) {
            return Err(TuningError::ValidationError(format!(
                "spawn_spread must keep entities on their tile, got {}",
                self.spawn_spread
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.start_speed, 12.0);
        assert_eq!(tuning.track_span(), 400.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "start_speed": 20.0, "tile_count": 6 }"#).unwrap();
        assert_eq!(tuning.start_speed, 20.0);
        assert_eq!(tuning.tile_count, 6);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.lane_width, LANE_WIDTH);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::ParseError(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "obstacle_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ValidationError(_)));

        let err = Tuning::from_json(r#"{ "obstacle_min_length": 12.0, "obstacle_max_length": 4.0 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("obstacle length range"));

        let err = Tuning::from_json(r#"{ "tile_length": 0.0 }"#).unwrap_err();
        assert!(err.to_string().contains("tile_length"));

        let err = Tuning::from_json(r#"{ "obstacle_height": -1.0 }"#).unwrap_err();
        assert!(err.to_string().contains("obstacle_height"));
    }

    #[test]
    fn test_recycle_z_must_sit_inside_the_ring() {
        for json in [
            r#"{ "recycle_z": -500.0 }"#,
            r#"{ "recycle_z": 0.0 }"#,
            r#"{ "recycle_z": 400.0 }"#,
            r#"{ "recycle_z": 100.0, "tile_count": 2 }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(err.to_string().contains("recycle_z"), "{} -> {}", json, err);
        }
        assert!(Tuning::from_json(r#"{ "recycle_z": 79.0, "tile_count": 2 }"#).is_ok());
    }

    #[test]
    fn test_non_finite_vectors_rejected() {
        // JSON has no NaN literal, so poke the fields directly
        let mut tuning = Tuning::default();
        tuning.ground_height = f32::NAN;
        assert!(tuning.validate().unwrap_err().to_string().contains("ground_height"));

        let mut tuning = Tuning::default();
        tuning.player_half_extents = Vec3::new(0.6, 0.0, 0.6);
        assert!(
            tuning
                .validate()
                .unwrap_err()
                .to_string()
                .contains("player_half_extents")
        );

        let mut tuning = Tuning::default();
        tuning.player_half_extents.x = f32::INFINITY;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.collectible_half_extents.z = -0.1;
        assert!(
            tuning
                .validate()
                .unwrap_err()
                .to_string()
                .contains("collectible_half_extents")
        );

        let mut tuning = Tuning::default();
        tuning.camera_offset.y = f32::NAN;
        assert!(tuning.validate().unwrap_err().to_string().contains("camera_offset"));
    }

    #[test]
    fn test_from_file() {
        let err = Tuning::from_file("/nonexistent/lane-dash-tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::IoError(_)));

        let path = std::env::temp_dir().join(format!("lane-dash-tuning-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "obstacle_half_width": 0.8 }"#).unwrap();
        let tuning = Tuning::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(tuning.obstacle_half_width, 0.8);
        assert_eq!(tuning.obstacle_height, OBSTACLE_HEIGHT);
    }
}
