//! Lane Dash - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, track recycling, spawning, collisions)
//! - `tuning`: Data-driven game balance
//! - `input`: Key event mapping
//! - `hud`: Display values for the DOM overlay
//! - `highscores`: Leaderboard of finished runs

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod hud;
pub mod input;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use hud::HudSnapshot;
pub use input::Action;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Lane layout: lanes are -1, 0 and 1
    pub const MIN_LANE: i8 = -1;
    pub const MAX_LANE: i8 = 1;
    pub const LANE_COUNT: usize = 3;
    pub const LANE_WIDTH: f32 = 3.0;
    /// Exponential approach rate toward the target lane (1/s)
    pub const LANE_SMOOTHING: f32 = 10.0;

    /// Player defaults
    pub const GROUND_HEIGHT: f32 = 1.1;
    pub const JUMP_VELOCITY: f32 = 8.5;
    pub const GRAVITY: f32 = 20.0;
    pub const PLAYER_HALF_EXTENTS: [f32; 3] = [0.6, 1.0, 0.6];

    /// Run speed (units/s) and its slow ramp (units/s²)
    pub const START_SPEED: f32 = 12.0;
    pub const ACCELERATION: f32 = 0.06;
    /// Passive score per unit travelled
    pub const SCORE_PER_UNIT: f32 = 0.5;
    pub const COLLECTIBLE_BONUS: f32 = 10.0;

    /// Track tiles
    pub const TILE_LENGTH: f32 = 40.0;
    pub const TILE_COUNT: usize = 10;
    /// A tile whose center passes this forward position is behind the camera
    pub const RECYCLE_Z: f32 = 30.0;
    /// Tiles nearest the player spawn empty on a new run
    pub const SAFE_START_TILES: usize = 2;

    /// Spawner
    pub const OBSTACLE_CHANCE: f32 = 0.70;
    pub const COLLECTIBLE_CHANCE: f32 = 0.65;
    pub const OBSTACLE_MIN_LENGTH: f32 = 4.0;
    pub const OBSTACLE_MAX_LENGTH: f32 = 12.0;
    /// Entity offsets fall in [-SPREAD, SPREAD) * TILE_LENGTH
    pub const SPAWN_SPREAD: f32 = 0.3;

    /// Train body (half width, height)
    pub const OBSTACLE_HALF_WIDTH: f32 = 1.2;
    pub const OBSTACLE_HEIGHT: f32 = 3.0;
    /// Barcode pickup box
    pub const COLLECTIBLE_HALF_EXTENTS: [f32; 3] = [0.5, 0.4, 0.15];
    pub const COLLECTIBLE_HEIGHT: f32 = 1.2;

    /// Camera chase
    pub const CAMERA_FOLLOW_RATE: f32 = 5.0;
    pub const CAMERA_OFFSET: [f32; 3] = [0.0, 4.0, 9.0];
}

/// Lateral world position of a (possibly fractional) lane value
#[inline]
pub fn lane_to_x(lane: f32, lane_width: f32) -> f32 {
    lane * lane_width
}

/// Frame-rate aware approach factor, saturating at 1
#[inline]
pub fn approach_factor(dt: f32, rate: f32) -> f32 {
    (dt * rate).min(1.0)
}
