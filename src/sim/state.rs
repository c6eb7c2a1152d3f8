//! Game state and core simulation types
//!
//! The whole world lives in one [`GameState`] owned by the loop driver.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::spawn::RandomSource;
use super::track::TrackPool;
use crate::input::Action;
use crate::tuning::Tuning;

/// The three lanes, left to right
pub const LANES: [i8; 3] = [-1, 0, 1];

/// Array index of a lane value
#[inline]
pub fn lane_index(lane: i8) -> usize {
    (lane + 1) as usize
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Updates frozen until unpaused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// A train blocking one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: i8,
    pub length: f32,
    /// Forward offset from the owning tile's center
    pub offset: f32,
}

/// A barcode pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub lane: i8,
    pub offset: f32,
}

/// Score, speed and distance for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: f32,
    pub speed: f32,
    pub distance: f32,
    pub collected: u32,
}

impl Session {
    pub fn new(start_speed: f32) -> Self {
        Self {
            score: 0.0,
            speed: start_speed,
            distance: 0.0,
            collected: 0,
        }
    }
}

/// Chase camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Lerp toward the target with a frame-rate aware factor
    pub fn follow(&mut self, target: Vec3, dt: f32, rate: f32) {
        let t = crate::approach_factor(dt, rate);
        self.position = self.position.lerp(target, t);
    }
}

/// Things that happened during a tick, drained by the shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Steered { lane: i8 },
    Jumped,
    Landed,
    Collected { id: u32, lane: i8 },
    Crashed { id: u32 },
    TileRecycled { slot: usize },
    Paused,
    Resumed,
    Restarted,
}

/// Complete world state
#[derive(Debug, Clone, Serialize)]
pub struct GameState<R: RandomSource = Pcg32> {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: Session,
    pub player: Player,
    pub track: TrackPool,
    pub camera: Camera,
    /// Pending events (newest last)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: R,
}

impl GameState<Pcg32> {
    /// Create a new run with default tuning and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new run drawing spawns from `rng`
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        let player = Player::new(tuning.ground_height);
        let camera = Camera::new(player.position(tuning.lane_width) + tuning.camera_offset);
        let track = TrackPool::new(&tuning);

        let mut state = Self {
            session: Session::new(tuning.start_speed),
            phase: GamePhase::Running,
            player,
            track,
            camera,
            events: Vec::new(),
            rng,
            tuning,
        };
        state.track.reset(&state.tuning, &mut state.rng);
        state
    }

    /// Reset session, player, camera and track to a fresh run
    pub fn restart(&mut self) {
        self.session = Session::new(self.tuning.start_speed);
        self.player = Player::new(self.tuning.ground_height);
        self.camera = Camera::new(self.player.position(self.tuning.lane_width) + self.tuning.camera_offset);
        self.track.reset(&self.tuning, &mut self.rng);
        self.phase = GamePhase::Running;
        self.events.clear();
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }

    /// Apply one input action; returns false if the current phase ignores it
    pub fn apply(&mut self, action: Action) -> bool {
        match (self.phase, action) {
            (GamePhase::GameOver, Action::Restart) => {
                self.restart();
                true
            }
            (GamePhase::GameOver, _) => false,
            (GamePhase::Running, Action::Pause) => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            (GamePhase::Paused, Action::Pause) => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                true
            }
            (GamePhase::Paused, _) => false,
            (GamePhase::Running, Action::LaneLeft) => self.steer(-1),
            (GamePhase::Running, Action::LaneRight) => self.steer(1),
            (GamePhase::Running, Action::Jump) => {
                self.player.request_jump();
                true
            }
            (GamePhase::Running, Action::Restart) => false,
        }
    }

    /// Pause if running (tab hidden, focus lost)
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.apply(Action::Pause);
        }
    }

    fn steer(&mut self, direction: i8) -> bool {
        let changed = self.player.steer(direction);
        if changed {
            self.events.push(GameEvent::Steered {
                lane: self.player.target_lane,
            });
        }
        changed
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.position(self.tuning.lane_width)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.session.speed, START_SPEED);
        assert_eq!(state.session.score, 0.0);
        assert_eq!(state.player.target_lane, 0);
        assert_eq!(state.player.y, GROUND_HEIGHT);
        assert_eq!(state.track.tiles.len(), TILE_COUNT);
    }

    #[test]
    fn test_input_ignored_while_game_over() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::GameOver;

        assert!(!state.apply(Action::LaneLeft));
        assert!(!state.apply(Action::Jump));
        assert!(!state.apply(Action::Pause));
        assert_eq!(state.player.target_lane, 0);
        assert!(!state.player.jump_requested);
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(state.apply(Action::Restart));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(7);
        assert!(state.apply(Action::Pause));
        assert_eq!(state.phase, GamePhase::Paused);

        // Steering is ignored while paused
        assert!(!state.apply(Action::LaneRight));
        assert_eq!(state.player.target_lane, 0);

        assert!(state.apply(Action::Pause));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_auto_pause_only_when_running() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::GameOver;
        state.pause();
        assert_eq!(state.phase, GamePhase::GameOver);

        state.phase = GamePhase::Running;
        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_steer_emits_event_only_on_change() {
        let mut state = GameState::new(7);
        assert!(state.apply(Action::LaneRight));
        assert!(!state.apply(Action::LaneRight));
        assert_eq!(state.drain_events(), vec![GameEvent::Steered { lane: 1 }]);
    }

    #[test]
    fn test_camera_follow_saturates() {
        let mut camera = Camera::new(Vec3::ZERO);
        let target = Vec3::new(3.0, 5.0, 9.0);
        camera.follow(target, 0.05, 5.0);
        assert!((camera.position - target * 0.25).length() < 1e-5);

        // dt * rate >= 1 snaps to the target
        camera.follow(target, 1.0, 5.0);
        assert_eq!(camera.position, target);
    }
}
