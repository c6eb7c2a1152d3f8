//! HUD values
//!
//! A plain snapshot of what the overlay shows, refreshed after every tick.

use serde::Serialize;

use crate::sim::{GamePhase, GameState, RandomSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub speed: f32,
    pub distance: u64,
    pub collected: u32,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn from_state<R: RandomSource>(state: &GameState<R>) -> Self {
        Self {
            score: state.session.score.max(0.0).floor() as u64,
            speed: state.session.speed,
            distance: state.session.distance.max(0.0).floor() as u64,
            collected: state.session.collected,
            phase: state.phase,
        }
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    pub fn speed_text(&self) -> String {
        format!("{:.1}", self.speed)
    }

    pub fn distance_text(&self) -> String {
        format!("{}m", self.distance)
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}
