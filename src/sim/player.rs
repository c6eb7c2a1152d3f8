//! Player controller
//!
//! Discrete target lane with smoothed lateral motion, plus a two-state
//! (grounded/airborne) jump integrator.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LANE, MIN_LANE};
use crate::tuning::Tuning;

/// Vertical state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Grounded,
    Airborne,
}

/// Vertical state change produced by one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceChange {
    TookOff,
    Landed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Smoothed lane position (continuous, between -1 and 1)
    pub lane: f32,
    /// Lane chosen by input
    pub target_lane: i8,
    /// Vertical position of the body center
    pub y: f32,
    pub vy: f32,
    pub stance: Stance,
    /// Jump pressed since the last tick
    pub jump_requested: bool,
}

impl Player {
    pub fn new(ground_height: f32) -> Self {
        Self {
            lane: 0.0,
            target_lane: 0,
            y: ground_height,
            vy: 0.0,
            stance: Stance::Grounded,
            jump_requested: false,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.stance == Stance::Grounded
    }

    /// Shift the target lane by `direction`, clamped to the outer lanes.
    /// Returns true if the target changed.
    pub fn steer(&mut self, direction: i8) -> bool {
        let target = self.target_lane.saturating_add(direction).clamp(MIN_LANE, MAX_LANE);
        let changed = target != self.target_lane;
        self.target_lane = target;
        changed
    }

    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Exponential approach toward the target lane
    pub fn smooth_lane(&mut self, dt: f32, rate: f32) {
        let t = crate::approach_factor(dt, rate);
        self.lane += (self.target_lane as f32 - self.lane) * t;
    }

    /// Consume the jump request and integrate gravity
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) -> Option<StanceChange> {
        let mut change = None;

        // Requests made mid-air are dropped, not buffered
        if std::mem::take(&mut self.jump_requested) && self.is_grounded() {
            self.vy = tuning.jump_velocity;
            self.stance = Stance::Airborne;
            change = Some(StanceChange::TookOff);
        }

        if self.stance == Stance::Airborne {
            self.vy -= tuning.gravity * dt;
            self.y += self.vy * dt;

            if self.y <= tuning.ground_height && self.vy <= 0.0 {
                self.y = tuning.ground_height;
                self.vy = 0.0;
                self.stance = Stance::Grounded;
                change = Some(StanceChange::Landed);
            }
        }

        self.y = self.y.max(tuning.ground_height);
        change
    }

    /// World position of the body center (player stays at z = 0)
    pub fn position(&self, lane_width: f32) -> Vec3 {
        Vec3::new(crate::lane_to_x(self.lane, lane_width), self.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_steer_clamps_to_outer_lanes() {
        let mut player = Player::new(GROUND_HEIGHT);
        assert!(player.steer(-1));
        assert!(!player.steer(-1));
        assert!(!player.steer(-1));
        assert_eq!(player.target_lane, -1);

        assert!(player.steer(1));
        assert!(player.steer(1));
        assert!(!player.steer(1));
        assert_eq!(player.target_lane, 1);
    }

    #[test]
    fn test_smooth_lane_approaches_target() {
        let mut player = Player::new(GROUND_HEIGHT);
        player.steer(1);

        player.smooth_lane(0.05, LANE_SMOOTHING);
        assert!((player.lane - 0.5).abs() < 1e-6);
        player.smooth_lane(0.05, LANE_SMOOTHING);
        assert!((player.lane - 0.75).abs() < 1e-6);

        // dt * rate >= 1 completes the switch in one step
        player.smooth_lane(0.2, LANE_SMOOTHING);
        assert_eq!(player.lane, 1.0);
        assert_eq!(player.position(LANE_WIDTH).x, 3.0);
    }

    #[test]
    fn test_jump_arc_lands_with_zero_velocity() {
        let tuning = Tuning::default();
        let mut player = Player::new(GROUND_HEIGHT);
        player.request_jump();

        assert_eq!(player.integrate(1.0 / 60.0, &tuning), Some(StanceChange::TookOff));
        assert!(!player.is_grounded());
        assert!(player.y > GROUND_HEIGHT);

        let mut peak = player.y;
        let mut landed = false;
        for _ in 0..120 {
            if player.integrate(1.0 / 60.0, &tuning) == Some(StanceChange::Landed) {
                landed = true;
                break;
            }
            peak = peak.max(player.y);
        }

        assert!(landed);
        assert!(player.is_grounded());
        assert_eq!(player.y, GROUND_HEIGHT);
        assert_eq!(player.vy, 0.0);
        // v² / 2g above the ground, give or take integration error
        assert!((peak - GROUND_HEIGHT - 1.806).abs() < 0.15);
    }

    #[test]
    fn test_jump_request_ignored_while_airborne() {
        let tuning = Tuning::default();
        let mut player = Player::new(GROUND_HEIGHT);
        player.request_jump();
        player.integrate(0.05, &tuning);
        let vy = player.vy;

        player.request_jump();
        assert_eq!(player.integrate(0.0, &tuning), None);
        assert_eq!(player.vy, vy);
        assert!(!player.jump_requested);
    }

    #[test]
    fn test_zero_dt_jump_is_not_lost() {
        let tuning = Tuning::default();
        let mut player = Player::new(GROUND_HEIGHT);
        player.request_jump();
        assert_eq!(player.integrate(0.0, &tuning), Some(StanceChange::TookOff));
        assert_eq!(player.vy, JUMP_VELOCITY);
        assert!(!player.is_grounded());
    }

    proptest! {
        #[test]
        fn prop_target_lane_stays_in_range(steps in prop::collection::vec(prop::sample::select(vec![-1i8, 1]), 0..64)) {
            let mut player = Player::new(GROUND_HEIGHT);
            for step in steps {
                player.steer(step);
                prop_assert!((MIN_LANE..=MAX_LANE).contains(&player.target_lane));
            }
        }

        #[test]
        fn prop_never_below_ground(frames in prop::collection::vec((0.0f32..=0.05, any::<bool>()), 1..400)) {
            let tuning = Tuning::default();
            let mut player = Player::new(GROUND_HEIGHT);
            for (dt, jump) in frames {
                if jump {
                    player.request_jump();
                }
                player.integrate(dt, &tuning);
                prop_assert!(player.y >= GROUND_HEIGHT);
                if player.is_grounded() {
                    prop_assert_eq!(player.vy, 0.0);
                    prop_assert_eq!(player.y, GROUND_HEIGHT);
                }
            }
        }
    }
}
