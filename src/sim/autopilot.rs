//! Idle/demo mode - picks inputs that keep the runner alive
//!
//! Looks a short distance ahead in each lane and steers away from trains,
//! drifting toward pickups when nothing is in the way.

use super::collision::{collectible_box, obstacle_box};
use super::spawn::RandomSource;
use super::state::{GamePhase, GameState, LANES, lane_index};
use crate::consts::LANE_COUNT;
use crate::input::Action;

/// Seconds of travel the autopilot looks ahead
const LOOKAHEAD_SECS: f32 = 0.9;
/// Extra margin in world units
const LOOKAHEAD_MARGIN: f32 = 4.0;

/// Choose the next action for the current frame, if any
pub fn choose_action<R: RandomSource>(state: &GameState<R>) -> Option<Action> {
    if state.phase != GamePhase::Running {
        return None;
    }

    let tuning = &state.tuning;
    let reach = state.session.speed * LOOKAHEAD_SECS + LOOKAHEAD_MARGIN;
    let player_back = tuning.player_half_extents.z;

    // Nearest threat per lane: distance ahead of the player, None if clear
    let mut threat = [None::<f32>; LANE_COUNT];
    for (z, obstacle) in state.track.obstacles() {
        let bounds = obstacle_box(z, obstacle, tuning);
        if bounds.max.z < -reach || bounds.min.z > player_back {
            continue;
        }
        let slot = &mut threat[lane_index(obstacle.lane)];
        let distance = (-bounds.max.z).max(0.0);
        *slot = Some(slot.map_or(distance, |d: f32| d.min(distance)));
    }

    let mut pickup = [false; LANE_COUNT];
    for (z, collectible) in state.track.collectibles() {
        let bounds = collectible_box(z, collectible, tuning);
        if bounds.max.z >= -reach && bounds.min.z <= player_back {
            pickup[lane_index(collectible.lane)] = true;
        }
    }

    let current = state.player.target_lane;
    let neighbors = [current - 1, current + 1];
    let mut reachable = neighbors.into_iter().filter(|lane| LANES.contains(lane));

    if threat[lane_index(current)].is_some() {
        // Prefer the clear neighbor, otherwise the one whose threat is farther away
        let best = reachable.max_by(|a, b| {
            let da = threat[lane_index(*a)].unwrap_or(f32::INFINITY);
            let db = threat[lane_index(*b)].unwrap_or(f32::INFINITY);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;
        let here = threat[lane_index(current)].unwrap_or(f32::INFINITY);
        let there = threat[lane_index(best)].unwrap_or(f32::INFINITY);
        return (there > here).then(|| steer_toward(current, best));
    }

    if !pickup[lane_index(current)] {
        let target = reachable.find(|lane| pickup[lane_index(*lane)] && threat[lane_index(*lane)].is_none());
        if let Some(lane) = target {
            return Some(steer_toward(current, lane));
        }
    }

    None
}

fn steer_toward(current: i8, lane: i8) -> Action {
    if lane < current {
        Action::LaneLeft
    } else {
        Action::LaneRight
    }
}
