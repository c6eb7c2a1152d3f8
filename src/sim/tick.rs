//! Per-frame simulation step
//!
//! Advances the world by one (clamped) frame delta in a fixed order:
//! 1. speed and distance
//! 2. passive score
//! 3. track scroll and recycling
//! 4. lane smoothing
//! 5. jump and gravity
//! 6. camera follow
//! 7. collisions
//!
//! The shell refreshes the HUD from the resulting state afterwards.

use super::collision;
use super::player::StanceChange;
use super::spawn::RandomSource;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one frame
pub fn tick<R: RandomSource>(state: &mut GameState<R>, dt: f32) {
    // Paused and game-over freeze gameplay
    if state.phase != GamePhase::Running {
        return;
    }

    let dt = if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, state.tuning.max_frame_dt)
    };

    // 1. Speed ramps up slowly; distance follows the new speed
    state.session.speed += state.tuning.acceleration * dt;
    let step = state.session.speed * dt;
    state.session.distance += step;

    // 2. Passive score
    state.session.score += step * state.tuning.score_per_unit;

    // 3. Scroll the world toward the player
    state
        .track
        .advance(step, &state.tuning, &mut state.rng, &mut state.events);

    // 4. Lateral motion
    state.player.smooth_lane(dt, state.tuning.lane_smoothing);

    // 5. Vertical motion
    match state.player.integrate(dt, &state.tuning) {
        Some(StanceChange::TookOff) => state.events.push(GameEvent::Jumped),
        Some(StanceChange::Landed) => state.events.push(GameEvent::Landed),
        None => {}
    }

    // 6. Camera chase
    let target = state.player_position() + state.tuning.camera_offset;
    state
        .camera
        .follow(target, dt, state.tuning.camera_follow_rate);

    // 7. Collisions
    resolve_collisions(state);
}

fn resolve_collisions<R: RandomSource>(state: &mut GameState<R>) {
    let report = collision::detect(&state.player, &state.track, &state.tuning);

    if let Some(id) = report.crashed_into {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crashed { id });
        log::info!(
            "Crashed into obstacle {} - score {:.0}, distance {:.0}",
            id,
            state.session.score,
            state.session.distance
        );
        return;
    }

    for id in report.collected {
        if let Some(collectible) = state.track.remove_collectible(id) {
            state.session.score += state.tuning.collectible_bonus;
            state.session.collected += 1;
            state.events.push(GameEvent::Collected {
                id,
                lane: collectible.lane,
            });
            log::debug!("Collected pickup {} in lane {}", id, collectible.lane);
        }
    }
}
