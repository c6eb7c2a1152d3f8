//! Collision detection between the player and track entities
//!
//! Everything is an axis-aligned box. The scan is brute force over every
//! live entity, which stays small (at most two per tile).

use glam::Vec3;

use super::player::Player;
use super::state::{Collectible, Obstacle};
use super::track::TrackPool;
use crate::lane_to_x;
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Overlap test; touching faces count as a hit
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

pub fn player_box(player: &Player, tuning: &Tuning) -> Aabb {
    Aabb::from_center(player.position(tuning.lane_width), tuning.player_half_extents)
}

/// Train body standing on the track, `length` deep along Z
pub fn obstacle_box(tile_z: f32, obstacle: &Obstacle, tuning: &Tuning) -> Aabb {
    let center = Vec3::new(
        lane_to_x(obstacle.lane as f32, tuning.lane_width),
        tuning.obstacle_height * 0.5,
        tile_z + obstacle.offset,
    );
    let half = Vec3::new(
        tuning.obstacle_half_width,
        tuning.obstacle_height * 0.5,
        obstacle.length * 0.5,
    );
    Aabb::from_center(center, half)
}

pub fn collectible_box(tile_z: f32, collectible: &Collectible, tuning: &Tuning) -> Aabb {
    let center = Vec3::new(
        lane_to_x(collectible.lane as f32, tuning.lane_width),
        tuning.collectible_height,
        tile_z + collectible.offset,
    );
    Aabb::from_center(center, tuning.collectible_half_extents)
}

/// What the player touched this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// First obstacle hit, if any
    pub crashed_into: Option<u32>,
    /// Every collectible overlapping the player
    pub collected: Vec<u32>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.crashed_into.is_none() && self.collected.is_empty()
    }
}

/// Scan all live entities against the player.
///
/// Stops at the first obstacle hit; a crash ends the run so pickups on the
/// same frame are not reported.
pub fn detect(player: &Player, track: &TrackPool, tuning: &Tuning) -> CollisionReport {
    let player_box = player_box(player, tuning);

    if let Some((_, obstacle)) = track
        .obstacles()
        .find(|(z, o)| obstacle_box(*z, o, tuning).intersects(&player_box))
    {
        return CollisionReport {
            crashed_into: Some(obstacle.id),
            collected: Vec::new(),
        };
    }

    let collected = track
        .collectibles()
        .filter(|(z, c)| collectible_box(*z, c, tuning).intersects(&player_box))
        .map(|(_, c)| c.id)
        .collect();

    CollisionReport {
        crashed_into: None,
        collected,
    }
}
