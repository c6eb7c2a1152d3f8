//! Entity spawner
//!
//! Fills a recycled tile with at most one train and at most one pickup.
//! Randomness comes through [`RandomSource`] so tests can script it.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Collectible, LANES, Obstacle, lane_index};
use super::track::Tile;
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Uniform random source for spawning
pub trait RandomSource {
    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }

    /// Uniform sample in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        let value = min + self.next_unit() * (max - min);
        // f32 rounding can land exactly on max
        if value < max { value } else { min }
    }

    /// Uniform index in 0..len (len > 0)
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that never rolls under any probability (spawns nothing)
    pub fn never() -> Self {
        Self::new(vec![0.999])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 0.999_999)
    }
}

/// Monotonic entity id allocator
pub(crate) fn allocate_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id = next_id.wrapping_add(1);
    id
}

/// Clear a tile and roll fresh contents for it.
///
/// Draw order: obstacle roll, obstacle lane, length, offset; then
/// collectible roll, free-lane pick, offset.
pub fn populate_tile<R: RandomSource>(tile: &mut Tile, tuning: &Tuning, rng: &mut R, next_id: &mut u32) {
    tile.clear();

    let spread = tuning.spawn_spread * tuning.tile_length;
    let mut occupied = [false; LANE_COUNT];

    if rng.chance(tuning.obstacle_chance) {
        let lane = LANES[rng.index(LANES.len())];
        let length = rng.range(tuning.obstacle_min_length, tuning.obstacle_max_length);
        let offset = rng.range(-spread, spread);
        occupied[lane_index(lane)] = true;
        tile.obstacles.push(Obstacle {
            id: allocate_id(next_id),
            lane,
            length,
            offset,
        });
    }

    if rng.chance(tuning.collectible_chance) {
        let mut free = [0i8; LANE_COUNT];
        let mut free_count = 0;
        for lane in LANES {
            if !occupied[lane_index(lane)] {
                free[free_count] = lane;
                free_count += 1;
            }
        }

        if free_count > 0 {
            let lane = free[rng.index(free_count)];
            let offset = rng.range(-spread, spread);
            tile.collectibles.push(Collectible {
                id: allocate_id(next_id),
                lane,
                offset,
            });
        }
    }
}
