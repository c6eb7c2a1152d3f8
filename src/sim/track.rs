//! Track tile pool
//!
//! A fixed ring of tiles laid out along -Z in front of the player. The world
//! scrolls toward +Z; a tile that passes behind the camera jumps to the back
//! of the ring and is restocked by the spawner.

use serde::{Deserialize, Serialize};

use super::spawn::{RandomSource, populate_tile};
use super::state::{Collectible, GameEvent, Obstacle};
use crate::tuning::Tuning;

/// One track segment and the entities riding on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Position in the initial layout (0 = under the player)
    pub slot: usize,
    /// Forward position of the tile center
    pub z: f32,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
}

impl Tile {
    pub fn new(slot: usize, z: f32) -> Self {
        Self {
            slot,
            z,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
        }
    }

    /// Release all attached entities
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.collectibles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.collectibles.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPool {
    pub tiles: Vec<Tile>,
    next_id: u32,
}

impl TrackPool {
    /// Empty tiles in their initial layout
    pub fn new(tuning: &Tuning) -> Self {
        let tiles = (0..tuning.tile_count)
            .map(|slot| Tile::new(slot, Self::initial_z(slot, tuning)))
            .collect();
        Self { tiles, next_id: 1 }
    }

    /// Initial center of the tile in `slot`
    pub fn initial_z(slot: usize, tuning: &Tuning) -> f32 {
        -(slot as f32) * tuning.tile_length
    }

    /// Restore the initial layout and restock every tile
    pub fn reset<R: RandomSource>(&mut self, tuning: &Tuning, rng: &mut R) {
        if self.tiles.len() != tuning.tile_count {
            *self = Self::new(tuning);
        }

        for tile in &mut self.tiles {
            tile.z = Self::initial_z(tile.slot, tuning);
            if tile.slot < tuning.safe_start_tiles {
                tile.clear();
            } else {
                populate_tile(tile, tuning, rng, &mut self.next_id);
            }
        }
    }

    /// Scroll every tile by `delta` and recycle the ones behind the camera.
    ///
    /// Each tile is checked on its own, so several can recycle in one call.
    pub fn advance<R: RandomSource>(
        &mut self,
        delta: f32,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let span = tuning.track_span();
        for tile in &mut self.tiles {
            tile.z += delta;
            if tile.z > tuning.recycle_z {
                tile.z -= span;
                populate_tile(tile, tuning, rng, &mut self.next_id);
                log::debug!(
                    "Recycled tile {} to z={:.1} ({} obstacles, {} pickups)",
                    tile.slot,
                    tile.z,
                    tile.obstacles.len(),
                    tile.collectibles.len()
                );
                events.push(GameEvent::TileRecycled { slot: tile.slot });
            }
        }
    }

    /// Remove a collectible by id; missing ids are a no-op
    pub fn remove_collectible(&mut self, id: u32) -> Option<Collectible> {
        for tile in &mut self.tiles {
            if let Some(index) = tile.collectibles.iter().position(|c| c.id == id) {
                return Some(tile.collectibles.remove(index));
            }
        }
        None
    }

    /// Live obstacles with their owning tile's position
    pub fn obstacles(&self) -> impl Iterator<Item = (f32, &Obstacle)> {
        self.tiles
            .iter()
            .flat_map(|tile| tile.obstacles.iter().map(move |o| (tile.z, o)))
    }

    /// Live collectibles with their owning tile's position
    pub fn collectibles(&self) -> impl Iterator<Item = (f32, &Collectible)> {
        self.tiles
            .iter()
            .flat_map(|tile| tile.collectibles.iter().map(move |c| (tile.z, c)))
    }

    pub fn entity_count(&self) -> usize {
        self.tiles
            .iter()
            .map(|t| t.obstacles.len() + t.collectibles.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::SequenceRandom;

    fn always() -> SequenceRandom {
        SequenceRandom::new(vec![0.0])
    }

    #[test]
    fn test_initial_layout_is_consecutive() {
        let tuning = Tuning::default();
        let mut pool = TrackPool::new(&tuning);
        pool.reset(&tuning, &mut always());

        for (i, tile) in pool.tiles.iter().enumerate() {
            assert_eq!(tile.slot, i);
            assert_eq!(tile.z, -(i as f32) * tuning.tile_length);
        }
        // Safe tiles stay empty, the rest roll both entity kinds
        assert!(pool.tiles[0].is_empty());
        assert!(pool.tiles[1].is_empty());
        assert!(pool.tiles[2..].iter().all(|t| t.obstacles.len() == 1 && t.collectibles.len() == 1));
    }

    #[test]
    fn test_recycle_moves_tile_to_back_and_restocks() {
        let tuning = Tuning::default();
        let mut pool = TrackPool::new(&tuning);
        let mut rng = always();
        pool.reset(&tuning, &mut rng);

        pool.tiles[0].z = tuning.recycle_z - 0.5;
        pool.tiles[0].obstacles.push(Obstacle {
            id: 500,
            lane: 0,
            length: 6.0,
            offset: 0.0,
        });
        let before = pool.tiles[0].z;
        let mut events = Vec::new();

        pool.advance(1.0, &tuning, &mut rng, &mut events);

        let tile = &pool.tiles[0];
        assert!((tile.z - (before + 1.0 - tuning.track_span())).abs() < 1e-4);
        assert_eq!(tile.obstacles.len(), 1);
        assert_ne!(tile.obstacles[0].id, 500);
        assert_eq!(tile.collectibles.len(), 1);
        assert_eq!(events, vec![GameEvent::TileRecycled { slot: 0 }]);
    }

    #[test]
    fn test_multiple_tiles_recycle_in_one_step() {
        let tuning = Tuning::default();
        let mut pool = TrackPool::new(&tuning);
        let mut rng = SequenceRandom::never();
        pool.reset(&tuning, &mut rng);
        let mut events = Vec::new();

        // Tiles 0 and 1 both cross the threshold
        pool.advance(tuning.tile_length + tuning.recycle_z + 1.0, &tuning, &mut rng, &mut events);

        assert_eq!(events.len(), 2);
        let mut z: Vec<f32> = pool.tiles.iter().map(|t| t.z).collect();
        z.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        // Still a gapless ring
        for pair in z.windows(2) {
            assert!((pair[1] - pair[0] - tuning.tile_length).abs() < 1e-3);
        }
    }

    #[test]
    fn test_remove_collectible_is_null_safe() {
        let tuning = Tuning::default();
        let mut pool = TrackPool::new(&tuning);
        pool.reset(&tuning, &mut always());

        let id = pool.tiles[3].collectibles[0].id;
        assert!(pool.remove_collectible(id).is_some());
        assert!(pool.remove_collectible(id).is_none());
        assert!(pool.tiles[3].collectibles.is_empty());
    }

    #[test]
    fn test_reset_rebuilds_when_tile_count_changes() {
        let mut tuning = Tuning::default();
        let mut pool = TrackPool::new(&tuning);
        tuning.tile_count = 4;
        pool.reset(&tuning, &mut SequenceRandom::never());
        assert_eq!(pool.tiles.len(), 4);
        assert_eq!(pool.entity_count(), 0);
    }
}
