//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Variable frame delta, clamped per tick
//! - Spawning through an injectable random source
//! - Stable iteration order (tiles by slot, entities by spawn order)

pub mod autopilot;
pub mod collision;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{Aabb, CollisionReport, detect};
pub use player::{Player, Stance};
pub use spawn::{RandomSource, SequenceRandom, populate_tile};
pub use state::{Camera, Collectible, GameEvent, GamePhase, GameState, LANES, Obstacle, Session};
pub use tick::tick;
pub use track::{Tile, TrackPool};
