//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One step per rendered frame, no wall-clock time
//! - Layout randomness from a seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod chunks;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use chunks::{Chunk, ChunkLibrary, ObstacleSpec, ObstacleSpecKind, PlatformSpec};
pub use collision::{Contact, collect_coins, hits_obstacle, out_of_bounds, resolve_platform_contact};
pub use spawn::spawn_ahead;
pub use state::{
    Coin, Difficulty, GamePhase, Obstacle, ObstacleKind, Oscillation, Platform, Player, SpawnCursor,
    World,
};
pub use tick::{StepOutcome, tick};
