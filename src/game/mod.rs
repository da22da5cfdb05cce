// Game module - session state and the per-tick simulation pipeline
//
// This module contains:
// - world.rs: GameWorld struct owning one play session (player, counter,
//   beetles, camera, score) and the update pipeline
// - types.rs: shared enums (GameState, GameEvent) and constants

pub mod types;
pub mod world;

// Re-export types for convenience
pub use types::*;
pub use world::GameWorld;
