// Shared enums and constants used throughout the game

use crate::audio::SoundCue;

// Game resolution (logical size; the window scales it up)
pub const GAME_WIDTH: u32 = 640;
pub const GAME_HEIGHT: u32 = 360;

/// Converts a frame delta in seconds into the 60 Hz tick scale the
/// velocity constants are expressed in.
pub fn tick_scale(dt: f32) -> f32 {
    dt * 60.0
}

/// Which screen the game is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
    Victory,
}

/// One-shot facts the simulation reports out of a tick.
///
/// The world and main loop turn these into side effects: cue playback,
/// camera choreography, screen transitions and progress saving. Keeping
/// them as plain values is also what makes the controller testable - the
/// tests assert on the event list instead of mocking services.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    /// The player came back from a death with lives to spare.
    /// Centers are in world pixels; the camera glides between them.
    Respawned {
        from_center: (f32, f32),
        to_center: (f32, f32),
    },
    /// Last friend rescued
    Victory,
    /// Last life spent
    GameOver,
}
