//! Audio cue playback
//!
//! The simulation never talks to the sound card - it emits `SoundCue`
//! values and this module plays them fire-and-forget through rodio. When
//! no output device exists (CI, headless boxes) or the sample files are
//! missing, the player degrades to a warned no-op and the game keeps
//! running silently.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// The three cues the simulation can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Leaving the ground
    Jump,
    /// Bouncing off an enemy's back
    Stomp,
    /// Rescuing a friend
    Collect,
}

impl SoundCue {
    pub fn all() -> [SoundCue; 3] {
        [SoundCue::Jump, SoundCue::Stomp, SoundCue::Collect]
    }

    fn file_name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump.wav",
            SoundCue::Stomp => "stomp.wav",
            SoundCue::Collect => "collect.wav",
        }
    }
}

pub struct AudioPlayer {
    // Keeping the stream alive is what keeps the device open
    output: Option<(OutputStream, OutputStreamHandle)>,
    samples: HashMap<SoundCue, Vec<u8>>,
}

impl AudioPlayer {
    /// Opens the default output device and preloads the cue samples from
    /// `sound_dir`. Never fails - every missing piece just narrows what
    /// `play` can do.
    pub fn new(sound_dir: &str) -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(e) => {
                eprintln!("Warning: no audio output available ({}), running silent", e);
                None
            }
        };

        let mut samples = HashMap::new();
        if output.is_some() {
            for cue in SoundCue::all() {
                let path = Path::new(sound_dir).join(cue.file_name());
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        samples.insert(cue, bytes);
                    }
                    Err(_) => {
                        eprintln!("Warning: missing sound file {}", path.display());
                    }
                }
            }
        }

        AudioPlayer { output, samples }
    }

    /// Plays a cue and forgets about it. Decode or playback hiccups are
    /// swallowed; a sound effect is never worth interrupting a frame for.
    pub fn play(&self, cue: SoundCue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(bytes) = self.samples.get(&cue) else {
            return;
        };

        if let Ok(decoder) = Decoder::new(Cursor::new(bytes.clone())) {
            let _ = handle.play_raw(decoder.convert_samples());
        }
    }
}
