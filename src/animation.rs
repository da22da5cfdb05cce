use crate::sprite::{Frame, SpriteSheet};
use sdl2::render::Texture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The five poses the player sprite can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    Standing,
    Walking,
    Running,
    Jumping,
    Falling,
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState::Standing
    }
}

/// Snapshot of the player's movement flags, as the animation picker sees
/// them. More than one flag can be raised at once; `select_animation`
/// resolves the conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseFlags {
    pub jumping: bool,
    pub falling: bool,
    pub standing: bool,
    pub running: bool,
}

/// Picks the pose to show for a set of raised flags.
///
/// Game Dev Pattern: priority-based state selection. The order matters and
/// is part of the movement feel: jumping beats falling beats standing beats
/// running, and walking is what's left when nothing else claims the frame.
pub fn select_animation(flags: &PoseFlags) -> AnimationState {
    if flags.jumping {
        AnimationState::Jumping
    } else if flags.falling {
        AnimationState::Falling
    } else if flags.standing {
        AnimationState::Standing
    } else if flags.running {
        AnimationState::Running
    } else {
        AnimationState::Walking
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    pub animations: HashMap<AnimationState, AnimationData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationData {
    pub frames: Vec<FrameData>,
    pub loop_animation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameData {
    pub x: i32,
    pub y: i32,
    pub duration_ms: u64,
}

impl FrameData {
    pub fn to_frame(&self, width: u32, height: u32) -> Frame {
        Frame::new(self.x, self.y, width, height, self.duration_ms)
    }
}

impl AnimationConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: AnimationConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Built-in frame table for the player spritesheet, used when no JSON
    /// config ships alongside the binary. Sheet layout: 32x64 cells in a
    /// single row; standing is cell 0, the walk cycle is 1-3 (played
    /// 1,2,3,2), the run cycle 4-7, jump 9, fall 10.
    pub fn default_player() -> Self {
        fn cells(indices: &[i32], duration_ms: u64) -> Vec<FrameData> {
            indices
                .iter()
                .map(|i| FrameData {
                    x: i * 32,
                    y: 0,
                    duration_ms,
                })
                .collect()
        }

        let mut animations = HashMap::new();
        animations.insert(
            AnimationState::Standing,
            AnimationData { frames: cells(&[0], 100), loop_animation: true },
        );
        animations.insert(
            AnimationState::Walking,
            AnimationData { frames: cells(&[1, 2, 3, 2], 150), loop_animation: true },
        );
        animations.insert(
            AnimationState::Running,
            AnimationData { frames: cells(&[4, 5, 6, 7], 75), loop_animation: true },
        );
        animations.insert(
            AnimationState::Jumping,
            AnimationData { frames: cells(&[9], 100), loop_animation: true },
        );
        animations.insert(
            AnimationState::Falling,
            AnimationData { frames: cells(&[10], 100), loop_animation: true },
        );

        AnimationConfig {
            frame_width: 32,
            frame_height: 64,
            animations,
        }
    }

    /// Built-in frame table for the patrol beetle: two idle cells that
    /// alternate as it walks.
    pub fn default_beetle() -> Self {
        let mut animations = HashMap::new();
        animations.insert(
            AnimationState::Walking,
            AnimationData {
                frames: vec![
                    FrameData { x: 0, y: 0, duration_ms: 200 },
                    FrameData { x: 32, y: 0, duration_ms: 200 },
                ],
                loop_animation: true,
            },
        );

        AnimationConfig {
            frame_width: 32,
            frame_height: 32,
            animations,
        }
    }

    pub fn create_frames(&self, state: &AnimationState) -> Vec<Frame> {
        if let Some(animation_data) = self.animations.get(state) {
            animation_data
                .frames
                .iter()
                .map(|frame_data| frame_data.to_frame(self.frame_width, self.frame_height))
                .collect()
        } else {
            Vec::new()
        }
    }

    pub fn should_loop(&self, state: &AnimationState) -> bool {
        self.animations
            .get(state)
            .map(|data| data.loop_animation)
            .unwrap_or(true)
    }

    /// Builds a controller with a sprite sheet per configured state.
    ///
    /// States missing from the config are skipped; the controller falls
    /// back to rendering nothing for them (the entity's own fallback rect
    /// takes over).
    pub fn create_controller<'a>(&self, texture: &'a Texture<'a>) -> AnimationController<'a> {
        let mut controller = AnimationController::new();
        for state in self.animations.keys() {
            let mut sheet = SpriteSheet::new(texture, self.create_frames(state));
            sheet.set_loop(self.should_loop(state));
            controller.add_animation(*state, sheet);
        }
        controller
    }
}

pub struct AnimationController<'a> {
    current_state: AnimationState,
    sprite_sheets: HashMap<AnimationState, SpriteSheet<'a>>,
    state_changed: bool,
}

impl<'a> AnimationController<'a> {
    pub fn new() -> Self {
        AnimationController {
            current_state: AnimationState::default(),
            sprite_sheets: HashMap::new(),
            state_changed: false,
        }
    }

    pub fn add_animation(&mut self, state: AnimationState, sprite_sheet: SpriteSheet<'a>) {
        self.sprite_sheets.insert(state, sprite_sheet);
    }

    /// Switches the active pose. Calling this with the pose that is already
    /// active is a no-op, so it is safe to call every frame.
    pub fn set_state(&mut self, new_state: AnimationState) {
        if new_state != self.current_state {
            self.current_state = new_state;
            self.state_changed = true;
        }
    }

    pub fn update(&mut self) {
        if self.state_changed {
            if let Some(sprite_sheet) = self.sprite_sheets.get_mut(&self.current_state) {
                sprite_sheet.reset();
                sprite_sheet.play();
            }
            self.state_changed = false;
        }

        if let Some(sprite_sheet) = self.sprite_sheets.get_mut(&self.current_state) {
            sprite_sheet.update();
        }
    }

    pub fn get_current_sprite_sheet(&self) -> Option<&SpriteSheet<'a>> {
        self.sprite_sheets.get(&self.current_state)
    }

    pub fn current_state(&self) -> &AnimationState {
        &self.current_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jumping_beats_every_other_flag() {
        let flags = PoseFlags {
            jumping: true,
            falling: true,
            standing: true,
            running: true,
        };
        assert_eq!(select_animation(&flags), AnimationState::Jumping);
    }

    #[test]
    fn test_falling_beats_standing_and_running() {
        let flags = PoseFlags {
            jumping: false,
            falling: true,
            standing: true,
            running: true,
        };
        assert_eq!(select_animation(&flags), AnimationState::Falling);
    }

    #[test]
    fn test_standing_beats_running() {
        // Holding boost while motionless still shows the standing pose
        let flags = PoseFlags {
            standing: true,
            running: true,
            ..Default::default()
        };
        assert_eq!(select_animation(&flags), AnimationState::Standing);
    }

    #[test]
    fn test_walking_is_the_fallback() {
        let flags = PoseFlags::default();
        assert_eq!(select_animation(&flags), AnimationState::Walking);
    }

    #[test]
    fn test_default_player_config_covers_all_poses() {
        let config = AnimationConfig::default_player();
        for state in [
            AnimationState::Standing,
            AnimationState::Walking,
            AnimationState::Running,
            AnimationState::Jumping,
            AnimationState::Falling,
        ] {
            assert!(
                !config.create_frames(&state).is_empty(),
                "missing frames for {:?}",
                state
            );
        }
    }

    #[test]
    fn test_walk_cycle_pingpongs_through_middle_cell() {
        let config = AnimationConfig::default_player();
        let frames = config.create_frames(&AnimationState::Walking);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1].x, frames[3].x);
    }

    #[test]
    fn test_controller_ignores_redundant_set_state() {
        let mut controller = AnimationController::new();
        controller.set_state(AnimationState::Jumping);
        controller.update();
        controller.set_state(AnimationState::Jumping);
        assert_eq!(*controller.current_state(), AnimationState::Jumping);
        assert!(!controller.state_changed);
    }
}
