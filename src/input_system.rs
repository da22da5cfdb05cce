use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use sdl2::EventPump;

/// Logical movement actions the simulation reads every tick.
///
/// The player controller never sees scancodes; it asks whether an action
/// is held (`is_pressed`) or freshly pressed this frame (`was_pressed`).
/// Arrow keys and WASD are both bound, plus Space for jumping and Shift
/// for the run boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Boost,
    Down,
}

pub const ACTION_COUNT: usize = 5;

impl Action {
    fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Jump => 2,
            Action::Boost => 3,
            Action::Down => 4,
        }
    }
}

/// Per-frame view of the logical actions, with one frame of history so
/// edge-triggered queries work.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: [bool; ACTION_COUNT],
    previous: [bool; ACTION_COUNT],
}

impl InputSnapshot {
    pub fn new() -> Self {
        InputSnapshot::default()
    }

    /// Rolls the snapshot forward one frame with a fresh held-state array.
    pub fn advance(&mut self, held: [bool; ACTION_COUNT]) {
        self.previous = self.held;
        self.held = held;
    }

    /// Convenience for building a frame from a list of held actions.
    /// The simulation tests drive the controller through this.
    #[allow(dead_code)]
    pub fn advance_with(&mut self, actions: &[Action]) {
        let mut held = [false; ACTION_COUNT];
        for action in actions {
            held[action.index()] = true;
        }
        self.advance(held);
    }

    /// Level query: is the action held right now?
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Edge query: did the action go down on this frame?
    #[allow(dead_code)] // Reserved for press-to-interact actions
    pub fn was_pressed(&self, action: Action) -> bool {
        self.held[action.index()] && !self.previous[action.index()]
    }
}

/// Maps the SDL keyboard state onto the logical action array.
pub fn actions_from_keyboard(keyboard: &KeyboardState) -> [bool; ACTION_COUNT] {
    let pressed = |codes: &[Scancode]| codes.iter().any(|c| keyboard.is_scancode_pressed(*c));

    [
        pressed(&[Scancode::Left, Scancode::A]),
        pressed(&[Scancode::Right, Scancode::D]),
        pressed(&[Scancode::Up, Scancode::W, Scancode::Space]),
        pressed(&[Scancode::LShift, Scancode::RShift]),
        pressed(&[Scancode::Down, Scancode::S]),
    ]
}

/// Out-of-band actions translated from the SDL event queue: things that
/// happen once per key press rather than being sampled each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
    /// Enter - restart from the game-over / victory screens
    Confirm,
    // Developer keys, only emitted in debug mode
    DebugDie,
    DebugScoreUp,
    DebugScoreDown,
}

/// InputSystem turns SDL2 events and keyboard state into the two views the
/// game consumes: the per-tick `InputSnapshot` and one-shot `SystemAction`s.
pub struct InputSystem {
    pub snapshot: InputSnapshot,
    debug_mode: bool,
}

impl InputSystem {
    pub fn new(debug_mode: bool) -> Self {
        InputSystem {
            snapshot: InputSnapshot::new(),
            debug_mode,
        }
    }

    /// Samples the held actions for this frame. Call once per frame,
    /// before the simulation update.
    pub fn sample_actions(&mut self, keyboard: &KeyboardState) {
        let held = actions_from_keyboard(keyboard);
        self.snapshot.advance(held);
    }

    /// Drains the SDL event queue into system actions.
    pub fn poll_events(&mut self, event_pump: &mut EventPump) -> Vec<SystemAction> {
        let mut actions = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(SystemAction::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => match keycode {
                    Keycode::Escape => actions.push(SystemAction::Quit),
                    Keycode::Return => actions.push(SystemAction::Confirm),
                    Keycode::I if self.debug_mode => actions.push(SystemAction::DebugDie),
                    Keycode::O if self.debug_mode => actions.push(SystemAction::DebugScoreUp),
                    Keycode::P if self.debug_mode => actions.push(SystemAction::DebugScoreDown),
                    _ => {}
                },
                _ => {}
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pressed_reflects_current_frame() {
        let mut snapshot = InputSnapshot::new();
        snapshot.advance_with(&[Action::Left, Action::Boost]);

        assert!(snapshot.is_pressed(Action::Left));
        assert!(snapshot.is_pressed(Action::Boost));
        assert!(!snapshot.is_pressed(Action::Jump));
    }

    #[test]
    fn test_was_pressed_only_fires_on_the_edge() {
        let mut snapshot = InputSnapshot::new();

        snapshot.advance_with(&[Action::Jump]);
        assert!(snapshot.was_pressed(Action::Jump));

        // Still held next frame: no new edge
        snapshot.advance_with(&[Action::Jump]);
        assert!(snapshot.is_pressed(Action::Jump));
        assert!(!snapshot.was_pressed(Action::Jump));

        // Released, then pressed again: edge fires again
        snapshot.advance_with(&[]);
        snapshot.advance_with(&[Action::Jump]);
        assert!(snapshot.was_pressed(Action::Jump));
    }
}
