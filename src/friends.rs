//! Friends to rescue, and the counter that decides when you've won
//!
//! Level files declare places where a friend *could* be. Every placement
//! spawns a slot in the `RescueCounter`; after loading, `limit_amount`
//! tombstones random slots until at most the configured number remain
//! live. Slots are never removed from the arena - a tombstone flag keeps
//! indices stable for the whole session, so the contact scan can refer to
//! friends by index without worrying about reuse.
//!
//! Collecting the last placed friend is the win condition. `remaining()`
//! can only reach zero once per session (nothing re-places a friend short
//! of a full `reset`), which is what makes the victory signal one-shot.

use crate::collision::Aabb;
use rand::Rng;

/// Score awarded for each rescued friend.
pub const RESCUE_SCORE: u32 = 100;

/// Collision box of a single friend, matching the sheet cell size.
pub const FRIEND_WIDTH: f32 = 43.0;
pub const FRIEND_HEIGHT: f32 = 50.0;

/// Which critter a friend slot shows. One spritesheet row per variant,
/// chosen uniformly at random when the slot spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendVariant {
    Horse,
    Goat,
    Cat,
    Bear,
    Kitten,
    Rabbit,
    Pig,
}

impl FriendVariant {
    pub const COUNT: usize = 7;

    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..Self::COUNT) {
            0 => FriendVariant::Horse,
            1 => FriendVariant::Goat,
            2 => FriendVariant::Cat,
            3 => FriendVariant::Bear,
            4 => FriendVariant::Kitten,
            5 => FriendVariant::Rabbit,
            _ => FriendVariant::Pig,
        }
    }

    /// Row index into the friends spritesheet.
    pub fn sheet_row(self) -> i32 {
        match self {
            FriendVariant::Horse => 0,
            FriendVariant::Goat => 1,
            FriendVariant::Cat => 2,
            FriendVariant::Bear => 3,
            FriendVariant::Kitten => 4,
            FriendVariant::Rabbit => 5,
            FriendVariant::Pig => 6,
        }
    }
}

/// Lifecycle of a friend slot.
///
/// `Invalid` and `Collected` are absorbing: such a slot never renders,
/// never collides and never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendState {
    /// Live on the map, waiting to be rescued
    Placed,
    /// Tombstoned at level load by the population cap
    Invalid,
    /// Rescued by the player
    Collected,
}

/// One friend slot in the arena.
#[derive(Debug, Clone)]
pub struct Friend {
    pub x: f32,
    pub y: f32,
    pub variant: FriendVariant,
    pub state: FriendState,
}

impl Friend {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, FRIEND_WIDTH, FRIEND_HEIGHT)
    }

    pub fn is_placed(&self) -> bool {
        self.state == FriendState::Placed
    }
}

/// What a successful collection reports back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct CollectOutcome {
    pub score_bonus: u32,
    /// True exactly once per session: the collection that emptied the map
    pub all_rescued: bool,
}

/// Counts how many friends are live on the map and owns their slots.
///
/// One counter exists per play session, owned by the game world and passed
/// by reference wherever it is needed. `reset` must be called exactly once
/// at session start - there is no internal guard, and skipping it would
/// leak counts across sessions.
#[derive(Debug, Default)]
pub struct RescueCounter {
    slots: Vec<Friend>,
    total: usize,
    rescued: u32,
}

impl RescueCounter {
    pub fn new() -> Self {
        RescueCounter::default()
    }

    /// Clears the arena and both counters.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.total = 0;
        self.rescued = 0;
    }

    /// Spawns a placed friend with a random variant; returns the new total.
    pub fn spawn(&mut self, x: f32, y: f32, rng: &mut impl Rng) -> usize {
        self.slots.push(Friend {
            x,
            y,
            variant: FriendVariant::random(rng),
            state: FriendState::Placed,
        });
        self.total += 1;
        self.total
    }

    /// How many friends are still waiting to be rescued.
    pub fn remaining(&self) -> usize {
        self.total
    }

    /// How many have been rescued so far this session.
    pub fn rescued(&self) -> u32 {
        self.rescued
    }

    /// The objective is complete when nobody is left waiting.
    pub fn were_rescued(&self) -> bool {
        self.total == 0
    }

    pub fn slots(&self) -> &[Friend] {
        &self.slots
    }

    /// Tombstones the slot at `index`. Only a `Placed` slot counts against
    /// the total, so tombstoning anything else leaves the counter alone.
    pub fn invalidate_at(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        if slot.state == FriendState::Placed {
            slot.state = FriendState::Invalid;
            self.total -= 1;
        }
    }

    /// Caps the live population at `max` by tombstoning random slots.
    ///
    /// Draws a uniformly-random index and redraws until it lands on a slot
    /// that is still placed, so an already-dead slot is never "removed"
    /// twice. Each round tombstones exactly one live slot, so the loop runs
    /// exactly `remaining() - max` times.
    pub fn limit_amount(&mut self, max: usize, rng: &mut impl Rng) {
        if self.remaining() <= max {
            return;
        }

        while self.remaining() > max {
            let mut index;
            loop {
                index = rng.gen_range(0..self.slots.len());
                if self.slots[index].is_placed() {
                    break;
                }
            }
            self.invalidate_at(index);
        }
    }

    /// Attempts to collect the slot at `index` (player contact).
    ///
    /// Anything but a `Placed` slot is a no-op returning `None`, which is
    /// what makes collection idempotent: the score bonus and the counter
    /// decrement can only happen once per slot.
    pub fn collect(&mut self, index: usize) -> Option<CollectOutcome> {
        if !self.slots[index].is_placed() {
            return None;
        }

        self.slots[index].state = FriendState::Collected;
        self.total -= 1;
        self.rescued += 1;

        Some(CollectOutcome {
            score_bonus: RESCUE_SCORE,
            all_rescued: self.total == 0,
        })
    }
}
