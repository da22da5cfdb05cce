// GameWorld: everything one play session owns
//
// The world owns the player, the rescue counter, the beetles and the
// camera, and runs the per-tick pipeline: input -> player intent ->
// physics -> contact responses -> camera. Session-wide numbers (score,
// pending screen transition) live here too, so nothing in the game is
// global state.

use crate::camera::Camera;
use crate::collision::{make_contact, Aabb, Contact, ContactKind};
use crate::enemy::Beetle;
use crate::friends::RescueCounter;
use crate::game::types::{tick_scale, GameEvent, GameState, GAME_HEIGHT, GAME_WIDTH};
use crate::audio::SoundCue;
use crate::input_system::{Action, InputSnapshot};
use crate::level::LevelConfig;
use crate::physics::{self, PhysicsConfig};
use crate::player::{Player, PlayerConfig};
use rand::Rng;

/// How long the respawn camera glide takes.
const RESPAWN_PAN_MS: f32 = 1000.0;
/// Game-over flourish: shake size and length, and how long the screen
/// switch waits for it.
const GAME_OVER_SHAKE_MAGNITUDE: f32 = 7.0;
const GAME_OVER_SHAKE_MS: f32 = 500.0;

pub struct GameWorld<'a> {
    pub player: Player<'a>,
    pub beetles: Vec<Beetle<'a>>,
    pub counter: RescueCounter,
    pub camera: Camera,
    pub level: LevelConfig,
    pub score: u32,
    solids: Vec<Aabb>,
    spikes: Vec<Aabb>,
    physics_config: PhysicsConfig,
    /// A screen change waiting for its timer (state, remaining ms)
    pending_transition: Option<(GameState, f32)>,
}

impl<'a> GameWorld<'a> {
    /// Builds a fresh session from a level description.
    ///
    /// This is the one place `RescueCounter::reset` is called: the counter
    /// fills from the level's friend placements and then gets capped, so
    /// which spots materialize differs run to run.
    pub fn new_session(level: LevelConfig, rng: &mut impl Rng) -> Self {
        let mut counter = RescueCounter::new();
        counter.reset();
        for &(x, y) in &level.friends {
            counter.spawn(x, y, rng);
        }
        counter.limit_amount(level.friend_cap, rng);

        let player_config = PlayerConfig::default();
        let physics_config = PhysicsConfig {
            max_vel_x: player_config.max_run_velocity,
            max_vel_y: player_config.max_jump_velocity,
            ..Default::default()
        };

        let player = Player::new(level.spawn.0, level.spawn.1, player_config);
        let beetles = level
            .enemies
            .iter()
            .map(|p| Beetle::new(p.x, p.y, p.range))
            .collect();
        let camera = Camera::new(
            GAME_WIDTH as f32,
            GAME_HEIGHT as f32,
            level.width,
            level.height,
        );
        let solids = level.solids.iter().map(|r| r.to_aabb()).collect();
        let spikes = level.spikes.iter().map(|r| r.to_aabb()).collect();

        GameWorld {
            player,
            beetles,
            counter,
            camera,
            level,
            score: 0,
            solids,
            spikes,
            physics_config,
            pending_transition: None,
        }
    }

    /// One simulation tick. Returns the facts the main loop reacts to
    /// (sound cues, victory, game over).
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.player.update(input, dt, &mut events);

        if self.player.is_active() {
            // The controller drives while a direction is held; otherwise
            // the step applies ground friction.
            let driving =
                input.is_pressed(Action::Left) || input.is_pressed(Action::Right);
            let result = physics::step(
                &mut self.player.body,
                &self.physics_config,
                !driving,
                &self.solids,
                tick_scale(dt),
            );
            self.player.after_physics(result);

            self.resolve_contacts(&mut events);
        }

        for beetle in self.beetles.iter_mut() {
            beetle.update(dt);
        }

        self.camera.update(dt, self.player.body.center());

        // Camera choreography and screen scheduling for this tick's facts
        for event in &events {
            match event {
                GameEvent::Respawned { to_center, .. } => {
                    self.camera.start_pan(*to_center, RESPAWN_PAN_MS);
                }
                GameEvent::GameOver => {
                    self.camera
                        .start_shake(GAME_OVER_SHAKE_MAGNITUDE, GAME_OVER_SHAKE_MS);
                    self.pending_transition =
                        Some((GameState::GameOver, GAME_OVER_SHAKE_MS));
                }
                GameEvent::Victory => {
                    self.pending_transition = Some((GameState::Victory, 0.0));
                }
                GameEvent::Sound(_) => {}
            }
        }

        events
    }

    /// Everything overlapping the player this tick, tagged by kind.
    fn scan_contacts(&self) -> Vec<Contact> {
        let player_box = self.player.aabb();
        let mut contacts = Vec::new();

        for (i, spike) in self.spikes.iter().enumerate() {
            contacts.extend(make_contact(&player_box, spike, ContactKind::Hazard, i));
        }
        for (i, beetle) in self.beetles.iter().enumerate() {
            contacts.extend(make_contact(
                &player_box,
                &beetle.aabb(),
                ContactKind::Enemy,
                i,
            ));
        }
        for (i, friend) in self.counter.slots().iter().enumerate() {
            if friend.is_placed() {
                contacts.extend(make_contact(
                    &player_box,
                    &friend.aabb(),
                    ContactKind::Friend,
                    i,
                ));
            }
        }

        contacts
    }

    /// Reacts to this tick's contacts. A hazard hit preempts everything
    /// else - the death fade owns the frame from there.
    fn resolve_contacts(&mut self, events: &mut Vec<GameEvent>) {
        let contacts = self.scan_contacts();

        if contacts.iter().any(|c| c.kind == ContactKind::Hazard) {
            self.player.resolve_hazard_contact();
            return;
        }

        if let Some(enemy) = contacts.iter().find(|c| c.kind == ContactKind::Enemy) {
            self.player.resolve_enemy_contact(enemy.vertical, events);
        }

        for contact in contacts.iter().filter(|c| c.kind == ContactKind::Friend) {
            if let Some(outcome) = self.counter.collect(contact.index) {
                self.score += outcome.score_bonus;
                events.push(GameEvent::Sound(SoundCue::Collect));
                if outcome.all_rescued {
                    events.push(GameEvent::Victory);
                }
            }
        }
    }

    /// Counts down the scheduled screen change; returns it when due.
    /// Poll once per frame from the main loop.
    pub fn take_due_transition(&mut self, dt: f32) -> Option<GameState> {
        let (state, remaining) = self.pending_transition.as_mut()?;
        *remaining -= dt * 1000.0;
        if *remaining <= 0.0 {
            let state = *state;
            self.pending_transition = None;
            Some(state)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{PatrolDef, RectDef};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(21)
    }

    fn flat_level(friends: Vec<(f32, f32)>, spikes: Vec<RectDef>) -> LevelConfig {
        LevelConfig {
            name: "test".to_string(),
            width: 640.0,
            height: 360.0,
            spawn: (50.0, 257.0),
            friend_cap: 99,
            solids: vec![RectDef::new(0.0, 320.0, 640.0, 40.0)],
            spikes,
            enemies: Vec::<PatrolDef>::new(),
            friends,
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_session_spawns_friends_up_to_the_cap() {
        let mut level = flat_level(
            (0..10).map(|i| (i as f32 * 60.0, 270.0)).collect(),
            vec![],
        );
        level.friend_cap = 4;

        let world = GameWorld::new_session(level, &mut rng());
        assert_eq!(world.counter.remaining(), 4);
        assert_eq!(world.counter.slots().len(), 10);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_player_settles_onto_the_ground() {
        let level = flat_level(vec![], vec![]);
        let mut world = GameWorld::new_session(level, &mut rng());
        let mut input = InputSnapshot::new();

        for _ in 0..30 {
            input.advance_with(&[]);
            world.update(&input, DT);
        }

        assert_eq!(world.player.body.y, 320.0 - 63.0);
        assert!(world.player.standing);
        assert!(!world.player.falling);
    }

    #[test]
    fn test_touching_a_friend_scores_and_counts_down() {
        // One friend right on top of the spawn point
        let level = flat_level(vec![(60.0, 270.0), (400.0, 270.0)], vec![]);
        let mut world = GameWorld::new_session(level, &mut rng());
        let mut input = InputSnapshot::new();

        input.advance_with(&[]);
        let events = world.update(&input, DT);

        assert_eq!(world.score, 100);
        assert_eq!(world.counter.remaining(), 1);
        assert!(events.contains(&GameEvent::Sound(SoundCue::Collect)));
        assert!(!events.contains(&GameEvent::Victory));

        // Lingering on the same spot can't collect twice
        input.advance_with(&[]);
        world.update(&input, DT);
        assert_eq!(world.score, 100);
    }

    #[test]
    fn test_rescuing_the_last_friend_wins() {
        let level = flat_level(vec![(60.0, 270.0)], vec![]);
        let mut world = GameWorld::new_session(level, &mut rng());
        let mut input = InputSnapshot::new();

        input.advance_with(&[]);
        let events = world.update(&input, DT);

        assert!(events.contains(&GameEvent::Victory));
        assert!(world.counter.were_rescued());
        assert_eq!(world.take_due_transition(DT), Some(GameState::Victory));
        assert_eq!(world.take_due_transition(DT), None);
    }

    #[test]
    fn test_spikes_kill_and_game_over_waits_for_the_shake() {
        // Spike strip under the spawn, no lives left
        let level = flat_level(vec![], vec![RectDef::new(40.0, 304.0, 64.0, 16.0)]);
        let mut world = GameWorld::new_session(level, &mut rng());
        world.player.lives = 0;
        let mut input = InputSnapshot::new();

        // Fall into the spikes
        let mut died = false;
        for _ in 0..20 {
            input.advance_with(&[]);
            world.update(&input, DT);
            if world.player.dying {
                died = true;
                break;
            }
        }
        assert!(died);

        // Ride out fade + shake; the transition must arrive exactly once
        let mut transitions = Vec::new();
        for _ in 0..80 {
            input.advance_with(&[]);
            world.update(&input, DT);
            if let Some(state) = world.take_due_transition(DT) {
                transitions.push(state);
            }
        }
        assert_eq!(transitions, vec![GameState::GameOver]);
        assert!(!world.player.alive);
    }

    #[test]
    fn test_respawn_starts_the_camera_pan() {
        let level = flat_level(vec![], vec![RectDef::new(40.0, 304.0, 64.0, 16.0)]);
        let mut world = GameWorld::new_session(level, &mut rng());
        let mut input = InputSnapshot::new();

        let mut respawned = false;
        for _ in 0..60 {
            input.advance_with(&[]);
            let events = world.update(&input, DT);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::Respawned { .. }))
            {
                respawned = true;
                assert!(!world.camera.is_following());
                break;
            }
        }
        assert!(respawned);
        assert_eq!(world.player.lives, 2);
    }
}
