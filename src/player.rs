//! The player character
//!
//! Owns the whole movement & combat state machine: walking/running with a
//! variable-height jump, health and lives, the invincibility window after
//! getting hit, and the two-phase death sequence (fade out, then respawn
//! or game over). The update runs once per simulation tick; the physics
//! step and the contact scan feed their results back in afterwards.

use crate::animation::{select_animation, AnimationController, AnimationState, PoseFlags};
use crate::collision::Aabb;
use crate::game::types::{tick_scale, GameEvent};
use crate::audio::SoundCue;
use crate::input_system::{Action, InputSnapshot};
use crate::physics::{Kinematics, StepResult};
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Collision box: the 32x64 sprite minus 7px of transparent margin on each
/// side and 1px at the feet.
pub const PLAYER_WIDTH: f32 = 18.0;
pub const PLAYER_HEIGHT: f32 = 63.0;

const SPRITE_WIDTH: u32 = 32;
const SPRITE_HEIGHT: u32 = 64;
const SPRITE_OFFSET_X: i32 = -7;
const SPRITE_OFFSET_Y: i32 = -1;

/// Movement and combat tunables. Velocities are pixels per 60 Hz tick,
/// durations in milliseconds.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub accel_x: f32,
    pub max_walk_velocity: f32,
    pub max_run_velocity: f32,
    /// Upward launch speed; also the vertical velocity cap
    pub max_jump_velocity: f32,
    /// |vel.x| at or below this counts as standing still
    pub standing_threshold: f32,
    /// How long holding jump keeps re-applying the launch speed
    pub jump_hold_window_ms: f32,
    pub hurt_invincibility_ms: f32,
    pub respawn_invincibility_ms: f32,
    /// Fade-out length of the first death phase
    pub death_fade_ms: f32,
    /// Horizontal knockback, as a multiple of the run cap
    pub knockback_factor: f32,
    pub max_health: i32,
    pub starting_lives: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            accel_x: 0.9,
            max_walk_velocity: 3.1,
            max_run_velocity: 5.0,
            max_jump_velocity: 10.0,
            standing_threshold: 0.2,
            jump_hold_window_ms: 150.0,
            hurt_invincibility_ms: 750.0,
            respawn_invincibility_ms: 2000.0,
            death_fade_ms: 500.0,
            knockback_factor: 3.0,
            max_health: 5,
            starting_lives: 3,
        }
    }
}

pub struct Player<'a> {
    pub body: Kinematics,
    spawn_x: f32,
    spawn_y: f32,

    // Movement flags - how the player is behaving right now
    pub standing: bool,
    pub running: bool,
    pub jumping: bool,
    pub falling: bool,
    pub facing_left: bool,

    /// Remaining invincibility, 0 when vulnerable
    pub invincible_ms: f32,
    /// Time since the last ground jump; gates the hold reinforcement
    jump_timer_ms: f32,

    /// The fade-out phase of a death is running; everything else pauses
    pub dying: bool,
    death_elapsed_ms: f32,

    /// Cleared for good when the last life is spent
    pub alive: bool,
    pub health: i32,
    pub lives: i32,

    pub config: PlayerConfig,
    animation_controller: AnimationController<'a>,
}

impl<'a> Player<'a> {
    pub fn new(x: f32, y: f32, config: PlayerConfig) -> Self {
        Player {
            body: Kinematics::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            spawn_x: x,
            spawn_y: y,
            standing: true,
            running: false,
            jumping: false,
            falling: false,
            facing_left: false,
            invincible_ms: 0.0,
            // Far in the past, so a walk off a ledge can't buy jump height
            jump_timer_ms: f32::MAX,
            dying: false,
            death_elapsed_ms: 0.0,
            alive: true,
            health: config.max_health,
            lives: config.starting_lives,
            config,
            animation_controller: AnimationController::new(),
        }
    }

    pub fn set_animation_controller(&mut self, controller: AnimationController<'a>) {
        self.animation_controller = controller;
    }

    /// Whether the simulation should move and collide this body.
    /// False while dying (the fade owns the frame) and after game over.
    pub fn is_active(&self) -> bool {
        self.alive && !self.dying
    }

    /// Runs the input half of the tick. Returns whether the player needs
    /// to be redrawn.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32, events: &mut Vec<GameEvent>) -> bool {
        if !self.alive {
            return false;
        }

        let dt_ms = dt * 1000.0;

        // Death fade in progress: the update is a pure skip until the
        // timer crosses the fade length, then the real death happens.
        if self.dying {
            self.death_elapsed_ms += dt_ms;
            if self.death_elapsed_ms >= self.config.death_fade_ms {
                self.die_for_real(events);
            }
            return true;
        }

        if self.invincible_ms > 0.0 {
            self.invincible_ms = (self.invincible_ms - dt_ms).max(0.0);
        }

        self.running = input.is_pressed(Action::Boost);

        self.handle_jump(input, dt_ms, events);

        let mut walked_this_frame = false;

        if input.is_pressed(Action::Left) {
            self.standing = false;
            self.facing_left = true;
            walked_this_frame = true;
        } else if input.is_pressed(Action::Right) {
            self.standing = false;
            self.facing_left = false;
            walked_this_frame = true;
        } else if self.body.vel_x.abs() <= self.config.standing_threshold {
            // Friction handles the slowdown; we just notice when it's done
            self.standing = true;
        }

        if !self.standing && walked_this_frame {
            let speed_increase = self.config.accel_x * tick_scale(dt);
            self.body.vel_x += if self.facing_left {
                -speed_increase
            } else {
                speed_increase
            };

            // Running reaches the hard cap on its own; walking gets
            // clamped down here.
            if !self.running {
                self.body.vel_x = self
                    .body
                    .vel_x
                    .clamp(-self.config.max_walk_velocity, self.config.max_walk_velocity);
            }
        }

        let pose = self.animation_state();
        self.animation_controller.set_state(pose);
        self.animation_controller.update();

        true
    }

    /// Variable-height jump: the launch applies the full upward speed, and
    /// holding the key keeps re-applying it until the hold window closes.
    fn handle_jump(&mut self, input: &InputSnapshot, dt_ms: f32, events: &mut Vec<GameEvent>) {
        let wants_jump = input.is_pressed(Action::Jump);
        let on_ground = !self.falling && !self.jumping;

        if self.jump_timer_ms < f32::MAX {
            self.jump_timer_ms += dt_ms;
        }

        if on_ground && wants_jump {
            self.jumping = true;
            self.body.vel_y = -self.config.max_jump_velocity;
            self.jump_timer_ms = 0.0;
            events.push(GameEvent::Sound(SoundCue::Jump));
        } else if !on_ground && wants_jump && self.jump_timer_ms < self.config.jump_hold_window_ms {
            self.body.vel_y = -self.config.max_jump_velocity;
        }

        // Long-standing quirk, kept on purpose: holding jump suppresses
        // the standing pose even while grounded.
        if wants_jump {
            self.standing = false;
        }
    }

    /// Feeds the solid-collision outcome back into the movement flags.
    pub fn after_physics(&mut self, result: StepResult) {
        if result.on_ground {
            self.jumping = false;
            self.falling = false;
        } else {
            self.falling = self.body.vel_y > 0.0;
            if self.falling {
                self.jumping = false;
            }
        }

        // A head bump ends the jump: close the hold window so the next
        // ticks can't keep pushing into the ceiling
        if result.hit_ceiling {
            self.jump_timer_ms = self.config.jump_hold_window_ms;
        }
    }

    /// Spike strips kill outright.
    pub fn resolve_hazard_contact(&mut self) {
        self.die();
    }

    /// Enemy contact: a stomp from above bounces, anything else hurts.
    ///
    /// `vertical` is the signed component from the contact scan - positive
    /// means the player came down on top of the enemy.
    pub fn resolve_enemy_contact(&mut self, vertical: f32, events: &mut Vec<GameEvent>) {
        if !self.is_active() {
            return;
        }

        if vertical > 0.0 && !self.jumping {
            // Bounce off its back
            self.falling = false;
            self.body.vel_y = -self.config.max_jump_velocity;
            self.jumping = true;
            events.push(GameEvent::Sound(SoundCue::Stomp));
            return;
        }

        if self.invincible_ms > 0.0 {
            return;
        }

        self.health -= 1;
        if self.health <= 0 {
            self.die();
            return;
        }

        // Thrown back a la Castlevania: away from current motion, with a
        // pop upward. The physics clamp caps what actually survives.
        let max_x = self.config.max_run_velocity;
        self.body.vel_x = self.config.knockback_factor
            * if self.body.vel_x > 0.0 { -max_x } else { max_x };
        self.body.vel_y = -self.config.max_jump_velocity;
        self.jumping = true;
        self.invincible_ms = self.config.hurt_invincibility_ms;
    }

    /// Starts the death sequence: a short fade with the simulation paused,
    /// after which `die_for_real` settles the outcome. Re-entry while the
    /// fade runs is a no-op, so one death can't count twice.
    pub fn die(&mut self) {
        if self.dying || !self.alive {
            return;
        }
        self.dying = true;
        self.death_elapsed_ms = 0.0;
    }

    /// Second phase of the death: spend a life, then either respawn or end
    /// the game. Only `update` calls this, once the fade has played out.
    fn die_for_real(&mut self, events: &mut Vec<GameEvent>) {
        self.dying = false;
        self.lives -= 1;

        if self.lives >= 0 {
            let from_center = self.body.center();

            self.body.x = self.spawn_x;
            self.body.y = self.spawn_y;
            self.body.vel_x = 0.0;
            self.body.vel_y = 0.0;
            self.standing = true;
            self.jumping = false;
            self.falling = false;
            self.health = self.config.max_health;
            self.invincible_ms = self.config.respawn_invincibility_ms;

            events.push(GameEvent::Respawned {
                from_center,
                to_center: self.body.center(),
            });
            return;
        }

        // Out of lives
        self.alive = false;
        events.push(GameEvent::GameOver);
    }

    fn pose_flags(&self) -> PoseFlags {
        PoseFlags {
            jumping: self.jumping,
            falling: self.falling,
            standing: self.standing,
            running: self.running,
        }
    }

    /// The pose the priority order picks for the current flags.
    pub fn animation_state(&self) -> AnimationState {
        select_animation(&self.pose_flags())
    }

    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }

    #[allow(dead_code)] // Reserved for future position queries
    pub fn position(&self) -> (f32, f32) {
        (self.body.x, self.body.y)
    }

    fn sprite_visible(&self) -> bool {
        if self.dying {
            // The fade is approximated with a blink that speeds up
            return (self.death_elapsed_ms / 60.0) as i32 % 2 == 0;
        }
        if self.invincible_ms > 0.0 {
            return (self.invincible_ms / 100.0) as i32 % 2 == 0;
        }
        true
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        offset_x: i32,
        offset_y: i32,
    ) -> Result<(), String> {
        if !self.alive || !self.sprite_visible() {
            return Ok(());
        }

        let dest_rect = Rect::new(
            self.body.x as i32 + SPRITE_OFFSET_X + offset_x,
            self.body.y as i32 + SPRITE_OFFSET_Y + offset_y,
            SPRITE_WIDTH,
            SPRITE_HEIGHT,
        );

        if let Some(sprite_sheet) = self.animation_controller.get_current_sprite_sheet() {
            sprite_sheet.render(canvas, dest_rect, self.facing_left)
        } else {
            canvas.set_draw_color(sdl2::pixels::Color::RGB(80, 140, 220));
            canvas.fill_rect(dest_rect).map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 15.625ms ticks: exactly representable in f32, so the millisecond
    // timers accumulate without rounding drift
    const DT: f32 = 1.0 / 64.0;

    fn player() -> Player<'static> {
        Player::new(48.0, 257.0, PlayerConfig::default())
    }

    fn hold_jump(input: &mut InputSnapshot) {
        input.advance_with(&[Action::Jump]);
    }

    #[test]
    fn test_ground_jump_launches_upward_and_plays_cue() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        hold_jump(&mut input);
        p.update(&input, DT, &mut events);

        assert!(p.jumping);
        assert_eq!(p.body.vel_y, -p.config.max_jump_velocity);
        assert!(events.contains(&GameEvent::Sound(SoundCue::Jump)));
    }

    #[test]
    fn test_holding_jump_reinforces_only_inside_the_window() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        hold_jump(&mut input);
        p.update(&input, DT, &mut events); // launch at t=0

        // Airborne now. The 150ms window covers the first nine 15.625ms
        // ticks: the hold keeps resetting vel_y even if gravity has eaten
        // into it.
        for _ in 0..9 {
            hold_jump(&mut input);
            p.body.vel_y = -3.0; // pretend gravity slowed us
            p.update(&input, DT, &mut events);
            assert_eq!(p.body.vel_y, -p.config.max_jump_velocity);
        }

        // Past the window (10 * 15.625ms > 150ms): holding does nothing
        hold_jump(&mut input);
        p.body.vel_y = -3.0;
        p.update(&input, DT, &mut events);
        assert_eq!(p.body.vel_y, -3.0);
    }

    #[test]
    fn test_holding_jump_suppresses_standing_even_on_the_ground() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        // Land the jump flags first so we're "on the ground" again
        p.after_physics(StepResult {
            on_ground: true,
            ..Default::default()
        });
        assert!(!p.jumping);

        hold_jump(&mut input);
        p.update(&input, DT, &mut events);
        assert!(!p.standing);
    }

    #[test]
    fn test_walking_clamps_to_walk_cap_running_does_not() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        for _ in 0..30 {
            input.advance_with(&[Action::Right]);
            p.update(&input, DT, &mut events);
        }
        assert_eq!(p.body.vel_x, p.config.max_walk_velocity);

        for _ in 0..30 {
            input.advance_with(&[Action::Right, Action::Boost]);
            p.update(&input, DT, &mut events);
        }
        assert!(p.body.vel_x > p.config.max_walk_velocity);
    }

    #[test]
    fn test_standing_rearms_when_velocity_settles() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        input.advance_with(&[Action::Right]);
        p.update(&input, DT, &mut events);
        assert!(!p.standing);

        // No input, velocity nearly stopped (friction's work)
        p.body.vel_x = 0.1;
        input.advance_with(&[]);
        p.update(&input, DT, &mut events);
        assert!(p.standing);
    }

    #[test]
    fn test_stomp_from_above_bounces_instead_of_hurting() {
        let mut p = player();
        let mut events = Vec::new();
        p.falling = true;
        p.jumping = false;

        p.resolve_enemy_contact(4.0, &mut events);

        assert_eq!(p.health, p.config.max_health);
        assert!(p.jumping);
        assert!(!p.falling);
        assert_eq!(p.body.vel_y, -p.config.max_jump_velocity);
        assert!(events.contains(&GameEvent::Sound(SoundCue::Stomp)));
    }

    #[test]
    fn test_side_contact_costs_health_and_knocks_back() {
        let mut p = player();
        let mut events = Vec::new();
        p.body.vel_x = 2.0; // moving right when hit

        p.resolve_enemy_contact(-3.0, &mut events);

        assert_eq!(p.health, p.config.max_health - 1);
        assert_eq!(
            p.body.vel_x,
            -p.config.knockback_factor * p.config.max_run_velocity
        );
        assert!(p.jumping);
        assert_eq!(p.invincible_ms, p.config.hurt_invincibility_ms);
    }

    #[test]
    fn test_invincibility_suppresses_damage_then_expires() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        p.resolve_enemy_contact(-3.0, &mut events);
        assert_eq!(p.health, p.config.max_health - 1);

        // A second hit during the window does nothing
        p.resolve_enemy_contact(-3.0, &mut events);
        assert_eq!(p.health, p.config.max_health - 1);

        // Let the window run out (750ms is 48 ticks)
        for _ in 0..50 {
            input.advance_with(&[]);
            p.update(&input, DT, &mut events);
        }
        assert_eq!(p.invincible_ms, 0.0);

        p.resolve_enemy_contact(-3.0, &mut events);
        assert_eq!(p.health, p.config.max_health - 2);
    }

    #[test]
    fn test_fatal_hit_starts_the_death_fade() {
        let mut p = player();
        let mut events = Vec::new();
        p.health = 1;

        p.resolve_enemy_contact(-3.0, &mut events);

        assert!(p.dying);
        assert!(!p.is_active());
    }

    #[test]
    fn test_death_fade_then_respawn_restores_everything() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        p.body.x = 900.0;
        p.body.y = 100.0;
        p.health = 1;
        p.resolve_enemy_contact(-3.0, &mut events);
        assert!(p.dying);

        // Ride out the 500ms fade, stopping on the respawn tick
        for _ in 0..40 {
            input.advance_with(&[]);
            p.update(&input, DT, &mut events);
            if !p.dying {
                break;
            }
        }

        assert!(!p.dying);
        assert_eq!(p.lives, p.config.starting_lives - 1);
        assert_eq!(p.position(), (48.0, 257.0));
        assert_eq!(p.health, p.config.max_health);
        assert_eq!(p.invincible_ms, p.config.respawn_invincibility_ms);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Respawned { .. })));
    }

    #[test]
    fn test_dying_is_a_mutual_exclusion_region() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();

        p.die();
        // A spike hit mid-fade must not restart or double the sequence
        for _ in 0..20 {
            input.advance_with(&[]);
            p.update(&input, DT, &mut events);
            p.die();
        }
        for _ in 0..20 {
            input.advance_with(&[]);
            p.update(&input, DT, &mut events);
        }

        // Exactly one life spent
        assert_eq!(p.lives, p.config.starting_lives - 1);
    }

    #[test]
    fn test_last_life_triggers_game_over_exactly_once() {
        let mut p = player();
        let mut input = InputSnapshot::new();
        let mut events = Vec::new();
        p.lives = 0;

        p.die();
        for _ in 0..40 {
            input.advance_with(&[]);
            p.update(&input, DT, &mut events);
        }

        assert_eq!(p.lives, -1);
        assert!(!p.alive);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver))
            .count();
        assert_eq!(game_overs, 1);

        // Dead players don't update and can't die again
        events.clear();
        input.advance_with(&[Action::Jump]);
        assert!(!p.update(&input, DT, &mut events));
        p.die();
        assert!(!p.dying);
        assert!(events.is_empty());
    }

    #[test]
    fn test_animation_priority_prefers_jumping() {
        let mut p = player();
        p.jumping = true;
        p.standing = true;
        assert_eq!(p.animation_state(), AnimationState::Jumping);

        p.jumping = false;
        p.falling = true;
        p.running = true;
        assert_eq!(p.animation_state(), AnimationState::Falling);
    }

    #[test]
    fn test_hazard_contact_kills_outright() {
        let mut p = player();
        p.resolve_hazard_contact();
        assert!(p.dying);
    }
}
