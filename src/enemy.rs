use crate::animation::{AnimationController, AnimationState};
use crate::collision::Aabb;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

#[derive(Debug, Clone, Copy, PartialEq)]
enum BeetleBehavior {
    Walking,
    Turning,
}

/// A ground beetle that walks its patrol strip back and forth.
///
/// Beetles are pure obstacles: the player either bounces off their back or
/// takes contact damage. They can't be hurt and never leave their strip.
pub struct Beetle<'a> {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing_left: bool,
    origin_x: f32,
    range: f32,
    speed: f32,
    behavior: BeetleBehavior,
    behavior_elapsed: f32, // seconds in the current behavior
    turn_pause: f32,
    animation_controller: AnimationController<'a>,
}

impl<'a> Beetle<'a> {
    pub fn new(x: f32, y: f32, range: f32) -> Self {
        Beetle {
            x,
            y,
            width: 32.0,
            height: 32.0,
            facing_left: false,
            origin_x: x,
            range,
            speed: 1.2,
            behavior: BeetleBehavior::Walking,
            behavior_elapsed: 0.0,
            turn_pause: 0.35,
            animation_controller: AnimationController::new(),
        }
    }

    pub fn set_animation_controller(&mut self, controller: AnimationController<'a>) {
        self.animation_controller = controller;
    }

    pub fn update(&mut self, dt: f32) {
        let tick = dt * 60.0;
        self.behavior_elapsed += dt;

        match self.behavior {
            BeetleBehavior::Walking => {
                let direction = if self.facing_left { -1.0 } else { 1.0 };
                self.x += direction * self.speed * tick;

                // Pause at either end of the strip before turning around
                if self.x <= self.origin_x {
                    self.x = self.origin_x;
                    self.behavior = BeetleBehavior::Turning;
                    self.behavior_elapsed = 0.0;
                } else if self.x >= self.origin_x + self.range {
                    self.x = self.origin_x + self.range;
                    self.behavior = BeetleBehavior::Turning;
                    self.behavior_elapsed = 0.0;
                }
            }
            BeetleBehavior::Turning => {
                if self.behavior_elapsed >= self.turn_pause {
                    self.facing_left = !self.facing_left;
                    self.behavior = BeetleBehavior::Walking;
                    self.behavior_elapsed = 0.0;
                }
            }
        }

        if self.animation_controller.current_state() != &AnimationState::Walking {
            self.animation_controller.set_state(AnimationState::Walking);
        }
        self.animation_controller.update();
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        offset_x: i32,
        offset_y: i32,
    ) -> Result<(), String> {
        let dest_rect = Rect::new(
            self.x as i32 + offset_x,
            self.y as i32 + offset_y,
            self.width as u32,
            self.height as u32,
        );

        if let Some(sprite_sheet) = self.animation_controller.get_current_sprite_sheet() {
            sprite_sheet.render(canvas, dest_rect, self.facing_left)
        } else {
            canvas.set_draw_color(sdl2::pixels::Color::RGB(140, 40, 40));
            canvas.fill_rect(dest_rect).map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patrol_stays_within_its_strip() {
        let mut beetle = Beetle::new(100.0, 288.0, 150.0);

        for _ in 0..2000 {
            beetle.update(1.0 / 60.0);
            assert!(beetle.x >= 100.0);
            assert!(beetle.x <= 250.0);
        }
    }

    #[test]
    fn test_beetle_turns_around_at_the_far_edge() {
        let mut beetle = Beetle::new(0.0, 288.0, 60.0);
        assert!(!beetle.facing_left);

        // Walk until the edge is reached and the turn pause has played out
        for _ in 0..240 {
            beetle.update(1.0 / 60.0);
            if beetle.facing_left {
                break;
            }
        }

        assert!(beetle.facing_left);
    }
}
