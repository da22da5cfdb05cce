//! Heads-up display
//!
//! Reads the published session counters every frame and draws them over
//! the scene: health pips and lives top-left, score bottom-right with the
//! remaining-friends line above it. The remaining line disappears entirely
//! once everyone is rescued.
//!
//! Text strings are cached and only reformatted when the underlying value
//! changes, so the per-frame cost is a couple of comparisons.

use crate::game::types::{GAME_HEIGHT, GAME_WIDTH};
use crate::text::{draw_text, TextAlign};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Configuration for HUD appearance
#[derive(Debug, Clone)]
pub struct HudStyle {
    /// Distance from the screen edges in pixels
    pub margin: i32,

    /// Side length of one health pip
    pub pip_size: u32,

    /// Gap between pips
    pub pip_spacing: i32,

    /// Filled pip color
    pub health_color: Color,

    /// Depleted pip color
    pub empty_color: Color,

    /// Score and remaining-counter text color
    pub counter_color: Color,

    /// Lives line color
    pub lives_color: Color,
}

impl Default for HudStyle {
    fn default() -> Self {
        HudStyle {
            margin: 8,
            pip_size: 10,
            pip_spacing: 13,
            health_color: Color::RGB(220, 60, 60),
            empty_color: Color::RGB(60, 60, 70),
            counter_color: Color::RGB(255, 255, 255),
            lives_color: Color::RGB(255, 220, 120),
        }
    }
}

pub struct Hud {
    style: HudStyle,
    last_score: Option<u32>,
    score_text: String,
    last_remaining: Option<usize>,
    remaining_text: String,
    last_lives: Option<i32>,
    lives_text: String,
}

impl Hud {
    pub fn new() -> Self {
        Hud {
            style: HudStyle::default(),
            last_score: None,
            score_text: String::new(),
            last_remaining: None,
            remaining_text: String::new(),
            last_lives: None,
            lives_text: String::new(),
        }
    }

    #[allow(dead_code)] // Reserved for themed levels
    pub fn with_style(style: HudStyle) -> Self {
        Hud {
            style,
            ..Hud::new()
        }
    }

    /// Refreshes the cached strings from the session counters.
    pub fn update(&mut self, score: u32, remaining: usize, lives: i32) {
        if self.last_score != Some(score) {
            self.last_score = Some(score);
            self.score_text = format!("{}", score);
        }

        if self.last_remaining != Some(remaining) {
            self.last_remaining = Some(remaining);
            self.remaining_text = if remaining == 0 {
                String::new()
            } else {
                format!("REMAINING: {}", remaining)
            };
        }

        if self.last_lives != Some(lives) {
            self.last_lives = Some(lives);
            self.lives_text = format!("LIVES: {}", lives.max(0));
        }
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        health: i32,
        max_health: i32,
    ) -> Result<(), String> {
        let style = &self.style;

        // Health pips, one square per point
        for i in 0..max_health {
            let color = if i < health {
                style.health_color
            } else {
                style.empty_color
            };
            canvas.set_draw_color(color);
            canvas.fill_rect(Rect::new(
                style.margin + i * style.pip_spacing,
                style.margin,
                style.pip_size,
                style.pip_size,
            ))?;
        }

        draw_text(
            canvas,
            &self.lives_text,
            style.margin,
            style.margin + style.pip_size as i32 + 6,
            style.lives_color,
            1,
            TextAlign::Left,
        )?;

        // Score, flush against the bottom-right corner
        draw_text(
            canvas,
            &self.score_text,
            GAME_WIDTH as i32 - style.margin,
            GAME_HEIGHT as i32 - style.margin - 14,
            style.counter_color,
            2,
            TextAlign::Right,
        )?;

        // Friends still waiting, right above the score (empty when done)
        if !self.remaining_text.is_empty() {
            draw_text(
                canvas,
                &self.remaining_text,
                GAME_WIDTH as i32 - style.margin,
                GAME_HEIGHT as i32 - style.margin - 32,
                self.style.counter_color,
                1,
                TextAlign::Right,
            )?;
        }

        Ok(())
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_text_tracks_values() {
        let mut hud = Hud::new();

        hud.update(300, 4, 2);
        assert_eq!(hud.score_text, "300");
        assert_eq!(hud.remaining_text, "REMAINING: 4");
        assert_eq!(hud.lives_text, "LIVES: 2");

        // Unchanged values keep the same strings
        hud.update(300, 4, 2);
        assert_eq!(hud.score_text, "300");
    }

    #[test]
    fn test_remaining_line_hides_at_zero() {
        let mut hud = Hud::new();
        hud.update(700, 0, 3);
        assert!(hud.remaining_text.is_empty());
    }

    #[test]
    fn test_negative_lives_display_as_zero() {
        // Game over shows an honest zero rather than a minus one
        let mut hud = Hud::new();
        hud.update(0, 1, -1);
        assert_eq!(hud.lives_text, "LIVES: 0");
    }
}
