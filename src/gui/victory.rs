//! Victory Screen
//!
//! Shown when the last friend is rescued. Same overlay shape as the
//! game-over screen, friendlier palette.

use crate::text::{draw_text, TextAlign};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::{Duration, Instant};

pub struct VictoryScreen {
    overlay_alpha: u8,
    title_color: Color,
    score_color: Color,
    instruction_color: Color,
    accept_delay: Duration,
    shown_at: Option<Instant>,
}

impl VictoryScreen {
    pub fn new() -> Self {
        VictoryScreen {
            overlay_alpha: 180,
            title_color: Color::RGB(120, 230, 120),
            score_color: Color::RGB(255, 255, 100),
            instruction_color: Color::RGB(150, 150, 160),
            accept_delay: Duration::from_millis(400),
            shown_at: None,
        }
    }

    pub fn trigger(&mut self) {
        self.shown_at = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.shown_at = None;
    }

    pub fn ready(&self) -> bool {
        match self.shown_at {
            Some(at) => at.elapsed() >= self.accept_delay,
            None => false,
        }
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        final_score: u32,
        rescued: u32,
    ) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 30, self.overlay_alpha));
        canvas.fill_rect(Rect::new(
            0,
            0,
            canvas.logical_size().0,
            canvas.logical_size().1,
        ))?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let (screen_width, screen_height) = canvas.logical_size();
        let center_x = (screen_width / 2) as i32;
        let center_y = (screen_height / 2) as i32;

        draw_text(
            canvas,
            "EVERYONE IS SAFE!",
            center_x,
            center_y - 60,
            self.title_color,
            3,
            TextAlign::Center,
        )?;

        draw_text(
            canvas,
            &format!("FRIENDS RESCUED: {}", rescued),
            center_x,
            center_y,
            self.score_color,
            2,
            TextAlign::Center,
        )?;

        draw_text(
            canvas,
            &format!("SCORE: {}", final_score),
            center_x,
            center_y + 26,
            self.score_color,
            2,
            TextAlign::Center,
        )?;

        if self.ready() {
            draw_text(
                canvas,
                "PRESS ENTER TO PLAY AGAIN",
                center_x,
                center_y + 80,
                self.instruction_color,
                1,
                TextAlign::Center,
            )?;
        }

        Ok(())
    }
}

impl Default for VictoryScreen {
    fn default() -> Self {
        Self::new()
    }
}
