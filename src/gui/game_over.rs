//! Game Over Screen
//!
//! Shown when the last life is spent. Darkens the frozen scene, announces
//! the bad news and waits for Enter. A short arming delay keeps a jump
//! button mashed at the moment of death from skipping the screen.

use crate::text::{draw_text, TextAlign};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::{Duration, Instant};

/// Configuration for game-over screen appearance
#[derive(Debug, Clone)]
pub struct GameOverStyle {
    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    /// "GAME OVER" text color
    pub title_color: Color,

    /// Final score color
    pub score_color: Color,

    /// Instruction text color
    pub instruction_color: Color,
}

impl Default for GameOverStyle {
    fn default() -> Self {
        GameOverStyle {
            overlay_alpha: 220,
            title_color: Color::RGB(255, 50, 50),
            score_color: Color::RGB(255, 255, 100),
            instruction_color: Color::RGB(150, 150, 160),
        }
    }
}

pub struct GameOverScreen {
    style: GameOverStyle,
    accept_delay: Duration,
    shown_at: Option<Instant>,
}

impl GameOverScreen {
    pub fn new() -> Self {
        GameOverScreen {
            style: GameOverStyle::default(),
            accept_delay: Duration::from_millis(400),
            shown_at: None,
        }
    }

    /// Arms the screen (starts the accept delay). Call on entry.
    pub fn trigger(&mut self) {
        self.shown_at = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.shown_at = None;
    }

    /// Whether Enter should be honored yet.
    pub fn ready(&self) -> bool {
        match self.shown_at {
            Some(at) => at.elapsed() >= self.accept_delay,
            None => false,
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, final_score: u32) -> Result<(), String> {
        // Dark overlay over the frozen scene
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
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
            "GAME OVER",
            center_x,
            center_y - 60,
            self.style.title_color,
            4,
            TextAlign::Center,
        )?;

        draw_text(
            canvas,
            &format!("SCORE: {}", final_score),
            center_x,
            center_y + 10,
            self.style.score_color,
            2,
            TextAlign::Center,
        )?;

        if self.ready() {
            draw_text(
                canvas,
                "PRESS ENTER TO TRY AGAIN",
                center_x,
                center_y + 80,
                self.style.instruction_color,
                1,
                TextAlign::Center,
            )?;
        }

        Ok(())
    }
}

impl Default for GameOverScreen {
    fn default() -> Self {
        Self::new()
    }
}
