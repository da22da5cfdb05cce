// UI module - in-world displays that read published game state each frame

mod hud;

pub use hud::{Hud, HudStyle};
