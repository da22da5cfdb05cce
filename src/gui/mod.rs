// GUI module - full-screen overlay screens

mod game_over;
mod victory;

pub use game_over::GameOverScreen;
pub use victory::VictoryScreen;
