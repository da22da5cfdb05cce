//! Level descriptions
//!
//! A level is a flat JSON document: pixel bounds, the player spawn point,
//! solid rectangles, spike strips, beetle patrols and the spots where a
//! friend *could* appear (the cap decides how many actually do). This is
//! deliberately not a tile-map format - the layout ships as plain rects so
//! the file stays hand-editable and the loader stays a serde call.

use crate::collision::Aabb;
use serde::{Deserialize, Serialize};

/// A rectangle in level pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectDef {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        RectDef { x, y, w, h }
    }

    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }
}

/// A beetle patrol: anchor position plus how far right it walks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatrolDef {
    pub x: f32,
    pub y: f32,
    pub range: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    /// Level extent in pixels (also the camera bounds)
    pub width: f32,
    pub height: f32,
    /// Player spawn, top-left of the collision box
    pub spawn: (f32, f32),
    /// Maximum number of friends that materialize out of the placements
    pub friend_cap: usize,
    pub solids: Vec<RectDef>,
    pub spikes: Vec<RectDef>,
    pub enemies: Vec<PatrolDef>,
    /// Candidate friend positions, top-left corners
    pub friends: Vec<(f32, f32)>,
}

impl LevelConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: LevelConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The built-in area, used whenever no level file ships next to the
    /// binary. A 1600px strip: two spike pits, a platform staircase, three
    /// beetle patrols and a dozen friend spots capped at seven.
    pub fn demo() -> Self {
        LevelConfig {
            name: "area01".to_string(),
            width: 1600.0,
            height: 400.0,
            spawn: (48.0, 257.0),
            friend_cap: 7,
            solids: vec![
                // Ground segments with two pit gaps
                RectDef::new(0.0, 320.0, 520.0, 80.0),
                RectDef::new(584.0, 320.0, 436.0, 80.0),
                RectDef::new(1100.0, 320.0, 500.0, 80.0),
                // Pit floors (the spikes sit on these)
                RectDef::new(520.0, 392.0, 64.0, 8.0),
                RectDef::new(1020.0, 392.0, 80.0, 8.0),
                // Platforms
                RectDef::new(200.0, 240.0, 120.0, 16.0),
                RectDef::new(400.0, 180.0, 96.0, 16.0),
                RectDef::new(620.0, 232.0, 112.0, 16.0),
                RectDef::new(820.0, 160.0, 96.0, 16.0),
                RectDef::new(960.0, 248.0, 128.0, 16.0),
                RectDef::new(1200.0, 224.0, 120.0, 16.0),
                RectDef::new(1380.0, 152.0, 96.0, 16.0),
                // Boundary walls
                RectDef::new(-16.0, 0.0, 16.0, 400.0),
                RectDef::new(1600.0, 0.0, 16.0, 400.0),
            ],
            spikes: vec![
                RectDef::new(520.0, 376.0, 64.0, 16.0),
                RectDef::new(1020.0, 376.0, 80.0, 16.0),
            ],
            enemies: vec![
                PatrolDef { x: 260.0, y: 288.0, range: 180.0 },
                PatrolDef { x: 700.0, y: 288.0, range: 200.0 },
                PatrolDef { x: 1180.0, y: 288.0, range: 250.0 },
            ],
            friends: vec![
                (300.0, 270.0),
                (700.0, 270.0),
                (900.0, 270.0),
                (1150.0, 270.0),
                (1500.0, 270.0),
                (230.0, 190.0),
                (430.0, 130.0),
                (650.0, 182.0),
                (850.0, 110.0),
                (1000.0, 198.0),
                (1230.0, 174.0),
                (1400.0, 102.0),
            ],
        }
    }
}
