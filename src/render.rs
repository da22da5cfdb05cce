//! Scene rendering
//!
//! One pass over the world in painter order: terrain, spikes, friends,
//! beetles, player. Every position goes through the camera offset. Each
//! entity draws its spritesheet when one is attached and a flat-color
//! stand-in otherwise, so the game stays playable without any art files.

use crate::friends::{Friend, FriendVariant};
use crate::game::world::GameWorld;
use crate::sprite::SpriteSheet;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const SKY_COLOR: Color = Color::RGB(110, 170, 220);
const GROUND_COLOR: Color = Color::RGB(110, 78, 48);
const GRASS_COLOR: Color = Color::RGB(80, 160, 70);
const SPIKE_COLOR: Color = Color::RGB(170, 170, 180);
const SPIKE_SHADOW: Color = Color::RGB(110, 110, 120);

/// Stand-in colors when the friends spritesheet is missing.
fn variant_color(variant: FriendVariant) -> Color {
    match variant {
        FriendVariant::Horse => Color::RGB(150, 110, 70),
        FriendVariant::Goat => Color::RGB(210, 210, 200),
        FriendVariant::Cat => Color::RGB(230, 160, 60),
        FriendVariant::Bear => Color::RGB(110, 70, 40),
        FriendVariant::Kitten => Color::RGB(90, 90, 100),
        FriendVariant::Rabbit => Color::RGB(240, 240, 240),
        FriendVariant::Pig => Color::RGB(240, 170, 180),
    }
}

/// Draws the whole play scene for one frame.
pub fn render_scene(
    canvas: &mut Canvas<Window>,
    world: &GameWorld,
    friends_sheet: Option<&SpriteSheet>,
) -> Result<(), String> {
    canvas.set_draw_color(SKY_COLOR);
    canvas.clear();

    let (ox, oy) = world.camera.offset();

    // Terrain: dirt body with a grass lip on anything wide enough to
    // stand on
    for solid in &world.level.solids {
        let rect = solid.to_aabb().to_rect(ox, oy);
        canvas.set_draw_color(GROUND_COLOR);
        canvas.fill_rect(rect)?;

        if solid.w > solid.h {
            canvas.set_draw_color(GRASS_COLOR);
            canvas.fill_rect(Rect::new(rect.x(), rect.y(), rect.width(), 4))?;
        }
    }

    for spike in &world.level.spikes {
        let rect = spike.to_aabb().to_rect(ox, oy);
        canvas.set_draw_color(SPIKE_SHADOW);
        canvas.fill_rect(rect)?;

        // Tooth pattern: alternating light columns
        canvas.set_draw_color(SPIKE_COLOR);
        let mut x = rect.x();
        while x < rect.x() + rect.width() as i32 {
            canvas.fill_rect(Rect::new(x, rect.y(), 3, rect.height()))?;
            x += 6;
        }
    }

    for friend in world.counter.slots() {
        render_friend(canvas, friend, friends_sheet, ox, oy)?;
    }

    for beetle in &world.beetles {
        beetle.render(canvas, ox, oy)?;
    }

    world.player.render(canvas, ox, oy)?;

    Ok(())
}

/// Invalid and collected slots are skipped entirely - the tombstone flag
/// is what takes them out of the scene.
fn render_friend(
    canvas: &mut Canvas<Window>,
    friend: &Friend,
    sheet: Option<&SpriteSheet>,
    ox: i32,
    oy: i32,
) -> Result<(), String> {
    if !friend.is_placed() {
        return Ok(());
    }

    let dest_rect = friend.aabb().to_rect(ox, oy);

    if let Some(sheet) = sheet {
        sheet.render_row(canvas, dest_rect, false, friend.variant.sheet_row())
    } else {
        canvas.set_draw_color(variant_color(friend.variant));
        canvas.fill_rect(dest_rect).map_err(|e| e.to_string())
    }
}
