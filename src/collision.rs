/// Collision geometry for critter-rescue
///
/// Everything in here is pure math over axis-aligned bounding boxes. The
/// physics step (`physics.rs`) uses the penetration helpers to push bodies
/// out of solids, and the world update uses the overlap test plus `Contact`
/// to decide how the player reacts to the things it touched this tick.
///
/// # Architecture
///
/// - `Aabb`: a float rectangle in world pixels
/// - `Contact`: what the player hit and from which vertical side
/// - Pure functions: stateless intersection / penetration math
use sdl2::rect::Rect;

/// Axis-aligned bounding box in world coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Aabb { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Converts to an SDL rect at the given screen offset (already
    /// camera-adjusted coordinates).
    pub fn to_rect(&self, offset_x: i32, offset_y: i32) -> Rect {
        Rect::new(
            self.x as i32 + offset_x,
            self.y as i32 + offset_y,
            self.w.max(0.0) as u32,
            self.h.max(0.0) as u32,
        )
    }
}

/// Checks whether two boxes overlap.
///
/// Two rectangles intersect when they overlap on both axes. Touching edges
/// do not count as an intersection, which keeps a body resting exactly on
/// top of a solid from registering as "inside" it.
pub fn aabb_intersect(a: &Aabb, b: &Aabb) -> bool {
    let x_overlap = a.x < b.right() && a.right() > b.x;
    let y_overlap = a.y < b.bottom() && a.bottom() > b.y;

    x_overlap && y_overlap
}

/// Returns the overlap depth on each axis, or `None` when the boxes are
/// apart. Values are always positive; callers pick the smaller axis to
/// resolve along.
pub fn penetration(a: &Aabb, b: &Aabb) -> Option<(f32, f32)> {
    if !aabb_intersect(a, b) {
        return None;
    }

    let depth_x = (a.right().min(b.right())) - (a.x.max(b.x));
    let depth_y = (a.bottom().min(b.bottom())) - (a.y.max(b.y));

    Some((depth_x, depth_y))
}

/// Categories of things the player can run into during the contact scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Patrolling enemy
    Enemy,
    /// Spike strip (instant death)
    Hazard,
    /// A placed friend waiting to be rescued
    Friend,
}

/// One entity contact from this tick's scan.
///
/// `vertical` is the signed vertical component of the response: positive
/// when the player's center is above the other box (it was hit from above),
/// negative otherwise. The player controller uses the sign to pick between
/// a stomp bounce and taking damage.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub kind: ContactKind,
    /// Index into the matching entity list (enemy / spike / friend slot)
    pub index: usize,
    pub vertical: f32,
}

/// Builds a `Contact` for an overlap between the player box and another box.
///
/// Returns `None` when they do not actually intersect.
pub fn make_contact(player: &Aabb, other: &Aabb, kind: ContactKind, index: usize) -> Option<Contact> {
    let (_, depth_y) = penetration(player, other)?;

    let vertical = if player.center_y() < other.center_y() {
        depth_y
    } else {
        -depth_y
    };

    Some(Contact { kind, index, vertical })
}
