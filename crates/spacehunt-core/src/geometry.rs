use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen space (y grows downward).
///
/// Used both as an entity's position and as its hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Aabb {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Same size, different top-left corner.
    pub fn at(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }
}

/// Strict overlap test. Boxes that only share an edge do not overlap.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Face of a wall that a moving box ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The box came down onto the wall.
    Top,
    /// The box came up into the wall's underside.
    Bottom,
    /// The box came in from the wall's left.
    Left,
    /// The box came in from the wall's right.
    Right,
}

impl Side {
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Move `moving` so it sits flush against this face of `wall`.
    pub fn snap(self, moving: &mut Aabb, wall: &Aabb) {
        match self {
            Side::Top => moving.y = wall.y - moving.h,
            Side::Bottom => moving.y = wall.bottom(),
            Side::Left => moving.x = wall.x - moving.w,
            Side::Right => moving.x = wall.right(),
        }
    }
}

/// Decide which face of `wall` the box struck this frame.
///
/// `prev_x`/`prev_y` is where the box was before it moved. A face is a
/// candidate when the box was entirely on that side of the wall before the
/// move. When both a vertical and a horizontal face are candidates (diagonal
/// approach onto a corner) the vertical face wins, so a box walking across
/// adjacent floor blocks never catches on the seam between them.
///
/// A box that already overlapped the wall before moving has no candidate
/// face; it is pushed out along the axis of least penetration.
pub fn wall_contact(moving: &Aabb, wall: &Aabb, prev_x: i32, prev_y: i32) -> Option<Side> {
    if !overlaps(moving, wall) {
        return None;
    }

    let prev = moving.at(prev_x, prev_y);

    let vertical = if prev.bottom() <= wall.y {
        Some(Side::Top)
    } else if prev.y >= wall.bottom() {
        Some(Side::Bottom)
    } else {
        None
    };

    let horizontal = if prev.right() <= wall.x {
        Some(Side::Left)
    } else if prev.x >= wall.right() {
        Some(Side::Right)
    } else {
        None
    };

    Some(
        vertical
            .or(horizontal)
            .unwrap_or_else(|| least_penetration(moving, wall)),
    )
}

fn least_penetration(moving: &Aabb, wall: &Aabb) -> Side {
    let candidates = [
        (moving.bottom() - wall.y, Side::Top),
        (wall.bottom() - moving.y, Side::Bottom),
        (moving.right() - wall.x, Side::Left),
        (wall.right() - moving.x, Side::Right),
    ];

    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.0 < best.0 {
            best = *c;
        }
    }
    best.1
}
