//! Collision primitives shared by every game
//!
//! All functions are pure. Games run them pairwise over live entities each
//! frame; entity counts stay in the tens, so there is no spatial index.

use glam::Vec2;

/// Axis-aligned rectangle, origin at the top-left corner (canvas space)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square box around a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Contact info for bounce resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing out of the obstacle toward the mover
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Strict AABB overlap. Touching edges do not count.
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Circles overlap when their centers are closer than the sum of radii
#[inline]
pub fn circle_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    c1.distance_squared(c2) < reach * reach
}

#[inline]
pub fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x >= r.x && p.x <= r.x + r.w && p.y >= r.y && p.y <= r.y + r.h
}

/// Clamp a top-left position so a box of `size` stays inside `[0,width]×[0,height]`
pub fn clamp_to_bounds(pos: Vec2, size: Vec2, width: f32, height: f32) -> Vec2 {
    let max_x = (width - size.x).max(0.0);
    let max_y = (height - size.y).max(0.0);
    Vec2::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}

/// Leaving one edge re-enters at the opposite edge
///
/// Positions already inside `[0,width]×[0,height]` are returned unchanged.
pub fn wrap_toroidal(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    if v > extent {
        0.0
    } else if v < 0.0 {
        extent
    } else {
        v
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Resolve which face of `obstacle` the `mover` box hit
///
/// Picks the axis of least penetration. Returns `None` when the boxes do not
/// overlap.
pub fn rect_contact(mover: &Rect, obstacle: &Rect) -> Option<Contact> {
    if !aabb_overlap(mover, obstacle) {
        return None;
    }

    let from_left = mover.right() - obstacle.x;
    let from_right = obstacle.right() - mover.x;
    let from_top = mover.bottom() - obstacle.y;
    let from_bottom = obstacle.bottom() - mover.y;

    let (pen_x, normal_x) = if from_left < from_right {
        (from_left, Vec2::NEG_X)
    } else {
        (from_right, Vec2::X)
    };
    let (pen_y, normal_y) = if from_top < from_bottom {
        (from_top, Vec2::NEG_Y)
    } else {
        (from_bottom, Vec2::Y)
    };

    Some(if pen_x < pen_y {
        Contact {
            normal: normal_x,
            penetration: pen_x,
        }
    } else {
        Contact {
            normal: normal_y,
            penetration: pen_y,
        }
    })
}
