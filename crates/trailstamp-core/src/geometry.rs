//! Small geometry helpers shared by the trail and tilt engines.

use glam::Vec2;
use trailstamp_platform::Rect;

/// `(1 - n) * a + n * b`.
#[inline]
pub fn lerp(a: f32, b: f32, n: f32) -> f32 {
    (1.0 - n) * a + n * b
}

#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, n: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, n), lerp(a.y, b.y, n))
}

/// Euclidean distance between two pointer samples.
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    (p.x - q.x).hypot(p.y - q.y)
}

/// Client coordinates relative to the top-left corner of `rect`.
#[inline]
pub fn to_local(client: Vec2, rect: &Rect) -> Vec2 {
    Vec2::new(client.x - rect.left, client.y - rect.top)
}

pub fn rect_size(rect: &Rect) -> Vec2 {
    Vec2::new(rect.width, rect.height)
}

/// Top-left offset that centers a box of `size` on `point`.
#[inline]
pub fn centered_offset(point: Vec2, size: Vec2) -> Vec2 {
    point - size * 0.5
}
