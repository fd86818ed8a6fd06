// Screen -> mat mapping and paw reach clamping.
// Visual: the mouse sprite slides over the tilted mousepad in the artwork,
// and the right paw follows it without stretching past its reach.

use crate::types::{DisplaySize, Point, Quad};

/// Normalize a raw display coordinate into [0,1] on both axes.
/// Positions outside the display are clamped, never extrapolated.
pub fn normalize(raw: Point, display: DisplaySize) -> (f32, f32) {
    let axis = |value: f32, extent: f32| {
        if extent > 0.0 { (value / extent).clamp(0.0, 1.0) } else { 0.0 }
    };
    (axis(raw.x, display.width), axis(raw.y, display.height))
}

/// Bilinear blend of the four corners at (u,v).
/// (0,0) is P0, (1,0) is P1, (1,1) is P2, (0,1) is P3.
pub fn bilinear(quad: &Quad, u: f32, v: f32) -> Point {
    let [p0, p1, p2, p3] = quad.corners;
    let w0 = (1.0 - u) * (1.0 - v);
    let w1 = u * (1.0 - v);
    let w2 = u * v;
    let w3 = (1.0 - u) * v;
    Point::new(
        w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
        w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
    )
}

/// Map a raw pointer position on the display onto the mat quadrilateral.
pub fn map_to_mat(raw: Point, display: DisplaySize, quad: &Quad) -> Point {
    let (u, v) = normalize(raw, display);
    bilinear(quad, u, v)
}

/// Move from `anchor` toward `target`, but never farther than `max_length`.
pub fn limit_reach_f(anchor: Point, target: Point, max_length: f32) -> Point {
    if max_length <= 0.0 {
        return anchor;
    }
    let (mut dx, mut dy) = (target.x - anchor.x, target.y - anchor.y);
    let distance = anchor.distance_to(target);
    // distance > max_length > 0 here, so the division is safe
    if distance > max_length {
        let scale = max_length / distance;
        dx *= scale;
        dy *= scale;
    }
    Point::new(anchor.x + dx, anchor.y + dy)
}

/// Pixel version of [`limit_reach_f`].
pub fn limit_reach(anchor: Point, target: Point, max_length: f32) -> (i32, i32) {
    limit_reach_f(anchor, target, max_length).to_pixel()
}
