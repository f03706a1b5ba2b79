//! Integer geometry helpers for discs and circles.

use glam::Vec2;

/// Iterates the offsets `(x, y)` with `x² + y² <= r²` whose absolute pixel
/// `(cx + x, cy + y)` lies in `[0, width) x [0, height)`, row by row.
///
/// The scan is clipped to the grid first, so huge radii or centres far off
/// the grid cost nothing. Yields nothing for `radius <= 0`.
pub fn disc_offsets(
    cx: i32,
    cy: i32,
    radius: i32,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (i32, i32)> {
    let r = radius.max(0) as i64;
    let r2 = r * r;
    let (cx, cy) = (cx as i64, cy as i64);

    let y_min = (-r).max(-cy);
    let y_max = r.min(height as i64 - 1 - cy);
    let x_min = (-r).max(-cx);
    let x_max = r.min(width as i64 - 1 - cx);
    let rows = if radius > 0 { y_min..=y_max } else { 1..=0 };

    rows.flat_map(move |y| {
        (x_min..=x_max)
            .filter(move |&x| x * x + y * y <= r2)
            .map(move |x| (x as i32, y as i32))
    })
}

/// Pixel at `radius` from `center` in direction `degrees`, rounded to the grid.
pub fn polar_point(center: Vec2, radius: f32, degrees: f32) -> (i32, i32) {
    let p = center + Vec2::from_angle(degrees.to_radians()) * radius;
    (p.x.round() as i32, p.y.round() as i32)
}
