//! Shadow passes blended over already-shaded discs.

use glam::Vec2;

use super::config::ShadowSide;
use super::placement::DiscPlacement;
use crate::canvas::{disc_offsets, Canvas};
use crate::color::Color;

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

/// Blends `shade` over the half of the disc on `side`.
///
/// Returns the number of pixels touched. Alpha is clamped to `[0, 1]`.
pub fn apply_half_shadow(
    canvas: &mut Canvas,
    placement: &DiscPlacement,
    side: ShadowSide,
    shade: Color,
    alpha: f32,
) -> usize {
    let alpha = clamp_alpha(alpha);
    let DiscPlacement { cx, cy, radius } = *placement;
    let (width, height) = (canvas.width(), canvas.height());

    let mut touched = 0;
    for (x, y) in disc_offsets(cx, cy, radius, width, height) {
        if side.contains(x, y) && canvas.blend(cx + x, cy + y, shade, alpha) {
            touched += 1;
        }
    }
    touched
}

/// Blends `shade` over the disc with an alpha that falls off linearly from
/// `max_alpha` at `centre + offset` to zero one radius away.
///
/// `offset` is in canvas pixels with `y` pointing up. Only pixels inside
/// the disc are touched.
pub fn apply_soft_shadow(
    canvas: &mut Canvas,
    placement: &DiscPlacement,
    offset: (i32, i32),
    shade: Color,
    max_alpha: f32,
) -> usize {
    let max_alpha = clamp_alpha(max_alpha);
    let DiscPlacement { cx, cy, radius } = *placement;
    if radius <= 0 {
        return 0;
    }
    let (width, height) = (canvas.width(), canvas.height());
    let r = radius as f32;
    let focus = Vec2::new(offset.0 as f32, -offset.1 as f32);

    let mut touched = 0;
    for (x, y) in disc_offsets(cx, cy, radius, width, height) {
        let d = Vec2::new(x as f32, y as f32).distance(focus);
        if d >= r {
            continue;
        }
        if canvas.blend(cx + x, cy + y, shade, max_alpha * (1.0 - d / r)) {
            touched += 1;
        }
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb, BLACK};

    fn lit_canvas() -> Canvas {
        Canvas::filled(21, 21, rgb(200, 180, 160))
    }

    #[test]
    fn test_full_alpha_writes_shade() {
        let mut canvas = lit_canvas();
        let disc = DiscPlacement::new(10, 10, 6);
        let touched = apply_half_shadow(&mut canvas, &disc, ShadowSide::East, BLACK, 1.0);
        assert!(touched > 0);
        assert_eq!(canvas.get(15, 10), Some(BLACK));
        assert_eq!(canvas.get(11, 10), Some(BLACK));
        // Centre column and west half untouched.
        assert_eq!(canvas.get(10, 10), Some(rgb(200, 180, 160)));
        assert_eq!(canvas.get(5, 10), Some(rgb(200, 180, 160)));
        // Outside the disc untouched.
        assert_eq!(canvas.get(17, 10), Some(rgb(200, 180, 160)));
    }

    #[test]
    fn test_zero_alpha_is_identity() {
        let mut canvas = lit_canvas();
        let before = canvas.clone();
        let disc = DiscPlacement::new(10, 10, 6);
        for side in [ShadowSide::East, ShadowSide::West, ShadowSide::North, ShadowSide::South] {
            apply_half_shadow(&mut canvas, &disc, side, BLACK, 0.0);
        }
        apply_soft_shadow(&mut canvas, &disc, (2, 1), BLACK, 0.0);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut canvas = lit_canvas();
        let disc = DiscPlacement::new(10, 10, 6);
        apply_half_shadow(&mut canvas, &disc, ShadowSide::North, BLACK, 7.5);
        assert_eq!(canvas.get(10, 5), Some(BLACK));
    }

    #[test]
    fn test_soft_shadow_fades_from_focus() {
        let mut canvas = lit_canvas();
        let disc = DiscPlacement::new(10, 10, 8);
        apply_soft_shadow(&mut canvas, &disc, (0, 0), BLACK, 1.0);
        let centre = canvas.get(10, 10).unwrap();
        let near_edge = canvas.get(17, 10).unwrap();
        assert_eq!(centre, BLACK);
        assert!(near_edge.0[0] > centre.0[0]);
        assert_eq!(canvas.get(19, 10), Some(rgb(200, 180, 160)));
    }
}
