//! Per-channel color math.

use image::Rgb;
use rand::Rng;

/// An 8-bit RGB color.
pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);

/// Shorthand constructor.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Rgb([r, g, b])
}

/// Linearly interpolates from `a` to `b`.
///
/// `t` is clamped to [0, 1]; `t == 0` returns `a` and `t == 1` returns `b`
/// exactly.
pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Rgb(std::array::from_fn(|i| {
        let v = a.0[i] as f32 * (1.0 - t) + b.0[i] as f32 * t;
        v.round().clamp(0.0, 255.0) as u8
    }))
}

/// Subtracts `amount` from every channel, saturating at 0.
pub fn darken(color: Color, amount: u8) -> Color {
    Rgb(color.0.map(|c| c.saturating_sub(amount)))
}

/// Offsets every channel independently by a value in `[-amount, amount]`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, color: Color, amount: u8) -> Color {
    if amount == 0 {
        return color;
    }
    let amount = amount as i16;
    Rgb(color.0.map(|c| {
        let offset = rng.random_range(-amount..=amount);
        (c as i16 + offset).clamp(0, 255) as u8
    }))
}
