//! Diverging blue-white-red color scale.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
}

/// Map `value` onto blue (`-bound`) through white (0) to red (`+bound`).
///
/// Values beyond the bound are clamped. NaN has no color.
pub fn diverging(value: f64, bound: f64) -> Option<Rgb> {
    if value.is_nan() {
        return None;
    }
    let t = (value / bound).clamp(-1.0, 1.0);
    let fade = |f: f64| (255.0 * (1.0 - f)).round() as u8;
    Some(if t < 0.0 {
        Rgb(fade(-t), fade(-t), 255)
    } else {
        Rgb(255, fade(t), fade(t))
    })
}
