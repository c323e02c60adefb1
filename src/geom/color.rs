use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Fallback used when an interpolation endpoint is missing.
    pub const NEUTRAL_GRAY: Self = Self::new(128, 128, 128);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Per-channel linear interpolation, rounded to the nearest integer.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
        )
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Interpolates between two optional colors; neutral gray when either is absent.
#[must_use]
pub fn lerp_color(c1: Option<Color>, c2: Option<Color>, t: f64) -> Color {
    match (c1, c2) {
        (Some(a), Some(b)) => a.lerp(b, t),
        _ => Color::NEUTRAL_GRAY,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let value = f64::from(a) * (1.0 - t) + f64::from(b) * t;
    value.round().clamp(0.0, 255.0) as u8
}
