//! sRGB colours written the way the scene is authored: `0xce4221`.

/// An sRGB colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Creates a colour from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: f32::from(((hex >> 16) & 0xff) as u8) / 255.0,
            g: f32::from(((hex >> 8) & 0xff) as u8) / 255.0,
            b: f32::from((hex & 0xff) as u8) / 255.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_unpacks_channels() {
        assert_eq!(Rgb::from_hex(0xffffff), Rgb::WHITE);

        let red = Rgb::from_hex(0xce4221);
        assert!((red.r - 206.0 / 255.0).abs() < 1e-6);
        assert!((red.g - 66.0 / 255.0).abs() < 1e-6);
        assert!((red.b - 33.0 / 255.0).abs() < 1e-6);
    }
}
