
/// Color in sRGB space with components in `0.0..=1.0`, the way colors are written down in hex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Converts to linear space which is what shaders compute lighting in.
    pub fn to_linear(&self) -> glam::Vec3 {
        glam::vec3(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    pub fn to_wgpu(&self) -> wgpu::Color {
        let linear = self.to_linear();
        wgpu::Color {
            r: linear.x as f64,
            g: linear.y as f64,
            b: linear.z as f64,
            a: 1.0,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_splits_channels() {
        let color = Color::from_hex(0x11ff00);
        assert!((color.r - 17.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.g, 1.0);
        assert_eq!(color.b, 0.0);
    }

    #[test]
    fn linear_conversion_keeps_extremes_and_darkens_midtones() {
        assert!((Color::WHITE.to_linear() - glam::Vec3::ONE).length() < 1e-5);
        assert_eq!(Color::BLACK.to_linear(), glam::Vec3::ZERO);

        let gray = Color::from_hex(0x808080).to_linear();
        assert!((gray.x - 0.2158605).abs() < 1e-4, "{gray:?}");
    }
}
