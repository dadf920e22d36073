use winit::dpi::PhysicalSize;

use crate::framework::math::Color;

use super::Rect;

/// Horizontal split of the window into a left (page chrome) and right (scene) pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    /// Share of the window width taken by the left pane, clamped to `[0, 1]`.
    pub fraction: f32,
}

impl Default for SplitLayout {
    fn default() -> Self {
        Self { fraction: 0.5 }
    }
}

impl SplitLayout {
    pub fn new(fraction: f32) -> Self {
        Self { fraction: fraction.clamp(0.0, 1.0) }
    }

    /// Returns `(left, right)` panes, the right pane takes the rounding remainder.
    pub fn split(&self, size: PhysicalSize<u32>) -> (Rect, Rect) {
        let fraction = self.fraction.clamp(0.0, 1.0);
        let left_width = ((size.width as f32 * fraction).floor() as u32).min(size.width);
        (
            Rect::new(0, 0, left_width, size.height),
            Rect::new(left_width, 0, size.width - left_width, size.height),
        )
    }
}

/// Colors of the page around the mounted scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStyle {
    pub background: Color,
    pub sidebar: Color,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xffffff),
            sidebar: Color::from_hex(0x111827),
        }
    }
}
