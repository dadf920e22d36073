use winit::dpi::PhysicalSize;

use super::OutputID;

/// Axis aligned rectangle of the window in physical pixels, origin in the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Is the window point in pixels inside, the right and bottom edges are excluded.
    pub fn contains(&self, (x, y): (f32, f32)) -> bool {
        x >= self.x as f32
            && y >= self.y as f32
            && x < (self.x + self.width) as f32
            && y < (self.y + self.height) as f32
    }
}

/// A display surface of the host, a region of the window which holds child outputs.
///  - children are drawn in order, later on top
#[derive(Debug, Default)]
pub struct Surface {
    rect: Rect,
    children: Vec<OutputID>,
}

impl Surface {
    pub fn new(rect: Rect) -> Self {
        Self { rect, children: vec![] }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.rect.size()
    }

    pub fn children(&self) -> &[OutputID] {
        &self.children
    }

    /// Appends an output, an output already present is moved to the top.
    pub fn append_child(&mut self, output: OutputID) {
        self.remove_child(output);
        self.children.push(output);
    }

    /// Returns false when the output was not a child of this surface.
    pub fn remove_child(&mut self, output: OutputID) -> bool {
        let count = self.children.len();
        self.children.retain(|child| *child != output);
        count != self.children.len()
    }
}
