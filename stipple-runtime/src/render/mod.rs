use crate::graphics::{pack, Color};
use crate::layout::{Point, Size};

/// Anything a canvas render pass can paint into.
/// Cells arrive in grid coordinates; mapping them onto real pixels is the surface's job.
pub trait CellSurface {
    fn paint_cell(&mut self, cell: Point, color: Color);
}

/// Records paint commands in order; handy for inspecting a render pass
impl CellSurface for Vec<(Point, Color)> {
    fn paint_cell(&mut self, cell: Point, color: Color) {
        self.push((cell, color));
    }
}

/// Persistent `0x00RRGGBB` pixels for the window.
///
/// softbuffer does not promise to keep a buffer's contents between frames,
/// so the window's image lives here and is copied out on every present.
pub struct FrameBuffer {
    pub size: Size,
    pub pixels: Vec<u32>,
}
impl FrameBuffer {
    pub fn new(size: Size, background: Color) -> Self {
        Self {
            size,
            pixels: vec![pack(background); size.area()],
        }
    }

    /// Resizes and clears to `background`; the old image is discarded
    pub fn reset(&mut self, size: Size, background: Color) {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), pack(background));
    }

    /// A surface that paints grid cells as `scale`-sized blocks starting at `origin`
    pub fn handle(&mut self, origin: Point, scale: u32) -> DrawHandle<'_> {
        DrawHandle {
            buffer: &mut self.pixels,
            width: self.size.width as usize,
            height: self.size.height as usize,
            origin,
            scale: scale.max(1),
        }
    }
}

/// Simple structure that encapsulates the frame buffer and where the canvas sits in it.
/// Render passes take this structure, to keep them separate from the event loop.
pub struct DrawHandle<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
    pub origin: Point,
    pub scale: u32,
}
impl<'a> DrawHandle<'a> {
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn set(&mut self, x: i32, y: i32, value: u32) {
        if let Some(index) = self.index(x, y) {
            self.buffer[index] = value;
        }
    }
}
impl<'a> CellSurface for DrawHandle<'a> {
    fn paint_cell(&mut self, cell: Point, color: Color) {
        let scale = self.scale as i32;
        let left = self.origin.x + cell.x * scale;
        let top = self.origin.y + cell.y * scale;
        let value = pack(color);

        for y in top..top + scale {
            for x in left..left + scale {
                self.set(x, y, value);
            }
        }
    }
}
