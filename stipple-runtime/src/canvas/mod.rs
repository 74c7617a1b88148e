/// Half-open line rasterization between stroke samples
pub mod line;

use crate::graphics::Color;
use crate::layout::{BoundingBox, Point, Rect, Size};
use crate::render::CellSurface;

/// The last two accepted samples of the stroke in progress.
/// Both are `None` between strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrokeCursor {
    pub previous: Option<Point>,
    pub current: Option<Point>,
}
impl StrokeCursor {
    pub fn is_active(&self) -> bool {
        self.previous.is_some()
    }
}

/// A fixed grid of colored cells plus the bookkeeping needed to paint it incrementally.
///
/// Everything here speaks grid coordinates except `origin`/`scale`,
/// which only describe where the grid is placed on the output.
pub struct Canvas {
    size: Size,
    /// Row-major, `size.area()` long
    cells: Vec<Color>,

    /// Cells touched since the last render pass; duplicates are fine
    dirty: Vec<Point>,

    cursor: StrokeCursor,

    origin: Point,
    scale: u32,
}
impl Canvas {
    /// Creates a canvas filled with `background`.
    /// Every cell starts out dirty so the first render pass paints the background.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let size = Size::new(width, height);
        let mut canvas = Self {
            size,
            cells: vec![background; size.area()],
            dirty: Vec::with_capacity(size.area()),
            cursor: StrokeCursor::default(),
            origin: Point::default(),
            scale: 1,
        };
        canvas.invalidate();
        canvas
    }

    /// Places the canvas with its top-left corner at `origin`, each cell `scale` pixels wide.
    /// A scale of zero is treated as one.
    pub fn with_placement(mut self, origin: Point, scale: u32) -> Self {
        self.origin = origin;
        self.scale = scale.max(1);
        self
    }

    /// Places the canvas so its scaled extent is centered on `center`
    pub fn centered_on(mut self, center: Point) -> Self {
        let scale = self.scale as i32;
        self.origin = Point::new(
            center.x - self.size.width as i32 * scale / 2,
            center.y - self.size.height as i32 * scale / 2,
        );
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn cursor(&self) -> StrokeCursor {
        self.cursor
    }

    /// Cells waiting for the next render pass, oldest first
    pub fn dirty(&self) -> &[Point] {
        &self.dirty
    }

    /// The canvas area on the output
    pub fn bounds(&self) -> Rect {
        BoundingBox::new(0, 0, self.size.width, self.size.height).rect(self.origin, self.scale)
    }

    /// Converts an output position into a grid coordinate, truncating toward zero.
    /// The result is not clamped; positions off the grid stay off the grid.
    pub fn to_local(&self, position: Point) -> Point {
        let offset = position - self.origin;
        let scale = self.scale as i32;
        Point::new(offset.x / scale, offset.y / scale)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|index| self.cells[index])
    }

    /// Writes one cell and queues it for repaint. Out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, color: Color, x: i32, y: i32) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        self.cells[index] = color;
        self.dirty.push(Point::new(x, y));
    }

    fn plot(&mut self, color: Color, point: Point) {
        self.set_pixel(color, point.x, point.y)
    }

    /// Feeds one stroke sample.
    ///
    /// The first sample of a stroke is plotted on its own. After that, each call plots the
    /// segment from the previous sample up to, but **not** including, the new one;
    /// the new sample is plotted by the next call as the start of its own segment.
    /// A stroke therefore never plots its final sample unless that sample is repeated.
    ///
    /// This does not move `previous` forward; see [`Canvas::advance_stroke`].
    pub fn draw(&mut self, color: Color, x: i32, y: i32) {
        let current = Point::new(x, y);
        self.cursor.current = Some(current);

        let previous = match self.cursor.previous {
            Some(previous) => previous,
            None => {
                self.cursor.previous = Some(current);
                current
            }
        };

        if previous == current {
            self.plot(color, current);
            return;
        }
        for point in line::segment(previous, current) {
            self.plot(color, point);
        }
    }

    /// Makes the latest sample the start of the next segment
    pub fn advance_stroke(&mut self) {
        self.cursor.previous = self.cursor.current;
    }

    /// Ends the stroke in progress, if any; the next `draw` starts a new one
    pub fn reset_stroke(&mut self) {
        self.cursor = StrokeCursor::default();
    }

    /// Queues every cell for repaint, e.g. after the output lost its contents
    pub fn invalidate(&mut self) {
        self.dirty.clear();
        let (width, height) = (self.size.width as i32, self.size.height as i32);
        self.dirty
            .extend((0..height).flat_map(|y| (0..width).map(move |x| Point::new(x, y))));
    }

    /// Sends every dirty cell, with its current color, to `surface`, then forgets them.
    /// Returns how many cells were sent.
    pub fn render<S: CellSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let count = self.dirty.len();
        for &point in &self.dirty {
            if let Some(index) = self.index(point.x, point.y) {
                surface.paint_cell(point, self.cells[index]);
            }
        }
        self.dirty.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{BLACK, WHITE};
    use palette::Srgb;

    const RED: Color = Srgb::new(255, 0, 0);

    /// A canvas with the initial full-grid repaint already drained
    fn blank(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height, WHITE);
        canvas.render(&mut Vec::<(Point, Color)>::new());
        canvas
    }

    fn dirty(canvas: &Canvas) -> Vec<(i32, i32)> {
        canvas.dirty().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn new_canvas_queues_every_cell_once() {
        let canvas = Canvas::new(3, 2, WHITE);
        assert_eq!(
            dirty(&canvas),
            [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!(canvas.pixel(2, 1), Some(WHITE));
        assert_eq!(canvas.pixel(3, 0), None);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut canvas = blank(4, 4);
        canvas.set_pixel(BLACK, -1, 0);
        canvas.set_pixel(BLACK, 4, 0);
        canvas.set_pixel(BLACK, 0, 4);
        canvas.set_pixel(BLACK, 0, -1);

        assert!(canvas.dirty().is_empty());
        assert!((0..4).all(|y| (0..4).all(|x| canvas.pixel(x, y) == Some(WHITE))));
    }

    #[test]
    fn set_pixel_writes_and_queues() {
        let mut canvas = blank(4, 4);
        canvas.set_pixel(RED, 1, 2);
        canvas.set_pixel(BLACK, 1, 2);

        assert_eq!(canvas.pixel(1, 2), Some(BLACK));
        assert_eq!(dirty(&canvas), [(1, 2), (1, 2)]);
    }

    #[test]
    fn first_sample_plots_only_itself() {
        let mut canvas = blank(10, 10);
        canvas.draw(BLACK, 6, 3);

        assert_eq!(dirty(&canvas), [(6, 3)]);
        assert_eq!(canvas.cursor().previous, Some(Point::new(6, 3)));
        assert_eq!(canvas.cursor().current, Some(Point::new(6, 3)));
    }

    #[test]
    fn segment_excludes_the_new_sample() {
        let mut canvas = blank(10, 10);
        canvas.draw(BLACK, 0, 0);
        canvas.draw(BLACK, 5, 0);

        assert_eq!(dirty(&canvas), [(0, 0), (0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(canvas.pixel(5, 0), Some(WHITE));
    }

    #[test]
    fn reversed_segment_excludes_the_new_sample() {
        let mut canvas = blank(10, 10);
        canvas.draw(BLACK, 5, 0);
        canvas.draw(BLACK, 0, 0);

        assert_eq!(dirty(&canvas), [(5, 0), (5, 0), (4, 0), (3, 0), (2, 0), (1, 0)]);
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn repeated_sample_plots_once() {
        let mut canvas = blank(10, 10);
        canvas.draw(BLACK, 2, 2);
        canvas.advance_stroke();
        canvas.draw(BLACK, 2, 2);

        assert_eq!(dirty(&canvas), [(2, 2), (2, 2)]);
    }

    #[test]
    fn draw_without_advance_keeps_the_segment_start() {
        let mut canvas = blank(10, 10);
        canvas.draw(BLACK, 0, 0);
        canvas.draw(BLACK, 2, 0);
        canvas.draw(BLACK, 0, 2);

        // both segments start from (0, 0)
        assert_eq!(dirty(&canvas), [(0, 0), (0, 0), (1, 0), (0, 0), (0, 1)]);
    }

    #[test]
    fn reset_starts_a_new_stroke() {
        let mut canvas = blank(10, 10);
        canvas.draw(BLACK, 0, 0);
        canvas.advance_stroke();
        canvas.reset_stroke();
        assert!(!canvas.cursor().is_active());

        canvas.draw(BLACK, 7, 7);
        assert_eq!(dirty(&canvas), [(0, 0), (7, 7)]);
    }

    #[test]
    fn render_drains_the_queue_with_current_colors() {
        let mut canvas = blank(4, 4);
        canvas.set_pixel(RED, 0, 0);
        canvas.set_pixel(BLACK, 3, 3);
        canvas.set_pixel(BLACK, 0, 0);

        let mut out: Vec<(Point, Color)> = Vec::new();
        assert_eq!(canvas.render(&mut out), 3);
        assert_eq!(
            out,
            [
                (Point::new(0, 0), BLACK),
                (Point::new(3, 3), BLACK),
                (Point::new(0, 0), BLACK),
            ]
        );
        assert!(canvas.dirty().is_empty());
    }

    #[test]
    fn render_with_nothing_dirty() {
        let mut canvas = blank(4, 4);
        let mut out: Vec<(Point, Color)> = Vec::new();
        assert_eq!(canvas.render(&mut out), 0);
        assert!(out.is_empty());
        assert!(canvas.dirty().is_empty());
    }

    #[test]
    fn placement_and_local_coordinates() {
        let canvas = Canvas::new(790, 590, WHITE).centered_on(Point::new(400, 300));
        assert_eq!(canvas.origin(), Point::new(5, 5));
        assert_eq!(canvas.bounds(), Rect::new(5, 5, 790, 590));
        assert_eq!(canvas.to_local(Point::new(5, 5)), Point::new(0, 0));
        assert_eq!(canvas.to_local(Point::new(4, 100)), Point::new(-1, 95));

        let scaled = Canvas::new(10, 10, WHITE)
            .with_placement(Point::new(0, 0), 4)
            .centered_on(Point::new(50, 50));
        assert_eq!(scaled.origin(), Point::new(30, 30));
        assert_eq!(scaled.bounds(), Rect::new(30, 30, 40, 40));
        assert_eq!(scaled.to_local(Point::new(37, 69)), Point::new(1, 9));
        // truncation toward zero keeps the pixel just left of the canvas in column 0
        assert_eq!(scaled.to_local(Point::new(29, 30)), Point::new(0, 0));
    }

    #[test]
    fn invalidate_requeues_the_grid() {
        let mut canvas = blank(2, 2);
        canvas.set_pixel(BLACK, 1, 1);
        canvas.invalidate();
        assert_eq!(dirty(&canvas), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
