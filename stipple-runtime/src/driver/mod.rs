use crate::canvas::Canvas;
use crate::graphics::Color;
use crate::input::{Button, Mouse};
use crate::layout::{overlaps, Point};

/// What a single frame did to the stroke
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// No button held, nothing drawn
    Idle,
    /// A sample was fed to the canvas, at this grid coordinate
    Drew(Point),
    /// Button held but the pointer is off the canvas; the stroke was cut
    Outside,
}

/// Per-frame glue between the pointer and the canvas.
///
/// Owns the canvas; the event loop owns the painter. One call to [`Painter::step`]
/// per frame, after the mouse has been sampled for that frame.
pub struct Painter {
    pub canvas: Canvas,
    pub mouse: Mouse,
    pub paint: Color,
}
impl Painter {
    pub fn new(canvas: Canvas, paint: Color) -> Self {
        Self {
            canvas,
            mouse: Mouse::default(),
            paint,
        }
    }

    /// Samples the pointer for this frame. `buttons` is `[left, middle, right]`.
    pub fn sample(&mut self, position: Point, buttons: [bool; 3]) {
        self.mouse.update(position, buttons);
    }

    /// Runs one frame of stroke logic against the latest sample
    pub fn step(&mut self) -> Step {
        let left = *self.mouse.button(Button::Left);
        if !left.held() {
            if self.canvas.cursor().is_active() {
                log::debug!("stroke released");
            }
            self.canvas.reset_stroke();
            return Step::Idle;
        }
        if left.just_pressed() {
            log::debug!("stroke started at {}", self.mouse.position());
        }

        let step = if overlaps(self.mouse.rect(), self.canvas.bounds()) {
            let local = self.canvas.to_local(self.mouse.position());
            self.canvas.draw(self.paint, local.x, local.y);
            Step::Drew(local)
        } else {
            if self.canvas.cursor().is_active() {
                log::debug!("stroke left the canvas at {}", self.mouse.position());
            }
            self.canvas.reset_stroke();
            Step::Outside
        };
        self.canvas.advance_stroke();
        step
    }

    /// Runs a frame where the pointer is not over the window at all.
    /// Buttons are still sampled, but any stroke in progress is cut.
    pub fn pointer_lost(&mut self, buttons: [bool; 3]) -> Step {
        self.mouse.update(self.mouse.position(), buttons);
        if self.canvas.cursor().is_active() {
            log::debug!("stroke cut, pointer left the window");
        }
        self.canvas.reset_stroke();
        if self.mouse.button(Button::Left).held() {
            Step::Outside
        } else {
            Step::Idle
        }
    }

    /// Samples and steps in one go
    pub fn frame(&mut self, position: Point, buttons: [bool; 3]) -> Step {
        self.sample(position, buttons);
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{BLACK, WHITE};

    const HELD: [bool; 3] = [true, false, false];
    const UP: [bool; 3] = [false, false, false];

    fn painter() -> Painter {
        let canvas = Canvas::new(20, 20, WHITE).with_placement(Point::new(10, 10), 1);
        let mut painter = Painter::new(canvas, BLACK);
        painter.canvas.render(&mut Vec::<(Point, Color)>::new());
        painter
    }

    #[test]
    fn samples_are_converted_to_grid_coordinates() {
        let mut painter = painter();
        assert_eq!(painter.frame(Point::new(13, 14), HELD), Step::Drew(Point::new(3, 4)));
        assert_eq!(painter.canvas.pixel(3, 4), Some(BLACK));
    }

    #[test]
    fn release_resets_the_stroke() {
        let mut painter = painter();
        painter.frame(Point::new(10, 10), HELD);
        assert!(painter.canvas.cursor().is_active());

        assert_eq!(painter.frame(Point::new(15, 10), UP), Step::Idle);
        assert!(!painter.canvas.cursor().is_active());

        // a new press does not join up with the old stroke
        painter.frame(Point::new(20, 20), HELD);
        assert_eq!(painter.canvas.dirty(), [Point::new(0, 0), Point::new(10, 10)]);
    }

    #[test]
    fn leaving_the_canvas_cuts_the_stroke() {
        let mut painter = painter();
        painter.frame(Point::new(12, 12), HELD);
        assert_eq!(painter.frame(Point::new(0, 12), HELD), Step::Outside);
        assert!(!painter.canvas.cursor().is_active());

        painter.frame(Point::new(15, 12), HELD);
        assert_eq!(painter.canvas.dirty(), [Point::new(2, 2), Point::new(5, 2)]);
    }

    #[test]
    fn losing_the_pointer_cuts_the_stroke() {
        let mut painter = painter();
        painter.frame(Point::new(12, 12), HELD);
        assert_eq!(painter.pointer_lost(HELD), Step::Outside);
        assert!(!painter.canvas.cursor().is_active());

        // coming back elsewhere starts over instead of joining (2, 2)
        painter.frame(Point::new(25, 12), HELD);
        assert_eq!(painter.canvas.dirty(), [Point::new(2, 2), Point::new(15, 2)]);

        assert_eq!(painter.pointer_lost(UP), Step::Idle);
    }

    #[test]
    fn pointer_touching_the_border_still_draws() {
        let mut painter = painter();
        // the pointer at x = 9 touches the canvas' left edge at x = 10
        assert_eq!(painter.frame(Point::new(9, 12), HELD), Step::Drew(Point::new(-1, 2)));
        // the cell is off the grid, so nothing is plotted
        assert!(painter.canvas.dirty().is_empty());
    }

    #[test]
    fn consecutive_frames_join_up() {
        let mut painter = painter();
        painter.frame(Point::new(10, 10), HELD);
        painter.frame(Point::new(14, 10), HELD);
        painter.frame(Point::new(14, 13), HELD);

        assert_eq!(
            painter.canvas.dirty(),
            [
                Point::new(0, 0),
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(4, 0),
                Point::new(4, 1),
                Point::new(4, 2),
            ]
        );
    }
}
