use crate::layout::{BoundingBox, Point, Rect};

/// Edge detector for a button that is sampled once per frame.
///
/// Only the press is reported, as a one-frame pulse; releasing is silent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonState {
    held: bool,
    just_pressed: bool,
    was_held: bool,
}
impl ButtonState {
    pub fn update(&mut self, held: bool) {
        self.held = held;
        self.just_pressed = held && !self.was_held;
        self.was_held = held;
    }

    pub fn held(&self) -> bool {
        self.held
    }

    /// `true` only on the frame where the button went down
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
}

/// The pointer, seen as a 1x1 hotspot in output coordinates
#[derive(Debug)]
pub struct Mouse {
    hotspot: BoundingBox,
    pub left: ButtonState,
    pub middle: ButtonState,
    pub right: ButtonState,
}
impl Default for Mouse {
    fn default() -> Self {
        Self {
            hotspot: BoundingBox::new(0, 0, 1, 1),
            left: ButtonState::default(),
            middle: ButtonState::default(),
            right: ButtonState::default(),
        }
    }
}
impl Mouse {
    /// Samples one frame of pointer input. `buttons` is `[left, middle, right]`.
    pub fn update(&mut self, position: Point, buttons: [bool; 3]) {
        let [left, middle, right] = buttons;
        self.hotspot = self.hotspot.moved_to(position);
        self.left.update(left);
        self.middle.update(middle);
        self.right.update(right);
    }

    pub fn position(&self) -> Point {
        self.hotspot.origin()
    }

    pub fn rect(&self) -> Rect {
        self.hotspot.bounds()
    }

    pub fn button(&self, button: Button) -> &ButtonState {
        match button {
            Button::Left => &self.left,
            Button::Middle => &self.middle,
            Button::Right => &self.right,
        }
    }
}
