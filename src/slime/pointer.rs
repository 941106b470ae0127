//! Mouse/touch tracking for the slime cursor
//!
//! The cursor only exists while a button or finger is down. Moves with
//! nothing pressed are ignored.

use glam::Vec2;

/// Pressed-pointer state fed to [`FieldState::cursor`](super::FieldState)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    pressed: bool,
    cursor: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse down or touch start at a canvas-local position
    pub fn press(&mut self, pos: Vec2) {
        self.pressed = true;
        self.cursor = Some(pos);
    }

    /// Mouse or touch move; only tracked while pressed
    pub fn moved(&mut self, pos: Vec2) {
        if self.pressed {
            self.cursor = Some(pos);
        }
    }

    /// Mouse up, mouse leave or touch end
    pub fn release(&mut self) {
        self.pressed = false;
        self.cursor = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }
}

/// Convert client coordinates to canvas-local ones
#[inline]
pub fn to_canvas(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_without_press_ignored() {
        let mut pointer = PointerTracker::new();
        pointer.moved(Vec2::new(10.0, 10.0));
        assert_eq!(pointer.cursor(), None);
        assert!(!pointer.is_pressed());
    }

    #[test]
    fn test_press_move_release() {
        let mut pointer = PointerTracker::new();
        pointer.press(Vec2::new(1.0, 2.0));
        assert_eq!(pointer.cursor(), Some(Vec2::new(1.0, 2.0)));

        pointer.moved(Vec2::new(5.0, 6.0));
        assert_eq!(pointer.cursor(), Some(Vec2::new(5.0, 6.0)));

        pointer.release();
        assert_eq!(pointer.cursor(), None);

        pointer.moved(Vec2::new(9.0, 9.0));
        assert_eq!(pointer.cursor(), None);
    }

    #[test]
    fn test_to_canvas_offsets_rect() {
        let local = to_canvas(Vec2::new(120.0, 80.0), Vec2::new(20.0, 30.0));
        assert_eq!(local, Vec2::new(100.0, 50.0));
    }
}
