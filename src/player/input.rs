/// Discrete movement command; one direction is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveDir {
    #[default]
    None,
    Forward,
    Backward,
    Left,
    Right,
}

/// Latched input the render loop reads every frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub move_dir: MoveDir,
    pub last_mouse: Option<(f32, f32)>,
    pub dragging: bool,
}

impl InputState {
    pub fn press(&mut self, dir: MoveDir) {
        self.move_dir = dir;
    }

    /// Any key release (or focus loss) stops movement.
    pub fn release(&mut self) {
        self.move_dir = MoveDir::None;
    }

    /// Returns the mouse delta since the previous drag sample.
    pub fn drag_to(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = match self.last_mouse {
            Some((lx, ly)) if self.dragging => (x - lx, y - ly),
            _ => (0.0, 0.0),
        };
        self.last_mouse = Some((x, y));
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_clears_direction() {
        let mut input = InputState::default();
        input.press(MoveDir::Left);
        assert_eq!(input.move_dir, MoveDir::Left);
        input.release();
        assert_eq!(input.move_dir, MoveDir::None);
    }

    #[test]
    fn test_drag_delta() {
        let mut input = InputState::default();
        assert_eq!(input.drag_to(10.0, 10.0), (0.0, 0.0));
        input.dragging = true;
        assert_eq!(input.drag_to(13.0, 8.0), (3.0, -2.0));
    }
}
