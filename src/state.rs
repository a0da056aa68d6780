/// Degrees added to each camera rotation every frame
pub const ROTATION_STEP: f64 = 1.0;

/// Scene state carried between frames
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneState {
    /// Accumulated camera rotation around the X-axis, in degrees
    pub rotation_x: f64,
    /// Accumulated camera rotation around the Y-axis, in degrees
    pub rotation_y: f64,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances both rotations by one frame. Angles are never wrapped.
    pub fn advance(&mut self) {
        self.rotation_x += ROTATION_STEP;
        self.rotation_y += ROTATION_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_grow_by_a_fixed_step() {
        let mut state = SceneState::new();
        let mut previous = state.clone();
        for frame in 1..=1000 {
            state.advance();
            assert_eq!(state.rotation_x - previous.rotation_x, ROTATION_STEP);
            assert_eq!(state.rotation_y - previous.rotation_y, ROTATION_STEP);
            assert_eq!(state.rotation_x, frame as f64 * ROTATION_STEP);
            previous = state.clone();
        }
        // No wrap at 360 degrees
        assert_eq!(state.rotation_x, 1000.0);
    }
}
