use serde::{Deserialize, Serialize};

/// Size of the host window in logical pixels (or cells, for terminal hosts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The shorter edge. Orientation-independent, so rotating the device
    /// does not change the scale factor.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}
