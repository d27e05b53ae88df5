use scaled_protocol::ViewportSize;

/// The host environment's window query.
pub trait WindowMetrics {
    fn window_size(&self) -> ViewportSize;
}

/// A host whose window never changes size. Useful for static hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWindow(pub ViewportSize);

impl FixedWindow {
    pub fn new(width: f64, height: f64) -> Self {
        Self(ViewportSize::new(width, height))
    }
}

impl WindowMetrics for FixedWindow {
    fn window_size(&self) -> ViewportSize {
        self.0
    }
}

impl WindowMetrics for ViewportSize {
    fn window_size(&self) -> ViewportSize {
        *self
    }
}
