/// Vertical extent of a rendered element, in the same coordinate space as
/// [`ViewportMetrics::container_top`] (client coordinates in a browser).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

/// Scroll container measurements taken at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Full height of the scrollable content.
    pub content_height: f64,
    /// Visible height of the container.
    pub container_height: f64,
    /// Top edge of the container in the element coordinate space.
    pub container_top: f64,
    pub scroll_top: f64,
}

impl ViewportMetrics {
    pub fn scrollable_height(&self) -> f64 {
        (self.content_height - self.container_height).max(0.0)
    }

    pub fn can_scroll(&self) -> bool {
        self.content_height > self.container_height
    }

    /// Element top relative to the start of the scrolled content.
    pub fn relative_top(&self, rect: &ElementRect) -> f64 {
        rect.top - self.container_top + self.scroll_top
    }
}

/// Rendered transcript as seen by the animator. Implemented over the DOM by
/// the UI and over plain numbers in tests.
pub trait ScrollViewport {
    fn metrics(&self) -> ViewportMetrics;

    /// `None` while the paragraph is not mounted.
    fn paragraph_rect(&self, index: usize) -> Option<ElementRect>;

    fn set_scroll_top(&mut self, offset: f64);
}

/// Offset that centres `rect` in the container, shifted up by `bias_px`,
/// clamped to the scrollable range. `None` when the content fits.
pub fn scroll_target(metrics: &ViewportMetrics, rect: &ElementRect, bias_px: f64) -> Option<f64> {
    if !metrics.can_scroll() {
        return None;
    }

    let target = metrics.relative_top(rect) - metrics.container_height / 2.0 + rect.height / 2.0
        - bias_px;
    Some(target.clamp(0.0, metrics.scrollable_height()))
}
