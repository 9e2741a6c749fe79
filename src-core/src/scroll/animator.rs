use super::layout::{scroll_target, ScrollViewport};

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollConfig {
    /// Upward shift applied when centring, leaving more context below.
    pub bias_px: f64,
    /// Distances at or below this are treated as already on target.
    pub threshold_px: f64,
    pub duration_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            bias_px: 50.0,
            threshold_px: 10.0,
            duration_ms: 300.0,
        }
    }
}

/// Source of frame timing. `request_frame` schedules exactly one future call
/// to [`ScrollAnimator::on_frame`].
pub trait FrameScheduler {
    fn now_ms(&self) -> f64;
    fn request_frame(&mut self);
}

/// In-flight animation snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub start_offset: f64,
    pub target_offset: f64,
    pub started_at_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AnimationState {
    Idle,
    Animating(ScrollState),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    Started { from: f64, to: f64 },
    NothingToScroll,
    ElementMissing,
    WithinThreshold,
}

pub fn ease_in_out_quad(progress: f64) -> f64 {
    if progress < 0.5 {
        2.0 * progress * progress
    } else {
        -1.0 + (4.0 - 2.0 * progress) * progress
    }
}

pub struct ScrollAnimator {
    config: ScrollConfig,
    state: AnimationState,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: AnimationState::Idle,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> Option<ScrollState> {
        match self.state {
            AnimationState::Idle => None,
            AnimationState::Animating(state) => Some(state),
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating(_))
    }

    /// Aims at `paragraph`. Any in-flight animation is dropped; a new one
    /// starts from the viewport's actual offset.
    pub fn retarget<V: ScrollViewport>(
        &mut self,
        viewport: &V,
        paragraph: usize,
        now_ms: f64,
    ) -> ScrollOutcome {
        let metrics = viewport.metrics();
        let Some(rect) = viewport.paragraph_rect(paragraph) else {
            log::debug!("Scroll skipped: paragraph {paragraph} not mounted");
            return ScrollOutcome::ElementMissing;
        };
        let Some(target) = scroll_target(&metrics, &rect, self.config.bias_px) else {
            self.state = AnimationState::Idle;
            return ScrollOutcome::NothingToScroll;
        };

        let current = metrics.scroll_top;
        if (target - current).abs() <= self.config.threshold_px {
            self.state = AnimationState::Idle;
            return ScrollOutcome::WithinThreshold;
        }

        if self.is_animating() {
            log::debug!("Scroll animation replaced, new target {target:.1}");
        } else {
            log::debug!("Scroll animation {current:.1} -> {target:.1}");
        }
        self.state = AnimationState::Animating(ScrollState {
            start_offset: current,
            target_offset: target,
            started_at_ms: now_ms,
        });
        ScrollOutcome::Started {
            from: current,
            to: target,
        }
    }

    /// Advances the animation to `now_ms` and writes the offset. Returns
    /// `true` while another frame is needed.
    pub fn tick<V: ScrollViewport>(&mut self, viewport: &mut V, now_ms: f64) -> bool {
        let AnimationState::Animating(state) = self.state else {
            return false;
        };

        let progress = if self.config.duration_ms > 0.0 {
            ((now_ms - state.started_at_ms) / self.config.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            viewport.set_scroll_top(state.target_offset);
            self.state = AnimationState::Idle;
            return false;
        }

        let eased = ease_in_out_quad(progress);
        viewport.set_scroll_top(
            state.start_offset + (state.target_offset - state.start_offset) * eased,
        );
        true
    }

    pub fn cancel(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// Retargets and, when an animation started, asks for the first frame.
    pub fn scroll_to<V, S>(
        &mut self,
        viewport: &V,
        scheduler: &mut S,
        paragraph: usize,
    ) -> ScrollOutcome
    where
        V: ScrollViewport,
        S: FrameScheduler,
    {
        let outcome = self.retarget(viewport, paragraph, scheduler.now_ms());
        if matches!(outcome, ScrollOutcome::Started { .. }) {
            scheduler.request_frame();
        }
        outcome
    }

    /// Frame callback: advances and re-requests until the animation settles.
    pub fn on_frame<V, S>(&mut self, viewport: &mut V, scheduler: &mut S)
    where
        V: ScrollViewport,
        S: FrameScheduler,
    {
        if self.tick(viewport, scheduler.now_ms()) {
            scheduler.request_frame();
        }
    }
}
