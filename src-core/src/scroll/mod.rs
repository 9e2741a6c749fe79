pub mod animator;
pub mod layout;

pub use animator::{
    ease_in_out_quad, FrameScheduler, ScrollAnimator, ScrollConfig, ScrollOutcome, ScrollState,
};
pub use layout::{scroll_target, ElementRect, ScrollViewport, ViewportMetrics};
