use media_notes_lib::scroll::{
    ease_in_out_quad, scroll_target, ElementRect, FrameScheduler, ScrollAnimator, ScrollConfig,
    ScrollOutcome, ScrollViewport, ViewportMetrics,
};

struct FakeViewport {
    metrics: ViewportMetrics,
    rects: Vec<Option<ElementRect>>,
    writes: Vec<f64>,
}

impl FakeViewport {
    fn new(scroll_top: f64, rects: Vec<Option<ElementRect>>) -> Self {
        Self {
            metrics: ViewportMetrics {
                content_height: 2000.0,
                container_height: 400.0,
                container_top: 0.0,
                scroll_top,
            },
            rects,
            writes: Vec::new(),
        }
    }
}

impl ScrollViewport for FakeViewport {
    fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    fn paragraph_rect(&self, index: usize) -> Option<ElementRect> {
        self.rects.get(index).copied().flatten()
    }

    fn set_scroll_top(&mut self, offset: f64) {
        // Element rects are client coordinates, so they move with the scroll.
        let delta = offset - self.metrics.scroll_top;
        for rect in self.rects.iter_mut().flatten() {
            rect.top -= delta;
        }
        self.metrics.scroll_top = offset;
        self.writes.push(offset);
    }
}

struct ManualScheduler {
    now: f64,
    pending: bool,
}

impl FrameScheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) {
        self.pending = true;
    }
}

// With container 400, element height 40 and bias 50, the target offset is
// `relative_top - 230`.
fn rect_for_target(target: f64, scroll_top: f64) -> ElementRect {
    ElementRect {
        top: target + 230.0 - scroll_top,
        height: 40.0,
    }
}

#[test]
fn easing_curve_matches_quadratic_in_out() {
    let cases = [(0.0, 0.0), (0.25, 0.125), (0.5, 0.5), (0.75, 0.875), (1.0, 1.0)];
    for (progress, expected) in cases {
        assert!((ease_in_out_quad(progress) - expected).abs() < 1e-12);
    }
}

#[test]
fn target_centres_element_with_bias() {
    let viewport = FakeViewport::new(100.0, vec![]);
    let rect = rect_for_target(300.0, 100.0);
    let target = scroll_target(&viewport.metrics(), &rect, 50.0);
    assert_eq!(target, Some(300.0));
}

#[test]
fn target_is_clamped_to_scrollable_range() {
    let viewport = FakeViewport::new(0.0, vec![]);
    let metrics = viewport.metrics();

    let near_top = ElementRect {
        top: 10.0,
        height: 40.0,
    };
    assert_eq!(scroll_target(&metrics, &near_top, 50.0), Some(0.0));

    let near_bottom = ElementRect {
        top: 1990.0,
        height: 40.0,
    };
    assert_eq!(scroll_target(&metrics, &near_bottom, 50.0), Some(1600.0));
}

#[test]
fn content_that_fits_is_not_scrolled() {
    let mut viewport = FakeViewport::new(0.0, vec![Some(rect_for_target(300.0, 0.0))]);
    viewport.metrics.content_height = 400.0;

    let mut animator = ScrollAnimator::new(ScrollConfig::default());
    assert_eq!(
        animator.retarget(&viewport, 0, 0.0),
        ScrollOutcome::NothingToScroll
    );
    assert!(!animator.is_animating());
}

#[test]
fn small_distance_is_skipped() {
    let mut viewport = FakeViewport::new(100.0, vec![Some(rect_for_target(104.0, 100.0))]);
    let mut animator = ScrollAnimator::default();

    assert_eq!(
        animator.retarget(&viewport, 0, 0.0),
        ScrollOutcome::WithinThreshold
    );
    assert!(!animator.tick(&mut viewport, 16.0));
    assert!(viewport.writes.is_empty());
}

#[test]
fn threshold_boundary_is_inclusive() {
    let viewport = FakeViewport::new(100.0, vec![Some(rect_for_target(110.0, 100.0))]);
    let mut animator = ScrollAnimator::default();
    assert_eq!(
        animator.retarget(&viewport, 0, 0.0),
        ScrollOutcome::WithinThreshold
    );
}

#[test]
fn missing_element_is_a_silent_skip() {
    let viewport = FakeViewport::new(0.0, vec![None]);
    let mut animator = ScrollAnimator::default();
    assert_eq!(
        animator.retarget(&viewport, 0, 0.0),
        ScrollOutcome::ElementMissing
    );
    assert_eq!(
        animator.retarget(&viewport, 5, 0.0),
        ScrollOutcome::ElementMissing
    );
}

#[test]
fn long_distance_animates_to_exact_target() {
    let mut viewport = FakeViewport::new(100.0, vec![Some(rect_for_target(300.0, 100.0))]);
    let mut animator = ScrollAnimator::default();

    assert_eq!(
        animator.retarget(&viewport, 0, 1000.0),
        ScrollOutcome::Started {
            from: 100.0,
            to: 300.0
        }
    );

    assert!(animator.tick(&mut viewport, 1150.0));
    assert!((viewport.metrics.scroll_top - 200.0).abs() < 1e-9);

    let mut now = 1150.0;
    while animator.tick(&mut viewport, now) {
        now += 16.0;
    }

    assert_eq!(viewport.metrics.scroll_top, 300.0);
    assert!(!animator.is_animating());
    assert!(viewport.writes.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn new_target_replaces_animation_from_actual_offset() {
    let rects = vec![
        Some(rect_for_target(300.0, 100.0)),
        Some(rect_for_target(900.0, 100.0)),
    ];
    let mut viewport = FakeViewport::new(100.0, rects);
    let mut animator = ScrollAnimator::default();

    animator.retarget(&viewport, 0, 0.0);
    animator.tick(&mut viewport, 150.0);
    let midway = viewport.metrics.scroll_top;

    let outcome = animator.retarget(&viewport, 1, 150.0);
    let state = animator.state().unwrap();
    assert!(matches!(outcome, ScrollOutcome::Started { .. }));
    assert_eq!(state.start_offset, midway);
    assert_eq!(state.started_at_ms, 150.0);
    assert!((state.target_offset - 900.0).abs() < 1e-9);

    let mut now = 150.0;
    while animator.tick(&mut viewport, now) {
        now += 16.0;
    }
    assert!((viewport.metrics.scroll_top - 900.0).abs() < 1e-9);
}

#[test]
fn scheduler_drives_frames_until_settled() {
    let mut viewport = FakeViewport::new(0.0, vec![Some(rect_for_target(500.0, 0.0))]);
    let mut scheduler = ManualScheduler {
        now: 0.0,
        pending: false,
    };
    let mut animator = ScrollAnimator::default();

    animator.scroll_to(&viewport, &mut scheduler, 0);
    let mut frames = 0;
    while scheduler.pending {
        scheduler.pending = false;
        scheduler.now += 16.0;
        animator.on_frame(&mut viewport, &mut scheduler);
        frames += 1;
    }

    assert_eq!(viewport.metrics.scroll_top, 500.0);
    assert!((18..=20).contains(&frames), "frames = {frames}");
}

#[test]
fn zero_duration_jumps_on_first_frame() {
    let mut viewport = FakeViewport::new(0.0, vec![Some(rect_for_target(500.0, 0.0))]);
    let mut animator = ScrollAnimator::new(ScrollConfig {
        duration_ms: 0.0,
        ..ScrollConfig::default()
    });

    animator.retarget(&viewport, 0, 0.0);
    assert!(!animator.tick(&mut viewport, 0.0));
    assert_eq!(viewport.writes, [500.0]);
}
