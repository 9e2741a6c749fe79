use std::time::Duration;

use super::PositionSource;

/// Repeating playback-position poll that is only live while the player plays.
///
/// The poller owns the schedule, not a thread: the host's timer calls
/// [`PlaybackPoller::poll_due`] (or [`PlaybackPoller::tick_due`]) on the
/// control thread and the poller decides whether a tick is due.
#[derive(Debug, Clone)]
pub struct PlaybackPoller {
    interval: Duration,
    running: bool,
    next_due_ms: f64,
}

impl Default for PlaybackPoller {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_000))
    }
}

impl PlaybackPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            next_due_ms: 0.0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or restarts) the schedule; the first tick is due at `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        if !self.running {
            log::info!("Playback poll started ({:?} interval)", self.interval);
        }
        self.running = true;
        self.next_due_ms = now_ms;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Playback poll stopped");
        }
        self.running = false;
    }

    pub fn on_play(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    pub fn on_pause(&mut self) {
        self.stop();
    }

    /// Consumes the pending tick if one is due. A timer that fell behind by a
    /// whole interval or more resynchronises instead of firing a burst.
    pub fn tick_due(&mut self, now_ms: f64) -> bool {
        if !self.running || now_ms < self.next_due_ms {
            return false;
        }
        let interval_ms = self.interval.as_secs_f64() * 1000.0;
        self.next_due_ms = if now_ms - self.next_due_ms >= interval_ms {
            now_ms + interval_ms
        } else {
            self.next_due_ms + interval_ms
        };
        true
    }

    /// Polls `source` when a tick is due; `None` when idle, not due, or the
    /// player is not ready.
    pub fn poll_due<P>(&mut self, now_ms: f64, source: &mut P) -> Option<f64>
    where
        P: PositionSource + ?Sized,
    {
        if self.tick_due(now_ms) {
            source.poll()
        } else {
            None
        }
    }
}
