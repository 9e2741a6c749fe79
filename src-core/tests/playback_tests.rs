use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use media_notes_lib::playback::{
    seek_to_unit, JsonPositionStore, MemoryPositionStore, PlaybackPoller, PlayerRegistry,
    PositionSource, PositionStore, SeekSink,
};

#[derive(Default)]
struct RecordingSink {
    seeks: Vec<f64>,
}

impl SeekSink for RecordingSink {
    fn seek_to(&mut self, seconds: f64) {
        self.seeks.push(seconds);
    }
}

struct CountingSource {
    next_ms: f64,
}

impl PositionSource for CountingSource {
    fn poll(&mut self) -> Option<f64> {
        self.next_ms += 1000.0;
        Some(self.next_ms)
    }
}

#[test]
fn click_seeks_to_unit_start_in_seconds() {
    let mut sink = RecordingSink::default();
    seek_to_unit(83_500.0, &mut sink);
    seek_to_unit(0.0, &mut sink);
    assert_eq!(sink.seeks, [83.5, 0.0]);
}

#[test]
fn registry_restores_and_flushes_positions() {
    let mut store = MemoryPositionStore::new();
    store.save("https://youtu.be/abc", 42.0).unwrap();

    let mut registry = PlayerRegistry::new();
    let known = registry.register("https://youtu.be/abc", &store);
    let fresh = registry.register("https://example.com/a.mp4", &store);
    assert_ne!(known, fresh);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(known).unwrap().last_position_secs, 42.0);
    assert_eq!(registry.get(fresh).unwrap().last_position_secs, 0.0);

    assert!(registry.update_position(fresh, 12.5));
    assert!(registry.set_playing(fresh, true));
    assert!(registry.get(fresh).unwrap().playing);

    let removed = registry.unregister(fresh, &mut store).unwrap().unwrap();
    assert_eq!(removed.last_position_secs, 12.5);
    assert_eq!(store.load("https://example.com/a.mp4"), Some(12.5));
    assert_eq!(registry.len(), 1);

    assert!(registry.unregister(fresh, &mut store).unwrap().is_none());
    assert!(!registry.update_position(fresh, 1.0));
}

#[test]
fn flush_all_saves_without_unmounting() {
    let mut store = MemoryPositionStore::new();
    let mut registry = PlayerRegistry::new();
    let id = registry.register("https://youtu.be/abc", &store);
    if let Some(entry) = registry.get_mut(id) {
        entry.last_position_secs = 99.0;
    }

    registry.flush_all(&mut store).unwrap();
    assert_eq!(store.load("https://youtu.be/abc"), Some(99.0));
    assert!(!registry.is_empty());
}

#[test]
fn json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("positions.json");

    let mut store = JsonPositionStore::open(&path).unwrap();
    assert_eq!(store.load("https://youtu.be/abc"), None);
    store.save("https://youtu.be/abc", 61.0).unwrap();

    let reopened = JsonPositionStore::open(&path).unwrap();
    assert_eq!(reopened.load("https://youtu.be/abc"), Some(61.0));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn json_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(JsonPositionStore::open(&path).is_err());
}

#[test]
fn poller_ticks_only_while_running() {
    let mut poller = PlaybackPoller::new(Duration::from_millis(1000));
    let mut source = CountingSource { next_ms: 0.0 };

    assert!(!poller.is_running());
    assert_eq!(poller.poll_due(0.0, &mut source), None);

    poller.on_play(100.0);
    assert!(poller.is_running());
    assert_eq!(poller.poll_due(100.0, &mut source), Some(1000.0));
    assert_eq!(poller.poll_due(600.0, &mut source), None);
    assert_eq!(poller.poll_due(1100.0, &mut source), Some(2000.0));

    poller.on_pause();
    assert!(!poller.is_running());
    assert_eq!(poller.poll_due(2100.0, &mut source), None);
    assert_eq!(poller.poll_due(5000.0, &mut source), None);
}

#[test]
fn late_timer_resynchronises_instead_of_bursting() {
    let mut poller = PlaybackPoller::new(Duration::from_millis(1000));
    poller.start(0.0);

    assert!(poller.tick_due(0.0));
    assert!(poller.tick_due(4500.0));
    assert!(!poller.tick_due(4600.0));
    assert!(!poller.tick_due(5400.0));
    assert!(poller.tick_due(5500.0));
}

#[test]
fn restarting_makes_the_next_tick_due_immediately() {
    let mut poller = PlaybackPoller::default();
    poller.start(0.0);
    assert!(poller.tick_due(0.0));
    assert!(!poller.tick_due(300.0));

    poller.start(300.0);
    assert!(poller.tick_due(300.0));
    assert_eq!(poller.interval(), Duration::from_secs(1));
}

#[test]
fn polling_runs_on_the_calling_thread() {
    // Rc keeps the source !Send.
    struct SharedClock(Rc<Cell<f64>>);

    impl PositionSource for SharedClock {
        fn poll(&mut self) -> Option<f64> {
            Some(self.0.get())
        }
    }

    let clock = Rc::new(Cell::new(0.0));
    let mut source = SharedClock(clock.clone());
    let mut poller = PlaybackPoller::new(Duration::from_millis(250));
    poller.on_play(0.0);

    let mut seen = Vec::new();
    for step in 0..8 {
        let now = f64::from(step) * 125.0;
        clock.set(now);
        if let Some(time_ms) = poller.poll_due(now, &mut source) {
            seen.push(time_ms);
        }
    }
    assert_eq!(seen, [0.0, 250.0, 500.0, 750.0]);
}
