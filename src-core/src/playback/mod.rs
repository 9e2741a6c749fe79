mod poller;
mod registry;
mod store;

pub use poller::PlaybackPoller;
pub use registry::{PlayerEntry, PlayerId, PlayerRegistry};
pub use store::{
    default_store_path, JsonPositionStore, MemoryPositionStore, PositionStore, StoreError,
};

/// Pull-based access to the player's clock.
pub trait PositionSource {
    /// Current playback time in milliseconds, `None` while the player is not ready.
    fn poll(&mut self) -> Option<f64>;
}

pub trait SeekSink {
    fn seek_to(&mut self, seconds: f64);
}

/// Click on a transcript unit: jump the player to the unit's start.
pub fn seek_to_unit<S: SeekSink + ?Sized>(offset_ms: f64, sink: &mut S) {
    let seconds = offset_ms / 1000.0;
    log::debug!("Seeking to {seconds:.3}s from transcript click");
    sink.seek_to(seconds);
}
