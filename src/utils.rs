use leptos::task::spawn_local;
use leptos::web_sys::{Element, HtmlInputElement};
use media_notes_lib::playback::SeekSink;
use media_notes_lib::scroll::{ElementRect, FrameScheduler, ScrollViewport, ViewportMetrics};
use wasm_bindgen::JsCast;

use crate::api::player_seek;

pub fn input_value(ev: &leptos::ev::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn now_ms() -> f64 {
    leptos::web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Transcript scroll container measured through the DOM.
pub struct DomViewport {
    container: Element,
}

impl DomViewport {
    pub fn new(container: Element) -> Self {
        Self { container }
    }
}

impl ScrollViewport for DomViewport {
    fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics {
            content_height: self.container.scroll_height() as f64,
            container_height: self.container.client_height() as f64,
            container_top: self.container.get_bounding_client_rect().top(),
            scroll_top: self.container.scroll_top() as f64,
        }
    }

    fn paragraph_rect(&self, index: usize) -> Option<ElementRect> {
        let element = self
            .container
            .query_selector(&format!("[data-paragraph=\"{index}\"]"))
            .ok()
            .flatten()?;
        let rect = element.get_bounding_client_rect();
        Some(ElementRect {
            top: rect.top(),
            height: rect.height(),
        })
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.container.set_scroll_top(offset.round() as i32);
    }
}

/// Records whether the animator wants another frame; the caller turns that
/// into a `requestAnimationFrame`.
#[derive(Default)]
pub struct RafScheduler {
    pub requested: bool,
}

impl FrameScheduler for RafScheduler {
    fn now_ms(&self) -> f64 {
        now_ms()
    }

    fn request_frame(&mut self) {
        self.requested = true;
    }
}

/// Seeks the host player; failures are only logged.
pub struct HostSeek;

impl SeekSink for HostSeek {
    fn seek_to(&mut self, seconds: f64) {
        spawn_local(async move {
            if let Err(err) = player_seek(seconds).await {
                leptos::logging::warn!("Seek to {seconds}s failed: {err}");
            }
        });
    }
}
