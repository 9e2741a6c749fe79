use crate::api::*;
use crate::utils::{input_value, now_ms, DomViewport, HostSeek, RafScheduler};
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use media_notes_lib::notes::timestamp_link;
use media_notes_lib::playback::{seek_to_unit, PlaybackPoller};
use media_notes_lib::scroll::ScrollAnimator;
use media_notes_lib::transcript::{ActiveLocation, PanelStatus, Paragraph, TranscriptPanel};
use media_notes_lib::{format_timestamp, parse_timestamp, TranscriptConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{prelude::*, JsCast};

/// Host timer feeding a [`PlaybackPoller`]: it wakes several times per poll
/// interval and runs `on_due` whenever the poller reports a tick is due.
/// Dropping it clears the interval.
struct PollTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl PollTimer {
    fn start(poller: StoredValue<PlaybackPoller>, on_due: impl Fn() + 'static) -> Option<Self> {
        let period = poller
            .try_with_value(|poller| poller.interval().as_millis() / 4)
            .unwrap_or(250)
            .max(16);
        let callback = Closure::wrap(Box::new(move || {
            let due = poller
                .try_update_value(|poller| poller.tick_due(now_ms()))
                .unwrap_or(false);
            if due {
                on_due();
            }
        }) as Box<dyn FnMut()>);

        let window = leptos::web_sys::window()?;
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(period).unwrap_or(i32::MAX),
        ) {
            Ok(handle) => Some(Self {
                handle,
                _callback: callback,
            }),
            Err(e) => {
                leptos::logging::error!("Failed to start playback polling: {:?}", e);
                None
            }
        }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        if let Some(window) = leptos::web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// A host event listener; dropping it unlistens and frees the callback.
struct EventSubscription {
    unlisten: js_sys::Function,
    _callback: Closure<dyn FnMut(JsValue)>,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.unlisten.call0(&JsValue::NULL) {
            leptos::logging::warn!("Failed to unlisten: {:?}", e);
        }
    }
}

/// Drives the scroll animator from `requestAnimationFrame`, keeping at most
/// one frame request in flight.
#[derive(Clone, Copy)]
struct ScrollDriver {
    container: NodeRef<Div>,
    animator: StoredValue<ScrollAnimator>,
    frame_pending: StoredValue<bool>,
}

impl ScrollDriver {
    fn scroll_to(self, paragraph: usize) {
        let Some(element) = self.container.try_get_untracked().flatten() else {
            return;
        };
        let viewport = DomViewport::new(element.into());
        let mut scheduler = RafScheduler::default();
        let _ = self
            .animator
            .try_update_value(|animator| animator.scroll_to(&viewport, &mut scheduler, paragraph));
        if scheduler.requested {
            self.request_frame();
        }
    }

    fn request_frame(self) {
        let already_pending = self
            .frame_pending
            .try_update_value(|pending| std::mem::replace(pending, true))
            .unwrap_or(true);
        if already_pending {
            return;
        }

        let callback = Closure::once_into_js(move || self.on_frame());
        if let Some(window) = leptos::web_sys::window() {
            if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
                leptos::logging::error!("requestAnimationFrame failed: {:?}", err);
                let _ = self.frame_pending.try_update_value(|pending| *pending = false);
            }
        }
    }

    fn on_frame(self) {
        if self
            .frame_pending
            .try_update_value(|pending| *pending = false)
            .is_none()
        {
            return;
        }
        let Some(element) = self.container.try_get_untracked().flatten() else {
            let _ = self.animator.try_update_value(ScrollAnimator::cancel);
            return;
        };
        let mut viewport = DomViewport::new(element.into());
        let mut scheduler = RafScheduler::default();
        let _ = self
            .animator
            .try_update_value(|animator| animator.on_frame(&mut viewport, &mut scheduler));
        if scheduler.requested {
            self.request_frame();
        }
    }
}

fn render_paragraph(
    index: usize,
    paragraph: Paragraph,
    active: ReadSignal<ActiveLocation>,
) -> impl IntoView {
    let sentences = paragraph
        .sentences
        .into_iter()
        .enumerate()
        .map(|(position, sentence)| {
            let offset_ms = sentence.start_offset_ms;
            let is_active = move || {
                let location = active.get();
                location.paragraph == Some(index) && location.sentence == Some(position)
            };
            view! {
                <span
                    class="transcript-sentence"
                    class:active=is_active
                    title=format_timestamp(Some(offset_ms / 1000.0))
                    on:click=move |_| seek_to_unit(offset_ms, &mut HostSeek)
                >
                    {sentence.text}
                    " "
                </span>
            }
        })
        .collect_view();

    view! {
        <p
            class="transcript-paragraph"
            class:current=move || active.get().paragraph == Some(index)
            data-paragraph=index.to_string()
        >
            {sentences}
        </p>
    }
}

#[component]
pub fn TranscriptView(media_url: String, config: TranscriptConfig) -> impl IntoView {
    let (paragraphs, set_paragraphs) = signal(Vec::<Paragraph>::new());
    let (status, set_status) = signal(PanelStatus::Idle);
    let (active, set_active) = signal(ActiveLocation::NONE);
    let (current_ms, set_current_ms) = signal::<Option<f64>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);

    let media_url = StoredValue::new(media_url);
    let language = StoredValue::new(config.preferred_language.clone());
    let panel = StoredValue::new(TranscriptPanel::new(&config));
    let poller = StoredValue::new(PlaybackPoller::new(config.poll_interval()));
    let timer = StoredValue::new_local(None::<PollTimer>);
    let subscription = StoredValue::new_local(None::<EventSubscription>);
    let container = NodeRef::<Div>::new();
    let driver = ScrollDriver {
        container,
        animator: StoredValue::new(ScrollAnimator::new(config.scroll_config())),
        frame_pending: StoredValue::new(false),
    };

    let load = move || {
        let Some(ticket) = panel.try_update_value(TranscriptPanel::begin_fetch) else {
            return;
        };
        set_status.set(PanelStatus::Loading);
        let url = media_url.get_value();
        let language = language.get_value();
        spawn_local(async move {
            let result = fetch_transcript(&url, &language).await;
            let applied = panel
                .try_update_value(|panel| panel.apply_fetch(ticket, result))
                .unwrap_or(false);
            if !applied {
                leptos::logging::log!("Dropping stale transcript response #{}", ticket.sequence());
                return;
            }
            panel.with_value(|panel| {
                set_paragraphs.set(panel.paragraphs().to_vec());
                set_status.set(panel.status().clone());
            });
            set_active.set(ActiveLocation::NONE);
        });
    };

    let tick = move || {
        spawn_local(async move {
            let Ok(Some(time_ms)) = player_current_time().await else {
                return;
            };
            set_current_ms.set(Some(time_ms));
            let Some(Some(location)) = panel.try_update_value(|panel| panel.on_time(time_ms))
            else {
                return;
            };
            let previous = active.get_untracked();
            set_active.set(location);
            if location.paragraph != previous.paragraph {
                if let Some(index) = location.paragraph {
                    driver.scroll_to(index);
                }
            }
        });
    };

    let set_playing = move |playing: bool| {
        let open = panel
            .try_with_value(|panel| !panel.is_closed())
            .unwrap_or(false);
        if !open {
            return;
        }
        if !playing {
            poller.update_value(PlaybackPoller::on_pause);
            timer.set_value(None);
            return;
        }

        poller.update_value(|poller| poller.on_play(now_ms()));
        if poller.try_update_value(|poller| poller.tick_due(now_ms())) == Some(true) {
            tick();
        }
        if timer.with_value(Option::is_none) {
            timer.set_value(PollTimer::start(poller, tick));
        }
    };

    load();

    spawn_local(async move {
        let callback = Closure::wrap(Box::new(move |event: JsValue| {
            let Ok(payload) = js_sys::Reflect::get(&event, &"payload".into()) else {
                leptos::logging::warn!("Event received but no payload found: {:?}", event);
                return;
            };
            match serde_wasm_bindgen::from_value::<PlayerStateDto>(payload) {
                Ok(state) => set_playing(state.playing),
                Err(e) => leptos::logging::error!("Failed to parse PlayerStateDto: {:?}", e),
            }
        }) as Box<dyn FnMut(JsValue)>);

        match listen_event("player_state", &callback).await {
            Ok(unlisten) => {
                let listener = EventSubscription {
                    unlisten,
                    _callback: callback,
                };
                // A view torn down while `listen` was pending drops the
                // listener here, which unlistens right away.
                let _ = subscription.try_update_value(move |slot| *slot = Some(listener));
            }
            Err(e) => leptos::logging::error!("Failed to listen for player_state: {}", e),
        }

        if let Ok(true) = player_is_playing().await {
            set_playing(true);
        }
    });

    on_cleanup(move || {
        let _ = panel.try_update_value(TranscriptPanel::close);
        let _ = timer.try_update_value(|timer| *timer = None);
        let _ = subscription.try_update_value(|subscription| *subscription = None);
        let _ = poller.try_update_value(PlaybackPoller::stop);
        let _ = driver.animator.try_update_value(ScrollAnimator::cancel);
    });

    let insert_timestamp = move |_| {
        spawn_local(async move {
            let result = match player_current_time().await {
                Ok(Some(time_ms)) => insert_into_note(&timestamp_link(time_ms / 1000.0)).await,
                Ok(None) => Err("Player is not ready yet.".to_string()),
                Err(err) => Err(err),
            };
            set_notice.set(result.err());
        });
    };

    let copy_transcript = move |_| {
        let text = panel.with_value(TranscriptPanel::full_text);
        if text.is_empty() {
            return;
        }
        spawn_local(async move {
            set_notice.set(insert_into_note(&text).await.err());
        });
    };

    let jump_to = move |ev: leptos::ev::Event| match parse_timestamp(&input_value(&ev)) {
        Ok(seconds) => {
            set_notice.set(None);
            seek_to_unit(seconds as f64 * 1000.0, &mut HostSeek);
        }
        Err(err) => set_notice.set(Some(err.to_string())),
    };

    view! {
        <div class="card transcript-card">
            <div class="card-header">
                <p class="eyebrow">"Transcript"</p>
                <span class="clock">
                    {move || format_timestamp(current_ms.get().map(|ms| ms / 1000.0))}
                </span>
            </div>

            <div class="toolbar">
                <button class="ghost" on:click=insert_timestamp>"Insert timestamp"</button>
                <button class="ghost" on:click=copy_transcript>"Copy transcript"</button>
                <input class="jump" placeholder="Jump to 1:23" on:change=jump_to />
            </div>

            {move || notice.get().map(|msg| view! { <p class="error-msg">{msg}</p> })}

            <div class="transcript-scroll" node_ref=container>
                {move || match status.get() {
                    PanelStatus::Loading => {
                        view! { <p class="inline-status">"Loading transcript..."</p> }.into_any()
                    }
                    PanelStatus::Failed(message) => {
                        view! {
                            <p class="error-msg">{message}</p>
                            <button class="ghost" on:click=move |_| load()>"Retry"</button>
                        }
                            .into_any()
                    }
                    PanelStatus::Ready if paragraphs.get().is_empty() => {
                        view! { <p class="inline-status">"This transcript is empty."</p> }
                            .into_any()
                    }
                    PanelStatus::Idle | PanelStatus::Ready => ().into_any(),
                }}
                <For
                    each=move || paragraphs.get().into_iter().enumerate()
                    key=|(index, paragraph)| (*index, paragraph.start_offset_ms.to_bits())
                    children=move |(index, paragraph)| render_paragraph(index, paragraph, active)
                />
            </div>
        </div>
    }
}
