use crate::api::*;
use crate::components::transcript::TranscriptView;
use leptos::prelude::*;
use leptos::task::spawn_local;
use media_notes_lib::media_url::start_time_from_url;
use media_notes_lib::timestamp::format_seconds;
use media_notes_lib::{classify_url, PlayerKind, TranscriptConfig};

#[component]
pub fn App() -> impl IntoView {
    let config = TranscriptConfig::default();
    let (media_url, set_media_url) = signal::<Option<String>>(None);
    let (status, set_status) = signal("Looking for a media link...".to_string());

    spawn_local(async move {
        match fetch_media_url().await {
            Ok(Some(url)) => {
                leptos::logging::log!("Active note links to {}", url);
                set_media_url.set(Some(url));
            }
            Ok(None) => {
                set_status.set("Add a video link to this note to see its transcript.".to_string())
            }
            Err(e) => set_status.set(format!("Could not read the active note: {}", e)),
        }
    });

    let body = move || {
        let Some(url) = media_url.get() else {
            return view! { <p class="inline-status">{move || status.get()}</p> }.into_any();
        };
        match classify_url(&url) {
            Some(PlayerKind::YouTube { video_id }) => {
                let start = start_time_from_url(&url)
                    .map(|secs| format!("Link starts at {}", format_seconds(secs)));
                view! {
                    <p class="eyebrow">{video_id}</p>
                    {start.map(|text| view! { <p class="inline-status">{text}</p> })}
                    <TranscriptView media_url=url config=config.clone() />
                }
                .into_any()
            }
            Some(PlayerKind::NativeMedia) => view! {
                <p class="inline-status">"Transcripts are only available for YouTube videos."</p>
            }
            .into_any(),
            Some(PlayerKind::WebPage) | None => view! {
                <p class="inline-status">"This link does not point to playable media."</p>
            }
            .into_any(),
        }
    };

    view! {
        <main class="shell">
            <header class="hero">
                <p class="eyebrow">"Media notes"</p>
                <h1>"Transcript"</h1>
            </header>
            <section class="grid">{body}</section>
        </main>
    }
}
