use media_notes_lib::transcript::CaptionLine;
use media_notes_lib::TranscriptError;
use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], catch)]
    async fn listen(
        event: &str,
        handler: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<JsValue, JsValue>;
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct PlayerStateDto {
    pub playing: bool,
}

#[derive(Serialize)]
struct FetchTranscriptArgs<'a> {
    url: &'a str,
    language: &'a str,
}

#[derive(Serialize)]
struct SeekArgs {
    seconds: f64,
}

#[derive(Serialize)]
struct InsertTextArgs<'a> {
    text: &'a str,
}

async fn invoke_no_args(cmd: &str) -> Result<JsValue, String> {
    invoke(cmd, JsValue::NULL).await.map_err(extract_error)
}

pub async fn fetch_media_url() -> Result<Option<String>, String> {
    let value = invoke_no_args("current_media_url").await?;
    Ok(value.as_string().filter(|url| !url.trim().is_empty()))
}

/// Failures come back as the host's `{ kind, detail }` payload and are
/// rebuilt into the matching [`TranscriptError`].
pub async fn fetch_transcript(
    url: &str,
    language: &str,
) -> Result<Vec<CaptionLine>, TranscriptError> {
    let args = serde_wasm_bindgen::to_value(&FetchTranscriptArgs { url, language })
        .map_err(|err| TranscriptError::Transport(err.to_string()))?;
    let value = invoke("fetch_transcript", args)
        .await
        .map_err(transcript_error)?;
    serde_wasm_bindgen::from_value(value).map_err(|err| TranscriptError::Parse(err.to_string()))
}

fn transcript_error(err: JsValue) -> TranscriptError {
    serde_wasm_bindgen::from_value::<TranscriptError>(err.clone())
        .unwrap_or_else(|_| TranscriptError::Transport(extract_error(err)))
}

/// Subscribes `handler` to a host event. Resolves to the unlisten function.
pub async fn listen_event(
    event: &str,
    handler: &Closure<dyn FnMut(JsValue)>,
) -> Result<js_sys::Function, String> {
    let unlisten = listen(event, handler).await.map_err(extract_error)?;
    unlisten
        .dyn_into::<js_sys::Function>()
        .map_err(|_| format!("listen({event}) did not return an unlisten function"))
}

/// Playback time in milliseconds, `None` while the player is not ready.
pub async fn player_current_time() -> Result<Option<f64>, String> {
    let value = invoke_no_args("player_current_time").await?;
    Ok(value.as_f64().filter(|ms| ms.is_finite()))
}

pub async fn player_is_playing() -> Result<bool, String> {
    let value = invoke_no_args("player_is_playing").await?;
    Ok(value.as_bool().unwrap_or(false))
}

pub async fn player_seek(seconds: f64) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SeekArgs { seconds }).map_err(|err| err.to_string())?;
    invoke("player_seek", args)
        .await
        .map(|_| ())
        .map_err(extract_error)
}

pub async fn insert_into_note(text: &str) -> Result<(), String> {
    let args =
        serde_wasm_bindgen::to_value(&InsertTextArgs { text }).map_err(|err| err.to_string())?;
    invoke("insert_into_note", args)
        .await
        .map(|_| ())
        .map_err(extract_error)
}

pub fn extract_error(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &"message".into())
                .ok()
                .and_then(|v| v.as_string())
        })
        .or_else(|| {
            js_sys::Reflect::get(&err, &"detail".into())
                .ok()
                .and_then(|v| v.as_string())
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}
