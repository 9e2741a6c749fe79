use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::host::MediaNotesHost;

#[derive(Deserialize)]
struct FetchTranscriptArgs {
    url: String,
    #[serde(default)]
    language: String,
}

#[derive(Deserialize)]
struct SeekArgs {
    seconds: f64,
}

#[derive(Deserialize)]
struct InsertTextArgs {
    text: String,
}

fn args<T: for<'de> Deserialize<'de>>(args: &Value) -> Result<T, AppError> {
    Ok(serde_json::from_value(args.clone())?)
}

/// Routes one front-end `invoke(command, args)` call. Errors serialize as
/// `{ kind, detail }`.
pub fn handle_command(
    host: &mut MediaNotesHost,
    command: &str,
    payload: &Value,
) -> Result<Value, AppError> {
    log::debug!("Command {command} invoked");
    let result = match command {
        "current_media_url" => serde_json::to_value(host.current_media_url())?,
        "fetch_transcript" => {
            let FetchTranscriptArgs { url, language } = args(payload)?;
            let lines = host.fetch_transcript(&url, &language)?;
            log::info!("Fetched {} caption lines for {url}", lines.len());
            serde_json::to_value(lines)?
        }
        "player_current_time" => serde_json::to_value(host.player_current_time())?,
        "player_is_playing" => Value::Bool(host.player_is_playing()),
        "player_seek" => {
            let SeekArgs { seconds } = args(payload)?;
            host.player_seek(seconds)?;
            Value::Null
        }
        "insert_into_note" => {
            let InsertTextArgs { text } = args(payload)?;
            host.insert_into_note(&text);
            Value::Null
        }
        other => return Err(AppError::UnknownCommand(other.to_string())),
    };
    Ok(result)
}
