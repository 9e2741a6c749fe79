use media_notes_lib::fetch::{TranscriptSource, YoutubeTranscriptSource};
use media_notes_lib::playback::JsonPositionStore;
use media_notes_lib::{parse_timestamp, AppError, TimestampError, TranscriptError};

#[test]
fn app_error_serializes_kind_and_detail() {
    let err = AppError::from(parse_timestamp("").unwrap_err());
    assert_eq!(
        serde_json::to_string(&err).unwrap(),
        r#"{"kind":"timestamp","detail":"Timestamp: Empty timestamp"}"#
    );

    let err = AppError::from(TranscriptError::NotFound("abc".to_string()));
    assert_eq!(err.to_string(), "Transcript: No transcript available for abc");
}

#[test]
fn store_errors_convert_into_app_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");
    std::fs::write(&path, "{").unwrap();

    let err: AppError = JsonPositionStore::open(&path).unwrap_err().into();
    assert!(matches!(err, AppError::Store(_)));
}

#[test]
fn timestamp_errors_name_the_bad_part() {
    assert_eq!(
        parse_timestamp("1:xx"),
        Err(TimestampError::InvalidPart("xx".to_string()))
    );
}

#[test]
fn unreachable_service_is_a_transport_error() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = YoutubeTranscriptSource::with_base_url("http://127.0.0.1:9/timedtext").unwrap();
    let err = source.fetch("dQw4w9WgXcQ", "en").unwrap_err();
    assert!(matches!(err, TranscriptError::Transport(_)));
    assert_eq!(
        err.user_message(),
        "Could not load the transcript. Check your internet connection and try again."
    );
}
