//! URL classification used to pick a player for a note's media link.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

static VIDEO_ID_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$"));

static START_TIME_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s?)?$"));

const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "ogv", "ogg", "mov", "m4v", "mkv", "mp3", "wav", "m4a", "flac", "aac", "opus",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    YouTube { video_id: String },
    NativeMedia,
    WebPage,
}

fn parse_lenient(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    let supported = |url: &Url| matches!(url.scheme(), "http" | "https" | "file");
    Url::parse(raw)
        .ok()
        .filter(supported)
        .or_else(|| Url::parse(&format!("https://{raw}")).ok().filter(supported))
}

fn bare_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = ["www.", "m.", "music."]
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .map(str::to_string)
        .unwrap_or(host);
    Some(host)
}

fn valid_video_id(candidate: &str) -> Option<String> {
    match &*VIDEO_ID_RE {
        Ok(regex) if regex.is_match(candidate) => Some(candidate.to_string()),
        _ => None,
    }
}

/// Extracts the YouTube video id from watch, short, embed, shorts and live links.
pub fn get_video_id(raw: &str) -> Option<String> {
    let url = parse_lenient(raw)?;
    let host = bare_host(&url)?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    match host.as_str() {
        "youtu.be" => valid_video_id(segments.next()?),
        "youtube.com" | "youtube-nocookie.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .and_then(|(_, value)| valid_video_id(&value)),
            "embed" | "shorts" | "live" | "v" => valid_video_id(segments.next()?),
            _ => None,
        },
        _ => None,
    }
}

fn has_media_extension(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|file| file.rsplit_once('.'))
        .is_some_and(|(_, ext)| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

pub fn is_media_url(raw: &str) -> bool {
    if get_video_id(raw).is_some() {
        return true;
    }
    parse_lenient(raw).is_some_and(|url| has_media_extension(&url))
}

/// `None` when the text is not a usable URL at all.
pub fn classify_url(raw: &str) -> Option<PlayerKind> {
    if let Some(video_id) = get_video_id(raw) {
        return Some(PlayerKind::YouTube { video_id });
    }
    let url = parse_lenient(raw)?;
    if has_media_extension(&url) {
        Some(PlayerKind::NativeMedia)
    } else {
        Some(PlayerKind::WebPage)
    }
}

/// Parses `90`, `90s`, `1m30s` and `1h2m3s`.
pub fn parse_start_time(value: &str) -> Option<u64> {
    let regex = START_TIME_RE.as_ref().ok()?;
    let caps = regex.captures(value.trim())?;
    if caps.iter().skip(1).all(|group| group.is_none()) {
        return None;
    }

    let part = |index: usize| -> u64 {
        caps.get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    Some(
        part(1)
            .saturating_mul(3600)
            .saturating_add(part(2).saturating_mul(60))
            .saturating_add(part(3)),
    )
}

/// Start offset carried by a link, from `t=`/`start=` in the query or fragment.
pub fn start_time_from_url(raw: &str) -> Option<u64> {
    let url = parse_lenient(raw)?;
    let from_query = url
        .query_pairs()
        .find(|(key, _)| key == "t" || key == "start")
        .and_then(|(_, value)| parse_start_time(&value));

    from_query.or_else(|| {
        url.fragment()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "t" || *key == "start")
            .and_then(|(_, value)| parse_start_time(value))
    })
}
