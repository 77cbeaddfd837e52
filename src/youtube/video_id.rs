//! Video ID extraction from the URL shapes YouTube hands out.

use super::error::{FetchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static BARE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid video id regex"));

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]{11})",
        r"youtube\.com/v/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
        r"[?&]v=([a-zA-Z0-9_-]{11})(?:[&#]|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid video url regex"))
    .collect()
});

/// Extract the 11-character video ID from a URL or a bare ID.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if BARE_ID.is_match(input) {
        return Ok(input.to_string());
    }

    URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FetchError::InvalidVideo {
            input: input.to_string(),
        })
}
