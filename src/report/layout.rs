//! Per-video output directory naming.

use crate::models::VideoMetadata;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

const MAX_TITLE_LEN: usize = 40;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]+").expect("valid regex"));

/// Turn a video title into a filesystem-safe directory fragment.
pub fn safe_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let replaced = NON_WORD.replace_all(&lowered, "_");
    let collapsed: String = replaced
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let limited: String = collapsed.chars().take(MAX_TITLE_LEN).collect();
    let trimmed = limited.trim_matches('_');

    if trimmed.is_empty() {
        "video".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<base>/<safe_title>_<id>_<YYYYmmdd_HHMMSS>`
pub fn output_directory(base: &Path, video: &VideoMetadata, now: DateTime<Utc>) -> PathBuf {
    base.join(format!(
        "{}_{}_{}",
        safe_title(&video.title),
        video.id,
        now.format("%Y%m%d_%H%M%S")
    ))
}
