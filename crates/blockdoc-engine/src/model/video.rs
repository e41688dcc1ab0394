//! Video hosting platforms and embed-URL resolution.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Recognized video hosting platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoPlatform {
    YouTube,
    Vimeo,
}

fn youtube_regex() -> &'static Regex {
    static YOUTUBE_REGEX: OnceLock<Regex> = OnceLock::new();
    YOUTUBE_REGEX.get_or_init(|| {
        Regex::new(
            r"^https?://(?:(?:www\.|m\.)?youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/)([A-Za-z0-9_-]+)",
        )
        .expect("Invalid YouTube regex")
    })
}

fn vimeo_regex() -> &'static Regex {
    static VIMEO_REGEX: OnceLock<Regex> = OnceLock::new();
    VIMEO_REGEX.get_or_init(|| {
        Regex::new(r"^https?://(?:www\.)?vimeo\.com/(\d+)").expect("Invalid Vimeo regex")
    })
}

impl VideoPlatform {
    /// Platform whose watch/short-link URL pattern matches `url`.
    pub fn detect(url: &str) -> Option<Self> {
        Self::extract(url).map(|(platform, _)| platform)
    }

    /// Platform and video identifier for a recognized watch/short-link URL.
    pub fn extract(url: &str) -> Option<(Self, &str)> {
        if let Some(caps) = youtube_regex().captures(url) {
            return caps.get(1).map(|m| (VideoPlatform::YouTube, m.as_str()));
        }
        if let Some(caps) = vimeo_regex().captures(url) {
            return caps.get(1).map(|m| (VideoPlatform::Vimeo, m.as_str()));
        }
        None
    }

    /// Embed URL template for a video id.
    pub fn embed_url(self, video_id: &str) -> String {
        match self {
            VideoPlatform::YouTube => format!("https://www.youtube.com/embed/{video_id}"),
            VideoPlatform::Vimeo => format!("https://player.vimeo.com/video/{video_id}"),
        }
    }
}

/// Rewrite a recognized watch/short-link URL to its embeddable form.
///
/// URLs from any other host, including ones already in embed form, pass
/// through unchanged.
pub fn resolve_embed_url(url: &str) -> String {
    match VideoPlatform::extract(url) {
        Some((platform, id)) => platform.embed_url(id),
        None => url.to_string(),
    }
}
