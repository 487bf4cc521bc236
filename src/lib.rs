pub mod config;
pub mod error;
pub mod oembed;
pub mod output;
pub mod session;
pub mod summarize;
pub mod video;
pub mod web;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;

pub use error::PipelineError;

/// The 11-character token YouTube uses to address a single video
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const ID: &str = "([0-9A-Za-z_-]{11})";
const END: &str = "(?:[^0-9A-Za-z_-]|$)";
const HOST: &str = r"(?:^|[/.])(?i:youtube(?:-nocookie)?\.com)";

/// Ordered extraction rules; the first match wins.
static RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("watch", format!(r"{HOST}/watch\?(?:[^#]*?&)??v={ID}{END}")),
        ("embed", format!(r"{HOST}/embed/{ID}{END}")),
        ("v-param", format!(r"{HOST}/[^#]*?[?&]v={ID}{END}")),
        ("short-link", format!(r"(?:^|[/.])(?i:youtu\.be)/{ID}{END}")),
        ("shorts", format!(r"{HOST}/shorts/{ID}{END}")),
        ("live", format!(r"{HOST}/live/{ID}{END}")),
        ("v-path", format!(r"{HOST}/v/{ID}{END}")),
        ("bare", format!(r"^{ID}$")),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(&pattern).expect("extraction rule must compile")))
    .collect()
});

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();

    RULES.iter().find_map(|(name, re)| {
        re.captures(input).map(|caps| {
            log::debug!("Matched {name} rule for {input}");
            VideoId(caps[1].to_string())
        })
    })
}
