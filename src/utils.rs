//! Small helpers shared by the listing and detail pages.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

/// Escape text for insertion into HTML markup.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

pub fn format_time(time: &str) -> &str {
    if time.trim().is_empty() {
        "Not specified"
    } else {
        time
    }
}

pub fn difficulty_color(difficulty: &str) -> &'static str {
    match difficulty {
        "Easy" => "#4caf50",
        "Medium" => "#ff9800",
        "Hard" => "#f44336",
        _ => "#666",
    }
}

static YOUTUBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|shorts/|watch\?v=|&v=)([^#&?]*).*")
        .expect("YOUTUBE_PATTERN is a compile-time constant")
});

/// Extract the 11-character video id from a YouTube URL.
///
/// Values that do not look like a YouTube link (including bare ids) are
/// returned unchanged.
pub fn youtube_id(url: &str) -> &str {
    match YOUTUBE_PATTERN.captures(url).and_then(|caps| caps.get(2)) {
        Some(id) if id.as_str().len() == 11 => id.as_str(),
        _ => url,
    }
}

/// Grey SVG placeholder with the recipe title, as a data URI.
pub fn placeholder_image(title: &str, width: u32, height: u32) -> String {
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><rect fill="#ddd" width="{w}" height="{h}"/><text fill="#999" font-family="sans-serif" font-size="{size}" x="50%" y="50%" text-anchor="middle" dy=".3em">{title}</text></svg>"##,
        w = width,
        h = height,
        size = if width >= 800 { 24 } else { 18 },
        title = escape_html(title),
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Coalesces bursts of calls so only the last one in a quiet window runs.
///
/// Each call waits `wait`; if another call arrives meanwhile, the earlier one
/// is dropped.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            generation: AtomicU64::new(0),
        }
    }

    /// Run `f` after the wait unless superseded. Returns `None` when superseded.
    pub async fn call<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.wait).await;
        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(f())
        } else {
            None
        }
    }
}
