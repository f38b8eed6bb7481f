//! Transient notification channel
//!
//! At most one message is live. Publishing replaces the previous message at
//! once; a message stops being visible when its time-to-live runs out.

use std::time::{Duration, Instant};

/// Default time a notice stays visible
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Tone of a notice, for renderers that want to color it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Failure,
}

/// A short user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::with_marker(NoticeLevel::Success, "✓", text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::with_marker(NoticeLevel::Warning, "⚠️", text)
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self::with_marker(NoticeLevel::Failure, "✗", text)
    }

    fn with_marker(level: NoticeLevel, marker: &str, text: impl Into<String>) -> Self {
        Self {
            level,
            text: format!("{} {}", marker, text.into()),
        }
    }
}

/// Holds the single live notice
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    live: Option<(Notice, Instant)>,
    published: u64,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            live: None,
            published: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Publish a notice, replacing any live one
    pub fn publish(&mut self, notice: Notice) {
        self.publish_at(notice, Instant::now());
    }

    /// Publish with an explicit timestamp
    pub fn publish_at(&mut self, notice: Notice, now: Instant) {
        log::debug!("Notice: {}", notice.text);
        self.live = Some((notice, now));
        self.published += 1;
    }

    /// Number of notices published so far; lets a renderer show each one once
    pub fn published(&self) -> u64 {
        self.published
    }

    /// The live notice, if it hasn't expired
    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    /// The notice live at `now`
    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        match &self.live {
            Some((notice, posted)) if now.saturating_duration_since(*posted) < self.ttl => Some(notice),
            _ => None,
        }
    }

    /// Most recent notice, expired or not, until dismissed
    pub fn latest(&self) -> Option<&Notice> {
        self.live.as_ref().map(|(notice, _)| notice)
    }

    /// Drop the live notice
    pub fn dismiss(&mut self) {
        self.live = None;
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}
