use std::time::{Duration, Instant};

use tracing::debug;

pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub duration: Duration,
    created_at: Instant,
}

impl Toast {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// Fire-and-forget notification queue.
#[derive(Debug, Clone)]
pub struct Toasts {
    entries: Vec<Toast>,
    default_duration: Duration,
}

impl Toasts {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            entries: Vec::new(),
            default_duration,
        }
    }

    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push_with_duration(title, description, self.default_duration);
    }

    pub fn push_with_duration(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        duration: Duration,
    ) {
        let toast = Toast {
            title: title.into(),
            description: description.into(),
            duration,
            created_at: Instant::now(),
        };
        debug!(title = %toast.title, "toast queued");
        self.entries.push(toast);
    }

    pub fn prune(&mut self, now: Instant) {
        self.entries.retain(|toast| !toast.is_expired_at(now));
    }

    /// Newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().rev().take(MAX_VISIBLE_TOASTS)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
