//! User-facing notices (toasts)
//!
//! Every console operation reports its outcome as a [`Notice`] on the
//! [`NoticeBus`]. The bus uses `tokio::sync::broadcast`, so any number of
//! UI surfaces can subscribe and the console never blocks on them.
//!
//! # Usage
//!
//! ```rust,ignore
//! let notices = NoticeBus::new(256);
//! let mut rx = notices.subscribe();
//!
//! notices.error("Failed to delete bills");
//!
//! if let Ok(notice) = rx.recv().await {
//!     println!("[{}] {}", notice.level.as_str(), notice.message);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Channel capacity used when none is configured
pub const DEFAULT_NOTICE_CAPACITY: usize = 256;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        }
    }
}

/// A transient message shown to the operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    /// Unique notice ID
    pub id: Uuid,
    /// When the notice was raised
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Broadcast channel of notices
///
/// Cheap to clone; clones share the same channel.
#[derive(Debug, Clone)]
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a new bus with the given channel capacity
    ///
    /// Slow receivers that fall more than `capacity` notices behind get a
    /// `Lagged` error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a notice to all subscribers
    ///
    /// Returns the number of receivers that will see it. Publishing with no
    /// subscribers is not an error.
    pub fn publish(&self, notice: Notice) -> usize {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(text = %notice.message, "notice"),
            _ => tracing::debug!(
                severity = notice.level.as_str(),
                text = %notice.message,
                "notice"
            ),
        }
        self.sender.send(notice).unwrap_or(0)
    }

    pub fn success(&self, message: impl Into<String>) -> usize {
        self.publish(Notice::new(NoticeLevel::Success, message))
    }

    pub fn info(&self, message: impl Into<String>) -> usize {
        self.publish(Notice::new(NoticeLevel::Info, message))
    }

    pub fn error(&self, message: impl Into<String>) -> usize {
        self.publish(Notice::new(NoticeLevel::Error, message))
    }

    /// Subscribe to notices published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_CAPACITY)
    }
}

/// Drain every notice currently buffered in a receiver
pub fn drain_notices(rx: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(notice) => notices.push(notice),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    notices
}
