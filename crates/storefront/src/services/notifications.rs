//! In-app notification feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use quickgrub_core::NotificationKind;

/// One message shown on the notifications page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    /// A new unread notification stamped with the current time.
    #[must_use]
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            read: false,
        }
    }
}

/// Newest-first list of notifications for one session.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification at the top of the feed.
    pub fn push(&mut self, notification: Notification) {
        self.items.insert(0, notification);
    }

    /// Notifications for one tab, or all of them when `kind` is `None`.
    #[must_use]
    pub fn filter(&self, kind: Option<NotificationKind>) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| kind.is_none_or(|k| n.kind == k))
            .collect()
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.items {
            notification.read = true;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
