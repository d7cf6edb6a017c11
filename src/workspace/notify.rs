use std::collections::VecDeque;
use std::fmt::Display;
use std::time::Duration;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
    shown_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) > NOTICE_TTL
    }
}

/// Transient notices shown after workspace operations.
#[derive(Debug, Default)]
pub struct Notifications {
    notices: VecDeque<Notice>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) {
        self.notices.push_back(Notice {
            kind,
            title: title.into(),
            description: description.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn info(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push(NoticeKind::Info, title, description);
    }

    /// Turns a failed operation into a destructive notice.
    pub fn report<T, E: Display>(&mut self, title: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("{}: {}", title, err);
                self.push(NoticeKind::Destructive, title, err.to_string());
                None
            }
        }
    }

    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|notice| !notice.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::error::WorkspaceError;

    #[test]
    fn report_passes_through_success() {
        let mut notifications = Notifications::new();
        let value = notifications.report("Save failed", Ok::<_, WorkspaceError>(7));
        assert_eq!(value, Some(7));
        assert!(notifications.is_empty());
    }

    #[test]
    fn report_turns_errors_into_notices() {
        let mut notifications = Notifications::new();
        let value: Option<()> = notifications.report("Error", Err(WorkspaceError::EmptyTitle));
        assert_eq!(value, None);

        let notice = notifications.iter().next().unwrap();
        assert_eq!(notice.kind, NoticeKind::Destructive);
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.description, "project title can't be empty");
    }

    #[test]
    fn notices_expire() {
        let mut notifications = Notifications::new();
        notifications.info("Copied", "Project code copied");
        notifications.prune(Instant::now());
        assert_eq!(notifications.len(), 1);

        notifications.prune(Instant::now() + NOTICE_TTL + Duration::from_millis(10));
        assert!(notifications.is_empty());
    }
}
