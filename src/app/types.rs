//! Type definitions for the dashboard state.
//!
//! Contains the small state types carried by [`crate::app::App`]:
//! - [`Notice`] - transient operator feedback banner
//! - [`PendingAction`] - a destructive action awaiting confirmation
//! - [`UserDecision`] - outcome of a confirmation prompt

use std::time::{Duration, Instant};

/// How long a notice stays on screen before it self-clears.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Visual category of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient feedback banner.
///
/// Display-only and never persisted. Posting a new notice replaces the
/// current one outright; there is no queue.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// When the notice was posted; expiry is measured from here.
    pub shown_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    /// Whether the notice has outlived [`NOTICE_TTL`] as of `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// A destructive action recorded when the operator triggers it and executed
/// only after explicit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Publish the preview at this index to the real Instagram account.
    PostImage { index: usize },
    /// Discard the whole pending preview set.
    RejectPreviews,
}

impl PendingAction {
    /// Prompt text shown in the confirmation dialog.
    ///
    /// Preview indexes are zero-based on the wire but shown one-based.
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::PostImage { index } => {
                format!("Post preview {} to Instagram?", index + 1)
            }
            PendingAction::RejectPreviews => "Reject all previews?".to_string(),
        }
    }
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDecision {
    Confirmed,
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_not_expired_before_ttl() {
        let notice = Notice::success("done");
        let just_before = notice.shown_at + NOTICE_TTL - Duration::from_millis(1);
        assert!(!notice.is_expired(just_before));
    }

    #[test]
    fn test_notice_expired_at_ttl() {
        let notice = Notice::error("failed");
        assert!(notice.is_expired(notice.shown_at + NOTICE_TTL));
        assert!(notice.is_expired(notice.shown_at + NOTICE_TTL + Duration::from_secs(10)));
    }

    #[test]
    fn test_notice_constructors_set_kind() {
        assert_eq!(Notice::success("a").kind, NoticeKind::Success);
        assert_eq!(Notice::error("b").kind, NoticeKind::Error);
        assert_eq!(Notice::info("c").kind, NoticeKind::Info);
    }

    #[test]
    fn test_post_prompt_is_one_based() {
        let action = PendingAction::PostImage { index: 1 };
        assert_eq!(action.prompt(), "Post preview 2 to Instagram?");
    }

    #[test]
    fn test_reject_prompt() {
        assert_eq!(PendingAction::RejectPreviews.prompt(), "Reject all previews?");
    }
}
