//! AppMessage enum for async communication within the application.
//!
//! Backend calls run in spawned tasks; their completions come back over the
//! app's mpsc channel as these messages and are applied to state by
//! [`App::handle_message`] on the event-loop task.

use crate::app::actions::spawn_refresh;
use crate::app::types::Notice;
use crate::app::App;
use crate::models::{Analytics, Post, PreviewSet, Stats};

/// Messages received from async backend operations.
///
/// Errors cross the channel stringified; the controller shows a generic
/// banner and the detail only reaches the diagnostic log.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A stats+analytics refresh landed (poll tick, manual refresh, or the
    /// re-sync after a mutating action).
    DataRefreshed { stats: Stats, analytics: Analytics },
    /// Preview generation finished.
    GenerateFinished(Result<PreviewSet, String>),
    /// The post-image call for `index` finished.
    PostFinished { index: usize, result: Result<(), String> },
    /// The reject-previews call finished.
    RejectFinished(Result<(), String>),
    /// The history page fetch finished.
    HistoryLoaded(Result<Vec<Post>, String>),
}

impl App {
    /// Apply a completed async operation to state.
    ///
    /// Every mutating-action failure takes the same shape: drop `busy`,
    /// post a generic error notice, touch nothing else.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::DataRefreshed { stats, analytics } => {
                self.stats = stats;
                self.analytics = Some(analytics);
            }

            AppMessage::GenerateFinished(Ok(set)) => {
                // Stored exactly as the server returned it.
                self.preview_set = Some(set);
                self.selected_preview = 0;
                spawn_refresh(self.client.clone(), self.message_tx.clone());
                self.notice = Some(Notice::success("Previews generated!"));
                self.busy = false;
            }
            AppMessage::GenerateFinished(Err(error)) => {
                // A previously live set stays untouched on failure.
                tracing::error!("generate previews failed: {error}");
                self.notice = Some(Notice::error("Failed to generate previews"));
                self.busy = false;
            }

            AppMessage::PostFinished { index, result: Ok(()) } => {
                tracing::info!("preview {index} posted");
                // The server cleared its pending set as a side effect.
                self.preview_set = None;
                self.selected_preview = 0;
                spawn_refresh(self.client.clone(), self.message_tx.clone());
                self.notice = Some(Notice::success("Posted to Instagram!"));
                self.busy = false;
            }
            AppMessage::PostFinished { index, result: Err(error) } => {
                tracing::error!("posting preview {index} failed: {error}");
                self.notice = Some(Notice::error("Failed to post"));
                self.busy = false;
            }

            AppMessage::RejectFinished(Ok(())) => {
                // No re-fetch here: the set is already gone locally and the
                // next poll tick reconciles the pending flag.
                self.preview_set = None;
                self.selected_preview = 0;
                self.notice = Some(Notice::info("Previews rejected"));
                self.busy = false;
            }
            AppMessage::RejectFinished(Err(error)) => {
                tracing::error!("reject previews failed: {error}");
                self.notice = Some(Notice::error("Failed to reject"));
                self.busy = false;
            }

            AppMessage::HistoryLoaded(Ok(posts)) => {
                self.history = posts;
                self.history_scroll = 0;
            }
            AppMessage::HistoryLoaded(Err(error)) => {
                // Log-only path: the modal stays open with whatever list it
                // already had and no banner is shown.
                tracing::error!("history fetch failed: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyticsOverview, RecentActivity};

    fn sample_analytics() -> Analytics {
        Analytics {
            overview: AnalyticsOverview {
                total_posts: 10,
                posts_this_week: 2,
                posts_this_month: 8,
                avg_posts_per_week: 1.5,
            },
            recent_activity: RecentActivity { last_5_posts: vec![] },
        }
    }

    fn sample_set() -> PreviewSet {
        PreviewSet {
            quote: "q".to_string(),
            caption: "c".to_string(),
            previews: vec![
                crate::models::Preview { index: 0, url: "http://img/0.jpg".to_string() },
                crate::models::Preview { index: 1, url: "http://img/1.jpg".to_string() },
            ],
        }
    }

    #[tokio::test]
    async fn test_data_refreshed_replaces_both_snapshots() {
        let mut app = App::default();
        app.handle_message(AppMessage::DataRefreshed {
            stats: Stats { total_posts: 10, has_pending_previews: true },
            analytics: sample_analytics(),
        });
        assert_eq!(app.stats.total_posts, 10);
        assert!(app.stats.has_pending_previews);
        assert_eq!(app.analytics.as_ref().unwrap().overview.posts_this_week, 2);
    }

    #[tokio::test]
    async fn test_generate_success_stores_server_value_verbatim() {
        let mut app = App::default();
        app.busy = true;
        let set = sample_set();
        app.handle_message(AppMessage::GenerateFinished(Ok(set.clone())));
        assert_eq!(app.preview_set, Some(set));
        assert_eq!(app.selected_preview, 0);
        assert!(!app.busy);
        assert!(app.notice.is_some());
    }

    #[tokio::test]
    async fn test_generate_failure_keeps_previous_set() {
        let mut app = App::default();
        app.busy = true;
        app.preview_set = Some(sample_set());
        app.handle_message(AppMessage::GenerateFinished(Err("boom".to_string())));
        assert!(app.preview_set.is_some());
        assert!(!app.busy);
        assert_eq!(app.notice.as_ref().unwrap().text, "Failed to generate previews");
    }

    #[tokio::test]
    async fn test_post_success_clears_set() {
        let mut app = App::default();
        app.busy = true;
        app.preview_set = Some(sample_set());
        app.handle_message(AppMessage::PostFinished { index: 1, result: Ok(()) });
        assert!(app.preview_set.is_none());
        assert!(!app.busy);
        assert_eq!(app.notice.as_ref().unwrap().text, "Posted to Instagram!");
    }

    #[tokio::test]
    async fn test_post_failure_keeps_set() {
        let mut app = App::default();
        app.busy = true;
        app.preview_set = Some(sample_set());
        app.handle_message(AppMessage::PostFinished { index: 0, result: Err("x".to_string()) });
        assert!(app.preview_set.is_some());
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_reject_success_clears_set_with_info_notice() {
        let mut app = App::default();
        app.busy = true;
        app.preview_set = Some(sample_set());
        app.handle_message(AppMessage::RejectFinished(Ok(())));
        assert!(app.preview_set.is_none());
        assert!(!app.busy);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, crate::app::NoticeKind::Info);
        assert_eq!(notice.text, "Previews rejected");
    }

    #[tokio::test]
    async fn test_history_loaded_replaces_list_and_resets_scroll() {
        let mut app = App::default();
        app.history_scroll = 7;
        let posts = vec![Post {
            id: 1,
            quote: "q".to_string(),
            image_url: None,
            posted_at: "2026-08-01 10:00:00".to_string(),
        }];
        app.handle_message(AppMessage::HistoryLoaded(Ok(posts)));
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history_scroll, 0);
    }

    #[tokio::test]
    async fn test_history_failure_is_silent() {
        let mut app = App::default();
        app.history_visible = true;
        app.handle_message(AppMessage::HistoryLoaded(Err("down".to_string())));
        assert!(app.history_visible);
        assert!(app.history.is_empty());
        assert!(app.notice.is_none());
    }

    #[tokio::test]
    async fn test_notice_is_last_writer_wins() {
        let mut app = App::default();
        app.handle_message(AppMessage::RejectFinished(Err("a".to_string())));
        let first = app.notice.as_ref().unwrap().text.clone();
        app.handle_message(AppMessage::RejectFinished(Ok(())));
        let second = app.notice.as_ref().unwrap().text.clone();
        assert_ne!(first, second);
        assert_eq!(second, "Previews rejected");
    }
}
