//! User-intent handlers.
//!
//! Each action dispatches its backend call as a spawned task and returns
//! immediately; the completion arrives later as an
//! [`AppMessage`](crate::app::AppMessage). `busy` is flipped synchronously
//! here, before any await point, so a second dispatch of a mutating action
//! always observes it.

use crate::api::ApiClient;
use crate::app::messages::AppMessage;
use crate::app::types::{PendingAction, UserDecision};
use crate::app::App;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Number of history entries fetched when the modal opens.
pub const HISTORY_PAGE_SIZE: usize = 50;

/// Fetch stats and analytics together and deliver them as one message.
///
/// The two fetches land as a unit: if either fails the whole update is
/// dropped for this round and only logged. Poll failures never reach the
/// operator; stale data is preferred over interrupting them.
pub(crate) fn spawn_refresh(client: Arc<ApiClient>, tx: UnboundedSender<AppMessage>) {
    tokio::spawn(async move {
        match tokio::try_join!(client.fetch_stats(), client.fetch_analytics()) {
            Ok((stats, analytics)) => {
                let _ = tx.send(AppMessage::DataRefreshed { stats, analytics });
            }
            Err(error) => tracing::warn!("refresh failed: {error}"),
        }
    });
}

impl App {
    /// Trigger one poll-equivalent refresh on demand.
    ///
    /// Not guarded by `busy`; refreshing is read-only.
    pub fn refresh_now(&self) {
        spawn_refresh(self.client.clone(), self.message_tx.clone());
    }

    /// Kick off preview generation.
    ///
    /// No-op while another mutating action is in flight. The call can take
    /// minutes; the dashboard stays interactive and shows the busy marker
    /// until [`AppMessage::GenerateFinished`] lands.
    pub fn request_generate(&mut self) {
        if self.busy {
            return;
        }
        self.busy = true;
        self.notice = None;

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.generate_previews().await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::GenerateFinished(result));
        });
    }

    /// Ask for confirmation to post the currently selected preview.
    ///
    /// Irreversible against the real account, so this only records the
    /// pending action; nothing is sent until the operator confirms.
    pub fn request_post(&mut self) {
        if self.busy {
            return;
        }
        let Some(set) = &self.preview_set else {
            return;
        };
        let Some(preview) = set.previews.get(self.selected_preview) else {
            return;
        };
        self.pending_action = Some(PendingAction::PostImage { index: preview.index });
    }

    /// Ask for confirmation to reject the whole pending set.
    pub fn request_reject(&mut self) {
        if self.busy || self.preview_set.is_none() {
            return;
        }
        self.pending_action = Some(PendingAction::RejectPreviews);
    }

    /// Resolve the open confirmation prompt.
    ///
    /// `Declined` is a pure no-op beyond closing the prompt: no state
    /// change, no backend call.
    pub fn resolve_confirmation(&mut self, decision: UserDecision) {
        let Some(action) = self.pending_action.take() else {
            return;
        };
        if decision == UserDecision::Declined {
            return;
        }

        self.busy = true;
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        match action {
            PendingAction::PostImage { index } => {
                tokio::spawn(async move {
                    let result = client.post_image(index).await.map_err(|e| e.to_string());
                    let _ = tx.send(AppMessage::PostFinished { index, result });
                });
            }
            PendingAction::RejectPreviews => {
                tokio::spawn(async move {
                    let result = client.reject_previews().await.map_err(|e| e.to_string());
                    let _ = tx.send(AppMessage::RejectFinished(result));
                });
            }
        }
    }

    /// Open the post-history modal and fetch the first page.
    ///
    /// The modal shows immediately; the list fills in (or silently stays
    /// stale) when the fetch resolves. Deliberately not guarded by `busy`.
    pub fn open_history(&mut self) {
        self.history_visible = true;

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client
                .fetch_posts(HISTORY_PAGE_SIZE, 0)
                .await
                .map(|page| page.posts)
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::HistoryLoaded(result));
        });
    }

    /// Hide the post-history modal. The fetched list is retained.
    pub fn close_history(&mut self) {
        self.history_visible = false;
    }

    /// Move the preview cursor right, wrapping at the end of the set.
    pub fn select_next_preview(&mut self) {
        if let Some(set) = &self.preview_set {
            if !set.previews.is_empty() {
                self.selected_preview = (self.selected_preview + 1) % set.previews.len();
            }
        }
    }

    /// Move the preview cursor left, wrapping at the start of the set.
    pub fn select_prev_preview(&mut self) {
        if let Some(set) = &self.preview_set {
            let len = set.previews.len();
            if len > 0 {
                self.selected_preview = (self.selected_preview + len - 1) % len;
            }
        }
    }

    /// Scroll the history modal down one entry.
    pub fn history_scroll_down(&mut self) {
        if self.history_scroll + 1 < self.history.len() {
            self.history_scroll += 1;
        }
    }

    /// Scroll the history modal up one entry.
    pub fn history_scroll_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }
}
