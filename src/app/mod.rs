//! Application state and orchestration for the dashboard.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`AppMessage`] - completions of async backend work
//! - [`Notice`] / [`NoticeKind`] - transient operator feedback
//! - [`PendingAction`] / [`UserDecision`] - the confirmation gate for
//!   destructive actions
//!
//! [`App`] owns every piece of mutable client-side state and is mutated
//! only through the named action handlers in `actions` and through
//! [`App::handle_message`]; the render layer receives it by reference.

mod actions;
mod messages;
mod types;

pub use actions::HISTORY_PAGE_SIZE;
pub use messages::AppMessage;
pub use types::{Notice, NoticeKind, PendingAction, UserDecision, NOTICE_TTL};

use crate::api::ApiClient;
use crate::models::{Analytics, Post, PreviewSet, Stats};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Main application state.
///
/// Two mutation sources run concurrently against this: the background poll
/// and user-triggered actions. There is no locking between them; whichever
/// completion lands last wins on each state slot independently. The `busy`
/// flag serializes only the mutating actions (generate/post/reject) against
/// each other.
pub struct App {
    /// Latest stats snapshot; replaced wholesale on every refresh.
    pub stats: Stats,
    /// Latest analytics snapshot; `None` until the first refresh lands.
    pub analytics: Option<Analytics>,
    /// The live preview set, if one is pending resolution.
    pub preview_set: Option<PreviewSet>,
    /// True while a mutating action is in flight.
    pub busy: bool,
    /// Transient feedback banner, self-expiring.
    pub notice: Option<Notice>,
    /// Destructive action awaiting operator confirmation.
    pub pending_action: Option<PendingAction>,
    /// Whether the post-history modal is open.
    pub history_visible: bool,
    /// Post history, newest first; filled when the modal opens.
    pub history: Vec<Post>,
    /// Cursor into the live preview set.
    pub selected_preview: usize,
    /// First visible entry in the history modal.
    pub history_scroll: usize,
    /// Tick counter for the busy spinner.
    pub tick_count: u64,
    /// Flag to track if the app should quit.
    pub should_quit: bool,
    /// Receiver for async messages (taken by the event loop for `select!`).
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (cloned into spawned tasks).
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Backend API client (shared across async tasks).
    pub client: Arc<ApiClient>,
}

impl App {
    /// Create a new App against the default backend URL.
    pub fn new() -> Self {
        Self::with_client(Arc::new(ApiClient::new()))
    }

    /// Create a new App with a custom API client.
    pub fn with_client(client: Arc<ApiClient>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            stats: Stats::default(),
            analytics: None,
            preview_set: None,
            busy: false,
            notice: None,
            pending_action: None,
            history_visible: false,
            history: Vec::new(),
            selected_preview: 0,
            history_scroll: 0,
            tick_count: 0,
            should_quit: false,
            message_rx: Some(message_rx),
            message_tx,
            client,
        }
    }

    /// Advance the animation counter and expire the notice.
    ///
    /// Called from the event loop on its coarse timer; a notice posted
    /// after the previous one restarts the clock (last writer wins).
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Request application shutdown.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
