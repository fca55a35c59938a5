//! Data types mirroring the automation backend's JSON bodies.
//!
//! Every refresh replaces these snapshots wholesale; the client never
//! patches them field by field. Unknown fields in responses are ignored.

use serde::{Deserialize, Serialize};

/// Quick stats summary from `GET /stats`.
///
/// The default value (`0` posts, nothing pending) is what the dashboard
/// shows before the first fetch lands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_posts: u64,
    pub has_pending_previews: bool,
}

/// Aggregated analytics snapshot from `GET /analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub overview: AnalyticsOverview,
    pub recent_activity: RecentActivity,
}

/// Posting-volume overview inside [`Analytics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_posts: u64,
    pub posts_this_week: u64,
    pub posts_this_month: u64,
    #[serde(default)]
    pub avg_posts_per_week: f64,
}

/// The last-five-posts feed inside [`Analytics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(default)]
    pub last_5_posts: Vec<PostSummary>,
}

/// A post as it appears in the analytics feed.
///
/// The backend trims these entries down to quote/image/timestamp; unlike
/// [`Post`] they carry no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub quote: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub posted_at: String,
}

/// A published post from the paginated history read.
///
/// Immutable once created server-side; the client only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub quote: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub posted_at: String,
}

/// Response envelope of `GET /posts?limit=&offset=`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// One candidate image awaiting operator accept/reject.
///
/// `index` is unique within its set and is the identifier sent with the
/// post action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub index: usize,
    pub url: String,
}

/// The batch of generated previews plus shared quote/caption metadata.
///
/// Lives client-side from a successful generate call until a terminal
/// action (post one, or reject all); absent otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSet {
    pub quote: String,
    pub caption: String,
    #[serde(default)]
    pub previews: Vec<Preview>,
}

/// Response body of `GET /current-previews`.
///
/// The backend answers `{"has_previews": false}` rather than an error when
/// nothing is pending, so the set fields are all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentPreviews {
    pub has_previews: bool,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub previews: Option<Vec<Preview>>,
}

impl CurrentPreviews {
    /// Collapse the response into the live-set representation used by the
    /// dashboard.
    pub fn into_preview_set(self) -> Option<PreviewSet> {
        if !self.has_previews {
            return None;
        }
        Some(PreviewSet {
            quote: self.quote.unwrap_or_default(),
            caption: self.caption.unwrap_or_default(),
            previews: self.previews.unwrap_or_default(),
        })
    }
}
