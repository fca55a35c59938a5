//! UI rendering for the gramdeck dashboard
//!
//! Implements the single-screen terminal interface with:
//! - Header with title and backend status
//! - Stat tiles: total posts, this week, this month, pending
//! - Transient notice banner
//! - Preview panel (when a set is live) or recent-posts feed
//! - Modals: confirmation dialog and post-history browser
//! - Bottom keybind hints

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, NoticeKind};
use crate::models::PostSummary;

// ============================================================================
// Color Theme
// ============================================================================

/// Primary border color.
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and important elements.
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Success banner / healthy indicators.
pub const COLOR_SUCCESS: Color = Color::LightGreen;

/// Error banner.
pub const COLOR_ERROR: Color = Color::LightRed;

/// Info banner and selection highlight.
pub const COLOR_INFO: Color = Color::LightBlue;

/// Pending-state highlight.
pub const COLOR_PENDING: Color = Color::Yellow;

const SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the full dashboard from current state.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, size);

    let inner = inner_rect(size, 1);
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Stat tiles
            Constraint::Length(3), // Notice banner
            Constraint::Min(8),    // Previews or recent posts
            Constraint::Length(1), // Keybind hints
        ])
        .split(inner);

    render_header(frame, main_chunks[0], app);
    render_stat_tiles(frame, main_chunks[1], app);
    render_notice(frame, main_chunks[2], app);
    render_main_content(frame, main_chunks[3], app);
    render_hints(frame, main_chunks[4], app);

    // Modals draw on top of everything else.
    if app.history_visible {
        render_history_modal(frame, size, app);
    }
    if app.pending_action.is_some() {
        render_confirm_dialog(frame, size, app);
    }
}

/// Get inner rect with margin.
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// ============================================================================
// Header Section
// ============================================================================

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "GRAMDECK",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Instagram automation console", Style::default().fg(COLOR_DIM)),
    ];

    if app.busy {
        let frame_idx = (app.tick_count as usize) % SPINNER_FRAMES.len();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} working...", SPINNER_FRAMES[frame_idx]),
            Style::default().fg(COLOR_PENDING),
        ));
    }

    let header = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

// ============================================================================
// Stat Tiles
// ============================================================================

fn render_stat_tiles(frame: &mut Frame, area: Rect, app: &App) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let overview = app.analytics.as_ref().map(|a| &a.overview);
    let this_week = overview.map(|o| o.posts_this_week).unwrap_or(0);
    let this_month = overview.map(|o| o.posts_this_month).unwrap_or(0);

    render_tile(frame, tiles[0], "TOTAL POSTS", &app.stats.total_posts.to_string(), COLOR_ACCENT);
    render_tile(frame, tiles[1], "THIS WEEK", &this_week.to_string(), COLOR_ACCENT);
    render_tile(frame, tiles[2], "THIS MONTH", &this_month.to_string(), COLOR_ACCENT);

    let (pending_text, pending_color) = if app.stats.has_pending_previews {
        ("Yes", COLOR_PENDING)
    } else {
        ("No", COLOR_DIM)
    };
    render_tile(frame, tiles[3], "PENDING", pending_text, pending_color);
}

fn render_tile(frame: &mut Frame, area: Rect, title: &str, value: &str, value_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    let lines = vec![
        Line::from(Span::styled(title, Style::default().fg(COLOR_DIM))),
        Line::from(Span::styled(
            value,
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        )),
    ];
    let tile = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(tile, area);
}

// ============================================================================
// Notice Banner
// ============================================================================

fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = &app.notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Success => COLOR_SUCCESS,
        NoticeKind::Error => COLOR_ERROR,
        NoticeKind::Info => COLOR_INFO,
    };
    let banner = Paragraph::new(Line::from(Span::styled(
        notice.text.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(banner, area);
}

// ============================================================================
// Main Content: Previews or Recent Posts
// ============================================================================

fn render_main_content(frame: &mut Frame, area: Rect, app: &App) {
    match &app.preview_set {
        Some(_) => render_preview_panel(frame, area, app),
        None => render_recent_posts(frame, area, app),
    }
}

fn render_preview_panel(frame: &mut Frame, area: Rect, app: &App) {
    let Some(set) = &app.preview_set else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_PENDING))
        .title(Span::styled(
            " Pending Previews ",
            Style::default().fg(COLOR_PENDING).add_modifier(Modifier::BOLD),
        ));

    let mut lines = vec![
        Line::from(Span::styled(
            format!("\"{}\"", set.quote),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(set.caption.clone(), Style::default().fg(COLOR_DIM))),
        Line::from(""),
    ];

    for (i, preview) in set.previews.iter().enumerate() {
        let selected = i == app.selected_preview;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        lines.push(Line::from(Span::styled(
            format!("{}[{}] {}", marker, preview.index + 1, preview.url),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "p: post selected    x: reject all",
        Style::default().fg(COLOR_DIM),
    )));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(panel, area);
}

fn render_recent_posts(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            " Recent Posts (Last 5) ",
            Style::default().fg(COLOR_ACCENT),
        ));

    let recent = app
        .analytics
        .as_ref()
        .map(|a| a.recent_activity.last_5_posts.as_slice())
        .unwrap_or(&[]);

    let lines = if recent.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "No posts yet. Create your first post!",
                Style::default().fg(COLOR_DIM),
            )),
        ]
    } else {
        recent.iter().flat_map(summary_lines).collect()
    };

    let panel = Paragraph::new(lines)
        .alignment(if recent.is_empty() { Alignment::Center } else { Alignment::Left })
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(panel, area);
}

fn summary_lines(post: &PostSummary) -> Vec<Line<'static>> {
    let image = match &post.image_url {
        Some(url) => url.clone(),
        None => "(no image)".to_string(),
    };
    vec![
        Line::from(Span::styled(
            post.quote.clone(),
            Style::default().fg(COLOR_ACCENT),
        )),
        Line::from(vec![
            Span::styled(format_timestamp(&post.posted_at), Style::default().fg(COLOR_DIM)),
            Span::raw("  "),
            Span::styled(image, Style::default().fg(COLOR_DIM)),
        ]),
        Line::from(""),
    ]
}

// ============================================================================
// Keybind Hints
// ============================================================================

fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.pending_action.is_some() {
        "y/Enter: confirm    n/Esc: cancel"
    } else if app.history_visible {
        "Up/Down: scroll    Esc: close"
    } else {
        "g: generate  a: all posts  r: refresh  Left/Right: select  q: quit"
    };
    let line = Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(COLOR_DIM))))
        .alignment(Alignment::Center);
    frame.render_widget(line, area);
}

// ============================================================================
// Modals
// ============================================================================

fn render_confirm_dialog(frame: &mut Frame, area: Rect, app: &App) {
    let Some(action) = &app.pending_action else {
        return;
    };

    let dialog_area = centered_rect(area, 44, 7);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_PENDING))
        .title(Span::styled(
            " Confirm ",
            Style::default().fg(COLOR_PENDING).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            action.prompt(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] yes", Style::default().fg(COLOR_SUCCESS)),
            Span::raw("    "),
            Span::styled("[n] no", Style::default().fg(COLOR_ERROR)),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(dialog, dialog_area);
}

fn render_history_modal(frame: &mut Frame, area: Rect, app: &App) {
    let modal_area = centered_rect(
        area,
        area.width.saturating_sub(10).clamp(40, 90),
        area.height.saturating_sub(6).max(10),
    );
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            format!(" All Posts ({}) ", app.history.len()),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));

    let lines: Vec<Line> = if app.history.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "No posts yet. Create your first post!",
                Style::default().fg(COLOR_DIM),
            )),
        ]
    } else {
        app.history
            .iter()
            .skip(app.history_scroll)
            .flat_map(|post| {
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!("#{} ", post.id),
                            Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(post.quote.clone(), Style::default().fg(COLOR_ACCENT)),
                    ]),
                    Line::from(Span::styled(
                        format_timestamp(&post.posted_at),
                        Style::default().fg(COLOR_DIM),
                    )),
                    Line::from(""),
                ]
            })
            .collect()
    };

    let list = Paragraph::new(lines)
        .alignment(if app.history.is_empty() { Alignment::Center } else { Alignment::Left })
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(list, modal_area);
}

/// Center a `width` x `height` rect inside `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Render a backend timestamp for display.
///
/// The backend emits either RFC 3339 or `YYYY-MM-DD HH:MM:SS`; anything
/// else passes through untouched.
fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
