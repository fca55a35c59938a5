use gramdeck::api::ApiClient;
use gramdeck::app::{App, AppMessage, UserDecision};
use gramdeck::cli::{parse_args, CliCommand, USAGE};
use gramdeck::config::resolve_base_url;
use gramdeck::poller::{Poller, POLL_PERIOD};
use gramdeck::{logging, ui};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Redraw/animation cadence for the event loop. Coarse on purpose: the
/// dashboard only animates the busy spinner and expires notices.
const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let url = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("gramdeck {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::RunTui { url } => url,
    };

    let log_path = logging::init()?;
    let base_url = resolve_base_url(url);
    tracing::info!("starting against {base_url}");

    let client = Arc::new(ApiClient::with_base_url(base_url));
    let mut app = App::with_client(client.clone());

    // Background refresh: first tick fires immediately, then every 5s
    // until the handle is stopped below. Dropping the handle also stops it
    // if we leave through an error path.
    let poller = Poller::spawn(client, app.message_tx.clone(), POLL_PERIOD);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app).await;
    poller.stop();
    restore_terminal(&mut terminal)?;

    println!("log written to {}", log_path.display());
    result
}

/// Enter raw mode and the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Leave the alternate screen and restore the terminal.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: mpsc::UnboundedReceiver<AppMessage> = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = tokio::time::sleep(TICK_INTERVAL);

        tokio::select! {
            // Animation tick: advance the spinner and expire the notice.
            _ = timeout => {
                app.tick(Instant::now());
            }

            // Completions of async backend work.
            message = message_rx.recv() => {
                if let Some(message) = message {
                    app.handle_message(message);
                }
            }

            // Keyboard events.
            event_result = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = event_result {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key.code, key.modifiers);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Route a key press to the right handler.
///
/// Modal state wins: an open confirmation prompt captures the keyboard,
/// then the history modal, then the dashboard keys.
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.pending_action.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.resolve_confirmation(UserDecision::Confirmed);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.resolve_confirmation(UserDecision::Declined);
            }
            _ => {}
        }
        return;
    }

    if app.history_visible {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_history(),
            KeyCode::Up | KeyCode::Char('k') => app.history_scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => app.history_scroll_down(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('g') => app.request_generate(),
        KeyCode::Char('r') => app.refresh_now(),
        KeyCode::Char('a') => app.open_history(),
        KeyCode::Left | KeyCode::Char('h') => app.select_prev_preview(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next_preview(),
        KeyCode::Char('p') => app.request_post(),
        KeyCode::Char('x') => app.request_reject(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramdeck::app::PendingAction;
    use gramdeck::models::{Preview, PreviewSet};

    fn app_with_set() -> App {
        let mut app = App::default();
        app.preview_set = Some(PreviewSet {
            quote: "q".to_string(),
            caption: "c".to_string(),
            previews: vec![
                Preview { index: 0, url: "u0".to_string() },
                Preview { index: 1, url: "u1".to_string() },
            ],
        });
        app
    }

    #[tokio::test]
    async fn test_q_quits_from_dashboard() {
        let mut app = App::default();
        handle_key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_even_with_modal_open() {
        let mut app = App::default();
        app.history_visible = true;
        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_confirm_prompt_captures_keys() {
        let mut app = app_with_set();
        app.request_post();
        assert_eq!(app.pending_action, Some(PendingAction::PostImage { index: 0 }));

        // 'q' must not quit while the prompt is open.
        handle_key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.should_quit);

        handle_key(&mut app, KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(app.pending_action.is_none());
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn test_esc_declines_confirmation() {
        let mut app = app_with_set();
        app.request_reject();
        handle_key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.pending_action.is_none());
        assert!(app.preview_set.is_some());
    }

    #[tokio::test]
    async fn test_history_modal_captures_navigation() {
        let mut app = App::default();
        app.history_visible = true;

        handle_key(&mut app, KeyCode::Char('g'), KeyModifiers::NONE);
        assert!(!app.busy); // generate not dispatched while modal open

        handle_key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.history_visible);
    }

    #[tokio::test]
    async fn test_arrow_keys_move_preview_cursor() {
        let mut app = app_with_set();
        handle_key(&mut app, KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.selected_preview, 1);
        handle_key(&mut app, KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.selected_preview, 0);
    }
}
