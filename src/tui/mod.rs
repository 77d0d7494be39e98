//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (request in flight): draws every ~80ms so the spinner moves.
//! - **Toast visible**: polls every ~80ms so the toast expires on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::transport::{ChatRequest, ChatTransport, HttpTransport};
use crate::tui::component::EventHandler;
use crate::tui::components::alert::ToastKind;
use crate::tui::components::{InputBox, InputEvent, MessageListState, Toast};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const FAST_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Visible toast, if any. Replaced by newer ones, never stacked.
    pub toast: Option<Toast>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            toast: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let transport = HttpTransport::new(config.base_url.clone(), config.timeouts)
        .map_err(std::io::Error::other)?;
    let mut app = App::new(Arc::new(transport), config.base_url.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // At most one request is ever in flight.
    let mut in_flight: Option<AbortHandle> = None;

    let start_time = Instant::now();
    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        let now = Instant::now();
        if let Some(toast) = &tui.toast
            && toast.is_expired(now)
        {
            if toast.kind == ToastKind::Alert {
                update(&mut app, Action::DismissAlert);
            }
            tui.toast = None;
            needs_redraw = true;
        }

        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating || tui.toast.is_some() {
            FAST_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    let effect = update(&mut app, Action::Quit);
                    should_quit |= apply_effect(effect, &mut app, &mut tui, &tx, &mut in_flight);
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                        let effect = update(&mut app, Action::Submit(text));
                        should_quit |=
                            apply_effect(effect, &mut app, &mut tui, &tx, &mut in_flight);
                    }
                }
            }
            if should_quit {
                break;
            }
        }

        // Handle results from the background request
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::ResponseReceived(_) | Action::TransportFailed(_)) {
                in_flight = None;
            }
            let effect = update(&mut app, action);
            should_quit |= apply_effect(effect, &mut app, &mut tui, &tx, &mut in_flight);
        }
    }

    if let Some(handle) = in_flight.take() {
        info!("Aborting in-flight request on exit");
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Carries out an `Effect` returned by `update`. Returns true when the
/// application should quit.
fn apply_effect(
    effect: Effect,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    in_flight: &mut Option<AbortHandle>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Prompt(text) => {
            tui.toast = Some(Toast::prompt(text, Instant::now()));
            false
        }
        Effect::Alert(text) => {
            tui.toast = Some(Toast::alert(text, Instant::now()));
            false
        }
        Effect::SpawnRequest(request) => {
            tui.input_box.clear();
            tui.message_list.stick_to_bottom = true;
            let handle = spawn_request(app.transport.clone(), request, tx.clone());
            if let Some(stale) = in_flight.replace(handle) {
                warn!("Replacing a request that was still in flight");
                stale.abort();
            }
            apply_effect(update(app, Action::RequestDispatched), app, tui, tx, in_flight)
        }
    }
}

fn spawn_request(
    transport: Arc<dyn ChatTransport>,
    request: ChatRequest,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning chat request");
    tokio::spawn(async move {
        let action = match transport.send(&request).await {
            Ok(response) => Action::ResponseReceived(response),
            Err(e) => Action::TransportFailed(e),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat result: receiver dropped");
        }
    })
    .abort_handle()
}
