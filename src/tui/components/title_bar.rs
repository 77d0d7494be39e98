//! # TitleBar Component
//!
//! One-line status bar above the conversation.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! - `backend`: base URL the client talks to (core `App`)
//! - `status_message`: transient status (core `App`)
//! - `has_unseen_content`: scroll indicator (TUI `MessageListState`)
//!
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"Red Spider (backend: URL) | Waiting... | ↓ New"`
//! 2. **Status message**: `"Red Spider (backend: URL) | Waiting..."`
//! 3. **Default**: `"Red Spider (backend: URL)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub backend: String,
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(backend: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            backend,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut title = format!("Red Spider (backend: {})", self.backend);
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(self.text())];
        if self.has_unseen_content {
            spans.push(Span::styled(
                " | ↓ New",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
