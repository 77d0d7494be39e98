//! # Toast Overlay
//!
//! Short-lived, non-blocking notice drawn over the conversation. Used for
//! one-shot alerts (emergency answers, transport failures) and for the
//! empty-question prompt. Input keeps working while a toast is visible; it
//! disappears on its own once `expires_at` passes.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::Component;

pub const ALERT_DURATION: Duration = Duration::from_millis(3500);
pub const PROMPT_DURATION: Duration = Duration::from_millis(2000);

const MAX_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Alert,
    Prompt,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn alert(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Alert,
            expires_at: now + ALERT_DURATION,
        }
    }

    pub fn prompt(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Prompt,
            expires_at: now + PROMPT_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    fn style(&self) -> Style {
        match self.kind {
            ToastKind::Alert => Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            ToastKind::Prompt => Style::default().fg(Color::Yellow),
        }
    }

    /// Centered box sized to the text, clamped to `area`.
    fn area(&self, area: Rect) -> Rect {
        let width = MAX_WIDTH.min(area.width);
        let content_width = width.saturating_sub(4).max(1) as usize;
        let lines = textwrap::wrap(&self.text, content_width).len() as u16;
        let height = (lines + 2).min(area.height);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}

impl Component for Toast {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let toast_area = self.area(area);
        let style = self.style();
        let title = match self.kind {
            ToastKind::Alert => "alert",
            ToastKind::Prompt => "notice",
        };

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(style)
            .title(title);

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(self.text.as_str())
                .block(block)
                .style(style)
                .wrap(Wrap { trim: true }),
            toast_area,
        );
    }
}
