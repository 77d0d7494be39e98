//! # InputBox Component
//!
//! Multi-line question editor with a send affordance.
//!
//! The box hands its contents to the parent on Enter but does not clear
//! itself; the parent clears it once the controller has accepted the
//! question. While a request is in flight `enabled` is false: typing still
//! works, sending does not.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Tallest the box grows before it starts scrolling its own content.
const MAX_VISIBLE_LINES: u16 = 5;
/// Borders on each side.
const BORDER: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter pressed while sending is enabled. Carries the raw buffer.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Byte offset of the cursor within `buffer`, always on a char boundary.
    cursor: usize,
    /// Whether the send affordance is active.
    pub enabled: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            enabled: true,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Height including borders for the given outer width.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let lines = wrap_lines(&self.buffer, width.saturating_sub(BORDER)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + BORDER
    }

    /// (line, column) of the cursor inside the wrapped text.
    fn cursor_location(&self, content_width: u16) -> (usize, u16) {
        let lines = wrap_lines(&self.buffer, content_width);
        let line = lines
            .iter()
            .rposition(|&(start, _)| start <= self.cursor)
            .unwrap_or(0);
        let (start, _) = lines[line];
        let column = self.buffer[start..self.cursor].width() as u16;
        (line, column)
    }

    fn title(&self) -> &'static str {
        if self.enabled {
            "Ask Red Spider (Enter to send, Ctrl+J for newline)"
        } else {
            "Waiting for the answer... (sending disabled)"
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

/// Splits `text` into visual lines of at most `width` columns.
///
/// Returns byte ranges `(start, end)` into `text`; hard newlines end a line
/// and are not part of either neighbour. Always yields at least one line.
fn wrap_lines(text: &str, width: u16) -> Vec<(usize, usize)> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut column = 0;

    for (idx, c) in text.char_indices() {
        if c == '\n' {
            lines.push((line_start, idx));
            line_start = idx + c.len_utf8();
            column = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if column + w > width && column > 0 {
            lines.push((line_start, idx));
            line_start = idx;
            column = 0;
        }
        column += w;
    }
    lines.push((line_start, text.len()));
    lines
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(BORDER);
        let visible_height = area.height.saturating_sub(BORDER).max(1) as usize;

        let lines = wrap_lines(&self.buffer, content_width);
        let (cursor_line, cursor_column) = self.cursor_location(content_width);
        let first_visible = (cursor_line + 1).saturating_sub(visible_height);

        let text: Vec<Line> = lines
            .iter()
            .skip(first_visible)
            .take(visible_height)
            .map(|&(start, end)| Line::raw(&self.buffer[start..end]))
            .collect();

        let border_style = if self.enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title());

        let input = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::Green));

        frame.render_widget(input, area);

        let x = area.x + 1 + cursor_column.min(content_width.saturating_sub(1));
        let y = area.y + 1 + (cursor_line - first_visible) as u16;
        frame.set_cursor_position((x, y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut encoded));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&normalized);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => self
                .enabled
                .then(|| InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
