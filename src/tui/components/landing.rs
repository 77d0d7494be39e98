//! # Landing Page Component
//!
//! Shown in place of the conversation while it is still empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const TAGLINES: &[&str] = &[
    "Describe your symptoms and Red Spider will suggest what to do next.",
    "Answers are for reference only and do not replace a doctor.",
];

pub struct LandingPage;

impl LandingPage {
    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Red Spider",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        lines.extend(
            TAGLINES
                .iter()
                .map(|t| Line::from(Span::styled(*t, Style::default().fg(Color::Gray)))),
        );
        lines
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
    }
}
