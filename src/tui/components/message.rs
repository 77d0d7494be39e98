use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::Template;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// A stateless component that renders one conversation row.
///
/// The row's look is decided entirely by its [`Template`]; the only message
/// data bound into it is the text.
///
/// - **User** (green): the question as typed
/// - **Assistant** (blue): a normal answer
/// - **Loading** (dark gray, italic): placeholder with a spinner in the title
/// - **Error** (red): transport or backend failure
/// - **Emergency** (light red, bold, thick border): urgent-symptom answer
#[derive(Clone, Copy)]
pub struct MessageRow<'a> {
    pub template: Template,
    pub text: &'a str,
    /// Animation frame for the loading spinner.
    pub spinner_frame: usize,
}

impl<'a> MessageRow<'a> {
    pub fn new(template: Template, text: &'a str, spinner_frame: usize) -> Self {
        Self {
            template,
            text,
            spinner_frame,
        }
    }

    /// Calculate the height required for a row of `text` given a width.
    ///
    /// `textwrap` predicts the height without rendering; its options must
    /// match Ratatui's `Paragraph` wrapping so the two agree line for line.
    pub fn calculate_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding.
            return 1;
        }

        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        match self.template {
            Template::Loading => {
                let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
                format!("{} {}", self.template.label(), spinner)
            }
            _ => self.template.label().to_string(),
        }
    }
}

/// Text style for each template.
pub fn template_style(template: Template) -> Style {
    match template {
        Template::User => Style::default().fg(Color::Green),
        Template::Assistant => Style::default().fg(Color::Blue),
        Template::Loading => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        Template::Error => Style::default().fg(Color::Red),
        Template::Emergency => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    }
}

fn border_type(template: Template) -> BorderType {
    match template {
        Template::Emergency => BorderType::Thick,
        _ => BorderType::Rounded,
    }
}

impl<'a> Widget for MessageRow<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = template_style(self.template);
        let border_style = match self.template {
            Template::Emergency | Template::Error => style,
            _ => style.add_modifier(Modifier::DIM),
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(border_type(self.template))
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageRow<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
