use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LandingPage, MessageList, TitleBar};

/// Draws one frame: title bar, conversation (or landing page), input box,
/// and the toast overlay on top when one is live.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    if app.conversation.is_empty() {
        LandingPage.render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            app.conversation.snapshot(),
            spinner_frame,
        )
        .render(frame, main_area);
    }

    TitleBar::new(
        app.backend_label.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
    )
    .render(frame, title_area);

    tui.input_box.enabled = app.send_enabled;
    tui.input_box.render(frame, input_area);

    if let Some(toast) = tui.toast.as_mut() {
        toast.render(frame, main_area);
    }
}
