//! # Application State
//!
//! Core business state for the chat client. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transport: Arc<dyn ChatTransport>  // backend connection
//! ├── conversation: Conversation         // visible message history
//! ├── phase: Phase                       // idle / sending / resolving
//! ├── send_enabled: bool                 // send affordance
//! ├── loading_index: Option<usize>       // where the placeholder was put
//! ├── alert: Option<String>              // current one-shot alert
//! ├── status_message: String             // status bar text
//! └── backend_label: String              // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::store::Conversation;
use crate::transport::ChatTransport;

/// Where the single send cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Question and placeholder are in the conversation; the call is not yet out.
    Sending,
    /// The transport call is in flight.
    Resolving,
}

pub struct App {
    pub transport: Arc<dyn ChatTransport>,
    pub conversation: Conversation,
    pub phase: Phase,
    pub send_enabled: bool,
    /// Index the loading placeholder was appended at, while one exists.
    pub loading_index: Option<usize>,
    /// Latest one-shot alert, cleared by `Action::DismissAlert`.
    pub alert: Option<String>,
    pub status_message: String,
    pub backend_label: String,
    /// Forwarded with every request. The backend ignores it for now.
    pub session_id: Option<String>,
}

impl App {
    pub fn new(transport: Arc<dyn ChatTransport>, backend_label: String) -> Self {
        Self {
            transport,
            conversation: Conversation::new(),
            phase: Phase::Idle,
            send_enabled: true,
            loading_index: None,
            alert: None,
            status_message: String::from("Ask Red Spider about your symptoms"),
            backend_label,
            session_id: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }
}
