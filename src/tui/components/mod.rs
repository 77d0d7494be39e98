//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar showing backend and status
//! - `MessageRow`: one conversation row, styled by its template
//! - `LandingPage`: welcome text for an empty conversation
//! - `Toast`: transient alert / prompt overlay
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `InputBox`: question editor with the send affordance
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── alert.rs         (Toast overlay)
//! ├── input_box.rs     (Question editor)
//! ├── landing.rs       (Empty-conversation page)
//! ├── message.rs       (Single row renderer)
//! ├── message_list.rs  (Scrollable message container)
//! └── title_bar.rs     (Top status bar)
//! ```

pub mod alert;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
mod title_bar;

pub use alert::Toast;
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
