//! # Messages
//!
//! One entry in the visible conversation, plus the pure mapping from a
//! message to the template the list renders it with.
//!
//! ```text
//! origin=User                 → Template::User
//! kind=Loading                → Template::Loading
//! kind=Error                  → Template::Error
//! kind=Emergency              → Template::Emergency
//! otherwise                   → Template::Assistant
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Text shown in the placeholder while the backend works on an answer.
pub const LOADING_TEXT: &str = "Red Spider is thinking...";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Normal,
    Loading,
    Error,
    Emergency,
}

/// A conversation entry. Never edited after creation; the loading placeholder
/// is removed and replaced, not rewritten.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub origin: Origin,
    /// Creation time in Unix milliseconds.
    pub timestamp: i64,
    pub kind: Kind,
}

impl Message {
    fn new(text: impl Into<String>, origin: Origin, kind: Kind) -> Self {
        Self {
            text: text.into(),
            origin,
            timestamp: Utc::now().timestamp_millis(),
            kind,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Origin::User, Kind::Normal)
    }

    pub fn loading() -> Self {
        Self::new(LOADING_TEXT, Origin::Assistant, Kind::Loading)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Assistant, Kind::Normal)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Assistant, Kind::Error)
    }

    pub fn emergency(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Assistant, Kind::Emergency)
    }

    pub fn is_loading(&self) -> bool {
        self.kind == Kind::Loading
    }

    pub fn template(&self) -> Template {
        Template::for_message(self)
    }
}

/// The five visual treatments a row can get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    User,
    Assistant,
    Loading,
    Error,
    Emergency,
}

impl Template {
    /// Picks the template for a message. A user message is always drawn as
    /// such, whatever its kind.
    pub fn for_message(message: &Message) -> Self {
        if message.origin == Origin::User {
            return Template::User;
        }
        match message.kind {
            Kind::Loading => Template::Loading,
            Kind::Error => Template::Error,
            Kind::Emergency => Template::Emergency,
            Kind::Normal => Template::Assistant,
        }
    }

    /// Label drawn in the row's border.
    pub fn label(self) -> &'static str {
        match self {
            Template::User => "you",
            Template::Assistant => "red spider",
            Template::Loading => "red spider",
            Template::Error => "error",
            Template::Emergency => "emergency",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(origin: Origin, kind: Kind) -> Message {
        Message {
            text: "x".into(),
            origin,
            timestamp: 0,
            kind,
        }
    }

    #[test]
    fn constructors_set_origin_and_kind() {
        assert_eq!(Message::user("q").template(), Template::User);
        assert_eq!(Message::assistant("a").template(), Template::Assistant);
        assert_eq!(Message::loading().template(), Template::Loading);
        assert_eq!(Message::error("e").template(), Template::Error);
        assert_eq!(Message::emergency("!").template(), Template::Emergency);
    }

    #[test]
    fn loading_placeholder_uses_fixed_text() {
        let msg = Message::loading();
        assert_eq!(msg.text, LOADING_TEXT);
        assert!(msg.is_loading());
        assert_eq!(msg.origin, Origin::Assistant);
    }

    #[test]
    fn user_origin_beats_every_kind() {
        for kind in [Kind::Normal, Kind::Loading, Kind::Error, Kind::Emergency] {
            assert_eq!(Template::for_message(&with(Origin::User, kind)), Template::User);
        }
    }

    #[test]
    fn assistant_kinds_map_one_to_one() {
        assert_eq!(
            Template::for_message(&with(Origin::Assistant, Kind::Loading)),
            Template::Loading
        );
        assert_eq!(
            Template::for_message(&with(Origin::Assistant, Kind::Error)),
            Template::Error
        );
        assert_eq!(
            Template::for_message(&with(Origin::Assistant, Kind::Emergency)),
            Template::Emergency
        );
        assert_eq!(
            Template::for_message(&with(Origin::Assistant, Kind::Normal)),
            Template::Assistant
        );
    }

    #[test]
    fn timestamp_is_recent_unix_millis() {
        let before = Utc::now().timestamp_millis();
        let msg = Message::user("hi");
        let after = Utc::now().timestamp_millis();
        assert!(msg.timestamp >= before && msg.timestamp <= after);
    }
}
