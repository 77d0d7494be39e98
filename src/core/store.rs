//! # Conversation Store
//!
//! Ordered list of messages; insertion order is display order. The controller
//! is the only writer, renderers read through [`Conversation::snapshot`].

use std::fmt;

use crate::core::message::Message;

/// Returned when removing past the end of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "message index {} out of range (conversation has {} messages)",
            self.index, self.len
        )
    }
}

impl std::error::Error for IndexError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its index.
    pub fn append(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Removes and returns the message at `index`, shifting later ones down.
    pub fn remove_at(&mut self, index: usize) -> Result<Message, IndexError> {
        if index >= self.messages.len() {
            return Err(IndexError {
                index,
                len: self.messages.len(),
            });
        }
        Ok(self.messages.remove(index))
    }

    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn loading_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.append(Message::user("first")), 0);
        assert_eq!(conversation.append(Message::assistant("second")), 1);
        let texts: Vec<_> = conversation.snapshot().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn remove_at_shifts_following_messages() {
        let mut conversation = Conversation::new();
        conversation.append(Message::user("q"));
        conversation.append(Message::loading());
        conversation.append(Message::assistant("a"));

        let removed = conversation.remove_at(1).unwrap();
        assert!(removed.is_loading());
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.get(1).unwrap().text, "a");
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let mut conversation = Conversation::new();
        conversation.append(Message::user("q"));

        let err = conversation.remove_at(3).unwrap_err();
        assert_eq!(err, IndexError { index: 3, len: 1 });
        assert_eq!(conversation.len(), 1, "failed removal must not mutate");
        assert_eq!(
            err.to_string(),
            "message index 3 out of range (conversation has 1 messages)"
        );
    }

    #[test]
    fn loading_count_tracks_placeholders() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.loading_count(), 0);
        let idx = conversation.append(Message::loading());
        assert_eq!(conversation.loading_count(), 1);
        conversation.remove_at(idx).unwrap();
        assert_eq!(conversation.loading_count(), 0);
        assert!(conversation.is_empty());
    }
}
