//! medchat library exports for the binary and integration tests

pub mod core;
pub mod transport;
pub mod tui;

#[cfg(test)]
pub mod test_support;
