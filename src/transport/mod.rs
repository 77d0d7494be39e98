pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatTransport, HttpTransport, Timeouts};
pub use error::TransportError;
pub use types::{
    AnswerSection, BatchCheckResponse, BatchCheckResult, ChatRequest, ChatResponse,
    ChatResponseData, ErrorInfo, ResponseStatus,
};
