//! Structured debate event logging.
//!
//! Provides [`JsonlConversationLogger`], the JSONL adapter for the
//! [`ConversationLogger`](debate_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
