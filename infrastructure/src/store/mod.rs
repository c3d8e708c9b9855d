//! Transcript persistence

mod transcript_store;

pub use transcript_store::{TranscriptStore, TranscriptStoreError};
