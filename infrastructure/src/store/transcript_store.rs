//! JSON file storage for finished debates
//!
//! A saved file is exactly a serialized
//! [`TranscriptExport`](debate_domain::TranscriptExport), so it can be fed
//! back through `--replay` to re-run resolution offline.

use debate_domain::TranscriptExport;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum TranscriptStoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid transcript in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and writes transcript exports as pretty-printed JSON
pub struct TranscriptStore;

impl TranscriptStore {
    /// Write an export, creating parent directories as needed
    pub fn save(path: &Path, export: &TranscriptExport) -> Result<(), TranscriptStoreError> {
        let io_err = |source| TranscriptStoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(export).map_err(|source| {
            TranscriptStoreError::Format {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json + "\n").map_err(io_err)?;

        info!(
            "Saved transcript ({} rounds) to {}",
            export.rounds.len(),
            path.display()
        );
        Ok(())
    }

    /// Read an export back.
    ///
    /// Only the JSON shape is checked here; round invariants are re-checked
    /// when the export is turned back into a transcript.
    pub fn load(path: &Path) -> Result<TranscriptExport, TranscriptStoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| TranscriptStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TranscriptStoreError::Format {
            path: path.to_path_buf(),
            source,
        })
    }
}
