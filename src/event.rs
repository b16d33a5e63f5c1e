// SPDX-License-Identifier: MPL-2.0
//! Typed intents sent from the rendered view back to the controller.
//!
//! The webview posts a JSON-encoded intent over its IPC channel
//! (`window.ipc.postMessage`); this module decodes it into a typed value.
//! Four intent kinds exist: enter a directory, open an entry, go up one
//! level, and submit an edited field value.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single user intent received from the rendered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Navigate into a directory and show its listing.
    EnterDir { path: PathBuf },
    /// Open a file entry (picture detail or unrecognized view).
    OpenEntry { path: PathBuf },
    /// Navigate to the parent of the current location.
    GoUp,
    /// A click in the tree pane; the target may be a directory or a file.
    SelectTree { path: PathBuf },
    /// Apply an edited field value. The payload is the ordered list
    /// `[field identifier, sub-control values...]` collected by the view.
    SubmitUpdate { payload: Vec<String> },
}

/// Decodes a raw IPC message into an intent.
///
/// Returns `None` for anything that is not a well-formed intent; a garbled
/// message is ignored rather than treated as an error.
pub fn decode(raw: &str) -> Option<Intent> {
    serde_json::from_str(raw).ok()
}
