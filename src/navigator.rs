// SPDX-License-Identifier: MPL-2.0
//! Navigation state machine mapping user intents to view states.
//!
//! The current location is an explicit state value threaded through the
//! event handler rather than a free-floating global. Every transition is
//! deterministic; a path that cannot be opened as an image degrades to the
//! unrecognized state instead of failing.

use crate::picture;
use std::path::{Path, PathBuf};

/// What is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A directory listing.
    Directory(PathBuf),
    /// A single picture with its editable metadata.
    PictureDetail(PathBuf),
    /// A file entry that could not be opened as an image.
    Unrecognized(PathBuf),
}

impl ViewState {
    /// Returns the filesystem path this state refers to.
    pub fn path(&self) -> &Path {
        match self {
            ViewState::Directory(p) | ViewState::PictureDetail(p) | ViewState::Unrecognized(p) => p,
        }
    }
}

/// A navigation event, derived from a user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    EnterDirectory(PathBuf),
    EnterEntry(PathBuf),
    GoUp,
    SelectInTree(PathBuf),
}

/// Applies a navigation event to the current state and returns the new one.
///
/// `GoUp` at the filesystem root is declined: the state is returned
/// unchanged. `SelectInTree` follows the same openable-image check as
/// `EnterEntry` when the target is a file.
pub fn transition(state: &ViewState, event: NavEvent) -> ViewState {
    match event {
        NavEvent::EnterDirectory(path) => ViewState::Directory(path),
        NavEvent::EnterEntry(path) => classify_entry(path),
        NavEvent::GoUp => match state.path().parent() {
            Some(parent) => ViewState::Directory(parent.to_path_buf()),
            None => state.clone(),
        },
        NavEvent::SelectInTree(path) => {
            if path.is_dir() {
                ViewState::Directory(path)
            } else {
                classify_entry(path)
            }
        }
    }
}

fn classify_entry(path: PathBuf) -> ViewState {
    if picture::is_openable(&path) {
        ViewState::PictureDetail(path)
    } else {
        ViewState::Unrecognized(path)
    }
}
