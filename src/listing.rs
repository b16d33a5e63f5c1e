// SPDX-License-Identifier: MPL-2.0
//! Directory scanning for the listing view.
//!
//! A listing holds the immediate children of one directory, split into
//! subdirectories and openable image files. Directories come first,
//! alphabetically; image files follow, alphabetically. Files that are not
//! openable as images are skipped entirely.

use crate::error::Result;
use crate::picture;
use std::path::{Path, PathBuf};

/// The immediate children of a directory, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    directories: Vec<PathBuf>,
    pictures: Vec<PathBuf>,
}

impl Listing {
    /// Scans a directory for subdirectories and image files.
    ///
    /// Returns an error if the directory cannot be read (deleted,
    /// permission denied); the caller degrades to an error rendering.
    pub fn scan(directory: &Path) -> Result<Self> {
        let mut directories = Vec::new();
        let mut pictures = Vec::new();

        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                directories.push(path);
            } else if path.is_file() && picture::is_openable(&path) {
                pictures.push(path);
            }
        }

        directories.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        pictures.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(Self {
            directories,
            pictures,
        })
    }

    /// Subdirectories, sorted alphabetically by name.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Openable image files, sorted alphabetically by name.
    pub fn pictures(&self) -> &[PathBuf] {
        &self.pictures
    }

    /// Checks whether the directory holds neither subdirectories nor images.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.pictures.is_empty()
    }
}
