// SPDX-License-Identifier: MPL-2.0
//! `picdate` is a small desktop utility for browsing a folder tree of
//! pictures and fixing their EXIF capture dates.
//!
//! The view is a self-contained HTML document shown in an embedded webview;
//! edits are persisted by shelling out to the external `exiftool` program.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod exiftool;
pub mod fields;
pub mod listing;
pub mod navigator;
pub mod picture;
pub mod render;
