// SPDX-License-Identifier: MPL-2.0
//! Client for the external `exiftool` metadata reader/writer.
//!
//! The tool is an opaque collaborator invoked via command-line arguments.
//! Reads use `-json <path>` and expect an array with one object; writes use
//! `-<Field>=<value> <path>` and are judged solely by exit status, with
//! stdout and stderr captured for display on failure.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default tool program, resolved on `PATH`.
pub const DEFAULT_PROGRAM: &str = "exiftool";

/// Captured result of a tool write invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Whether the tool exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Handle to the external metadata tool.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Reads all metadata fields of a file as one JSON object.
    ///
    /// The tool's exit status is ignored for reads; whatever JSON it printed
    /// is used. An absent key means the field is unset.
    pub fn read_fields(&self, path: &Path) -> Result<Map<String, Value>> {
        let output = Command::new(&self.program)
            .arg("-json")
            .arg(path)
            .output()
            .map_err(|e| Error::Tool(format!("failed to run {}: {}", self.program.display(), e)))?;

        let parsed: Vec<Value> = serde_json::from_slice(&output.stdout)?;
        match parsed.into_iter().next() {
            Some(Value::Object(fields)) => Ok(fields),
            _ => Err(Error::Tool("tool returned no metadata object".into())),
        }
    }

    /// Writes one field by running the tool with the editor-built arguments
    /// followed by the target path. `-overwrite_original` keeps the tool's
    /// backup copies out of the directory listing. Never retries; the
    /// caller decides what to render from the outcome.
    pub fn write_field(&self, args: &[String], path: &Path) -> Result<ToolOutcome> {
        let output = Command::new(&self.program)
            .args(args)
            .arg("-overwrite_original")
            .arg(path)
            .output()
            .map_err(|e| Error::Tool(format!("failed to run {}: {}", self.program.display(), e)))?;

        Ok(ToolOutcome {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

/// Extracts a field's raw textual value from a metadata object.
///
/// An absent key yields the empty string (the field is unset); non-string
/// values are rendered through their JSON form.
pub fn raw_field(fields: &Map<String, Value>, id: &str) -> String {
    match fields.get(id) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
