// SPDX-License-Identifier: MPL-2.0
//! The controller: owns the view state and turns intents into rendered
//! pages.
//!
//! One intent is fully processed before the next: the state is updated, the
//! external tool is invoked if needed, and the full document for the new
//! state is returned. No error here is fatal; every failure is reflected
//! into the rendered view instead.

use crate::config::Config;
use crate::event::Intent;
use crate::exiftool::{ExifTool, ToolOutcome};
use crate::fields::{FieldRegistry, UpdatePayload};
use crate::navigator::{self, NavEvent, ViewState};
use crate::render::{self, PageContext};

pub struct App {
    state: ViewState,
    registry: FieldRegistry,
    tool: ExifTool,
    listing_bound: u32,
    detail_bound: u32,
}

impl App {
    /// Builds the controller from configuration, starting at the configured
    /// directory's listing.
    pub fn new(config: &Config) -> Self {
        Self {
            state: ViewState::Directory(config.start_dir()),
            registry: FieldRegistry::with_defaults(),
            tool: ExifTool::new(config.tool_program()),
            listing_bound: config.listing_bound(),
            detail_bound: config.detail_bound(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Renders the document for the current state.
    pub fn render(&self) -> String {
        let ctx = PageContext {
            tool: &self.tool,
            registry: &self.registry,
            listing_bound: self.listing_bound,
            detail_bound: self.detail_bound,
        };
        match &self.state {
            ViewState::Directory(path) => render::directory_page(path, &ctx),
            ViewState::PictureDetail(path) | ViewState::Unrecognized(path) => {
                render::picture_page(path, &ctx)
            }
        }
    }

    /// Processes one intent and returns the document to display next.
    pub fn handle(&mut self, intent: Intent) -> String {
        tracing::debug!(?intent, "handling intent");
        match intent {
            Intent::EnterDir { path } => self.navigate(NavEvent::EnterDirectory(path)),
            Intent::OpenEntry { path } => self.navigate(NavEvent::EnterEntry(path)),
            Intent::GoUp => self.navigate(NavEvent::GoUp),
            Intent::SelectTree { path } => self.navigate(NavEvent::SelectInTree(path)),
            Intent::SubmitUpdate { payload } => self.apply_update(UpdatePayload::new(payload)),
        }
    }

    fn navigate(&mut self, event: NavEvent) -> String {
        self.state = navigator::transition(&self.state, event);
        tracing::debug!(state = ?self.state, "navigated");
        self.render()
    }

    /// Validates the payload, persists through the external tool, and
    /// re-renders. A payload that fails validation never reaches the tool;
    /// a failed invocation renders its captured output instead.
    fn apply_update(&mut self, payload: UpdatePayload) -> String {
        let Some(editor) = self.registry.from_update(&payload) else {
            tracing::warn!(payload = ?payload.as_slice(), "rejected update payload");
            return render::parameter_error_page(payload.as_slice());
        };

        let target = self.state.path().to_path_buf();
        match self.tool.write_field(&editor.tool_args(), &target) {
            Ok(outcome) if outcome.success => {
                tracing::info!(field = editor.id(), path = %target.display(), "field updated");
                // The re-render re-reads the field, surfacing whatever the
                // tool actually stored.
                self.render()
            }
            Ok(outcome) => {
                tracing::warn!(field = editor.id(), "tool reported failure");
                render::tool_failure_page(&outcome)
            }
            Err(err) => {
                tracing::warn!(error = %err, "tool could not be invoked");
                render::tool_failure_page(&ToolOutcome {
                    success: false,
                    stdout: String::new(),
                    stderr: err.to_string(),
                })
            }
        }
    }
}
