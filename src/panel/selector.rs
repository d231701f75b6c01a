//! Drop-down that opens status panels
//! Location: src/panel/selector.rs

use super::status::{StatusKind, StatusPanel};
use crate::error::{PanelError, Result};

/// Drop-down entries; index 0 is the placeholder
pub const SELECTOR_OPTIONS: [&str; 4] = ["Select Status", "Batteries", "Motors", "LEDs"];

/// Selection state plus the panels opened so far, in insertion order
#[derive(Debug, Clone, Default)]
pub struct StatusSelector {
    current_index: usize,
    panels: Vec<StatusPanel>,
    next_id: u32,
}

impl StatusSelector {
    /// Empty selector at the placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop-down entries
    pub fn options(&self) -> &'static [&'static str] {
        &SELECTOR_OPTIONS
    }

    /// Always 0 between selections
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Open panels, oldest first
    pub fn panels(&self) -> &[StatusPanel] {
        &self.panels
    }

    /// Choose a drop-down entry.
    ///
    /// Indices 1..=3 append a new panel and return its id. The placeholder and
    /// out-of-range indices change nothing. The selection resets to the
    /// placeholder either way, so the same entry can be chosen again.
    pub fn select(&mut self, index: usize) -> Option<u32> {
        self.current_index = index;

        let kind = match index {
            1 => Some(StatusKind::Battery),
            2 => Some(StatusKind::Motor),
            3 => Some(StatusKind::Led),
            _ => None,
        };

        let added = kind.map(|kind| {
            let id = self.next_id;
            self.next_id += 1;
            self.panels.push(StatusPanel { id, kind });
            tracing::debug!(id, kind = %kind, "status panel opened");
            id
        });

        self.current_index = 0;
        added
    }

    /// Remove one panel by id
    pub fn close(&mut self, id: u32) -> Result<StatusPanel> {
        let position = self
            .panels
            .iter()
            .position(|panel| panel.id == id)
            .ok_or(PanelError::UnknownPanel(id))?;

        let panel = self.panels.remove(position);
        tracing::debug!(id, kind = %panel.kind, "status panel closed");
        Ok(panel)
    }
}
