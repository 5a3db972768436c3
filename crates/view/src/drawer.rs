//! Drawer expansion state, kept in step with the shared quote.
//!
//! The drawer only needs the row count to decide when to open itself. Each
//! notification re-reads the count and version from the store, so deliveries
//! that arrive out of order cannot leave a stale count behind.

use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerState {
    viewport: Viewport,
    expanded: bool,
    rows: usize,
    version: u64,
}

impl DrawerState {
    /// Start from a known quote state; `version` is the store version it was read at.
    pub fn new(viewport: Viewport, rows: usize, version: u64) -> Self {
        Self {
            viewport,
            // Mounting on a narrow screen with a populated quote opens the drawer.
            expanded: viewport.is_narrow() && rows > 0,
            rows,
            version,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Store version of the last accepted snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Expanded flag as rendered: an empty quote never shows an open drawer.
    pub fn is_expanded(&self) -> bool {
        self.expanded && self.rows > 0
    }

    /// Accept a `(rows, version)` snapshot of the store.
    ///
    /// Snapshots at or below the current version are ignored. Returns whether
    /// the snapshot was taken.
    pub fn sync(&mut self, rows: usize, version: u64) -> bool {
        if version <= self.version {
            return false;
        }
        self.version = version;
        self.set_rows(rows);
        true
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        let switched_to_narrow = viewport.is_narrow() && !self.viewport.is_narrow();
        self.viewport = viewport;
        if switched_to_narrow && self.rows > 0 {
            self.expanded = true;
        }
    }

    pub fn toggle(&mut self) {
        if self.rows > 0 {
            self.expanded = !self.expanded;
        }
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    fn set_rows(&mut self, rows: usize) {
        if rows == self.rows {
            return;
        }
        self.rows = rows;
        if rows == 0 {
            self.expanded = false;
        } else if self.viewport.is_narrow() {
            self.expanded = true;
        }
    }
}
