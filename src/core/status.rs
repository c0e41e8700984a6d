//! Repository status summary
//!
//! `RepoStatus` is the single aggregate filled in by the parser and read once
//! by the renderer. Change counts are kept per area (index / working tree)
//! in a `ChangeCounts` value each.

use serde::{Deserialize, Serialize};

/// Category a single porcelain status column maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    /// Lookup table for the index (first) column
    pub fn from_index_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(ChangeKind::Added),
            'M' => Some(ChangeKind::Modified),
            'D' => Some(ChangeKind::Removed),
            _ => None,
        }
    }

    /// Lookup table for the working-tree (second) column
    pub fn from_working_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(ChangeKind::Added),
            'M' => Some(ChangeKind::Modified),
            'D' => Some(ChangeKind::Removed),
            _ => None,
        }
    }
}

/// Added / modified / removed file counts for one area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: u32,
    pub modified: u32,
    pub removed: u32,
}

impl ChangeCounts {
    pub fn record(&mut self, kind: ChangeKind) {
        let slot = match kind {
            ChangeKind::Added => &mut self.added,
            ChangeKind::Modified => &mut self.modified,
            ChangeKind::Removed => &mut self.removed,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        self.added
            .saturating_add(self.modified)
            .saturating_add(self.removed)
    }
}

/// Parsed state of the repository for one prompt render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    /// Local branch name, or the name of an unborn branch
    pub branch_name: String,
    pub commits_ahead: u32,
    pub commits_behind: u32,

    /// Set as soon as one staged change is recorded
    pub show_index: bool,
    pub index: ChangeCounts,

    /// Set as soon as one unstaged or untracked change is recorded
    pub show_working: bool,
    pub working: ChangeCounts,
}

impl RepoStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_index(&mut self, kind: ChangeKind) {
        self.index.record(kind);
        self.show_index = true;
    }

    pub fn record_working(&mut self, kind: ChangeKind) {
        self.working.record(kind);
        self.show_working = true;
    }

    /// Neither ahead nor behind its upstream (or no upstream at all)
    pub fn is_in_sync(&self) -> bool {
        self.commits_ahead == 0 && self.commits_behind == 0
    }
}
