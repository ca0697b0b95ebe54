//! Reports returned by the reconciliation engine

use hostctl_diff::SectionDiff;
use serde::{Deserialize, Serialize};

/// Overall drift status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatus {
    /// Every managed section matches the platform
    InSync,
    /// At least one managed section differs from the platform
    Drifted,
}

/// Drift between the local config and the platform, per section
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    /// Overall status of the comparison
    pub status: DriftStatus,
    /// Managed sections that were compared, in sync or not
    pub sections: Vec<SectionDiff>,
    /// Sections that were not compared because the file leaves them unmanaged
    pub skipped: Vec<String>,
}

impl Default for DriftReport {
    fn default() -> Self {
        Self::in_sync()
    }
}

impl DriftReport {
    /// An empty report with nothing compared yet
    pub fn in_sync() -> Self {
        Self {
            status: DriftStatus::InSync,
            sections: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Record the result of comparing one section
    pub fn record(&mut self, section: SectionDiff) {
        if section.has_drift() {
            self.status = DriftStatus::Drifted;
        }
        self.sections.push(section);
    }

    /// Record a section that was left out
    pub fn skip(&mut self, section: &str) {
        self.skipped.push(section.to_string());
    }

    pub fn has_drift(&self) -> bool {
        self.status == DriftStatus::Drifted
    }

    /// Sections whose diff is non-empty
    pub fn drifted(&self) -> impl Iterator<Item = &SectionDiff> {
        self.sections.iter().filter(|s| s.has_drift())
    }

    /// The comparison result for `section`, if it was compared
    pub fn section(&self, section: &str) -> Option<&SectionDiff> {
        self.sections.iter().find(|s| s.section == section)
    }

    /// All non-empty diffs joined into one text
    pub fn combined_diff(&self) -> String {
        self.drifted().map(|s| s.diff.as_str()).collect()
    }
}

/// Options for [`push`](crate::ReconcileEngine::push)
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// If true, compute what would change without writing to the platform.
    /// Actions are prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Report from a push
#[derive(Debug, Clone, Serialize)]
pub struct PushReport {
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// Drift found before any write
    pub drift: DriftReport,
    /// Sections that were written (or would be, on a dry run)
    pub updated: Vec<String>,
    /// Human-readable actions taken
    pub actions: Vec<String>,
}

impl PushReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            drift: DriftReport::in_sync(),
            updated: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Record an update of `section`
    pub fn record_update(&mut self, section: &str) {
        let action = if self.dry_run {
            format!("[dry-run] Would update {}", section)
        } else {
            format!("Updated {}", section)
        };
        self.updated.push(section.to_string());
        self.actions.push(action);
    }

    /// Whether nothing needed to change
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty()
    }
}
