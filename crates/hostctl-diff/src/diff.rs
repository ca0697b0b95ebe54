//! Unified line diffs between canonical forms

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::Result;
use crate::canonical::CanonicalForm;

/// Lines of unchanged context around each hunk
const CONTEXT_RADIUS: usize = 3;

/// Header label for the remote side of a section diff
pub fn remote_label(section: &str) -> String {
    format!("remote[{}]", section)
}

/// Header label for the local side of a section diff
pub fn local_label(section: &str) -> String {
    format!("local[{}]", section)
}

/// Produce a unified diff from `remote` to `local`.
///
/// Returns an empty string when both inputs are identical. Comparison is
/// exact and line based; callers are expected to pass canonical text.
pub fn diff(remote_label: &str, remote: &str, local_label: &str, local: &str) -> String {
    if remote == local {
        return String::new();
    }

    TextDiff::from_lines(remote, local)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(remote_label, local_label)
        .to_string()
}

/// Canonicalize two records of the same type and diff them
pub fn diff_records<T: CanonicalForm>(remote: &T, local: &T) -> Result<String> {
    let remote_text = remote.to_canonical()?;
    let local_text = local.to_canonical()?;
    Ok(diff(
        &remote_label(T::SECTION),
        &remote_text,
        &local_label(T::SECTION),
        &local_text,
    ))
}

/// Drift computed for one config section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDiff {
    /// Dotted section path, e.g. `db.settings`
    pub section: String,
    /// Unified diff text, empty when in sync
    pub diff: String,
    /// Lines present locally but not remotely
    pub insertions: usize,
    /// Lines present remotely but not locally
    pub deletions: usize,
}

impl SectionDiff {
    /// Diff two canonical texts for `section`
    pub fn compute(section: &str, remote: &str, local: &str) -> Self {
        let mut insertions = 0;
        let mut deletions = 0;

        if remote != local {
            for change in TextDiff::from_lines(remote, local).iter_all_changes() {
                match change.tag() {
                    ChangeTag::Insert => insertions += 1,
                    ChangeTag::Delete => deletions += 1,
                    ChangeTag::Equal => {}
                }
            }
        }

        Self {
            section: section.to_string(),
            diff: diff(&remote_label(section), remote, &local_label(section), local),
            insertions,
            deletions,
        }
    }

    /// A section with no drift
    pub fn in_sync(section: &str) -> Self {
        Self {
            section: section.to_string(),
            diff: String::new(),
            insertions: 0,
            deletions: 0,
        }
    }

    /// Whether the section has drifted
    pub fn has_drift(&self) -> bool {
        !self.diff.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_produce_empty_diff() {
        let text = "a = 1\nb = 2\n";
        assert_eq!(diff("remote[x]", text, "local[x]", text), "");
    }

    #[test]
    fn test_diff_has_labelled_headers() {
        let out = diff("remote[x]", "a = 1\n", "local[x]", "a = 2\n");
        assert!(out.starts_with("--- remote[x]\n+++ local[x]\n"), "{}", out);
        assert!(out.contains("-a = 1\n"));
        assert!(out.contains("+a = 2\n"));
    }

    #[test]
    fn test_section_diff_counts_changes() {
        let section =
            SectionDiff::compute("db.settings", "a = 1\nb = 2\n", "a = 1\nb = 3\nc = 4\n");
        assert!(section.has_drift());
        assert_eq!(section.insertions, 2);
        assert_eq!(section.deletions, 1);
    }

    #[test]
    fn test_in_sync_section() {
        let section = SectionDiff::compute("storage", "x = 1\n", "x = 1\n");
        assert_eq!(section, SectionDiff::in_sync("storage"));
        assert!(!section.has_drift());
    }
}
