//! Remote state adapters
//!
//! Each reconciled section implements [`RemoteAdapter`]: it knows how to
//! fold the platform's view of itself into a copy of the local record and
//! how to project the local record into an update body. Diffing is shared:
//! the merged copy plays the remote side, the local record the local side,
//! both rendered through [`CanonicalForm`].

mod network;
mod pooler;
mod settings;
mod ssl;
mod storage;

use hostctl_diff::{CanonicalForm, SectionDiff};

use crate::Result;

/// Bridges one local config record and its remote API shapes
pub trait RemoteAdapter: CanonicalForm + Clone {
    /// Response of the section's read endpoint
    type Remote;
    /// Body of the section's write endpoint
    type Body;

    /// Whether the section takes part in reconciliation at all
    fn is_managed(&self) -> bool;

    /// Overwrite the parts of `self` the local file has an opinion on with
    /// their remote values. Everything else is left as written.
    fn from_remote(&mut self, remote: &Self::Remote);

    /// Project the local record into an update body. Unset fields and
    /// switched-off feature blocks are omitted.
    fn to_remote_body(&self) -> Self::Body;

    /// Drift between `remote` and `self` as a [`SectionDiff`]
    fn section_diff(&self, remote: &Self::Remote) -> Result<SectionDiff> {
        if !self.is_managed() {
            return Ok(SectionDiff::in_sync(Self::SECTION));
        }

        let mut merged = self.clone();
        merged.from_remote(remote);

        let remote_text = merged.to_canonical()?;
        let local_text = self.to_canonical()?;
        Ok(SectionDiff::compute(Self::SECTION, &remote_text, &local_text))
    }

    /// Unified diff from `remote` to `self`, empty when in sync or unmanaged
    fn diff_with_remote(&self, remote: &Self::Remote) -> Result<String> {
        Ok(self.section_diff(remote)?.diff)
    }
}

/// Replace a local value with the remote one, only where the local file set it
fn merge_field<T>(local: &mut Option<T>, remote: Option<T>) {
    if local.is_some() {
        *local = remote;
    }
}

/// Remote counters are signed; local ones are not. Negative values clamp to
/// zero, oversized ones to `u32::MAX`.
fn to_local_count(remote: Option<i64>) -> Option<u32> {
    remote.map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
}

fn to_remote_i64(local: Option<u32>) -> Option<i64> {
    local.map(i64::from)
}

fn to_remote_i32(local: Option<u32>) -> Option<i32> {
    local.map(|v| i32::try_from(v).unwrap_or(i32::MAX))
}

/// Serialize an update body and read it back as the matching read
/// response, after `reshape` moves it into the response layout
#[cfg(test)]
fn echo_remote<B, R, F>(body: &B, reshape: F) -> R
where
    B: serde::Serialize,
    R: serde::de::DeserializeOwned,
    F: FnOnce(serde_json::Value) -> serde_json::Value,
{
    let value = serde_json::to_value(body).unwrap();
    serde_json::from_value(reshape(value)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_field_respects_missing_opinion() {
        let mut unset: Option<u32> = None;
        merge_field(&mut unset, Some(5));
        assert_eq!(unset, None);

        let mut set = Some(1);
        merge_field(&mut set, Some(5));
        assert_eq!(set, Some(5));

        let mut cleared = Some(1);
        merge_field(&mut cleared, None);
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_count_conversions() {
        assert_eq!(to_local_count(Some(-3)), Some(0));
        assert_eq!(to_local_count(Some(i64::MAX)), Some(u32::MAX));
        assert_eq!(to_local_count(None), None);
        assert_eq!(to_remote_i64(Some(u32::MAX)), Some(4_294_967_295));
        assert_eq!(to_remote_i32(Some(u32::MAX)), Some(i32::MAX));
        assert_eq!(to_remote_i32(None), None);
    }
}
