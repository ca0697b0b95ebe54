//! Managed / unmanaged gating for optional config sections
//!
//! A section that models an on/off capability is either absent from the
//! file, present with `enabled = false`, or present with `enabled = true`.
//! [`Gate`] makes these three states explicit; [`GatePolicy`] decides which
//! of them take part in reconciliation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use hostctl_diff::{CanonicalForm, to_canonical_string};

/// How a section's gate maps onto "managed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePolicy {
    /// Managed whenever the section is present, whatever its `enabled` flag
    PresenceGated,
    /// Managed only when `enabled = true`; a disabled section leaves the
    /// platform untouched
    FlagGated,
}

/// Settings types that live behind a [`Gate`]
pub trait Gated {
    /// Dotted section path within `config.toml`
    const SECTION: &'static str;
    /// Which gate states count as managed
    const POLICY: GatePolicy;
}

/// Tri-state for an optional, switchable config section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<T> {
    /// Section absent: no local opinion
    Unmanaged,
    /// Section present with `enabled = false`
    Disabled(T),
    /// Section present with `enabled = true`
    Enabled(T),
}

impl<T> Default for Gate<T> {
    fn default() -> Self {
        Gate::Unmanaged
    }
}

impl<T> Gate<T> {
    /// Build a gate from an `enabled` flag and settings
    pub fn new(enabled: bool, settings: T) -> Self {
        if enabled {
            Gate::Enabled(settings)
        } else {
            Gate::Disabled(settings)
        }
    }

    /// Whether the section is absent from the file
    pub fn is_unmanaged(&self) -> bool {
        matches!(self, Gate::Unmanaged)
    }

    /// Whether the section is present and switched on
    pub fn is_enabled(&self) -> bool {
        matches!(self, Gate::Enabled(_))
    }

    /// Settings regardless of the flag, `None` when unmanaged
    pub fn settings(&self) -> Option<&T> {
        match self {
            Gate::Unmanaged => None,
            Gate::Disabled(settings) | Gate::Enabled(settings) => Some(settings),
        }
    }

    /// Mutable settings regardless of the flag, `None` when unmanaged
    pub fn settings_mut(&mut self) -> Option<&mut T> {
        match self {
            Gate::Unmanaged => None,
            Gate::Disabled(settings) | Gate::Enabled(settings) => Some(settings),
        }
    }

    /// Flip the flag of a present section. Unmanaged sections stay unmanaged.
    pub fn set_enabled(&mut self, enabled: bool) {
        *self = match std::mem::replace(self, Gate::Unmanaged) {
            Gate::Unmanaged => Gate::Unmanaged,
            Gate::Disabled(settings) | Gate::Enabled(settings) => Gate::new(enabled, settings),
        };
    }
}

impl<T: Gated> Gate<T> {
    /// Whether this section participates in diffing and merging
    pub fn is_managed(&self) -> bool {
        match (self, T::POLICY) {
            (Gate::Unmanaged, _) => false,
            (Gate::Disabled(_), GatePolicy::PresenceGated) => true,
            (Gate::Disabled(_), GatePolicy::FlagGated) => false,
            (Gate::Enabled(_), _) => true,
        }
    }

    /// Settings of a managed section
    pub fn managed(&self) -> Option<&T> {
        if self.is_managed() { self.settings() } else { None }
    }

    /// Mutable settings of a managed section
    pub fn managed_mut(&mut self) -> Option<&mut T> {
        if self.is_managed() {
            self.settings_mut()
        } else {
            None
        }
    }
}

/// On-disk shape: an `enabled` flag next to the section's own keys
#[derive(Serialize, Deserialize)]
struct GateRepr<T> {
    #[serde(default)]
    enabled: bool,
    #[serde(flatten)]
    settings: T,
}

impl<T: Serialize> Serialize for Gate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Gate::Unmanaged => None,
            Gate::Disabled(settings) => Some(GateRepr {
                enabled: false,
                settings,
            }),
            Gate::Enabled(settings) => Some(GateRepr {
                enabled: true,
                settings,
            }),
        };
        repr.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Gate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<GateRepr<T>>::deserialize(deserializer)? {
            None => Gate::Unmanaged,
            Some(repr) => Gate::new(repr.enabled, repr.settings),
        })
    }
}

impl<T: Gated + Serialize> CanonicalForm for Gate<T> {
    const SECTION: &'static str = T::SECTION;

    fn to_canonical(&self) -> hostctl_diff::Result<String> {
        match self {
            Gate::Unmanaged => Ok(String::new()),
            _ => to_canonical_string(self),
        }
    }
}
