//! Canonical serialization and drift diffing for hostctl
//!
//! Every configuration record that takes part in reconciliation implements
//! [`CanonicalForm`]. Two records of the same type are compared by rendering
//! both to their canonical text and running a line diff over the result:
//!
//! ```text
//! --- remote[db.settings]
//! +++ local[db.settings]
//! @@ -1 +1 @@
//! -max_connections = 60
//! +max_connections = 100
//! ```
//!
//! An empty diff means the two records are identical after canonicalization.

pub mod canonical;
pub mod diff;
pub mod error;

pub use canonical::{CanonicalForm, to_canonical_string};
pub use diff::{SectionDiff, diff, diff_records, local_label, remote_label};
pub use error::{Error, Result};
