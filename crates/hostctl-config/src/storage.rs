//! `[storage]` section and its feature toggles

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use hostctl_diff::CanonicalForm;

use crate::gate::{Gate, GatePolicy, Gated};
use crate::size::SizeInBytes;

/// `[storage]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    /// Upper bound for a single uploaded object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_limit: Option<SizeInBytes>,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub image_transformation: Gate<ImageTransformation>,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub s3_protocol: Gate<S3Protocol>,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub analytics: Gate<AnalyticsBuckets>,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub vector: Gate<VectorBuckets>,
    /// Bucket definitions. These only exist locally and are seeded by other
    /// commands, so they never drift against the platform.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub buckets: HashMap<String, Bucket>,
}

impl Storage {
    /// Whether the section carries any opinion about the platform
    pub fn is_managed(&self) -> bool {
        self.file_size_limit.is_some()
            || self.image_transformation.is_managed()
            || self.s3_protocol.is_managed()
            || self.analytics.is_managed()
            || self.vector.is_managed()
    }
}

impl CanonicalForm for Storage {
    const SECTION: &'static str = "storage";
}

/// `[storage.image_transformation]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTransformation {}

impl Gated for ImageTransformation {
    const SECTION: &'static str = "storage.image_transformation";
    const POLICY: GatePolicy = GatePolicy::PresenceGated;
}

/// `[storage.s3_protocol]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Protocol {}

impl Gated for S3Protocol {
    const SECTION: &'static str = "storage.s3_protocol";
    const POLICY: GatePolicy = GatePolicy::PresenceGated;
}

/// `[storage.analytics]`: Iceberg catalog limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsBuckets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_namespaces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tables: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_catalogs: Option<u32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub buckets: HashMap<String, AnalyticsBucket>,
}

impl Gated for AnalyticsBuckets {
    const SECTION: &'static str = "storage.analytics";
    const POLICY: GatePolicy = GatePolicy::FlagGated;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsBucket {}

/// `[storage.vector]`: vector bucket limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorBuckets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_buckets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_indexes: Option<u32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub buckets: HashMap<String, VectorBucket>,
}

impl Gated for VectorBuckets {
    const SECTION: &'static str = "storage.vector";
    const POLICY: GatePolicy = GatePolicy::FlagGated;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorBucket {}

/// `[storage.buckets.<name>]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_limit: Option<SizeInBytes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_mime_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects_path: Option<String>,
}
