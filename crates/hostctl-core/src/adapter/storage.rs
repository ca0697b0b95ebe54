use hostctl_api::{
    FeatureToggle, IcebergCatalog, StorageConfigResponse, StorageFeatures,
    UpdateStorageConfigBody, VectorBucketsFeature,
};
use hostctl_config::{Gate, Gated, SizeInBytes, Storage};

use super::{RemoteAdapter, merge_field, to_local_count, to_remote_i64};

impl RemoteAdapter for Storage {
    type Remote = StorageConfigResponse;
    type Body = UpdateStorageConfigBody;

    fn is_managed(&self) -> bool {
        Storage::is_managed(self)
    }

    fn from_remote(&mut self, remote: &StorageConfigResponse) {
        let features = &remote.features;

        merge_field(
            &mut self.file_size_limit,
            Some(SizeInBytes(u64::try_from(remote.file_size_limit).unwrap_or(0))),
        );
        merge_toggle(&mut self.image_transformation, features.image_transformation);
        merge_toggle(&mut self.s3_protocol, features.s3_protocol);

        if self.analytics.is_managed() {
            let iceberg = features.iceberg_catalog.unwrap_or_default();
            self.analytics.set_enabled(iceberg.enabled);
            if let Some(analytics) = self.analytics.settings_mut() {
                merge_field(&mut analytics.max_namespaces, to_local_count(iceberg.max_namespaces));
                merge_field(&mut analytics.max_tables, to_local_count(iceberg.max_tables));
                merge_field(&mut analytics.max_catalogs, to_local_count(iceberg.max_catalogs));
            }
        }

        if self.vector.is_managed() {
            let vector = features.vector_buckets.unwrap_or_default();
            self.vector.set_enabled(vector.enabled);
            if let Some(buckets) = self.vector.settings_mut() {
                merge_field(&mut buckets.max_buckets, to_local_count(vector.max_buckets));
                merge_field(&mut buckets.max_indexes, to_local_count(vector.max_indexes));
            }
        }
    }

    fn to_remote_body(&self) -> UpdateStorageConfigBody {
        let iceberg_catalog = match &self.analytics {
            Gate::Enabled(analytics) => Some(IcebergCatalog {
                enabled: true,
                max_namespaces: to_remote_i64(analytics.max_namespaces),
                max_tables: to_remote_i64(analytics.max_tables),
                max_catalogs: to_remote_i64(analytics.max_catalogs),
            }),
            _ => None,
        };
        let vector_buckets = match &self.vector {
            Gate::Enabled(vector) => Some(VectorBucketsFeature {
                enabled: true,
                max_buckets: to_remote_i64(vector.max_buckets),
                max_indexes: to_remote_i64(vector.max_indexes),
            }),
            _ => None,
        };

        UpdateStorageConfigBody {
            file_size_limit: self
                .file_size_limit
                .map(|size| i64::try_from(size.bytes()).unwrap_or(i64::MAX)),
            features: StorageFeatures {
                image_transformation: toggle_body(&self.image_transformation),
                s3_protocol: toggle_body(&self.s3_protocol),
                iceberg_catalog,
                vector_buckets,
            },
        }
    }
}

/// Fold a remote on/off feature into a managed local toggle. A feature the
/// platform does not report counts as off.
fn merge_toggle<T: Gated>(local: &mut Gate<T>, remote: Option<FeatureToggle>) {
    if local.is_managed() {
        local.set_enabled(remote.is_some_and(|f| f.enabled));
    }
}

fn toggle_body<T: Gated>(local: &Gate<T>) -> Option<FeatureToggle> {
    local.is_managed().then(|| FeatureToggle {
        enabled: local.is_enabled(),
    })
}
