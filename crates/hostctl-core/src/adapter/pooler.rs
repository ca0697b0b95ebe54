use hostctl_api::{PoolerConfigResponse, UpdatePoolerConfigBody};
use hostctl_config::{Gate, PoolMode, Pooler};

use super::{RemoteAdapter, merge_field, to_local_count, to_remote_i32};

impl RemoteAdapter for Gate<Pooler> {
    type Remote = PoolerConfigResponse;
    type Body = UpdatePoolerConfigBody;

    fn is_managed(&self) -> bool {
        Gate::is_managed(self)
    }

    fn from_remote(&mut self, remote: &PoolerConfigResponse) {
        let Some(pooler) = self.managed_mut() else {
            return;
        };
        merge_field(
            &mut pooler.pool_mode,
            remote
                .pool_mode
                .as_deref()
                .and_then(|mode| mode.parse::<PoolMode>().ok()),
        );
        merge_field(
            &mut pooler.default_pool_size,
            to_local_count(remote.default_pool_size),
        );
        merge_field(&mut pooler.max_client_conn, to_local_count(remote.max_client_conn));
    }

    fn to_remote_body(&self) -> UpdatePoolerConfigBody {
        match self.managed() {
            Some(pooler) => UpdatePoolerConfigBody {
                pool_mode: pooler.pool_mode.map(String::from),
                default_pool_size: to_remote_i32(pooler.default_pool_size),
                max_client_conn: to_remote_i32(pooler.max_client_conn),
            },
            None => UpdatePoolerConfigBody::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> PoolerConfigResponse {
        PoolerConfigResponse {
            pool_mode: Some("session".into()),
            default_pool_size: Some(15),
            max_client_conn: Some(200),
        }
    }

    fn local() -> Pooler {
        Pooler {
            pool_mode: Some(PoolMode::Transaction),
            default_pool_size: Some(20),
            max_client_conn: None,
        }
    }

    #[test]
    fn test_disabled_pooler_never_drifts() {
        let gate = Gate::Disabled(local());
        assert_eq!(gate.diff_with_remote(&remote()).unwrap(), "");
        assert_eq!(gate.to_remote_body(), UpdatePoolerConfigBody::default());
    }

    #[test]
    fn test_disabled_pooler_is_left_as_written() {
        let mut gate = Gate::Disabled(local());
        gate.from_remote(&remote());
        assert_eq!(gate, Gate::Disabled(local()));
    }

    #[test]
    fn test_enabled_pooler_diff() {
        let gate = Gate::Enabled(local());
        let diff = gate.diff_with_remote(&remote()).unwrap();

        assert!(diff.contains("--- remote[db.pooler]"), "{}", diff);
        assert!(diff.contains("-pool_mode = \"session\""), "{}", diff);
        assert!(diff.contains("+pool_mode = \"transaction\""), "{}", diff);
        assert!(diff.contains("-default_pool_size = 15"), "{}", diff);
        assert!(!diff.contains("max_client_conn"), "{}", diff);
    }

    #[test]
    fn test_enabled_pooler_body_narrows_counts() {
        let body = Gate::Enabled(local()).to_remote_body();
        assert_eq!(body.pool_mode.as_deref(), Some("transaction"));
        assert_eq!(body.default_pool_size, Some(20));
        assert_eq!(body.max_client_conn, None);
    }

    #[test]
    fn test_pushed_body_reads_back_in_sync() {
        let gate = Gate::Enabled(Pooler {
            pool_mode: Some(PoolMode::Session),
            default_pool_size: Some(20),
            max_client_conn: Some(100),
        });

        let remote: PoolerConfigResponse =
            crate::adapter::echo_remote(&gate.to_remote_body(), |body| body);

        assert_eq!(gate.diff_with_remote(&remote).unwrap(), "");
    }
}
