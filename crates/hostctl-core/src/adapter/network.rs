use hostctl_api::{NetworkRestrictionsResponse, UpdateNetworkRestrictionsBody};
use hostctl_config::{Gate, NetworkRestrictions};

use super::RemoteAdapter;

impl RemoteAdapter for Gate<NetworkRestrictions> {
    type Remote = NetworkRestrictionsResponse;
    type Body = UpdateNetworkRestrictionsBody;

    fn is_managed(&self) -> bool {
        Gate::is_managed(self)
    }

    fn from_remote(&mut self, remote: &NetworkRestrictionsResponse) {
        if let Some(restrictions) = self.managed_mut() {
            restrictions.allowed_cidrs = remote.config.db_allowed_cidrs.clone();
            restrictions.allowed_cidrs_v6 = remote.config.db_allowed_cidrs_v6.clone();
        }
    }

    fn to_remote_body(&self) -> UpdateNetworkRestrictionsBody {
        match self.managed() {
            Some(restrictions) => UpdateNetworkRestrictionsBody {
                db_allowed_cidrs: restrictions.allowed_cidrs.clone(),
                db_allowed_cidrs_v6: restrictions.allowed_cidrs_v6.clone(),
            },
            None => UpdateNetworkRestrictionsBody::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostctl_api::NetworkRestrictionsConfig;

    fn remote() -> NetworkRestrictionsResponse {
        NetworkRestrictionsResponse {
            config: NetworkRestrictionsConfig {
                db_allowed_cidrs: vec!["0.0.0.0/0".into()],
                db_allowed_cidrs_v6: vec!["::/0".into()],
            },
            status: Some("applied".into()),
        }
    }

    #[test]
    fn test_enabled_restrictions_diff_lists() {
        let gate = Gate::Enabled(NetworkRestrictions {
            allowed_cidrs: vec!["10.0.0.0/8".into()],
            allowed_cidrs_v6: vec!["::/0".into()],
        });

        let diff = gate.diff_with_remote(&remote()).unwrap();

        assert!(diff.contains("-allowed_cidrs = [\"0.0.0.0/0\"]"), "{}", diff);
        assert!(diff.contains("+allowed_cidrs = [\"10.0.0.0/8\"]"), "{}", diff);
        assert!(diff.contains(" allowed_cidrs_v6 = [\"::/0\"]"), "{}", diff);
        assert!(!diff.contains("-allowed_cidrs_v6"), "{}", diff);
    }

    #[test]
    fn test_unmanaged_restrictions_are_ignored() {
        let gate = Gate::<NetworkRestrictions>::Unmanaged;
        assert_eq!(gate.diff_with_remote(&remote()).unwrap(), "");

        let disabled = Gate::Disabled(NetworkRestrictions::default());
        assert_eq!(disabled.diff_with_remote(&remote()).unwrap(), "");
    }

    #[test]
    fn test_body_sends_both_families() {
        let gate = Gate::Enabled(NetworkRestrictions {
            allowed_cidrs: vec!["10.0.0.0/8".into()],
            allowed_cidrs_v6: vec![],
        });
        let body = gate.to_remote_body();
        assert_eq!(body.db_allowed_cidrs, vec!["10.0.0.0/8"]);
        assert!(body.db_allowed_cidrs_v6.is_empty());
    }

    #[test]
    fn test_pushed_body_reads_back_in_sync() {
        let gate = Gate::Enabled(NetworkRestrictions {
            allowed_cidrs: vec!["10.0.0.0/8".into(), "192.168.0.0/16".into()],
            allowed_cidrs_v6: vec!["2001:db8::/32".into()],
        });

        let remote: NetworkRestrictionsResponse =
            crate::adapter::echo_remote(&gate.to_remote_body(), |body| {
                serde_json::json!({ "config": body })
            });

        assert_eq!(gate.diff_with_remote(&remote).unwrap(), "");
    }
}
