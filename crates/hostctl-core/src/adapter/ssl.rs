use hostctl_api::{SslEnforcementResponse, SslEnforcements, UpdateSslEnforcementBody};
use hostctl_config::{Gate, SslEnforcement};

use super::RemoteAdapter;

impl RemoteAdapter for Gate<SslEnforcement> {
    type Remote = SslEnforcementResponse;
    type Body = UpdateSslEnforcementBody;

    fn is_managed(&self) -> bool {
        Gate::is_managed(self)
    }

    fn from_remote(&mut self, remote: &SslEnforcementResponse) {
        if Gate::is_managed(self) {
            self.set_enabled(remote.current_config.database);
        }
    }

    fn to_remote_body(&self) -> UpdateSslEnforcementBody {
        UpdateSslEnforcementBody {
            requested_config: SslEnforcements {
                database: self.is_enabled(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(database: bool) -> SslEnforcementResponse {
        SslEnforcementResponse {
            current_config: SslEnforcements { database },
            applied_successfully: true,
        }
    }

    #[test]
    fn test_disabled_section_is_still_managed() {
        let gate = Gate::Disabled(SslEnforcement {});
        let diff = gate.diff_with_remote(&remote(true)).unwrap();
        assert!(diff.contains("-enabled = true"), "{}", diff);
        assert!(diff.contains("+enabled = false"), "{}", diff);
        assert!(!gate.to_remote_body().requested_config.database);
    }

    #[test]
    fn test_matching_flag_does_not_drift() {
        let gate = Gate::Enabled(SslEnforcement {});
        assert_eq!(gate.diff_with_remote(&remote(true)).unwrap(), "");
    }

    #[test]
    fn test_absent_section_is_not_touched() {
        let mut gate = Gate::<SslEnforcement>::Unmanaged;
        gate.from_remote(&remote(true));
        assert!(gate.is_unmanaged());
        assert_eq!(gate.diff_with_remote(&remote(true)).unwrap(), "");
    }

    #[test]
    fn test_pushed_body_reads_back_in_sync() {
        for gate in [
            Gate::Enabled(SslEnforcement {}),
            Gate::Disabled(SslEnforcement {}),
        ] {
            let remote: SslEnforcementResponse =
                crate::adapter::echo_remote(&gate.to_remote_body(), |body| {
                    serde_json::json!({
                        "currentConfig": body["requestedConfig"].clone(),
                        "appliedSuccessfully": true
                    })
                });

            assert_eq!(gate.diff_with_remote(&remote).unwrap(), "", "{:?}", gate);
        }
    }
}
