//! Reconciliation engine
//!
//! The engine compares a [`LocalConfig`] against the platform one section
//! at a time. A run is sequential and stops at the first error:
//!
//! 1. skip sections the file leaves unmanaged (nothing is fetched for them)
//! 2. fetch the section's remote state
//! 3. diff it against the local record
//! 4. on push, write the section only when the diff is non-empty

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde_json::Value;
use tracing::{debug, info};

use hostctl_api::{
    ManagementClient, NetworkRestrictionsResponse, SslEnforcementResponse, SslEnforcements,
    Transport, UpdateNetworkRestrictionsBody, UpdateSslEnforcementBody,
};
use hostctl_config::{
    Gate, LocalConfig, NetworkRestrictions, Pooler, PostgresSettings, SslEnforcement, Storage,
};

use crate::adapter::RemoteAdapter;
use crate::overrides::OverrideSet;
use crate::report::{DriftReport, PushOptions, PushReport};
use crate::{Error, Result};

/// Options for [`ReconcileEngine::update_postgres_overrides`]
#[derive(Debug, Clone, Default)]
pub struct OverrideOptions {
    /// Send only the given overrides instead of layering them over the
    /// current ones
    pub replace_existing: bool,
    /// Ask the platform not to restart Postgres
    pub no_restart: bool,
}

/// A reconcilable section together with its endpoints
trait Section: RemoteAdapter {
    fn fetch<T: Transport>(client: &ManagementClient<T>) -> hostctl_api::Result<Self::Remote>;
    fn apply<T: Transport>(client: &ManagementClient<T>, body: &Self::Body)
    -> hostctl_api::Result<()>;
}

impl Section for PostgresSettings {
    fn fetch<T: Transport>(client: &ManagementClient<T>) -> hostctl_api::Result<Self::Remote> {
        client.get_postgres_config()
    }

    fn apply<T: Transport>(
        client: &ManagementClient<T>,
        body: &Self::Body,
    ) -> hostctl_api::Result<()> {
        client.update_postgres_config(body).map(drop)
    }
}

impl Section for Gate<Pooler> {
    fn fetch<T: Transport>(client: &ManagementClient<T>) -> hostctl_api::Result<Self::Remote> {
        client.get_pooler_config()
    }

    fn apply<T: Transport>(
        client: &ManagementClient<T>,
        body: &Self::Body,
    ) -> hostctl_api::Result<()> {
        client.update_pooler_config(body).map(drop)
    }
}

impl Section for Gate<NetworkRestrictions> {
    fn fetch<T: Transport>(client: &ManagementClient<T>) -> hostctl_api::Result<Self::Remote> {
        client.get_network_restrictions()
    }

    fn apply<T: Transport>(
        client: &ManagementClient<T>,
        body: &Self::Body,
    ) -> hostctl_api::Result<()> {
        client.update_network_restrictions(body).map(drop)
    }
}

impl Section for Gate<SslEnforcement> {
    fn fetch<T: Transport>(client: &ManagementClient<T>) -> hostctl_api::Result<Self::Remote> {
        client.get_ssl_enforcement()
    }

    fn apply<T: Transport>(
        client: &ManagementClient<T>,
        body: &Self::Body,
    ) -> hostctl_api::Result<()> {
        client.update_ssl_enforcement(body).map(drop)
    }
}

impl Section for Storage {
    fn fetch<T: Transport>(client: &ManagementClient<T>) -> hostctl_api::Result<Self::Remote> {
        client.get_storage_config()
    }

    fn apply<T: Transport>(
        client: &ManagementClient<T>,
        body: &Self::Body,
    ) -> hostctl_api::Result<()> {
        client.update_storage_config(body)
    }
}

/// Engine for reconciling local configuration with one project
pub struct ReconcileEngine<T: Transport> {
    client: ManagementClient<T>,
}

impl<T: Transport> ReconcileEngine<T> {
    pub fn new(client: ManagementClient<T>) -> Self {
        Self { client }
    }

    /// Compare every managed section with the platform
    ///
    /// # Errors
    ///
    /// Returns the first API or serialization error; sections after it are
    /// not compared.
    pub fn diff(&self, local: &LocalConfig) -> Result<DriftReport> {
        let mut report = DriftReport::in_sync();
        self.diff_section(&local.db.settings, &mut report)?;
        self.diff_section(&local.db.pooler, &mut report)?;
        self.diff_section(&local.db.network_restrictions, &mut report)?;
        self.diff_section(&local.db.ssl_enforcement, &mut report)?;
        self.diff_section(&local.storage, &mut report)?;
        Ok(report)
    }

    /// Write every drifted managed section to the platform
    ///
    /// Sections whose diff is empty are not written. With
    /// [`PushOptions::dry_run`] nothing is written at all.
    pub fn push(&self, local: &LocalConfig, options: &PushOptions) -> Result<PushReport> {
        let mut report = PushReport::new(options.dry_run);
        self.push_section(&local.db.settings, options, &mut report)?;
        self.push_section(&local.db.pooler, options, &mut report)?;
        self.push_section(&local.db.network_restrictions, options, &mut report)?;
        self.push_section(&local.db.ssl_enforcement, options, &mut report)?;
        self.push_section(&local.storage, options, &mut report)?;
        Ok(report)
    }

    /// Refresh the values `local` declares from the platform
    ///
    /// Unmanaged sections and unset fields are returned exactly as written.
    pub fn pull(&self, local: &LocalConfig) -> Result<LocalConfig> {
        let mut pulled = local.clone();
        self.pull_section(&mut pulled.db.settings)?;
        self.pull_section(&mut pulled.db.pooler)?;
        self.pull_section(&mut pulled.db.network_restrictions)?;
        self.pull_section(&mut pulled.db.ssl_enforcement)?;
        self.pull_section(&mut pulled.storage)?;
        Ok(pulled)
    }

    fn diff_section<S: Section>(&self, local: &S, report: &mut DriftReport) -> Result<()> {
        if !local.is_managed() {
            debug!(section = S::SECTION, "Skipping unmanaged section");
            report.skip(S::SECTION);
            return Ok(());
        }
        let remote = S::fetch(&self.client)?;
        report.record(local.section_diff(&remote)?);
        Ok(())
    }

    fn push_section<S: Section>(
        &self,
        local: &S,
        options: &PushOptions,
        report: &mut PushReport,
    ) -> Result<()> {
        if !local.is_managed() {
            debug!(section = S::SECTION, "Skipping unmanaged section");
            report.drift.skip(S::SECTION);
            return Ok(());
        }

        let remote = S::fetch(&self.client)?;
        let diff = local.section_diff(&remote)?;
        let drifted = diff.has_drift();
        report.drift.record(diff);

        if !drifted {
            debug!(section = S::SECTION, "Remote config is up to date");
            return Ok(());
        }

        if options.dry_run {
            debug!(section = S::SECTION, "Dry run, not writing");
        } else {
            S::apply(&self.client, &local.to_remote_body())?;
            info!(section = S::SECTION, "Updated remote config");
        }
        report.record_update(S::SECTION);
        Ok(())
    }

    fn pull_section<S: Section>(&self, local: &mut S) -> Result<()> {
        if !local.is_managed() {
            debug!(section = S::SECTION, "Skipping unmanaged section");
            return Ok(());
        }
        let remote = S::fetch(&self.client)?;
        local.from_remote(&remote);
        Ok(())
    }

    /// Current Postgres overrides, including keys hostctl does not model
    pub fn get_postgres_overrides(&self) -> Result<BTreeMap<String, Value>> {
        Ok(self.client.get_postgres_config_raw()?)
    }

    /// Apply `key=value` overrides to Postgres
    ///
    /// All pairs are validated before any request is made. Unless
    /// [`OverrideOptions::replace_existing`] is set, the current overrides
    /// are fetched first and the new ones layered on top.
    pub fn update_postgres_overrides<I, S>(
        &self,
        pairs: I,
        options: &OverrideOptions,
    ) -> Result<BTreeMap<String, Value>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = OverrideSet::parse(pairs)?;
        if !options.replace_existing {
            let baseline = OverrideSet::from_remote(self.client.get_postgres_config_raw()?);
            overrides = overrides.with_baseline(baseline);
        }
        if options.no_restart {
            overrides = overrides.with_no_restart();
        }

        let body = overrides.finalize();
        debug!(keys = body.len(), "Updating Postgres overrides");
        let updated = self.client.update_postgres_config_raw(&body)?;
        info!("Updated Postgres config overrides");
        Ok(updated)
    }

    /// Remove overrides by key and write the rest back
    pub fn delete_postgres_overrides<S: AsRef<str>>(
        &self,
        keys: &[S],
        no_restart: bool,
    ) -> Result<BTreeMap<String, Value>> {
        let mut remaining =
            OverrideSet::from_remote(self.client.get_postgres_config_raw()?).without(keys);
        if no_restart {
            remaining = remaining.with_no_restart();
        }

        let updated = self
            .client
            .delete_postgres_config_raw(&remaining.into_json())?;
        info!("Deleted Postgres config overrides");
        Ok(updated)
    }

    pub fn get_ssl_enforcement(&self) -> Result<SslEnforcementResponse> {
        Ok(self.client.get_ssl_enforcement()?)
    }

    pub fn update_ssl_enforcement(&self, enforce_db_ssl: bool) -> Result<SslEnforcementResponse> {
        let body = UpdateSslEnforcementBody {
            requested_config: SslEnforcements {
                database: enforce_db_ssl,
            },
        };
        let response = self.client.update_ssl_enforcement(&body)?;
        info!(enforce_db_ssl, "Updated SSL enforcement");
        Ok(response)
    }

    pub fn get_network_restrictions(&self) -> Result<NetworkRestrictionsResponse> {
        Ok(self.client.get_network_restrictions()?)
    }

    /// Replace the database CIDR allow lists
    ///
    /// Entries are validated and split into IPv4 and IPv6 lists before
    /// anything is sent.
    pub fn update_network_restrictions<S: AsRef<str>>(
        &self,
        cidrs: &[S],
    ) -> Result<NetworkRestrictionsResponse> {
        let mut body = UpdateNetworkRestrictionsBody::default();
        for cidr in cidrs {
            let cidr = cidr.as_ref().trim();
            match parse_cidr(cidr)? {
                IpAddr::V4(_) => body.db_allowed_cidrs.push(cidr.to_string()),
                IpAddr::V6(_) => body.db_allowed_cidrs_v6.push(cidr.to_string()),
            }
        }

        let response = self.client.update_network_restrictions(&body)?;
        info!(
            v4 = body.db_allowed_cidrs.len(),
            v6 = body.db_allowed_cidrs_v6.len(),
            "Updated network restrictions"
        );
        Ok(response)
    }
}

/// Human-readable SSL enforcement status
pub fn ssl_status_message(response: &SslEnforcementResponse) -> &'static str {
    if response.is_enforced() {
        "SSL is being enforced."
    } else {
        "SSL is *NOT* being enforced."
    }
}

/// Validate `address/prefix` and return the address
fn parse_cidr(cidr: &str) -> Result<IpAddr> {
    let invalid = || Error::InvalidCidr {
        cidr: cidr.to_string(),
    };
    let (address, prefix) = cidr.split_once('/').ok_or_else(invalid)?;
    let address: IpAddr = address.parse().map_err(|_| invalid())?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    let max_prefix = if address.is_ipv4() { 32 } else { 128 };
    if prefix > max_prefix {
        return Err(invalid());
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::v4("10.0.0.0/8", true)]
    #[case::v6("2001:db8::/32", true)]
    #[case::any_v4("0.0.0.0/0", true)]
    #[case::missing_prefix("10.0.0.0", false)]
    #[case::prefix_too_long("10.0.0.0/33", false)]
    #[case::v6_prefix_too_long("::/129", false)]
    #[case::garbage("not-a-cidr/8", false)]
    fn test_parse_cidr(#[case] cidr: &str, #[case] valid: bool) {
        assert_eq!(parse_cidr(cidr).is_ok(), valid);
    }

    #[test]
    fn test_ssl_status_message() {
        let mut response = SslEnforcementResponse {
            current_config: SslEnforcements { database: true },
            applied_successfully: true,
        };
        assert_eq!(ssl_status_message(&response), "SSL is being enforced.");

        response.applied_successfully = false;
        assert_eq!(ssl_status_message(&response), "SSL is *NOT* being enforced.");
    }
}
