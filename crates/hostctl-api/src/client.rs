//! Typed access to the management API endpoints

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::transport::{Method, Request, Transport};
use crate::types::{
    NetworkRestrictionsResponse, PoolerConfigResponse, PostgresConfigResponse,
    SslEnforcementResponse, StorageConfigResponse, UpdateNetworkRestrictionsBody,
    UpdatePoolerConfigBody, UpdatePostgresConfigBody, UpdateSslEnforcementBody,
    UpdateStorageConfigBody,
};
use crate::{Error, Result};

/// Operation names used in error messages
pub mod operation {
    pub const GET_POSTGRES_CONFIG: &str = "retrieve Postgres config";
    pub const UPDATE_POSTGRES_CONFIG: &str = "update Postgres config";
    pub const DELETE_POSTGRES_CONFIG: &str = "delete Postgres config overrides";
    pub const GET_POOLER_CONFIG: &str = "retrieve pooler config";
    pub const UPDATE_POOLER_CONFIG: &str = "update pooler config";
    pub const GET_NETWORK_RESTRICTIONS: &str = "retrieve network restrictions";
    pub const UPDATE_NETWORK_RESTRICTIONS: &str = "update network restrictions";
    pub const GET_SSL_ENFORCEMENT: &str = "retrieve SSL enforcement";
    pub const UPDATE_SSL_ENFORCEMENT: &str = "update SSL enforcement";
    pub const GET_STORAGE_CONFIG: &str = "retrieve storage config";
    pub const UPDATE_STORAGE_CONFIG: &str = "update storage config";
}

/// Client for one project's configuration endpoints
pub struct ManagementClient<T: Transport> {
    transport: T,
    project_ref: String,
}

impl<T: Transport> ManagementClient<T> {
    pub fn new(transport: T, project_ref: impl Into<String>) -> Self {
        Self {
            transport,
            project_ref: project_ref.into(),
        }
    }

    pub fn project_ref(&self) -> &str {
        &self.project_ref
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn path(&self, suffix: &str) -> String {
        format!("/v1/projects/{}/{}", self.project_ref, suffix)
    }

    /// Send `request` and decode the body when the status is `expected`
    fn exchange<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: Request,
        expected: u16,
    ) -> Result<R> {
        let response = self.transport.send(operation, &request)?;
        if response.status != expected {
            return Err(Error::UnexpectedStatus {
                operation,
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|source| Error::Decode { operation, source })
    }

    fn fetch<R: DeserializeOwned>(&self, operation: &'static str, suffix: &str) -> Result<R> {
        debug!(operation, project = %self.project_ref, "Fetching remote state");
        self.exchange(operation, Request::get(self.path(suffix)), 200)
    }

    fn write<B: Serialize, R: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        suffix: &str,
        body: &B,
        expected: u16,
    ) -> Result<R> {
        let body = serde_json::to_value(body)?;
        debug!(operation, project = %self.project_ref, %body, "Writing remote state");
        self.exchange(operation, Request::with_body(method, self.path(suffix), body), expected)
    }

    pub fn get_postgres_config(&self) -> Result<PostgresConfigResponse> {
        self.fetch(operation::GET_POSTGRES_CONFIG, "config/database/postgres")
    }

    /// Raw Postgres overrides as a JSON map, keeping keys this client does
    /// not model
    pub fn get_postgres_config_raw(&self) -> Result<BTreeMap<String, Value>> {
        self.fetch(operation::GET_POSTGRES_CONFIG, "config/database/postgres")
    }

    pub fn update_postgres_config(
        &self,
        body: &UpdatePostgresConfigBody,
    ) -> Result<PostgresConfigResponse> {
        self.write(
            operation::UPDATE_POSTGRES_CONFIG,
            Method::Put,
            "config/database/postgres",
            body,
            200,
        )
    }

    /// Write Postgres overrides from an arbitrary JSON map
    pub fn update_postgres_config_raw(
        &self,
        body: &BTreeMap<String, Value>,
    ) -> Result<BTreeMap<String, Value>> {
        self.put_postgres_raw(operation::UPDATE_POSTGRES_CONFIG, body)
    }

    /// Write back a fetched override map with some keys removed
    pub fn delete_postgres_config_raw(
        &self,
        body: &BTreeMap<String, Value>,
    ) -> Result<BTreeMap<String, Value>> {
        self.put_postgres_raw(operation::DELETE_POSTGRES_CONFIG, body)
    }

    fn put_postgres_raw(
        &self,
        operation: &'static str,
        body: &BTreeMap<String, Value>,
    ) -> Result<BTreeMap<String, Value>> {
        self.write(operation, Method::Put, "config/database/postgres", body, 200)
    }

    pub fn get_pooler_config(&self) -> Result<PoolerConfigResponse> {
        self.fetch(operation::GET_POOLER_CONFIG, "config/database/pooler")
    }

    pub fn update_pooler_config(
        &self,
        body: &UpdatePoolerConfigBody,
    ) -> Result<PoolerConfigResponse> {
        self.write(
            operation::UPDATE_POOLER_CONFIG,
            Method::Patch,
            "config/database/pooler",
            body,
            200,
        )
    }

    pub fn get_network_restrictions(&self) -> Result<NetworkRestrictionsResponse> {
        self.fetch(operation::GET_NETWORK_RESTRICTIONS, "network-restrictions")
    }

    pub fn update_network_restrictions(
        &self,
        body: &UpdateNetworkRestrictionsBody,
    ) -> Result<NetworkRestrictionsResponse> {
        self.write(
            operation::UPDATE_NETWORK_RESTRICTIONS,
            Method::Post,
            "network-restrictions/apply",
            body,
            201,
        )
    }

    pub fn get_ssl_enforcement(&self) -> Result<SslEnforcementResponse> {
        self.fetch(operation::GET_SSL_ENFORCEMENT, "ssl-enforcement")
    }

    pub fn update_ssl_enforcement(
        &self,
        body: &UpdateSslEnforcementBody,
    ) -> Result<SslEnforcementResponse> {
        self.write(
            operation::UPDATE_SSL_ENFORCEMENT,
            Method::Put,
            "ssl-enforcement",
            body,
            200,
        )
    }

    pub fn get_storage_config(&self) -> Result<StorageConfigResponse> {
        self.fetch(operation::GET_STORAGE_CONFIG, "config/storage")
    }

    /// The storage endpoint answers an update with an empty body
    pub fn update_storage_config(&self, body: &UpdateStorageConfigBody) -> Result<()> {
        let body = serde_json::to_value(body)?;
        debug!(project = %self.project_ref, %body, "Writing storage config");
        let request = Request::with_body(Method::Patch, self.path("config/storage"), body);
        let response = self.transport.send(operation::UPDATE_STORAGE_CONFIG, &request)?;
        if response.status != 200 {
            return Err(Error::UnexpectedStatus {
                operation: operation::UPDATE_STORAGE_CONFIG,
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }
}
