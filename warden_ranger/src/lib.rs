//! Ranger Connector
//!
//! Everything needed to manage policies through Apache Ranger's public v2
//! REST API.
//!
//! ```no_run
//! use warden_core::WardenConfig;
//! use warden_ranger::RangerService;
//!
//! let config = WardenConfig::read_from_file("policies.ini").unwrap();
//! let ranger = RangerService::new(&config.auth).unwrap();
//! ```

#![deny(missing_docs)]

mod consts;
mod creds;
mod model;
mod rest;

use anyhow::{Context, Result};
use async_trait::async_trait;
use warden_core::{config::AuthConfig, logging::debug, PolicyDefinition, PolicyService, RemotePolicy};

use creds::RangerCredentials;
use model::{RangerPolicy, RangerPolicySummary};
use rest::{RangerRestClient, RangerRestConfig};

/// The Ranger-backed policy service.
pub struct RangerService {
    rest_client: RangerRestClient,
}

impl RangerService {
    /// Validate the `[Auth]` settings and build the HTTP client. No request
    /// is made until the first operation.
    pub fn new(auth: &AuthConfig) -> Result<Self> {
        let rest_client = RangerRestClient::new(
            RangerCredentials::from(auth),
            RangerRestConfig {
                retry: auth.retry_transient,
                timeout: auth.request_timeout,
            },
        )?;
        Ok(Self { rest_client })
    }
}

#[async_trait]
impl PolicyService for RangerService {
    async fn create_policy(&self, policy: &PolicyDefinition) -> Result<RemotePolicy> {
        let body = RangerPolicy::from(policy);
        debug!("creating policy {}/{}", body.service, body.name);
        let created: RangerPolicySummary = self
            .rest_client
            .post(consts::POLICY_PATH, &body)
            .await
            .with_context(|| format!("creating policy {}", policy.name))?;
        Ok(created.into())
    }

    async fn list_policies(&self, service_name: &str) -> Result<Vec<RemotePolicy>> {
        let path = format!(
            "{}/{}/policy",
            consts::SERVICE_PATH,
            urlencoding::encode(service_name)
        );
        let policies: Option<Vec<RangerPolicySummary>> = self
            .rest_client
            .get(&path)
            .await
            .with_context(|| format!("listing policies for service {service_name}"))?;
        Ok(policies
            .unwrap_or_default()
            .into_iter()
            .map(RemotePolicy::from)
            .collect())
    }

    async fn delete_policy(&self, id: i64) -> Result<()> {
        self.rest_client
            .delete(&format!("{}/{id}", consts::POLICY_PATH))
            .await
            .with_context(|| format!("deleting policy with id {id}"))
    }
}
