//! The seam between reconciliation and the remote policy service.

use std::fmt::Display;

use anyhow::Result;
use async_trait::async_trait;

use crate::PolicyDefinition;

/// A policy as the remote service knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePolicy {
    /// Identifier assigned by the service
    pub id: i64,
    /// Policy name
    pub name: String,
}

impl Display for RemotePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id {})", self.name, self.id)
    }
}

/// The operations reconciliation needs from a policy service. Calls are
/// made one at a time and awaited before the next one starts.
#[async_trait]
pub trait PolicyService {
    /// Create a policy, returning the name and id the service assigned.
    async fn create_policy(&self, policy: &PolicyDefinition) -> Result<RemotePolicy>;
    /// List every policy currently attached to `service_name`.
    async fn list_policies(&self, service_name: &str) -> Result<Vec<RemotePolicy>>;
    /// Delete the policy with the given id.
    async fn delete_policy(&self, id: i64) -> Result<()>;
}
