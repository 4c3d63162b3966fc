//! Deleting remote policies that are no longer configured

use std::collections::HashSet;

use crate::{
    config::ComponentConfig,
    logging::{debug, info, warn},
    PolicyService, RemotePolicy, WardenError,
};

use super::RunSummary;

/// Names are matched trimmed and lowercased on both sides.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The remote policies whose names are absent from `configured`, in remote
/// order.
pub fn deletion_candidates<'a>(
    remote: &[RemotePolicy],
    configured: impl IntoIterator<Item = &'a str>,
) -> Vec<RemotePolicy> {
    let configured = configured
        .into_iter()
        .map(normalize)
        .collect::<HashSet<_>>();

    remote
        .iter()
        .filter(|p| !configured.contains(&normalize(&p.name)))
        .cloned()
        .collect()
}

/// Fetch the component's remote policies and work out which ones to delete.
/// The remote list is fetched fresh every time since the configuration never
/// holds remote ids.
pub async fn plan_deletions<S>(
    service: &S,
    component: &ComponentConfig,
) -> Result<Vec<RemotePolicy>, WardenError>
where
    S: PolicyService + Sync + ?Sized,
{
    let remote = service
        .list_policies(&component.name)
        .await
        .map_err(|source| WardenError::RemoteList {
            service: component.name.to_owned(),
            source,
        })?;

    if remote.is_empty() {
        warn!(
            "[{}] the service reports no existing policies; nothing to delete",
            component.name
        );
        return Ok(vec![]);
    }

    let candidates = deletion_candidates(&remote, component.policy_names());
    debug!(
        "[{}] {} remote policies, {} not in configuration",
        component.name,
        remote.len(),
        candidates.len()
    );
    if candidates.is_empty() {
        info!("[{}] remote policies match the configuration", component.name);
    }
    Ok(candidates)
}

/// Delete each candidate by id. A failed deletion is recorded and the rest
/// are still attempted.
pub async fn apply_deletions<S>(
    service: &S,
    service_name: &str,
    candidates: &[RemotePolicy],
    summary: &mut RunSummary,
) where
    S: PolicyService + Sync + ?Sized,
{
    for policy in candidates {
        match service.delete_policy(policy.id).await {
            Ok(()) => {
                info!("[{service_name}] deleted policy {policy}");
                summary.deleted.push(policy.to_owned());
            }
            Err(source) => summary.record_failure(WardenError::RemoteDeletion {
                service: service_name.to_owned(),
                policy: policy.name.to_owned(),
                id: policy.id,
                source,
            }),
        }
    }
}
