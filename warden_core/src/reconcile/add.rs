//! Creating configured policies

use crate::{
    logging::{error, info},
    PolicyDefinition, PolicyService, WardenConfig, WardenError,
};

use super::RunSummary;

/// Assemble every configured policy of every component, in configuration
/// order. Every entry is checked; if any of them fail the whole set of
/// failures is returned so they can all be fixed at once.
pub fn plan_additions(config: &WardenConfig) -> Result<Vec<PolicyDefinition>, WardenError> {
    let mut definitions = Vec::new();
    let mut errors = Vec::new();

    for component in &config.components {
        for (name, spec) in &component.policies {
            match PolicyDefinition::from_spec(name, &component.name, spec) {
                Ok(def) => definitions.push(def),
                Err(e) => {
                    let e = WardenError::InvalidPolicy {
                        component: component.name.to_owned(),
                        policy: name.to_owned(),
                        source: Box::new(e),
                    };
                    error!("{e}");
                    errors.push(e);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(definitions)
    } else {
        Err(WardenError::InvalidPolicies(errors))
    }
}

/// Submit each definition in turn. A failed submission is recorded and the
/// next definition is still submitted.
pub async fn apply_additions<S>(
    service: &S,
    definitions: &[PolicyDefinition],
    summary: &mut RunSummary,
) where
    S: PolicyService + Sync + ?Sized,
{
    for def in definitions {
        match service.create_policy(def).await {
            Ok(created) => {
                info!("[{}] created policy {created}", def.service_name);
                summary.created.push(created);
            }
            Err(source) => summary.record_failure(WardenError::RemoteSubmission {
                service: def.service_name.to_owned(),
                policy: def.name.to_owned(),
                source,
            }),
        }
    }
}
