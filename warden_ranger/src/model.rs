//! Ranger's JSON representation of policies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use warden_core::{PolicyDefinition, RemotePolicy};

/// A policy as sent to `POST /service/public/v2/api/policy`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RangerPolicy {
    pub(crate) service: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) is_enabled: bool,
    pub(crate) is_audit_enabled: bool,
    pub(crate) resources: IndexMap<String, RangerPolicyResource>,
    pub(crate) policy_items: Vec<RangerPolicyItem>,
    pub(crate) deny_policy_items: Vec<RangerPolicyItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RangerPolicyResource {
    pub(crate) values: Vec<String>,
    pub(crate) is_exclude: bool,
    pub(crate) is_recursive: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RangerPolicyItem {
    pub(crate) users: Vec<String>,
    pub(crate) accesses: Vec<RangerPolicyItemAccess>,
    pub(crate) delegate_admin: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RangerPolicyItemAccess {
    #[serde(rename = "type")]
    pub(crate) access_type: String,
    pub(crate) is_allowed: bool,
}

/// The fields we read back from create and list responses.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct RangerPolicySummary {
    id: i64,
    name: String,
}

impl From<RangerPolicySummary> for RemotePolicy {
    fn from(p: RangerPolicySummary) -> Self {
        RemotePolicy {
            id: p.id,
            name: p.name,
        }
    }
}

impl From<&PolicyDefinition> for RangerPolicy {
    fn from(def: &PolicyDefinition) -> Self {
        RangerPolicy {
            service: def.service_name.to_owned(),
            name: def.name.to_owned(),
            description: format!("{} (managed by warden)", def.name),
            is_enabled: true,
            is_audit_enabled: true,
            resources: def
                .resources
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_owned(),
                        RangerPolicyResource {
                            values: vec![v.to_owned()],
                            is_exclude: false,
                            is_recursive: false,
                        },
                    )
                })
                .collect(),
            policy_items: def
                .clauses
                .iter()
                .filter_map(|c| policy_item(&c.allowed_users, &c.allowed_access))
                .collect(),
            deny_policy_items: def
                .clauses
                .iter()
                .filter_map(|c| policy_item(&c.denied_users, &c.denied_access))
                .collect(),
        }
    }
}

/// A side of a clause with neither users nor access types produces no item.
fn policy_item(users: &[String], accesses: &[String]) -> Option<RangerPolicyItem> {
    if users.is_empty() && accesses.is_empty() {
        return None;
    }
    Some(RangerPolicyItem {
        users: users.to_vec(),
        accesses: accesses
            .iter()
            .map(|a| RangerPolicyItemAccess {
                access_type: a.to_owned(),
                is_allowed: true,
            })
            .collect(),
        delegate_admin: false,
    })
}
