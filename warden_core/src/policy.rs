//! Assembly of policy definitions from configured entries.
//!
//! Each entry's value is a JSON spec:
//!
//! ```text
//! {"resource": "database:finance, table:ledger", "policy": "alice|select|bob|update"}
//! {"resource": "database:finance", "policy": ["alice|select||", "carol|insert|dave|delete"]}
//! ```

mod clause;
mod resource;

pub use clause::PolicyClause;
pub use resource::ResourceDescriptor;

use serde::Deserialize;
use serde_json::Value;

use crate::WardenError;

/// The raw JSON spec stored under a policy name.
#[derive(Deserialize, Debug)]
struct PolicySpec {
    resource: String,
    policy: Value,
}

/// A policy ready to be submitted to, or compared against, the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDefinition {
    /// The configuration key
    pub name: String,
    /// The component/service the policy belongs to
    pub service_name: String,
    /// Scope of the policy
    pub resources: ResourceDescriptor,
    /// One clause for a scalar policy string, one per element for an array
    pub clauses: Vec<PolicyClause>,
}

impl PolicyDefinition {
    /// Build a definition from a configured key and its JSON spec.
    pub fn from_spec(name: &str, service_name: &str, spec: &str) -> Result<Self, WardenError> {
        let spec: PolicySpec = serde_json::from_str(spec)
            .map_err(|e| WardenError::MalformedSpec(e.to_string()))?;

        Ok(PolicyDefinition {
            name: name.to_owned(),
            service_name: service_name.to_owned(),
            resources: spec.resource.parse()?,
            clauses: clauses_from_value(&spec.policy)?,
        })
    }
}

/// The `policy` field is either a clause string or an array of them. The
/// array may also arrive JSON-encoded inside a string.
fn clauses_from_value(policy: &Value) -> Result<Vec<PolicyClause>, WardenError> {
    match policy {
        Value::Array(items) => clauses_from_array(items),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => clauses_from_array(&items),
            _ => Ok(vec![s.parse()?]),
        },
        other => Err(WardenError::MalformedSpec(format!(
            "`policy` must be a string or an array of strings, got {}",
            json_kind(other)
        ))),
    }
}

fn clauses_from_array(items: &[Value]) -> Result<Vec<PolicyClause>, WardenError> {
    if items.is_empty() {
        return Err(WardenError::MalformedSpec(
            "`policy` array has no clauses".to_owned(),
        ));
    }
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.parse::<PolicyClause>(),
            other => Err(WardenError::MalformedSpec(format!(
                "`policy` array elements must be strings, got {}",
                json_kind(other)
            ))),
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scalar_policy_yields_one_clause() {
        let def = PolicyDefinition::from_spec(
            "finance_read",
            "hive",
            r#"{"resource": "database:finance, table:ledger", "policy": "alice,bob|select,update|carol|select"}"#,
        )
        .unwrap();

        assert_eq!(def.name, "finance_read");
        assert_eq!(def.service_name, "hive");
        assert_eq!(def.resources.get("database"), Some("finance"));
        assert_eq!(def.resources.get("table"), Some("ledger"));
        assert_eq!(
            def.clauses,
            vec![PolicyClause {
                allowed_users: strings(&["alice", "bob"]),
                allowed_access: strings(&["select", "update"]),
                denied_users: strings(&["carol"]),
                denied_access: strings(&["select"]),
            }]
        );
    }

    #[test]
    fn array_policy_yields_parallel_clauses() {
        let def = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database:finance", "policy": ["alice|select|bob|update", "carol|insert|dave|delete"]}"#,
        )
        .unwrap();

        assert_eq!(def.clauses.len(), 2);
        assert_eq!(def.clauses[0].allowed_users, strings(&["alice"]));
        assert_eq!(def.clauses[0].allowed_access, strings(&["select"]));
        assert_eq!(def.clauses[0].denied_users, strings(&["bob"]));
        assert_eq!(def.clauses[0].denied_access, strings(&["update"]));
        assert_eq!(def.clauses[1].allowed_users, strings(&["carol"]));
        assert_eq!(def.clauses[1].allowed_access, strings(&["insert"]));
        assert_eq!(def.clauses[1].denied_users, strings(&["dave"]));
        assert_eq!(def.clauses[1].denied_access, strings(&["delete"]));
    }

    #[test]
    fn array_encoded_in_a_string_is_decoded() {
        let def = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database:finance", "policy": "[\"alice|select|bob|update\", \"carol|insert|dave|delete\"]"}"#,
        )
        .unwrap();
        assert_eq!(def.clauses.len(), 2);
        assert_eq!(def.clauses[1].denied_access, strings(&["delete"]));
    }

    #[test]
    fn scalar_and_single_element_array_are_equivalent() {
        let scalar = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database:finance", "policy": "alice|select|bob|update"}"#,
        )
        .unwrap();
        let array = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database:finance", "policy": ["alice|select|bob|update"]}"#,
        )
        .unwrap();
        assert_eq!(scalar, array);
    }

    #[test]
    fn clause_text_containing_brackets_is_still_a_clause() {
        let def = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database:finance", "policy": "[svc]|select||"}"#,
        )
        .unwrap();
        assert_eq!(def.clauses[0].allowed_users, strings(&["[svc]"]));
    }

    #[test]
    fn bad_specs_are_rejected() {
        let cases = [
            r#"not json"#,
            r#"{"resource": "database:finance"}"#,
            r#"{"policy": "a|b|c|d"}"#,
            r#"{"resource": "database:finance", "policy": 7}"#,
            r#"{"resource": "database:finance", "policy": []}"#,
            r#"{"resource": "database:finance", "policy": ["a|b|c|d", 1]}"#,
        ];
        for spec in cases {
            let err = PolicyDefinition::from_spec("p", "hive", spec).unwrap_err();
            assert!(matches!(err, WardenError::MalformedSpec(_)), "{spec}: {err}");
        }
    }

    #[test]
    fn nested_parse_errors_surface() {
        let err = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database", "policy": "a|b|c|d"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WardenError::MalformedResource { .. }));

        let err = PolicyDefinition::from_spec(
            "p",
            "hive",
            r#"{"resource": "database:finance", "policy": ["a|b|c|d", "a|b"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WardenError::MalformedClause { found: 2, .. }));
    }
}
