//! Parsing of policy clauses: `allowUsers|allowAccess|denyUsers|denyAccess`

use std::{fmt::Display, str::FromStr};

use crate::WardenError;

/// One allow/deny rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyClause {
    /// Users granted `allowed_access`
    pub allowed_users: Vec<String>,
    /// Access types granted to `allowed_users`
    pub allowed_access: Vec<String>,
    /// Users denied `denied_access`
    pub denied_users: Vec<String>,
    /// Access types denied to `denied_users`
    pub denied_access: Vec<String>,
}

impl FromStr for PolicyClause {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split('|').collect::<Vec<_>>();
        match fields.as_slice() {
            [allowed_users, allowed_access, denied_users, denied_access] => Ok(PolicyClause {
                allowed_users: split_list(allowed_users),
                allowed_access: split_list(allowed_access),
                denied_users: split_list(denied_users),
                denied_access: split_list(denied_access),
            }),
            _ => Err(WardenError::MalformedClause {
                clause: s.to_owned(),
                found: fields.len(),
            }),
        }
    }
}

/// Split a comma-separated field. Empty entries are dropped, so an empty
/// field gives an empty list.
fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
}

impl Display for PolicyClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.allowed_users.join(","),
            self.allowed_access.join(","),
            self.denied_users.join(","),
            self.denied_access.join(",")
        )
    }
}
