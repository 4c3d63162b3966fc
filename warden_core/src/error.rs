//! Error kinds raised while loading configuration, parsing policy entries,
//! and talking to the remote policy service.

use thiserror::Error;

/// Everything that can go wrong in a reconciliation run.
///
/// The malformed/configuration kinds are local input problems and abort the
/// run. The remote kinds are recorded per item and the run moves on.
#[derive(Error, Debug)]
pub enum WardenError {
    /// A resource descriptor item does not split into `type:value`.
    #[error("malformed resource descriptor `{input}`: {reason}")]
    MalformedResource {
        /// The full descriptor string
        input: String,
        /// What was wrong with it
        reason: String,
    },
    /// A policy clause does not have exactly four `|`-separated fields.
    #[error("malformed policy clause `{clause}`: expected 4 `|`-separated fields, found {found}")]
    MalformedClause {
        /// The offending clause
        clause: String,
        /// How many fields were found
        found: usize,
    },
    /// The JSON spec of a configured policy could not be used.
    #[error("malformed policy spec: {0}")]
    MalformedSpec(String),
    /// A configured policy failed to parse. Wraps the underlying cause with
    /// enough context to find the entry in the configuration file.
    #[error("[{component}] policy `{policy}`: {source}")]
    InvalidPolicy {
        /// The component section the entry lives in
        component: String,
        /// The configuration key
        policy: String,
        /// The parse failure
        #[source]
        source: Box<WardenError>,
    },
    /// One or more configured policies failed to parse.
    #[error("{} configured policies are invalid:\n{}", .0.len(), error_vec_to_string(.0))]
    InvalidPolicies(Vec<WardenError>),
    /// Missing or invalid configuration or arguments.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The remote service rejected or failed a create call.
    #[error("[{service}] failed to create policy `{policy}`: {source:#}")]
    RemoteSubmission {
        /// The service the policy belongs to
        service: String,
        /// The policy name
        policy: String,
        /// Underlying client error
        #[source]
        source: anyhow::Error,
    },
    /// The remote service failed to delete one policy.
    #[error("[{service}] failed to delete policy `{policy}` (id {id}): {source:#}")]
    RemoteDeletion {
        /// The service the policy belongs to
        service: String,
        /// The remote policy name
        policy: String,
        /// The remote policy id
        id: i64,
        /// Underlying client error
        #[source]
        source: anyhow::Error,
    },
    /// Listing the remote policies of a service failed.
    #[error("[{service}] failed to list policies: {source:#}")]
    RemoteList {
        /// The service that was listed
        service: String,
        /// Underlying client error
        #[source]
        source: anyhow::Error,
    },
}

impl WardenError {
    /// True for the kinds caused by local input, which abort a run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WardenError::MalformedResource { .. }
                | WardenError::MalformedClause { .. }
                | WardenError::MalformedSpec(_)
                | WardenError::InvalidPolicy { .. }
                | WardenError::InvalidPolicies(_)
                | WardenError::Configuration(_)
        )
    }
}

/// Join a list of errors into an indented, newline-separated message.
pub(crate) fn error_vec_to_string(errors: &[WardenError]) -> String {
    errors
        .iter()
        .map(|e| format!(" - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_are_fatal_remote_errors_are_not() {
        assert!(WardenError::Configuration("x".to_owned()).is_fatal());
        assert!(WardenError::MalformedClause {
            clause: "a|b".to_owned(),
            found: 2
        }
        .is_fatal());
        assert!(!WardenError::RemoteDeletion {
            service: "hive".to_owned(),
            policy: "p".to_owned(),
            id: 3,
            source: anyhow::anyhow!("boom"),
        }
        .is_fatal());
    }

    #[test]
    fn invalid_policy_names_the_entry() {
        let e = WardenError::InvalidPolicy {
            component: "hive".to_owned(),
            policy: "finance_read".to_owned(),
            source: Box::new(WardenError::MalformedSpec("missing field `policy`".to_owned())),
        };
        assert_eq!(
            e.to_string(),
            "[hive] policy `finance_read`: malformed policy spec: missing field `policy`"
        );
    }
}
