//! Reconcile the remote policy service against the configuration.
//!
//! A run works in one of two modes. `Add` assembles every configured policy
//! and creates it remotely. `Delete` removes remote policies whose names are
//! no longer configured. Local parse problems stop the run before anything is
//! written; remote failures are logged per item and the run carries on.

pub mod add;
pub mod delete;

use std::fmt::Display;

use colored::Colorize;

use crate::{
    logging::{error, info},
    PolicyDefinition, PolicyService, RemotePolicy, WardenConfig, WardenError,
};

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Create every configured policy
    #[default]
    Add,
    /// Delete remote policies that aren't configured
    Delete,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Add => write!(f, "add"),
            Mode::Delete => write!(f, "delete"),
        }
    }
}

/// A single change a run would make.
#[derive(Debug, Clone)]
pub enum Change {
    /// Create this policy
    Create(PolicyDefinition),
    /// Delete this remote policy from `service`
    Delete {
        /// The service the policy is attached to
        service: String,
        /// The remote policy
        policy: RemotePolicy,
    },
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut text = "".to_owned();
        match self {
            Change::Create(def) => {
                text += format!(
                    "{}",
                    format!("+ policy: {}/{}\n", def.service_name, def.name).green()
                )
                .as_str();
                text += format!("  resources: {}\n", def.resources).as_str();
                for clause in &def.clauses {
                    if !clause.allowed_users.is_empty() || !clause.allowed_access.is_empty() {
                        text += format!(
                            "    {} {} -> {}\n",
                            "allow".green(),
                            clause.allowed_users.join(","),
                            clause.allowed_access.join(",")
                        )
                        .as_str();
                    }
                    if !clause.denied_users.is_empty() || !clause.denied_access.is_empty() {
                        text += format!(
                            "    {} {} -> {}\n",
                            "deny".red(),
                            clause.denied_users.join(","),
                            clause.denied_access.join(",")
                        )
                        .as_str();
                    }
                }
            }
            Change::Delete { service, policy } => {
                text += format!(
                    "{}",
                    format!("- policy: {}/{}\n", service, policy).red()
                )
                .as_str();
            }
        }
        write!(f, "{text}")
    }
}

/// The outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Changes that would have been made (dry runs only)
    pub planned: Vec<Change>,
    /// Policies created
    pub created: Vec<RemotePolicy>,
    /// Policies deleted
    pub deleted: Vec<RemotePolicy>,
    /// Remote operations that failed
    pub failures: Vec<WardenError>,
}

impl RunSummary {
    fn record_failure(&mut self, e: WardenError) {
        error!("{e}");
        self.failures.push(e);
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} deleted, {} failed",
            self.created.len(),
            self.deleted.len(),
            self.failures.len()
        )?;
        if !self.planned.is_empty() {
            write!(f, ", {} planned", self.planned.len())?;
        }
        Ok(())
    }
}

/// Run one reconciliation pass over every configured component, in order.
///
/// With `dry_run` the same plan is computed and returned in
/// [`RunSummary::planned`], but nothing is created or deleted.
pub async fn run<S>(
    service: &S,
    config: &WardenConfig,
    mode: Mode,
    dry_run: bool,
) -> Result<RunSummary, WardenError>
where
    S: PolicyService + Sync + ?Sized,
{
    info!(
        "starting {mode} run over {} component(s){}",
        config.components.len(),
        if dry_run { " (dry run)" } else { "" }
    );
    let mut summary = RunSummary::default();

    match mode {
        Mode::Add => {
            let definitions = add::plan_additions(config)?;
            if dry_run {
                summary
                    .planned
                    .extend(definitions.into_iter().map(Change::Create));
            } else {
                add::apply_additions(service, &definitions, &mut summary).await;
            }
        }
        Mode::Delete => {
            for component in &config.components {
                let candidates = match delete::plan_deletions(service, component).await {
                    Ok(c) => c,
                    Err(e) => {
                        summary.record_failure(e);
                        continue;
                    }
                };
                if dry_run {
                    summary
                        .planned
                        .extend(candidates.into_iter().map(|policy| Change::Delete {
                            service: component.name.to_owned(),
                            policy,
                        }));
                } else {
                    delete::apply_deletions(service, &component.name, &candidates, &mut summary)
                        .await;
                }
            }
        }
    }

    info!("{mode} run finished: {summary}");
    Ok(summary)
}
