//!
//! Warden Core
//!
//! Reads a policy configuration file, turns every configured entry into a
//! structured policy, and reconciles a remote policy service against it.
#![deny(missing_docs)]

pub use config::WardenConfig;
pub use error::WardenError;
pub use policy::{PolicyClause, PolicyDefinition, ResourceDescriptor};
pub use reconcile::{Mode, RunSummary};
pub use service::{PolicyService, RemotePolicy};

pub mod config;
pub mod error;
pub mod logging;
pub mod policy;
pub mod reconcile;
pub mod service;

#[cfg(test)]
pub(crate) mod test_util;

#[macro_export]
/// Time the code inside the macro. Write the elapsed time to debug logs.
/// Derived from https://notes.iveselov.info/programming/time_it-a-case-study-in-rust-macros
macro_rules! log_runtime {
    ($context:literal, $($tt:tt)+) => {
        {
            $crate::logging::debug!("{}: starting", $context);
            let timer = std::time::Instant::now();
            let x =
            $(
                $tt
            )+;
            $crate::logging::debug!("{}: {:?}", $context, timer.elapsed());
            x
        }
    }
}
