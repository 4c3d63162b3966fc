//! Configuration file loading.
//!
//! The file is INI-style. An `[Auth]` section says where the policy service
//! lives and which component sections to process; every other section named
//! there maps policy names to JSON policy specs:
//!
//! ```text
//! [Auth]
//! rangerURL = http://ranger.example.com:6080
//! rangerAuthUser = admin
//! rangerAuthPW = secret
//! componentClasses = hive, hdfs
//!
//! [hive]
//! finance_read = {"resource": "database:finance, table:ledger", "policy": "alice,bob|select||"}
//! ```

use std::{collections::HashSet, fmt::Debug, fs, path::Path, time::Duration};

use ini::{Ini, ParseOption, Properties};

use crate::error::{error_vec_to_string, WardenError};

/// Name of the section holding service location and credentials.
pub const AUTH_SECTION: &str = "Auth";

const URL_KEY: &str = "rangerURL";
const USER_KEY: &str = "rangerAuthUser";
const PASSWORD_KEY: &str = "rangerAuthPW";
const COMPONENTS_KEY: &str = "componentClasses";
const TIMEOUT_KEY: &str = "requestTimeoutSecs";
const RETRY_KEY: &str = "retryTransient";

/// Per-request timeout used when the configuration doesn't set one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The whole configuration file, loaded once per run and passed around
/// explicitly.
#[derive(Debug, Clone)]
pub struct WardenConfig {
    /// Service location, credentials and client settings.
    pub auth: AuthConfig,
    /// Component sections, in `componentClasses` order.
    pub components: Vec<ComponentConfig>,
}

/// Contents of the `[Auth]` section.
#[derive(Clone)]
pub struct AuthConfig {
    /// Base URL of the policy service
    pub url: String,
    /// Basic-auth user
    pub user: String,
    /// Basic-auth password
    pub password: String,
    /// Names of the component sections to reconcile
    pub component_classes: Vec<String>,
    /// Bound on every remote call
    pub request_timeout: Duration,
    /// Retry transient HTTP failures with backoff
    pub retry_transient: bool,
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("component_classes", &self.component_classes)
            .field("request_timeout", &self.request_timeout)
            .field("retry_transient", &self.retry_transient)
            .finish()
    }
}

/// One component section: policy name to raw JSON spec, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Section name, also the service name on the remote side
    pub name: String,
    /// (policy name, policy spec JSON) pairs
    pub policies: Vec<(String, String)>,
}

impl ComponentConfig {
    /// Basic constructor
    pub fn new(name: impl Into<String>, policies: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            policies,
        }
    }

    /// The configured policy names.
    pub fn policy_names(&self) -> impl Iterator<Item = &str> {
        self.policies.iter().map(|(name, _)| name.as_str())
    }
}

impl WardenConfig {
    /// Read and validate the configuration file at `path`.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, WardenError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            WardenError::Configuration(format!("unable to read {}: {e}", path.display()))
        })?;
        Self::from_ini_str(&raw)
    }

    /// Parse and validate configuration text.
    pub fn from_ini_str(raw: &str) -> Result<Self, WardenError> {
        // JSON values have to come through untouched.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(raw, options)
            .map_err(|e| WardenError::Configuration(format!("unable to parse file: {e}")))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, WardenError> {
        let auth_section = ini.section(Some(AUTH_SECTION)).ok_or_else(|| {
            WardenError::Configuration(format!("missing [{AUTH_SECTION}] section"))
        })?;

        let mut errors = Vec::new();
        let mut required = |key: &str| match get_ignore_case(auth_section, key) {
            Some(v) if !v.trim().is_empty() => v.trim().to_owned(),
            _ => {
                errors.push(WardenError::Configuration(format!(
                    "[{AUTH_SECTION}] is missing `{key}`"
                )));
                String::new()
            }
        };
        let url = required(URL_KEY);
        let user = required(USER_KEY);
        let password = required(PASSWORD_KEY);
        let classes_raw = required(COMPONENTS_KEY);

        let component_classes = classes_raw
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if component_classes.is_empty() && !classes_raw.is_empty() {
            errors.push(WardenError::Configuration(format!(
                "`{COMPONENTS_KEY}` does not name any component"
            )));
        }

        let request_timeout = match get_ignore_case(auth_section, TIMEOUT_KEY) {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    errors.push(WardenError::Configuration(format!(
                        "`{TIMEOUT_KEY}` must be a positive number of seconds, got `{v}`"
                    )));
                    DEFAULT_REQUEST_TIMEOUT
                }
            },
        };

        let retry_transient = match get_ignore_case(auth_section, RETRY_KEY) {
            None => false,
            Some(v) => parse_bool(v).unwrap_or_else(|| {
                errors.push(WardenError::Configuration(format!(
                    "`{RETRY_KEY}` must be true or false, got `{v}`"
                )));
                false
            }),
        };

        let mut components = Vec::with_capacity(component_classes.len());
        let mut seen_components = HashSet::new();
        for class in &component_classes {
            if !seen_components.insert(class.as_str()) {
                errors.push(WardenError::Configuration(format!(
                    "component `{class}` is listed more than once in `{COMPONENTS_KEY}`"
                )));
                continue;
            }
            match ini.section(Some(class.as_str())) {
                Some(section) => match read_component(class, section) {
                    Ok(c) => components.push(c),
                    Err(e) => errors.push(e),
                },
                None => errors.push(WardenError::Configuration(format!(
                    "component `{class}` is listed in `{COMPONENTS_KEY}` but has no section"
                ))),
            }
        }

        if !errors.is_empty() {
            return Err(WardenError::Configuration(format!(
                "configuration is invalid:\n{}",
                error_vec_to_string(&errors)
            )));
        }

        Ok(WardenConfig {
            auth: AuthConfig {
                url,
                user,
                password,
                component_classes,
                request_timeout,
                retry_transient,
            },
            components,
        })
    }
}

fn read_component(name: &str, section: &Properties) -> Result<ComponentConfig, WardenError> {
    let mut seen = HashSet::new();
    let mut policies = Vec::new();
    for (key, value) in section.iter() {
        let key = key.trim();
        // names are compared case-insensitively on the remote side
        if !seen.insert(key.to_lowercase()) {
            return Err(WardenError::Configuration(format!(
                "[{name}] defines policy `{key}` more than once"
            )));
        }
        policies.push((key.to_owned(), value.trim().to_owned()));
    }
    Ok(ComponentConfig::new(name, policies))
}

fn get_ignore_case<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
