pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const ACCEPT_HEADER: &str = "Accept";
pub const USER_AGENT_HEADER: &str = "User-Agent";
pub const JSON_CONTENT: &str = "application/json";
pub const USER_AGENT: &str = concat!("warden/", env!("CARGO_PKG_VERSION"));

/// Create, and with `/{id}` delete, a policy.
pub const POLICY_PATH: &str = "service/public/v2/api/policy";
/// Followed by `/{service}/policy` to list a service's policies.
pub const SERVICE_PATH: &str = "service/public/v2/api/service";
