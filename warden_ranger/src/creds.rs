use anyhow::{anyhow, Result};
use warden_core::config::AuthConfig;

/// Credentials for authenticating to Ranger.
///
/// The user sets these up in the `[Auth]` section of their configuration.
#[derive(Default)]
pub(crate) struct RangerCredentials {
    pub(crate) url: String,
    pub(crate) user: String,
    pub(crate) password: String,
}

impl std::fmt::Debug for RangerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangerCredentials")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<&AuthConfig> for RangerCredentials {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            url: auth.url.to_owned(),
            user: auth.user.to_owned(),
            password: auth.password.to_owned(),
        }
    }
}

impl RangerCredentials {
    /// Perform simple field validation to catch bad input.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.is_empty() || self.user.is_empty() || self.password.is_empty() {
            return Err(anyhow!(
                "Credentials are missing. Please make sure the [Auth] section of your configuration is correct. Credentials received: {:#?}", self
            ));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(anyhow!(
                "rangerURL must start with http:// or https://, got `{}`",
                self.url
            ));
        }
        Ok(())
    }

    /// The base url without any trailing slash.
    pub(crate) fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(url: &str) -> RangerCredentials {
        RangerCredentials {
            url: url.to_owned(),
            user: "admin".to_owned(),
            password: "s3cret".to_owned(),
        }
    }

    #[test]
    fn empty_creds_fail_validation() {
        let err = RangerCredentials::default().validate().unwrap_err();
        assert!(err.to_string().contains("Credentials are missing"));
    }

    #[test]
    fn url_needs_a_scheme() {
        assert!(creds("ranger:6080").validate().is_err());
        assert!(creds("https://ranger:6080/").validate().is_ok());
    }

    #[test]
    fn base_url_drops_trailing_slashes() {
        assert_eq!(creds("http://ranger:6080//").base_url(), "http://ranger:6080");
    }

    #[test]
    fn password_is_not_printed() {
        assert!(!format!("{:?}", creds("http://r")).contains("s3cret"));
    }
}
