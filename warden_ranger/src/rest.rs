//! Rest API interface for Ranger
//!

use std::time::Duration;

use crate::{consts, creds::RangerCredentials};

use anyhow::{bail, Context, Result};
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};
use warden_core::{config::DEFAULT_REQUEST_TIMEOUT, logging::debug};

pub(crate) struct RangerRestConfig {
    /// Enable/disable retry logic.
    pub(crate) retry: bool,
    /// Bound on each request, including reading the body.
    pub(crate) timeout: Duration,
}

impl Default for RangerRestConfig {
    fn default() -> Self {
        Self {
            retry: false,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Wrapper struct for http functionality
pub(crate) struct RangerRestClient {
    /// The credentials used to authenticate into Ranger.
    credentials: RangerCredentials,
    http_client: ClientWithMiddleware,
}

impl RangerRestClient {
    pub(crate) fn new(credentials: RangerCredentials, config: RangerRestConfig) -> Result<Self> {
        credentials.validate()?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("building http client")?;
        let mut client_builder = ClientBuilder::new(inner);
        if config.retry {
            client_builder =
                client_builder.with(RetryTransientMiddleware::new_with_policy(retry_policy))
        }
        let client = client_builder.build();
        Ok(Self {
            credentials,
            http_client: client,
        })
    }

    /// POST a json body and decode the json response.
    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.get_url(path);
        let request = self
            .authorize(self.http_client.post(&url))
            .header(consts::CONTENT_TYPE_HEADER, consts::JSON_CONTENT)
            .json(body);
        let response = send(request, "POST", &url).await?;
        response
            .json::<R>()
            .await
            .with_context(|| format!("couldn't decode response from POST {url}"))
    }

    /// GET and decode the json response.
    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.get_url(path);
        let request = self.authorize(self.http_client.get(&url));
        let response = send(request, "GET", &url).await?;
        response
            .json::<R>()
            .await
            .with_context(|| format!("couldn't decode response from GET {url}"))
    }

    /// DELETE, dropping any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.get_url(path);
        let request = self.authorize(self.http_client.delete(&url));
        send(request, "DELETE", &url).await?;
        Ok(())
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/{}", self.credentials.base_url(), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .header(consts::ACCEPT_HEADER, consts::JSON_CONTENT)
            .header(consts::USER_AGENT_HEADER, consts::USER_AGENT)
    }
}

/// Send a request, turning non-success statuses into errors that carry the
/// response body.
async fn send(request: RequestBuilder, method: &str, url: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .with_context(|| format!("couldn't send request {method} {url}"))?;
    let status = response.status();
    debug!("status for {method} {url}: {status}");
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{method} {url} returned {status}: {}", body.trim());
    }
    Ok(response)
}
