//! UniFi Controller REST client.
//!
//! The controller authenticates with a session cookie obtained from
//! `POST /api/login`; the cookie store of the underlying `reqwest` client
//! keeps it for the rest of the process.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::error::{ControllerError, Result};

use super::groups::GroupStore;
use super::types::{ApiEnvelope, FirewallGroup, LoginRequest, RC_OK};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for a single controller site.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    /// HTTP client holding the session cookie.
    client: Client,
    /// Controller base URL without trailing slash.
    base_url: String,
    /// Controller site name.
    site: String,
}

impl ControllerClient {
    /// Creates a new controller client.
    ///
    /// With `verify_tls` off, self-signed controller certificates are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, site: &str, verify_tls: bool) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .cookie_store(true)
            .danger_accept_invalid_certs(!verify_tls)
            .default_headers(headers)
            .build()
            .map_err(|e| ControllerError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            site: site.to_string(),
        })
    }

    /// Logs into the controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the call fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        info!("Logging into controller at {}", self.base_url);

        let request = self
            .client
            .post(format!("{}/api/login", self.base_url))
            .json(&LoginRequest { username, password });

        let _: Value = self.execute(request).await?;
        debug!("Controller login successful");
        Ok(())
    }

    /// Lists every firewall group on the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_firewall_groups(&self) -> Result<Vec<FirewallGroup>> {
        let request = self.client.get(self.firewall_group_url(None));
        self.execute(request).await
    }

    /// Replaces a firewall group with the given definition.
    ///
    /// Only the status and `rc` of the reply are checked; its `data` is not
    /// inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn update_firewall_group(&self, group: &FirewallGroup) -> Result<()> {
        let request = self
            .client
            .put(self.firewall_group_url(Some(&group.id)))
            .json(group);
        let _: IgnoredAny = self.execute(request).await?;
        Ok(())
    }

    /// Builds the firewall group collection or item URL.
    fn firewall_group_url(&self, id: Option<&str>) -> String {
        let collection = format!("{}/api/s/{}/rest/firewallgroup", self.base_url, self.site);
        match id {
            Some(id) => format!("{collection}/{id}"),
            None => collection,
        }
    }

    /// Sends a request and unwraps the response envelope.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ControllerError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ControllerError::network(format!("Failed to read response: {e}")))?;
        trace!("Controller response {status}: {body}");

        parse_envelope(status, body)
    }
}

/// Validates a controller response and extracts its `data` payload.
///
/// # Errors
///
/// Returns an error carrying the raw body for a non-200 status, a body that
/// is not an envelope, or an `rc` other than `"ok"`.
pub fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T> {
    if status != StatusCode::OK {
        return Err(ControllerError::HttpStatus {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_str(&body)
        .map_err(|e| ControllerError::invalid(format!("Malformed envelope: {e}"), body.as_str()))?;

    if envelope.meta.rc != RC_OK {
        return Err(ControllerError::Envelope {
            rc: envelope.meta.rc,
            body,
        }
        .into());
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| ControllerError::invalid(format!("Unexpected data: {e}"), body).into())
}

#[async_trait]
impl GroupStore for ControllerClient {
    async fn list_groups(&self) -> Result<Vec<FirewallGroup>> {
        self.list_firewall_groups().await
    }

    async fn update_group(&self, group: &FirewallGroup) -> Result<()> {
        self.update_firewall_group(group).await
    }
}
