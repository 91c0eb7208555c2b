//! Main Roster client.

use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use crate::users::UsersClient;
use reqwest::Client;
use tracing::debug;

/// Client for a remote users collection resource.
///
/// Holds the HTTP connection pool and the normalized base URL. Per-resource
/// operations live on [`UsersClient`], obtained with [`RosterClient::users`].
///
/// # Example
///
/// ```ignore
/// use roster_client::{ClientConfig, RosterClient};
///
/// let client = RosterClient::new(ClientConfig::new("https://jsonplaceholder.typicode.com"))?;
/// let users = client.users().list_users().await?;
/// println!("Found {} users", users.len());
/// ```
#[derive(Debug, Clone)]
pub struct RosterClient {
    http: Client,
    base_url: String,
}

impl RosterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let mut builder = Client::builder()
            .user_agent(format!("Roster/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Request)?;

        debug!(url = %base_url, timeout = ?config.timeout, "Created roster client");

        Ok(Self { http, base_url })
    }

    /// Get the normalized base URL (no trailing slash).
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Get a client for the `/users` collection.
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.base_url)
    }
}
