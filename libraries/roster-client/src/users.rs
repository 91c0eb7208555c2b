//! Operations on the `/users` collection resource.

use crate::error::{ClientError, Result};
use crate::types::{NewUser, UserId, UserRecord};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Content type sent with every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Client for the users collection.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch the whole collection.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let url = self.resource_url(&[])?;
        debug!(url = %url, "Fetching users");

        let response = send(self.http.get(url)).await?;
        let status = response.status();

        if status.is_success() {
            let users: Vec<UserRecord> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse users response: {}", e))
            })?;

            debug!(users = users.len(), "Fetched users");
            Ok(users)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Create a user. The server assigns the id.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserRecord> {
        let url = self.resource_url(&[])?;
        debug!(url = %url, name = %user.name, "Creating user");

        let response = send(with_json(self.http.post(url), user)?).await?;
        let status = response.status();

        if status.is_success() {
            let created: UserRecord = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse created user: {}", e))
            })?;

            debug!(user_id = %created.id, "User created");
            Ok(created)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Replace a user with `user`, returning what the server stored.
    pub async fn update_user(&self, user: &UserRecord) -> Result<UserRecord> {
        let id = user.id.to_string();
        let url = self.resource_url(&[&id])?;
        debug!(url = %url, user_id = %id, "Updating user");

        let response = send(with_json(self.http.put(url), user)?).await?;
        let status = response.status();

        if status.is_success() {
            let updated: UserRecord = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse updated user: {}", e))
            })?;

            Ok(updated)
        } else if status.as_u16() == 404 {
            Err(ClientError::ServerError {
                status: 404,
                message: format!("User not found: {}", id),
            })
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Delete a user. The response body is ignored.
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let id = id.to_string();
        let url = self.resource_url(&[&id])?;
        debug!(url = %url, user_id = %id, "Deleting user");

        let response = send(self.http.delete(url)).await?;
        let status = response.status();

        if status.is_success() {
            debug!(user_id = %id, "User deleted");
            Ok(())
        } else if status.as_u16() == 404 {
            Err(ClientError::ServerError {
                status: 404,
                message: format!("User not found: {}", id),
            })
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// `{base}/users/{segments...}`, with each segment percent-encoded.
    fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("users")
            .extend(segments);
        Ok(url)
    }
}

fn with_json<T: Serialize>(request: RequestBuilder, body: &T) -> Result<RequestBuilder> {
    let body = serde_json::to_vec(body)?;
    Ok(request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body))
}

async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ClientError::ServerError { status, message }
}
