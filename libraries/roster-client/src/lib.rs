//! Roster Client
//!
//! HTTP client library for a remote users collection resource
//! (jsonplaceholder-compatible).
//!
//! # Operations
//!
//! - **List**: `GET /users`
//! - **Create**: `POST /users`
//! - **Update**: `PUT /users/{id}`
//! - **Delete**: `DELETE /users/{id}`
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{ClientConfig, NewUser, RosterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RosterClient::new(ClientConfig::new("https://jsonplaceholder.typicode.com"))?;
//!
//!     let users = client.users().list_users().await?;
//!     println!("Found {} users", users.len());
//!
//!     let created = client
//!         .users()
//!         .create_user(&NewUser {
//!             name: "Ada".into(),
//!             email: "ada@example.com".into(),
//!             website: "ada.dev".into(),
//!         })
//!         .await?;
//!     println!("Created user {}", created.id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;
mod users;

pub use client::RosterClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, NewUser, UserId, UserRecord};
pub use users::{UsersClient, JSON_CONTENT_TYPE};
