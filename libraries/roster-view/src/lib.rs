//! Roster View
//!
//! View-model for a user list page synchronized with a remote users
//! collection.
//!
//! # Architecture
//!
//! - **[`UserListViewModel`]**: ordered records, add-user draft, error
//!   slot and notifications, with the four remote operations
//! - **[`UsersApi`]**: the seam to the collection resource, implemented
//!   for [`roster_client::RosterClient`]
//! - **[`render`]**: text form of the page

mod api;
mod error;
mod notification;
mod render;
mod state;
mod view_model;

pub use api::UsersApi;
pub use error::{Result, ViewError};
pub use notification::{Intent, Notification, NOTIFICATION_TIMEOUT, UPDATE_SUCCESS_MESSAGE};
pub use render::render;
pub use state::{Draft, DraftField, EditableField, ErrorPolicy, ViewSnapshot};
pub use view_model::UserListViewModel;
