//! The seam between the view-model and the remote collection.

use async_trait::async_trait;
use roster_client::{ClientError, NewUser, RosterClient, UserId, UserRecord};

/// The four exchanges the view-model needs from a users collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError>;

    /// `POST /users`
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ClientError>;

    /// `PUT /users/{id}` with the full record
    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord, ClientError>;

    /// `DELETE /users/{id}`
    async fn delete_user(&self, id: &UserId) -> Result<(), ClientError>;
}

#[async_trait]
impl UsersApi for RosterClient {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        self.users().list_users().await
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ClientError> {
        self.users().create_user(user).await
    }

    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord, ClientError> {
        self.users().update_user(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ClientError> {
        self.users().delete_user(id).await
    }
}
