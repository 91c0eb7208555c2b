//! The user list view-model.

use crate::api::UsersApi;
use crate::error::{Result, ViewError};
use crate::notification::{Notification, UPDATE_SUCCESS_MESSAGE};
use crate::state::{Draft, DraftField, EditableField, ErrorPolicy, ViewSnapshot};
use roster_client::{ClientError, UserId, UserRecord};
use std::collections::HashSet;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Mutable state behind the view-model lock.
#[derive(Debug)]
struct ViewState {
    users: Vec<UserRecord>,
    error: Option<String>,
    draft: Draft,
    in_flight: HashSet<UserId>,
    notifications: Vec<Notification>,
    mounted: bool,
}

impl ViewState {
    fn new() -> Self {
        Self {
            users: Vec::new(),
            error: None,
            draft: Draft::default(),
            in_flight: HashSet::new(),
            notifications: Vec::new(),
            mounted: true,
        }
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.mounted {
            Ok(())
        } else {
            Err(ViewError::Unmounted)
        }
    }

    fn find(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == *id)
    }

    /// Claim `id` for an update or delete.
    fn begin(&mut self, id: &UserId) -> Result<UserRecord> {
        self.ensure_mounted()?;
        let record = self
            .find(id)
            .cloned()
            .ok_or_else(|| ViewError::UnknownUser(id.clone()))?;
        if !self.in_flight.insert(id.clone()) {
            return Err(ViewError::Busy(id.clone()));
        }
        Ok(record)
    }

    /// Release `id` once its response is back.
    fn finish(&mut self, id: &UserId) -> Result<()> {
        self.in_flight.remove(id);
        if self.mounted {
            Ok(())
        } else {
            debug!(user_id = %id, "Discarding response for unmounted view");
            Err(ViewError::Unmounted)
        }
    }

    fn prune_notifications(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| !n.is_expired(now));
    }
}

/// In-memory user list kept in sync with a remote users collection.
///
/// Every operation takes `&self`; the state lock is released while a
/// request is outstanding, so several operations may be in flight at once.
/// Updates and deletes are keyed by id: a second one for an id that is
/// still outstanding fails with [`ViewError::Busy`] without a request.
///
/// # Example
///
/// ```ignore
/// use roster_client::{ClientConfig, RosterClient};
/// use roster_view::{render, DraftField, ErrorPolicy, UserListViewModel};
///
/// let client = RosterClient::new(ClientConfig::new("https://jsonplaceholder.typicode.com"))?;
/// let view = UserListViewModel::new(client, ErrorPolicy::PerOperation);
///
/// view.load().await?;
/// view.set_draft(DraftField::Name, "Ada").await;
/// view.set_draft(DraftField::Email, "ada@example.com").await;
/// view.set_draft(DraftField::Website, "ada.dev").await;
/// view.add_user().await?;
///
/// println!("{}", render(&view.snapshot().await));
/// ```
#[derive(Debug)]
pub struct UserListViewModel<A> {
    api: A,
    policy: ErrorPolicy,
    state: RwLock<ViewState>,
}

impl<A: UsersApi> UserListViewModel<A> {
    pub fn new(api: A, policy: ErrorPolicy) -> Self {
        Self {
            api,
            policy,
            state: RwLock::new(ViewState::new()),
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// The loaded id whose text form is `text`, keeping the server's form.
    ///
    /// Typed input cannot tell `1` from `"1"`; this picks whichever the
    /// list actually holds.
    pub async fn resolve_id(&self, text: &str) -> Option<UserId> {
        let text = text.trim();
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|user| user.id.to_string() == text)
            .map(|user| user.id.clone())
    }

    /// Replace the list with the remote collection.
    ///
    /// A failure always fills the error slot; a success clears it.
    pub async fn load(&self) -> Result<usize> {
        self.state.read().await.ensure_mounted()?;

        let result = self.api.list_users().await;

        let mut state = self.state.write().await;
        state.ensure_mounted()?;
        match result {
            Ok(users) => {
                let count = users.len();
                state.users = users;
                state.error = None;
                info!(count, "Loaded users");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load users");
                state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Edit `field` of the record `id` locally. Returns whether it matched.
    pub async fn on_change(
        &self,
        id: &UserId,
        field: EditableField,
        value: impl Into<String>,
    ) -> bool {
        let mut state = self.state.write().await;
        let Some(user) = state.users.iter_mut().find(|user| user.id == *id) else {
            debug!(user_id = %id, "No user to edit");
            return false;
        };

        let value = value.into();
        match field {
            EditableField::Email => user.email = value,
            EditableField::Website => user.website = value,
        }
        true
    }

    pub async fn set_draft(&self, field: DraftField, value: impl Into<String>) {
        self.state.write().await.draft.set(field, value);
    }

    /// Send the current copy of `id` and adopt the server's reply.
    ///
    /// Local edits made with [`on_change`](Self::on_change) are kept if the
    /// request fails.
    pub async fn update_user(&self, id: &UserId) -> Result<UserRecord> {
        let record = self.state.write().await.begin(id)?;

        let result = self.api.update_user(&record).await;

        let mut state = self.state.write().await;
        state.finish(id)?;
        match result {
            Ok(updated) => {
                if let Some(slot) = state.users.iter_mut().find(|user| user.id == *id) {
                    *slot = updated.clone();
                }
                state.notifications.push(Notification::success(UPDATE_SUCCESS_MESSAGE));
                info!(user_id = %id, "User updated");
                Ok(updated)
            }
            Err(e) => Err(self.record_failure(&mut state, "update", e)),
        }
    }

    /// Submit the draft. A draft with any blank field is ignored and
    /// yields `Ok(None)` without a request.
    pub async fn add_user(&self) -> Result<Option<UserRecord>> {
        let submission = {
            let state = self.state.read().await;
            state.ensure_mounted()?;
            state.draft.submission()
        };
        let Some(new_user) = submission else {
            debug!("Draft incomplete, not adding user");
            return Ok(None);
        };

        let result = self.api.create_user(&new_user).await;

        let mut state = self.state.write().await;
        state.ensure_mounted()?;
        match result {
            Ok(created) => {
                // Ids stay unique even when the server hands one out twice.
                if let Some(slot) = state.users.iter_mut().find(|user| user.id == created.id) {
                    warn!(user_id = %created.id, "Server reused an existing id, replacing row");
                    *slot = created.clone();
                } else {
                    state.users.push(created.clone());
                }
                state.draft.clear();
                info!(user_id = %created.id, "User added");
                Ok(Some(created))
            }
            Err(e) => Err(self.record_failure(&mut state, "add", e)),
        }
    }

    /// Delete `id` remotely, then drop it from the list.
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        self.state.write().await.begin(id)?;

        let result = self.api.delete_user(id).await;

        let mut state = self.state.write().await;
        state.finish(id)?;
        match result {
            Ok(()) => {
                state.users.retain(|user| user.id != *id);
                info!(user_id = %id, "User deleted");
                Ok(())
            }
            Err(e) => Err(self.record_failure(&mut state, "delete", e)),
        }
    }

    /// Tear the view down; responses that arrive later are discarded.
    pub async fn unmount(&self) {
        let mut state = self.state.write().await;
        state.mounted = false;
        debug!(pending = state.in_flight.len(), "View unmounted");
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn users(&self) -> Vec<UserRecord> {
        self.state.read().await.users.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn draft(&self) -> Draft {
        self.state.read().await.draft.clone()
    }

    /// Notifications that have not yet expired.
    pub async fn notifications(&self) -> Vec<Notification> {
        let mut state = self.state.write().await;
        state.prune_notifications();
        state.notifications.clone()
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        let mut state = self.state.write().await;
        state.prune_notifications();
        ViewSnapshot {
            users: state.users.clone(),
            error: state.error.clone(),
            draft: state.draft.clone(),
            notifications: state.notifications.clone(),
        }
    }

    fn record_failure(
        &self,
        state: &mut ViewState,
        operation: &str,
        error: ClientError,
    ) -> ViewError {
        let message = error.to_string();
        warn!(operation, error = %message, "Request failed");

        match self.policy {
            ErrorPolicy::Global => state.error = Some(message),
            ErrorPolicy::PerOperation => {
                let text = format!("Failed to {} user: {}", operation, message);
                state.notifications.push(Notification::danger(text));
            }
        }
        ViewError::Client(error)
    }
}
