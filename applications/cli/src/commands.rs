/// One-shot actions run against a freshly loaded view
use crate::config::RosterConfig;
use crate::error::Result;
use roster_client::{RosterClient, UserId};
use roster_view::{DraftField, EditableField, UserListViewModel, UsersApi};
use tracing::{info, warn};

/// Ids are kept as typed; they are matched against the loaded list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Add {
        name: String,
        email: String,
        website: String,
    },
    Edit {
        id: String,
        email: Option<String>,
        website: Option<String>,
    },
    Delete {
        id: String,
    },
}

/// Build the HTTP client and the view it feeds.
pub fn connect(config: &RosterConfig) -> Result<UserListViewModel<RosterClient>> {
    let client = RosterClient::new(config.client_config())?;
    Ok(UserListViewModel::new(client, config.view.error_policy))
}

/// The loaded id whose text form is `text`, or its parsed form when no
/// row matches.
pub async fn resolve<A: UsersApi>(view: &UserListViewModel<A>, text: &str) -> UserId {
    match view.resolve_id(text).await {
        Some(id) => id,
        None => UserId::from(text.trim()),
    }
}

/// Load the list, then apply `action`.
pub async fn execute<A: UsersApi>(view: &UserListViewModel<A>, action: Action) -> Result<()> {
    view.load().await?;

    match action {
        Action::List => {}
        Action::Add {
            name,
            email,
            website,
        } => {
            view.set_draft(DraftField::Name, name).await;
            view.set_draft(DraftField::Email, email).await;
            view.set_draft(DraftField::Website, website).await;

            match view.add_user().await? {
                Some(user) => info!(user_id = %user.id, "Added user"),
                None => warn!("User not added: name, email and website must all be non-blank"),
            }
        }
        Action::Edit { id, email, website } => {
            let id = resolve(view, &id).await;
            if let Some(email) = email {
                view.on_change(&id, EditableField::Email, email).await;
            }
            if let Some(website) = website {
                view.on_change(&id, EditableField::Website, website).await;
            }
            view.update_user(&id).await?;
        }
        Action::Delete { id } => {
            let id = resolve(view, &id).await;
            view.delete_user(&id).await?;
        }
    }

    Ok(())
}
