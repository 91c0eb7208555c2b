//! View state types.

use crate::notification::Notification;
use roster_client::{NewUser, UserRecord};
use serde::{Deserialize, Serialize};

/// What a failed add, update or delete does to the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// The failure also fills the global error slot, replacing the table.
    #[default]
    Global,
    /// The failure is returned to the caller and shown as a danger
    /// notification; the table stays visible.
    PerOperation,
}

/// Record fields that can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Email,
    Website,
}

/// Input buffers of the add-user form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Website,
}

/// Values typed into the add-user form but not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub website: String,
}

impl Draft {
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Website => self.website = value,
        }
    }

    /// The trimmed request body, or `None` while any field is blank.
    pub fn submission(&self) -> Option<NewUser> {
        let name = self.name.trim();
        let email = self.email.trim();
        let website = self.website.trim();

        if name.is_empty() || email.is_empty() || website.is_empty() {
            return None;
        }

        Some(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            website: website.to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Point-in-time copy of everything the page renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub users: Vec<UserRecord>,
    pub error: Option<String>,
    pub draft: Draft,
    pub notifications: Vec<Notification>,
}

impl ViewSnapshot {
    /// Row count, always derived from the list.
    pub fn count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_trims_every_field() {
        let draft = Draft {
            name: "  Ada ".into(),
            email: "\tada@example.com".into(),
            website: "ada.dev \n".into(),
        };

        assert_eq!(
            draft.submission(),
            Some(NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                website: "ada.dev".into(),
            })
        );
    }

    #[test]
    fn whitespace_only_field_blocks_submission() {
        let mut draft = Draft::default();
        draft.set(DraftField::Name, "Ada");
        draft.set(DraftField::Email, "ada@example.com");
        draft.set(DraftField::Website, "   ");

        assert!(draft.submission().is_none());
    }

    #[test]
    fn default_policy_blanks_the_table() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Global);
    }

    #[test]
    fn error_policy_reads_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ErrorPolicy,
        }

        let parsed: Wrapper =
            serde_json::from_value(serde_json::json!({ "policy": "per_operation" })).unwrap();
        assert_eq!(parsed.policy, ErrorPolicy::PerOperation);

        let parsed: Wrapper =
            serde_json::from_value(serde_json::json!({ "policy": "global" })).unwrap();
        assert_eq!(parsed.policy, ErrorPolicy::Global);
    }
}
