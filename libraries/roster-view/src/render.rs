//! Plain-text rendering of the user list page.

use crate::notification::Intent;
use crate::state::ViewSnapshot;

const HEADERS: [&str; 5] = ["ID", "Name", "Email", "Website", "Action"];
const PLACEHOLDERS: [&str; 3] = ["Enter Name", "Enter Email", "Enter Website"];
const ROW_ACTIONS: &str = "commit, delete";
const FOOTER_ACTIONS: &str = "add";

/// Render the page: the error line when the error slot is set, otherwise
/// the table with a footer holding the live count and the draft fields.
/// The last column names the shell commands that act on each row.
pub fn render(snapshot: &ViewSnapshot) -> String {
    if let Some(error) = &snapshot.error {
        return format!("Error fetching users: {}", error);
    }

    let mut rows: Vec<[String; 5]> = Vec::with_capacity(snapshot.users.len() + 2);
    rows.push(HEADERS.map(String::from));
    for user in &snapshot.users {
        rows.push([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.website.clone(),
            ROW_ACTIONS.to_string(),
        ]);
    }

    let draft = &snapshot.draft;
    let draft_cell = |value: &str, placeholder: &str| {
        if value.is_empty() {
            format!("<{}>", placeholder)
        } else {
            value.to_string()
        }
    };
    rows.push([
        snapshot.count().to_string(),
        draft_cell(&draft.name, PLACEHOLDERS[0]),
        draft_cell(&draft.email, PLACEHOLDERS[1]),
        draft_cell(&draft.website, PLACEHOLDERS[2]),
        FOOTER_ACTIONS.to_string(),
    ]);

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let footer_index = rows.len() - 1;
    let mut lines = Vec::with_capacity(rows.len() + 2);
    for (index, row) in rows.iter().enumerate() {
        if index == 1 || index == footer_index {
            lines.push(separator.clone());
        }
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        lines.push(cells.join(" | ").trim_end().to_string());
    }

    for notification in &snapshot.notifications {
        let tag = match notification.intent {
            Intent::Success => "ok",
            Intent::Danger => "error",
        };
        lines.push(format!("[{}] {}", tag, notification.message));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Notification;
    use crate::state::Draft;
    use roster_client::UserRecord;

    fn snapshot(n: u64) -> ViewSnapshot {
        ViewSnapshot {
            users: (1..=n)
                .map(|i| UserRecord::new(i, format!("User {}", i), "u@x.io", "u.io"))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn table_has_one_line_per_user() {
        let out = render(&snapshot(10));
        let lines: Vec<&str> = out.lines().collect();

        // header, separator, 10 rows, separator, footer
        assert_eq!(lines.len(), 14);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].ends_with("Action"));
        assert!(lines[2].ends_with("commit, delete"));
        assert!(lines[13].starts_with("10"));
        assert!(lines[13].contains("<Enter Name>"));
        assert!(lines[13].ends_with("add"));
    }

    #[test]
    fn error_replaces_table() {
        let mut snap = snapshot(3);
        snap.error = Some("Server error (500): boom".into());

        assert_eq!(render(&snap), "Error fetching users: Server error (500): boom");
    }

    #[test]
    fn footer_shows_draft_values() {
        let mut snap = snapshot(1);
        snap.draft = Draft {
            name: "Ada".into(),
            email: String::new(),
            website: "ada.dev".into(),
        };

        let out = render(&snap);
        let footer = out.lines().last().unwrap();
        assert!(footer.contains("Ada"));
        assert!(footer.contains("<Enter Email>"));
        assert!(footer.contains("ada.dev"));
    }

    #[test]
    fn notifications_follow_table() {
        let mut snap = snapshot(1);
        snap.notifications.push(Notification::success("User updated Successfully"));

        let out = render(&snap);
        assert_eq!(out.lines().last().unwrap(), "[ok] User updated Successfully");
    }
}
