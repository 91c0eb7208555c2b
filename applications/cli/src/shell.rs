/// Interactive single-page loop over stdin
use crate::commands::resolve;
use crate::error::AppError;
use roster_view::{render, DraftField, EditableField, UserListViewModel, UsersApi};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  show                          print the page
  reload                        fetch the list again
  name|email|website <value>    fill a field of the add-user form
  add                           submit the add-user form
  set <id> email|website <value>  edit a field locally
  commit <id>                   send the edited row
  delete <id>                   delete a row
  help                          show this text
  quit                          leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Reload,
    Draft(DraftField, String),
    Add,
    Set(String, EditableField, String),
    Commit(String),
    Delete(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Field must be email or website, got {0}")]
    UnknownField(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word {
            "show" => Command::Show,
            "reload" => Command::Reload,
            "name" => Command::Draft(DraftField::Name, rest.to_string()),
            "email" => Command::Draft(DraftField::Email, rest.to_string()),
            "website" => Command::Draft(DraftField::Website, rest.to_string()),
            "add" => Command::Add,
            "set" => {
                let (id, rest) = split_arg(rest, "id")?;
                let (field, value) = split_arg(rest, "field")?;
                let field = match field {
                    "email" => EditableField::Email,
                    "website" => EditableField::Website,
                    other => return Err(ParseError::UnknownField(other.to_string())),
                };
                Command::Set(id.to_string(), field, value.to_string())
            }
            "commit" => Command::Commit(split_arg(rest, "id")?.0.to_string()),
            "delete" => Command::Delete(split_arg(rest, "id")?.0.to_string()),
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn split_arg<'a>(input: &'a str, name: &'static str) -> Result<(&'a str, &'a str), ParseError> {
    if input.is_empty() {
        return Err(ParseError::MissingArgument(name));
    }
    let (arg, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    Ok((arg, rest.trim_start()))
}

/// Run the shell until `quit` or end of input.
pub async fn run<A, R, W>(
    view: &UserListViewModel<A>,
    input: R,
    mut output: W,
) -> Result<(), AppError>
where
    A: UsersApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    if let Err(e) = view.load().await {
        debug!(error = %e, "Initial load failed");
    }
    write_page(view, &mut output).await?;

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                output.write_all(format!("{}\n", e).as_bytes()).await?;
                continue;
            }
        };

        let message = match command {
            Command::Quit => break,
            Command::Help => Some(HELP.to_string()),
            Command::Show => None,
            Command::Reload => view.load().await.err().map(|e| e.to_string()),
            Command::Draft(field, value) => {
                view.set_draft(field, value).await;
                None
            }
            Command::Add => match view.add_user().await {
                Ok(Some(user)) => Some(format!("Added user {}", user.id)),
                Ok(None) => Some("Name, email and website are all required".to_string()),
                Err(e) => Some(e.to_string()),
            },
            Command::Set(id, field, value) => {
                let id = resolve(view, &id).await;
                if view.on_change(&id, field, value).await {
                    None
                } else {
                    Some(format!("User not found: {}", id))
                }
            }
            Command::Commit(id) => {
                let id = resolve(view, &id).await;
                view.update_user(&id).await.err().map(|e| e.to_string())
            }
            Command::Delete(id) => {
                let id = resolve(view, &id).await;
                match view.delete_user(&id).await {
                    Ok(()) => Some(format!("Deleted user {}", id)),
                    Err(e) => Some(e.to_string()),
                }
            }
        };

        if let Some(message) = message {
            output.write_all(format!("{}\n", message).as_bytes()).await?;
        }
        write_page(view, &mut output).await?;
    }

    output.flush().await?;
    Ok(())
}

async fn write_page<A, W>(view: &UserListViewModel<A>, output: &mut W) -> std::io::Result<()>
where
    A: UsersApi,
    W: AsyncWrite + Unpin,
{
    let page = render(&view.snapshot().await);
    output.write_all(format!("{}\n", page).as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_draft_with_spaces() {
        assert_eq!(
            Command::parse("name  Ada Lovelace ").unwrap(),
            Some(Command::Draft(DraftField::Name, "Ada Lovelace".into()))
        );
    }

    #[test]
    fn parses_set_with_value() {
        assert_eq!(
            Command::parse("set 3 website hildegard.org").unwrap(),
            Some(Command::Set(
                "3".into(),
                EditableField::Website,
                "hildegard.org".into()
            ))
        );
    }

    #[test]
    fn rejects_editing_name() {
        assert_eq!(
            Command::parse("set 3 name Bob"),
            Err(ParseError::UnknownField("name".into()))
        );
    }

    #[test]
    fn commit_needs_an_id() {
        assert_eq!(
            Command::parse("commit"),
            Err(ParseError::MissingArgument("id"))
        );
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(matches!(
            Command::parse("frobnicate"),
            Err(ParseError::Unknown(_))
        ));
    }
}
