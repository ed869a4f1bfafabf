//! # Console Shell
//!
//! Line-oriented front end over the [`commands`](crate::commands). It parses
//! one command per line, calls the matching command and renders the outcome.
//! It makes no decisions of its own.
//!
//! ## Line Protocol
//! ```text
//! list | items                     every item
//! find <id>                        one item
//! borrow <id>                      anonymous borrow
//! return <id>                      return (releases the holding member)
//! add-book <id> <title...>         register a book
//! add-magazine <id> <issue...>     register a magazine
//! add-user <name...> <kind>        register Faculty / Student / Guest
//! users                            every member
//! checkout <user...> <id>          borrow for a member
//! config                           current configuration
//! help                             this list
//! quit | exit                      leave
//! ```
//!
//! Blank lines and lines starting with `#` are ignored, so a catalog script
//! can be piped in.

use std::future::Future;
use std::io;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands::{self, item::ItemDto, member::UserDto};
use crate::error::ApiError;
use crate::state::{ConfigState, LibraryState, OutputFormat};
use libris_core::{BorrowReceipt, ReturnReceipt};

const HELP: &str = "\
Commands:
  list                          list every item
  find <id>                     show one item
  borrow <id>                   borrow an item
  return <id>                   return an item
  add-book <id> <title>         add a book
  add-magazine <id> <issue>     add a magazine
  add-user <name> <kind>        add a user (Faculty, Student or Guest)
  users                         list every user
  checkout <user> <id>          borrow an item for a user
  config                        show configuration
  help                          show this help
  quit                          exit";

// =============================================================================
// Parsing
// =============================================================================

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    ListItems,
    FindItem { id: String },
    Borrow { id: String },
    Return { id: String },
    AddBook { id: String, title: String },
    AddMagazine { id: String, issue: String },
    AddUser { name: String, kind: String },
    ListUsers,
    Checkout { user: String, item_id: String },
    Config,
    Help,
    Quit,
}

/// Parses one line. `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match (verb.as_str(), args.as_slice()) {
        ("list" | "items", []) => ShellCommand::ListItems,
        ("find", [id]) => ShellCommand::FindItem { id: id.to_string() },
        ("borrow", [id]) => ShellCommand::Borrow { id: id.to_string() },
        ("return", [id]) => ShellCommand::Return { id: id.to_string() },
        ("add-book", [id, title @ ..]) if !title.is_empty() => ShellCommand::AddBook {
            id: id.to_string(),
            title: title.join(" "),
        },
        ("add-magazine", [id, issue @ ..]) if !issue.is_empty() => ShellCommand::AddMagazine {
            id: id.to_string(),
            issue: issue.join(" "),
        },
        ("add-user", [name @ .., kind]) if !name.is_empty() => ShellCommand::AddUser {
            name: name.join(" "),
            kind: kind.to_string(),
        },
        ("users", []) => ShellCommand::ListUsers,
        ("checkout", [user @ .., item_id]) if !user.is_empty() => ShellCommand::Checkout {
            user: user.join(" "),
            item_id: item_id.to_string(),
        },
        ("config", []) => ShellCommand::Config,
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        (verb, _) => return Err(usage_error(verb)),
    };

    Ok(Some(command))
}

fn usage_error(verb: &str) -> ApiError {
    let usage = match verb {
        "list" | "items" => "list",
        "find" => "find <id>",
        "borrow" => "borrow <id>",
        "return" => "return <id>",
        "add-book" => "add-book <id> <title>",
        "add-magazine" => "add-magazine <id> <issue>",
        "add-user" => "add-user <name> <kind>",
        "users" => "users",
        "checkout" => "checkout <user> <id>",
        "config" => "config",
        "quit" | "exit" => "quit",
        other => {
            return ApiError::unknown_command(format!(
                "Unknown command: {}. Type 'help' for commands.",
                other
            ))
        }
    };
    ApiError::validation(format!("Usage: {}", usage))
}

// =============================================================================
// Responses
// =============================================================================

/// The outcome of one shell line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Response {
    Items(Vec<String>),
    Item(ItemDto),
    ItemAdded(ItemDto),
    Borrowed(BorrowReceipt),
    Returned(ReturnReceipt),
    UserAdded(UserDto),
    Users(Vec<UserDto>),
    Config(ConfigState),
    Help(String),
    Goodbye,
    Error(ApiError),
}

impl<T> From<Result<T, ApiError>> for Response
where
    T: Into<Response>,
{
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => value.into(),
            Err(err) => Response::Error(err),
        }
    }
}

impl From<BorrowReceipt> for Response {
    fn from(receipt: BorrowReceipt) -> Self {
        Response::Borrowed(receipt)
    }
}

impl From<ReturnReceipt> for Response {
    fn from(receipt: ReturnReceipt) -> Self {
        Response::Returned(receipt)
    }
}

impl From<UserDto> for Response {
    fn from(user: UserDto) -> Self {
        Response::UserAdded(user)
    }
}

/// Human-readable form of a response.
pub fn render_text(response: &Response) -> String {
    match response {
        Response::Items(lines) if lines.is_empty() => "No items in the library.".to_string(),
        Response::Items(lines) => lines.join("\n"),
        Response::Item(item) => item.display.clone(),
        Response::ItemAdded(item) => match item.kind.as_str() {
            "magazine" => "Magazine added successfully.".to_string(),
            _ => "Book added successfully.".to_string(),
        },
        Response::Borrowed(receipt) => match &receipt.borrower {
            Some(user) => format!(
                "Item {} checked out to {}. Due Date: {}",
                receipt.item_id, user, receipt.due_date
            ),
            None => format!("Item borrowed successfully. Due Date: {}", receipt.due_date),
        },
        Response::Returned(receipt) => match &receipt.returned_by {
            Some(user) => format!("Item returned successfully. Released from {}.", user),
            None => "Item returned successfully.".to_string(),
        },
        Response::UserAdded(user) => format!(
            "User added successfully: {} ({}, limit {})",
            user.name, user.kind, user.borrowing_limit
        ),
        Response::Users(users) if users.is_empty() => "No users registered.".to_string(),
        Response::Users(users) => users
            .iter()
            .map(|user| {
                format!(
                    "{} ({}) - {}/{} items",
                    user.name, user.kind, user.borrowed_count, user.borrowing_limit
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Response::Config(config) => format!(
            "Library: {}\nOutput: {}\nConfig file: {}",
            config.library_name,
            config.output,
            config
                .config_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        ),
        Response::Help(text) => text.clone(),
        Response::Goodbye => "Goodbye.".to_string(),
        Response::Error(err) => format!("Error: {}", err.message),
    }
}

// =============================================================================
// Shell
// =============================================================================

/// The console front end.
#[derive(Debug, Clone)]
pub struct Shell {
    state: LibraryState,
    config: ConfigState,
}

impl Shell {
    pub fn new(state: LibraryState, config: ConfigState) -> Self {
        Shell { state, config }
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// Runs one command against the state.
    pub fn execute(&self, command: ShellCommand) -> Response {
        let state = &self.state;
        match command {
            ShellCommand::ListItems => Response::Items(commands::item::list_items(state)),
            ShellCommand::FindItem { id } => {
                commands::item::find_item(state, &id).map(Response::Item).into()
            }
            ShellCommand::Borrow { id } => commands::item::borrow_by_id(state, &id).into(),
            ShellCommand::Return { id } => commands::item::return_by_id(state, &id).into(),
            ShellCommand::AddBook { id, title } => commands::item::add_book(state, &id, &title)
                .map(Response::ItemAdded)
                .into(),
            ShellCommand::AddMagazine { id, issue } => {
                commands::item::add_magazine(state, &id, &issue)
                    .map(Response::ItemAdded)
                    .into()
            }
            ShellCommand::AddUser { name, kind } => {
                commands::member::add_user(state, &name, &kind).into()
            }
            ShellCommand::ListUsers => Response::Users(commands::member::list_users(state)),
            ShellCommand::Checkout { user, item_id } => {
                commands::member::checkout(state, &user, &item_id).into()
            }
            ShellCommand::Config => Response::Config(commands::config::get_config(&self.config)),
            ShellCommand::Help => Response::Help(HELP.to_string()),
            ShellCommand::Quit => Response::Goodbye,
        }
    }

    /// Parses and executes one line. `None` for blank lines and comments.
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        match parse_line(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(err) => Some(Response::Error(err)),
        }
    }

    /// Renders a response in the configured output format.
    pub fn render(&self, response: &Response) -> io::Result<String> {
        match self.config.output {
            OutputFormat::Text => Ok(render_text(response)),
            OutputFormat::Json => serde_json::to_string(response).map_err(io::Error::other),
        }
    }

    /// Reads lines until EOF, `quit`, or `shutdown` resolves.
    pub async fn run<R, W, S>(&self, reader: R, mut writer: W, shutdown: S) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        let mut lines = reader.lines();
        tokio::pin!(shutdown);

        if self.config.output == OutputFormat::Text {
            let banner = format!("{}: type 'help' for commands\n", self.config.library_name);
            writer.write_all(banner.as_bytes()).await?;
            writer.flush().await?;
        }

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            };

            let Some(line) = line else {
                debug!("End of input");
                break;
            };

            let Some(response) = self.handle_line(&line) else {
                continue;
            };

            let mut out = self.render(&response)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;

            if matches!(response, Response::Goodbye) {
                break;
            }
        }

        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Clock;
    use chrono::NaiveDate;
    use libris_core::Registry;
    use tokio::io::BufReader;

    fn test_shell(output: OutputFormat) -> Shell {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let state = LibraryState::with_clock(Registry::new(), Clock::Fixed(today));
        let config = ConfigState {
            library_name: "Test Library".to_string(),
            output,
            ..ConfigState::default()
        };
        Shell::new(state, config)
    }

    async fn run_script(shell: &Shell, script: &str) -> Vec<String> {
        let mut out = Vec::new();
        shell
            .run(script.as_bytes(), &mut out, std::future::pending::<()>())
            .await
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("LIST").unwrap(), Some(ShellCommand::ListItems));
        assert_eq!(
            parse_line("add-book B1 The Left Hand of Darkness").unwrap(),
            Some(ShellCommand::AddBook {
                id: "B1".to_string(),
                title: "The Left Hand of Darkness".to_string(),
            })
        );
        assert_eq!(
            parse_line("add-user Mary Jane student").unwrap(),
            Some(ShellCommand::AddUser {
                name: "Mary Jane".to_string(),
                kind: "student".to_string(),
            })
        );
        assert_eq!(
            parse_line("checkout Mary Jane B1").unwrap(),
            Some(ShellCommand::Checkout {
                user: "Mary Jane".to_string(),
                item_id: "B1".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_blank_and_comment() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# seed data").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_line("borrow").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Usage: borrow <id>");

        let err = parse_line("add-book B1").unwrap_err();
        assert_eq!(err.message, "Usage: add-book <id> <title>");

        let err = parse_line("dance").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }

    #[tokio::test]
    async fn test_text_session() {
        let shell = test_shell(OutputFormat::Text);
        let output = run_script(
            &shell,
            "list\nadd-book B1 Dune\nborrow b1\nborrow B1\nreturn B1\nreturn B1\nquit\nlist\n",
        )
        .await;

        assert_eq!(
            output,
            vec![
                "Test Library: type 'help' for commands",
                "No items in the library.",
                "Book added successfully.",
                "Item borrowed successfully. Due Date: 2024-01-29",
                "Error: Item is not available: B1",
                "Item returned successfully.",
                "Error: Item is already available: B1",
                "Goodbye.",
            ]
        );
    }

    #[tokio::test]
    async fn test_guest_session() {
        let shell = test_shell(OutputFormat::Text);
        let output = run_script(
            &shell,
            "add-user Alice guest\nadd-magazine M1 Spring 2024\nadd-book B1 Dune\n\
             checkout alice M1\ncheckout Alice B1\nusers\nadd-user Bob Alien\n",
        )
        .await;

        assert_eq!(
            &output[1..],
            &[
                "User added successfully: Alice (Guest, limit 1)",
                "Magazine added successfully.",
                "Book added successfully.",
                "Item M1 checked out to Alice. Due Date: 2024-01-15",
                "Error: Borrowing limit reached or item unavailable",
                "Alice (Guest) - 1/1 items",
                "Error: Invalid user type: Alien (expected Faculty, Student or Guest)",
            ]
        );
    }

    #[tokio::test]
    async fn test_json_session() {
        let shell = test_shell(OutputFormat::Json);
        let output = run_script(&shell, "add-book B1 Dune\nborrow B1\nadd-user Bob Alien\n").await;

        assert_eq!(output.len(), 3);
        let added: serde_json::Value = serde_json::from_str(&output[0]).unwrap();
        assert_eq!(added["type"], "itemAdded");
        assert_eq!(added["data"]["id"], "B1");

        let borrowed: serde_json::Value = serde_json::from_str(&output[1]).unwrap();
        assert_eq!(borrowed["type"], "borrowed");
        assert_eq!(borrowed["data"]["dueDate"], "2024-01-29");

        let error: serde_json::Value = serde_json::from_str(&output[2]).unwrap();
        assert_eq!(error["type"], "error");
        assert_eq!(error["data"]["code"], "INVALID_USER_KIND");
    }

    #[tokio::test]
    async fn test_shutdown_stops_waiting_for_input() {
        let shell = test_shell(OutputFormat::Json);
        // Keep the writing half alive so the reader never reaches EOF.
        let (_client, server) = tokio::io::duplex(64);
        let mut out = Vec::new();

        shell
            .run(BufReader::new(server), &mut out, async {})
            .await
            .unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn test_render_items() {
        let shell = test_shell(OutputFormat::Text);
        shell.handle_line("add-book B1 Dune");
        shell.handle_line("add-magazine M1 42");

        let response = shell.handle_line("list").unwrap();
        assert_eq!(
            render_text(&response),
            "Book - Dune, ID: B1, Available: true\nMagazine - Issue: 42, ID: M1, Available: true"
        );
    }
}
