//! Line-oriented console for the headless host.
//!
//! Each stdin line is one command:
//!
//! | Command                 | Effect                                             |
//! |-------------------------|----------------------------------------------------|
//! | `show`                  | print the document the next flush would write      |
//! | `set <path> <value>`    | apply one option, e.g. `set fonts.main "Inter"`    |
//! | `boost <level or name>` | pick a network boost level (0-3, or a label)       |
//! | `flush`                 | write the custom document now if a write is pending|
//! | `help`                  | list commands                                      |
//! | `quit`                  | flush and exit                                     |
//!
//! `<value>` is parsed as JSON; anything that is not valid JSON is taken as a
//! plain string so `set fonts.main Inter` works without quotes.

use kotato_settings_core::{custom_document, find_field, render_document, FieldOutcome, NetBoost};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::application::lifecycle::SettingsService;
use crate::application::settings_manager::SettingsStorage;

pub const HELP: &str = "\
commands:
  show                  print current settings
  set <path> <value>    change one setting (value is JSON or a bare string)
  boost <0-3|name>      set network boost (default, slight, medium, big)
  flush                 save pending changes now
  quit                  save and exit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Set { path: String, value: Value },
    Boost(NetBoost),
    Flush,
    Help,
    Quit,
}

/// Error type for console input.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("unknown boost level '{0}'")]
    InvalidBoost(String),
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text for the user, if any.
    pub output: Option<String>,
    /// The host loop should stop.
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            quit: false,
        }
    }

    fn silent() -> Self {
        Self {
            output: None,
            quit: false,
        }
    }
}

/// Parses one input line.  Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands, unknown settings, missing
/// arguments and unrecognized boost levels.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "show" => Command::Show,
        "flush" => Command::Flush,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "set" => {
            let (path, raw) = match rest.split_once(char::is_whitespace) {
                Some((path, raw)) => (path, raw.trim()),
                None if rest.is_empty() => return Err(CommandError::MissingArgument("setting path")),
                None => return Err(CommandError::MissingArgument("value")),
            };
            if find_field(path).is_none() {
                return Err(CommandError::UnknownSetting(path.to_string()));
            }
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            Command::Set {
                path: path.to_string(),
                value,
            }
        }
        "boost" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("boost level"));
            }
            Command::Boost(parse_boost(rest)?)
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Accepts a level number, a label (`Slight`) or a document name (`low`).
fn parse_boost(input: &str) -> Result<NetBoost, CommandError> {
    if let Ok(level) = input.parse::<i64>() {
        return match level {
            0..=3 => Ok(NetBoost::from_level(level)),
            _ => Err(CommandError::InvalidBoost(input.to_string())),
        };
    }
    let lowered = input.to_ascii_lowercase();
    if let Some(boost) = NetBoost::ALL
        .into_iter()
        .find(|boost| boost.label().eq_ignore_ascii_case(&lowered))
    {
        return Ok(boost);
    }
    match lowered.as_str() {
        "low" | "high" => Ok(NetBoost::from_name(&lowered)),
        _ => Err(CommandError::InvalidBoost(input.to_string())),
    }
}

/// Executes `command` against a started service.
pub fn execute<S: SettingsStorage>(command: Command, service: &mut SettingsService<S>) -> Reply {
    if command == Command::Quit {
        return Reply {
            output: None,
            quit: true,
        };
    }
    if command == Command::Help {
        return Reply::text(HELP);
    }
    let Some(manager) = service.manager_mut() else {
        return Reply::text("settings are not loaded");
    };

    match command {
        Command::Show => match render_document("", &custom_document(manager.state())) {
            Ok(text) => Reply::text(text.trim_end()),
            Err(e) => Reply::text(format!("could not render settings: {e}")),
        },
        Command::Set { path, value } => match manager.set_option(&path, value) {
            FieldOutcome::Applied => Reply::text(format!("{path} updated")),
            FieldOutcome::Rejected => Reply::text(format!("{path}: value rejected")),
            FieldOutcome::Absent => Reply::text(format!("unknown setting '{path}'")),
        },
        Command::Boost(boost) => {
            if manager.state().net_boost() == boost {
                return Reply::text(format!("network boost already {boost}"));
            }
            manager.update(|state| state.set_net_boost(boost));
            info!("network boost set to {boost}; restart required to apply");
            Reply::text(format!("network boost: {boost} (restart to apply)"))
        }
        Command::Flush => {
            if manager.is_write_pending() {
                manager.finish();
                Reply::text("saved")
            } else {
                Reply::text("nothing to save")
            }
        }
        Command::Help | Command::Quit => Reply::silent(),
    }
}
