//! Command-line commands and their documentation.

use crate::app::AppError;
use serde_json::Value;
use tabdeck_core::WidgetId;

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Types,
    Show(WidgetId),
    Add(String),
    Remove(WidgetId),
    Move { id: WidgetId, x: f64, y: f64 },
    Unplace(WidgetId),
    Resize { id: WidgetId, width: f64, height: f64 },
    Set { id: WidgetId, key: String, value: Value },
    Theme { id: WidgetId, key: String, value: Value },
    Reset,
    Lock,
    Unlock,
    Locale(String),
    Grid { columns: u32, spacing: f64 },
    Settings,
    Export,
    Help,
}

fn usage(name: &str) -> AppError {
    let help = CommandRegistry::all()
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.usage)
        .unwrap_or(name);
    AppError::Usage(format!("usage: tabdeck {}", help))
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, AppError> {
    args.get(index).map(String::as_str).ok_or_else(|| usage(name))
}

fn number<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> Result<T, AppError> {
    let raw = arg(args, index, name)?;
    raw.parse()
        .map_err(|_| AppError::Invalid(format!("{:?} is not a number", raw)))
}

/// Parse a JSON value, treating anything that isn't JSON as a plain string.
fn json_or_string(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

impl Command {
    /// Parse the arguments following the program name.
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        let Some(name) = args.first() else {
            return Ok(Command::Help);
        };

        let command = match name.as_str() {
            "list" => Command::List,
            "types" => Command::Types,
            "show" => Command::Show(number(args, 1, name)?),
            "add" => Command::Add(arg(args, 1, name)?.to_string()),
            "remove" => Command::Remove(number(args, 1, name)?),
            "move" => Command::Move {
                id: number(args, 1, name)?,
                x: number(args, 2, name)?,
                y: number(args, 3, name)?,
            },
            "unplace" => Command::Unplace(number(args, 1, name)?),
            "resize" => Command::Resize {
                id: number(args, 1, name)?,
                width: number(args, 2, name)?,
                height: number(args, 3, name)?,
            },
            "set" => Command::Set {
                id: number(args, 1, name)?,
                key: arg(args, 2, name)?.to_string(),
                value: json_or_string(arg(args, 3, name)?),
            },
            "theme" => Command::Theme {
                id: number(args, 1, name)?,
                key: arg(args, 2, name)?.to_string(),
                value: json_or_string(arg(args, 3, name)?),
            },
            "reset" => Command::Reset,
            "lock" => Command::Lock,
            "unlock" => Command::Unlock,
            "locale" => Command::Locale(arg(args, 1, name)?.to_string()),
            "grid" => Command::Grid {
                columns: number(args, 1, name)?,
                spacing: number(args, 2, name)?,
            },
            "settings" => Command::Settings,
            "export" => Command::Export,
            "help" | "--help" | "-h" => Command::Help,
            other => {
                return Err(AppError::Usage(format!(
                    "unknown command {:?}, see `tabdeck help`",
                    other
                )));
            }
        };
        Ok(command)
    }
}

/// Documentation for one command.
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandHelp {
    pub const fn new(name: &'static str, usage: &'static str, description: &'static str) -> Self {
        Self {
            name,
            usage,
            description,
        }
    }
}

/// Registry of all commands.
pub struct CommandRegistry;

impl CommandRegistry {
    /// Get all commands.
    pub fn all() -> Vec<CommandHelp> {
        vec![
            CommandHelp::new("list", "list", "List widgets on the dashboard"),
            CommandHelp::new("types", "types", "List widget types that can be added"),
            CommandHelp::new("show", "show <id>", "Show a widget's settings"),
            CommandHelp::new("add", "add <type>", "Add a widget"),
            CommandHelp::new("remove", "remove <id>", "Remove a widget"),
            CommandHelp::new("move", "move <id> <x> <y>", "Pin a widget to a grid position"),
            CommandHelp::new("unplace", "unplace <id>", "Let the grid place a widget"),
            CommandHelp::new("resize", "resize <id> <w> <h>", "Resize a widget"),
            CommandHelp::new("set", "set <id> <key> <json>", "Change a widget setting"),
            CommandHelp::new("theme", "theme <id> <key> <json>", "Change a widget theme setting"),
            CommandHelp::new("reset", "reset", "Replace all widgets with the default dashboard"),
            CommandHelp::new("lock", "lock", "Lock the dashboard layout"),
            CommandHelp::new("unlock", "unlock", "Unlock the dashboard layout"),
            CommandHelp::new("locale", "locale <code>", "Set the dashboard language"),
            CommandHelp::new("grid", "grid <columns> <spacing>", "Set the layout grid"),
            CommandHelp::new("settings", "settings", "Show dashboard settings"),
            CommandHelp::new("export", "export", "Print everything in storage as JSON"),
            CommandHelp::new("help", "help", "Show this help"),
        ]
    }

    /// Format the help text.
    pub fn help_text() -> String {
        let mut text = String::from("usage: tabdeck <command> [args]\n\ncommands:\n");
        for command in Self::all() {
            text.push_str(&format!("  {:26} {}\n", command.usage, command.description));
        }
        text
    }
}
