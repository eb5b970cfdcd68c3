//! The in-page command line: `help`, `ls`, `open <name>` and `clear`.
//!
//! Interpretation is pure. It reports what should happen to the transcript
//! and the selection and leaves applying it to the reducer. Nothing here can
//! fail; unknown input is an ordinary outcome with its own output lines.

use tracing::debug;

use crate::content::ContentStore;

pub const HELP_LINES: [&str; 7] = [
    "Available commands:",
    "  help - Show this help message",
    "  ls - List all available files",
    "  open <filename> - Open a specific file",
    "  clear - Clear the terminal",
    "",
    "💡 Tip: You can also click on files in the left panel!",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    List,
    Open(String),
    Clear,
    Unknown(String),
}

impl Command {
    /// Trims and lowercases `raw` before matching against the fixed command set.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "" => Self::Empty,
            "help" => Self::Help,
            "ls" => Self::List,
            "clear" => Self::Clear,
            other => match other.strip_prefix("open ") {
                Some(name) if !name.trim().is_empty() => Self::Open(name.trim().to_string()),
                _ => Self::Unknown(normalized),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Help => "help",
            Self::List => "ls",
            Self::Open(_) => "open",
            Self::Clear => "clear",
            Self::Unknown(_) => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEdit {
    Nothing,
    Append(Vec<String>),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub command: Command,
    pub edit: TranscriptEdit,
    /// Id of the file to select, when the command opened one.
    pub selection: Option<String>,
}

pub fn interpret(raw: &str, store: &ContentStore) -> Interpretation {
    let command = Command::parse(raw);
    let (edit, selection) = match &command {
        Command::Empty => (TranscriptEdit::Nothing, None),
        Command::Help => (
            TranscriptEdit::Append(HELP_LINES.iter().map(|line| line.to_string()).collect()),
            None,
        ),
        Command::List => (TranscriptEdit::Append(list_lines(store)), None),
        Command::Clear => (TranscriptEdit::Clear, None),
        Command::Open(name) => match store.find_by_name(name) {
            Some(file) => (
                TranscriptEdit::Append(vec![format!("✓ Opened: {}", file.name)]),
                Some(file.id.clone()),
            ),
            None => (TranscriptEdit::Append(not_found_lines(name)), None),
        },
        Command::Unknown(text) => (TranscriptEdit::Append(unknown_lines(text)), None),
    };
    debug!(command = command.label(), selected = ?selection, "interpreted command");
    Interpretation {
        command,
        edit,
        selection,
    }
}

pub fn list_lines(store: &ContentStore) -> Vec<String> {
    store
        .iter()
        .map(|file| format!("{} {} - {}", file.icon, file.name, file.display_name))
        .collect()
}

fn not_found_lines(name: &str) -> Vec<String> {
    vec![
        format!("❌ Error: File \"{name}\" not found"),
        "😅 Not a valid file! Try clicking on a file on the left.".to_string(),
        "💡 Hint: Type \"ls\" to see all available files".to_string(),
    ]
}

fn unknown_lines(command: &str) -> Vec<String> {
    vec![
        format!("❌ Command not found: {command}"),
        "😅 Not a valid command! Try clicking on a file on the left.".to_string(),
        "💡 Type \"help\" to see available commands".to_string(),
    ]
}

/// Line appended when a file is opened from the sidebar rather than typed.
pub fn sidebar_open_line(name: &str) -> String {
    format!("> Opened file: {name}")
}
