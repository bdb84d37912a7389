use thiserror::Error;

// ── Command set ─────────────────────────────────────────────────────────────

/// Every command the shell understands, with its arguments already split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Info,
    Clear,
    Exit,
    List { path: Option<String> },
    ChangeDir { path: Option<String> },
    PrintDir,
    MakeDir { path: String },
    Create { path: String, content: String },
    Show { path: String },
    Edit { path: String },
    Remove { path: String },
    Truncate { path: String },
    Explorer,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing {what}. Usage: {usage}")]
    MissingArgument {
        what: &'static str,
        usage: &'static str,
    },
}

// ── Parsing ─────────────────────────────────────────────────────────────────

fn required(
    arg: Option<&str>,
    what: &'static str,
    usage: &'static str,
) -> Result<String, ParseError> {
    arg.map(str::to_string)
        .ok_or(ParseError::MissingArgument { what, usage })
}

impl Command {
    /// Parse one input line. Returns `Ok(None)` for a blank line.
    ///
    /// The command token is case-insensitive; arguments are split on
    /// whitespace and kept verbatim.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let name = name.to_lowercase();
        let args: Vec<&str> = tokens.collect();
        let first = args.first().copied();

        let cmd = match name.as_str() {
            "help" => Command::Help,
            "info" => Command::Info,
            "clear" | "cls" => Command::Clear,
            "exit" | "quit" => Command::Exit,
            "ls" => Command::List {
                path: first.map(str::to_string),
            },
            "cd" => Command::ChangeDir {
                path: first.map(str::to_string),
            },
            "pwd" => Command::PrintDir,
            "mkdir" => Command::MakeDir {
                path: required(first, "directory path", "mkdir <path>")?,
            },
            "create" | "touch" => Command::Create {
                path: required(first, "file path", "create <path> [content]")?,
                content: args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default(),
            },
            "show" | "cat" => Command::Show {
                path: required(first, "file path", "show <path>")?,
            },
            "edit" => Command::Edit {
                path: required(first, "file path", "edit <path>")?,
            },
            "erase" | "rm" => Command::Remove {
                path: required(first, "path", "erase <path>")?,
            },
            "trunct" => Command::Truncate {
                path: required(first, "file path", "trunct <path>")?,
            },
            "explorer" => Command::Explorer,
            _ => return Err(ParseError::Unknown(name)),
        };
        Ok(Some(cmd))
    }
}

pub const HELP: &str = "
Available commands:

System:
  help             - Show this help message
  exit, quit       - Exit SiMOS
  info             - Show system information
  clear, cls       - Clear the screen

File operations:
  create <path> [content] - Create a new file with optional content (alias: touch)
  show <path>      - Display file contents (alias: cat)
  edit <path>      - Edit file with simple editor (type EOF to save and exit)
  erase <path>     - Remove file or directory (alias: rm)
  trunct <path>    - Truncate file (empty its contents)

Directory operations:
  ls [path]        - List directory contents
  cd [path]        - Change directory
  pwd              - Print working directory
  mkdir <path>     - Create directory
  explorer         - Open current directory in file explorer
";
