// ---------------------------------------------------------------------------
// Session controller: current directory plus the Normal/Editing state machine
// ---------------------------------------------------------------------------

use simos_vfs::{normalize, RootedFs, VfsError, VirtualPath};

use crate::command::{Command, ParseError};
use crate::editor::EditSession;
use crate::launcher::Launcher;

pub const EDIT_PROMPT: &str = "edit> ";
pub const TERMINATED: &str = "SiMOS terminated.";

// ── Configuration ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub prompt_name: String,
    pub version: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt_name: "simos".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// ── State ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum Mode {
    Normal,
    Editing(EditSession),
}

/// What feeding one input line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print. Empty means print nothing.
    Text(String),
    ClearScreen,
    /// Print the message and stop reading input.
    Exit(String),
}

impl Reply {
    fn silent() -> Self {
        Self::Text(String::new())
    }
}

pub struct Session {
    pub(crate) fs: RootedFs,
    pub(crate) cwd: VirtualPath,
    pub(crate) mode: Mode,
    pub(crate) config: ShellConfig,
    pub(crate) launcher: Box<dyn Launcher>,
}

impl Session {
    pub fn new(fs: RootedFs, config: ShellConfig, launcher: Box<dyn Launcher>) -> Self {
        Self {
            fs,
            cwd: VirtualPath::root(),
            mode: Mode::Normal,
            config,
            launcher,
        }
    }

    pub fn cwd(&self) -> &VirtualPath {
        &self.cwd
    }

    pub fn fs(&self) -> &RootedFs {
        &self.fs
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    pub fn prompt(&self) -> String {
        match self.mode {
            Mode::Normal => format!("{}:{}> ", self.config.prompt_name, self.cwd),
            Mode::Editing(_) => EDIT_PROMPT.to_string(),
        }
    }

    /// Resolve a user-supplied path against the current directory.
    pub(crate) fn resolve(&self, input: &str) -> VirtualPath {
        let resolved = normalize(input, &self.cwd);
        tracing::trace!(input, cwd = %self.cwd, resolved = %resolved, "Resolved path");
        resolved
    }

    // -- Line routing -----------------------------------------------------

    /// Route one input line according to the current mode.
    pub fn feed(&mut self, line: &str) -> Reply {
        match self.mode {
            Mode::Normal => self.feed_command(line),
            Mode::Editing(_) => self.feed_edit(line),
        }
    }

    fn feed_command(&mut self, line: &str) -> Reply {
        let cmd = match Command::parse(line.trim()) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Reply::silent(),
            Err(e @ ParseError::Unknown(_)) => return Reply::Text(e.to_string()),
            Err(e @ ParseError::MissingArgument { .. }) => {
                return Reply::Text(format!("Error: {}", e));
            }
        };

        tracing::debug!(?cmd, cwd = %self.cwd, "Dispatching command");
        match self.dispatch(cmd) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!(kind = ?e.kind(), code = e.code(), error = %e, "Command failed");
                Reply::Text(format!("Error: {}", e))
            }
        }
    }

    fn feed_edit(&mut self, line: &str) -> Reply {
        if !EditSession::is_sentinel(line) {
            if let Mode::Editing(editor) = &mut self.mode {
                editor.push(line);
            }
            return Reply::silent();
        }

        let Mode::Editing(editor) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return Reply::silent();
        };
        let target = editor.target().clone();
        match editor.save(&self.fs) {
            Ok(msg) => Reply::Text(msg),
            Err(e) => {
                tracing::error!(path = %target, error = %e, "Failed to save edited file");
                Reply::Text(format!("Error: Failed to save file: {}", e))
            }
        }
    }

    // -- Dispatch ---------------------------------------------------------

    fn dispatch(&mut self, cmd: Command) -> Result<Reply, VfsError> {
        let text = match cmd {
            Command::Help => crate::command::HELP.to_string(),
            Command::Info => self.info(),
            Command::Clear => return Ok(Reply::ClearScreen),
            Command::Exit => return Ok(Reply::Exit(TERMINATED.to_string())),
            Command::List { path } => self.list(path.as_deref())?,
            Command::ChangeDir { path } => self.change_dir(path.as_deref())?,
            Command::PrintDir => self.cwd.to_string(),
            Command::MakeDir { path } => self.make_dir(&path)?,
            Command::Create { path, content } => self.create(&path, &content)?,
            Command::Show { path } => self.show(&path)?,
            Command::Edit { path } => self.edit(&path)?,
            Command::Remove { path } => self.remove(&path)?,
            Command::Truncate { path } => self.truncate(&path)?,
            Command::Explorer => self.explorer()?,
        };
        Ok(Reply::Text(text))
    }

    /// Enter edit mode on `path`.
    fn edit(&mut self, path: &str) -> Result<String, VfsError> {
        let target = self.resolve(path);
        let (editor, preamble) = EditSession::open(&self.fs, target)?;
        self.mode = Mode::Editing(editor);
        Ok(preamble)
    }
}
