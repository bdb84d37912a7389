pub mod banner;
pub mod command;
pub mod config;
pub mod editor;
mod handlers;
pub mod launcher;
pub mod repl;
pub mod session;

pub use command::{Command, ParseError};
pub use session::{Mode, Reply, Session, ShellConfig};
