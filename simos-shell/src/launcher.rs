use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Unsupported platform: {0}")]
    Unsupported(String),
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Opens a real directory in the desktop's file manager.
pub trait Launcher {
    fn open(&self, dir: &Path) -> Result<(), LaunchError>;
}

/// Shells out to the platform's file manager and does not wait for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    fn program() -> Option<&'static str> {
        if cfg!(target_os = "windows") {
            Some("explorer")
        } else if cfg!(target_os = "macos") {
            Some("open")
        } else if cfg!(target_os = "linux") {
            Some("xdg-open")
        } else {
            None
        }
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, dir: &Path) -> Result<(), LaunchError> {
        let program = Self::program()
            .ok_or_else(|| LaunchError::Unsupported(std::env::consts::OS.to_string()))?;
        tracing::debug!(program, dir = %dir.display(), "Launching file explorer");
        Command::new(program)
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn { program, source })?;
        Ok(())
    }
}
