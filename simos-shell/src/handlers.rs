//! Per-command handlers. Each resolves its path argument through the session
//! before touching the filesystem and returns the text to print.

use simos_vfs::{EntryKind, Target, VfsError, VirtualPath};

use crate::banner::PRODUCT;
use crate::launcher::LaunchError;
use crate::session::Session;

impl Session {
    pub(crate) fn info(&self) -> String {
        format!(
            "{} Version {}\nRoot directory: {}",
            PRODUCT,
            self.config.version,
            self.fs.root().display()
        )
    }

    pub(crate) fn list(&self, path: Option<&str>) -> Result<String, VfsError> {
        let dir = path.map_or_else(|| self.cwd.clone(), |p| self.resolve(p));
        let entries = self.fs.read_dir(&dir)?;
        if entries.is_empty() {
            return Ok("Directory is empty".to_string());
        }

        let mut out = format!("Contents of {}:", dir);
        for entry in &entries {
            match entry.kind {
                EntryKind::Directory => out.push_str(&format!("\nd {}/", entry.name)),
                EntryKind::File { size } => {
                    out.push_str(&format!("\nf {} ({} bytes)", entry.name, size))
                }
            }
        }
        Ok(out)
    }

    pub(crate) fn change_dir(&mut self, path: Option<&str>) -> Result<String, VfsError> {
        let target = match path {
            Some(p) => self.resolve(p),
            None => VirtualPath::root(),
        };
        self.fs.ensure_dir(&target)?;
        tracing::debug!(from = %self.cwd, to = %target, "Changed directory");
        self.cwd = target;
        Ok(format!("Changed directory to: {}", self.cwd))
    }

    pub(crate) fn make_dir(&self, path: &str) -> Result<String, VfsError> {
        let target = self.resolve(path);
        self.fs.mkdir(&target)?;
        Ok(format!("Created directory: {}", target))
    }

    pub(crate) fn create(&self, path: &str, content: &str) -> Result<String, VfsError> {
        let target = self.resolve(path);
        self.fs.write_file(&target, content)?;
        Ok(format!("Created file: {}", target))
    }

    pub(crate) fn show(&self, path: &str) -> Result<String, VfsError> {
        let content = self.fs.read_file(&self.resolve(path))?;
        if content.is_empty() {
            return Ok("(empty file)".to_string());
        }
        Ok(content)
    }

    pub(crate) fn remove(&self, path: &str) -> Result<String, VfsError> {
        let target = self.resolve(path);
        let removed = match self.fs.remove(&target)? {
            Target::Directory => "directory",
            _ => "file",
        };
        Ok(format!("Removed {}: {}", removed, target))
    }

    pub(crate) fn truncate(&self, path: &str) -> Result<String, VfsError> {
        let target = self.resolve(path);
        self.fs.truncate(&target)?;
        Ok(format!("Truncated file: {}", target))
    }

    pub(crate) fn explorer(&self) -> Result<String, VfsError> {
        let real = self.fs.to_real(&self.cwd);
        match self.launcher.open(&real) {
            Ok(()) => Ok(format!("Opening {} in file explorer...", self.cwd)),
            Err(e @ LaunchError::Unsupported(_)) => Ok(e.to_string()),
            Err(e @ LaunchError::Spawn { .. }) => {
                tracing::warn!(error = %e, "Could not open file explorer");
                Ok(format!("Error: {}", e))
            }
        }
    }
}
