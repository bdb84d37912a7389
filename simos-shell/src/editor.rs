use simos_vfs::{RootedFs, VfsError, VirtualPath};

/// Line that ends an edit and saves the buffer. Compared after trimming.
pub const SENTINEL: &str = "EOF";

const RULE: &str = "----------------------------------------------------------";

/// Line buffer for a file being edited.
#[derive(Debug)]
pub struct EditSession {
    target: VirtualPath,
    lines: Vec<String>,
}

impl EditSession {
    /// Start editing `target`, seeding the buffer with the current content of
    /// the file when there is one. Returns the session and the text to show
    /// the user before the first `edit>` prompt.
    pub fn open(fs: &RootedFs, target: VirtualPath) -> Result<(Self, String), VfsError> {
        if fs.is_dir(&target) {
            return Err(VfsError::NotAFile(target.to_string()));
        }
        fs.create_parents(&target)?;

        let mut preamble = String::new();
        let mut lines = Vec::new();
        if fs.exists(&target) {
            match fs.read_file(&target) {
                Ok(content) => {
                    preamble.push_str("Current content:\n");
                    preamble.push_str(&content);
                    preamble.push('\n');
                    if !content.is_empty() {
                        lines = content.split('\n').map(str::to_string).collect();
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %target, error = %e, "Could not read file for editing");
                    preamble.push_str(&format!("Could not read file: {}\n", e));
                    preamble.push_str("Starting with empty file.\n");
                }
            }
        } else {
            preamble.push_str("New file. Enter content below:\n");
        }
        preamble.push_str(&format!(
            "\nEnter content line by line. Type \"{}\" on a new line to save and exit:\n{}",
            SENTINEL, RULE
        ));

        tracing::debug!(path = %target, seeded = lines.len(), "Entering edit mode");
        Ok((Self { target, lines }, preamble))
    }

    pub fn target(&self) -> &VirtualPath {
        &self.target
    }

    pub fn is_sentinel(line: &str) -> bool {
        line.trim() == SENTINEL
    }

    /// Append a content line exactly as typed.
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the buffer over the target file and return the closing message.
    pub fn save(self, fs: &RootedFs) -> Result<String, VfsError> {
        fs.write_file(&self.target, &self.content())?;
        Ok(format!("File saved: {}\n{}", self.target, RULE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simos_vfs::normalize;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RootedFs) {
        let dir = TempDir::new().unwrap();
        let fs = RootedFs::open(dir.path()).unwrap();
        (dir, fs)
    }

    fn vp(s: &str) -> VirtualPath {
        normalize(s, &VirtualPath::root())
    }

    #[test]
    fn sentinel_must_match_exactly_after_trim() {
        assert!(EditSession::is_sentinel("EOF"));
        assert!(EditSession::is_sentinel("  EOF \t"));
        assert!(!EditSession::is_sentinel("EOF!"));
        assert!(!EditSession::is_sentinel("eof"));
        assert!(!EditSession::is_sentinel("EOFX"));
    }

    #[test]
    fn new_file_starts_empty() {
        let (_dir, fs) = setup();
        let (session, preamble) = EditSession::open(&fs, vp("/new.txt")).unwrap();
        assert!(session.content().is_empty());
        assert!(preamble.starts_with("New file."));
        assert!(preamble.contains("Type \"EOF\""));
    }

    #[test]
    fn existing_file_seeds_buffer() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/f.txt"), "one\ntwo").unwrap();
        let (mut session, preamble) = EditSession::open(&fs, vp("/f.txt")).unwrap();
        assert!(preamble.starts_with("Current content:\none\ntwo\n"));
        session.push("three");
        assert_eq!(session.content(), "one\ntwo\nthree");
    }

    #[test]
    fn empty_existing_file_does_not_seed_blank_line() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/empty"), "").unwrap();
        let (mut session, _) = EditSession::open(&fs, vp("/empty")).unwrap();
        session.push("only");
        assert_eq!(session.content(), "only");
    }

    #[test]
    fn open_creates_missing_parents() {
        let (dir, fs) = setup();
        EditSession::open(&fs, vp("/a/b/c.txt")).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        assert!(!dir.path().join("a/b/c.txt").exists());
    }

    #[test]
    fn open_on_directory_is_refused() {
        let (_dir, fs) = setup();
        fs.mkdir(&vp("/d")).unwrap();
        assert!(matches!(
            EditSession::open(&fs, vp("/d")),
            Err(VfsError::NotAFile(_))
        ));
    }

    #[test]
    fn save_writes_joined_lines() {
        let (dir, fs) = setup();
        let (mut session, _) = EditSession::open(&fs, vp("/out.txt")).unwrap();
        session.push("first");
        session.push("  second  ");
        let msg = session.save(&fs).unwrap();
        assert!(msg.starts_with("File saved: /out.txt"));
        let written = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(written, "first\n  second  ");
    }
}
