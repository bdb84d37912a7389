// ---------------------------------------------------------------------------
// Whole-file operations against a real directory root
// ---------------------------------------------------------------------------

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Target, VfsError};
use crate::path::{to_real, VirtualPath};

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

// ---------------------------------------------------------------------------
// RootedFs
// ---------------------------------------------------------------------------

/// Filesystem operations confined to a single real directory.
///
/// Every operation takes a [`VirtualPath`], so callers must normalize user
/// input before anything here touches the disk.
#[derive(Debug, Clone)]
pub struct RootedFs {
    root: PathBuf,
}

impl RootedFs {
    // -- Constructor ------------------------------------------------------

    /// Open `root`, creating it and its parents if absent.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, VfsError> {
        let root = root.as_ref();
        if root.exists() {
            if !root.is_dir() {
                return Err(VfsError::NotADirectory(root.display().to_string()));
            }
        } else {
            fs::create_dir_all(root)?;
            tracing::info!(root = %root.display(), "Created root directory");
        }
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    /// Canonical real path of the root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn to_real(&self, path: &VirtualPath) -> PathBuf {
        to_real(&self.root, path)
    }

    // -- Helpers (private) ------------------------------------------------

    fn metadata(&self, path: &VirtualPath, target: Target) -> Result<fs::Metadata, VfsError> {
        let real = self.to_real(path);
        // A path through a regular file (`/f/x`) fails with ENOTDIR; treat it
        // as absent, like `exists()` does.
        fs::metadata(&real).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
                VfsError::not_found(target, path)
            }
            _ => VfsError::Io(e),
        })
    }

    fn assert_is_file(&self, path: &VirtualPath) -> Result<fs::Metadata, VfsError> {
        let meta = self.metadata(path, Target::File)?;
        if meta.is_dir() {
            return Err(VfsError::NotAFile(path.to_string()));
        }
        Ok(meta)
    }

    fn assert_is_directory(&self, path: &VirtualPath) -> Result<(), VfsError> {
        let meta = self.metadata(path, Target::Directory)?;
        if !meta.is_dir() {
            return Err(VfsError::NotADirectory(path.to_string()));
        }
        Ok(())
    }

    // -- Queries ----------------------------------------------------------

    pub fn exists(&self, path: &VirtualPath) -> bool {
        self.to_real(path).exists()
    }

    pub fn is_dir(&self, path: &VirtualPath) -> bool {
        self.to_real(path).is_dir()
    }

    /// List a directory: subdirectories first, then files, each group sorted
    /// by name.
    pub fn read_dir(&self, path: &VirtualPath) -> Result<Vec<DirEntry>, VfsError> {
        self.assert_is_directory(path)?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(self.to_real(path))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let meta = fs::metadata(entry.path())?;
            if meta.is_dir() {
                dirs.push(DirEntry {
                    name,
                    kind: EntryKind::Directory,
                });
            } else {
                files.push(DirEntry {
                    name,
                    kind: EntryKind::File { size: meta.len() },
                });
            }
        }
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.extend(files);
        Ok(dirs)
    }

    /// Read a whole file as text. Invalid UTF-8 is replaced, not rejected.
    pub fn read_file(&self, path: &VirtualPath) -> Result<String, VfsError> {
        self.assert_is_file(path)?;
        let bytes = fs::read(self.to_real(path))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fails with `NotFound` unless `path` is an existing directory.
    pub fn ensure_dir(&self, path: &VirtualPath) -> Result<(), VfsError> {
        self.assert_is_directory(path)
    }

    // -- Mutations --------------------------------------------------------

    /// Create a directory and any missing parents. An existing directory is
    /// not an error.
    pub fn mkdir(&self, path: &VirtualPath) -> Result<(), VfsError> {
        let real = self.to_real(path);
        if real.exists() && !real.is_dir() {
            return Err(VfsError::NotADirectory(path.to_string()));
        }
        fs::create_dir_all(&real)?;
        tracing::info!(path = %path, "Created directory");
        Ok(())
    }

    /// Create the parent directory of `path` if it does not exist yet.
    pub fn create_parents(&self, path: &VirtualPath) -> Result<(), VfsError> {
        match path.parent() {
            Some(parent) => self.mkdir(&parent),
            None => Ok(()),
        }
    }

    /// Replace the whole content of a file, creating it and its parents.
    pub fn write_file(&self, path: &VirtualPath, content: &str) -> Result<(), VfsError> {
        if path.is_root() || self.is_dir(path) {
            return Err(VfsError::NotAFile(path.to_string()));
        }
        self.create_parents(path)?;
        fs::write(self.to_real(path), content)?;
        tracing::info!(path = %path, size = content.len(), "Wrote file");
        Ok(())
    }

    /// Remove a file, or a directory with everything below it.
    /// Returns `Directory` or `File` depending on what was removed.
    pub fn remove(&self, path: &VirtualPath) -> Result<Target, VfsError> {
        if path.is_root() {
            return Err(VfsError::Usage("Cannot remove the root directory".to_string()));
        }
        let meta = self.metadata(path, Target::Path)?;
        let real = self.to_real(path);
        if meta.is_dir() {
            fs::remove_dir_all(&real)?;
            tracing::info!(path = %path, "Removed directory");
            Ok(Target::Directory)
        } else {
            fs::remove_file(&real)?;
            tracing::info!(path = %path, "Removed file");
            Ok(Target::File)
        }
    }

    /// Set a file's length to zero.
    pub fn truncate(&self, path: &VirtualPath) -> Result<(), VfsError> {
        self.assert_is_file(path)?;
        let file = fs::OpenOptions::new().write(true).open(self.to_real(path))?;
        file.set_len(0)?;
        tracing::info!(path = %path, "Truncated file");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::path::normalize;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RootedFs) {
        let dir = TempDir::new().unwrap();
        let fs = RootedFs::open(dir.path()).unwrap();
        (dir, fs)
    }

    fn vp(s: &str) -> VirtualPath {
        normalize(s, &VirtualPath::root())
    }

    // -- open --

    #[test]
    fn open_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested/root");
        let fs = RootedFs::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(fs.root(), root.canonicalize().unwrap());
    }

    #[test]
    fn open_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        let err = RootedFs::open(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    // -- read_dir --

    #[test]
    fn read_dir_of_empty_directory() {
        let (_dir, fs) = setup();
        assert!(fs.read_dir(&VirtualPath::root()).unwrap().is_empty());
    }

    #[test]
    fn read_dir_lists_directories_before_files() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/aaa"), "12345").unwrap();
        fs.mkdir(&vp("/zzz")).unwrap();
        fs.mkdir(&vp("/mmm")).unwrap();
        fs.write_file(&vp("/bbb"), "").unwrap();

        let entries = fs.read_dir(&VirtualPath::root()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["mmm", "zzz", "aaa", "bbb"]);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[2].kind, EntryKind::File { size: 5 });
        assert_eq!(entries[3].kind, EntryKind::File { size: 0 });
    }

    #[test]
    fn read_dir_of_missing_path() {
        let (_dir, fs) = setup();
        let err = fs.read_dir(&vp("/nope")).unwrap_err();
        assert_eq!(err.to_string(), "Directory not found: /nope");
    }

    #[test]
    fn read_dir_of_file_is_mismatch() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/f"), "x").unwrap();
        let err = fs.read_dir(&vp("/f")).unwrap_err();
        assert_eq!(err.to_string(), "Not a directory: /f");
    }

    // -- write_file / read_file --

    #[test]
    fn write_and_read_text_file() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/hello.txt"), "hello world").unwrap();
        assert_eq!(fs.read_file(&vp("/hello.txt")).unwrap(), "hello world");
    }

    #[test]
    fn write_creates_parents() {
        let (dir, fs) = setup();
        fs.write_file(&vp("/a/b/c.txt"), "deep").unwrap();
        assert!(dir.path().join("a/b").is_dir());
        assert_eq!(fs.read_file(&vp("/a/b/c.txt")).unwrap(), "deep");
    }

    #[test]
    fn write_replaces_whole_content() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/f"), "a long first version").unwrap();
        fs.write_file(&vp("/f"), "short").unwrap();
        assert_eq!(fs.read_file(&vp("/f")).unwrap(), "short");
    }

    #[test]
    fn write_over_directory_is_mismatch() {
        let (_dir, fs) = setup();
        fs.mkdir(&vp("/d")).unwrap();
        assert!(matches!(
            fs.write_file(&vp("/d"), "x"),
            Err(VfsError::NotAFile(_))
        ));
        assert!(matches!(
            fs.write_file(&VirtualPath::root(), "x"),
            Err(VfsError::NotAFile(_))
        ));
    }

    #[test]
    fn read_directory_is_mismatch() {
        let (_dir, fs) = setup();
        fs.mkdir(&vp("/d")).unwrap();
        assert!(matches!(fs.read_file(&vp("/d")), Err(VfsError::NotAFile(_))));
    }

    #[test]
    fn read_missing_file() {
        let (_dir, fs) = setup();
        let err = fs.read_file(&vp("/missing")).unwrap_err();
        assert_eq!(err.to_string(), "File not found: /missing");
    }

    #[test]
    fn path_through_file_is_not_found() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/f"), "x").unwrap();
        let below = vp("/f/x");
        assert!(!fs.exists(&below));
        assert_eq!(fs.read_file(&below).unwrap_err().to_string(), "File not found: /f/x");
        assert_eq!(fs.truncate(&below).unwrap_err().to_string(), "File not found: /f/x");
        assert_eq!(fs.remove(&below).unwrap_err().to_string(), "Path not found: /f/x");
        assert_eq!(
            fs.read_dir(&below).unwrap_err().to_string(),
            "Directory not found: /f/x"
        );
        assert_eq!(
            fs.ensure_dir(&below).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    // -- mkdir --

    #[test]
    fn mkdir_is_recursive_and_repeatable() {
        let (dir, fs) = setup();
        fs.mkdir(&vp("/x/y/z")).unwrap();
        fs.mkdir(&vp("/x/y/z")).unwrap();
        assert!(dir.path().join("x/y/z").is_dir());
    }

    #[test]
    fn mkdir_over_file_is_mismatch() {
        let (_dir, fs) = setup();
        fs.write_file(&vp("/f"), "").unwrap();
        assert!(matches!(fs.mkdir(&vp("/f")), Err(VfsError::NotADirectory(_))));
    }

    // -- remove --

    #[test]
    fn remove_file() {
        let (dir, fs) = setup();
        fs.write_file(&vp("/f"), "x").unwrap();
        assert_eq!(fs.remove(&vp("/f")).unwrap(), Target::File);
        assert!(!dir.path().join("f").exists());
    }

    #[test]
    fn remove_directory_recursively() {
        let (dir, fs) = setup();
        fs.write_file(&vp("/d/sub/f.txt"), "x").unwrap();
        fs.mkdir(&vp("/d/empty")).unwrap();
        assert_eq!(fs.remove(&vp("/d")).unwrap(), Target::Directory);
        assert!(!dir.path().join("d").exists());
        assert!(fs.read_dir(&VirtualPath::root()).unwrap().is_empty());
    }

    #[test]
    fn remove_missing_path() {
        let (_dir, fs) = setup();
        let err = fs.remove(&vp("/ghost")).unwrap_err();
        assert_eq!(err.to_string(), "Path not found: /ghost");
    }

    #[test]
    fn remove_root_is_refused() {
        let (dir, fs) = setup();
        let err = fs.remove(&VirtualPath::root()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(dir.path().is_dir());
    }

    // -- truncate --

    #[test]
    fn truncate_empties_file() {
        let (dir, fs) = setup();
        fs.write_file(&vp("/notes.txt"), "hello world").unwrap();
        fs.truncate(&vp("/notes.txt")).unwrap();
        assert_eq!(std::fs::metadata(dir.path().join("notes.txt")).unwrap().len(), 0);
    }

    #[test]
    fn truncate_directory_is_mismatch() {
        let (_dir, fs) = setup();
        fs.mkdir(&vp("/d")).unwrap();
        assert!(matches!(fs.truncate(&vp("/d")), Err(VfsError::NotAFile(_))));
    }

    // -- confinement --

    #[test]
    fn traversal_input_stays_inside_root() {
        let (dir, fs) = setup();
        let escaped = normalize("../../../outside.txt", &vp("/a"));
        fs.write_file(&escaped, "inside").unwrap();
        assert!(dir.path().join("outside.txt").is_file());
        assert!(fs.to_real(&escaped).starts_with(fs.root()));
    }
}
