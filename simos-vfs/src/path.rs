use std::fmt;
use std::path::{Component, Path, PathBuf};

// ── Constants ───────────────────────────────────────────────────────────────

pub const ROOT: &str = "/";
const SEPARATOR: char = '/';

// ── Virtual paths ───────────────────────────────────────────────────────────

/// An absolute, normalized path in the shell namespace.
///
/// Always starts with `/`, never contains `.`, `..` or empty segments and has
/// no trailing slash unless it is the root itself. The only ways to obtain one
/// are [`VirtualPath::root`] and [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualPath(String);

impl VirtualPath {
    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Segments from the root downwards. Empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Returns `None` for the root.
    pub fn parent(&self) -> Option<VirtualPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(0) | None => Some(Self::root()),
            Some(pos) => Some(Self(self.0[..pos].to_string())),
        }
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Resolve `input` against `cwd` into a normalized virtual path.
///
/// Relative input is joined onto `cwd`. `..` at the root is clamped rather
/// than rejected, so the result never climbs above `/`.
pub fn normalize(input: &str, cwd: &VirtualPath) -> VirtualPath {
    if input.is_empty() {
        return cwd.clone();
    }

    let joined = if input.starts_with(SEPARATOR) {
        input.to_string()
    } else {
        format!("{}{}{}", cwd, SEPARATOR, input)
    };

    let mut resolved: Vec<&str> = Vec::new();
    for seg in joined.split(SEPARATOR) {
        match seg {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            _ => resolved.push(seg),
        }
    }

    VirtualPath(format!("{}{}", ROOT, resolved.join("/")))
}

/// Map a virtual path onto the real filesystem under `root`.
///
/// Takes a [`VirtualPath`] rather than a string so raw user input cannot be
/// joined onto the root without going through [`normalize`] first.
///
/// A segment can still hold host syntax that `/`-splitting does not see, such
/// as `..\x` or `C:\x` on Windows. Only plain name components of a segment
/// are pushed; prefixes, root markers, `.` and `..` are dropped.
pub fn to_real(root: &Path, path: &VirtualPath) -> PathBuf {
    let mut real = root.to_path_buf();
    for seg in path.segments() {
        for component in Path::new(seg).components() {
            if let Component::Normal(name) = component {
                real.push(name);
            }
        }
    }
    real
}

// ── Tests ───────────────────────────────────────────────────────────────────
