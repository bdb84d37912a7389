pub mod error;
pub mod fs;
pub mod path;

pub use error::{ErrorKind, Target, VfsError};
pub use fs::{DirEntry, EntryKind, RootedFs};
pub use path::{normalize, VirtualPath};
