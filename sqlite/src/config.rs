use std::path::{Path, PathBuf};

/// How the database file is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OpenMode {
    /// Open read-only; the file must exist
    ReadOnly,
    /// Open read-write; the file must exist
    ReadWrite,
    /// Open read-write, creating the file if needed
    #[default]
    Create,
    /// Private in-memory database; `path` is ignored
    Memory,
}

/// Connection settings for [`SqliteConnector`](crate::SqliteConnector).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SqliteConfig {
    pub path: PathBuf,
    pub mode: OpenMode,
}

impl SqliteConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: OpenMode::Create,
        }
    }

    pub fn memory() -> Self {
        Self {
            path: PathBuf::new(),
            mode: OpenMode::Memory,
        }
    }

    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn read_only(self) -> Self {
        self.mode(OpenMode::ReadOnly)
    }

    #[cfg(feature = "rusqlite")]
    pub(crate) fn flags(&self) -> rusqlite::OpenFlags {
        use rusqlite::OpenFlags;

        let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self.mode {
            OpenMode::ReadOnly => base | OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWrite => base | OpenFlags::SQLITE_OPEN_READ_WRITE,
            OpenMode::Create => {
                base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
            }
            OpenMode::Memory => {
                base | OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_MEMORY
            }
        }
    }
}

impl From<&str> for SqliteConfig {
    fn from(path: &str) -> Self {
        if path == ":memory:" {
            Self::memory()
        } else {
            Self::new(path)
        }
    }
}

impl From<&Path> for SqliteConfig {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for SqliteConfig {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_path_selects_memory_mode() {
        assert_eq!(SqliteConfig::from(":memory:").mode, OpenMode::Memory);
        assert_eq!(SqliteConfig::from("app.db").mode, OpenMode::Create);
    }

    #[test]
    fn builder_overrides_mode() {
        let config = SqliteConfig::new("app.db").read_only();
        assert_eq!(config.mode, OpenMode::ReadOnly);
        assert_eq!(config.path, PathBuf::from("app.db"));
    }
}
