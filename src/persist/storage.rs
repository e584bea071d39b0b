use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// Somewhere playlist documents can be written to and read back from.
pub trait Storage: Send + 'static {
    fn write(&self, path: &str, content: &str) -> Result<(), PersistError>;
    fn read(&self, path: &str) -> Result<String, PersistError>;
}

/// Plain files under a root directory, created on first write.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for DirStorage {
    fn write(&self, path: &str, content: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| PersistError::from_io(&self.root.display().to_string(), e))?;
        fs::write(self.resolve(path), content).map_err(|e| PersistError::from_io(path, e))
    }

    fn read(&self, path: &str) -> Result<String, PersistError> {
        fs::read_to_string(self.resolve(path)).map_err(|e| PersistError::from_io(path, e))
    }
}
