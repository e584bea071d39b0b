use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LibrarySettings;

/// A file handed over by the file-selection side: its name, sniffed MIME
/// type (if any) and location on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub mime: Option<String>,
    pub path: PathBuf,
}

impl FileRef {
    pub fn new(name: impl Into<String>, mime: Option<&str>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            path: path.into(),
        }
    }

    /// Build a `FileRef` for `path`, taking the name from its last component.
    pub fn from_path(path: &Path, mime: Option<String>) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            name,
            mime,
            path: path.to_path_buf(),
        })
    }

    /// The name without its extension; used as a track's display name.
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }

    fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Open a process-local handle to the audio bytes behind this file.
    pub fn open_source(&self) -> SourceHandle {
        SourceHandle(Arc::new(self.path.clone()))
    }
}

/// Process-local reference to a track's audio bytes.
///
/// Not serializable: it never outlives the session. Clones share the same
/// underlying reference.
#[derive(Debug, Clone)]
pub struct SourceHandle(Arc<PathBuf>);

impl SourceHandle {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Decides which files count as audio: a MIME type match or an extension match.
#[derive(Debug, Clone)]
pub struct AudioFilter {
    extensions: Vec<String>,
    mime_types: Vec<String>,
}

impl AudioFilter {
    pub fn new<E, M>(extensions: E, mime_types: M) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            mime_types: mime_types
                .into_iter()
                .map(|m| m.as_ref().trim().to_ascii_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn from_settings(settings: &LibrarySettings) -> Self {
        Self::new(&settings.extensions, &settings.mime_types)
    }

    pub fn accepts(&self, file: &FileRef) -> bool {
        let mime_ok = file
            .mime
            .as_deref()
            .map(|m| {
                let m = m.trim().to_ascii_lowercase();
                self.mime_types.iter().any(|t| *t == m)
            })
            .unwrap_or(false);

        mime_ok
            || file
                .extension()
                .map(|ext| {
                    let ext = ext.to_ascii_lowercase();
                    self.extensions.iter().any(|e| *e == ext)
                })
                .unwrap_or(false)
    }
}

impl Default for AudioFilter {
    fn default() -> Self {
        Self::from_settings(&LibrarySettings::default())
    }
}
