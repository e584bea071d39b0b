use std::path::Path;

use lofty::file::FileType;
use lofty::probe::Probe;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::FileRef;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Guess the MIME type of `path` from its content (falling back to the
/// extension), or `None` when lofty does not recognize it.
pub fn sniff_mime(path: &Path) -> Option<String> {
    let file_type = Probe::open(path)
        .ok()?
        .guess_file_type()
        .ok()?
        .file_type()?;

    let mime = match file_type {
        FileType::Mpeg => "audio/mpeg",
        FileType::Flac => "audio/flac",
        FileType::Vorbis | FileType::Speex => "audio/ogg",
        FileType::Opus => "audio/opus",
        FileType::Wav => "audio/wav",
        FileType::Aiff => "audio/aiff",
        FileType::Aac => "audio/aac",
        FileType::Mp4 => "audio/mp4",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Collect file references for `path`.
///
/// A file yields itself. A directory is walked according to `settings`
/// (recursion, depth cap, hidden entries, symlinks) and yields its files
/// sorted by name. Nothing is filtered by type here; the playlist decides
/// what counts as audio.
pub fn scan(path: &Path, settings: &LibrarySettings) -> Vec<FileRef> {
    if path.is_file() {
        return FileRef::from_path(path, sniff_mime(path)).into_iter().collect();
    }
    if !path.is_dir() {
        log::warn!("import: {} is neither a file nor a directory", path.display());
        return Vec::new();
    }

    let mut walker = WalkDir::new(path).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let files: Vec<FileRef> = walker
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| FileRef::from_path(e.path(), sniff_mime(e.path())))
        .collect();

    log::debug!("import: {} files under {}", files.len(), path.display());
    files
}

/// Scan each of `paths` in order and concatenate the results.
pub fn scan_all<P: AsRef<Path>>(paths: &[P], settings: &LibrarySettings) -> Vec<FileRef> {
    paths
        .iter()
        .flat_map(|p| scan(p.as_ref(), settings))
        .collect()
}
