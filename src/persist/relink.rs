use crate::library::FileRef;

use super::document::PersistedEntry;

/// A loaded entry still waiting for its file, with its position in the
/// document it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEntry {
    pub slot: usize,
    pub entry: PersistedEntry,
}

impl PendingEntry {
    /// Number the entries of a loaded document in order.
    pub fn from_document(entries: Vec<PersistedEntry>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .map(|(slot, entry)| Self { slot, entry })
            .collect()
    }
}

/// Result of matching loaded entries against newly selected files.
#[derive(Debug, Default)]
pub struct Relinked<'a> {
    /// Entries that found their file, in document order.
    pub matched: Vec<(PendingEntry, &'a FileRef)>,
    /// Entries still waiting for a file.
    pub unmatched: Vec<PendingEntry>,
    /// Files no entry asked for, in selection order.
    pub leftover: Vec<&'a FileRef>,
}

/// Pair each entry with the first unused file whose name equals its
/// `originalFileName`. A file satisfies at most one entry.
pub fn relink(entries: Vec<PendingEntry>, files: &[FileRef]) -> Relinked<'_> {
    let mut used = vec![false; files.len()];
    let mut out = Relinked::default();

    for pending in entries {
        let hit = files
            .iter()
            .enumerate()
            .find(|(i, f)| !used[*i] && f.name == pending.entry.original_file_name)
            .map(|(i, _)| i);
        match hit {
            Some(i) => {
                used[i] = true;
                out.matched.push((pending, &files[i]));
            }
            None => out.unmatched.push(pending),
        }
    }

    out.leftover = files
        .iter()
        .zip(used)
        .filter(|(_, used)| !used)
        .map(|(f, _)| f)
        .collect();
    out
}
