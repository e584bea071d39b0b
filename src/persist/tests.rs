use super::*;
use crate::error::PersistError;
use crate::library::FileRef;
use crate::playlist::Playlist;
use tempfile::tempdir;

fn mp3(name: &str) -> FileRef {
    FileRef::new(name, Some("audio/mpeg"), format!("/music/{name}"))
}

fn entry(id: &str, display: &str, file: &str) -> PersistedEntry {
    PersistedEntry {
        id: id.into(),
        display_name: display.into(),
        original_file_name: file.into(),
    }
}

#[test]
fn serialize_empty_playlist_fails_with_user_message() {
    let err = serialize(&Playlist::new()).unwrap_err();
    assert!(matches!(err, PersistError::EmptyPlaylist));
    assert_eq!(err.to_string(), "Playlist is empty, cannot save.");
}

#[test]
fn serialize_writes_camel_case_metadata_only() {
    let mut pl = Playlist::new();
    pl.add(&[mp3("a.mp3"), mp3("b.mp3")]);

    let doc = serialize(&pl).unwrap();
    let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let first = items[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["displayName", "id", "originalFileName"]);
    assert_eq!(first["displayName"], "a");
    assert_eq!(first["originalFileName"], "a.mp3");
    assert!(!doc.contains("/music/"));
}

#[test]
fn saved_document_loads_back_the_same_metadata() {
    let mut pl = Playlist::new();
    pl.add(&[mp3("one.mp3"), mp3("two.mp3"), mp3("one.mp3")]);

    let loaded = deserialize(&serialize(&pl).unwrap()).unwrap();
    assert_eq!(loaded.len(), pl.len());
    for (entry, track) in loaded.iter().zip(pl.iter()) {
        assert_eq!(entry.id, track.id.as_str());
        assert_eq!(entry.display_name, track.display_name);
        assert_eq!(entry.original_file_name, track.original_file_name);
    }
}

#[test]
fn deserialize_accepts_documents_written_elsewhere() {
    let doc = r#"[
        {"id": "1700000000000", "displayName": "Intro", "originalFileName": "intro.mp3"}
    ]"#;
    assert_eq!(
        deserialize(doc).unwrap(),
        vec![entry("1700000000000", "Intro", "intro.mp3")]
    );
    assert!(deserialize("[]").unwrap().is_empty());
}

#[test]
fn deserialize_rejects_malformed_json() {
    assert!(matches!(
        deserialize("{not json"),
        Err(PersistError::Format(_))
    ));
    assert!(matches!(
        deserialize(r#"{"id": "x"}"#),
        Err(PersistError::Format(_))
    ));
}

#[test]
fn deserialize_rejects_missing_fields_as_a_whole() {
    let doc = r#"[
        {"id": "1", "displayName": "ok", "originalFileName": "ok.mp3"},
        {"id": "2", "displayName": "missing file name"}
    ]"#;
    assert!(matches!(deserialize(doc), Err(PersistError::Format(_))));
}

#[test]
fn dir_storage_creates_root_and_round_trips() {
    let dir = tempdir().unwrap();
    let storage = DirStorage::new(dir.path().join("nested").join("data"));

    storage.write("playlist.json", "[]").unwrap();
    assert_eq!(storage.read("playlist.json").unwrap(), "[]");
    assert!(storage.root().join("playlist.json").is_file());
}

#[test]
fn dir_storage_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let storage = DirStorage::new(dir.path());
    match storage.read("playlist.json") {
        Err(PersistError::NotFound(p)) => assert_eq!(p, "playlist.json"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn worker_writes_then_reads_in_order() {
    let dir = tempdir().unwrap();
    let worker = PersistWorker::spawn(DirStorage::new(dir.path()));

    worker
        .submit(PersistRequest::Write {
            path: "playlist.json".into(),
            content: "[1]".into(),
        })
        .unwrap();
    worker
        .submit(PersistRequest::Read {
            path: "playlist.json".into(),
        })
        .unwrap();

    match worker.recv().unwrap() {
        PersistReply::Written { path, result } => {
            assert_eq!(path, "playlist.json");
            assert!(result.is_ok());
        }
        other => panic!("unexpected reply {other:?}"),
    }
    match worker.recv().unwrap() {
        PersistReply::Read { result, .. } => assert_eq!(result.unwrap(), "[1]"),
        other => panic!("unexpected reply {other:?}"),
    }
    assert!(worker.try_recv().is_none());
}

#[test]
fn worker_reports_storage_errors() {
    let dir = tempdir().unwrap();
    let worker = PersistWorker::spawn(DirStorage::new(dir.path()));
    worker
        .submit(PersistRequest::Read {
            path: "missing.json".into(),
        })
        .unwrap();

    match worker.recv().unwrap() {
        PersistReply::Read { result, .. } => {
            assert!(matches!(result, Err(PersistError::NotFound(_))))
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[test]
fn relink_matches_by_file_name_in_document_order() {
    let entries = PendingEntry::from_document(vec![
        entry("1", "First", "a.mp3"),
        entry("2", "Gone", "missing.mp3"),
        entry("3", "Second", "b.mp3"),
    ]);
    let files = vec![mp3("b.mp3"), mp3("extra.mp3"), mp3("a.mp3")];

    let r = relink(entries, &files);
    let matched: Vec<(usize, &str, &str)> = r
        .matched
        .iter()
        .map(|(p, f)| (p.slot, p.entry.display_name.as_str(), f.name.as_str()))
        .collect();
    assert_eq!(matched, vec![(0, "First", "a.mp3"), (2, "Second", "b.mp3")]);
    assert_eq!(
        r.unmatched,
        vec![PendingEntry {
            slot: 1,
            entry: entry("2", "Gone", "missing.mp3"),
        }]
    );
    let leftover: Vec<&str> = r.leftover.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(leftover, vec!["extra.mp3"]);
}

#[test]
fn relink_uses_each_file_once() {
    let entries = PendingEntry::from_document(vec![entry("1", "x", "dup.mp3"), entry("2", "y", "dup.mp3")]);
    let files = vec![mp3("dup.mp3")];

    let r = relink(entries, &files);
    assert_eq!(r.matched.len(), 1);
    assert_eq!(r.matched[0].0.entry.id, "1");
    assert_eq!(r.unmatched.len(), 1);
    assert_eq!(r.unmatched[0].slot, 1);
    assert!(r.leftover.is_empty());
}

#[test]
fn relink_requires_exact_name() {
    let entries = PendingEntry::from_document(vec![entry("1", "x", "Song.mp3")]);
    let files = vec![mp3("song.mp3")];
    let r = relink(entries, &files);
    assert!(r.matched.is_empty());
    assert_eq!(r.leftover.len(), 1);
}
