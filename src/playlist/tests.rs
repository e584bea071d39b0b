use super::model::IdGenerator;
use super::*;
use crate::error::PlaylistError;
use crate::library::{AudioFilter, FileRef};
use std::collections::HashSet;

fn mp3(name: &str) -> FileRef {
    FileRef::new(name, Some("audio/mpeg"), format!("/music/{name}"))
}

#[test]
fn add_two_mp3s_keeps_order_and_strips_extension() {
    let mut pl = Playlist::new();
    let added = pl.add(&[mp3("a.mp3"), mp3("b.mp3")]);

    assert_eq!(added, 2);
    assert_eq!(pl.len(), 2);
    let names: Vec<&str> = pl.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(pl.get(1).unwrap().original_file_name, "b.mp3");
}

#[test]
fn add_skips_files_that_are_not_audio() {
    let mut pl = Playlist::new();
    let files = vec![
        FileRef::new("cover.jpg", Some("image/jpeg"), "/music/cover.jpg"),
        mp3("song.mp3"),
        FileRef::new("notes.txt", None, "/music/notes.txt"),
        // Extension match is enough when the type was not sniffed.
        FileRef::new("LOUD.MP3", None, "/music/LOUD.MP3"),
    ];

    assert_eq!(pl.add(&files), 2);
    let names: Vec<&str> = pl.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["song", "LOUD"]);
}

#[test]
fn add_with_custom_filter() {
    let mut pl = Playlist::with_filter(AudioFilter::new(["flac"], ["audio/flac"]));
    let files = vec![
        mp3("a.mp3"),
        FileRef::new("b.flac", Some("audio/flac"), "/music/b.flac"),
    ];
    assert_eq!(pl.add(&files), 1);
    assert_eq!(pl.get(0).unwrap().display_name, "b");
}

#[test]
fn duplicate_files_get_distinct_ids() {
    let mut pl = Playlist::new();
    let file = mp3("same.mp3");
    pl.add([&file, &file, &file]);

    let ids: HashSet<_> = pl.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn add_and_remove_account_for_length_and_ids_stay_unique() {
    let mut pl = Playlist::new();
    let mut seen = HashSet::new();
    let mut expected = 0usize;

    for round in 0..20usize {
        let files: Vec<FileRef> = (0..(round % 4))
            .map(|i| mp3(&format!("{round}-{i}.mp3")))
            .collect();
        expected += pl.add(&files);
        for t in pl.iter() {
            seen.insert(t.id.clone());
        }

        if round % 3 == 0 && !pl.is_empty() {
            let idx = round % pl.len();
            pl.remove(idx).unwrap();
            expected -= 1;
        }
        assert_eq!(pl.len(), expected);

        let live: HashSet<_> = pl.iter().map(|t| t.id.clone()).collect();
        assert_eq!(live.len(), pl.len());
    }

    // Removed ids are never handed out again.
    let before = seen.len();
    pl.add(&[mp3("fresh.mp3")]);
    let fresh = pl.get(pl.len() - 1).unwrap().id.clone();
    assert!(!seen.contains(&fresh));
    assert_eq!(seen.len(), before);
}

#[test]
fn remove_shifts_later_tracks_down() {
    let mut pl = Playlist::new();
    pl.add(&[mp3("a.mp3"), mp3("b.mp3"), mp3("c.mp3")]);

    let removed = pl.remove(1).unwrap();
    assert_eq!(removed.display_name, "b");
    let names: Vec<&str> = pl.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn remove_out_of_bounds_is_an_error_and_changes_nothing() {
    let mut pl = Playlist::new();
    pl.add(&[mp3("a.mp3")]);

    assert_eq!(
        pl.remove(1).unwrap_err(),
        PlaylistError::IndexOutOfBounds { index: 1, len: 1 }
    );
    assert_eq!(pl.len(), 1);
}

#[test]
fn position_of_finds_track_by_id() {
    let mut pl = Playlist::new();
    pl.add(&[mp3("a.mp3"), mp3("b.mp3")]);
    let id = pl.get(1).unwrap().id.clone();

    assert_eq!(pl.position_of(&id), Some(1));
    pl.remove(0).unwrap();
    assert_eq!(pl.position_of(&id), Some(0));
    pl.clear();
    assert_eq!(pl.position_of(&id), None);
    assert!(pl.is_empty());
}

#[test]
fn insert_named_keeps_given_display_name_and_bypasses_filter() {
    let mut pl = Playlist::new();
    let file = FileRef::new("track01.ogg", None, "/music/track01.ogg");
    let t = pl.insert_named(0, &file, "Opening Theme");

    assert_eq!(t.display_name, "Opening Theme");
    assert_eq!(t.original_file_name, "track01.ogg");
    assert_eq!(pl.len(), 1);
}

#[test]
fn insert_named_places_track_at_index_and_clamps() {
    let mut pl = Playlist::new();
    pl.add(&[mp3("a.mp3"), mp3("c.mp3")]);

    let b = pl.insert_named(1, &mp3("b.mp3"), "B").id.clone();
    pl.insert_named(99, &mp3("z.mp3"), "Z");

    let names: Vec<&str> = pl.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["a", "B", "c", "Z"]);
    assert_eq!(pl.position_of(&b), Some(1));
}

#[test]
fn id_generator_never_repeats() {
    let mut ids = IdGenerator::new();
    let all: HashSet<TrackId> = (0..1000).map(|_| ids.next_id()).collect();
    assert_eq!(all.len(), 1000);
}
