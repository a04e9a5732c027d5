//! Integration tests for scanning a folder into a grouping index

use std::fs;

use imgnav::{scan_folder, GroupIndex, SortOrder};

use crate::helpers::{png_folder, write_gif};

#[test]
fn scanned_folder_groups_into_three_tiers() {
    let dir = png_folder(&[
        "cat_01_sofa.png",
        "cat_01_bed.png",
        "cat_02_garden.png",
        "dog_10_park.png",
        "dog_9_beach.png",
    ]);
    write_gif(dir.path(), "dog_9_run.gif", &[40, 40]);
    fs::write(dir.path().join("notes.txt"), b"skip me").unwrap();
    fs::create_dir(dir.path().join("subdir")).unwrap();

    let index = GroupIndex::build(scan_folder(dir.path()).unwrap());

    assert_eq!(index.len(), 6);
    assert_eq!(index.top_keys(), &["cat", "dog"]);

    let dog_sets: Vec<_> = index.middle_groups("dog").iter().map(|g| g.key).collect();
    assert_eq!(dog_sets, ["9", "10"]);

    let cat_first: Vec<_> = index.files_in(0, 0).iter().map(|f| f.display_name()).collect();
    assert_eq!(cat_first, ["bed", "sofa"]);
}

#[test]
fn every_scanned_entry_has_a_timestamp() {
    let dir = png_folder(&["a_1_x.png", "b_1_x.png"]);
    let entries = scan_folder(dir.path()).unwrap();
    assert!(entries.iter().all(|e| e.created().is_some()));

    let index = GroupIndex::build(entries).with_sort_order(SortOrder::Date);
    assert_eq!(index.top_count(), 2);
}

#[test]
fn uppercase_extensions_are_accepted() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("a_1_x.PNG"), b"bytes").unwrap();
    let entries = scan_folder(dir.path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].extension().as_deref(), Some("png"));
}

#[test]
fn file_path_is_not_a_folder() {
    let dir = png_folder(&["a_1_x.png"]);
    assert!(scan_folder(&dir.path().join("a_1_x.png")).is_err());
}
