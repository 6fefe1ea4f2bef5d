use std::fs;

use harvester_engine::write_atomically;
use tempfile::TempDir;

#[test]
fn creates_missing_parent_directories() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out").join("skills.json");

    let written = write_atomically(&target, "[]".as_bytes()).unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
}

#[test]
fn replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("heroes.json");

    write_atomically(&target, b"[1]").unwrap();
    write_atomically(&target, "[\"英雄\"]".as_bytes()).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "[\"英雄\"]");

    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn parent_that_is_a_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = write_atomically(&blocker.join("skills.json"), b"[]");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
