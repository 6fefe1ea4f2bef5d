use std::collections::BTreeMap;

use harvester_core::{FieldValue, Record};
use pretty_assertions::assert_eq;

#[test]
fn record_serializes_flat_with_id_and_name_first() {
    let record = Record::new("Fireball", "火球术")
        .with_field("tags", vec!["法术".to_string()])
        .with_field("icon", "/i.webp");

    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"id":"Fireball","name":"火球术","icon":"/i.webp","tags":["法术"]}"#
    );
}

#[test]
fn reserved_keys_cannot_be_overwritten() {
    let record = Record::new("a", "A").with_field("id", "b").with_field("name", "B");
    assert_eq!(record.id(), "a");
    assert_eq!(record.name(), "A");
    assert_eq!(record.field("id"), None);
}

#[test]
fn nested_records_serialize_as_objects() {
    let record = Record::new("h", "H").with_field(
        "traits",
        vec![Record::new("t", "t").with_field("unlock_level", "1")],
    );
    assert!(matches!(record.field("traits"), Some(FieldValue::Records(r)) if r.len() == 1));

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["traits"][0]["unlock_level"], "1");
}

#[test]
fn missing_fields_fill_gaps_without_overriding() {
    let extras = BTreeMap::from([
        ("desc".to_string(), "狂战士".to_string()),
        ("icon".to_string(), "/h.webp".to_string()),
        ("id".to_string(), "other".to_string()),
    ]);
    let record = Record::new("Rehan", "雷恩")
        .with_field("icon", "/own.webp")
        .with_missing_fields(&extras);

    assert_eq!(record.id(), "Rehan");
    assert_eq!(record.text("desc"), Some("狂战士"));
    assert_eq!(record.text("icon"), Some("/own.webp"));
}
