use harvester_core::Record;
use harvester_engine::{emit, emit_with, EmitFormat, HarvestOutcome};
use pretty_assertions::assert_eq;

fn outcome() -> HarvestOutcome {
    HarvestOutcome::new(
        vec![
            Record::new("Fireball", "火球术")
                .with_field("tags", vec!["法术".to_string(), "火焰".to_string()])
                .with_field("description", "造成 \"火焰\" 伤害"),
            Record::new("Frost_Nova", "冰霜新星"),
        ],
        5,
    )
}

#[test]
fn emits_records_only_with_unicode_intact() {
    let bytes = emit(&outcome()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text,
        r#"[{"id":"Fireball","name":"火球术","description":"造成 \"火焰\" 伤害","tags":["法术","火焰"]},{"id":"Frost_Nova","name":"冰霜新星"}]"#
    );
    assert!(!text.contains("\\u"));
    assert!(!text.contains("attempted"));
}

#[test]
fn emission_is_idempotent() {
    let outcome = outcome();
    assert_eq!(emit(&outcome).unwrap(), emit(&outcome).unwrap());
    assert_eq!(
        emit_with(&outcome, EmitFormat::Pretty).unwrap(),
        emit_with(&outcome, EmitFormat::Pretty).unwrap()
    );
}

#[test]
fn pretty_format_is_the_same_document() {
    let compact: serde_json::Value = serde_json::from_slice(&emit(&outcome()).unwrap()).unwrap();
    let pretty_bytes = emit_with(&outcome(), EmitFormat::Pretty).unwrap();
    let pretty: serde_json::Value = serde_json::from_slice(&pretty_bytes).unwrap();
    assert_eq!(compact, pretty);
    assert!(pretty_bytes.contains(&b'\n'));
}

#[test]
fn empty_outcome_emits_empty_array() {
    assert_eq!(emit(&HarvestOutcome::empty()).unwrap(), b"[]");
}

#[test]
fn outcome_counts_stay_consistent() {
    let outcome = outcome();
    assert_eq!(outcome.attempted(), 5);
    assert_eq!(outcome.succeeded(), 2);
    assert_eq!(outcome.failed(), 3);

    let clamped = HarvestOutcome::new(vec![Record::new("a", "a")], 0);
    assert_eq!(clamped.attempted(), 1);
}
