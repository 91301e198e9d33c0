//! Unit tests for snapshot export and import.

use crate::regions::{ChangeScope, ColorToken, PaintAction, RegionId, RegionRecord, RegionStore, Selection};

use super::*;

#[test]
fn test_single_color_exports_minimal_document() {
    let mut store = RegionStore::default();
    store.set_color(
        &RegionId::from("r17"),
        PaintAction::SetColor(ColorToken::from("#3B82F6")),
    );

    let bytes = export_snapshot(&store).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value, serde_json::json!({"r17": {"color": "#3B82F6"}}));

    let mut fresh = RegionStore::default();
    import_snapshot(&mut fresh, &bytes).unwrap();
    assert_eq!(
        fresh.record(&RegionId::from("r17")),
        RegionRecord {
            color: Some(ColorToken::from("#3B82F6")),
            memo: None,
        }
    );
}

#[test]
fn test_export_is_pretty_printed_with_two_spaces() {
    let mut store = RegionStore::default();
    store.set_color(
        &RegionId::from("geo-2"),
        PaintAction::SetColor(ColorToken::from("#EF4444")),
    );

    let text = String::from_utf8(export_snapshot(&store).unwrap()).unwrap();

    assert_eq!(text, "{\n  \"geo-2\": {\n    \"color\": \"#EF4444\"\n  }\n}");
}

#[test]
fn test_round_trip_preserves_mapping() {
    let mut store = RegionStore::default();
    let mut selection = Selection::default();
    store.set_color(
        &RegionId::from("geo-0"),
        PaintAction::SetColor(ColorToken::from("#EAB308")),
    );
    selection.select(RegionId::from("geo-0"), "Sapporo");
    store.set_memo(&selection, "home");
    selection.select(RegionId::from("geo-9"), "Kushiro");
    store.set_memo(&selection, "marshland, 釧路湿原");
    store.set_color(
        &RegionId::from("geo-3"),
        PaintAction::SetColor(ColorToken::from("#22C55E")),
    );

    let bytes = export_snapshot(&store).unwrap();
    let mut restored = RegionStore::default();
    import_snapshot(&mut restored, &bytes).unwrap();

    assert!(restored.same_contents(&store));
    for id in ["geo-0", "geo-3", "geo-9"] {
        let id = RegionId::from(id);
        assert_eq!(restored.record(&id), store.record(&id));
    }
}

#[test]
fn test_export_omits_erased_records() {
    let mut store = RegionStore::default();
    let id = RegionId::from("geo-5");
    store.set_color(&id, PaintAction::SetColor(ColorToken::from("#EF4444")));
    store.set_color(&id, PaintAction::ClearColor);

    let bytes = export_snapshot(&store).unwrap();

    assert_eq!(bytes, b"{}");
    // Still present in memory
    assert_eq!(store.len(), 1);
}

#[test]
fn test_invalid_import_leaves_store_unchanged() {
    let mut store = RegionStore::default();
    store.set_color(
        &RegionId::from("geo-1"),
        PaintAction::SetColor(ColorToken::from("#3B82F6")),
    );
    let before = export_snapshot(&store).unwrap();
    let revision = store.revision();

    for payload in [
        &b"{ this is not json"[..],
        &b""[..],
        &b"[1, 2, 3]"[..],
        &b"\"just a string\""[..],
        &[0xff, 0xfe, 0x00][..],
    ] {
        assert!(import_snapshot(&mut store, payload).is_err());
    }

    assert_eq!(store.revision(), revision);
    assert_eq!(export_snapshot(&store).unwrap(), before);
}

#[test]
fn test_import_replaces_rather_than_merges() {
    let mut store = RegionStore::default();
    store.set_color(
        &RegionId::from("geo-1"),
        PaintAction::SetColor(ColorToken::from("#3B82F6")),
    );

    let summary = import_snapshot(
        &mut store,
        br#"{"geo-7": {"memo": "ferry"}, "geo-8": {}}"#,
    )
    .unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.annotated, 1);
    assert_eq!(summary.change.scope, ChangeScope::All);
    assert_eq!(store.record(&RegionId::from("geo-1")), RegionRecord::default());
    assert_eq!(
        store.record(&RegionId::from("geo-7")).memo.as_deref(),
        Some("ferry")
    );
}

#[test]
fn test_import_keeps_unvalidated_color_tokens() {
    let mut store = RegionStore::default();
    import_snapshot(&mut store, br#"{"geo-1": {"color": "tomato"}}"#).unwrap();
    assert_eq!(
        store.record(&RegionId::from("geo-1")).color,
        Some(ColorToken::from("tomato"))
    );
}
