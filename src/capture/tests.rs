//! Unit tests for capture scheduling and scene sampling.

use std::path::PathBuf;
use std::time::Duration;

use crate::atlas::{RegionAtlas, RegionFeature};
use crate::regions::{ColorToken, PaintAction, PaintHandler, RegionId, RegionStore, Selection};
use crate::ui::OverlayState;

use super::*;

const SETTLE: Duration = Duration::from_millis(300);

fn atlas_with(count: usize) -> RegionAtlas {
    let features = (0..count)
        .map(|i| RegionFeature {
            id: RegionId::new(format!("geo-{}", i)),
            display_name: format!("Region {}", i),
        })
        .collect();
    RegionAtlas::from_features(features, 64.0)
}

#[test]
fn test_request_closes_both_overlays() {
    let mut service = CaptureService::default();
    let mut overlay = OverlayState {
        menu_open: true,
        memo_panel_open: true,
    };

    service.request(PathBuf::from("map.png"), Duration::ZERO, SETTLE, &mut overlay);

    assert!(!overlay.menu_open);
    assert!(!overlay.memo_panel_open);
    assert_eq!(service.pending().len(), 1);
}

#[test]
fn test_capture_waits_for_settle_interval() {
    let mut service = CaptureService::default();
    let mut overlay = OverlayState::default();
    let start = Duration::from_secs(10);

    service.request(PathBuf::from("map.png"), start, SETTLE, &mut overlay);

    assert!(service.take_due(start).is_empty());
    assert!(service.take_due(start + Duration::from_millis(299)).is_empty());

    let due = service.take_due(start + SETTLE);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].path, PathBuf::from("map.png"));
    assert!(service.pending().is_empty());
}

#[test]
fn test_multiple_captures_stay_independent() {
    let mut service = CaptureService::default();
    let mut overlay = OverlayState::default();

    service.request(PathBuf::from("a.png"), Duration::from_millis(0), SETTLE, &mut overlay);
    service.request(PathBuf::from("b.png"), Duration::from_millis(100), SETTLE, &mut overlay);
    service.request(PathBuf::from("c.png"), Duration::from_millis(100), SETTLE, &mut overlay);
    assert_eq!(service.pending().len(), 3);

    let first = service.take_due(Duration::from_millis(350));
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].path, PathBuf::from("a.png"));

    let rest = service.take_due(Duration::from_millis(400));
    let paths: Vec<_> = rest.iter().map(|c| c.path.clone()).collect();
    assert_eq!(paths, vec![PathBuf::from("b.png"), PathBuf::from("c.png")]);
}

#[test]
fn test_scene_uses_visuals_at_sampling_time() {
    let atlas = atlas_with(2);
    let mut scheduler = RenderScheduler::default();
    scheduler.set_regions(atlas.ids());

    let mut store = RegionStore::default();
    let selection = Selection::default();
    let handler = PaintHandler::default();
    scheduler.schedule(&store, &selection, handler.id());

    // Painted while the capture was waiting
    store.set_color(
        &RegionId::from("geo-1"),
        PaintAction::SetColor(ColorToken::from("#3B82F6")),
    );
    scheduler.schedule(&store, &selection, handler.id());

    let scene = MapScene::sample(&atlas, &scheduler).unwrap();
    let blue = scene
        .tiles
        .iter()
        .find(|tile| tile.rect == atlas.tiles[1].rect)
        .unwrap();
    assert_eq!(blue.fill, [0x3B, 0x82, 0xF6, 0xFF]);
}

#[test]
fn test_selected_tile_is_drawn_last() {
    let atlas = atlas_with(3);
    let mut scheduler = RenderScheduler::default();
    scheduler.set_regions(atlas.ids());

    let store = RegionStore::default();
    let mut selection = Selection::default();
    selection.select(RegionId::from("geo-0"), "Region 0");
    scheduler.schedule(&store, &selection, PaintHandler::default().id());

    let scene = MapScene::sample(&atlas, &scheduler).unwrap();
    let last = scene.tiles.last().unwrap();
    assert!(last.raised);
    assert_eq!(last.rect, atlas.tiles[0].rect);
}

#[test]
fn test_empty_atlas_cannot_be_captured() {
    let atlas = RegionAtlas::default();
    let scheduler = RenderScheduler::default();
    assert!(matches!(
        MapScene::sample(&atlas, &scheduler),
        Err(CaptureError::EmptyScene)
    ));
}

#[test]
fn test_capture_leaves_store_and_selection_alone() {
    let atlas = atlas_with(2);
    let mut scheduler = RenderScheduler::default();
    scheduler.set_regions(atlas.ids());

    let mut store = RegionStore::default();
    let mut selection = Selection::default();
    selection.select(RegionId::from("geo-0"), "Region 0");
    store.set_memo(&selection, "keep me");
    scheduler.schedule(&store, &selection, PaintHandler::default().id());
    let revision = store.revision();

    let scene = MapScene::sample(&atlas, &scheduler).unwrap();
    let image = TileRasterizer
        .rasterize(&scene, &RasterOptions::default())
        .unwrap();
    encode_png(image).unwrap();

    assert_eq!(store.revision(), revision);
    assert!(selection.is_selected(&RegionId::from("geo-0")));
}
