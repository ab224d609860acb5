use bettiah_maps::domain::model::{CanvasSize, MarkerKind, Viewport};
use bettiah_maps::domain::place::{NearbySearchResponse, SearchRequest};
use bettiah_maps::domain::ports::{MapSurface, PlacesProvider};
use bettiah_maps::{MapConfig, MapController, RecordingSurface};
use std::io::Write;
use tempfile::NamedTempFile;

struct OfflinePlaces;

#[async_trait::async_trait]
impl PlacesProvider for OfflinePlaces {
    async fn nearby_search(
        &self,
        _request: &SearchRequest,
    ) -> bettiah_maps::Result<NearbySearchResponse> {
        Ok(NearbySearchResponse::zero_results())
    }
}

#[test]
fn test_configured_landmarks_are_placed_on_initialize() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[map]
area_name = "Bettiah"
zoom = 15

[canvas]
width = 640
height = 480

[[landmarks]]
title = "Bettiah Raj Palace"
lat = 26.8016
lng = 84.5035
description = "Former seat of the Bettiah Raj"

[[landmarks]]
title = "Sagar Pokhara"
lat = 26.8049
lng = 84.4996
"#,
    )
    .unwrap();

    let config = MapConfig::from_file(file.path()).unwrap();
    let settings = config.to_settings();
    let surface = RecordingSurface::new().with_canvas(config.canvas());
    let mut controller = MapController::new(settings.clone(), OfflinePlaces, surface);

    controller.initialize();

    let markers = controller.markers();
    assert_eq!(markers.len(), settings.landmarks.len() + 1);
    assert_eq!(markers[0].kind, MarkerKind::Center);
    assert_eq!(markers[1].title, "Bettiah Raj Palace");
    assert_eq!(markers[2].kind, MarkerKind::Landmark);
    assert_eq!(controller.viewport(), &Viewport::new(settings.center, 15));
    assert_eq!(
        controller.surface().canvas_size(),
        CanvasSize {
            width: 640,
            height: 480
        }
    );
}

#[test]
fn test_json_snapshot_lists_markers() {
    let config = MapConfig::default();
    let mut controller =
        MapController::new(config.to_settings(), OfflinePlaces, RecordingSurface::new());
    controller.initialize();
    let landmark = controller.markers()[1].id;
    controller.click_marker(landmark).unwrap();

    let json = serde_json::to_value(controller.snapshot()).unwrap();

    assert_eq!(json["viewport"]["zoom"], 14);
    assert_eq!(json["markers"].as_array().unwrap().len(), 2);
    assert_eq!(json["markers"][0]["icon"], "blue_dot");
    assert_eq!(json["info_window"]["anchor"], 1);
}
