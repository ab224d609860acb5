use crate::core::info_window::InfoWindow;
use crate::core::markers;
use crate::core::settings::MapSettings;
use crate::domain::model::{LatLngBounds, Marker, MarkerId, Viewport};
use crate::domain::place::{NearbySearchResponse, PlaceCategory, SearchRequest, SearchStatus};
use crate::domain::ports::{MapSurface, PlacesProvider};
use crate::utils::error::{MapError, Result};
use serde::Serialize;
use std::sync::Arc;

/// 由 [`MapController::begin_search`] 發出；只有最新的 ticket 能把結果畫到地圖上
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    generation: u64,
    request: SearchRequest,
}

impl SearchTicket {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn category(&self) -> PlaceCategory {
        self.request.category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Populated { markers: usize },
    NoResults,
    /// 搜尋進行中時地圖已被清除（新的搜尋、重設或重新初始化）
    Stale,
}

/// 地圖狀態的唯讀快照，用於輸出報告
#[derive(Debug, Serialize)]
pub struct MapSnapshot<'a> {
    pub viewport: &'a Viewport,
    pub markers: &'a [Marker],
    pub info_window: &'a InfoWindow,
}

pub struct MapController<P: PlacesProvider, S: MapSurface> {
    settings: MapSettings,
    places: Arc<P>,
    surface: S,
    viewport: Viewport,
    markers: Vec<Marker>,
    info_window: InfoWindow,
    next_marker_id: u64,
    generation: u64,
    initialized: bool,
}

impl<P: PlacesProvider, S: MapSurface> MapController<P, S> {
    pub fn new(settings: MapSettings, places: P, surface: S) -> Self {
        Self::with_shared_places(settings, Arc::new(places), surface)
    }

    pub fn with_shared_places(settings: MapSettings, places: Arc<P>, surface: S) -> Self {
        let viewport = Viewport::new(settings.center, settings.zoom);
        Self {
            settings,
            places,
            surface,
            viewport,
            markers: Vec::new(),
            info_window: InfoWindow::default(),
            next_marker_id: 0,
            generation: 0,
            initialized: false,
        }
    }

    /// 顯示預設視角、中心標記與地標
    pub fn initialize(&mut self) {
        tracing::info!(
            "Initializing map for {} at {} (zoom {})",
            self.settings.area_name,
            self.settings.center,
            self.settings.zoom
        );
        self.restore_default_view();
        self.clear_markers();
        self.populate_defaults();
        self.initialized = true;
    }

    /// 回到預設視角與標記
    pub fn reset(&mut self) {
        tracing::debug!("Resetting map");
        self.restore_default_view();
        self.clear_markers();
        self.populate_defaults();
        self.initialized = true;
    }

    /// 從地圖移除所有標記並清空集合；進行中的搜尋因此失效
    pub fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            self.surface.detach_marker(marker.id);
        }
        if self.info_window.is_open() {
            self.info_window.close();
            self.surface.close_info_window();
        }
        self.next_marker_id = 0;
        self.generation += 1;
    }

    pub async fn search_by_category(&mut self, category: PlaceCategory) -> Result<SearchOutcome> {
        let ticket = self.begin_search(category)?;
        let places = Arc::clone(&self.places);
        let result = places.nearby_search(ticket.request()).await;
        self.complete_search(ticket, result)
    }

    /// 搜尋前半段：清除地圖並建立查詢
    pub fn begin_search(&mut self, category: PlaceCategory) -> Result<SearchTicket> {
        if !self.initialized {
            return Err(MapError::NotInitialized);
        }

        self.clear_markers();

        let request = SearchRequest {
            location: self.settings.center,
            radius_meters: self.settings.search_radius_meters,
            category,
        };
        tracing::info!(
            "Searching {} within {} m of {}",
            category,
            request.radius_meters,
            request.location
        );

        Ok(SearchTicket {
            generation: self.generation,
            request,
        })
    }

    /// 搜尋後半段：`ticket` 仍有效時才畫出結果
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<NearbySearchResponse>,
    ) -> Result<SearchOutcome> {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale {} results (generation {} < {})",
                ticket.category(),
                ticket.generation,
                self.generation
            );
            return Ok(SearchOutcome::Stale);
        }

        let category = ticket.category();
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Nearby search for {} failed: {}", category, e);
                self.notify_no_results(category);
                return Err(e);
            }
        };

        match response.status {
            SearchStatus::Ok => {}
            SearchStatus::ZeroResults => {
                self.notify_no_results(category);
                return Ok(SearchOutcome::NoResults);
            }
            status => {
                tracing::warn!("Nearby search for {} returned {}", category, status.as_str());
                self.notify_no_results(category);
                return Err(MapError::ProviderStatus {
                    status: status.as_str().to_string(),
                    message: response.error_message.unwrap_or_default(),
                });
            }
        }

        let mut positions = Vec::with_capacity(response.results.len());
        for record in &response.results {
            let Some(position) = record.position() else {
                tracing::debug!("Skipping {:?}: no location", record.name);
                continue;
            };
            let id = self.next_id();
            self.add_marker(markers::place_marker(id, position, record));
            positions.push(position);
        }

        let Some(bounds) = LatLngBounds::from_points(positions.iter().copied()) else {
            self.notify_no_results(category);
            return Ok(SearchOutcome::NoResults);
        };

        self.viewport = Viewport::fit(&bounds, self.surface.canvas_size());
        self.surface.set_view(&self.viewport);
        tracing::info!(
            "Placed {} of {} {} results",
            positions.len(),
            response.results.len(),
            category
        );

        Ok(SearchOutcome::Populated {
            markers: positions.len(),
        })
    }

    /// 在 `id` 標記上開啟共用資訊視窗，取代先前的內容
    pub fn click_marker(&mut self, id: MarkerId) -> Result<()> {
        let marker = self
            .markers
            .iter()
            .find(|marker| marker.id == id)
            .ok_or(MapError::MarkerNotFound { id: id.0 })?;

        self.info_window.open(marker.id, marker.info.clone());
        self.surface.open_info_window(marker.id, &marker.info);
        Ok(())
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn info_window(&self) -> &InfoWindow {
        &self.info_window
    }

    pub fn snapshot(&self) -> MapSnapshot<'_> {
        MapSnapshot {
            viewport: &self.viewport,
            markers: &self.markers,
            info_window: &self.info_window,
        }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn places(&self) -> Arc<P> {
        Arc::clone(&self.places)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn restore_default_view(&mut self) {
        self.viewport = Viewport::new(self.settings.center, self.settings.zoom);
        self.surface.set_view(&self.viewport);
    }

    fn populate_defaults(&mut self) {
        let id = self.next_id();
        let center = markers::center_marker(id, &self.settings);
        self.add_marker(center);

        for index in 0..self.settings.landmarks.len() {
            let id = self.next_id();
            let landmark = markers::landmark_marker(id, &self.settings.landmarks[index]);
            self.add_marker(landmark);
        }
    }

    fn add_marker(&mut self, marker: Marker) {
        tracing::debug!("Adding marker {} '{}' at {}", marker.id, marker.title, marker.position);
        self.surface.attach_marker(&marker);
        self.markers.push(marker);
    }

    fn next_id(&mut self) -> MarkerId {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;
        id
    }

    fn notify_no_results(&mut self, category: PlaceCategory) {
        let message = format!(
            "No {}s found in {} area.",
            category.display_name(),
            self.settings.area_name
        );
        self.surface.notify(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::surface::RecordingSurface;
    use crate::core::settings::BETTIAH_CENTER;
    use crate::domain::model::{LatLng, MarkerKind};
    use crate::domain::place::{Geometry, OpeningHours, PlaceRecord};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CannedPlaces {
        response: Mutex<Option<Result<NearbySearchResponse>>>,
        calls: AtomicUsize,
    }

    impl CannedPlaces {
        fn new(response: Result<NearbySearchResponse>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlacesProvider for CannedPlaces {
        async fn nearby_search(&self, _request: &SearchRequest) -> Result<NearbySearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(NearbySearchResponse::zero_results()))
        }
    }

    fn place(name: &str, lat: f64, lng: f64) -> PlaceRecord {
        PlaceRecord {
            name: Some(name.to_string()),
            vicinity: Some(format!("{} Road, Bettiah", name)),
            rating: Some(4.1),
            geometry: Some(Geometry {
                location: Some(LatLng::new(lat, lng)),
            }),
            ..PlaceRecord::default()
        }
    }

    fn controller(
        response: Result<NearbySearchResponse>,
    ) -> MapController<CannedPlaces, RecordingSurface> {
        let mut controller = MapController::new(
            MapSettings::default(),
            CannedPlaces::new(response),
            RecordingSurface::new(),
        );
        controller.initialize();
        controller
    }

    #[test]
    fn test_initialize_shows_center_and_landmarks() {
        let controller = controller(Ok(NearbySearchResponse::zero_results()));

        assert_eq!(controller.markers().len(), 2);
        assert_eq!(controller.markers()[0].kind, MarkerKind::Center);
        assert_eq!(controller.markers()[1].title, "Bettiah City Center");
        assert_eq!(controller.viewport(), &Viewport::new(BETTIAH_CENTER, 14));
        assert_eq!(controller.surface().live_markers().len(), 2);
        assert!(!controller.info_window().is_open());
    }

    #[test]
    fn test_search_before_initialize_fails() {
        let mut controller = MapController::new(
            MapSettings::default(),
            CannedPlaces::new(Ok(NearbySearchResponse::zero_results())),
            RecordingSurface::new(),
        );

        let result = tokio_test::block_on(controller.search_by_category(PlaceCategory::Hospital));
        assert!(matches!(result, Err(MapError::NotInitialized)));
    }

    #[test]
    fn test_hospital_search_skips_records_without_location() {
        let mut full = place("MJK Hospital", 26.79, 84.51);
        full.opening_hours = Some(OpeningHours {
            open_now: Some(true),
        });
        let missing = PlaceRecord {
            name: Some("Unmapped Clinic".to_string()),
            ..PlaceRecord::default()
        };
        let mut controller = controller(Ok(NearbySearchResponse::ok(vec![full, missing])));

        let outcome =
            tokio_test::block_on(controller.search_by_category(PlaceCategory::Hospital)).unwrap();

        assert_eq!(outcome, SearchOutcome::Populated { markers: 1 });
        assert_eq!(controller.markers().len(), 1);
        let marker = &controller.markers()[0];
        assert_eq!(marker.title, "MJK Hospital");
        assert_eq!(marker.info.line("Rating"), Some("4.1 ⭐"));
        assert_eq!(marker.info.line("Address"), Some("MJK Hospital Road, Bettiah"));
        assert_eq!(controller.viewport().center, LatLng::new(26.79, 84.51));
        assert!(controller.surface().notices().is_empty());
    }

    #[test]
    fn test_search_fits_viewport_to_results() {
        let mut controller = controller(Ok(NearbySearchResponse::ok(vec![
            place("North", 26.82, 84.49),
            place("South", 26.80, 84.52),
        ])));

        tokio_test::block_on(controller.search_by_category(PlaceCategory::Restaurant)).unwrap();

        let viewport = controller.viewport();
        assert_eq!(viewport.zoom, 15);
        assert!((viewport.center.lat - 26.81).abs() < 1e-9);
        assert_eq!(controller.surface().view(), Some(viewport));
    }

    #[test]
    fn test_zero_results_notice_names_category() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));

        let outcome =
            tokio_test::block_on(controller.search_by_category(PlaceCategory::GasStation)).unwrap();

        assert_eq!(outcome, SearchOutcome::NoResults);
        assert!(controller.markers().is_empty());
        assert!(controller.surface().live_markers().is_empty());
        assert_eq!(controller.surface().notices().len(), 1);
        assert_eq!(
            controller.surface().notices()[0].message,
            "No gas stations found in Bettiah area."
        );
    }

    #[test]
    fn test_provider_failure_notifies_and_propagates() {
        let mut controller = controller(Err(MapError::ApiStatusError { status: 502 }));

        let result = tokio_test::block_on(controller.search_by_category(PlaceCategory::Bank));

        assert!(matches!(result, Err(MapError::ApiStatusError { status: 502 })));
        assert!(controller.markers().is_empty());
        assert_eq!(controller.surface().notices().len(), 1);
        assert!(controller.surface().notices()[0].message.contains("banks"));
    }

    #[test]
    fn test_denied_status_becomes_provider_error() {
        let response = NearbySearchResponse {
            status: SearchStatus::RequestDenied,
            results: Vec::new(),
            error_message: Some("The provided API key is invalid.".to_string()),
            next_page_token: None,
        };
        let mut controller = controller(Ok(response));

        let err = tokio_test::block_on(controller.search_by_category(PlaceCategory::Atm))
            .unwrap_err();

        match err {
            MapError::ProviderStatus { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert!(message.contains("API key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(controller.surface().notices().len(), 1);
    }

    #[test]
    fn test_results_without_any_location_count_as_empty() {
        let mut controller = controller(Ok(NearbySearchResponse::ok(vec![PlaceRecord {
            name: Some("Nowhere".to_string()),
            ..PlaceRecord::default()
        }])));

        let outcome =
            tokio_test::block_on(controller.search_by_category(PlaceCategory::Park)).unwrap();

        assert_eq!(outcome, SearchOutcome::NoResults);
        assert!(controller.markers().is_empty());
        assert_eq!(controller.viewport(), &Viewport::new(BETTIAH_CENTER, 14));
        assert_eq!(controller.surface().notices().len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut controller = controller(Ok(NearbySearchResponse::ok(vec![place(
            "Cafe", 26.81, 84.50,
        )])));
        tokio_test::block_on(controller.search_by_category(PlaceCategory::Cafe)).unwrap();

        controller.reset();
        let once = (controller.markers().to_vec(), *controller.viewport());
        controller.reset();
        let twice = (controller.markers().to_vec(), *controller.viewport());

        assert_eq!(once, twice);
        assert_eq!(once.0.len(), 2);
        assert_eq!(once.1, Viewport::new(BETTIAH_CENTER, 14));
        assert_eq!(controller.surface().live_markers().len(), 2);
    }

    #[test]
    fn test_clear_closes_anchored_info_window() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));
        let id = controller.markers()[0].id;
        controller.click_marker(id).unwrap();
        assert!(controller.surface().info_window().is_some());

        controller.clear_markers();

        assert!(controller.markers().is_empty());
        assert!(!controller.info_window().is_open());
        assert!(controller.surface().info_window().is_none());
    }

    #[test]
    fn test_click_uses_single_shared_info_window() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));
        let center = controller.markers()[0].id;
        let landmark = controller.markers()[1].id;

        controller.click_marker(center).unwrap();
        controller.click_marker(landmark).unwrap();

        assert_eq!(controller.info_window().anchor(), Some(landmark));
        assert_eq!(
            controller.info_window().content().map(|c| c.heading.as_str()),
            Some("Bettiah City Center")
        );
        assert!(matches!(
            controller.click_marker(MarkerId(99)),
            Err(MapError::MarkerNotFound { id: 99 })
        ));
    }

    #[test]
    fn test_reset_during_search_discards_completion() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));

        let ticket = controller.begin_search(PlaceCategory::School).unwrap();
        controller.reset();
        let outcome = controller
            .complete_search(
                ticket,
                Ok(NearbySearchResponse::ok(vec![place("DAV School", 26.8, 84.5)])),
            )
            .unwrap();

        assert_eq!(outcome, SearchOutcome::Stale);
        assert_eq!(controller.markers().len(), 2);
        assert!(controller.surface().notices().is_empty());
    }

    #[test]
    fn test_initialize_during_search_discards_completion() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));

        let ticket = controller.begin_search(PlaceCategory::Hospital).unwrap();
        controller.initialize();
        let outcome = controller
            .complete_search(
                ticket,
                Ok(NearbySearchResponse::ok(vec![place("MJK Hospital", 26.79, 84.51)])),
            )
            .unwrap();

        assert_eq!(outcome, SearchOutcome::Stale);
        let kinds: Vec<MarkerKind> = controller.markers().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MarkerKind::Center, MarkerKind::Landmark]);
        assert_eq!(controller.surface().live_markers().len(), 2);
    }

    #[test]
    fn test_manual_clear_during_search_discards_completion() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));

        let ticket = controller.begin_search(PlaceCategory::Bank).unwrap();
        controller.clear_markers();
        let outcome = controller
            .complete_search(
                ticket,
                Ok(NearbySearchResponse::ok(vec![place("State Bank", 26.8, 84.5)])),
            )
            .unwrap();

        assert_eq!(outcome, SearchOutcome::Stale);
        assert!(controller.markers().is_empty());
    }

    #[test]
    fn test_newer_search_wins_over_older_completion() {
        let mut controller = controller(Ok(NearbySearchResponse::zero_results()));

        let first = controller.begin_search(PlaceCategory::Pharmacy).unwrap();
        let second = controller.begin_search(PlaceCategory::Hospital).unwrap();

        let second_outcome = controller
            .complete_search(
                second,
                Ok(NearbySearchResponse::ok(vec![place("Hospital", 26.8, 84.5)])),
            )
            .unwrap();
        let first_outcome = controller
            .complete_search(
                first,
                Ok(NearbySearchResponse::ok(vec![place("Pharmacy", 26.81, 84.51)])),
            )
            .unwrap();

        assert_eq!(second_outcome, SearchOutcome::Populated { markers: 1 });
        assert_eq!(first_outcome, SearchOutcome::Stale);
        assert_eq!(controller.markers().len(), 1);
        assert_eq!(controller.markers()[0].title, "Hospital");
    }

    #[tokio::test]
    async fn test_consecutive_searches_never_mix_markers() {
        let mut controller = controller(Ok(NearbySearchResponse::ok(vec![
            place("A", 26.80, 84.50),
            place("B", 26.81, 84.51),
        ])));

        controller
            .search_by_category(PlaceCategory::Restaurant)
            .await
            .unwrap();
        assert_eq!(controller.markers().len(), 2);

        let outcome = controller
            .search_by_category(PlaceCategory::Restaurant)
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::NoResults);
        assert!(controller.markers().is_empty());
        assert!(controller.surface().live_markers().is_empty());
        assert_eq!(controller.places().calls.load(Ordering::SeqCst), 2);
    }
}
