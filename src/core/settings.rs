use crate::domain::model::{InfoContent, LatLng, MapControls};

pub const BETTIAH_CENTER: LatLng = LatLng::new(26.8022, 84.5025);
pub const DEFAULT_ZOOM: u8 = 14;
pub const SEARCH_RADIUS_METERS: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub title: String,
    pub position: LatLng,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CenterMarker {
    pub title: String,
    pub info: InfoContent,
}

/// 單一地圖 session 的固定設定
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub area_name: String,
    pub center: LatLng,
    pub zoom: u8,
    pub search_radius_meters: u32,
    pub controls: MapControls,
    pub center_marker: CenterMarker,
    pub landmarks: Vec<Landmark>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            area_name: "Bettiah".to_string(),
            center: BETTIAH_CENTER,
            zoom: DEFAULT_ZOOM,
            search_radius_meters: SEARCH_RADIUS_METERS,
            controls: MapControls::default(),
            center_marker: CenterMarker {
                title: "Bettiah, Bihar".to_string(),
                info: InfoContent::new("Bettiah")
                    .labelled("District", "West Champaran")
                    .labelled("State", "Bihar, India")
                    .text("Welcome to Bettiah Maps!"),
            },
            landmarks: vec![Landmark {
                title: "Bettiah City Center".to_string(),
                position: BETTIAH_CENTER,
                description: "City center area".to_string(),
            }],
        }
    }
}
