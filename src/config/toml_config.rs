use crate::adapters::places_http::DEFAULT_ENDPOINT;
use crate::core::settings::{
    CenterMarker, Landmark, MapSettings, BETTIAH_CENTER, DEFAULT_ZOOM, SEARCH_RADIUS_METERS,
};
use crate::domain::model::{CanvasSize, InfoContent, InfoLine, LatLng, MapControls};
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Places nearby search 允許的最大半徑
const MAX_RADIUS_METERS: u32 = 50_000;
const MAX_ZOOM: u8 = 21;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub map: MapSection,
    pub search: SearchSection,
    pub canvas: CanvasSize,
    pub controls: MapControls,
    pub center_marker: CenterMarkerSection,
    pub landmarks: Option<Vec<LandmarkSection>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSection {
    pub area_name: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            area_name: "Bettiah".to_string(),
            center_lat: BETTIAH_CENTER.lat,
            center_lng: BETTIAH_CENTER.lng,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub radius_meters: u32,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            radius_meters: SEARCH_RADIUS_METERS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterMarkerSection {
    pub title: String,
    pub heading: String,
    pub details: Vec<InfoLine>,
}

impl Default for CenterMarkerSection {
    fn default() -> Self {
        let defaults = MapSettings::default().center_marker;
        Self {
            title: defaults.title,
            heading: defaults.info.heading,
            details: defaults.info.lines,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkSection {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub description: String,
}

impl MapConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_MAPS_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得 API key：先讀設定檔，再讀環境變數；未替換的 `${VAR}` 視為未設定
    pub fn api_key(&self) -> Option<String> {
        self.search
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty() && !key.contains("${"))
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn endpoint(&self) -> &str {
        &self.search.endpoint
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn to_settings(&self) -> MapSettings {
        let mut info = InfoContent::new(self.center_marker.heading.clone());
        info.lines = self.center_marker.details.clone();

        let landmarks = match &self.landmarks {
            Some(landmarks) => landmarks
                .iter()
                .map(|l| Landmark {
                    title: l.title.clone(),
                    position: LatLng::new(l.lat, l.lng),
                    description: l.description.clone(),
                })
                .collect(),
            None => MapSettings::default().landmarks,
        };

        MapSettings {
            area_name: self.map.area_name.clone(),
            center: LatLng::new(self.map.center_lat, self.map.center_lng),
            zoom: self.map.zoom,
            search_radius_meters: self.search.radius_meters,
            controls: self.controls.clone(),
            center_marker: CenterMarker {
                title: self.center_marker.title.clone(),
                info,
            },
            landmarks,
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("map.area_name", &self.map.area_name)?;
        validate_range("map.center_lat", self.map.center_lat, -90.0, 90.0)?;
        validate_range("map.center_lng", self.map.center_lng, -180.0, 180.0)?;
        validate_range("map.zoom", self.map.zoom, 0, MAX_ZOOM)?;

        validate_url("search.endpoint", &self.search.endpoint)?;
        validate_range(
            "search.radius_meters",
            self.search.radius_meters,
            1,
            MAX_RADIUS_METERS,
        )?;

        validate_positive_number("canvas.width", self.canvas.width, 1)?;
        validate_positive_number("canvas.height", self.canvas.height, 1)?;

        validate_non_empty_string("center_marker.title", &self.center_marker.title)?;

        for landmark in self.landmarks.iter().flatten() {
            validate_non_empty_string("landmarks.title", &landmark.title)?;
            validate_range("landmarks.lat", landmark.lat, -90.0, 90.0)?;
            validate_range("landmarks.lng", landmark.lng, -180.0, 180.0)?;
        }

        Ok(())
    }
}

impl Validate for MapConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
