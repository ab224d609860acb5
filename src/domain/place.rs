use crate::domain::model::LatLng;
use crate::utils::error::MapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nearby search 支援的地點類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Airport,
    Atm,
    Bakery,
    Bank,
    BusStation,
    Cafe,
    Church,
    Dentist,
    Doctor,
    GasStation,
    HinduTemple,
    Hospital,
    Library,
    Lodging,
    Mosque,
    Park,
    Pharmacy,
    Police,
    PostOffice,
    Restaurant,
    School,
    ShoppingMall,
    Store,
    TouristAttraction,
    TrainStation,
    University,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 26] = [
        PlaceCategory::Airport,
        PlaceCategory::Atm,
        PlaceCategory::Bakery,
        PlaceCategory::Bank,
        PlaceCategory::BusStation,
        PlaceCategory::Cafe,
        PlaceCategory::Church,
        PlaceCategory::Dentist,
        PlaceCategory::Doctor,
        PlaceCategory::GasStation,
        PlaceCategory::HinduTemple,
        PlaceCategory::Hospital,
        PlaceCategory::Library,
        PlaceCategory::Lodging,
        PlaceCategory::Mosque,
        PlaceCategory::Park,
        PlaceCategory::Pharmacy,
        PlaceCategory::Police,
        PlaceCategory::PostOffice,
        PlaceCategory::Restaurant,
        PlaceCategory::School,
        PlaceCategory::ShoppingMall,
        PlaceCategory::Store,
        PlaceCategory::TouristAttraction,
        PlaceCategory::TrainStation,
        PlaceCategory::University,
    ];

    /// 服務端的類型標籤，例如 `gas_station`
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Airport => "airport",
            PlaceCategory::Atm => "atm",
            PlaceCategory::Bakery => "bakery",
            PlaceCategory::Bank => "bank",
            PlaceCategory::BusStation => "bus_station",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::Church => "church",
            PlaceCategory::Dentist => "dentist",
            PlaceCategory::Doctor => "doctor",
            PlaceCategory::GasStation => "gas_station",
            PlaceCategory::HinduTemple => "hindu_temple",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Library => "library",
            PlaceCategory::Lodging => "lodging",
            PlaceCategory::Mosque => "mosque",
            PlaceCategory::Park => "park",
            PlaceCategory::Pharmacy => "pharmacy",
            PlaceCategory::Police => "police",
            PlaceCategory::PostOffice => "post_office",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::School => "school",
            PlaceCategory::ShoppingMall => "shopping_mall",
            PlaceCategory::Store => "store",
            PlaceCategory::TouristAttraction => "tourist_attraction",
            PlaceCategory::TrainStation => "train_station",
            PlaceCategory::University => "university",
        }
    }

    /// 顯示用名稱，所有底線都換成空白
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        PlaceCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| MapError::UnknownCategory {
                value: s.to_string(),
            })
    }
}

/// 單次 nearby search 查詢，每次呼叫建立後即丟棄
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    pub location: LatLng,
    pub radius_meters: u32,
    pub category: PlaceCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchStatus {
    Ok,
    ZeroResults,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    #[serde(other)]
    UnknownError,
}

impl SearchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Ok => "OK",
            SearchStatus::ZeroResults => "ZERO_RESULTS",
            SearchStatus::InvalidRequest => "INVALID_REQUEST",
            SearchStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            SearchStatus::RequestDenied => "REQUEST_DENIED",
            SearchStatus::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub geometry: Option<Geometry>,
    pub opening_hours: Option<OpeningHours>,
}

impl PlaceRecord {
    pub fn position(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    pub status: SearchStatus,
    #[serde(default)]
    pub results: Vec<PlaceRecord>,
    pub error_message: Option<String>,
    pub next_page_token: Option<String>,
}

impl NearbySearchResponse {
    pub fn ok(results: Vec<PlaceRecord>) -> Self {
        Self {
            status: SearchStatus::Ok,
            results,
            error_message: None,
            next_page_token: None,
        }
    }

    pub fn zero_results() -> Self {
        Self {
            status: SearchStatus::ZeroResults,
            results: Vec::new(),
            error_message: None,
            next_page_token: None,
        }
    }
}
