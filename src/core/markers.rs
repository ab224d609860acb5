use crate::core::settings::{Landmark, MapSettings};
use crate::domain::model::{
    InfoContent, LatLng, Marker, MarkerAnimation, MarkerIcon, MarkerId, MarkerKind,
};
use crate::domain::place::PlaceRecord;

const UNNAMED_PLACE: &str = "Unnamed place";

pub fn center_marker(id: MarkerId, settings: &MapSettings) -> Marker {
    Marker {
        id,
        kind: MarkerKind::Center,
        position: settings.center,
        title: settings.center_marker.title.clone(),
        icon: MarkerIcon::BlueDot,
        animation: MarkerAnimation::Drop,
        info: settings.center_marker.info.clone(),
    }
}

pub fn landmark_marker(id: MarkerId, landmark: &Landmark) -> Marker {
    Marker {
        id,
        kind: MarkerKind::Landmark,
        position: landmark.position,
        title: landmark.title.clone(),
        icon: MarkerIcon::GreenDot,
        animation: MarkerAnimation::None,
        info: InfoContent::new(landmark.title.clone()).text(landmark.description.clone()),
    }
}

pub fn place_marker(id: MarkerId, position: LatLng, record: &PlaceRecord) -> Marker {
    let info = place_info(record);
    Marker {
        id,
        kind: MarkerKind::Place,
        position,
        title: info.heading.clone(),
        icon: MarkerIcon::Default,
        animation: MarkerAnimation::Drop,
        info,
    }
}

/// 名稱、地址、評分，以及（有營業時間時才顯示）營業狀態
pub fn place_info(record: &PlaceRecord) -> InfoContent {
    let name = record.name.as_deref().unwrap_or(UNNAMED_PLACE);
    let address = record.vicinity.as_deref().unwrap_or("N/A");
    // 評分為 0 視同沒有評分
    let rating = match record.rating {
        Some(rating) if rating > 0.0 => format!("{} ⭐", rating),
        _ => "No rating".to_string(),
    };

    let content = InfoContent::new(name)
        .labelled("Address", address)
        .labelled("Rating", rating);

    match &record.opening_hours {
        Some(hours) => {
            let status = if hours.open_now.unwrap_or(false) {
                "Open"
            } else {
                "Closed"
            };
            content.labelled("Status", status)
        }
        None => content,
    }
}
