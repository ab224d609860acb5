use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

const TILE_SIZE: f64 = 256.0;

/// 範圍縮放的上限，避免單一結果直接放大到街道層級
pub const MAX_FIT_ZOOM: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn from_point(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// 涵蓋所有點的最小範圍；沒有點時回傳 `None`
    pub fn from_points<I: IntoIterator<Item = LatLng>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// 在 Web Mercator 地圖上，讓 `bounds` 完整放進 `canvas` 的最大整數縮放等級
    pub fn fit(bounds: &LatLngBounds, canvas: CanvasSize) -> Self {
        let lat_fraction =
            (mercator_y(bounds.north_east.lat) - mercator_y(bounds.south_west.lat)) / (2.0 * PI);
        let lng_fraction = (bounds.north_east.lng - bounds.south_west.lng) / 360.0;

        let zoom = zoom_for(canvas.height, lat_fraction)
            .min(zoom_for(canvas.width, lng_fraction))
            .floor()
            .clamp(0.0, f64::from(MAX_FIT_ZOOM));

        Self {
            center: bounds.center(),
            zoom: zoom as u8,
        }
    }
}

fn mercator_y(lat: f64) -> f64 {
    let sin = lat.to_radians().sin().clamp(-0.9999, 0.9999);
    ((1.0 + sin) / (1.0 - sin)).ln() / 2.0
}

fn zoom_for(pixels: u32, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return f64::INFINITY;
    }
    (f64::from(pixels) / TILE_SIZE / fraction).log2()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapTypeId {
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapTypeControlStyle {
    Default,
    HorizontalBar,
    DropdownMenu,
}

/// 地圖上啟用的控制項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapControls {
    pub map_type_control: bool,
    pub map_type_control_style: MapTypeControlStyle,
    pub map_type_ids: Vec<MapTypeId>,
    pub street_view_control: bool,
    pub fullscreen_control: bool,
    pub zoom_control: bool,
}

impl Default for MapControls {
    fn default() -> Self {
        Self {
            map_type_control: true,
            map_type_control_style: MapTypeControlStyle::DropdownMenu,
            map_type_ids: vec![
                MapTypeId::Roadmap,
                MapTypeId::Satellite,
                MapTypeId::Hybrid,
                MapTypeId::Terrain,
            ],
            street_view_control: true,
            fullscreen_control: true,
            zoom_control: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Center,
    Landmark,
    Place,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    Default,
    BlueDot,
    GreenDot,
}

impl MarkerIcon {
    pub fn url(&self) -> Option<&'static str> {
        match self {
            MarkerIcon::Default => None,
            MarkerIcon::BlueDot => Some("http://maps.google.com/mapfiles/ms/icons/blue-dot.png"),
            MarkerIcon::GreenDot => Some("http://maps.google.com/mapfiles/ms/icons/green-dot.png"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerAnimation {
    None,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoLine {
    pub label: Option<String>,
    pub text: String,
}

/// 點擊標記時顯示在共用資訊視窗的內容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoContent {
    pub heading: String,
    pub lines: Vec<InfoLine>,
}

impl InfoContent {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn labelled(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.lines.push(InfoLine {
            label: Some(label.into()),
            text: text.into(),
        });
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.lines.push(InfoLine {
            label: None,
            text: text.into(),
        });
        self
    }

    pub fn line(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label.as_deref() == Some(label))
            .map(|line| line.text.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"info-window\">\n");
        html.push_str(&format!("    <h3>{}</h3>\n", escape_html(&self.heading)));
        for line in &self.lines {
            match &line.label {
                Some(label) => html.push_str(&format!(
                    "    <p><strong>{}:</strong> {}</p>\n",
                    escape_html(label),
                    escape_html(&line.text)
                )),
                None => html.push_str(&format!("    <p>{}</p>\n", escape_html(&line.text))),
            }
        }
        html.push_str("</div>");
        html
    }
}

impl fmt::Display for InfoContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading)?;
        for line in &self.lines {
            match &line.label {
                Some(label) => write!(f, "\n  {}: {}", label, line.text)?,
                None => write!(f, "\n  {}", line.text)?,
            }
        }
        Ok(())
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    pub kind: MarkerKind,
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
    pub animation: MarkerAnimation,
    pub info: InfoContent,
}
