use crate::domain::model::{CanvasSize, InfoContent, Marker, MarkerId, Viewport};
use crate::domain::ports::MapSurface;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenInfoWindow {
    pub anchor: MarkerId,
    pub content: InfoContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    ViewChanged { viewport: Viewport },
    MarkerAttached { id: MarkerId, title: String },
    MarkerDetached { id: MarkerId },
    InfoWindowOpened { anchor: MarkerId },
    InfoWindowClosed,
    Notice { message: String },
}

/// 記憶體中的地圖鏡像，記錄每一次呼叫
#[derive(Debug, Default)]
pub struct RecordingSurface {
    canvas: CanvasSize,
    view: Option<Viewport>,
    markers: Vec<Marker>,
    info_window: Option<OpenInfoWindow>,
    notices: Vec<Notice>,
    events: Vec<SurfaceEvent>,
    echo: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    /// 即時把提示與資訊視窗輸出到 stdout
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn view(&self) -> Option<&Viewport> {
        self.view.as_ref()
    }

    pub fn live_markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn info_window(&self) -> Option<&OpenInfoWindow> {
        self.info_window.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }
}

impl MapSurface for RecordingSurface {
    fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    fn set_view(&mut self, viewport: &Viewport) {
        self.view = Some(*viewport);
        self.events.push(SurfaceEvent::ViewChanged {
            viewport: *viewport,
        });
    }

    fn attach_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
        self.events.push(SurfaceEvent::MarkerAttached {
            id: marker.id,
            title: marker.title.clone(),
        });
    }

    fn detach_marker(&mut self, id: MarkerId) {
        self.markers.retain(|marker| marker.id != id);
        self.events.push(SurfaceEvent::MarkerDetached { id });
    }

    fn open_info_window(&mut self, anchor: MarkerId, content: &InfoContent) {
        if self.echo {
            println!("{}", content);
        }
        self.info_window = Some(OpenInfoWindow {
            anchor,
            content: content.clone(),
        });
        self.events.push(SurfaceEvent::InfoWindowOpened { anchor });
    }

    fn close_info_window(&mut self) {
        self.info_window = None;
        self.events.push(SurfaceEvent::InfoWindowClosed);
    }

    fn notify(&mut self, message: &str) {
        if self.echo {
            println!("⚠️  {}", message);
        }
        self.notices.push(Notice {
            message: message.to_string(),
            raised_at: Utc::now(),
        });
        self.events.push(SurfaceEvent::Notice {
            message: message.to_string(),
        });
    }
}
