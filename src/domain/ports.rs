use crate::domain::model::{CanvasSize, InfoContent, Marker, MarkerId, Viewport};
use crate::domain::place::{NearbySearchResponse, SearchRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端地點查詢。實作只負責傳輸與解碼，狀態由 controller 判斷
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby_search(&self, request: &SearchRequest) -> Result<NearbySearchResponse>;
}

/// 地圖的渲染端，只鏡像 controller 的指令
pub trait MapSurface: Send {
    fn canvas_size(&self) -> CanvasSize;
    fn set_view(&mut self, viewport: &Viewport);
    fn attach_marker(&mut self, marker: &Marker);
    fn detach_marker(&mut self, id: MarkerId);
    fn open_info_window(&mut self, anchor: MarkerId, content: &InfoContent);
    fn close_info_window(&mut self);
    fn notify(&mut self, message: &str);
}
