use crate::domain::model::{InfoContent, MarkerId};
use serde::Serialize;

/// 所有標記共用的單一資訊視窗
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfoWindow {
    anchor: Option<MarkerId>,
    content: Option<InfoContent>,
}

impl InfoWindow {
    pub fn open(&mut self, anchor: MarkerId, content: InfoContent) {
        self.anchor = Some(anchor);
        self.content = Some(content);
    }

    pub fn close(&mut self) {
        self.anchor = None;
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<MarkerId> {
        self.anchor
    }

    /// 最後設定的內容，關閉後仍保留
    pub fn content(&self) -> Option<&InfoContent> {
        self.content.as_ref()
    }
}
