//! Video element.

use super::{ElementBase, ElementKind, ElementTrait};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A video element. Playback itself belongs to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoElement {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub auto_play: bool,
    #[serde(rename = "loop", default)]
    pub looping: bool,
    #[serde(default = "default_muted")]
    pub muted: bool,
}

fn default_muted() -> bool {
    true
}

impl VideoElement {
    pub const DEFAULT_WIDTH: f64 = 480.0;
    pub const DEFAULT_HEIGHT: f64 = 270.0;

    /// Create an empty, muted video element.
    pub fn new(position: Point) -> Self {
        Self {
            base: ElementBase::new(position, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            src: String::new(),
            auto_play: false,
            looping: false,
            muted: true,
        }
    }

    /// Copy pointing at a new source.
    pub fn with_source(&self, src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..self.clone()
        }
    }

    pub fn has_source(&self) -> bool {
        !self.src.is_empty()
    }
}

impl ElementTrait for VideoElement {
    const KIND: ElementKind = ElementKind::Video;

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let video = VideoElement::new(Point::ZERO);
        assert!(video.muted);
        assert!(!video.auto_play);
        assert!(!video.looping);
        assert!(!video.has_source());
    }

    #[test]
    fn test_with_source_keeps_id() {
        let video = VideoElement::new(Point::ZERO);
        let loaded = video.with_source("data:video/mp4;base64,AAAA");
        assert!(loaded.has_source());
        assert_eq!(loaded.base.id, video.base.id);
        assert!(!video.has_source());
    }

    #[test]
    fn test_missing_flags_use_defaults() {
        let video = VideoElement::new(Point::ZERO);
        let mut json = serde_json::to_value(&video).unwrap();
        let map = json.as_object_mut().unwrap();
        map.remove("muted");
        map.remove("loop");
        let back: VideoElement = serde_json::from_value(json).unwrap();
        assert!(back.muted);
        assert!(!back.looping);
    }
}
