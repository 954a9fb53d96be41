//! Image element for embedding raster images.

use super::{ElementBase, ElementKind, ElementTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// How an image fills its element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to fill the box, cropping the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the box, letterboxing the rest.
    Contain,
}

/// An image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(flatten)]
    pub base: ElementBase,
    /// Resolved URL or data handle. Empty until something is uploaded.
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub fit: ImageFit,
    /// Pixel size of the source, when known.
    #[serde(default)]
    pub natural_size: Option<(u32, u32)>,
}

impl ImageElement {
    pub const DEFAULT_WIDTH: f64 = 400.0;
    pub const DEFAULT_HEIGHT: f64 = 300.0;

    /// Create an empty image element.
    pub fn new(position: Point) -> Self {
        Self {
            base: ElementBase::new(position, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            src: String::new(),
            alt: String::new(),
            fit: ImageFit::default(),
            natural_size: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    /// Copy pointing at a new source.
    pub fn with_source(&self, src: impl Into<String>, natural_size: Option<(u32, u32)>) -> Self {
        Self {
            src: src.into(),
            natural_size,
            ..self.clone()
        }
    }

    pub fn has_source(&self) -> bool {
        !self.src.is_empty()
    }

    /// Where the image pixels land in canvas space.
    ///
    /// For [`ImageFit::Cover`] the rectangle overflows the element box and
    /// must be clipped to it; for [`ImageFit::Contain`] it lies inside the
    /// box. Without a known natural size the image is stretched to the box.
    pub fn image_rect(&self) -> Rect {
        let frame = self.base.rect();
        let Some((nw, nh)) = self.natural_size.filter(|(w, h)| *w > 0 && *h > 0) else {
            return frame;
        };
        let (nw, nh) = (nw as f64, nh as f64);
        let sx = frame.width() / nw;
        let sy = frame.height() / nh;
        let scale = match self.fit {
            ImageFit::Cover => sx.max(sy),
            ImageFit::Contain => sx.min(sy),
        };
        let size = (nw * scale, nh * scale);
        let center = frame.center();
        Rect::from_center_size(center, size)
    }
}

impl ElementTrait for ImageElement {
    const KIND: ElementKind = ElementKind::Image;

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}
