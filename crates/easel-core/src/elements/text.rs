//! Text element.

use super::{ElementBase, ElementKind, ElementTrait, SerializableColor, Theme};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Content shown by a text element that has nothing else to show.
pub const PLACEHOLDER_TEXT: &str = "Double click to edit";

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

impl FontWeight {
    /// CSS-style numeric weight.
    pub fn numeric(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
        }
    }
}

/// Horizontal alignment of text lines within the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    pub font_family: String,
    #[serde(default)]
    pub font_weight: FontWeight,
    pub color: SerializableColor,
    #[serde(default)]
    pub text_align: TextAlign,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl TextElement {
    pub const DEFAULT_WIDTH: f64 = 300.0;
    pub const DEFAULT_HEIGHT: f64 = 80.0;
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;
    pub const DEFAULT_FONT_FAMILY: &'static str = "Inter";
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

    /// Create a text element with default attributes.
    pub fn new(position: Point, theme: Theme) -> Self {
        Self {
            base: ElementBase::new(position, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            content: PLACEHOLDER_TEXT.to_string(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            font_weight: FontWeight::default(),
            color: theme.text_color(),
            text_align: TextAlign::default(),
            line_height: Self::DEFAULT_LINE_HEIGHT,
        }
    }

    /// Copy with different content, stored verbatim.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Whether the element still shows the placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.content == PLACEHOLDER_TEXT
    }

    /// Distance between baselines in canvas units.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }

    /// Lines of content as laid out, split on hard breaks only.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

impl ElementTrait for TextElement {
    const KIND: ElementKind = ElementKind::Text;

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

/// The content a text element keeps once editing ends.
///
/// Empty or whitespace-only input becomes [`PLACEHOLDER_TEXT`]; anything else
/// is kept exactly as typed.
pub fn committed_content(raw: &str) -> String {
    if raw.trim().is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        raw.to_string()
    }
}
