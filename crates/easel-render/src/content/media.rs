//! Image and video content.

use super::{
    ContentRenderer, IMAGE_PLACEHOLDER_LABEL, RenderState, VIDEO_PLACEHOLDER_LABEL,
    render_placeholder,
};
use crate::output::DrawCommand;
use easel_core::elements::{ImageElement, VideoElement};

impl ContentRenderer for ImageElement {
    fn render_content(&self, state: &RenderState, out: &mut Vec<DrawCommand>) {
        if !self.has_source() {
            render_placeholder(self.base.rect(), IMAGE_PLACEHOLDER_LABEL, state, out);
            return;
        }
        out.push(DrawCommand::Image {
            src: self.src.clone(),
            dest: self.image_rect(),
            clip: self.base.rect(),
            alt: self.alt.clone(),
        });
    }
}

impl ContentRenderer for VideoElement {
    fn render_content(&self, state: &RenderState, out: &mut Vec<DrawCommand>) {
        if !self.has_source() {
            render_placeholder(self.base.rect(), VIDEO_PLACEHOLDER_LABEL, state, out);
            return;
        }
        out.push(DrawCommand::Video {
            src: self.src.clone(),
            rect: self.base.rect(),
            auto_play: self.auto_play,
            looping: self.looping,
            muted: self.muted,
        });
    }
}
