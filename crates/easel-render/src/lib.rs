//! Easel Render Library
//!
//! Turns a canvas into a backend-neutral display list. The element dispatcher
//! routes each element to the renderer for its kind and caches the output
//! until something that affects it changes.

mod content;
mod dispatcher;
mod output;
mod renderer;
mod scene;

pub use content::{IMAGE_PLACEHOLDER_LABEL, RenderState, VIDEO_PLACEHOLDER_LABEL};
pub use dispatcher::ElementDispatcher;
pub use output::{DrawCommand, RenderedElement, StrokeStyle};
pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError, ThemePalette};
pub use scene::{EMPTY_STATE_HINT, EMPTY_STATE_TITLE, Frame, SceneBuilder};
