//! Easel Core Library
//!
//! Platform-agnostic data model and interaction logic for the Easel canvas
//! editor: elements, the viewport camera, per-kind controllers and the canvas
//! that routes input between them.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod controllers;
pub mod elements;
pub mod error;
pub mod input;
pub mod selection;
pub mod tools;
pub mod upload;

pub use camera::{Camera, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
pub use canvas::{Canvas, CanvasDocument, CanvasSnapshot, ViewportState};
pub use config::EditorConfig;
pub use controllers::{Controller, GestureState, TextKey};
pub use elements::{
    Element, ElementBase, ElementBounds, ElementId, ElementKind, FrameElement, ImageElement,
    SerializableColor, TextElement, Theme, VideoElement,
};
pub use error::{EditorError, EditorResult};
pub use input::{DeltaMode, InputState, KeyEvent, Modifiers, MouseButton, PointerEvent, WheelEvent};
pub use selection::{Handle, HandleKind};
pub use tools::{ToolKind, ToolManager};
pub use upload::UploadedFile;
