//! Scripted editing sessions.
//!
//! A script is a JSON list of steps (pointer, wheel and keyboard input, tool
//! activations, viewport commands, uploads). Each step is applied to a
//! [`Canvas`] and a frame is rendered after it, the same way an interactive
//! host would drive the editor.

use crate::error::{AppError, AppResult};
use easel_core::canvas::{Canvas, CanvasSnapshot};
use easel_core::config::EditorConfig;
use easel_core::elements::{ElementId, ElementKind, Theme};
use easel_core::error::EditorError;
use easel_core::input::{DeltaMode, KeyEvent, Modifiers, MouseButton, PointerEvent, WheelEvent};
use easel_core::tools::ToolKind;
use easel_core::upload::UploadedFile;
use easel_render::{Frame, GridStyle, RenderContext, SceneBuilder};
use kurbo::{Point, Size, Vec2};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Viewport size used when a script does not set one.
pub const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// A full session script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Option<Size>,
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Element addressed by a step: its position in the z-order (0 is the back),
/// or the current selection when absent.
pub type Target = Option<usize>;

/// One scripted action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Option<MouseButton>,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Option<MouseButton>,
    },
    PointerLeave {
        x: f64,
        y: f64,
    },
    /// Press and release at the same point.
    Click {
        x: f64,
        y: f64,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        mode: DeltaMode,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SetModifiers {
        modifiers: Modifiers,
    },
    Key {
        key: String,
    },
    TypeText {
        text: String,
    },
    Blur,
    Tool {
        tool: ToolKind,
    },
    AddElement {
        kind: ElementKind,
        #[serde(default)]
        position: Option<Point>,
    },
    Select {
        index: usize,
    },
    ClearSelection,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleGrid,
    SetTheme {
        theme: Theme,
    },
    Upload {
        path: PathBuf,
        #[serde(default)]
        target: Target,
    },
}

impl ScriptStep {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::PointerDown { .. } => "pointer_down",
            ScriptStep::PointerMove { .. } => "pointer_move",
            ScriptStep::PointerUp { .. } => "pointer_up",
            ScriptStep::PointerLeave { .. } => "pointer_leave",
            ScriptStep::Click { .. } => "click",
            ScriptStep::DoubleClick { .. } => "double_click",
            ScriptStep::Wheel { .. } => "wheel",
            ScriptStep::SetModifiers { .. } => "set_modifiers",
            ScriptStep::Key { .. } => "key",
            ScriptStep::TypeText { .. } => "type_text",
            ScriptStep::Blur => "blur",
            ScriptStep::Tool { .. } => "tool",
            ScriptStep::AddElement { .. } => "add_element",
            ScriptStep::Select { .. } => "select",
            ScriptStep::ClearSelection => "clear_selection",
            ScriptStep::ZoomIn => "zoom_in",
            ScriptStep::ZoomOut => "zoom_out",
            ScriptStep::ResetZoom => "reset_zoom",
            ScriptStep::ToggleGrid => "toggle_grid",
            ScriptStep::SetTheme { .. } => "set_theme",
            ScriptStep::Upload { .. } => "upload",
        }
    }
}

/// Counters reported at the end of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub steps: usize,
    /// Steps that changed editor state.
    pub changed: usize,
    pub frames: usize,
    pub rejected_uploads: usize,
}

/// A canvas plus the renderer that draws it after every step.
pub struct Session {
    canvas: Canvas,
    scene: SceneBuilder,
    grid_style: GridStyle,
    /// Directory that relative upload paths are resolved against.
    base_dir: PathBuf,
    last_frame: Option<Frame>,
    summary: SessionSummary,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            canvas: Canvas::with_config(config),
            scene: SceneBuilder::new(),
            grid_style: GridStyle::default(),
            base_dir: PathBuf::from("."),
            last_frame: None,
            summary: SessionSummary::default(),
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_grid_style(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Replay every step of `script` and return the final snapshot.
    pub fn run(&mut self, script: &Script) -> AppResult<CanvasSnapshot> {
        let viewport = script.viewport.unwrap_or(DEFAULT_VIEWPORT);
        self.canvas.set_viewport_size(viewport.width, viewport.height);
        self.render();

        for (index, step) in script.steps.iter().enumerate() {
            log::debug!("Step {index}: {}", step.name());
            let changed = self
                .apply(step)
                .map_err(|err| AppError::Step {
                    index,
                    action: step.name(),
                    source: Box::new(err),
                })?;
            if changed {
                self.summary.changed += 1;
            }
            self.summary.steps += 1;
            self.render();
        }

        log::info!(
            "Replayed {} steps ({} changed state, {} frames, {} rejected uploads)",
            self.summary.steps,
            self.summary.changed,
            self.summary.frames,
            self.summary.rejected_uploads
        );
        Ok(self.canvas.snapshot())
    }

    /// Apply one step. Returns whether editor state changed.
    pub fn apply(&mut self, step: &ScriptStep) -> AppResult<bool> {
        let canvas = &mut self.canvas;
        let changed = match step {
            ScriptStep::PointerDown { x, y, button } => canvas.handle_pointer_event(PointerEvent::Down {
                position: Point::new(*x, *y),
                button: button.unwrap_or(MouseButton::Left),
            }),
            ScriptStep::PointerMove { x, y } => canvas.handle_pointer_event(PointerEvent::Move {
                position: Point::new(*x, *y),
            }),
            ScriptStep::PointerUp { x, y, button } => canvas.handle_pointer_event(PointerEvent::Up {
                position: Point::new(*x, *y),
                button: button.unwrap_or(MouseButton::Left),
            }),
            ScriptStep::PointerLeave { x, y } => canvas.handle_pointer_event(PointerEvent::Leave {
                position: Point::new(*x, *y),
            }),
            ScriptStep::Click { x, y } => click(canvas, Point::new(*x, *y)),
            ScriptStep::DoubleClick { x, y } => {
                let position = Point::new(*x, *y);
                let first = click(canvas, position);
                click(canvas, position) || first
            }
            ScriptStep::Wheel {
                x,
                y,
                dx,
                dy,
                mode,
                modifiers,
            } => canvas.handle_wheel(&WheelEvent {
                position: Point::new(*x, *y),
                delta: Vec2::new(*dx, *dy),
                mode: *mode,
                modifiers: *modifiers,
            }),
            ScriptStep::SetModifiers { modifiers } => {
                canvas.set_modifiers(*modifiers);
                false
            }
            ScriptStep::Key { key } => {
                let pressed = canvas.handle_key_event(KeyEvent::Pressed(key.clone()));
                canvas.handle_key_event(KeyEvent::Released(key.clone()));
                pressed
            }
            ScriptStep::TypeText { text } => canvas.type_text(text),
            ScriptStep::Blur => canvas.blur(),
            ScriptStep::Tool { tool } => canvas.activate_tool(*tool).is_some(),
            ScriptStep::AddElement { kind, position } => {
                canvas.add_element(*kind, *position);
                true
            }
            ScriptStep::Select { index } => {
                let id = element_at_index(canvas, Some(*index))?;
                canvas.select_element(id)
            }
            ScriptStep::ClearSelection => {
                let had = canvas.selected_element_id().is_some();
                canvas.clear_selection();
                had
            }
            ScriptStep::ZoomIn => canvas.zoom_in(),
            ScriptStep::ZoomOut => canvas.zoom_out(),
            ScriptStep::ResetZoom => {
                canvas.reset_zoom();
                true
            }
            ScriptStep::ToggleGrid => {
                canvas.toggle_grid();
                true
            }
            ScriptStep::SetTheme { theme } => {
                canvas.set_theme(*theme);
                true
            }
            ScriptStep::Upload { path, target } => {
                let id = element_at_index(canvas, *target)?;
                let path = self.base_dir.join(path);
                let file = UploadedFile::from_path(&path)?;
                match canvas.upload(id, &file) {
                    Ok(()) => true,
                    Err(
                        err @ (EditorError::UnsupportedMediaType { .. }
                        | EditorError::UploadTooLarge { .. }
                        | EditorError::NotUploadable(_)),
                    ) => {
                        log::warn!("Upload of {} ignored: {err}", path.display());
                        self.summary.rejected_uploads += 1;
                        false
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };
        Ok(changed)
    }

    /// Render a frame of the current state.
    pub fn render(&mut self) -> &Frame {
        let ctx = RenderContext::for_canvas(&self.canvas).with_grid(self.grid_style);
        self.summary.frames += 1;
        self.last_frame.insert(self.scene.build(&self.canvas, &ctx))
    }
}

fn click(canvas: &mut Canvas, position: Point) -> bool {
    let down = canvas.handle_pointer_event(PointerEvent::Down {
        position,
        button: MouseButton::Left,
    });
    let up = canvas.handle_pointer_event(PointerEvent::Up {
        position,
        button: MouseButton::Left,
    });
    down || up
}

fn element_at_index(canvas: &Canvas, target: Target) -> AppResult<ElementId> {
    match target {
        Some(index) => canvas
            .document
            .elements()
            .get(index)
            .map(|e| e.id())
            .ok_or(AppError::NoSuchElement(index)),
        None => canvas.selected_element_id().ok_or(AppError::NothingSelected),
    }
}
