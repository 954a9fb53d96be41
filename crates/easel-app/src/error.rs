//! Driver errors.

use easel_core::error::EditorError;
use easel_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("No element at index {0}")]
    NoSuchElement(usize),
    #[error("Step needs a selected element but nothing is selected")]
    NothingSelected,
    #[error("Step {index} ({action}) failed: {source}")]
    Step {
        index: usize,
        action: &'static str,
        source: Box<AppError>,
    },
}

pub type AppResult<T> = Result<T, AppError>;
