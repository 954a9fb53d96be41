//! Easel Application
//!
//! Headless driver for the editor: replays a scripted session against a
//! canvas, rendering a frame after every step.

mod error;
mod session;

pub use error::{AppError, AppResult};
pub use session::{DEFAULT_VIEWPORT, Script, ScriptStep, Session, SessionSummary, Target};
