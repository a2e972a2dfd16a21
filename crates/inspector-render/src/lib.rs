//! Overlay canvases and box-model painting for the element inspector.
//!
//! Platform access goes through the traits in [`surface`]; the WASM crate
//! implements them over the DOM canvas API.

pub mod box_model;
pub mod canvas;
pub mod surface;

pub use box_model::{box_model, paint_box_model};
pub use canvas::{OverlayCanvases, OverlayError};
pub use surface::{CanvasKind, OverlayHost, OverlaySurface, PaintContext};
