//! Host seams for overlay drawing.
//!
//! The WASM bridge implements these over `HtmlCanvasElement` and
//! `CanvasRenderingContext2d`; tests implement them with recorders.

use kurbo::{Rect, Size};
use std::fmt;

/// Which overlay a canvas serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasKind {
    /// Box model of the clicked element.
    Selected,
    /// Box model of the element under the pointer.
    Hover,
}

impl CanvasKind {
    pub const ALL: [CanvasKind; 2] = [CanvasKind::Selected, CanvasKind::Hover];

    pub fn as_str(self) -> &'static str {
        match self {
            CanvasKind::Selected => "selected",
            CanvasKind::Hover => "hover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "selected" => Some(CanvasKind::Selected),
            "hover" => Some(CanvasKind::Hover),
            _ => None,
        }
    }
}

impl fmt::Display for CanvasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 2D drawing context in CSS-pixel coordinates.
pub trait PaintContext {
    fn set_fill_style(&mut self, color: &str);

    /// Fill `rect`; `x0`/`y0` is the origin, width and height may be negative.
    fn fill_rect(&mut self, rect: Rect);

    fn clear_rect(&mut self, rect: Rect);

    /// Multiply the current transform (`ctx.scale`).
    fn scale(&mut self, x: f64, y: f64);

    /// Stop the owning canvas from receiving pointer and touch input.
    fn disable_pointer_events(&mut self);
}

/// One overlay canvas element.
pub trait OverlaySurface {
    type Context: PaintContext;

    /// Backing-store size in device pixels (`canvas.width/height`).
    /// Resetting it also resets the context transform.
    fn set_pixel_size(&mut self, width: u32, height: u32);

    /// Layout size in CSS pixels (`canvas.style.width/height`).
    fn set_css_size(&mut self, width: f64, height: f64);

    fn context(&mut self) -> &mut Self::Context;

    /// Detach the canvas from the document.
    fn remove(&mut self);
}

/// The document the overlays live in.
pub trait OverlayHost {
    type Surface: OverlaySurface;

    /// `max(scroll, offset)` width and height of the document element.
    fn document_size(&self) -> Size;

    fn device_pixel_ratio(&self) -> f64;

    /// Create a canvas with `id`, absolutely positioned at the document
    /// origin with `z_index` so it scrolls with the page, pointer events
    /// disabled, appended to `<body>`. `None` when the host
    /// cannot provide a 2D context.
    fn create_surface(&self, kind: CanvasKind, id: &str, z_index: i64) -> Option<Self::Surface>;
}
