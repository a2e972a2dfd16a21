//! Overlay canvases backed by `<canvas>` elements appended to `<body>`.

use crate::dom::js_message;
use inspector_render::{CanvasKind, OverlayHost, OverlaySurface, PaintContext};
use kurbo::{Rect, Size};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

fn set_style(canvas: &HtmlCanvasElement, property: &str, value: &str) {
    if let Err(e) = canvas.style().set_property(property, value) {
        log::debug!("canvas style {property}: {}", js_message(&e));
    }
}

/// Inline styles of an overlay canvas. Absolute positioning keeps it in
/// document coordinates, which is what measurements are reported in.
fn placement(z_index: i64) -> [(&'static str, String); 5] {
    [
        ("position", "absolute".into()),
        ("left", "0".into()),
        ("top", "0".into()),
        ("z-index", z_index.to_string()),
        ("pointer-events", "none".into()),
    ]
}

pub struct CanvasContext {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl PaintContext for CanvasContext {
    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx
            .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn scale(&mut self, x: f64, y: f64) {
        if let Err(e) = self.ctx.scale(x, y) {
            log::debug!("context scale: {}", js_message(&e));
        }
    }

    fn disable_pointer_events(&mut self) {
        set_style(&self.canvas, "touch-action", "none");
        set_style(&self.canvas, "pointer-events", "none");
    }
}

pub struct CanvasSurface {
    context: CanvasContext,
}

impl OverlaySurface for CanvasSurface {
    type Context = CanvasContext;

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.context.canvas.set_width(width);
        self.context.canvas.set_height(height);
    }

    fn set_css_size(&mut self, width: f64, height: f64) {
        set_style(&self.context.canvas, "width", &format!("{width}px"));
        set_style(&self.context.canvas, "height", &format!("{height}px"));
    }

    fn context(&mut self) -> &mut CanvasContext {
        &mut self.context
    }

    fn remove(&mut self) {
        self.context.canvas.remove();
    }
}

pub struct DomOverlayHost {
    window: Window,
    document: Document,
}

impl DomOverlayHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl OverlayHost for DomOverlayHost {
    type Surface = CanvasSurface;

    fn document_size(&self) -> Size {
        let Some(root) = self.document.document_element() else {
            return Size::ZERO;
        };
        let (offset_w, offset_h) = root
            .dyn_ref::<web_sys::HtmlElement>()
            .map(|e| (e.offset_width(), e.offset_height()))
            .unwrap_or((0, 0));
        Size::new(
            f64::from(root.scroll_width().max(offset_w)),
            f64::from(root.scroll_height().max(offset_h)),
        )
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn create_surface(&self, _kind: CanvasKind, id: &str, z_index: i64) -> Option<CanvasSurface> {
        let canvas = self
            .document
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        canvas.set_id(id);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        for (property, value) in placement(z_index) {
            set_style(&canvas, property, &value);
        }

        let body = self.document.body()?;
        if let Err(e) = body.append_child(&canvas) {
            log::warn!("appending {id}: {}", js_message(&e));
            return None;
        }
        Some(CanvasSurface {
            context: CanvasContext { canvas, ctx },
        })
    }
}
