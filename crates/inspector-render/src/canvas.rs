//! Overlay canvas lifecycle.
//!
//! Two document-sized canvases, `selected` and `hover`, layered above the
//! page. Each is sized in CSS pixels and backed at device resolution with
//! the context pre-scaled, so drawing code works in CSS pixels.

use crate::box_model::box_model;
use crate::surface::{CanvasKind, OverlayHost, OverlaySurface, PaintContext};
use inspector_core::{BoxModelColors, InspectorConfig, Measurable};
use kurbo::{Rect, Size};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("{0} canvas is not initialized")]
    NotInitialized(CanvasKind),
}

/// One live canvas and the CSS size it was last laid out at.
struct CanvasState<S> {
    surface: S,
    size: Size,
}

type ContextOf<H> = <<H as OverlayHost>::Surface as OverlaySurface>::Context;

/// Owns both overlay canvases for one document.
pub struct OverlayCanvases<H: OverlayHost> {
    host: H,
    id_prefix: String,
    z_index: i64,
    colors: BoxModelColors,
    selected: Option<CanvasState<H::Surface>>,
    hover: Option<CanvasState<H::Surface>>,
}

/// Size `surface` to `size` CSS pixels at `dpr` device pixels per CSS pixel.
fn resize<S: OverlaySurface>(surface: &mut S, size: Size, dpr: f64) {
    surface.set_css_size(size.width, size.height);
    surface.set_pixel_size(
        (size.width * dpr).floor() as u32,
        (size.height * dpr).floor() as u32,
    );
    surface.context().scale(dpr, dpr);
}

impl<H: OverlayHost> OverlayCanvases<H> {
    pub fn new(host: H, config: &InspectorConfig) -> Self {
        Self {
            host,
            id_prefix: config.canvas_id_prefix.clone(),
            z_index: config.z_index,
            colors: config.colors.clone(),
            selected: None,
            hover: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn colors(&self) -> &BoxModelColors {
        &self.colors
    }

    fn slot(&mut self, kind: CanvasKind) -> &mut Option<CanvasState<H::Surface>> {
        match kind {
            CanvasKind::Selected => &mut self.selected,
            CanvasKind::Hover => &mut self.hover,
        }
    }

    pub fn is_initialized(&self, kind: CanvasKind) -> bool {
        match kind {
            CanvasKind::Selected => self.selected.is_some(),
            CanvasKind::Hover => self.hover.is_some(),
        }
    }

    /// `<prefix>-<kind>`, the DOM id of a canvas.
    pub fn canvas_id(&self, kind: CanvasKind) -> String {
        format!("{}-{}", self.id_prefix, kind)
    }

    /// Create whichever canvases are missing. Existing ones are untouched.
    pub fn init(&mut self) {
        for kind in CanvasKind::ALL {
            if !self.is_initialized(kind) {
                let state = self.create(kind);
                *self.slot(kind) = state;
            }
        }
    }

    fn create(&self, kind: CanvasKind) -> Option<CanvasState<H::Surface>> {
        let id = self.canvas_id(kind);
        let Some(mut surface) = self.host.create_surface(kind, &id, self.z_index) else {
            log::warn!("could not create overlay canvas {id}");
            return None;
        };
        let size = self.host.document_size();
        resize(&mut surface, size, self.host.device_pixel_ratio());
        log::debug!("created {id} at {}x{}", size.width, size.height);
        Some(CanvasState { surface, size })
    }

    /// Erase the canvas over its recorded size. No-op when absent.
    pub fn clear(&mut self, kind: CanvasKind) {
        if let Some(state) = self.slot(kind) {
            let area = Rect::from_origin_size((0.0, 0.0), state.size);
            state.surface.context().clear_rect(area);
        }
    }

    /// Clear `kind`, then hand its context to `paint`.
    ///
    /// `paint` receives `None` when the canvas has not been initialized.
    pub fn draw<F>(&mut self, kind: CanvasKind, paint: F)
    where
        F: FnOnce(Option<&mut ContextOf<H>>),
    {
        self.clear(kind);
        paint(self.slot(kind).as_mut().map(|s| s.surface.context()));
    }

    /// Follow a document resize.
    ///
    /// The selected canvas is resized to the new document size, then both
    /// canvases are collapsed to zero. Drawing does not resize them; they
    /// stay zero-sized until destroyed and initialized again. The recorded
    /// clear region of the selected canvas becomes the document size.
    ///
    /// # Errors
    /// [`OverlayError::NotInitialized`] when the selected canvas is absent.
    pub fn rescale(&mut self) -> Result<(), OverlayError> {
        let size = self.host.document_size();
        let dpr = self.host.device_pixel_ratio();
        let selected = self
            .selected
            .as_mut()
            .ok_or(OverlayError::NotInitialized(CanvasKind::Selected))?;

        resize(&mut selected.surface, size, dpr);
        resize(&mut selected.surface, Size::ZERO, dpr);
        selected.size = size;

        if let Some(hover) = self.hover.as_mut() {
            resize(&mut hover.surface, Size::ZERO, dpr);
        }
        Ok(())
    }

    /// Clear, detach and forget the canvas. No-op when absent.
    pub fn destroy(&mut self, kind: CanvasKind) {
        self.clear(kind);
        if let Some(mut state) = self.slot(kind).take() {
            state.surface.remove();
            log::debug!("removed {}", self.canvas_id(kind));
        }
    }

    pub fn destroy_all(&mut self) {
        for kind in CanvasKind::ALL {
            self.destroy(kind);
        }
    }

    /// Paint `element`'s box model on the selected canvas.
    pub fn draw_selected<E: Measurable>(&mut self, element: &E) {
        let colors = self.colors.clone();
        self.draw(CanvasKind::Selected, box_model(Some(element), &colors));
    }

    /// Paint `element`'s box model on the hover canvas, or just clear it.
    pub fn draw_hover<E: Measurable>(&mut self, element: Option<&E>) {
        let colors = self.colors.clone();
        self.draw(CanvasKind::Hover, box_model(element, &colors));
    }
}

impl<H: OverlayHost> Drop for OverlayCanvases<H> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
