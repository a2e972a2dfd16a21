//! Box-model measurement.
//!
//! Turns an element's border-box rectangle (viewport-relative) and its
//! computed margin/border/padding widths into document-relative geometry,
//! plus a hint for which viewport quadrant an overlay panel should use.

use crate::aggregate::{ComputedStyle, Inspectable};
use crate::error::Result;
use crate::model::{
    Dimensions, Edges, ElementMeasurements, FloatingAlignment, HorizontalAlign, VerticalAlign,
};
use crate::parse::leading_int;

/// `Element.getBoundingClientRect()`, viewport-relative CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingRect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    /// Rect from its origin and size.
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
            width,
            height,
        }
    }
}

/// Window scroll offset and inner size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub inner_width: f64,
    pub inner_height: f64,
}

/// An element whose box model can be measured.
pub trait Measurable: Inspectable {
    fn bounding_rect(&self) -> BoundingRect;

    fn viewport(&self) -> ViewportMetrics;

    /// Measure with one read of each input.
    ///
    /// # Errors
    /// Fails when the computed style is unavailable.
    fn measure(&self) -> Result<ElementMeasurements> {
        let style = self.computed_style()?;
        Ok(measure_box(self.bounding_rect(), &style, self.viewport()))
    }
}

/// Integer part of a computed length (`"10px"` → `10`).
pub fn px_to_number(px: &str) -> f64 {
    leading_int(px) as f64
}

fn edges<C: ComputedStyle>(style: &C, prefix: &str, suffix: &str) -> Edges {
    let side = |name: &str| px_to_number(&style.property_value(&format!("{prefix}-{name}{suffix}")));
    Edges {
        top: side("top"),
        bottom: side("bottom"),
        left: side("left"),
        right: side("right"),
    }
}

/// Compute the box model of a border box with the given computed style.
pub fn measure_box<C: ComputedStyle>(
    rect: BoundingRect,
    style: &C,
    viewport: ViewportMetrics,
) -> ElementMeasurements {
    let margin = edges(style, "margin", "");
    let padding = edges(style, "padding", "");
    let border = edges(style, "border", "-width");

    let top = rect.top + viewport.scroll_y;
    let left = rect.left + viewport.scroll_x;
    let bottom = rect.bottom + viewport.scroll_y;
    let right = rect.right + viewport.scroll_x;

    let extremities = Edges {
        top: top - margin.top,
        bottom: bottom + margin.bottom,
        left: left - margin.left,
        right: right + margin.right,
    };

    ElementMeasurements {
        dimensions: Dimensions {
            margin,
            padding,
            border,
            width: rect.width,
            height: rect.height,
            top,
            left,
            bottom,
            right,
        },
        extremities,
        floating_alignment: floating_alignment(&extremities, viewport),
    }
}

/// Pick, per axis, the viewport edge farther from the element.
/// Ties go to `Right` / `Bottom`.
pub fn floating_alignment(extremities: &Edges, viewport: ViewportMetrics) -> FloatingAlignment {
    let window_top = viewport.scroll_y;
    let window_bottom = viewport.scroll_y + viewport.inner_height;
    let window_left = viewport.scroll_x;
    let window_right = viewport.scroll_x + viewport.inner_width;

    let top = (window_top - extremities.top).abs();
    let bottom = (window_bottom - extremities.bottom).abs();
    let left = (window_left - extremities.left).abs();
    let right = (window_right - extremities.right).abs();

    FloatingAlignment {
        x: if left > right {
            HorizontalAlign::Left
        } else {
            HorizontalAlign::Right
        },
        y: if top > bottom {
            VerticalAlign::Top
        } else {
            VerticalAlign::Bottom
        },
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
