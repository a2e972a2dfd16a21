//! Box-model overlay painting.
//!
//! Four translucent layers: margin, border, padding, content. Each of the
//! first three is drawn as four strips around the border box, so a layer
//! never paints over the one inside it.

use crate::surface::PaintContext;
use inspector_core::model::{Dimensions, ElementMeasurements};
use inspector_core::{BoxModelColors, Measurable};
use kurbo::Rect;

/// Rect with origin `(x, y)` and a size that may be negative.
/// `Rect::from_origin_size` would normalize it; the canvas does not.
fn strip(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x, y, x + width, y + height)
}

/// Margin strips: top, right, bottom, left.
pub fn margin_strips(d: &Dimensions) -> [Rect; 4] {
    let m = &d.margin;
    let full_height = d.height + m.top + m.bottom;
    [
        strip(d.left, d.top - m.top, d.width, m.top),
        strip(d.right, d.top - m.top, m.right, full_height),
        strip(d.left, d.bottom, d.width, m.bottom),
        strip(d.left - m.left, d.top - m.top, m.left, full_height),
    ]
}

/// Border strips: top, bottom, left, right.
pub fn border_strips(d: &Dimensions) -> [Rect; 4] {
    let b = &d.border;
    let inner_height = d.height - b.top - b.bottom;
    [
        strip(d.left, d.top, d.width, b.top),
        strip(d.left, d.bottom - b.bottom, d.width, b.bottom),
        strip(d.left, d.top + b.top, b.left, inner_height),
        strip(d.right - b.right, d.top + b.top, b.right, inner_height),
    ]
}

/// Padding strips: top, right, bottom, left.
pub fn padding_strips(d: &Dimensions) -> [Rect; 4] {
    let (p, b) = (&d.padding, &d.border);
    let width = d.width - b.left - b.right;
    let height = d.height - p.top - p.bottom - b.top - b.bottom;
    [
        strip(d.left + b.left, d.top + b.top, width, p.top),
        strip(d.right - p.right - b.right, d.top + p.top + b.top, p.right, height),
        strip(d.left + b.left, d.bottom - p.bottom - b.bottom, width, p.bottom),
        strip(d.left + b.left, d.top + p.top + b.top, p.left, height),
    ]
}

/// The whole border box.
pub fn content_rect(d: &Dimensions) -> Rect {
    strip(d.left, d.top, d.width, d.height)
}

fn fill_all<C: PaintContext>(ctx: &mut C, color: &str, rects: &[Rect]) {
    ctx.set_fill_style(color);
    for rect in rects {
        ctx.fill_rect(*rect);
    }
}

pub fn draw_margin<C: PaintContext>(ctx: &mut C, d: &Dimensions, color: &str) {
    fill_all(ctx, color, &margin_strips(d));
}

pub fn draw_border<C: PaintContext>(ctx: &mut C, d: &Dimensions, color: &str) {
    fill_all(ctx, color, &border_strips(d));
}

pub fn draw_padding<C: PaintContext>(ctx: &mut C, d: &Dimensions, color: &str) {
    fill_all(ctx, color, &padding_strips(d));
}

/// Fill the border box and make the canvas transparent to input.
pub fn draw_content<C: PaintContext>(ctx: &mut C, d: &Dimensions, color: &str) {
    ctx.disable_pointer_events();
    fill_all(ctx, color, &[content_rect(d)]);
}

/// Paint all four layers, outermost first.
pub fn paint_box_model<C: PaintContext>(
    ctx: &mut C,
    measurements: &ElementMeasurements,
    colors: &BoxModelColors,
) {
    let d = &measurements.dimensions;
    draw_margin(ctx, d, &colors.margin);
    draw_border(ctx, d, &colors.border);
    draw_padding(ctx, d, &colors.padding);
    draw_content(ctx, d, &colors.content);
}

/// Build the draw callback for [`OverlayCanvases::draw`](crate::OverlayCanvases::draw).
///
/// Draws nothing when there is no element, no context, or the element can
/// no longer be measured.
pub fn box_model<'a, E, C>(
    element: Option<&'a E>,
    colors: &'a BoxModelColors,
) -> impl FnOnce(Option<&mut C>) + 'a
where
    E: Measurable,
    C: PaintContext,
{
    move |ctx: Option<&mut C>| {
        let (Some(element), Some(ctx)) = (element, ctx) else {
            return;
        };
        match element.measure() {
            Ok(m) => paint_box_model(ctx, &m, colors),
            Err(e) => log::debug!("box model skipped: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspector_core::model::{Edges, FloatingAlignment, HorizontalAlign, VerticalAlign};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(String),
        Rect(f64, f64, f64, f64),
        NoPointer,
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl PaintContext for Recorder {
        fn set_fill_style(&mut self, color: &str) {
            self.0.push(Op::Fill(color.into()));
        }
        fn fill_rect(&mut self, r: Rect) {
            self.0.push(Op::Rect(r.x0, r.y0, r.width(), r.height()));
        }
        fn clear_rect(&mut self, _: Rect) {}
        fn scale(&mut self, _: f64, _: f64) {}
        fn disable_pointer_events(&mut self) {
            self.0.push(Op::NoPointer);
        }
    }

    fn dims() -> Dimensions {
        Dimensions {
            margin: Edges::uniform(10.0),
            padding: Edges::uniform(5.0),
            border: Edges::uniform(2.0),
            width: 100.0,
            height: 50.0,
            top: 20.0,
            left: 30.0,
            bottom: 70.0,
            right: 130.0,
        }
    }

    fn tuple(r: Rect) -> (f64, f64, f64, f64) {
        (r.x0, r.y0, r.width(), r.height())
    }

    #[test]
    fn margin_geometry() {
        let [top, right, bottom, left] = margin_strips(&dims()).map(tuple);
        assert_eq!(top, (30.0, 10.0, 100.0, 10.0));
        assert_eq!(right, (130.0, 10.0, 10.0, 70.0));
        assert_eq!(bottom, (30.0, 70.0, 100.0, 10.0));
        assert_eq!(left, (20.0, 10.0, 10.0, 70.0));
    }

    #[test]
    fn border_geometry() {
        let [top, bottom, left, right] = border_strips(&dims()).map(tuple);
        assert_eq!(top, (30.0, 20.0, 100.0, 2.0));
        assert_eq!(bottom, (30.0, 68.0, 100.0, 2.0));
        assert_eq!(left, (30.0, 22.0, 2.0, 46.0));
        assert_eq!(right, (128.0, 22.0, 2.0, 46.0));
    }

    #[test]
    fn padding_geometry() {
        let [top, right, bottom, left] = padding_strips(&dims()).map(tuple);
        assert_eq!(top, (32.0, 22.0, 96.0, 5.0));
        assert_eq!(right, (123.0, 27.0, 5.0, 36.0));
        assert_eq!(bottom, (32.0, 63.0, 96.0, 5.0));
        assert_eq!(left, (32.0, 27.0, 5.0, 36.0));
    }

    #[test]
    fn negative_extents_pass_through() {
        let mut d = dims();
        d.height = 4.0;
        d.bottom = 24.0;
        let [_, right, _, _] = padding_strips(&d).map(tuple);
        assert_eq!(right.3, 4.0 - 10.0 - 4.0);
    }

    #[test]
    fn layers_paint_outermost_first() {
        let m = ElementMeasurements {
            dimensions: dims(),
            extremities: Edges::default(),
            floating_alignment: FloatingAlignment {
                x: HorizontalAlign::Right,
                y: VerticalAlign::Bottom,
            },
        };
        let mut rec = Recorder::default();
        paint_box_model(&mut rec, &m, &BoxModelColors::default());

        let fills: Vec<_> = rec
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Fill(c) => Some(c.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, ["#f6b26ba8", "#ffe599a8", "#93c47d8c", "#6fa8dca8"]);
        assert_eq!(rec.0.iter().filter(|op| matches!(op, Op::Rect(..))).count(), 13);
        assert_eq!(rec.0.last(), Some(&Op::Rect(30.0, 20.0, 100.0, 50.0)));
        assert!(rec.0.contains(&Op::NoPointer));
    }
}
