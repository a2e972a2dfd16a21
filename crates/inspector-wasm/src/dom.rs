//! `web-sys` implementations of the core host traits.

use crate::cssom;
use inspector_core::measure::{BoundingRect, Measurable, ViewportMetrics};
use inspector_core::{
    ComputedStyle, Error, HitTester, Inspectable, Point, Result, StyleSheet, StyleSource,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, Node, ShadowRoot, Window};

/// Best-effort message of a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// A live DOM element plus the window its computed style comes from.
#[derive(Clone)]
pub struct DomElement {
    pub element: Element,
    window: Window,
}

impl DomElement {
    fn node(&self) -> &Node {
        self.element.as_ref()
    }
}

/// `CSSStyleDeclaration` from `getComputedStyle`.
pub struct DomComputedStyle(CssStyleDeclaration);

impl ComputedStyle for DomComputedStyle {
    fn property_value(&self, property: &str) -> String {
        self.0.get_property_value(property).unwrap_or_default()
    }
}

impl Inspectable for DomElement {
    type Computed = DomComputedStyle;

    fn matches(&self, selector: &str) -> Result<bool> {
        self.element
            .matches(selector)
            .map_err(|e| Error::platform("Element.matches", js_message(&e)))
    }

    fn computed_style(&self) -> Result<DomComputedStyle> {
        match self.window.get_computed_style(&self.element) {
            Ok(Some(style)) => Ok(DomComputedStyle(style)),
            Ok(None) => Err(Error::ComputedStyleUnavailable),
            Err(e) => Err(Error::platform("getComputedStyle", js_message(&e))),
        }
    }
}

impl Measurable for DomElement {
    fn bounding_rect(&self) -> BoundingRect {
        let r = self.element.get_bounding_client_rect();
        BoundingRect {
            top: r.top(),
            left: r.left(),
            bottom: r.bottom(),
            right: r.right(),
            width: r.width(),
            height: r.height(),
        }
    }

    fn viewport(&self) -> ViewportMetrics {
        let dimension = |v: std::result::Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        ViewportMetrics {
            scroll_x: self.window.scroll_x().unwrap_or(0.0),
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            inner_width: dimension(self.window.inner_width()),
            inner_height: dimension(self.window.inner_height()),
        }
    }
}

/// The page being inspected.
#[derive(Clone)]
pub struct DomHost {
    window: Window,
    document: Document,
    max_rule_depth: usize,
}

impl DomHost {
    pub fn new(window: Window, document: Document, max_rule_depth: usize) -> Self {
        Self {
            window,
            document,
            max_rule_depth,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn wrap(&self, element: Element) -> DomElement {
        DomElement {
            element,
            window: self.window.clone(),
        }
    }
}

impl HitTester for DomHost {
    type Node = DomElement;

    fn element_from_point(&self, point: Point) -> Option<DomElement> {
        self.document
            .element_from_point(point.x as f32, point.y as f32)
            .map(|e| self.wrap(e))
    }

    fn shadow_element_from_point(&self, host: &DomElement, point: Point) -> Option<DomElement> {
        host.element
            .shadow_root()?
            .element_from_point(point.x as f32, point.y as f32)
            .map(|e| self.wrap(e))
    }

    fn has_shadow_root(&self, node: &DomElement) -> bool {
        node.element.shadow_root().is_some()
    }

    fn is_same_node(&self, a: &DomElement, b: &DomElement) -> bool {
        a.node().is_same_node(Some(b.node()))
    }

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(|e| self.wrap(e))
    }

    /// `Node.contains` stops at shadow roots; hop to each root's host.
    fn contains(&self, ancestor: &DomElement, node: &DomElement) -> bool {
        let mut current: Node = node.node().clone();
        loop {
            if ancestor.node().contains(Some(&current)) {
                return true;
            }
            match current.get_root_node().dyn_into::<ShadowRoot>() {
                Ok(shadow) => current = shadow.host().into(),
                Err(_) => return false,
            }
        }
    }
}

impl StyleSource for DomHost {
    fn style_sheets(&self) -> Result<Vec<StyleSheet>> {
        Ok(cssom::snapshot(&self.document, self.max_rule_depth))
    }
}
