//! Integration tests: point → element → properties/measurements through
//! one in-memory page that implements every host trait.

use inspector_core::measure::{BoundingRect, Measurable, ViewportMetrics};
use inspector_core::{
    ComputedStyle, CssRule, Error, HitTester, Inspectable, Inspection, InspectorConfig, Point,
    Result, StyleSheet, StyleSource, inspect_point,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::rc::Rc;

struct NodeData {
    parent: Option<usize>,
    id: Option<&'static str>,
    class: &'static str,
    rect: BoundingRect,
    shadow_hit: Option<usize>,
    computed: HashMap<&'static str, &'static str>,
}

struct Page {
    nodes: Vec<NodeData>,
    sheets: Option<Vec<StyleSheet>>,
}

#[derive(Clone)]
struct Node {
    page: Rc<Page>,
    index: usize,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.index)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

struct Computed(HashMap<&'static str, &'static str>);

impl ComputedStyle for Computed {
    fn property_value(&self, property: &str) -> String {
        self.0.get(property).copied().unwrap_or("").to_string()
    }
}

impl Inspectable for Node {
    type Computed = Computed;

    fn matches(&self, selector: &str) -> Result<bool> {
        Ok(selector.strip_prefix('.') == Some(self.page.nodes[self.index].class))
    }

    fn computed_style(&self) -> Result<Computed> {
        Ok(Computed(self.page.nodes[self.index].computed.clone()))
    }
}

impl Measurable for Node {
    fn bounding_rect(&self) -> BoundingRect {
        self.page.nodes[self.index].rect
    }

    fn viewport(&self) -> ViewportMetrics {
        ViewportMetrics {
            scroll_x: 0.0,
            scroll_y: 0.0,
            inner_width: 1024.0,
            inner_height: 768.0,
        }
    }
}

struct Host(Rc<Page>);

impl Host {
    fn node(&self, index: usize) -> Node {
        Node {
            page: Rc::clone(&self.0),
            index,
        }
    }

    fn hits(rect: &BoundingRect, p: Point) -> bool {
        p.x >= rect.left && p.x < rect.right && p.y >= rect.top && p.y < rect.bottom
    }
}

impl HitTester for Host {
    type Node = Node;

    fn element_from_point(&self, point: Point) -> Option<Node> {
        // Light-DOM nodes only; shadow content is reachable through hosts.
        (0..self.0.nodes.len())
            .rev()
            .filter(|&i| !self.0.nodes[i].class.starts_with("shadow-"))
            .find(|&i| Self::hits(&self.0.nodes[i].rect, point))
            .map(|i| self.node(i))
    }

    fn shadow_element_from_point(&self, host: &Node, _point: Point) -> Option<Node> {
        self.0.nodes[host.index].shadow_hit.map(|i| self.node(i))
    }

    fn has_shadow_root(&self, node: &Node) -> bool {
        self.0.nodes[node.index].shadow_hit.is_some()
    }

    fn is_same_node(&self, a: &Node, b: &Node) -> bool {
        a.index == b.index
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.0
            .nodes
            .iter()
            .position(|n| n.id == Some(id))
            .map(|i| self.node(i))
    }

    fn contains(&self, ancestor: &Node, node: &Node) -> bool {
        let mut cur = Some(node.index);
        while let Some(i) = cur {
            if i == ancestor.index {
                return true;
            }
            cur = self.0.nodes[i].parent;
        }
        false
    }
}

impl StyleSource for Host {
    fn style_sheets(&self) -> Result<Vec<StyleSheet>> {
        self.0
            .sheets
            .clone()
            .ok_or_else(|| Error::platform("styleSheets", "SecurityError"))
    }
}

fn node(parent: Option<usize>, class: &'static str, rect: BoundingRect) -> NodeData {
    NodeData {
        parent,
        id: None,
        class,
        rect,
        shadow_hit: None,
        computed: HashMap::new(),
    }
}

/// body > #storybook-root > my-card (shadow host) ⇒ shadow-button
fn page(sheets: Option<Vec<StyleSheet>>) -> Host {
    let mut body = node(None, "body", BoundingRect::from_origin_size(0.0, 0.0, 1024.0, 768.0));
    body.id = Some("body");
    let mut root = node(Some(0), "root", BoundingRect::from_origin_size(0.0, 0.0, 600.0, 400.0));
    root.id = Some("storybook-root");
    let mut card = node(Some(1), "card", BoundingRect::from_origin_size(100.0, 100.0, 100.0, 100.0));
    card.shadow_hit = Some(3);
    let mut button = node(
        Some(2),
        "shadow-button",
        BoundingRect::from_origin_size(110.0, 110.0, 80.0, 30.0),
    );
    button.computed.insert("color", "rgb(255, 255, 255)");
    button.computed.insert("--nk-color-primary", "#0057ff");
    button.computed.insert("margin-top", "10px");
    button.computed.insert("margin-bottom", "10px");
    button.computed.insert("margin-left", "10px");
    button.computed.insert("margin-right", "10px");

    Host(Rc::new(Page {
        nodes: vec![body, root, card, button],
        sheets,
    }))
}

fn sheets() -> Option<Vec<StyleSheet>> {
    Some(vec![StyleSheet::new(vec![
        CssRule::style(".shadow-button", "color: var(--nk-color-primary); cursor: pointer"),
        CssRule::style(".card", "display: block"),
    ])])
}

#[test]
fn resolves_through_shadow_root_and_aggregates() {
    let host = page(sheets());
    let inspection = inspect_point(&host, Point::new(120.0, 120.0), &InspectorConfig::default());

    let Inspection::Found { element, properties } = inspection else {
        panic!("expected an element");
    };
    assert_eq!(element.index, 3);
    assert_eq!(properties.result.len(), 2);
    assert_eq!(properties.tokens["color"].as_slice(), ["COLOR_PRIMARY"]);
    assert_eq!(
        properties.result["color"].variable_value.as_deref(),
        Some("#0057ff")
    );
}

#[test]
fn resolved_element_measures_from_one_snapshot() {
    let host = page(sheets());
    let inspection = inspect_point(&host, Point::new(120.0, 120.0), &InspectorConfig::default());
    let m = inspection.element().unwrap().measure().unwrap();
    assert_eq!(m.extremities.top, 100.0);
    assert_eq!(m.extremities.left, 100.0);
    assert_eq!(m.extremities.bottom, 150.0);
    assert_eq!(m.extremities.right, 200.0);
}

#[test]
fn point_outside_root_is_empty() {
    let host = page(sheets());
    let inspection = inspect_point(&host, Point::new(900.0, 700.0), &InspectorConfig::default());
    assert!(inspection.is_empty());
}

#[test]
fn root_container_itself_is_empty() {
    let host = page(sheets());
    let inspection = inspect_point(&host, Point::new(500.0, 350.0), &InspectorConfig::default());
    assert_eq!(inspection, Inspection::Empty);
}

#[test]
fn unreadable_stylesheets_become_empty() {
    let host = page(None);
    let inspection = inspect_point(&host, Point::new(120.0, 120.0), &InspectorConfig::default());
    assert!(inspection.is_empty());
}

#[test]
fn element_without_rules_has_empty_properties() {
    let host = page(Some(vec![]));
    let inspection = inspect_point(&host, Point::new(120.0, 120.0), &InspectorConfig::default());
    assert!(inspection.properties().unwrap().is_empty());
}
