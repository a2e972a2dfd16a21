//! Point resolution: viewport point → topmost inspectable element.
//!
//! The document hit-test stops at shadow hosts, so the resolver re-tests
//! inside each shadow root until it reaches an element without one. DOM
//! access goes through the [`HitTester`] trait, implemented over `web-sys`
//! by the WASM bridge and over in-memory trees by tests.

use crate::config::InspectorConfig;
use crate::model::Point;

// ─── Hit Tester Trait ─────────────────────────────────────────────────────

/// Host DOM queries needed to resolve a point.
pub trait HitTester {
    type Node: Clone;

    /// `document.elementFromPoint(x, y)`.
    fn element_from_point(&self, point: Point) -> Option<Self::Node>;

    /// `host.shadowRoot.elementFromPoint(x, y)`; `None` when `host` has no
    /// shadow root or nothing is under the point.
    fn shadow_element_from_point(&self, host: &Self::Node, point: Point) -> Option<Self::Node>;

    fn has_shadow_root(&self, node: &Self::Node) -> bool;

    /// Reference equality (`Node.isSameNode`).
    fn is_same_node(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// `document.getElementById(id)`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Whether `node` is `ancestor` or one of its descendants, crossing
    /// shadow boundaries.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
}

// ─── Resolver ─────────────────────────────────────────────────────────────

/// Resolve the deepest element under `point` inside the inspectable root.
///
/// Returns `None` when nothing is under the point, when the root container
/// is missing, or when the element lies outside it (or is the root itself).
pub fn resolve<H: HitTester>(host: &H, point: Point, config: &InspectorConfig) -> Option<H::Node> {
    let top = host.element_from_point(point)?;
    let deepest = descend_shadow_roots(host, top, point, config.max_shadow_depth);

    let root = match host.element_by_id(&config.root_id) {
        Some(root) => root,
        None => {
            log::debug!("inspectable root #{} not found", config.root_id);
            return None;
        }
    };
    if host.is_same_node(&root, &deepest) || !host.contains(&root, &deepest) {
        return None;
    }
    Some(deepest)
}

/// Follow shadow roots from `node` down to the element actually under the
/// point. Stops at a shadow root that reports its own host or nothing, and
/// after `max_depth` descents.
pub fn descend_shadow_roots<H: HitTester>(
    host: &H,
    node: H::Node,
    point: Point,
    max_depth: usize,
) -> H::Node {
    let mut current = node;
    for _ in 0..max_depth {
        if !host.has_shadow_root(&current) {
            return current;
        }
        let Some(nested) = host.shadow_element_from_point(&current, point) else {
            return current;
        };
        if host.is_same_node(&nested, &current) {
            return current;
        }
        current = nested;
    }
    if host.has_shadow_root(&current) {
        log::warn!("shadow roots nested deeper than {max_depth}; stopping descent");
    }
    current
}

// ─── Tests ────────────────────────────────────────────────────────────────
