//! Data model shared by the resolver, aggregator, measurer and renderer.
//!
//! Every type serializes to the camelCase JSON consumed by the inspector
//! panel. Optional fields are omitted rather than emitted as `null` or `""`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

// ─── Pointer ──────────────────────────────────────────────────────────────

/// Viewport coordinates in unscaled CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── CSS properties ───────────────────────────────────────────────────────

/// Ordered custom-property or token names referenced by one value.
/// Nearly always a single entry.
pub type NameList = SmallVec<[String; 1]>;

/// Property name → raw declared value, after shorthand reconciliation.
pub type RawPropertyMap = BTreeMap<String, String>;

/// Everything known about one CSS property on the inspected element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyFact {
    /// Raw declared value from the matching rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Design tokens referenced by the value (`COLOR_PRIMARY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<NameList>,
    /// Custom properties referenced by the value (`--bg-color`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<NameList>,
    /// Computed value of the variable; only set for a single reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_value: Option<String>,
    /// Browser-computed value of the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<String>,
}

/// Output of property aggregation for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssPropertiesResult {
    pub result: BTreeMap<String, PropertyFact>,
    /// Properties with at least one token, keyed by property name.
    pub tokens: BTreeMap<String, NameList>,
    /// Properties with at least one variable, keyed by property name.
    pub variables: BTreeMap<String, NameList>,
}

impl CssPropertiesResult {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

// ─── Box model ────────────────────────────────────────────────────────────

/// Four-sided numeric values in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Edges {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }
}

/// Document-relative border box plus its margin, border and padding widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// Horizontal side an overlay panel should anchor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Right,
}

/// Vertical side an overlay panel should anchor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Bottom,
}

/// Quadrant hint: the viewport edges farthest from the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingAlignment {
    pub x: HorizontalAlign,
    pub y: VerticalAlign,
}

/// Box-model geometry of one element at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeasurements {
    #[serde(flatten)]
    pub dimensions: Dimensions,
    /// Border box expanded by the margins.
    pub extremities: Edges,
    pub floating_alignment: FloatingAlignment,
}

// ─── Tests ────────────────────────────────────────────────────────────────
