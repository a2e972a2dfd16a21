//! Resolution + aggregation boundary.
//!
//! Everything that can go wrong for one pointer event (host exceptions,
//! unreadable stylesheets, a missing computed style) ends here as
//! [`Inspection::Empty`]; the next event simply tries again.

use crate::aggregate::{Inspectable, aggregate};
use crate::config::InspectorConfig;
use crate::error::Result;
use crate::model::{CssPropertiesResult, Point};
use crate::resolve::{HitTester, resolve};
use crate::stylesheet::StyleSheet;

/// Supplies the document's stylesheets in document order.
pub trait StyleSource {
    /// # Errors
    /// Fails when the stylesheet list itself cannot be read.
    fn style_sheets(&self) -> Result<Vec<StyleSheet>>;
}

/// Outcome of inspecting one point.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection<N> {
    Found {
        element: N,
        properties: CssPropertiesResult,
    },
    Empty,
}

impl<N> Inspection<N> {
    pub fn element(&self) -> Option<&N> {
        match self {
            Self::Found { element, .. } => Some(element),
            Self::Empty => None,
        }
    }

    pub fn properties(&self) -> Option<&CssPropertiesResult> {
        match self {
            Self::Found { properties, .. } => Some(properties),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Resolve the element under `point` and aggregate its CSS facts.
pub fn inspect_point<H>(host: &H, point: Point, config: &InspectorConfig) -> Inspection<H::Node>
where
    H: HitTester + StyleSource,
    H::Node: Inspectable,
{
    let Some(element) = resolve(host, point, config) else {
        return Inspection::Empty;
    };
    match inspect_element(host, &element, config) {
        Ok(properties) => Inspection::Found {
            element,
            properties,
        },
        Err(e) => {
            log::debug!("inspection at ({}, {}) dropped: {e}", point.x, point.y);
            Inspection::Empty
        }
    }
}

fn inspect_element<S, E>(source: &S, element: &E, config: &InspectorConfig) -> Result<CssPropertiesResult>
where
    S: StyleSource,
    E: Inspectable,
{
    let sheets = source.style_sheets()?;
    aggregate(&sheets, element, config)
}
