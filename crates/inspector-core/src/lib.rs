pub mod aggregate;
pub mod config;
pub mod error;
pub mod group;
pub mod inspect;
pub mod measure;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod shorthand;
pub mod stylesheet;

pub use aggregate::{ComputedStyle, Inspectable, aggregate, declared_properties};
pub use config::{BoxModelColors, InspectorConfig};
pub use error::{Error, Result};
pub use group::{GroupedProperties, GroupedProperty, group_by_kind};
pub use inspect::{Inspection, StyleSource, inspect_point};
pub use measure::{BoundingRect, Measurable, ViewportMetrics, measure_box};
pub use model::*;
pub use resolve::{HitTester, resolve};
pub use stylesheet::{
    CssRule, DeclarationReader, Declarations, LayerBlockRule, StyleRule, StyleSheet,
};
