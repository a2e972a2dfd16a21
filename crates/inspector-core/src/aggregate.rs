//! CSS property aggregation for one element.
//!
//! 1. Walk every stylesheet (recursing into `@layer` blocks) and record the
//!    declarations of each style rule whose selector matches the element.
//! 2. Collapse longhands into the shorthands that were declared.
//! 3. Pull `var(--name)` references and design tokens out of each value.
//! 4. Attach the computed value of each property, and of its variable when
//!    exactly one is referenced.
//!
//! Rules are applied in document order; the last match wins. There is no
//! specificity, media-query or pseudo-class handling.

use crate::config::InspectorConfig;
use crate::error::Result;
use crate::model::{CssPropertiesResult, NameList, PropertyFact, RawPropertyMap};
use crate::parse::var_references;
use crate::shorthand;
use crate::stylesheet::{CssRule, Declarations, StyleSheet};

// ─── Host seams ───────────────────────────────────────────────────────────

/// Read access to an element's computed style (`getComputedStyle`).
pub trait ComputedStyle {
    /// Computed value of `property`; an empty string when unknown, as
    /// `CSSStyleDeclaration.getPropertyValue` reports it.
    fn property_value(&self, property: &str) -> String;
}

/// An element whose styles can be inspected.
pub trait Inspectable {
    type Computed: ComputedStyle;

    /// `Element.matches(selector)`. Errors for selectors the host rejects.
    fn matches(&self, selector: &str) -> Result<bool>;

    /// The element's computed style, read once per aggregation.
    fn computed_style(&self) -> Result<Self::Computed>;
}

// ─── Validity ─────────────────────────────────────────────────────────────

/// Selectors that are worth matching: non-empty, not a bare custom property,
/// not the universal or nesting marker on its own.
pub fn is_valid_selector(selector: &str) -> bool {
    let selector = selector.trim();
    !selector.is_empty() && !selector.starts_with("--") && !matches!(selector, "*" | "&")
}

/// Values worth recording: non-empty and not a reset keyword.
pub fn is_valid_value(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !["initial", "inherit", "all"]
            .iter()
            .any(|keyword| value.eq_ignore_ascii_case(keyword))
}

/// Normalize a custom-property name carrying `prefix` into a token name:
/// `--nk-color-primary` → `COLOR_PRIMARY`.
pub fn token_name(variable: &str, prefix: &str) -> Option<String> {
    let rest = variable.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.replace('-', "_").to_uppercase())
}

// ─── Rule collection ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Collected {
    /// Every declared property.
    output: RawPropertyMap,
    /// Only properties from the shorthand table.
    shorthands: RawPropertyMap,
}

impl Collected {
    fn record(&mut self, declarations: &Declarations) {
        for name in shorthand::shorthand_names() {
            if let Some(value) = declarations.get(name)
                && is_valid_value(value)
            {
                self.shorthands.insert(name.to_string(), value.to_string());
            }
        }
        for (name, value) in declarations.iter() {
            if is_valid_value(value) {
                self.output.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Drop every longhand a declared shorthand covers, whichever rule
    /// declared it and in whatever order, then put the shorthands back in.
    fn merge(self) -> RawPropertyMap {
        let Collected {
            mut output,
            shorthands,
        } = self;
        for name in shorthands.keys() {
            for longhand in shorthand::longhands(name).unwrap_or_default() {
                output.remove(*longhand);
            }
        }
        output.extend(shorthands);
        output
    }
}

fn collect_rules<E: Inspectable>(
    rules: &[CssRule],
    element: &E,
    depth: usize,
    max_depth: usize,
    collected: &mut Collected,
) {
    for rule in rules {
        match rule {
            CssRule::Style(style_rule) => {
                if !is_valid_selector(&style_rule.selector) {
                    continue;
                }
                match element.matches(&style_rule.selector) {
                    Ok(true) => collected.record(&style_rule.declarations()),
                    Ok(false) => {}
                    Err(e) => {
                        log::debug!("skipping rule `{}`: {e}", style_rule.selector);
                    }
                }
            }
            CssRule::LayerBlock(layer) => {
                if depth >= max_depth {
                    log::warn!(
                        "layer block {:?} nested deeper than {max_depth}; skipped",
                        layer.name
                    );
                    continue;
                }
                collect_rules(&layer.rules, element, depth + 1, max_depth, collected);
            }
            CssRule::Other => {}
        }
    }
}

/// Steps 1–2: declared properties of `element` after shorthand merging.
pub fn declared_properties<E: Inspectable>(
    sheets: &[StyleSheet],
    element: &E,
    max_rule_depth: usize,
) -> RawPropertyMap {
    let mut collected = Collected::default();
    for sheet in sheets {
        collect_rules(&sheet.rules, element, 0, max_rule_depth, &mut collected);
    }
    collected.merge()
}

// ─── Aggregation ──────────────────────────────────────────────────────────

/// Aggregate the CSS facts of `element` from `sheets`.
///
/// # Errors
/// Fails only when the host cannot produce a computed style.
pub fn aggregate<E: Inspectable>(
    sheets: &[StyleSheet],
    element: &E,
    config: &InspectorConfig,
) -> Result<CssPropertiesResult> {
    let declared = declared_properties(sheets, element, config.max_rule_depth);
    if declared.is_empty() {
        return Ok(CssPropertiesResult::default());
    }

    let computed = element.computed_style()?;
    let mut out = CssPropertiesResult::default();

    for (property, value) in declared {
        let variables: NameList = if value.contains("var(") {
            var_references(&value).into_iter().map(str::to_string).collect()
        } else {
            NameList::new()
        };
        let tokens: NameList = variables
            .iter()
            .filter_map(|variable| token_name(variable, &config.token_prefix))
            .collect();

        let variable_value = match variables.as_slice() {
            [single] => non_empty(computed.property_value(single)),
            _ => None,
        };

        if !tokens.is_empty() {
            out.tokens.insert(property.clone(), tokens.clone());
        }
        if !variables.is_empty() {
            out.variables.insert(property.clone(), variables.clone());
        }

        let fact = PropertyFact {
            computed: non_empty(computed.property_value(&property)),
            value: Some(value),
            token: (!tokens.is_empty()).then_some(tokens),
            variable: (!variables.is_empty()).then_some(variables),
            variable_value,
        };
        log::trace!("{property}: {fact:?}");
        out.result.insert(property, fact);
    }

    Ok(out)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Matches a fixed set of selectors; computed values from a map.
    struct FakeElement {
        selectors: Vec<&'static str>,
        computed: HashMap<&'static str, &'static str>,
    }

    struct FakeComputed(HashMap<&'static str, &'static str>);

    impl ComputedStyle for FakeComputed {
        fn property_value(&self, property: &str) -> String {
            self.0.get(property).copied().unwrap_or_default().to_string()
        }
    }

    impl Inspectable for FakeElement {
        type Computed = FakeComputed;

        fn matches(&self, selector: &str) -> Result<bool> {
            if selector.contains("::invalid") {
                return Err(Error::platform("matches", "SyntaxError"));
            }
            Ok(self.selectors.contains(&selector))
        }

        fn computed_style(&self) -> Result<FakeComputed> {
            Ok(FakeComputed(self.computed.clone()))
        }
    }

    fn element(selectors: &[&'static str]) -> FakeElement {
        FakeElement {
            selectors: selectors.to_vec(),
            computed: HashMap::new(),
        }
    }

    #[test]
    fn selector_validity() {
        assert!(is_valid_selector(".btn"));
        assert!(!is_valid_selector(""));
        assert!(!is_valid_selector("  "));
        assert!(!is_valid_selector("--brand"));
        assert!(!is_valid_selector("*"));
        assert!(!is_valid_selector("&"));
    }

    #[test]
    fn value_validity() {
        assert!(is_valid_value("10px"));
        assert!(!is_valid_value(""));
        assert!(!is_valid_value("INHERIT"));
        assert!(!is_valid_value(" initial "));
        assert!(!is_valid_value("all"));
    }

    #[test]
    fn token_names_are_normalized() {
        assert_eq!(
            token_name("--nk-color-primary", "--nk-").as_deref(),
            Some("COLOR_PRIMARY")
        );
        assert_eq!(token_name("--bg-color", "--nk-"), None);
        assert_eq!(token_name("--nk-", "--nk-"), None);
    }

    #[test]
    fn no_matching_rules_gives_empty_result() {
        let sheets = vec![StyleSheet::new(vec![CssRule::style(".other", "color: red")])];
        let result = aggregate(&sheets, &element(&[".btn"]), &InspectorConfig::default()).unwrap();
        assert_eq!(result, CssPropertiesResult::default());
    }

    #[test]
    fn invalid_values_are_not_recorded() {
        let sheets = vec![StyleSheet::new(vec![CssRule::style(
            ".btn",
            "color: inherit; width: initial; height: 4px",
        )])];
        let declared = declared_properties(&sheets, &element(&[".btn"]), 4);
        assert_eq!(declared.keys().collect::<Vec<_>>(), vec!["height"]);
    }

    #[test]
    fn later_rule_wins() {
        let sheets = vec![
            StyleSheet::new(vec![CssRule::style(".btn", "color: red")]),
            StyleSheet::new(vec![CssRule::style(".btn", "color: blue")]),
        ];
        let declared = declared_properties(&sheets, &element(&[".btn"]), 4);
        assert_eq!(declared["color"], "blue");
    }

    #[test]
    fn host_rejected_selector_is_skipped() {
        let sheets = vec![StyleSheet::new(vec![
            CssRule::style(".btn::invalid", "color: red"),
            CssRule::style(".btn", "width: 1px"),
        ])];
        let declared = declared_properties(&sheets, &element(&[".btn"]), 4);
        assert_eq!(declared.len(), 1);
        assert_eq!(declared["width"], "1px");
    }

    #[test]
    fn layer_depth_is_capped() {
        let inner = CssRule::layer(Some("deep"), vec![CssRule::style(".btn", "color: red")]);
        let sheets = vec![StyleSheet::new(vec![CssRule::layer(Some("outer"), vec![inner])])];
        assert!(declared_properties(&sheets, &element(&[".btn"]), 1).is_empty());
        assert_eq!(declared_properties(&sheets, &element(&[".btn"]), 2)["color"], "red");
    }

    #[test]
    fn computed_style_failure_propagates() {
        struct Broken;
        impl Inspectable for Broken {
            type Computed = FakeComputed;
            fn matches(&self, _: &str) -> Result<bool> {
                Ok(true)
            }
            fn computed_style(&self) -> Result<FakeComputed> {
                Err(Error::ComputedStyleUnavailable)
            }
        }
        let sheets = vec![StyleSheet::new(vec![CssRule::style(".x", "color: red")])];
        let err = aggregate(&sheets, &Broken, &InspectorConfig::default()).unwrap_err();
        assert_eq!(err, Error::ComputedStyleUnavailable);
    }

    #[test]
    fn empty_computed_values_are_absent() {
        let sheets = vec![StyleSheet::new(vec![CssRule::style(".btn", "color: var(--missing)")])];
        let result = aggregate(&sheets, &element(&[".btn"]), &InspectorConfig::default()).unwrap();
        let fact = &result.result["color"];
        assert_eq!(fact.computed, None);
        assert_eq!(fact.variable_value, None);
        assert_eq!(fact.token, None);
        assert_eq!(fact.variable.as_ref().map(|v| v.len()), Some(1));
    }
}
