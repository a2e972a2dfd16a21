//! Owned snapshot of the document's stylesheets.
//!
//! The WASM bridge copies `document.styleSheets` into this shape before
//! aggregation; tests build it directly. Only style rules and layer blocks
//! carry meaning here, every other rule kind is kept as [`CssRule::Other`].

use crate::parse::parse_declarations;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// One loaded stylesheet, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub href: Option<String>,
    pub rules: Vec<CssRule>,
}

impl StyleSheet {
    pub fn new(rules: Vec<CssRule>) -> Self {
        Self { href: None, rules }
    }
}

/// A top-level or nested rule.
#[derive(Debug, Clone, PartialEq)]
pub enum CssRule {
    Style(StyleRule),
    /// `@layer name { ... }` — walked for its nested rules.
    LayerBlock(LayerBlockRule),
    /// `@media`, `@font-face`, `@keyframes`, `@import`, ...
    Other,
}

impl CssRule {
    /// Shorthand for a style rule built from declaration text.
    pub fn style(selector: &str, declarations: &str) -> Self {
        Self::Style(StyleRule::new(selector, Declarations::parse(declarations)))
    }

    /// Shorthand for an `@layer` block.
    pub fn layer(name: Option<&str>, rules: Vec<CssRule>) -> Self {
        Self::LayerBlock(LayerBlockRule {
            name: name.map(str::to_string),
            rules,
        })
    }
}

/// Reads a rule's declarations from the host when they are first needed.
pub trait DeclarationReader {
    fn read(&self) -> Declarations;
}

/// Declarations already in hand, or a reader for them.
#[derive(Clone)]
enum DeclarationBlock {
    Parsed(Declarations),
    Deferred(Rc<dyn DeclarationReader>),
}

impl fmt::Debug for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(decls) => f.debug_tuple("Parsed").field(decls).finish(),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

impl PartialEq for DeclarationBlock {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Parsed(a), Self::Parsed(b)) => a == b,
            (Self::Deferred(a), Self::Deferred(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// `selector { declarations }`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selector: String,
    block: DeclarationBlock,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>, declarations: Declarations) -> Self {
        Self {
            selector: selector.into(),
            block: DeclarationBlock::Parsed(declarations),
        }
    }

    /// A rule whose declarations are read through `reader` on each call to
    /// [`StyleRule::declarations`]; the aggregator only asks for matching rules.
    pub fn deferred(selector: impl Into<String>, reader: impl DeclarationReader + 'static) -> Self {
        Self {
            selector: selector.into(),
            block: DeclarationBlock::Deferred(Rc::new(reader)),
        }
    }

    pub fn declarations(&self) -> Cow<'_, Declarations> {
        match &self.block {
            DeclarationBlock::Parsed(decls) => Cow::Borrowed(decls),
            DeclarationBlock::Deferred(reader) => Cow::Owned(reader.read()),
        }
    }
}

/// `@layer name { rules }`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBlockRule {
    pub name: Option<String>,
    pub rules: Vec<CssRule>,
}

/// Ordered `(property, value)` pairs of one rule.
///
/// Mirrors `CSSStyleDeclaration`: enumeration yields the declared (usually
/// longhand) properties, and shorthands the browser can still serialize may
/// be pushed as extra entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `property: value; ...` text.
    pub fn parse(text: &str) -> Self {
        Self {
            entries: parse_declarations(text),
        }
    }

    pub fn push(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.entries.push((property.into(), value.into()));
    }

    /// Value of `property`; the last declaration wins.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Declarations {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_declaration_wins() {
        let decls = Declarations::parse("color: red; color: blue");
        assert_eq!(decls.get("color"), Some("blue"));
        assert_eq!(decls.len(), 2);
        assert_eq!(decls.get("margin"), None);
    }

    #[test]
    fn style_helper_builds_rule() {
        let CssRule::Style(rule) = CssRule::style(".btn", "padding: 4px") else {
            panic!("expected style rule");
        };
        assert_eq!(rule.selector, ".btn");
        assert_eq!(rule.declarations().get("padding"), Some("4px"));
    }

    struct Fixed;

    impl DeclarationReader for Fixed {
        fn read(&self) -> Declarations {
            Declarations::parse("gap: 2px")
        }
    }

    #[test]
    fn deferred_rule_reads_on_demand() {
        let rule = StyleRule::deferred(".row", Fixed);
        assert_eq!(rule.declarations().get("gap"), Some("2px"));
        assert_eq!(rule.clone(), rule);
    }
}
