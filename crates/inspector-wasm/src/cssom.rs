//! Snapshot of `document.styleSheets` into the core stylesheet model.
//!
//! Only rule structure and selectors are copied up front. A style rule's
//! `CSSStyleDeclaration` is read when the aggregator asks for it, which it
//! does only after the selector matched.

use inspector_core::shorthand::shorthand_names;
use inspector_core::{
    CssRule, DeclarationReader, Declarations, LayerBlockRule, StyleRule, StyleSheet,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssRuleList, CssStyleDeclaration, CssStyleRule, CssStyleSheet, Document};

/// Read every accessible stylesheet in document order.
///
/// Sheets whose rules cannot be read (cross-origin) are skipped. Layer
/// blocks nested `max_depth` deep or more are kept empty.
pub fn snapshot(document: &Document, max_depth: usize) -> Vec<StyleSheet> {
    let list = document.style_sheets();
    let mut sheets = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        let Some(sheet) = list.item(i) else { continue };
        let Ok(sheet) = sheet.dyn_into::<CssStyleSheet>() else {
            continue;
        };
        let href = sheet.href().ok().flatten();
        match sheet.css_rules() {
            Ok(rules) => sheets.push(StyleSheet {
                href,
                rules: convert_rules(&rules, 0, max_depth),
            }),
            Err(_) => log::debug!(
                "skipping unreadable stylesheet {}",
                href.as_deref().unwrap_or("<inline>")
            ),
        }
    }
    sheets
}

fn convert_rules(list: &CssRuleList, depth: usize, max_depth: usize) -> Vec<CssRule> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|rule| {
            if let Some(style) = rule.dyn_ref::<CssStyleRule>() {
                return CssRule::Style(StyleRule::deferred(
                    style.selector_text(),
                    LiveDeclarations(style.clone()),
                ));
            }
            if is_layer_block(&rule) {
                let rules = match nested_rules(&rule) {
                    Some(nested) if depth < max_depth => {
                        convert_rules(&nested, depth + 1, max_depth)
                    }
                    _ => Vec::new(),
                };
                let name = js_sys::Reflect::get(&rule, &JsValue::from_str("name"))
                    .ok()
                    .and_then(|v| v.as_string())
                    .filter(|n| !n.is_empty());
                return CssRule::LayerBlock(LayerBlockRule { name, rules });
            }
            CssRule::Other
        })
        .collect()
}

/// `CSSLayerBlockRule` has no `web-sys` binding; match on its constructor.
fn is_layer_block(rule: &web_sys::CssRule) -> bool {
    let object: &js_sys::Object = rule.unchecked_ref();
    object.constructor().name() == "CSSLayerBlockRule"
}

fn nested_rules(rule: &web_sys::CssRule) -> Option<CssRuleList> {
    js_sys::Reflect::get(rule, &JsValue::from_str("cssRules"))
        .ok()?
        .dyn_into::<CssRuleList>()
        .ok()
}

/// Reads the rule's declaration block from the live CSSOM.
struct LiveDeclarations(CssStyleRule);

impl DeclarationReader for LiveDeclarations {
    fn read(&self) -> Declarations {
        declarations(&self.0.style())
    }
}

/// Declared longhands in declaration order, then every shorthand the
/// browser can serialize for this block.
fn declarations(style: &CssStyleDeclaration) -> Declarations {
    let mut out = Declarations::new();
    for i in 0..style.length() {
        let name = style.item(i);
        if name.is_empty() {
            continue;
        }
        let value = style.get_property_value(&name).unwrap_or_default();
        out.push(name, value);
    }
    for shorthand in shorthand_names() {
        let value = style.get_property_value(shorthand).unwrap_or_default();
        if !value.is_empty() {
            out.push(shorthand, value);
        }
    }
    out
}
