//! CSS shorthand → longhand table.
//!
//! Longhands are listed in the order MDN documents them (TRBL for box
//! properties). Shorthands that expand into other shorthands list both
//! levels so a merge removes every key the shorthand covers.

/// `(shorthand, longhands)` pairs.
pub const SHORTHANDS: &[(&str, &[&str])] = &[
    ("all", &[]),
    (
        "animation",
        &[
            "animation-name",
            "animation-duration",
            "animation-timing-function",
            "animation-delay",
            "animation-iteration-count",
            "animation-direction",
            "animation-fill-mode",
            "animation-play-state",
            "animation-timeline",
        ],
    ),
    (
        "animation-range",
        &["animation-range-start", "animation-range-end"],
    ),
    (
        "background",
        &[
            "background-attachment",
            "background-clip",
            "background-color",
            "background-image",
            "background-origin",
            "background-position",
            "background-position-x",
            "background-position-y",
            "background-repeat",
            "background-size",
        ],
    ),
    (
        "background-position",
        &["background-position-x", "background-position-y"],
    ),
    (
        "border",
        &[
            "border-width",
            "border-style",
            "border-color",
            "border-top",
            "border-right",
            "border-bottom",
            "border-left",
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
            "border-image",
            "border-image-outset",
            "border-image-repeat",
            "border-image-slice",
            "border-image-source",
            "border-image-width",
        ],
    ),
    (
        "border-block",
        &[
            "border-block-width",
            "border-block-style",
            "border-block-color",
            "border-block-start",
            "border-block-end",
        ],
    ),
    (
        "border-block-color",
        &["border-block-start-color", "border-block-end-color"],
    ),
    (
        "border-block-end",
        &[
            "border-block-end-width",
            "border-block-end-style",
            "border-block-end-color",
        ],
    ),
    (
        "border-block-start",
        &[
            "border-block-start-width",
            "border-block-start-style",
            "border-block-start-color",
        ],
    ),
    (
        "border-block-style",
        &["border-block-start-style", "border-block-end-style"],
    ),
    (
        "border-block-width",
        &["border-block-start-width", "border-block-end-width"],
    ),
    (
        "border-bottom",
        &[
            "border-bottom-width",
            "border-bottom-style",
            "border-bottom-color",
        ],
    ),
    (
        "border-color",
        &[
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    ),
    (
        "border-image",
        &[
            "border-image-source",
            "border-image-slice",
            "border-image-width",
            "border-image-outset",
            "border-image-repeat",
        ],
    ),
    (
        "border-inline",
        &[
            "border-inline-width",
            "border-inline-style",
            "border-inline-color",
            "border-inline-start",
            "border-inline-end",
        ],
    ),
    (
        "border-inline-color",
        &["border-inline-start-color", "border-inline-end-color"],
    ),
    (
        "border-inline-end",
        &[
            "border-inline-end-width",
            "border-inline-end-style",
            "border-inline-end-color",
        ],
    ),
    (
        "border-inline-start",
        &[
            "border-inline-start-width",
            "border-inline-start-style",
            "border-inline-start-color",
        ],
    ),
    (
        "border-inline-style",
        &["border-inline-start-style", "border-inline-end-style"],
    ),
    (
        "border-inline-width",
        &["border-inline-start-width", "border-inline-end-width"],
    ),
    (
        "border-left",
        &["border-left-width", "border-left-style", "border-left-color"],
    ),
    (
        "border-radius",
        &[
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
    ),
    (
        "border-right",
        &[
            "border-right-width",
            "border-right-style",
            "border-right-color",
        ],
    ),
    (
        "border-style",
        &[
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
    ),
    (
        "border-top",
        &["border-top-width", "border-top-style", "border-top-color"],
    ),
    (
        "border-width",
        &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
    ),
    ("column-rule", &["column-rule-width", "column-rule-style", "column-rule-color"]),
    ("columns", &["column-width", "column-count"]),
    (
        "contain-intrinsic-size",
        &["contain-intrinsic-width", "contain-intrinsic-height"],
    ),
    ("container", &["container-name", "container-type"]),
    ("flex", &["flex-grow", "flex-shrink", "flex-basis"]),
    ("flex-flow", &["flex-direction", "flex-wrap"]),
    (
        "font",
        &[
            "font-style",
            "font-variant",
            "font-variant-caps",
            "font-weight",
            "font-stretch",
            "font-size",
            "line-height",
            "font-family",
        ],
    ),
    (
        "font-synthesis",
        &[
            "font-synthesis-weight",
            "font-synthesis-style",
            "font-synthesis-small-caps",
            "font-synthesis-position",
        ],
    ),
    (
        "font-variant",
        &[
            "font-variant-alternates",
            "font-variant-caps",
            "font-variant-east-asian",
            "font-variant-emoji",
            "font-variant-ligatures",
            "font-variant-numeric",
            "font-variant-position",
        ],
    ),
    ("gap", &["row-gap", "column-gap"]),
    (
        "grid",
        &[
            "grid-template-rows",
            "grid-template-columns",
            "grid-template-areas",
            "grid-auto-rows",
            "grid-auto-columns",
            "grid-auto-flow",
        ],
    ),
    (
        "grid-area",
        &[
            "grid-row-start",
            "grid-column-start",
            "grid-row-end",
            "grid-column-end",
        ],
    ),
    ("grid-column", &["grid-column-start", "grid-column-end"]),
    ("grid-row", &["grid-row-start", "grid-row-end"]),
    (
        "grid-template",
        &[
            "grid-template-rows",
            "grid-template-columns",
            "grid-template-areas",
        ],
    ),
    ("inset", &["top", "right", "bottom", "left"]),
    ("inset-block", &["inset-block-start", "inset-block-end"]),
    ("inset-inline", &["inset-inline-start", "inset-inline-end"]),
    (
        "list-style",
        &["list-style-type", "list-style-image", "list-style-position"],
    ),
    (
        "margin",
        &["margin-top", "margin-right", "margin-bottom", "margin-left"],
    ),
    ("margin-block", &["margin-block-start", "margin-block-end"]),
    ("margin-inline", &["margin-inline-start", "margin-inline-end"]),
    (
        "mask",
        &[
            "mask-clip",
            "mask-composite",
            "mask-image",
            "mask-mode",
            "mask-origin",
            "mask-position",
            "mask-repeat",
            "mask-size",
        ],
    ),
    (
        "mask-border",
        &[
            "mask-border-mode",
            "mask-border-outset",
            "mask-border-repeat",
            "mask-border-slice",
            "mask-border-source",
            "mask-border-width",
        ],
    ),
    (
        "offset",
        &[
            "offset-anchor",
            "offset-distance",
            "offset-path",
            "offset-position",
            "offset-rotate",
        ],
    ),
    ("outline", &["outline-color", "outline-style", "outline-width"]),
    ("overflow", &["overflow-x", "overflow-y"]),
    (
        "overscroll-behavior",
        &["overscroll-behavior-x", "overscroll-behavior-y"],
    ),
    (
        "padding",
        &[
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ],
    ),
    ("padding-block", &["padding-block-start", "padding-block-end"]),
    ("padding-inline", &["padding-inline-start", "padding-inline-end"]),
    ("place-content", &["align-content", "justify-content"]),
    ("place-items", &["align-items", "justify-items"]),
    ("place-self", &["align-self", "justify-self"]),
    (
        "scroll-margin",
        &[
            "scroll-margin-top",
            "scroll-margin-right",
            "scroll-margin-bottom",
            "scroll-margin-left",
        ],
    ),
    (
        "scroll-margin-block",
        &["scroll-margin-block-start", "scroll-margin-block-end"],
    ),
    (
        "scroll-margin-inline",
        &["scroll-margin-inline-start", "scroll-margin-inline-end"],
    ),
    (
        "scroll-padding",
        &[
            "scroll-padding-top",
            "scroll-padding-right",
            "scroll-padding-bottom",
            "scroll-padding-left",
        ],
    ),
    (
        "scroll-padding-block",
        &["scroll-padding-block-start", "scroll-padding-block-end"],
    ),
    (
        "scroll-padding-inline",
        &["scroll-padding-inline-start", "scroll-padding-inline-end"],
    ),
    (
        "scroll-timeline",
        &["scroll-timeline-name", "scroll-timeline-axis"],
    ),
    (
        "text-decoration",
        &[
            "text-decoration-color",
            "text-decoration-line",
            "text-decoration-style",
            "text-decoration-thickness",
        ],
    ),
    (
        "text-emphasis",
        &["text-emphasis-color", "text-emphasis-style"],
    ),
    (
        "text-wrap",
        &["text-wrap-mode", "text-wrap-style"],
    ),
    (
        "transition",
        &[
            "transition-behavior",
            "transition-delay",
            "transition-duration",
            "transition-property",
            "transition-timing-function",
        ],
    ),
    (
        "view-timeline",
        &["view-timeline-name", "view-timeline-axis"],
    ),
    ("white-space", &["white-space-collapse", "text-wrap-mode"]),
];

/// Longhands covered by `shorthand`, or `None` if it is not a shorthand.
pub fn longhands(shorthand: &str) -> Option<&'static [&'static str]> {
    SHORTHANDS
        .iter()
        .find(|(name, _)| *name == shorthand)
        .map(|(_, longhands)| *longhands)
}

pub fn is_shorthand(property: &str) -> bool {
    longhands(property).is_some()
}

/// Shorthand names in table order.
pub fn shorthand_names() -> impl Iterator<Item = &'static str> {
    SHORTHANDS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_expands_trbl() {
        assert_eq!(
            longhands("margin"),
            Some(&["margin-top", "margin-right", "margin-bottom", "margin-left"][..])
        );
    }

    #[test]
    fn longhand_is_not_shorthand() {
        assert!(!is_shorthand("margin-top"));
        assert!(!is_shorthand("color"));
        assert!(is_shorthand("border-top"));
    }

    #[test]
    fn table_has_no_duplicate_shorthands() {
        let mut names: Vec<_> = shorthand_names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
