//! Small CSS text scanners built on `winnow`.
//!
//! - `var(--name)` reference extraction (all references, left to right)
//! - leading-integer extraction for computed lengths (`"12.5px"` → `12`)
//! - `property: value;` declaration lists, used to build rules from text

use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{opt, preceded};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

// ─── var() references ─────────────────────────────────────────────────────

/// Every custom-property name referenced through `var(` in `value`, in
/// source order. Fallback arguments are scanned too, so
/// `var(--a, var(--b))` yields `["--a", "--b"]`.
pub fn var_references(value: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = value;
    while let Some(pos) = rest.find("var(") {
        rest = &rest[pos..];
        let mut input = rest;
        match var_reference.parse_next(&mut input) {
            Ok(name) => {
                names.push(name);
                rest = input;
            }
            // `var(` followed by something that isn't a custom property.
            Err(_) => rest = &rest["var(".len()..],
        }
    }
    names
}

fn var_reference<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(("var(", multispace0), custom_property_name).parse_next(input)
}

fn custom_property_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    ("--", take_while(1.., is_name_char))
        .take()
        .parse_next(input)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

// ─── Numbers ──────────────────────────────────────────────────────────────

/// Integer prefix of a CSS length, `parseInt`-style: leading whitespace is
/// skipped, an optional sign and decimal digits are read, anything after
/// is ignored. Text with no leading digits (`auto`, `""`) yields `0`.
pub fn leading_int(text: &str) -> i64 {
    let mut input = text.trim_start();
    signed_integer.parse_next(&mut input).unwrap_or(0)
}

fn signed_integer(input: &mut &str) -> ModalResult<i64> {
    (opt(one_of(['+', '-'])), digit1)
        .take()
        .try_map(str::parse::<i64>)
        .parse_next(input)
}

// ─── Declaration lists ────────────────────────────────────────────────────

/// Parse a declaration block body (`color: red; margin: 0 auto`) into
/// ordered `(property, value)` pairs.
///
/// Property names are lowercased unless they are custom properties.
/// `!important` is dropped from values. Malformed entries are skipped.
pub fn parse_declarations(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut rest = text;
    loop {
        skip_separators(&mut rest);
        if rest.is_empty() {
            break;
        }
        let Some(name) = declaration_name(&mut rest) else {
            // Skip to the next statement.
            let end = split_value(rest).0.len();
            rest = &rest[end..];
            continue;
        };
        let (raw, tail) = split_value(rest);
        rest = tail;
        let value = strip_important(raw.trim());
        if value.is_empty() {
            continue;
        }
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        out.push((name, value.to_string()));
    }
    out
}

fn skip_separators(input: &mut &str) {
    *input = input.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
}

/// `name :` — returns the name and leaves the input after the colon.
fn declaration_name<'a>(input: &mut &'a str) -> Option<&'a str> {
    let checkpoint = *input;
    let parsed: Result<&str, winnow::error::ErrMode<ContextError>> = (
        take_while(1.., |c: char| is_name_char(c)),
        multispace0,
        ':',
    )
        .map(|(name, _, _)| name)
        .parse_next(input);
    match parsed {
        Ok(name) => Some(name),
        Err(_) => {
            *input = checkpoint;
            None
        }
    }
}

/// Split at the first `;` outside parentheses and quotes.
fn split_value(input: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => return (&input[..i], &input[i + 1..]),
            _ => {}
        }
    }
    (input, "")
}

fn strip_important(value: &str) -> &str {
    match value.rfind('!') {
        Some(pos) if value[pos + 1..].trim().eq_ignore_ascii_case("important") => {
            value[..pos].trim_end()
        }
        _ => value,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
