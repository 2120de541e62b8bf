//! Placeholder substitution for the page templates.
//!
//! The two HTML templates (`index.html`, `wasm.html`) live in the project's
//! webpage directory, not in this binary. They use `$name` / `${name}`
//! placeholders and `$$` for a literal dollar sign.
//!
//! Substitution is safe: a placeholder without a supplied value, or a `$`
//! that does not start a placeholder, is copied through unchanged. Inline
//! JavaScript such as `$(document)` therefore survives rendering.
//!
//! Values are escaped on insertion unless they are supplied as
//! [`Markup`], which is how the maud-built gallery goes in.

use maud::{Markup, html};
use std::collections::BTreeMap;

/// Placeholders a page kind fills in.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderSet {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder { name: String, raw: String },
}

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Values for a single render.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text, HTML-escaped on insertion.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.values
            .insert(name.to_string(), html! { (value) }.into_string());
        self
    }

    /// Pre-rendered markup, inserted as-is.
    pub fn markup(mut self, name: &str, value: Markup) -> Self {
        self.values.insert(name.to_string(), value.into_string());
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                literal.push('$');
                rest = tail;
                continue;
            }

            let placeholder = if let Some(braced) = after.strip_prefix('{') {
                braced.find('}').and_then(|end| {
                    let name = &braced[..end];
                    let valid = name.starts_with(is_ident_start) && name.chars().all(is_ident_char);
                    valid.then(|| (name, end + 3))
                })
            } else if after.starts_with(is_ident_start) {
                let end = after
                    .find(|c: char| !is_ident_char(c))
                    .unwrap_or(after.len());
                Some((&after[..end], end + 1))
            } else {
                None
            };

            match placeholder {
                Some((name, len)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder {
                        name: name.to_string(),
                        raw: rest[pos..pos + len].to_string(),
                    });
                    rest = &rest[pos + len..];
                }
                None => {
                    literal.push('$');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder { name, .. } = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }

    /// Required placeholders of `set` that this template never mentions.
    pub fn missing_required(&self, set: &PlaceholderSet) -> Vec<&'static str> {
        let present = self.placeholders();
        set.required
            .iter()
            .copied()
            .filter(|name| !present.contains(name))
            .collect()
    }

    /// Placeholders in this template that `set` does not declare.
    pub fn undeclared(&self, set: &PlaceholderSet) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !set.required.contains(name) && !set.optional.contains(name))
            .collect()
    }

    pub fn render(&self, values: &Substitutions) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, raw } => match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(raw),
                },
            }
        }
        out
    }
}
