//! `${dotted.path}` placeholder substitution.
//!
//! Placeholders reference other values of the document being populated:
//!
//! ```text
//! { "a": { "a1": "one", "aa": "${a.a1}-x" } }   -> aa = "one-x"
//! { "port": 80, "copy": "${port}" }             -> copy = 80 (type kept)
//! { "first": "${list.0}", "list": ["x"] }       -> first = "x"
//! ```
//!
//! A string made of a single placeholder takes the referenced value as-is;
//! otherwise every placeholder is rendered as text. References are resolved
//! recursively against the original document.
//!
//! Substituted text is not re-scanned within one pass, but the output can
//! still contain placeholder syntax when literals and references concatenate
//! into it:
//!
//! ```text
//! { "d": "$", "e": "${d}{x}" }   -> e = "${x}"
//! ```
//!
//! The loader populates the whole accumulated document after every file, so
//! such a value is reported by the next load step, against that file.

use crate::error::PopulateError;
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)(\})?").expect("placeholder regex is valid"));

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Token(&'a str),
}

/// Replace every placeholder in `document` with the value it references.
pub fn populate(document: &Value) -> Result<Value, PopulateError> {
    Resolver {
        root: document,
        stack: Vec::new(),
    }
    .resolve(document)
}

/// Populate every value of a top-level mapping.
pub fn populate_map(map: &Map<String, Value>) -> Result<Map<String, Value>, PopulateError> {
    let root = Value::Object(map.clone());
    Resolver {
        root: &root,
        stack: Vec::new(),
    }
    .resolve_map(map)
}

/// Split a string into literal text and placeholder tokens.
fn parse(input: &str) -> Result<Vec<Segment<'_>>, PopulateError> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(&input[last..whole.start()]));
        }
        if caps.get(2).is_none() {
            return Err(PopulateError::Unterminated(input.to_string()));
        }
        let inner = caps.get(1).map_or("", |m| m.as_str());
        segments.push(Segment::Token(inner.trim()));
        last = whole.end();
    }

    if last < input.len() {
        segments.push(Segment::Literal(&input[last..]));
    }
    Ok(segments)
}

/// Look up a dotted path: object keys, or decimal indexes into arrays.
fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

struct Resolver<'a> {
    root: &'a Value,
    /// Paths currently being resolved, outermost first.
    stack: Vec<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, value: &Value) -> Result<Value, PopulateError> {
        match value {
            Value::String(s) => self.resolve_string(s),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => self.resolve_map(map).map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    fn resolve_map(&mut self, map: &Map<String, Value>) -> Result<Map<String, Value>, PopulateError> {
        let mut out = Map::with_capacity(map.len());
        for (key, item) in map {
            out.insert(key.clone(), self.resolve(item)?);
        }
        Ok(out)
    }

    fn resolve_string(&mut self, s: &str) -> Result<Value, PopulateError> {
        if !s.contains('$') {
            return Ok(Value::String(s.to_string()));
        }

        let segments = parse(s)?;
        if let [Segment::Token(path)] = segments.as_slice() {
            return self.resolve_path(path);
        }

        let mut out = String::with_capacity(s.len());
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(path) => out.push_str(&to_text(&self.resolve_path(path)?)),
            }
        }
        Ok(Value::String(out))
    }

    fn resolve_path(&mut self, path: &str) -> Result<Value, PopulateError> {
        if self.stack.iter().any(|p| p == path) {
            let mut chain = self.stack.clone();
            chain.push(path.to_string());
            return Err(PopulateError::Cycle(chain));
        }

        let raw = lookup(self.root, path)
            .ok_or_else(|| PopulateError::Unresolved(path.to_string()))?;

        self.stack.push(path.to_string());
        let resolved = self.resolve(raw);
        self.stack.pop();
        resolved
    }
}
