//! Frontmatter parsing for collection and reflection documents.

use std::{collections::BTreeMap, path::Path};

use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};

/// Raw frontmatter fields keyed by name.
///
/// Fields are kept untyped so that callers decide which ones are required and
/// how lenient to be about their types.
pub type FieldMap = BTreeMap<String, Value>;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// A leading byte-order mark is ignored. The opening and closing delimiters
/// must each sit alone on their line, so `----` rules and `---` inside a value
/// are not taken as frontmatter.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();
    let (opening, rest) = content.split_once('\n').unwrap_or((content, ""));
    if !is_delimiter_line(opening, delimiter) {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter_line(line, delimiter) {
            let frontmatter = rest[..offset].trim();
            let body = &rest[offset + line.len()..];
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

fn is_delimiter_line(line: &str, delimiter: &str) -> bool {
    line.strip_prefix(delimiter).is_some_and(|rest| rest.trim().is_empty())
}

/// Parse the frontmatter of a document into raw fields, returning the body.
///
/// A document without frontmatter yields no fields and the whole text as body.
pub fn parse_fields(content: &str, path: &Path) -> Result<(FieldMap, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((FieldMap::new(), content.to_string()));
    };

    let fields = match format {
        _ if fm_str.is_empty() => FieldMap::new(),
        FrontmatterFormat::Yaml => {
            let value: Value = serde_yaml::from_str(fm_str)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            match value {
                Value::Null => FieldMap::new(),
                Value::Mapping(mapping) => mapping_to_fields(mapping),
                _ => {
                    return Err(CoreError::frontmatter(
                        path,
                        "frontmatter must be a mapping of fields",
                    ));
                }
            }
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_yaml(value)))
                .collect()
        }
    };

    Ok((fields, body.to_string()))
}

/// Return the body of a document with any frontmatter removed.
pub fn strip_frontmatter(content: &str) -> &str {
    match split_frontmatter(content) {
        Some((_, _, body)) => body,
        None => content,
    }
}

/// Read a scalar field as a string.
///
/// Numbers and booleans are rendered as text; nulls, sequences and mappings
/// are treated as absent.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

/// Read a field as an integer.
///
/// Accepts integers, whole floats and numeric strings.
pub fn scalar_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Tagged(tagged) => scalar_integer(&tagged.value),
        _ => None,
    }
}

fn mapping_to_fields(mapping: Mapping) -> FieldMap {
    mapping
        .into_iter()
        .filter_map(|(key, value)| match key {
            Value::String(key) => Some((key, value)),
            _ => None,
        })
        .collect()
}

fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(key, value)| (Value::String(key), toml_to_yaml(value)))
                .collect(),
        ),
    }
}
