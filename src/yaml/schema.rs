//! Structural validation of YAML files before they are written.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::file::YamlTypeId;

/// Validation failure at a location inside a YAML document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct SchemaError {
    /// Dotted path to the offending value, e.g. `items[1].type`.
    pub location: String,
    pub message: String,
}

impl SchemaError {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Structural schema a YAML document must satisfy.
pub trait YamlSchema {
    /// Checks `document` against the schema.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    fn validate(&self, document: &Value) -> Result<(), SchemaError>;
}

/// Rejects documents holding null values.
///
/// Absent fields must be omitted rather than written as nulls.
///
/// # Errors
///
/// Returns the location of the first null value.
pub fn validate_no_undefined_members(document: &Value) -> Result<(), SchemaError> {
    check_defined(document, "$")
}

fn check_defined(value: &Value, location: &str) -> Result<(), SchemaError> {
    match value {
        Value::Null => Err(SchemaError::new(location, "value is undefined")),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| check_defined(item, &format!("{}[{}]", location, index))),
        Value::Mapping(map) => map.iter().try_for_each(|(key, item)| {
            let key = key.as_str().map_or_else(|| format!("{:?}", key), String::from);
            check_defined(item, &format!("{}.{}", location, key))
        }),
        Value::Tagged(tagged) => check_defined(&tagged.value, location),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
    }
}

/// Built-in schema of UniversalReference files.
///
/// A file is a mapping with a non-empty `items` sequence and an optional
/// `references` sequence. Items need string `uid`, `name` and `type`
/// fields, with `type` drawn from [`YamlTypeId`]. Unknown keys are
/// rejected at every level.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalReferenceSchema;

const FILE_KEYS: &[&str] = &["items", "references"];
const ITEM_KEYS: &[&str] = &[
    "uid", "summary", "remarks", "name", "fullName", "langs", "type", "children",
];
const REFERENCE_KEYS: &[&str] = &["uid", "name"];

impl YamlSchema for UniversalReferenceSchema {
    fn validate(&self, document: &Value) -> Result<(), SchemaError> {
        let file = expect_mapping(document, "$")?;
        check_known_keys(file, FILE_KEYS, "$")?;

        let items = file
            .get("items")
            .ok_or_else(|| SchemaError::new("$", "missing required field 'items'"))?;
        let items = expect_sequence(items, "$.items")?;
        if items.is_empty() {
            return Err(SchemaError::new("$.items", "must contain at least one item"));
        }
        for (index, item) in items.iter().enumerate() {
            validate_item(item, &format!("$.items[{}]", index))?;
        }

        if let Some(references) = file.get("references") {
            let references = expect_sequence(references, "$.references")?;
            for (index, reference) in references.iter().enumerate() {
                validate_reference(reference, &format!("$.references[{}]", index))?;
            }
        }

        Ok(())
    }
}

fn validate_item(item: &Value, location: &str) -> Result<(), SchemaError> {
    let map = expect_mapping(item, location)?;
    check_known_keys(map, ITEM_KEYS, location)?;

    for key in ["uid", "name"] {
        required_string(map, key, location)?;
    }
    for key in ["fullName", "summary", "remarks"] {
        optional_string(map, key, location)?;
    }
    for key in ["langs", "children"] {
        optional_string_sequence(map, key, location)?;
    }

    let type_name = required_string(map, "type", location)?;
    if !YamlTypeId::ALL
        .iter()
        .any(|type_id| type_id.as_str() == type_name)
    {
        return Err(SchemaError::new(
            format!("{}.type", location),
            format!("unknown item type '{}'", type_name),
        ));
    }

    Ok(())
}

fn validate_reference(reference: &Value, location: &str) -> Result<(), SchemaError> {
    let map = expect_mapping(reference, location)?;
    check_known_keys(map, REFERENCE_KEYS, location)?;
    required_string(map, "uid", location)?;
    optional_string(map, "name", location)?;
    Ok(())
}

fn expect_mapping<'a>(value: &'a Value, location: &str) -> Result<&'a Mapping, SchemaError> {
    value
        .as_mapping()
        .ok_or_else(|| SchemaError::new(location, "expected a mapping"))
}

fn expect_sequence<'a>(value: &'a Value, location: &str) -> Result<&'a Vec<Value>, SchemaError> {
    value
        .as_sequence()
        .ok_or_else(|| SchemaError::new(location, "expected a sequence"))
}

fn check_known_keys(map: &Mapping, allowed: &[&str], location: &str) -> Result<(), SchemaError> {
    for key in map.keys() {
        match key.as_str() {
            Some(name) if allowed.contains(&name) => {}
            Some(name) => {
                return Err(SchemaError::new(
                    location,
                    format!("unexpected field '{}'", name),
                ));
            }
            None => return Err(SchemaError::new(location, "field names must be strings")),
        }
    }
    Ok(())
}

fn required_string<'a>(map: &'a Mapping, key: &str, location: &str) -> Result<&'a str, SchemaError> {
    let value = map
        .get(key)
        .ok_or_else(|| SchemaError::new(location, format!("missing required field '{}'", key)))?;
    value
        .as_str()
        .ok_or_else(|| SchemaError::new(format!("{}.{}", location, key), "expected a string"))
}

fn optional_string(map: &Mapping, key: &str, location: &str) -> Result<(), SchemaError> {
    match map.get(key) {
        None => Ok(()),
        Some(value) if value.is_string() => Ok(()),
        Some(_) => Err(SchemaError::new(
            format!("{}.{}", location, key),
            "expected a string",
        )),
    }
}

fn optional_string_sequence(map: &Mapping, key: &str, location: &str) -> Result<(), SchemaError> {
    let Some(value) = map.get(key) else {
        return Ok(());
    };
    let location = format!("{}.{}", location, key);
    let entries = expect_sequence(value, &location)?;
    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_string() {
            return Err(SchemaError::new(
                format!("{}[{}]", location, index),
                "expected a string",
            ));
        }
    }
    Ok(())
}
