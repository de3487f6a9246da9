//! JSON:API document flattening.
//!
//! Drupal answers with JSON:API documents where every resource keeps its
//! fields under `attributes` and points at related resources through
//! `relationships`. Page templates want plain objects instead, so this module
//! lifts attributes next to `id` and `type` and replaces every relationship
//! with the matching `included` resource (flattened the same way). Meta
//! carried by a resource identifier, such as an image `alt`, is exposed on the
//! related object as `resourceIdObjMeta`.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::DrupalError;

/// Relationship nesting limit; guards against reference cycles in `included`.
const MAX_DEPTH: usize = 8;

/// Key under which identifier meta is exposed on a related object.
pub const RESOURCE_ID_META: &str = "resourceIdObjMeta";

type IncludedIndex<'a> = HashMap<(&'a str, &'a str), &'a Value>;

/// Flatten a JSON:API document.
///
/// Returns an array for collection documents, an object for single-resource
/// documents and `null` when the primary data is `null`.
///
/// # Errors
///
/// Returns [`DrupalError::InvalidDocument`] if the document has no `data` member.
pub fn flatten_document(document: &Value) -> Result<Value, DrupalError> {
    let data = document
        .get("data")
        .ok_or_else(|| DrupalError::InvalidDocument("missing data member".into()))?;
    let included = index_included(document.get("included"));

    Ok(match data {
        Value::Array(resources) => Value::Array(
            resources
                .iter()
                .map(|resource| flatten_resource(resource, &included, 0))
                .collect(),
        ),
        Value::Object(_) => flatten_resource(data, &included, 0),
        _ => Value::Null,
    })
}

/// Link to the next page of a collection document, if any.
#[must_use]
pub fn next_link(document: &Value) -> Option<&str> {
    document.get("links")?.get("next")?.get("href")?.as_str()
}

fn index_included(included: Option<&Value>) -> IncludedIndex<'_> {
    included
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|resource| {
            let kind = resource.get("type")?.as_str()?;
            let id = resource.get("id")?.as_str()?;
            Some(((kind, id), resource))
        })
        .collect()
}

fn flatten_resource(resource: &Value, included: &IncludedIndex<'_>, depth: usize) -> Value {
    let mut object = Map::new();

    for key in ["id", "type"] {
        if let Some(value) = resource.get(key) {
            object.insert(key.to_owned(), value.clone());
        }
    }

    if let Some(Value::Object(attributes)) = resource.get("attributes") {
        for (name, value) in attributes {
            object.insert(name.clone(), value.clone());
        }
    }

    if let Some(Value::Object(relationships)) = resource.get("relationships") {
        for (name, relationship) in relationships {
            let value = match relationship.get("data") {
                Some(Value::Array(identifiers)) => Value::Array(
                    identifiers
                        .iter()
                        .map(|identifier| resolve_identifier(identifier, included, depth))
                        .collect(),
                ),
                Some(identifier @ Value::Object(_)) => {
                    resolve_identifier(identifier, included, depth)
                }
                _ => Value::Null,
            };
            object.insert(name.clone(), value);
        }
    }

    Value::Object(object)
}

fn resolve_identifier(identifier: &Value, included: &IncludedIndex<'_>, depth: usize) -> Value {
    let key = identifier
        .get("type")
        .and_then(Value::as_str)
        .zip(identifier.get("id").and_then(Value::as_str));

    let mut resolved = match key.and_then(|key| included.get(&key)) {
        Some(resource) if depth < MAX_DEPTH => flatten_resource(resource, included, depth + 1),
        _ => {
            let mut bare = Map::new();
            for name in ["id", "type"] {
                if let Some(value) = identifier.get(name) {
                    bare.insert(name.to_owned(), value.clone());
                }
            }
            Value::Object(bare)
        }
    };

    if let (Some(meta), Value::Object(object)) = (identifier.get("meta"), &mut resolved) {
        object.insert(RESOURCE_ID_META.to_owned(), meta.clone());
    }

    resolved
}
