//! Decoupled router types.

use serde::Deserialize;

/// Raw response of the decoupled router `translate-path` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TranslatePathResponse {
    /// Absolute URL the alias resolved to.
    #[serde(default)]
    pub(crate) resolved: Option<String>,
    /// Entity the alias points at.
    pub(crate) entity: Option<RouterEntity>,
    /// JSON:API location of the entity.
    pub(crate) jsonapi: Option<RouterJsonApi>,
    /// Entity label.
    #[serde(default)]
    pub(crate) label: Option<String>,
}

/// Entity section of a translate-path response.
#[derive(Debug, Deserialize)]
pub(crate) struct RouterEntity {
    pub(crate) uuid: Option<String>,
    #[serde(default)]
    pub(crate) canonical: Option<String>,
}

/// JSON:API section of a translate-path response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RouterJsonApi {
    pub(crate) resource_name: Option<String>,
}

/// A path alias resolved to a backend resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// JSON:API resource name (e.g. `node--recipe`).
    pub resource_name: String,
    /// Entity UUID.
    pub uuid: String,
    /// Entity label, when the router reports one.
    pub label: Option<String>,
    /// Canonical backend URL, when the router reports one.
    pub canonical: Option<String>,
}

impl ResolvedPath {
    /// Create a resolved path with only the required fields.
    #[must_use]
    pub fn new(resource_name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            uuid: uuid.into(),
            label: None,
            canonical: None,
        }
    }
}

impl TryFrom<TranslatePathResponse> for ResolvedPath {
    type Error = crate::DrupalError;

    fn try_from(response: TranslatePathResponse) -> Result<Self, Self::Error> {
        let uuid = response
            .entity
            .as_ref()
            .and_then(|entity| entity.uuid.clone())
            .ok_or_else(|| {
                crate::DrupalError::InvalidDocument(
                    "translate-path response has no entity.uuid".into(),
                )
            })?;
        let resource_name = response
            .jsonapi
            .and_then(|jsonapi| jsonapi.resource_name)
            .ok_or_else(|| {
                crate::DrupalError::InvalidDocument(
                    "translate-path response has no jsonapi.resourceName".into(),
                )
            })?;
        let canonical = response
            .entity
            .and_then(|entity| entity.canonical)
            .or(response.resolved);

        Ok(Self {
            resource_name,
            uuid,
            label: response.label,
            canonical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_translate_path_response() {
        let json = r#"{
            "resolved": "https://cms.example.com/en/recipes/quiche",
            "isHomePath": false,
            "entity": {
                "canonical": "https://cms.example.com/en/recipes/quiche",
                "type": "node",
                "bundle": "recipe",
                "id": "4",
                "uuid": "2a9b1c1d-0000-4000-8000-000000000004"
            },
            "label": "Deep mediterranean quiche",
            "jsonapi": {
                "individual": "https://cms.example.com/en/jsonapi/node/recipe/2a9b1c1d-0000-4000-8000-000000000004",
                "resourceName": "node--recipe",
                "pathPrefix": "jsonapi",
                "basePath": "/jsonapi",
                "entryPoint": "https://cms.example.com/en/jsonapi"
            }
        }"#;
        let response: TranslatePathResponse = serde_json::from_str(json).unwrap();
        let resolved = ResolvedPath::try_from(response).unwrap();

        assert_eq!(resolved.resource_name, "node--recipe");
        assert_eq!(resolved.uuid, "2a9b1c1d-0000-4000-8000-000000000004");
        assert_eq!(resolved.label.as_deref(), Some("Deep mediterranean quiche"));
        assert_eq!(
            resolved.canonical.as_deref(),
            Some("https://cms.example.com/en/recipes/quiche")
        );
    }

    #[test]
    fn test_translate_path_without_entity_is_invalid() {
        let json = r#"{"jsonapi": {"resourceName": "node--page"}}"#;
        let response: TranslatePathResponse = serde_json::from_str(json).unwrap();
        let err = ResolvedPath::try_from(response).unwrap_err();

        assert!(err.to_string().contains("entity.uuid"));
    }

    #[test]
    fn test_translate_path_without_resource_name_is_invalid() {
        let json = r#"{"entity": {"uuid": "abc"}}"#;
        let response: TranslatePathResponse = serde_json::from_str(json).unwrap();
        let err = ResolvedPath::try_from(response).unwrap_err();

        assert!(err.to_string().contains("resourceName"));
    }
}
