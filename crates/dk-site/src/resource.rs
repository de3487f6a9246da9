//! Typed content resources.
//!
//! A [`Resource`] is decoded from a flattened JSON:API object and keyed by
//! its `type` member. Only pages, articles and recipes are modelled; any
//! other type decodes to [`Resource::Unknown`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SiteError;

/// Resource name of basic pages.
pub const PAGE: &str = "node--page";
/// Resource name of articles.
pub const ARTICLE: &str = "node--article";
/// Resource name of recipes.
pub const RECIPE: &str = "node--recipe";

/// A content object from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// `node--page`.
    Page(PageNode),
    /// `node--article`.
    Article(ArticleNode),
    /// `node--recipe`.
    Recipe(RecipeNode),
    /// Any other resource type.
    Unknown {
        /// The `type` member as reported by the backend (empty when absent).
        kind: String,
    },
}

impl Resource {
    /// Decode a flattened JSON:API object.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Empty`] for `null` and [`SiteError::Decode`] when
    /// a known type is missing required fields.
    pub fn from_value(value: Value) -> Result<Self, SiteError> {
        if value.is_null() {
            return Err(SiteError::Empty("resource".to_owned()));
        }

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        match kind.as_str() {
            PAGE => serde_json::from_value(value)
                .map(Self::Page)
                .map_err(|e| SiteError::decode(&kind, e)),
            ARTICLE => serde_json::from_value(value)
                .map(Self::Article)
                .map_err(|e| SiteError::decode(&kind, e)),
            RECIPE => serde_json::from_value(value)
                .map(Self::Recipe)
                .map_err(|e| SiteError::decode(&kind, e)),
            _ => Ok(Self::Unknown { kind }),
        }
    }

    /// Resource type name.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Page(_) => PAGE,
            Self::Article(_) => ARTICLE,
            Self::Recipe(_) => RECIPE,
            Self::Unknown { kind } => kind.as_str(),
        }
    }
}

/// Formatted text field (`body`, `field_recipe_instruction`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextField {
    /// Raw HTML value.
    #[serde(default)]
    pub value: String,
    /// Summary, when the field has one.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Meta attached to a relationship identifier.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IdentifierMeta {
    /// Image alternative text.
    #[serde(default)]
    pub alt: Option<String>,
}

/// File URI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileUri {
    /// Server-relative URL of the file.
    pub url: String,
}

/// An image file entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageFile {
    /// File location; absent when the file was not included.
    #[serde(default)]
    pub uri: Option<FileUri>,
    /// Identifier meta of the relationship pointing at this file.
    #[serde(default, rename = "resourceIdObjMeta")]
    pub meta: Option<IdentifierMeta>,
}

/// An image media entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaImage {
    /// The file behind the media entity.
    #[serde(default, rename = "field_media_image")]
    pub file: Option<ImageFile>,
}

impl MediaImage {
    /// Server-relative image URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        Some(self.file.as_ref()?.uri.as_ref()?.url.as_str())
    }

    /// Alt text stored on the file relationship.
    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        self.file.as_ref()?.meta.as_ref()?.alt.as_deref()
    }
}

/// A related object of which only the identifier meta is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RelatedMeta {
    /// Identifier meta.
    #[serde(default, rename = "resourceIdObjMeta")]
    pub meta: Option<IdentifierMeta>,
}

/// Taxonomy term.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Term {
    /// Term name; absent when the term was not included.
    #[serde(default)]
    pub name: Option<String>,
}

/// `node--page`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageNode {
    /// UUID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body.
    #[serde(default)]
    pub body: Option<TextField>,
}

/// `node--article`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticleNode {
    /// UUID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body.
    #[serde(default)]
    pub body: Option<TextField>,
    /// Header image.
    #[serde(default, rename = "field_media_image")]
    pub image: Option<MediaImage>,
    /// Thumbnail relationship (carries the preferred alt text).
    #[serde(default)]
    pub thumbnail: Option<RelatedMeta>,
}

/// `node--recipe`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeNode {
    /// UUID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Recipe categories.
    #[serde(default, rename = "field_recipe_category", deserialize_with = "null_as_default")]
    pub categories: Vec<Term>,
    /// Header image.
    #[serde(default, rename = "field_media_image")]
    pub image: Option<MediaImage>,
    /// Thumbnail relationship (carries the preferred alt text).
    #[serde(default)]
    pub thumbnail: Option<RelatedMeta>,
    /// Ingredient lines.
    #[serde(default, rename = "field_ingredients", deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    /// Preparation instructions.
    #[serde(default, rename = "field_recipe_instruction")]
    pub instructions: Option<TextField>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
