//! Content dispatch.
//!
//! Maps a decoded [`Resource`] to the props of the template that renders it.
//! The set of templates is closed; unknown resource types get the empty state.

use serde::Serialize;

use crate::resource::{MediaImage, RelatedMeta, Resource, TextField};

/// An image ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageProps {
    /// Absolute image URL.
    pub src: String,
    /// Alternative text.
    pub alt: Option<String>,
}

/// Props of the template selected for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum ContentProps {
    /// Basic page with a link to the page listing.
    Page {
        /// Heading.
        title: String,
        /// Body HTML.
        content: String,
    },
    /// Article with an optional header image.
    Article {
        /// Heading.
        title: String,
        /// Body HTML.
        content: String,
        /// Header image.
        image: Option<ImageProps>,
    },
    /// Recipe.
    Recipe {
        /// Heading.
        title: String,
        /// Name of the first recipe category.
        category: Option<String>,
        /// Header image.
        image: Option<ImageProps>,
        /// Ingredient lines.
        ingredients: Vec<String>,
        /// Instructions HTML.
        instructions: String,
    },
    /// "No content found".
    Empty,
}

/// Select the template for `resource` and build its props.
///
/// Image URLs are prefixed with `image_base`.
#[must_use]
pub fn dispatch(resource: &Resource, image_base: &str) -> ContentProps {
    match resource {
        Resource::Page(page) => ContentProps::Page {
            title: page.title.clone(),
            content: text_value(page.body.as_ref()),
        },
        Resource::Article(article) => ContentProps::Article {
            title: article.title.clone(),
            content: text_value(article.body.as_ref()),
            image: image_props(
                article.image.as_ref(),
                article.thumbnail.as_ref(),
                image_base,
            ),
        },
        Resource::Recipe(recipe) => ContentProps::Recipe {
            title: recipe.title.clone(),
            category: recipe.categories.first().and_then(|term| term.name.clone()),
            image: image_props(recipe.image.as_ref(), recipe.thumbnail.as_ref(), image_base),
            ingredients: recipe.ingredients.clone(),
            instructions: text_value(recipe.instructions.as_ref()),
        },
        Resource::Unknown { .. } => ContentProps::Empty,
    }
}

fn text_value(field: Option<&TextField>) -> String {
    field.map(|field| field.value.clone()).unwrap_or_default()
}

/// Image props, or `None` when the image file was not included.
///
/// Alt text comes from the thumbnail relationship, then from the file itself.
fn image_props(
    image: Option<&MediaImage>,
    thumbnail: Option<&RelatedMeta>,
    image_base: &str,
) -> Option<ImageProps> {
    let image = image?;
    let url = image.url()?;
    let alt = thumbnail
        .and_then(|thumbnail| thumbnail.meta.as_ref())
        .and_then(|meta| meta.alt.clone())
        .or_else(|| image.alt().map(str::to_owned));

    Some(ImageProps {
        src: format!("{}{url}", image_base.trim_end_matches('/')),
        alt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const IMAGE_BASE: &str = "https://cms.example.com";

    fn decode(value: serde_json::Value) -> Resource {
        Resource::from_value(value).unwrap()
    }

    #[test]
    fn test_dispatch_page() {
        let resource = decode(json!({
            "type": "node--page",
            "id": "p1",
            "title": "About",
            "body": {"value": "<p>About us</p>"}
        }));

        assert_eq!(
            dispatch(&resource, IMAGE_BASE),
            ContentProps::Page {
                title: "About".to_owned(),
                content: "<p>About us</p>".to_owned(),
            }
        );
    }

    #[test]
    fn test_dispatch_article_with_thumbnail_alt() {
        let resource = decode(json!({
            "type": "node--article",
            "id": "a1",
            "title": "News",
            "body": {"value": "<p>News</p>"},
            "field_media_image": {
                "type": "media--image",
                "id": "m1",
                "field_media_image": {
                    "type": "file--file",
                    "id": "f1",
                    "uri": {"url": "/files/news.jpg"},
                    "resourceIdObjMeta": {"alt": "file alt"}
                }
            },
            "thumbnail": {
                "type": "file--file",
                "id": "f1",
                "resourceIdObjMeta": {"alt": "Newsroom"}
            }
        }));

        assert_eq!(
            dispatch(&resource, IMAGE_BASE),
            ContentProps::Article {
                title: "News".to_owned(),
                content: "<p>News</p>".to_owned(),
                image: Some(ImageProps {
                    src: "https://cms.example.com/files/news.jpg".to_owned(),
                    alt: Some("Newsroom".to_owned()),
                }),
            }
        );
    }

    #[test]
    fn test_dispatch_article_alt_falls_back_to_file_meta() {
        let resource = decode(json!({
            "type": "node--article",
            "id": "a1",
            "title": "News",
            "field_media_image": {
                "field_media_image": {
                    "uri": {"url": "/files/news.jpg"},
                    "resourceIdObjMeta": {"alt": "file alt"}
                }
            }
        }));

        let ContentProps::Article { image, content, .. } = dispatch(&resource, IMAGE_BASE) else {
            panic!("expected article props");
        };
        assert_eq!(image.unwrap().alt.as_deref(), Some("file alt"));
        assert_eq!(content, "");
    }

    #[test]
    fn test_dispatch_article_without_image() {
        let resource = decode(json!({
            "type": "node--article",
            "id": "a1",
            "title": "News",
            "field_media_image": {"type": "media--image", "id": "m1"}
        }));

        let ContentProps::Article { image, .. } = dispatch(&resource, IMAGE_BASE) else {
            panic!("expected article props");
        };
        assert_eq!(image, None);
    }

    #[test]
    fn test_dispatch_recipe() {
        let resource = decode(json!({
            "type": "node--recipe",
            "id": "r1",
            "title": "Quiche",
            "field_recipe_category": [
                {"name": "Main courses"},
                {"name": "Vegetarian"}
            ],
            "field_media_image": {
                "field_media_image": {"uri": {"url": "/files/quiche.jpg"}}
            },
            "field_ingredients": ["3 eggs", "1 onion"],
            "field_recipe_instruction": {"value": "<ol><li>Bake</li></ol>"}
        }));

        assert_eq!(
            dispatch(&resource, "https://cdn.example.com/"),
            ContentProps::Recipe {
                title: "Quiche".to_owned(),
                category: Some("Main courses".to_owned()),
                image: Some(ImageProps {
                    src: "https://cdn.example.com/files/quiche.jpg".to_owned(),
                    alt: None,
                }),
                ingredients: vec!["3 eggs".to_owned(), "1 onion".to_owned()],
                instructions: "<ol><li>Bake</li></ol>".to_owned(),
            }
        );
    }

    #[test]
    fn test_dispatch_recipe_without_category() {
        let resource = decode(json!({
            "type": "node--recipe",
            "id": "r1",
            "title": "Toast",
            "field_recipe_category": []
        }));

        let ContentProps::Recipe { category, instructions, .. } = dispatch(&resource, IMAGE_BASE)
        else {
            panic!("expected recipe props");
        };
        assert_eq!(category, None);
        assert_eq!(instructions, "");
    }

    #[test]
    fn test_dispatch_unknown_is_empty() {
        let resource = decode(json!({"type": "node--landing_page", "id": "x"}));
        assert_eq!(dispatch(&resource, IMAGE_BASE), ContentProps::Empty);
    }

    #[test]
    fn test_props_serialize_with_template_tag() {
        let props = ContentProps::Page {
            title: "About".to_owned(),
            content: String::new(),
        };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["template"], "page");
        assert_eq!(json["title"], "About");
    }
}
