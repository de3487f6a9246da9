//! Resource and menu reads.
//!
//! Each function performs exactly one store read; nothing is retried.

use dk_drupal::{ContentStore, ObjectRequest, ResolvedPath};

use crate::error::SiteError;
use crate::menu::{FOOTER_MENU, MenuItem, parse_menu};
use crate::preview::PreviewContext;
use crate::resource::{ARTICLE, RECIPE, Resource};

/// Include list for a resource type.
#[must_use]
pub fn include_params(resource_name: &str) -> &'static str {
    match resource_name {
        RECIPE => "include=field_media_image.field_media_image,field_recipe_category",
        ARTICLE => "include=field_media_image.field_media_image",
        _ => "",
    }
}

/// Fetch and decode the resource a path resolved to.
///
/// In preview mode the read is authenticated and uses preview parameters.
///
/// # Errors
///
/// Returns an error if the read fails or the payload cannot be decoded.
pub fn fetch_resource(
    store: &dyn ContentStore,
    resolved: &ResolvedPath,
    preview: Option<&PreviewContext>,
) -> Result<Resource, SiteError> {
    let base_params = include_params(&resolved.resource_name);
    let params = match preview {
        Some(preview) => preview.params(base_params),
        None => base_params.to_owned(),
    };

    let request = ObjectRequest::resource(&resolved.resource_name, &resolved.uuid, &params)
        .with_anon(preview.is_none())
        .with_refresh(true);
    let value = store.get_object(&request)?;
    Resource::from_value(value)
}

/// Fetch the footer menu anonymously.
///
/// # Errors
///
/// Returns an error if the read fails or the payload cannot be decoded.
pub fn fetch_footer_menu(store: &dyn ContentStore) -> Result<Vec<MenuItem>, SiteError> {
    let request = ObjectRequest::collection(FOOTER_MENU, "").with_refresh(true);
    let value = store.get_object(&request)?;
    parse_menu(value)
}
