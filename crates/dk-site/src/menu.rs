//! Footer menu.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SiteError;

/// Resource name of the main menu.
pub const FOOTER_MENU: &str = "menu_items--main";

/// One menu link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuItem {
    /// Menu link plugin id.
    pub id: String,
    /// Link text.
    pub title: String,
    /// Link target.
    #[serde(default)]
    pub url: String,
    /// Sort weight within the parent.
    #[serde(default, deserialize_with = "weight")]
    pub weight: i64,
    /// Parent link id; empty for top-level links.
    #[serde(default)]
    pub parent: Option<String>,
    /// Whether the link is enabled.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// Menu weights arrive as numbers or numeric strings depending on the backend version.
fn weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Weight {
        Number(i64),
        Text(String),
        Null(()),
    }

    Ok(match Weight::deserialize(deserializer)? {
        Weight::Number(n) => n,
        Weight::Text(s) => s.trim().parse().unwrap_or_default(),
        Weight::Null(()) => 0,
    })
}

/// Decode a flattened `menu_items--main` collection.
///
/// # Errors
///
/// Returns [`SiteError::Decode`] if the payload is not a list of menu items.
pub fn parse_menu(value: Value) -> Result<Vec<MenuItem>, SiteError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| SiteError::decode(FOOTER_MENU, e))
}

/// Enabled top-level links ordered by weight.
#[must_use]
pub fn top_level(items: &[MenuItem]) -> Vec<&MenuItem> {
    let mut links: Vec<&MenuItem> = items
        .iter()
        .filter(|item| item.enabled && item.parent.as_deref().is_none_or(str::is_empty))
        .collect();
    links.sort_by_key(|item| item.weight);
    links
}
