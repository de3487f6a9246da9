//! `dk resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use dk_config::{CliSettings, Config};
use dk_server::{build_site, server_config_from_dk_config};
use dk_site::{
    AliasPage, ContentProps, HrefLang, LocaleContext, MenuItem, PAGE_LIST_ALIAS, PageList,
    PageSummary, Site,
};
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Request path, optionally with a locale prefix (e.g. `/es/recipes/quiche`).
    path: String,

    /// Path to configuration file (default: auto-discover dk.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drupal base URL (overrides config).
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the server would render for a path.
#[derive(Debug, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
enum Resolved<'a> {
    Alias {
        locale: &'a str,
        resource_name: &'a str,
        props: &'a ContentProps,
        href_lang: &'a [HrefLang],
        footer_menu: &'a [MenuItem],
    },
    List {
        locale: &'a str,
        pages: &'a [PageSummary],
        href_lang: &'a [HrefLang],
        footer_menu: &'a [MenuItem],
    },
}

impl<'a> From<&'a AliasPage> for Resolved<'a> {
    fn from(page: &'a AliasPage) -> Self {
        Self::Alias {
            locale: &page.locale.locale,
            resource_name: &page.resource_name,
            props: &page.props,
            href_lang: &page.href_lang,
            footer_menu: &page.footer_menu,
        }
    }
}

impl<'a> From<&'a PageList> for Resolved<'a> {
    fn from(list: &'a PageList) -> Self {
        Self::List {
            locale: &list.locale.locale,
            pages: &list.pages,
            href_lang: &list.href_lang,
            footer_menu: &list.footer_menu,
        }
    }
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or nothing can be loaded for the path.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            backend_url: self.backend_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Loaded configuration");
        let server_config = server_config_from_dk_config(&config)?;
        let site = build_site(&server_config);

        let (locale, alias) = LocaleContext::from_path(
            &self.path,
            &server_config.locales,
            &server_config.default_locale,
        );
        output.info(&format!("Resolving /{alias} ({})", locale.locale));

        let json = resolve_json(&site, &locale, &alias)?
            .ok_or_else(|| CliError::NotFound(self.path.clone()))?;
        output.result(&json)?;

        Ok(())
    }
}

/// Load `alias` and serialize it, or `None` when it cannot be loaded.
fn resolve_json(
    site: &Site,
    locale: &LocaleContext,
    alias: &str,
) -> Result<Option<String>, CliError> {
    if alias == PAGE_LIST_ALIAS {
        return match site.load_page_list(locale).found() {
            Some(list) => Ok(Some(serde_json::to_string_pretty(&Resolved::from(&list))?)),
            None => Ok(None),
        };
    }

    let segments: Vec<&str> = alias.split('/').collect();
    match site.load_alias_page(locale, segments.as_slice(), None).found() {
        Some(page) => Ok(Some(serde_json::to_string_pretty(&Resolved::from(&page))?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_site::ImageProps;
    use pretty_assertions::assert_eq;

    fn locale() -> LocaleContext {
        LocaleContext::new("en", vec!["en".to_owned()], "en")
    }

    #[test]
    fn test_alias_json_shape() {
        let page = AliasPage {
            resource_name: "node--article".to_owned(),
            props: ContentProps::Article {
                title: "News".to_owned(),
                content: "<p>News</p>".to_owned(),
                image: Some(ImageProps {
                    src: "https://cms.example.com/files/a.jpg".to_owned(),
                    alt: None,
                }),
            },
            href_lang: vec![],
            footer_menu: vec![],
            preview: false,
            locale: locale(),
        };

        let json = serde_json::to_value(Resolved::from(&page)).unwrap();

        assert_eq!(json["route"], "alias");
        assert_eq!(json["resource_name"], "node--article");
        assert_eq!(json["props"]["template"], "article");
        assert_eq!(json["props"]["image"]["src"], "https://cms.example.com/files/a.jpg");
    }

    #[test]
    fn test_list_json_shape() {
        let list = PageList {
            pages: vec![PageSummary {
                id: "p1".to_owned(),
                title: "About".to_owned(),
                summary: None,
                alias: Some("/about".to_owned()),
                langcode: Some("en".to_owned()),
                changed: None,
            }],
            footer_menu: vec![],
            href_lang: vec![],
            multi_language: false,
            locale: locale(),
        };

        let json = serde_json::to_value(Resolved::from(&list)).unwrap();

        assert_eq!(json["route"], "list");
        assert_eq!(json["pages"][0]["alias"], "/about");
    }
}
