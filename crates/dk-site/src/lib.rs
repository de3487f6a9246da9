//! Page loading and rendering for dk.
//!
//! A request flows through these steps:
//! - [`resolve_path`] turns a path alias into a resource type and id
//! - [`fetch_resource`] reads the resource from the locale's store
//! - [`dispatch`] selects the template and builds its props
//! - [`render_alias_page`] produces the HTML
//!
//! [`Site`] runs the whole flow for the alias route and the page listing,
//! turning every failure into [`PageOutcome::NotFound`].
//!
//! # Example
//!
//! ```ignore
//! use dk_site::{LocaleContext, Site, render_alias_page};
//!
//! let ctx = LocaleContext::new("en", vec!["en".to_owned()], "en");
//! if let Some(page) = site.load_alias_page(&ctx, &["recipes", "quiche"], None).found() {
//!     let html = render_alias_page(site.settings(), &page);
//! }
//! ```

mod dispatch;
mod error;
mod fetcher;
mod listing;
mod locale;
mod menu;
mod preview;
mod resolver;
mod resource;
mod routes;
mod template;

pub use dispatch::{ContentProps, ImageProps, dispatch};
pub use error::SiteError;
pub use fetcher::{fetch_footer_menu, fetch_resource, include_params};
pub use listing::{
    PAGE_LIST_ALIAS, PAGE_LIST_PARAMS, PageSummary, parse_pages, sort_by_changed, summary_href,
};
pub use locale::{HrefLang, LocaleContext, is_multi_language};
pub use menu::{FOOTER_MENU, MenuItem, parse_menu, top_level};
pub use preview::PreviewContext;
pub use resolver::{TRANSLATE_PATH_ROUTE, join_segments, resolve_path};
pub use resource::{
    ARTICLE, ArticleNode, FileUri, IdentifierMeta, ImageFile, MediaImage, PAGE, PageNode, RECIPE,
    RecipeNode, RelatedMeta, Resource, Term, TextField,
};
pub use routes::{AliasPage, PageList, PageOutcome, Site, SiteSettings};
pub use template::{render_alias_page, render_not_found, render_page_list};
