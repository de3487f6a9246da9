//! Page endpoints.
//!
//! Every path is either the page listing (`/pages`, `/{locale}/pages`) or a
//! path alias resolved through the backend. Loading runs on the blocking pool
//! because backend calls are synchronous.

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Html;
use dk_site::{
    LocaleContext, PAGE_LIST_ALIAS, PageOutcome, PreviewContext, render_alias_page,
    render_not_found, render_page_list,
};
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Preview query parameters.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PreviewQuery {
    /// Must match the configured preview secret.
    preview_secret: Option<String>,
    /// Locale whose store serves the preview (defaults to the request locale).
    preview_lang: Option<String>,
    /// Revision to show (defaults to the latest revision).
    resource_version: Option<String>,
}

impl PreviewQuery {
    /// Preview context, when the query unlocks preview mode.
    fn into_context(self, state: &AppState, locale: &str) -> Option<PreviewContext> {
        if !state.preview_allowed(self.preview_secret.as_deref()) {
            return None;
        }
        let lang = self
            .preview_lang
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| locale.to_owned());
        let preview = PreviewContext::new(lang);
        Some(
            match self.resource_version.filter(|revision| !revision.is_empty()) {
                Some(revision) => preview.with_resource_version(revision),
                None => preview,
            },
        )
    }
}

/// Handle GET /.
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> Result<Html<String>, ServerError> {
    render_path(state, String::new(), preview_query(query)).await
}

/// Handle GET /{path}.
///
/// Paths that do not decode to UTF-8 cannot name an alias and render the
/// not-found page.
pub(crate) async fn get_page(
    path: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> Result<Html<String>, ServerError> {
    let Path(path) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable request path");
        let locale = LocaleContext::new(
            state.default_locale.as_str(),
            state.locales.clone(),
            state.default_locale.as_str(),
        );
        not_found(&state, "", &locale)
    })?;
    render_path(state, path, preview_query(query)).await
}

/// Malformed preview parameters fall back to a public read.
fn preview_query(query: Result<Query<PreviewQuery>, QueryRejection>) -> PreviewQuery {
    query.map(|Query(query)| query).unwrap_or_default()
}

async fn render_path(
    state: Arc<AppState>,
    path: String,
    query: PreviewQuery,
) -> Result<Html<String>, ServerError> {
    tokio::task::spawn_blocking(move || render_blocking(&state, &path, query)).await?
}

fn render_blocking(
    state: &AppState,
    path: &str,
    query: PreviewQuery,
) -> Result<Html<String>, ServerError> {
    let (locale, alias) = LocaleContext::from_path(path, &state.locales, &state.default_locale);
    let settings = state.site.settings();

    if alias == PAGE_LIST_ALIAS {
        return match state.site.load_page_list(&locale) {
            PageOutcome::Found(list) => Ok(Html(render_page_list(settings, &list))),
            PageOutcome::NotFound => Err(not_found(state, path, &locale)),
        };
    }

    let preview = query.into_context(state, &locale.locale);
    let segments: Vec<&str> = alias.split('/').collect();
    match state
        .site
        .load_alias_page(&locale, segments.as_slice(), preview.as_ref())
    {
        PageOutcome::Found(page) => Ok(Html(render_alias_page(settings, &page))),
        PageOutcome::NotFound => Err(not_found(state, path, &locale)),
    }
}

fn not_found(state: &AppState, path: &str, locale: &LocaleContext) -> ServerError {
    ServerError::NotFound {
        path: format!("/{path}"),
        html: render_not_found(state.site.settings(), &locale.locale),
    }
}
