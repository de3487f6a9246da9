//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::pages::get_root_page))
        .route("/{*path}", get(handlers::pages::get_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use dk_drupal::{ContentStore, LocaleStores, MockStore, ResolvedPath};
    use dk_site::{Site, SiteSettings};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    struct Harness {
        router: Router,
        en: Arc<MockStore>,
        es: Arc<MockStore>,
    }

    fn menu() -> serde_json::Value {
        json!([{"id": "home", "title": "Home", "url": "/"}])
    }

    fn harness() -> Harness {
        let en = Arc::new(
            MockStore::new("en")
                .with_path("recipes/quiche", ResolvedPath::new("node--recipe", "r1"))
                .with_path("about", ResolvedPath::new("node--page", "p1"))
                .with_object(
                    "node--recipe",
                    Some("r1"),
                    json!({
                        "type": "node--recipe",
                        "id": "r1",
                        "title": "Deep mediterranean quiche",
                        "field_recipe_category": [{"name": "Main courses"}],
                        "field_ingredients": ["3 eggs"],
                        "field_recipe_instruction": {"value": "<p>Bake</p>"}
                    }),
                )
                .with_object(
                    "node--page",
                    Some("p1"),
                    json!({"type": "node--page", "id": "p1", "title": "About", "body": {"value": "<p>About us</p>"}}),
                )
                .with_object(
                    "node--page",
                    None,
                    json!([
                        {"id": "b", "title": "Second", "path": {"alias": "/second", "langcode": "en"}, "changed": "2023-01-01T00:00:00+00:00"},
                        {"id": "a", "title": "First", "path": {"alias": "/first", "langcode": "en"}, "changed": "2021-01-01T00:00:00+00:00"}
                    ]),
                )
                .with_object("menu_items--main", None, menu()),
        );
        let es = Arc::new(
            MockStore::new("es")
                .with_path("acerca", ResolvedPath::new("node--page", "p1"))
                .with_object(
                    "node--page",
                    Some("p1"),
                    json!({"type": "node--page", "id": "p1", "title": "Acerca de", "body": {"value": "<p>Hola</p>"}}),
                )
                .with_object("node--page", None, json!([]))
                .with_object("menu_items--main", None, menu()),
        );

        let stores = LocaleStores::new("en")
            .with_store("en", Arc::clone(&en) as Arc<dyn ContentStore>)
            .with_store("es", Arc::clone(&es) as Arc<dyn ContentStore>);
        let site = Site::new(
            stores,
            SiteSettings {
                frontend_origin: "https://www.example.com".to_owned(),
                image_base: "https://cms.example.com".to_owned(),
                title: "Decoupled Demo".to_owned(),
                description: "Demo".to_owned(),
            },
        );
        let state = Arc::new(AppState {
            site,
            locales: vec!["en".to_owned(), "es".to_owned()],
            default_locale: "en".to_owned(),
            preview_secret: Some("s3cret".to_owned()),
        });

        Harness {
            router: create_router(state),
            en,
            es,
        }
    }

    async fn send_get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_recipe_alias() {
        let harness = harness();

        let (status, headers, body) = send_get(harness.router, "/recipes/quiche").await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(body.contains("<h1>Deep mediterranean quiche</h1>"));
        assert!(body.contains("Main courses"));
        assert!(body.contains("hreflang=\"es\""));
        assert_eq!(
            harness.en.translate_endpoints(),
            vec!["https://cms.test/en/router/translate-path"]
        );
    }

    #[tokio::test]
    async fn test_locale_prefixed_alias() {
        let harness = harness();

        let (status, _, body) = send_get(harness.router, "/es/acerca").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Acerca de</h1>"));
        assert!(body.contains("<a href=\"/es/pages\">"));
        assert!(harness.en.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_alias_is_not_found() {
        let harness = harness();

        let (status, _, body) = send_get(harness.router, "/does/not/exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }

    #[tokio::test]
    async fn test_page_listing_sorted() {
        let harness = harness();

        let (status, _, body) = send_get(harness.router, "/pages").await;

        assert_eq!(status, StatusCode::OK);
        let first = body.find("First").unwrap();
        let second = body.find("Second").unwrap();
        assert!(first < second);
        assert!(body.contains("<a href=\"/en/first\">"));
    }

    #[tokio::test]
    async fn test_localized_page_listing_empty() {
        let harness = harness();

        let (status, _, body) = send_get(harness.router, "/es/pages").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No pages found"));
        assert_eq!(harness.es.requests()[0].object_name, "node--page");
    }

    #[tokio::test]
    async fn test_preview_with_secret() {
        let harness = harness();

        let (status, _, body) = send_get(
            harness.router,
            "/about?preview_secret=s3cret&preview_lang=en&resource_version=9",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Preview mode"));
        let requests = harness.en.requests();
        assert!(!requests[0].anon);
        assert_eq!(requests[0].params, "resourceVersion=id:9");
    }

    #[tokio::test]
    async fn test_preview_with_wrong_secret_is_public_read() {
        let harness = harness();

        let (status, _, body) = send_get(harness.router, "/about?preview_secret=nope").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("Preview mode"));
        let requests = harness.en.requests();
        assert!(requests[0].anon);
        assert_eq!(requests[0].params, "");
    }

    #[tokio::test]
    async fn test_malformed_preview_query_is_public_read() {
        let harness = harness();

        let (status, _, body) = send_get(
            harness.router,
            "/about?preview_secret=s3cret&preview_secret=s3cret",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>About</h1>"));
        assert!(!body.contains("Preview mode"));
        assert!(harness.en.requests()[0].anon);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_not_found() {
        let harness = harness();

        let (status, _, body) = send_get(harness.router, "/%FF").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(harness.en.requests().is_empty());
    }

    #[tokio::test]
    async fn test_security_headers() {
        let harness = harness();

        let (_, headers, _) = send_get(harness.router, "/about").await;

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert!(headers.contains_key("content-security-policy"));
    }
}
