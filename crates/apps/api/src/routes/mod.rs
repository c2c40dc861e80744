mod api_doc;
pub mod auth;
pub mod dashboard;
pub mod enquiry;
pub mod form_data;
pub mod gallery;
pub mod product;
pub mod root;
pub mod video;

use crate::api_state::ApiContext;
use crate::auth::middlewares::require_role::require_role;
use crate::auth::middlewares::user::ApiUser;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::dashboard::router::dashboard_admin_router;
use crate::enquiry::router::{enquiry_admin_router, enquiry_public_router};
use crate::gallery::router::{gallery_admin_router, gallery_public_router};
use crate::product::router::{product_admin_router, product_public_router};
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::video::router::{video_admin_router, video_public_router};
use axum::Router;
use axum::middleware::{from_extractor_with_state, from_fn_with_state};
use common_services::database::app_user::UserRole;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes())
        .merge(protected_routes(api_state.clone()))
        .merge(admin_routes(api_state.clone()))
        .with_state(api_state)
}

/// The public website and the login flow.
fn public_routes() -> Router<ApiContext> {
    Router::new()
        .merge(auth_public_router())
        .merge(root_public_router())
        .merge(gallery_public_router())
        .merge(video_public_router())
        .merge(product_public_router())
        .merge(enquiry_public_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

/// The back office. Every route needs a signed-in admin.
fn admin_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(dashboard_admin_router())
        .merge(enquiry_admin_router())
        .merge(gallery_admin_router())
        .merge(video_admin_router())
        .merge(product_admin_router())
        .route_layer(from_fn_with_state(UserRole::Admin, require_role))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

#[cfg(test)]
mod tests {
    use super::create_router;
    use crate::api_state::ApiContext;
    use app_state::load_settings_from_path;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use color_eyre::Result;
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// Router over a pool that never connects, so only routes that fail before touching
    /// the database can be exercised.
    fn test_router(media_root: &Path) -> Result<axum::Router> {
        let mut settings = load_settings_from_path(
            Path::new(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../../config/settings.yaml"
            )),
            false,
        )?;
        settings.storage.media_root = media_root.to_path_buf();
        let pool = PgPoolOptions::new().connect_lazy(&settings.secrets.database_url)?;
        Ok(create_router(ApiContext::new(pool, settings)?))
    }

    async fn json_body(response: axum::response::Response) -> Result<Value> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[tokio::test]
    async fn site_root_is_not_served() -> Result<()> {
        let media = TempDir::new()?;
        let response = test_router(media.path())?
            .oneshot(Request::builder().uri("/").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn contact_form_lists_missing_fields() -> Result<()> {
        let media = TempDir::new()?;
        let request = Request::builder()
            .method("POST")
            .uri("/web/contact-us")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ann","email":"  ","message":"Hello"}"#))?;

        let response = test_router(media.path())?.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await?;
        assert_eq!(body["error"], "All fields are required");
        assert_eq!(
            body["missingFields"],
            serde_json::json!(["mobile", "email", "subject"])
        );
        Ok(())
    }

    #[tokio::test]
    async fn contact_form_treats_null_as_missing() -> Result<()> {
        let media = TempDir::new()?;
        let request = Request::builder()
            .method("POST")
            .uri("/web/contact-us")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"name":null,"mobile":"98450","email":"a@b.in","subject":"Pumps","message":"Hi"}"#,
            ))?;

        let response = test_router(media.path())?.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await?;
        assert_eq!(body["missingFields"], serde_json::json!(["name"]));
        Ok(())
    }

    #[tokio::test]
    async fn home_page_enquiry_rejects_empty_form() -> Result<()> {
        let media = TempDir::new()?;
        let request = Request::builder()
            .method("POST")
            .uri("/enquiry")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))?;

        let response = test_router(media.path())?.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await?;
        assert_eq!(body["missingFields"].as_array().map(Vec::len), Some(5));
        Ok(())
    }

    #[tokio::test]
    async fn back_office_requires_a_token() -> Result<()> {
        let media = TempDir::new()?;
        for uri in [
            "/admin/dashboard",
            "/admin/enquiries",
            "/admin/photos",
            "/admin/videos/preview?url=https://youtu.be/YK1gvY2KS9c",
            "/admin/products",
        ] {
            let response = test_router(media.path())?
                .oneshot(Request::builder().uri(uri).body(Body::empty())?)
                .await?;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() -> Result<()> {
        let media = TempDir::new()?;
        let request = Request::builder()
            .uri("/auth/me")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())?;

        let response = test_router(media.path())?.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_lists_website_routes() -> Result<()> {
        let media = TempDir::new()?;
        let response = test_router(media.path())?
            .oneshot(Request::builder().uri("/openapi.json").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await?;
        for path in ["/web/photos", "/web/videos", "/web/products/{product_id}", "/web/contact-us"] {
            assert!(body["paths"].get(path).is_some(), "{path}");
        }
        Ok(())
    }
}
