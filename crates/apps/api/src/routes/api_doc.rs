use crate::routes::{auth, dashboard, enquiry, gallery, product, root, video};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::refresh_session,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Website handlers
        gallery::handlers::public_gallery_handler,
        gallery::handlers::home_page_photos_handler,
        video::handlers::public_videos_handler,
        product::handlers::public_catalogue_handler,
        product::handlers::product_detail_handler,
        enquiry::handlers::submit_enquiry_handler,
        enquiry::handlers::contact_us_handler,
        // Gallery handlers
        gallery::handlers::list_categories_handler,
        gallery::handlers::create_category_handler,
        gallery::handlers::delete_category_handler,
        gallery::handlers::list_photos_handler,
        gallery::handlers::create_photo_handler,
        gallery::handlers::delete_photo_handler,
        gallery::handlers::set_home_page_handler,
        video::handlers::list_videos_handler,
        video::handlers::create_video_handler,
        video::handlers::delete_video_handler,
        video::handlers::preview_video_handler,
        // Product handlers
        product::handlers::list_categories_handler,
        product::handlers::create_category_handler,
        product::handlers::delete_category_handler,
        product::handlers::list_products_handler,
        product::handlers::create_product_handler,
        product::handlers::get_product_handler,
        product::handlers::update_product_handler,
        product::handlers::delete_product_handler,
        product::handlers::list_media_handler,
        product::handlers::create_media_handler,
        product::handlers::delete_media_handler,
        // Back office handlers
        enquiry::handlers::list_enquiries_handler,
        enquiry::handlers::delete_enquiry_handler,
        dashboard::handlers::dashboard_handler,
    ),
    components(
        schemas(
            common_types::MediaKind,
            common_types::video_link::VideoRef,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Website", description = "Public pages of the business website"),
        (name = "Gallery", description = "Back office: photo categories, photos and videos"),
        (name = "Products", description = "Back office: product categories, products and their media"),
        (name = "Enquiries", description = "Back office: enquiries sent through the website"),
        (name = "Dashboard", description = "Back office landing page"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
