use crate::api::dashboard::interfaces::DashboardCounts;
use crate::database::DbError;
use crate::database::enquiry_store::EnquiryStore;
use crate::database::gallery_store::GalleryStore;
use crate::database::product_store::ProductStore;
use crate::database::video_store::VideoStore;
use sqlx::PgPool;
use tracing::instrument;

#[instrument(skip(pool))]
pub async fn dashboard_counts(pool: &PgPool) -> Result<DashboardCounts, DbError> {
    let (enquiries, photos, videos, products) = tokio::try_join!(
        EnquiryStore::count(pool),
        GalleryStore::count_photos(pool),
        VideoStore::count(pool),
        ProductStore::count(pool),
    )?;
    Ok(DashboardCounts {
        enquiries,
        photos,
        videos,
        products,
    })
}
