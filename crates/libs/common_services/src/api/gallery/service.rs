use crate::api::gallery::error::GalleryError;
use crate::api::gallery::interfaces::{GalleryCategory, NewPhoto, PhotoListParams, PhotoResponse};
use crate::database::gallery_store::{GalleryStore, PhotoFilter};
use crate::database::photo::{Photo, PhotoCategory, PhotoCategoryWithCount, PhotoWithCategory};
use crate::database::search_pattern;
use crate::storage::{FileStore, PHOTO_FOLDER};
use crate::utils::non_blank;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

fn photo_response(files: &FileStore, photo: Photo, category_name: Option<String>) -> PhotoResponse {
    PhotoResponse {
        id: photo.id,
        category_id: photo.category_id,
        category_name,
        caption: photo.caption,
        description: photo.description,
        image_url: files.url(&photo.image),
        show_on_home_page: photo.show_on_home_page,
        created_at: photo.created_at,
    }
}

fn listed_photo_response(files: &FileStore, photo: PhotoWithCategory) -> PhotoResponse {
    let category_name = Some(photo.category_name.clone());
    photo_response(files, photo.into(), category_name)
}

// --- Categories ---

#[instrument(skip(pool))]
pub async fn create_category(pool: &PgPool, name: &str) -> Result<PhotoCategory, GalleryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GalleryError::Validation("Category name is required.".to_owned()));
    }
    Ok(GalleryStore::create_category(pool, name).await?)
}

pub async fn list_categories(
    pool: &PgPool,
    search: Option<&str>,
) -> Result<Vec<PhotoCategoryWithCount>, GalleryError> {
    let pattern = search_pattern(search);
    Ok(GalleryStore::list_categories_with_count(pool, pattern.as_deref()).await?)
}

/// Deletes a category together with its photos and their image files.
#[instrument(skip(pool, files))]
pub async fn delete_category(
    pool: &PgPool,
    files: &FileStore,
    category_id: i32,
) -> Result<PhotoCategory, GalleryError> {
    let mut tx = pool.begin().await?;
    let images = GalleryStore::list_category_image_paths(&mut *tx, category_id).await?;
    let category = GalleryStore::delete_category(&mut *tx, category_id)
        .await?
        .ok_or_else(|| GalleryError::NotFound(format!("Photo category {category_id}")))?;
    let removed = files.remove_all(&images).await?;
    tx.commit().await?;

    info!(
        "Deleted photo category '{}' with {} photos ({removed} files removed)",
        category.name,
        images.len()
    );
    Ok(category)
}

// --- Photos ---

pub async fn list_photos(
    pool: &PgPool,
    files: &FileStore,
    params: &PhotoListParams,
) -> Result<Vec<PhotoResponse>, GalleryError> {
    let filter = PhotoFilter {
        category_id: params.category_id,
        show_on_home_page: params.show_on_home_page,
        pattern: search_pattern(params.search.as_deref()),
    };
    let photos = GalleryStore::list_photos(pool, &filter).await?;
    Ok(photos
        .into_iter()
        .map(|photo| listed_photo_response(files, photo))
        .collect())
}

/// Stores the uploaded image and creates the photo row.
#[instrument(skip(pool, files, new_photo))]
pub async fn create_photo(
    pool: &PgPool,
    files: &FileStore,
    new_photo: NewPhoto,
) -> Result<PhotoResponse, GalleryError> {
    let category_id = new_photo
        .category_id
        .ok_or_else(|| GalleryError::Validation("A category is required.".to_owned()))?;
    let image = new_photo
        .image
        .filter(|upload| !upload.bytes.is_empty())
        .ok_or_else(|| GalleryError::Validation("An image is required.".to_owned()))?;
    let category = GalleryStore::find_category(pool, category_id)
        .await?
        .ok_or_else(|| GalleryError::NotFound(format!("Photo category {category_id}")))?;

    let image_path = files.save_upload(PHOTO_FOLDER, &image).await?;
    let caption = non_blank(new_photo.caption);
    let description = non_blank(new_photo.description);
    let created = GalleryStore::create_photo(
        pool,
        category.id,
        caption.as_deref(),
        description.as_deref(),
        &image_path,
        new_photo.show_on_home_page,
    )
    .await;

    match created {
        Ok(photo) => Ok(photo_response(files, photo, Some(category.name))),
        Err(e) => {
            if let Err(cleanup) = files.remove(&image_path).await {
                warn!("Could not remove orphaned upload {image_path}: {cleanup}");
            }
            Err(e.into())
        }
    }
}

#[instrument(skip(pool, files))]
pub async fn delete_photo(
    pool: &PgPool,
    files: &FileStore,
    photo_id: i32,
) -> Result<(), GalleryError> {
    let mut tx = pool.begin().await?;
    let photo = GalleryStore::delete_photo(&mut *tx, photo_id)
        .await?
        .ok_or_else(|| GalleryError::NotFound(format!("Photo {photo_id}")))?;
    files.remove(&photo.image).await?;
    tx.commit().await?;
    Ok(())
}

/// Shows or hides the given photos on the home page. Returns how many photos changed.
#[instrument(skip(pool))]
pub async fn set_home_page(pool: &PgPool, ids: &[i32], show: bool) -> Result<u64, GalleryError> {
    if ids.is_empty() {
        return Ok(0);
    }
    Ok(GalleryStore::set_home_page_flag(pool, ids, show).await?)
}

// --- Public pages ---

/// Every category, by name, with its photos.
pub async fn public_gallery(
    pool: &PgPool,
    files: &FileStore,
) -> Result<Vec<GalleryCategory>, GalleryError> {
    let (categories, photos) = tokio::try_join!(
        GalleryStore::list_categories_with_count(pool, None),
        GalleryStore::list_all_photos(pool),
    )?;

    let mut by_category: HashMap<i32, Vec<PhotoResponse>> = HashMap::new();
    for photo in photos {
        by_category
            .entry(photo.category_id)
            .or_default()
            .push(photo_response(files, photo, None));
    }

    Ok(categories
        .into_iter()
        .map(|category| GalleryCategory {
            photos: by_category.remove(&category.id).unwrap_or_default(),
            id: category.id,
            name: category.name,
        })
        .collect())
}

pub async fn home_page_photos(
    pool: &PgPool,
    files: &FileStore,
) -> Result<Vec<PhotoResponse>, GalleryError> {
    let photos = GalleryStore::list_home_page_photos(pool).await?;
    Ok(photos
        .into_iter()
        .map(|photo| photo_response(files, photo, None))
        .collect())
}
