use crate::api::preview::product_media_preview;
use crate::api::product::error::ProductError;
use crate::api::product::interfaces::{
    CatalogueCategory, CreateProductCategoryRequest, NewMedia, NewProduct, ProductDetail,
    ProductMediaResponse, ProductResponse, ProductUpdate,
};
use crate::database::product::{
    Product, ProductCategory, ProductCategoryWithCount, ProductChanges, ProductWithMediaCount,
};
use crate::database::product_media::{NewProductMedia, ProductMedia};
use crate::database::product_store::ProductStore;
use crate::database::search_pattern;
use crate::storage::{FileStore, PRODUCT_MEDIA_FOLDER, Upload};
use crate::utils::non_blank;
use common_types::MediaKind;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

fn product_response(files: &FileStore, product: Product) -> ProductResponse {
    ProductResponse {
        id: product.id,
        category_id: product.category_id,
        title: product.title,
        description: product.description,
        catalogue_url: product.catalogue.as_deref().map(|path| files.url(path)),
        image_url: product.image.as_deref().map(|path| files.url(path)),
        slug: product.slug,
        media_count: None,
        created_at: product.created_at,
    }
}

fn listed_product_response(files: &FileStore, product: ProductWithMediaCount) -> ProductResponse {
    ProductResponse {
        id: product.id,
        category_id: product.category_id,
        title: product.title,
        description: product.description,
        catalogue_url: product.catalogue.as_deref().map(|path| files.url(path)),
        image_url: product.image.as_deref().map(|path| files.url(path)),
        slug: product.slug,
        media_count: Some(product.media_count),
        created_at: product.created_at,
    }
}

fn media_response(files: &FileStore, media: ProductMedia) -> ProductMediaResponse {
    let preview = product_media_preview(files, &media);
    ProductMediaResponse {
        id: media.id,
        product_id: media.product_id,
        kind: media.kind,
        file_url: media.file.as_deref().map(|path| files.url(path)),
        url: media.url,
        display_order: media.display_order,
        preview,
        created_at: media.created_at,
    }
}

async fn save_optional(
    files: &FileStore,
    upload: Option<&Upload>,
) -> Result<Option<String>, ProductError> {
    match upload.filter(|upload| !upload.bytes.is_empty()) {
        Some(upload) => Ok(Some(files.save_upload(PRODUCT_MEDIA_FOLDER, upload).await?)),
        None => Ok(None),
    }
}

/// Removes files that were stored for a write that did not go through.
async fn discard_uploads(files: &FileStore, paths: impl IntoIterator<Item = Option<String>>) {
    for path in paths.into_iter().flatten() {
        if let Err(e) = files.remove(&path).await {
            warn!("Could not remove orphaned upload {path}: {e}");
        }
    }
}

async fn require_category(pool: &PgPool, category_id: i32) -> Result<ProductCategory, ProductError> {
    ProductStore::find_category(pool, category_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product category {category_id}")))
}

// --- Categories ---

#[instrument(skip(pool, request))]
pub async fn create_category(
    pool: &PgPool,
    request: &CreateProductCategoryRequest,
) -> Result<ProductCategory, ProductError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ProductError::Validation("Category name is required.".to_owned()));
    }
    let description = non_blank(request.description.clone());
    Ok(ProductStore::create_category(pool, name, description.as_deref()).await?)
}

pub async fn list_categories(
    pool: &PgPool,
    search: Option<&str>,
) -> Result<Vec<ProductCategoryWithCount>, ProductError> {
    let pattern = search_pattern(search);
    Ok(ProductStore::list_categories_with_count(pool, pattern.as_deref()).await?)
}

/// Deletes a category, its products and every file they own.
#[instrument(skip(pool, files))]
pub async fn delete_category(
    pool: &PgPool,
    files: &FileStore,
    category_id: i32,
) -> Result<ProductCategory, ProductError> {
    let mut tx = pool.begin().await?;
    let paths = ProductStore::list_category_file_paths(&mut *tx, category_id).await?;
    let category = ProductStore::delete_category(&mut *tx, category_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product category {category_id}")))?;
    let removed = files.remove_all(&paths).await?;
    tx.commit().await?;

    info!("Deleted product category '{}' ({removed} files removed)", category.name);
    Ok(category)
}

// --- Products ---

pub async fn list_products(
    pool: &PgPool,
    files: &FileStore,
    search: Option<&str>,
) -> Result<Vec<ProductResponse>, ProductError> {
    let pattern = search_pattern(search);
    let products = ProductStore::list_with_media_count(pool, pattern.as_deref()).await?;
    Ok(products
        .into_iter()
        .map(|product| listed_product_response(files, product))
        .collect())
}

pub async fn get_product(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
) -> Result<ProductResponse, ProductError> {
    let product = ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product {product_id}")))?;
    Ok(product_response(files, product))
}

#[instrument(skip(pool, files, new_product))]
pub async fn create_product(
    pool: &PgPool,
    files: &FileStore,
    new_product: NewProduct,
) -> Result<ProductResponse, ProductError> {
    let category_id = new_product
        .category_id
        .ok_or_else(|| ProductError::Validation("A category is required.".to_owned()))?;
    let title = non_blank(new_product.title)
        .ok_or_else(|| ProductError::Validation("A title is required.".to_owned()))?;
    let description = non_blank(new_product.description);
    require_category(pool, category_id).await?;

    let catalogue = save_optional(files, new_product.catalogue.as_ref()).await?;
    let image = match save_optional(files, new_product.image.as_ref()).await {
        Ok(image) => image,
        Err(e) => {
            discard_uploads(files, [catalogue]).await;
            return Err(e);
        }
    };

    let created = async {
        let mut tx = pool.begin().await?;
        let product = ProductStore::create(
            &mut *tx,
            category_id,
            &title,
            description.as_deref(),
            catalogue.as_deref(),
            image.as_deref(),
        )
        .await?;
        tx.commit().await?;
        Ok::<_, ProductError>(product)
    }
    .await;

    match created {
        Ok(product) => {
            info!("Created product {} ({})", product.id, product.slug);
            Ok(product_response(files, product))
        }
        Err(e) => {
            discard_uploads(files, [catalogue, image]).await;
            Err(e)
        }
    }
}

/// Updates a product. New catalogue or image files replace the old ones, which are removed.
#[instrument(skip(pool, files, update))]
pub async fn update_product(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
    update: ProductUpdate,
) -> Result<ProductResponse, ProductError> {
    let title = match update.title {
        Some(title) => Some(non_blank(Some(title)).ok_or_else(|| {
            ProductError::Validation("Title cannot be empty.".to_owned())
        })?),
        None => None,
    };
    if let Some(category_id) = update.category_id {
        require_category(pool, category_id).await?;
    }
    let existing = ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product {product_id}")))?;

    let catalogue = save_optional(files, update.catalogue.as_ref()).await?;
    let image = match save_optional(files, update.image.as_ref()).await {
        Ok(image) => image,
        Err(e) => {
            discard_uploads(files, [catalogue]).await;
            return Err(e);
        }
    };
    let changes = ProductChanges {
        category_id: update.category_id,
        title,
        description: update.description.map(|d| d.trim().to_owned()),
        catalogue: catalogue.clone(),
        image: image.clone(),
    };

    let updated = async {
        let mut tx = pool.begin().await?;
        let product = ProductStore::update(&mut *tx, product_id, &changes).await?;
        tx.commit().await?;
        Ok::<_, ProductError>(product)
    }
    .await;

    let product = match updated {
        Ok(Some(product)) => product,
        Ok(None) => {
            discard_uploads(files, [catalogue, image]).await;
            return Err(ProductError::NotFound(format!("Product {product_id}")));
        }
        Err(e) => {
            discard_uploads(files, [catalogue, image]).await;
            return Err(e);
        }
    };

    // The row now points at the new files; the replaced ones are released.
    let replaced = [
        existing.catalogue.filter(|_| catalogue.is_some()),
        existing.image.filter(|_| image.is_some()),
    ];
    for path in replaced.into_iter().flatten() {
        files.remove(&path).await?;
    }
    Ok(product_response(files, product))
}

/// Deletes a product with its media and every file they own.
#[instrument(skip(pool, files))]
pub async fn delete_product(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
) -> Result<(), ProductError> {
    let mut tx = pool.begin().await?;
    let media_paths = ProductStore::list_media_file_paths(&mut *tx, product_id).await?;
    let product = ProductStore::delete(&mut *tx, product_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product {product_id}")))?;
    let own_paths = [product.catalogue, product.image].into_iter().flatten();
    files.remove_all(media_paths.into_iter().chain(own_paths)).await?;
    tx.commit().await?;
    Ok(())
}

// --- Media ---

pub async fn list_media(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
) -> Result<Vec<ProductMediaResponse>, ProductError> {
    ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product {product_id}")))?;
    let media = ProductStore::list_media(pool, product_id).await?;
    Ok(media
        .into_iter()
        .map(|media| media_response(files, media))
        .collect())
}

/// Checks a media slide before anything is stored.
pub fn validate_media(new_media: &NewMedia) -> Result<(), ProductError> {
    let has_file = new_media
        .file
        .as_ref()
        .is_some_and(|upload| !upload.bytes.is_empty());
    let has_url = new_media
        .url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if !has_file && !has_url {
        let message = match new_media.kind {
            MediaKind::Image => "An image slide needs an uploaded file or an image URL.",
            MediaKind::Video => "A video slide needs a video URL or an uploaded video file.",
        };
        return Err(ProductError::Validation(message.to_owned()));
    }
    if new_media.display_order.is_some_and(|order| order < 0) {
        return Err(ProductError::Validation(
            "Display order cannot be negative.".to_owned(),
        ));
    }
    Ok(())
}

#[instrument(skip(pool, files, new_media))]
pub async fn create_media(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
    new_media: NewMedia,
) -> Result<ProductMediaResponse, ProductError> {
    validate_media(&new_media)?;
    ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product {product_id}")))?;

    let file = save_optional(files, new_media.file.as_ref()).await?;
    let thumbnail = match save_optional(files, new_media.thumbnail.as_ref()).await {
        Ok(thumbnail) => thumbnail,
        Err(e) => {
            discard_uploads(files, [file]).await;
            return Err(e);
        }
    };
    let record = NewProductMedia {
        product_id,
        kind: new_media.kind,
        file: file.clone(),
        url: non_blank(new_media.url),
        thumbnail: thumbnail.clone(),
        display_order: new_media.display_order.unwrap_or(0),
    };

    match ProductStore::create_media(pool, &record).await {
        Ok(media) => Ok(media_response(files, media)),
        Err(e) => {
            discard_uploads(files, [file, thumbnail]).await;
            Err(e.into())
        }
    }
}

#[instrument(skip(pool, files))]
pub async fn delete_media(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
    media_id: i32,
) -> Result<(), ProductError> {
    let mut tx = pool.begin().await?;
    let media = ProductStore::delete_media(&mut *tx, product_id, media_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product media {media_id}")))?;
    files
        .remove_all([media.file, media.thumbnail].into_iter().flatten())
        .await?;
    tx.commit().await?;
    Ok(())
}

// --- Public pages ---

/// Categories by name, each with its products, newest first.
pub async fn public_catalogue(
    pool: &PgPool,
    files: &FileStore,
) -> Result<Vec<CatalogueCategory>, ProductError> {
    let (categories, products) = tokio::try_join!(
        ProductStore::list_categories_by_name(pool),
        ProductStore::list_all(pool),
    )?;

    let mut by_category: HashMap<i32, Vec<ProductResponse>> = HashMap::new();
    for product in products.into_iter().rev() {
        by_category
            .entry(product.category_id)
            .or_default()
            .push(product_response(files, product));
    }

    Ok(categories
        .into_iter()
        .map(|category| CatalogueCategory {
            products: by_category.remove(&category.id).unwrap_or_default(),
            id: category.id,
            name: category.name,
            description: category.description,
        })
        .collect())
}

/// The public product page.
pub async fn product_detail(
    pool: &PgPool,
    files: &FileStore,
    product_id: i32,
) -> Result<ProductDetail, ProductError> {
    let product = ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| ProductError::NotFound(format!("Product {product_id}")))?;
    let (media, related) = tokio::try_join!(
        ProductStore::list_media(pool, product_id),
        ProductStore::list_related(pool, &product),
    )?;

    Ok(ProductDetail {
        product: product_response(files, product),
        media: media
            .into_iter()
            .map(|media| media_response(files, media))
            .collect(),
        related: related
            .into_iter()
            .map(|product| product_response(files, product))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> Upload {
        Upload {
            file_name: "pump.jpg".to_owned(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn media_needs_a_source() {
        let err = validate_media(&NewMedia::default()).expect_err("no source");
        assert!(matches!(err, ProductError::Validation(_)));

        let blank_url = NewMedia {
            kind: MediaKind::Video,
            url: Some("   ".to_owned()),
            ..NewMedia::default()
        };
        assert!(validate_media(&blank_url).is_err());

        let empty_file = NewMedia {
            file: Some(Upload {
                file_name: "empty.jpg".to_owned(),
                bytes: Vec::new(),
            }),
            ..NewMedia::default()
        };
        assert!(validate_media(&empty_file).is_err());
    }

    #[test]
    fn media_with_file_or_url_is_accepted() {
        let with_file = NewMedia {
            file: Some(upload()),
            ..NewMedia::default()
        };
        assert!(validate_media(&with_file).is_ok());

        let with_url = NewMedia {
            kind: MediaKind::Video,
            url: Some("https://youtu.be/YK1gvY2KS9c".to_owned()),
            display_order: Some(2),
            ..NewMedia::default()
        };
        assert!(validate_media(&with_url).is_ok());
    }

    #[test]
    fn negative_display_order_is_rejected() {
        let media = NewMedia {
            file: Some(upload()),
            display_order: Some(-1),
            ..NewMedia::default()
        };
        assert!(matches!(
            validate_media(&media),
            Err(ProductError::Validation(msg)) if msg.contains("negative")
        ));
    }
}
