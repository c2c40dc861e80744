use crate::database::DbError;
use crate::database::product::{
    Product, ProductCategory, ProductCategoryWithCount, ProductChanges, ProductWithMediaCount,
};
use crate::database::product_media::{NewProductMedia, ProductMedia};
use crate::utils::product_slug;
use sqlx::{Executor, PgConnection, Postgres};

pub struct ProductStore;

impl ProductStore {
    // --- Categories ---

    pub async fn create_category(
        executor: impl Executor<'_, Database = Postgres>,
        name: &str,
        description: Option<&str>,
    ) -> Result<ProductCategory, DbError> {
        Ok(sqlx::query_as::<_, ProductCategory>(
            "INSERT INTO product_category (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await?)
    }

    /// Categories, newest first, each with its product count.
    pub async fn list_categories_with_count(
        executor: impl Executor<'_, Database = Postgres>,
        pattern: Option<&str>,
    ) -> Result<Vec<ProductCategoryWithCount>, DbError> {
        Ok(sqlx::query_as::<_, ProductCategoryWithCount>(
            r"
            SELECT c.id, c.name, c.description, c.created_at, COUNT(p.id) AS product_count
            FROM product_category c
            LEFT JOIN product p ON p.category_id = c.id
            WHERE $1::text IS NULL OR c.name ILIKE $1 OR c.description ILIKE $1
            GROUP BY c.id
            ORDER BY c.id DESC
            ",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?)
    }

    /// Every category ordered by name, for the public catalogue.
    pub async fn list_categories_by_name(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<ProductCategory>, DbError> {
        Ok(
            sqlx::query_as::<_, ProductCategory>("SELECT * FROM product_category ORDER BY name")
                .fetch_all(executor)
                .await?,
        )
    }

    pub async fn find_category(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
    ) -> Result<Option<ProductCategory>, DbError> {
        Ok(
            sqlx::query_as::<_, ProductCategory>("SELECT * FROM product_category WHERE id = $1")
                .bind(category_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn delete_category(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
    ) -> Result<Option<ProductCategory>, DbError> {
        Ok(sqlx::query_as::<_, ProductCategory>(
            "DELETE FROM product_category WHERE id = $1 RETURNING *",
        )
        .bind(category_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Every stored file belonging to the products of a category, media included.
    pub async fn list_category_file_paths(
        executor: impl Executor<'_, Database = Postgres>,
        category_id: i32,
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            r"
            SELECT path FROM (
                SELECT p.image AS path FROM product p WHERE p.category_id = $1
                UNION ALL
                SELECT p.catalogue FROM product p WHERE p.category_id = $1
                UNION ALL
                SELECT m.file FROM product_media m
                JOIN product p ON p.id = m.product_id WHERE p.category_id = $1
                UNION ALL
                SELECT m.thumbnail FROM product_media m
                JOIN product p ON p.id = m.product_id WHERE p.category_id = $1
            ) files
            WHERE path IS NOT NULL
            ",
        )
        .bind(category_id)
        .fetch_all(executor)
        .await?)
    }

    // --- Products ---

    /// Inserts a product and derives its slug from the title and the new id.
    ///
    /// Takes a connection because the slug needs the generated id; run it inside a transaction.
    pub async fn create(
        conn: &mut PgConnection,
        category_id: i32,
        title: &str,
        description: Option<&str>,
        catalogue: Option<&str>,
        image: Option<&str>,
    ) -> Result<Product, DbError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO product (category_id, title, description, catalogue, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(category_id)
        .bind(title)
        .bind(description)
        .bind(catalogue)
        .bind(image)
        .fetch_one(&mut *conn)
        .await?;

        Ok(
            sqlx::query_as::<_, Product>("UPDATE product SET slug = $2 WHERE id = $1 RETURNING *")
                .bind(id)
                .bind(product_slug(title, id))
                .fetch_one(&mut *conn)
                .await?,
        )
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<Option<Product>, DbError> {
        Ok(
            sqlx::query_as::<_, Product>("SELECT * FROM product WHERE id = $1")
                .bind(product_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Every product, in insertion order, for the public catalogue.
    pub async fn list_all(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<Product>, DbError> {
        Ok(sqlx::query_as::<_, Product>("SELECT * FROM product ORDER BY id")
            .fetch_all(executor)
            .await?)
    }

    /// Admin product list, newest first, with media counts.
    pub async fn list_with_media_count(
        executor: impl Executor<'_, Database = Postgres>,
        pattern: Option<&str>,
    ) -> Result<Vec<ProductWithMediaCount>, DbError> {
        Ok(sqlx::query_as::<_, ProductWithMediaCount>(
            r"
            SELECT p.id, p.category_id, p.title, p.description, p.catalogue, p.image, p.slug,
                   p.created_at, COUNT(m.id) AS media_count
            FROM product p
            JOIN product_category c ON c.id = p.category_id
            LEFT JOIN product_media m ON m.product_id = p.id
            WHERE $1::text IS NULL
               OR p.title ILIKE $1
               OR p.description ILIKE $1
               OR c.name ILIKE $1
            GROUP BY p.id
            ORDER BY p.id DESC
            ",
        )
        .bind(pattern)
        .fetch_all(executor)
        .await?)
    }

    /// Other products of the same category, newest first.
    pub async fn list_related(
        executor: impl Executor<'_, Database = Postgres>,
        product: &Product,
    ) -> Result<Vec<Product>, DbError> {
        Ok(sqlx::query_as::<_, Product>(
            r"
            SELECT * FROM product
            WHERE category_id = $1 AND id <> $2
            ORDER BY id DESC
            ",
        )
        .bind(product.category_id)
        .bind(product.id)
        .fetch_all(executor)
        .await?)
    }

    /// Applies `changes` and recomputes the slug from the resulting title.
    pub async fn update(
        conn: &mut PgConnection,
        product_id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, DbError> {
        let updated = sqlx::query_as::<_, Product>(
            r"
            UPDATE product SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                catalogue = COALESCE($5, catalogue),
                image = COALESCE($6, image)
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(product_id)
        .bind(changes.category_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.catalogue.as_deref())
        .bind(changes.image.as_deref())
        .fetch_optional(&mut *conn)
        .await?;

        let Some(product) = updated else {
            return Ok(None);
        };
        let slug = product_slug(&product.title, product.id);
        if slug == product.slug {
            return Ok(Some(product));
        }
        Ok(Some(
            sqlx::query_as::<_, Product>("UPDATE product SET slug = $2 WHERE id = $1 RETURNING *")
                .bind(product.id)
                .bind(slug)
                .fetch_one(&mut *conn)
                .await?,
        ))
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<Option<Product>, DbError> {
        Ok(
            sqlx::query_as::<_, Product>("DELETE FROM product WHERE id = $1 RETURNING *")
                .bind(product_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn count(executor: impl Executor<'_, Database = Postgres>) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product")
            .fetch_one(executor)
            .await?)
    }

    // --- Media ---

    pub async fn create_media(
        executor: impl Executor<'_, Database = Postgres>,
        media: &NewProductMedia,
    ) -> Result<ProductMedia, DbError> {
        Ok(sqlx::query_as::<_, ProductMedia>(
            r"
            INSERT INTO product_media (product_id, kind, file, url, thumbnail, display_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(media.product_id)
        .bind(media.kind)
        .bind(media.file.as_deref())
        .bind(media.url.as_deref())
        .bind(media.thumbnail.as_deref())
        .bind(media.display_order)
        .fetch_one(executor)
        .await?)
    }

    /// Media of a product in slider order.
    pub async fn list_media(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<Vec<ProductMedia>, DbError> {
        Ok(sqlx::query_as::<_, ProductMedia>(
            "SELECT * FROM product_media WHERE product_id = $1 ORDER BY display_order, id",
        )
        .bind(product_id)
        .fetch_all(executor)
        .await?)
    }

    /// Stored media files of a product, thumbnails included.
    pub async fn list_media_file_paths(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            r"
            SELECT path FROM (
                SELECT file AS path FROM product_media WHERE product_id = $1
                UNION ALL
                SELECT thumbnail FROM product_media WHERE product_id = $1
            ) files
            WHERE path IS NOT NULL
            ",
        )
        .bind(product_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn delete_media(
        executor: impl Executor<'_, Database = Postgres>,
        product_id: i32,
        media_id: i32,
    ) -> Result<Option<ProductMedia>, DbError> {
        Ok(sqlx::query_as::<_, ProductMedia>(
            "DELETE FROM product_media WHERE id = $1 AND product_id = $2 RETURNING *",
        )
        .bind(media_id)
        .bind(product_id)
        .fetch_optional(executor)
        .await?)
    }
}
