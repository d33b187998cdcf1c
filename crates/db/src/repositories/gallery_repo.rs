//! Repository for the `galleries` table.

use agripress_core::types::DbId;
use sqlx::PgPool;

use crate::models::gallery::{CreateGallery, Gallery, GalleryListItem, UpdateGallery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, ref_kind, related_id, created_at, updated_at";

/// Provides CRUD and reference-scoped listing operations for galleries.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a new gallery, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGallery) -> Result<Gallery, sqlx::Error> {
        let query = format!(
            "INSERT INTO galleries (title, description, ref_kind, related_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gallery>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.ref_kind)
            .bind(input.related_id)
            .fetch_one(pool)
            .await
    }

    /// Find a gallery by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Gallery>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM galleries WHERE id = $1");
        sqlx::query_as::<_, Gallery>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of galleries (with photo counts) plus the total count,
    /// newest first.
    pub async fn list_paged(
        pool: &PgPool,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<GalleryListItem>, i64), sqlx::Error> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM galleries")
            .fetch_one(pool)
            .await?;

        let items = sqlx::query_as::<_, GalleryListItem>(
            "SELECT g.id, g.title, g.description, g.ref_kind, g.related_id,
                    g.created_at, g.updated_at,
                    COUNT(p.id) AS photo_count
             FROM galleries g
             LEFT JOIN photos p ON p.gallery_id = g.id
             GROUP BY g.id
             ORDER BY g.created_at DESC, g.id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(pool)
        .await?;

        Ok((items, total.0))
    }

    /// List galleries of one reference kind, optionally narrowed to a single
    /// related record, newest first.
    pub async fn list_by_reference(
        pool: &PgPool,
        ref_kind: i16,
        related_id: Option<DbId>,
    ) -> Result<Vec<Gallery>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM galleries
             WHERE ref_kind = $1 AND ($2::BIGINT IS NULL OR related_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Gallery>(&query)
            .bind(ref_kind)
            .bind(related_id)
            .fetch_all(pool)
            .await
    }

    /// Update a gallery. Only non-`None` fields in `input` are applied;
    /// `updated_at` is stamped on every successful update.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGallery,
    ) -> Result<Option<Gallery>, sqlx::Error> {
        let query = format!(
            "UPDATE galleries SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                ref_kind = COALESCE($4, ref_kind),
                related_id = COALESCE($5, related_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gallery>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.ref_kind)
            .bind(input.related_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a gallery by ID. Returns `true` if a row was removed.
    ///
    /// Photos cascade at the store level; callers wanting host-side cleanup
    /// fetch the photo URLs first.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
