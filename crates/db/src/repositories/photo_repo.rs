//! Repository for the `photos` table.
//!
//! Photos are always scoped to one gallery. The reorder and set-primary
//! operations run inside a single transaction so no intermediate ordering
//! or flag state is ever visible to other requests.

use agripress_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo, UpdatePhoto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, gallery_id, url, file_name, caption, size_bytes, sort_order, is_primary, uploaded_at";

/// Listing order: explicit positions first, then newest uploads.
const ORDERING: &str = "ORDER BY sort_order ASC NULLS LAST, uploaded_at DESC, id DESC";

/// Provides CRUD, ordering, and primary-flag operations for gallery photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a new photo row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (gallery_id, url, file_name, caption, size_bytes, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.gallery_id)
            .bind(&input.url)
            .bind(&input.file_name)
            .bind(&input.caption)
            .bind(input.size_bytes)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a photo by ID within one gallery.
    pub async fn find_in_gallery(
        pool: &PgPool,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1 AND gallery_id = $2");
        sqlx::query_as::<_, Photo>(&query)
            .bind(photo_id)
            .bind(gallery_id)
            .fetch_optional(pool)
            .await
    }

    /// List a gallery's photos in display order.
    pub async fn list_by_gallery(
        pool: &PgPool,
        gallery_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE gallery_id = $1 {ORDERING}");
        sqlx::query_as::<_, Photo>(&query)
            .bind(gallery_id)
            .fetch_all(pool)
            .await
    }

    /// Find the gallery's primary photo, if one is flagged.
    pub async fn find_primary(
        pool: &PgPool,
        gallery_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE gallery_id = $1 AND is_primary");
        sqlx::query_as::<_, Photo>(&query)
            .bind(gallery_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a photo's caption or position within its gallery.
    ///
    /// Returns `None` if the photo does not exist in that gallery.
    pub async fn update(
        pool: &PgPool,
        gallery_id: DbId,
        photo_id: DbId,
        input: &UpdatePhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET
                caption = COALESCE($3, caption),
                sort_order = COALESCE($4, sort_order)
             WHERE id = $1 AND gallery_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(photo_id)
            .bind(gallery_id)
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a photo by ID within one gallery. Returns `true` if a row was
    /// removed.
    pub async fn delete_in_gallery(
        pool: &PgPool,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1 AND gallery_id = $2")
            .bind(photo_id)
            .bind(gallery_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a caller-supplied ordering to a gallery's photos.
    ///
    /// The photo matching `ordering[i]` gets `sort_order = i + 1`. IDs that
    /// do not belong to the gallery are silently skipped, and photos not
    /// named in the list keep their current position (partial lists are the
    /// caller's responsibility). Runs in one transaction; returns the number
    /// of photos repositioned.
    pub async fn reorder(
        pool: &PgPool,
        gallery_id: DbId,
        ordering: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut updated = 0u64;
        for (i, photo_id) in ordering.iter().enumerate() {
            let result =
                sqlx::query("UPDATE photos SET sort_order = $3 WHERE id = $1 AND gallery_id = $2")
                    .bind(photo_id)
                    .bind(gallery_id)
                    .bind(i as i32 + 1)
                    .execute(&mut *tx)
                    .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Flag one photo as the gallery's primary, clearing the flag on every
    /// other photo of that gallery in the same transaction.
    ///
    /// Returns `None` (and rolls back, leaving the previous primary intact)
    /// if the photo does not exist in that gallery.
    pub async fn set_primary(
        pool: &PgPool,
        gallery_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Clear first: the partial unique index on (gallery_id) WHERE
        // is_primary forbids two flagged rows even transiently within
        // a statement ordering that sets before clearing.
        sqlx::query("UPDATE photos SET is_primary = FALSE WHERE gallery_id = $1 AND is_primary")
            .bind(gallery_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE photos SET is_primary = TRUE
             WHERE id = $1 AND gallery_id = $2
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(photo_id)
            .bind(gallery_id)
            .fetch_optional(&mut *tx)
            .await?;

        match photo {
            Some(photo) => {
                tx.commit().await?;
                Ok(Some(photo))
            }
            None => {
                // Target photo missing: keep the existing primary.
                tx.rollback().await?;
                Ok(None)
            }
        }
    }
}
