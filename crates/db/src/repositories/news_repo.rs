//! Repository for the `news` table.

use agripress_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, News, UpdateNews};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, subtitle, category_id, published_at, source, body, image_url, \
                       created_at, updated_at";

/// Provides CRUD and paged listing operations for news articles.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, subtitle, category_id, published_at, source, body, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(input.category_id)
            .bind(input.published_at)
            .bind(&input.source)
            .bind(&input.body)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all articles, newest publication first.
    pub async fn list(pool: &PgPool) -> Result<Vec<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news ORDER BY published_at DESC, id DESC");
        sqlx::query_as::<_, News>(&query).fetch_all(pool).await
    }

    /// List articles in one category, newest publication first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news WHERE category_id = $1
             ORDER BY published_at DESC, id DESC"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch one page of articles plus the total article count.
    ///
    /// `page` is 1-based and `page_size` already clamped by the caller.
    /// A window past the last row simply comes back empty.
    pub async fn list_paged(
        pool: &PgPool,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<News>, i64), sqlx::Error> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news")
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM news
             ORDER BY published_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, News>(&query)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(pool)
            .await?;

        Ok((items, total.0))
    }

    /// Number of articles referencing the given category.
    pub async fn count_by_category(pool: &PgPool, category_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Update an article. Only non-`None` fields in `input` are applied;
    /// `updated_at` is stamped on every successful update.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                category_id = COALESCE($4, category_id),
                published_at = COALESCE($5, published_at),
                source = COALESCE($6, source),
                body = COALESCE($7, body),
                image_url = COALESCE($8, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(input.category_id)
            .bind(input.published_at)
            .bind(&input.source)
            .bind(&input.body)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
