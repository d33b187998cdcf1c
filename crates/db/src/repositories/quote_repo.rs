//! Repository for the `quotes` table.

use agripress_core::types::DbId;
use sqlx::PgPool;

use crate::models::quote::{CreateQuote, Quote, UpdateQuote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, soy, rice, corn, recorded_at";

/// Provides CRUD and time-series operations for commodity quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a new quote sample, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuote) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes (soy, rice, corn)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(input.soy)
            .bind(input.rice)
            .bind(input.corn)
            .fetch_one(pool)
            .await
    }

    /// Find a quote by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all quotes, newest sample first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes ORDER BY recorded_at DESC, id DESC");
        sqlx::query_as::<_, Quote>(&query).fetch_all(pool).await
    }

    /// Fetch the `count` most recent samples, newest first.
    ///
    /// The trend endpoint asks for two: the latest and the one before it.
    pub async fn most_recent(pool: &PgPool, count: i64) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes ORDER BY recorded_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(count)
            .fetch_all(pool)
            .await
    }

    /// Replace all three commodity values of an existing sample.
    ///
    /// Returns `None` if no row with the given `id` exists. The recording
    /// timestamp is deliberately left untouched so the series stays ordered.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuote,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET soy = $2, rice = $3, corn = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(input.soy)
            .bind(input.rice)
            .bind(input.corn)
            .fetch_optional(pool)
            .await
    }

    /// Delete a quote by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
