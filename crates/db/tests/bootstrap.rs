use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    agripress_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "news_categories",
        "news",
        "galleries",
        "photos",
        "projects",
        "quotes",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// The partial unique index rejects a second primary photo per gallery.
#[sqlx::test(migrations = "./migrations")]
async fn test_primary_photo_unique_index(pool: PgPool) {
    let gallery: (i64,) = sqlx::query_as(
        "INSERT INTO galleries (title, ref_kind) VALUES ('g', 1) RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO photos (gallery_id, url, is_primary) VALUES ($1, 'u1', TRUE)")
        .bind(gallery.0)
        .execute(&pool)
        .await
        .unwrap();

    let second =
        sqlx::query("INSERT INTO photos (gallery_id, url, is_primary) VALUES ($1, 'u2', TRUE)")
            .bind(gallery.0)
            .execute(&pool)
            .await;
    assert!(second.is_err(), "two primary photos in one gallery must be rejected");
}
