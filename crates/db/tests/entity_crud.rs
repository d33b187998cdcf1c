//! Integration tests for entity CRUD: unique constraints, the category
//! delete restriction, paged listings, and the quote time series.

use agripress_db::models::category::{CreateCategory, UpdateCategory};
use agripress_db::models::news::CreateNews;
use agripress_db::models::quote::CreateQuote;
use agripress_db::repositories::{CategoryRepo, NewsRepo, QuoteRepo};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: None,
        is_active: None,
    }
}

fn new_news(category_id: i64, title: &str, days_ago: i64) -> CreateNews {
    CreateNews {
        title: title.to_string(),
        subtitle: "subtitle".to_string(),
        category_id,
        published_at: Utc::now() - Duration::days(days_ago),
        source: "wire".to_string(),
        body: "body text".to_string(),
        image_url: None,
    }
}

fn new_quote(soy: &str, rice: &str, corn: &str) -> CreateQuote {
    CreateQuote {
        soy: Decimal::from_str(soy).unwrap(),
        rice: Decimal::from_str(rice).unwrap(),
        corn: Decimal::from_str(corn).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn category_names_are_unique_case_insensitively(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Markets"))
        .await
        .unwrap();

    let duplicate = CategoryRepo::create(&pool, &new_category("markets")).await;
    assert!(duplicate.is_err(), "case-folded duplicate must be rejected");

    // The duplicate check helper sees the existing row either way.
    let found = CategoryRepo::find_by_name(&pool, "MARKETS").await.unwrap();
    assert!(found.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_category_with_news_fails_and_changes_nothing(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Weather"))
        .await
        .unwrap();
    let article = NewsRepo::create(&pool, &new_news(category.id, "Storm front", 0))
        .await
        .unwrap();

    // RESTRICT foreign key: the store refuses the delete.
    let result = CategoryRepo::delete(&pool, category.id).await;
    assert!(result.is_err());

    let category_after = CategoryRepo::find_by_id(&pool, category.id).await.unwrap();
    assert!(category_after.is_some(), "category must survive the failed delete");
    let article_after = NewsRepo::find_by_id(&pool, article.id).await.unwrap();
    assert!(article_after.is_some(), "article must survive the failed delete");

    // Once the article is gone the category can be removed.
    assert!(NewsRepo::delete(&pool, article.id).await.unwrap());
    assert!(CategoryRepo::delete(&pool, category.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn category_update_applies_partial_fields(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Prices"))
        .await
        .unwrap();

    let updated = CategoryRepo::update(
        &pool,
        category.id,
        &UpdateCategory {
            name: None,
            description: Some("commodity price coverage".to_string()),
            is_active: Some(false),
        },
    )
    .await
    .unwrap()
    .expect("row exists");

    assert_eq!(updated.name, "Prices");
    assert_eq!(updated.description.as_deref(), Some("commodity price coverage"));
    assert!(!updated.is_active);

    let active = CategoryRepo::list_active(&pool).await.unwrap();
    assert!(active.iter().all(|c| c.id != category.id));
}

// ---------------------------------------------------------------------------
// News pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn news_pages_partition_the_result_set(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Crops"))
        .await
        .unwrap();
    for i in 0..5 {
        NewsRepo::create(&pool, &new_news(category.id, &format!("Article {i}"), i))
            .await
            .unwrap();
    }

    let (page1, total) = NewsRepo::list_paged(&pool, 1, 2).await.unwrap();
    let (page2, _) = NewsRepo::list_paged(&pool, 2, 2).await.unwrap();
    let (page3, _) = NewsRepo::list_paged(&pool, 3, 2).await.unwrap();

    assert_eq!(total, 5);
    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 2);
    assert_eq!(page3.len(), 1, "last page holds the remainder");

    // Newest publication first, no overlap between windows.
    assert_eq!(page1[0].title, "Article 0");
    let mut seen: Vec<i64> = page1.iter().chain(&page2).chain(&page3).map(|n| n.id).collect();
    seen.dedup();
    assert_eq!(seen.len(), 5);

    // A window past the end is empty, not an error.
    let (page4, total4) = NewsRepo::list_paged(&pool, 4, 2).await.unwrap();
    assert!(page4.is_empty());
    assert_eq!(total4, 5);
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn most_recent_quotes_come_back_newest_first(pool: PgPool) {
    let older = QuoteRepo::create(&pool, &new_quote("10.00", "10.00", "10.00"))
        .await
        .unwrap();
    let newer = QuoteRepo::create(&pool, &new_quote("12.00", "8.00", "10.00"))
        .await
        .unwrap();

    let recent = QuoteRepo::most_recent(&pool, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    // Same-timestamp inserts fall back to id DESC, so the newer row leads.
    assert_eq!(recent[0].id, newer.id);
    assert_eq!(recent[1].id, older.id);

    // Exact decimal round-trip through NUMERIC(18,2).
    assert_eq!(recent[0].soy, Decimal::from_str("12.00").unwrap());
    assert_eq!(recent[1].rice, Decimal::from_str("10.00").unwrap());
}
