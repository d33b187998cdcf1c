//! Integration tests for gallery photo ordering and the primary flag.
//!
//! Exercises the transactional reorder and set-primary operations against a
//! real database.

use agripress_db::models::gallery::CreateGallery;
use agripress_db::models::photo::CreatePhoto;
use agripress_db::repositories::{GalleryRepo, PhotoRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_gallery(title: &str) -> CreateGallery {
    CreateGallery {
        title: title.to_string(),
        description: None,
        ref_kind: 1,
        related_id: None,
    }
}

fn new_photo(gallery_id: i64, url: &str) -> CreatePhoto {
    CreatePhoto {
        gallery_id,
        url: url.to_string(),
        file_name: None,
        caption: None,
        size_bytes: None,
        sort_order: None,
    }
}

async fn gallery_with_photos(pool: &PgPool, count: usize) -> (i64, Vec<i64>) {
    let gallery = GalleryRepo::create(pool, &new_gallery("fixture"))
        .await
        .unwrap();
    let mut photo_ids = Vec::with_capacity(count);
    for i in 0..count {
        let photo = PhotoRepo::create(pool, &new_photo(gallery.id, &format!("https://img/{i}")))
            .await
            .unwrap();
        photo_ids.push(photo.id);
    }
    (gallery.id, photo_ids)
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn reorder_assigns_dense_positions_in_list_order(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 3).await;
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);

    let updated = PhotoRepo::reorder(&pool, gallery_id, &[p3, p1, p2])
        .await
        .unwrap();
    assert_eq!(updated, 3);

    let order_of = |id: i64, photos: &[agripress_db::models::photo::Photo]| {
        photos.iter().find(|p| p.id == id).unwrap().sort_order
    };

    let photos = PhotoRepo::list_by_gallery(&pool, gallery_id).await.unwrap();
    assert_eq!(order_of(p3, &photos), Some(1));
    assert_eq!(order_of(p1, &photos), Some(2));
    assert_eq!(order_of(p2, &photos), Some(3));

    // Listing follows the assigned positions.
    let listed: Vec<i64> = photos.iter().map(|p| p.id).collect();
    assert_eq!(listed, vec![p3, p1, p2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn reorder_leaves_unnamed_photos_untouched(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 3).await;
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);

    // Give p3 an explicit position, then reorder only the first two.
    PhotoRepo::reorder(&pool, gallery_id, &[p1, p2, p3])
        .await
        .unwrap();
    let updated = PhotoRepo::reorder(&pool, gallery_id, &[p2, p1]).await.unwrap();
    assert_eq!(updated, 2);

    let photos = PhotoRepo::list_by_gallery(&pool, gallery_id).await.unwrap();
    let p3_order = photos.iter().find(|p| p.id == p3).unwrap().sort_order;
    assert_eq!(p3_order, Some(3), "photo outside the list keeps its position");
}

#[sqlx::test(migrations = "./migrations")]
async fn reorder_silently_ignores_foreign_ids(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 2).await;
    let (other_gallery_id, other_ids) = gallery_with_photos(&pool, 1).await;

    // A photo of another gallery and a nonexistent id are both skipped.
    let updated = PhotoRepo::reorder(&pool, gallery_id, &[other_ids[0], ids[0], 999_999, ids[1]])
        .await
        .unwrap();
    assert_eq!(updated, 2);

    let photos = PhotoRepo::list_by_gallery(&pool, gallery_id).await.unwrap();
    let order_of = |id: i64| photos.iter().find(|p| p.id == id).unwrap().sort_order;
    assert_eq!(order_of(ids[0]), Some(2));
    assert_eq!(order_of(ids[1]), Some(4));

    let other = PhotoRepo::list_by_gallery(&pool, other_gallery_id)
        .await
        .unwrap();
    assert_eq!(other[0].sort_order, None, "foreign photo must not be renumbered");
}

// ---------------------------------------------------------------------------
// Set-primary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn set_primary_leaves_exactly_one_flagged(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 3).await;

    let photo = PhotoRepo::set_primary(&pool, gallery_id, ids[1])
        .await
        .unwrap()
        .expect("target photo exists");
    assert!(photo.is_primary);

    let primary = PhotoRepo::find_primary(&pool, gallery_id)
        .await
        .unwrap()
        .expect("one photo is flagged");
    assert_eq!(primary.id, ids[1]);

    let flagged = PhotoRepo::list_by_gallery(&pool, gallery_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.is_primary)
        .count();
    assert_eq!(flagged, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn set_primary_twice_keeps_the_latest_target(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 3).await;

    PhotoRepo::set_primary(&pool, gallery_id, ids[0])
        .await
        .unwrap()
        .unwrap();
    PhotoRepo::set_primary(&pool, gallery_id, ids[2])
        .await
        .unwrap()
        .unwrap();

    let photos = PhotoRepo::list_by_gallery(&pool, gallery_id).await.unwrap();
    let flagged: Vec<i64> = photos.iter().filter(|p| p.is_primary).map(|p| p.id).collect();
    assert_eq!(flagged, vec![ids[2]]);
}

#[sqlx::test(migrations = "./migrations")]
async fn set_primary_unknown_photo_keeps_previous_flag(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 2).await;

    PhotoRepo::set_primary(&pool, gallery_id, ids[0])
        .await
        .unwrap()
        .unwrap();

    // Target outside the gallery: operation reports not-found and rolls back.
    let result = PhotoRepo::set_primary(&pool, gallery_id, 999_999).await.unwrap();
    assert!(result.is_none());

    let primary = PhotoRepo::find_primary(&pool, gallery_id)
        .await
        .unwrap()
        .expect("previous primary survives the failed call");
    assert_eq!(primary.id, ids[0]);
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_gallery_cascades_to_photos(pool: PgPool) {
    let (gallery_id, ids) = gallery_with_photos(&pool, 2).await;

    assert!(GalleryRepo::delete(&pool, gallery_id).await.unwrap());

    for id in ids {
        let photo = PhotoRepo::find_in_gallery(&pool, gallery_id, id).await.unwrap();
        assert!(photo.is_none(), "photo {id} should be gone with its gallery");
    }
}
