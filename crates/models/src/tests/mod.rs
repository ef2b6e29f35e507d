//! Database-backed CRUD tests. Skipped when `SKIP_DB_TESTS` is set or no
//! database is reachable at `DATABASE_URL`.

use crate::db::connect;
use crate::display::{ActivityDisplay, EventDisplay, GalleryCategory};
use crate::{activity, event, gallery_image};
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn test_event_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let title = format!("event_{}", Uuid::new_v4());
    let created = event::create(&db, event::NewEvent {
        title: title.clone(),
        date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        time: "6:00 PM".into(),
        venue: "Hall".into(),
        description: "desc".into(),
        display_on: EventDisplay::Events,
        image_path: Some(String::new()),
    })
    .await?;
    assert_eq!(created.title, title);
    assert_eq!(created.image_path, None);

    let home = event::list(&db, Some(EventDisplay::Home)).await?;
    assert!(home.iter().all(|e| e.id != created.id));

    let patch = event::EventPatch { venue: Some("Park".into()), ..Default::default() };
    let updated = event::update(&db, created.id, patch, None).await?;
    assert_eq!(updated.venue, "Park");
    assert_eq!(updated.created_at, created.created_at);

    assert!(event::delete(&db, created.id).await?);
    assert!(!event::delete(&db, created.id).await?);
    assert!(event::find(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_activity_filter_includes_both() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let both = activity::create(&db, activity::NewActivity {
        title: "Book Club".into(),
        description: "Weekly meetup".into(),
        display_on: ActivityDisplay::Both,
        image_path: None,
    })
    .await?;
    let section = activity::create(&db, activity::NewActivity {
        title: "Chess".into(),
        description: "Tuesdays".into(),
        display_on: ActivityDisplay::Activities,
        image_path: None,
    })
    .await?;

    let home = activity::list(&db, Some(ActivityDisplay::Home)).await?;
    assert!(home.iter().any(|a| a.id == both.id));
    assert!(home.iter().all(|a| a.id != section.id));

    activity::delete(&db, both.id).await?;
    activity::delete(&db, section.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_gallery_update_missing_row() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let res = gallery_image::update(&db, Uuid::new_v4(), Default::default(), None).await;
    assert!(matches!(res, Err(crate::errors::ModelError::NotFound(_))));

    let g = gallery_image::create(&db, gallery_image::NewGalleryImage {
        category: GalleryCategory::Community,
        title: None,
        alt_text: Some("crowd".into()),
        image_path: format!("{}.jpg", Uuid::new_v4()),
    })
    .await?;
    let by_cat = gallery_image::list(&db, Some(GalleryCategory::Community)).await?;
    assert!(by_cat.iter().any(|x| x.id == g.id));
    gallery_image::delete(&db, g.id).await?;
    Ok(())
}
