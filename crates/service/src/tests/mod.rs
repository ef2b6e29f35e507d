//! Resource service behaviour against the in-memory gateway.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use models::activity::{ActivityPatch, NewActivity};
use models::display::{ActivityDisplay, EventDisplay, GalleryCategory};
use models::event::{EventPatch, NewEvent};
use models::gallery_image::{GalleryImagePatch, NewGalleryImage};

use crate::blob::{BlobStore, LocalBlobStore, MemoryBlobStore};
use crate::errors::ServiceError;
use crate::media::{ImageUpload, MediaLibrary};
use crate::memory::{MemoryActivityRepository, MemoryEventRepository, MemoryGalleryRepository};
use crate::ContentServices;

struct Harness {
    store: Arc<MemoryBlobStore>,
    events: Arc<MemoryEventRepository>,
    activities: Arc<MemoryActivityRepository>,
    gallery: Arc<MemoryGalleryRepository>,
    svc: ContentServices,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryBlobStore::new());
    let media = Arc::new(MediaLibrary::new(store.clone(), "3600"));
    let events = Arc::new(MemoryEventRepository::new());
    let activities = Arc::new(MemoryActivityRepository::new());
    let gallery = Arc::new(MemoryGalleryRepository::new());
    let svc = ContentServices::new(events.clone(), activities.clone(), gallery.clone(), media);
    Harness { store, events, activities, gallery, svc }
}

fn jpeg(name: &str, size: usize) -> ImageUpload {
    ImageUpload { file_name: name.into(), content_type: Some("image/jpeg".into()), bytes: vec![0xFF; size] }
}

fn book_club() -> NewActivity {
    NewActivity {
        title: "Book Club".into(),
        description: "Weekly meetup".into(),
        display_on: ActivityDisplay::Both,
        image_path: None,
    }
}

fn event(title: &str, display_on: EventDisplay) -> NewEvent {
    NewEvent {
        title: title.into(),
        date: NaiveDate::from_ymd_opt(2026, 5, 9).unwrap(),
        time: "2:00 PM".into(),
        venue: "Community Centre".into(),
        description: "All welcome".into(),
        display_on,
        image_path: None,
    }
}

/// Object name behind a normalized URL returned by a service.
fn object_of(store: &MemoryBlobStore, url: &str) -> String {
    store.object_name(url).expect("url points into the memory store")
}

#[tokio::test]
async fn create_then_get_without_image_round_trips_fields() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.activities.create(book_club(), None).await?;
    let got = h.svc.activities.get(created.id).await?;

    assert_eq!(got.title, "Book Club");
    assert_eq!(got.description, "Weekly meetup");
    assert_eq!(got.display_on, ActivityDisplay::Both);
    assert_eq!(got.image_path, None);
    assert_eq!(got.created_at, created.created_at);
    assert!(h.store.is_empty());
    Ok(())
}

#[tokio::test]
async fn gallery_upload_gets_generated_jpg_name_and_clean_url() -> anyhow::Result<()> {
    let h = harness();
    let input = NewGalleryImage {
        category: GalleryCategory::Events,
        title: Some("Spring Fair".into()),
        alt_text: None,
        image_path: String::new(),
    };
    let created = h.svc.gallery.create(input, Some(jpeg("fair.jpg", 10 * 1024))).await?;
    let got = h.svc.gallery.get(created.id).await?;

    assert!(!got.image_path.contains('?'));
    let stored = &h.gallery.raw().await[0].image_path;
    assert!(stored.ends_with(".jpg"));
    assert!(Uuid::parse_str(stored.trim_end_matches(".jpg")).is_ok());
    assert_eq!(got.image_path, h.store.public_url(stored));

    let obj = h.store.object(stored).expect("blob uploaded");
    assert_eq!(obj.bytes.len(), 10 * 1024);
    assert_eq!(obj.content_type, "image/jpeg");
    Ok(())
}

#[tokio::test]
async fn gallery_create_without_image_is_rejected_before_any_write() {
    let h = harness();
    let input = NewGalleryImage { category: GalleryCategory::Community, title: None, alt_text: None, image_path: String::new() };
    let res = h.svc.gallery.create(input, None).await;
    assert!(matches!(res, Err(ServiceError::Validation(_))));
    assert_eq!(h.gallery.len().await, 0);
}

#[tokio::test]
async fn update_with_image_replaces_and_removes_old_blob() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.events.create(event("Fair", EventDisplay::Both), Some(jpeg("a.jpg", 64))).await?;
    let old = object_of(&h.store, created.image_path.as_deref().unwrap());

    let updated = h.svc.events.update(created.id, EventPatch::default(), Some(jpeg("b.png", 32))).await?;
    let new = object_of(&h.store, updated.image_path.as_deref().unwrap());

    assert_ne!(old, new);
    assert!(new.ends_with(".png"));
    assert!(!h.store.contains(&old));
    assert!(h.store.contains(&new));
    assert_eq!(h.store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn update_without_image_keeps_reference() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.activities.create(book_club(), Some(jpeg("club.jpg", 16))).await?;
    let patch = ActivityPatch { title: Some("Readers' Circle".into()), ..Default::default() };
    let updated = h.svc.activities.update(created.id, patch, None).await?;

    assert_eq!(updated.title, "Readers' Circle");
    assert_eq!(updated.image_path, created.image_path);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(h.store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_old_blob_removal_does_not_fail_update() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.events.create(event("Fair", EventDisplay::Home), Some(jpeg("a.jpg", 8))).await?;
    h.store.fail_removes(true);
    let updated = h.svc.events.update(created.id, EventPatch::default(), Some(jpeg("b.jpg", 8))).await?;
    assert_ne!(updated.image_path, created.image_path);
    // Old blob leaked.
    assert_eq!(h.store.len(), 2);
    Ok(())
}

#[tokio::test]
async fn upload_failure_creates_no_row() {
    let h = harness();
    h.store.fail_uploads(true);
    let res = h.svc.events.create(event("Fair", EventDisplay::Home), Some(jpeg("a.jpg", 8))).await;
    assert!(matches!(res, Err(ServiceError::Upload(_))));
    assert_eq!(h.events.len().await, 0);
}

#[tokio::test]
async fn upload_failure_on_update_leaves_row_untouched() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.events.create(event("Fair", EventDisplay::Home), Some(jpeg("a.jpg", 8))).await?;
    h.store.fail_uploads(true);
    let patch = EventPatch { title: Some("Renamed".into()), ..Default::default() };
    let res = h.svc.events.update(created.id, patch, Some(jpeg("b.jpg", 8))).await;
    assert!(matches!(res, Err(ServiceError::Upload(_))));
    let got = h.svc.events.get(created.id).await?;
    assert_eq!(got.title, "Fair");
    assert_eq!(got.image_path, created.image_path);
    Ok(())
}

#[tokio::test]
async fn insert_failure_after_upload_leaves_orphan() {
    let h = harness();
    h.activities.fail_writes(true);
    let res = h.svc.activities.create(book_club(), Some(jpeg("a.jpg", 8))).await;
    assert!(matches!(res, Err(ServiceError::RemoteQuery(_))));
    assert_eq!(h.activities.len().await, 0);
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn delete_removes_row_and_blob() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.events.create(event("Fair", EventDisplay::Events), Some(jpeg("a.jpg", 8))).await?;
    let name = object_of(&h.store, created.image_path.as_deref().unwrap());

    h.svc.events.delete(created.id).await?;
    assert!(matches!(h.svc.events.get(created.id).await, Err(ServiceError::NotFound(_))));
    assert!(!h.store.contains(&name));
    Ok(())
}

#[tokio::test]
async fn delete_twice_is_not_found_and_spares_other_rows() -> anyhow::Result<()> {
    let h = harness();
    let a = h.svc.activities.create(book_club(), None).await?;
    let b = h.svc.activities.create(book_club(), None).await?;

    h.svc.activities.delete(a.id).await?;
    let second = h.svc.activities.delete(a.id).await;
    assert!(matches!(second, Err(ServiceError::NotFound(_))));
    assert_eq!(h.svc.activities.get(b.id).await?.id, b.id);
    Ok(())
}

#[tokio::test]
async fn failed_blob_removal_aborts_delete() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.events.create(event("Fair", EventDisplay::Both), Some(jpeg("a.jpg", 8))).await?;
    h.store.fail_removes(true);
    let res = h.svc.events.delete(created.id).await;
    assert!(matches!(res, Err(ServiceError::RemoteQuery(_))));
    assert!(h.svc.events.get(created.id).await.is_ok());
    assert_eq!(h.store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_row_delete_after_blob_removal_leaves_dangling_reference() -> anyhow::Result<()> {
    let h = harness();
    let created = h.svc.events.create(event("Fair", EventDisplay::Both), Some(jpeg("a.jpg", 8))).await?;
    h.events.fail_deletes(true);
    let res = h.svc.events.delete(created.id).await;
    assert!(matches!(res, Err(ServiceError::RemoteQuery(_))));
    let row = h.svc.events.get(created.id).await?;
    assert!(row.image_path.is_some());
    assert!(h.store.is_empty());
    Ok(())
}

#[tokio::test]
async fn home_filter_includes_both_and_excludes_section_only() -> anyhow::Result<()> {
    let h = harness();
    let home = h.svc.events.create(event("Home", EventDisplay::Home), None).await?;
    let both = h.svc.events.create(event("Both", EventDisplay::Both), None).await?;
    let section = h.svc.events.create(event("Section", EventDisplay::Events), None).await?;

    let ids: Vec<Uuid> = h.svc.events.list(Some(EventDisplay::Home)).await?.into_iter().map(|e| e.id).collect();
    assert!(ids.contains(&home.id));
    assert!(ids.contains(&both.id));
    assert!(!ids.contains(&section.id));

    let section_ids: Vec<Uuid> = h.svc.events.list(Some(EventDisplay::Events)).await?.into_iter().map(|e| e.id).collect();
    assert_eq!(section_ids.len(), 2);
    assert!(!section_ids.contains(&home.id));

    assert_eq!(h.svc.events.list(None).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn legacy_full_urls_are_normalized_but_not_rewritten() -> anyhow::Result<()> {
    let h = harness();
    let legacy = "https://cdn.example.org/storage/old.jpg?token=abc".to_string();
    let input = NewActivity { image_path: Some(legacy.clone()), ..book_club() };
    let created = h.svc.activities.create(input, None).await?;

    assert_eq!(created.image_path.as_deref(), Some("https://cdn.example.org/storage/old.jpg"));
    let listed = h.svc.activities.list(Some(ActivityDisplay::Home)).await?;
    assert_eq!(listed[0].image_path.as_deref(), Some("https://cdn.example.org/storage/old.jpg"));
    assert_eq!(h.activities.raw().await[0].image_path.as_deref(), Some(legacy.as_str()));
    Ok(())
}

#[tokio::test]
async fn gallery_list_filters_by_category() -> anyhow::Result<()> {
    let h = harness();
    for (cat, file) in [(GalleryCategory::Events, "a.jpg"), (GalleryCategory::Facilities, "b.jpg")] {
        let input = NewGalleryImage { category: cat, title: None, alt_text: None, image_path: String::new() };
        h.svc.gallery.create(input, Some(jpeg(file, 4))).await?;
    }
    let events = h.svc.gallery.list(Some(GalleryCategory::Events)).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, GalleryCategory::Events);
    assert_eq!(h.svc.gallery.list(None).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn gallery_update_changes_caption_and_image() -> anyhow::Result<()> {
    let h = harness();
    let input = NewGalleryImage { category: GalleryCategory::Community, title: Some("Picnic".into()), alt_text: None, image_path: String::new() };
    let created = h.svc.gallery.create(input, Some(jpeg("p.jpg", 4))).await?;
    let old = object_of(&h.store, &created.image_path);

    let patch = GalleryImagePatch { alt_text: Some("Families on the lawn".into()), title: Some(String::new()), ..Default::default() };
    let updated = h.svc.gallery.update(created.id, patch, Some(jpeg("p2.webp", 4))).await?;
    assert_eq!(updated.title, None);
    assert_eq!(updated.alt_text.as_deref(), Some("Families on the lawn"));
    assert!(updated.image_path.ends_with(".webp"));
    assert!(!h.store.contains(&old));
    Ok(())
}

#[tokio::test]
async fn bulk_delete_reports_each_outcome_in_order() -> anyhow::Result<()> {
    let h = harness();
    let mut ids = Vec::new();
    for file in ["1.jpg", "2.jpg", "3.jpg"] {
        let input = NewGalleryImage { category: GalleryCategory::Events, title: None, alt_text: None, image_path: String::new() };
        ids.push(h.svc.gallery.create(input, Some(jpeg(file, 4))).await?.id);
    }
    let missing = Uuid::new_v4();
    let request = vec![ids[0], missing, ids[2]];

    let outcomes = h.svc.gallery.bulk_delete(&request).await;
    assert_eq!(outcomes.iter().map(|o| o.id).collect::<Vec<_>>(), request);
    assert!(outcomes[0].ok);
    assert!(!outcomes[1].ok && outcomes[1].error.is_some());
    assert!(outcomes[2].ok);

    let remaining = h.svc.gallery.list(None).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, ids[1]);
    assert_eq!(h.store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn validation_errors_precede_uploads() {
    let h = harness();
    let bad = NewActivity { title: "  ".into(), ..book_club() };
    let res = h.svc.activities.create(bad, Some(jpeg("a.jpg", 4))).await;
    assert!(matches!(res, Err(ServiceError::Validation(_))));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn update_of_missing_row_is_not_found_without_upload() {
    let h = harness();
    let res = h.svc.events.update(Uuid::new_v4(), EventPatch::default(), Some(jpeg("a.jpg", 4))).await;
    assert!(matches!(res, Err(ServiceError::NotFound(_))));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn relative_local_url_sent_back_as_image_path_stays_deletable() -> anyhow::Result<()> {
    let root = std::env::temp_dir().join(format!("svc_local_{}", Uuid::new_v4()));
    let store = Arc::new(LocalBlobStore::new(&root, "/media"));
    let media = Arc::new(MediaLibrary::new(store, "3600"));
    let repo = Arc::new(MemoryActivityRepository::new());
    let svc = ContentServices::new(
        Arc::new(MemoryEventRepository::new()),
        repo.clone(),
        Arc::new(MemoryGalleryRepository::new()),
        media,
    );

    let first = svc.activities.create(book_club(), Some(jpeg("club.jpg", 8))).await?;
    let url = first.image_path.clone().expect("image url");
    assert!(url.starts_with("/media/") && !url.starts_with("/media//"));

    let echoed = NewActivity { image_path: Some(url.clone()), ..book_club() };
    let second = svc.activities.create(echoed, None).await?;
    assert_eq!(svc.activities.get(second.id).await?.image_path.as_deref(), Some(url.as_str()));

    svc.activities.delete(second.id).await?;
    assert_eq!(repo.len().await, 1);

    let _ = tokio::fs::remove_dir_all(&root).await;
    Ok(())
}
