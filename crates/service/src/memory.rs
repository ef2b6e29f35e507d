//! In-memory record tables mirroring the SeaORM repositories, with switchable
//! write failures. Used by tests and by the server test harness.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::activity::{self, ActivityPatch, NewActivity};
use models::display::{ActivityDisplay, EventDisplay, GalleryCategory};
use models::event::{self, EventPatch, NewEvent};
use models::gallery_image::{self, GalleryImagePatch, NewGalleryImage};
use models::validate::blank_to_none;
use models::display::DisplayTarget;

use crate::activities::ActivityRepository;
use crate::errors::ServiceError;
use crate::events::EventRepository;
use crate::gallery::GalleryRepository;

/// Rows in insertion order plus failure switches.
#[derive(Debug)]
pub struct MemoryTable<M> {
    rows: RwLock<Vec<M>>,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
}

impl<M> Default for MemoryTable<M> {
    fn default() -> Self {
        Self { rows: RwLock::new(Vec::new()), fail_writes: AtomicBool::new(false), fail_deletes: AtomicBool::new(false) }
    }
}

impl<M: Clone> MemoryTable<M> {
    pub fn new() -> Self { Self::default() }

    /// Make inserts and updates fail with a remote query error.
    pub fn fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

    pub fn fail_deletes(&self, fail: bool) { self.fail_deletes.store(fail, Ordering::SeqCst); }

    pub async fn len(&self) -> usize { self.rows.read().await.len() }

    /// Stored rows, unnormalized.
    pub async fn raw(&self) -> Vec<M> { self.rows.read().await.clone() }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), ServiceError> {
        if flag.load(Ordering::SeqCst) {
            return Err(ServiceError::RemoteQuery(format!("{op} rejected by memory table")));
        }
        Ok(())
    }

    async fn find_by(&self, pred: impl Fn(&M) -> bool) -> Option<M> {
        self.rows.read().await.iter().find(|m| pred(m)).cloned()
    }

    async fn push(&self, row: M) -> Result<M, ServiceError> {
        self.check(&self.fail_writes, "insert")?;
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn modify(&self, pred: impl Fn(&M) -> bool, f: impl FnOnce(&mut M), what: &str) -> Result<M, ServiceError> {
        self.check(&self.fail_writes, "update")?;
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|m| pred(m)).ok_or_else(|| ServiceError::not_found(what))?;
        f(row);
        Ok(row.clone())
    }

    async fn remove(&self, pred: impl Fn(&M) -> bool) -> Result<bool, ServiceError> {
        self.check(&self.fail_deletes, "delete")?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|m| !pred(m));
        Ok(rows.len() < before)
    }
}

pub type MemoryEventRepository = MemoryTable<event::Model>;
pub type MemoryActivityRepository = MemoryTable<activity::Model>;
pub type MemoryGalleryRepository = MemoryTable<gallery_image::Model>;

#[async_trait]
impl EventRepository for MemoryTable<event::Model> {
    async fn list(&self, filter: Option<EventDisplay>) -> Result<Vec<event::Model>, ServiceError> {
        let mut rows: Vec<_> = self
            .raw()
            .await
            .into_iter()
            .filter(|r| filter.map_or(true, |f| r.display_on.selected_by(f)))
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<event::Model>, ServiceError> {
        Ok(self.find_by(|r| r.id == id).await)
    }

    async fn create(&self, input: NewEvent) -> Result<event::Model, ServiceError> {
        event::validate_new(&input)?;
        self.push(event::Model {
            id: Uuid::new_v4(),
            title: input.title,
            date: input.date,
            time: input.time,
            venue: input.venue,
            description: input.description,
            display_on: input.display_on,
            image_path: blank_to_none(input.image_path),
            created_at: Utc::now().into(),
        })
        .await
    }

    async fn update(&self, id: Uuid, patch: EventPatch, image_path: Option<String>) -> Result<event::Model, ServiceError> {
        event::validate_patch(&patch)?;
        self.modify(|r| r.id == id, |r| {
            if let Some(v) = patch.title { r.title = v; }
            if let Some(v) = patch.date { r.date = v; }
            if let Some(v) = patch.time { r.time = v; }
            if let Some(v) = patch.venue { r.venue = v; }
            if let Some(v) = patch.description { r.description = v; }
            if let Some(v) = patch.display_on { r.display_on = v; }
            if let Some(v) = image_path { r.image_path = Some(v); }
        }, "event")
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.remove(|r| r.id == id).await
    }
}

#[async_trait]
impl ActivityRepository for MemoryTable<activity::Model> {
    async fn list(&self, filter: Option<ActivityDisplay>) -> Result<Vec<activity::Model>, ServiceError> {
        let mut rows: Vec<_> = self
            .raw()
            .await
            .into_iter()
            .filter(|r| filter.map_or(true, |f| r.display_on.selected_by(f)))
            .collect();
        rows.reverse();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<activity::Model>, ServiceError> {
        Ok(self.find_by(|r| r.id == id).await)
    }

    async fn create(&self, input: NewActivity) -> Result<activity::Model, ServiceError> {
        activity::validate_new(&input)?;
        self.push(activity::Model {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            display_on: input.display_on,
            image_path: blank_to_none(input.image_path),
            created_at: Utc::now().into(),
        })
        .await
    }

    async fn update(&self, id: Uuid, patch: ActivityPatch, image_path: Option<String>) -> Result<activity::Model, ServiceError> {
        activity::validate_patch(&patch)?;
        self.modify(|r| r.id == id, |r| {
            if let Some(v) = patch.title { r.title = v; }
            if let Some(v) = patch.description { r.description = v; }
            if let Some(v) = patch.display_on { r.display_on = v; }
            if let Some(v) = image_path { r.image_path = Some(v); }
        }, "activity")
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.remove(|r| r.id == id).await
    }
}

#[async_trait]
impl GalleryRepository for MemoryTable<gallery_image::Model> {
    async fn list(&self, category: Option<GalleryCategory>) -> Result<Vec<gallery_image::Model>, ServiceError> {
        let mut rows: Vec<_> = self
            .raw()
            .await
            .into_iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .collect();
        rows.reverse();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<gallery_image::Model>, ServiceError> {
        Ok(self.find_by(|r| r.id == id).await)
    }

    async fn create(&self, input: NewGalleryImage) -> Result<gallery_image::Model, ServiceError> {
        gallery_image::validate_new(&input)?;
        self.push(gallery_image::Model {
            id: Uuid::new_v4(),
            category: input.category,
            title: blank_to_none(input.title),
            alt_text: blank_to_none(input.alt_text),
            image_path: input.image_path,
            created_at: Utc::now().into(),
        })
        .await
    }

    async fn update(&self, id: Uuid, patch: GalleryImagePatch, image_path: Option<String>) -> Result<gallery_image::Model, ServiceError> {
        gallery_image::validate_patch(&patch)?;
        self.modify(|r| r.id == id, |r| {
            if let Some(v) = patch.category { r.category = v; }
            if let Some(v) = patch.title { r.title = blank_to_none(Some(v)); }
            if let Some(v) = patch.alt_text { r.alt_text = blank_to_none(Some(v)); }
            if let Some(v) = image_path { r.image_path = v; }
        }, "gallery image")
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.remove(|r| r.id == id).await
    }
}
