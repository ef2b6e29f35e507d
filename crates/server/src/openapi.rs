use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `image_path` is always a directly fetchable URL.
#[derive(ToSchema)]
pub struct EventDoc {
    pub id: Uuid,
    pub title: String,
    #[schema(value_type = String, format = Date)]
    pub date: String,
    pub time: String,
    pub venue: String,
    pub description: String,
    #[schema(example = "home")]
    pub display_on: String,
    pub image_path: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct ActivityDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(example = "activities")]
    pub display_on: String,
    pub image_path: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct GalleryImageDoc {
    pub id: Uuid,
    #[schema(example = "community")]
    pub category: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub image_path: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

/// Multipart form. On update every field is optional.
#[derive(ToSchema)]
pub struct EventFormDoc {
    pub title: String,
    #[schema(value_type = String, format = Date)]
    pub date: String,
    pub time: String,
    pub venue: String,
    pub description: String,
    pub display_on: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct ActivityFormDoc {
    pub title: String,
    pub description: String,
    pub display_on: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

/// `image` is required on create. Empty `title`/`alt_text` on update clears them.
#[derive(ToSchema)]
pub struct GalleryFormDoc {
    pub category: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct BulkDeleteRequestDoc { pub ids: Vec<Uuid> }

#[derive(ToSchema)]
pub struct BulkDeleteOutcomeDoc {
    pub id: Uuid,
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::events::list,
        crate::routes::events::get,
        crate::routes::events::create,
        crate::routes::events::update,
        crate::routes::events::delete,
        crate::routes::activities::list,
        crate::routes::activities::get,
        crate::routes::activities::create,
        crate::routes::activities::update,
        crate::routes::activities::delete,
        crate::routes::gallery::list,
        crate::routes::gallery::get,
        crate::routes::gallery::create,
        crate::routes::gallery::update,
        crate::routes::gallery::delete,
        crate::routes::gallery::bulk_delete,
    ),
    components(
        schemas(
            HealthResponse,
            EventDoc,
            ActivityDoc,
            GalleryImageDoc,
            EventFormDoc,
            ActivityFormDoc,
            GalleryFormDoc,
            BulkDeleteRequestDoc,
            BulkDeleteOutcomeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "events"),
        (name = "activities"),
        (name = "gallery")
    )
)]
pub struct ApiDoc;
