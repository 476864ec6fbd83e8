//! Gallery route handlers.
//!
//! Every success body is `{message, data}`. Malformed JSON bodies are turned
//! into `400` responses through [`AppError`]'s `JsonRejection` conversion.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use gallerist_core::{Error, GalleryId};
use gallerist_db::models::Gallery;

use crate::context::AppContext;
use crate::error::AppError;
use crate::service;

/// Request body for creating a gallery.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateGalleryRequest {
    pub title: Option<String>,
    /// Remote image URLs or inline `data:` URIs.
    pub images: Option<Vec<String>>,
}

/// Request body for appending images to a gallery.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AppendImagesRequest {
    pub images: Option<Vec<String>>,
}

/// Request body for removing images from a gallery.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveImagesRequest {
    pub gallery_id: Option<String>,
    pub images_to_delete: Option<Vec<String>>,
}

/// Gallery as exposed to clients.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GalleryResponse {
    pub id: String,
    pub title: String,
    /// Hosted image URLs in display order.
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl GalleryResponse {
    fn from_model(gallery: &Gallery) -> Self {
        Self {
            id: gallery.id.to_string(),
            title: gallery.title.clone(),
            images: gallery.image_urls(),
            created_at: gallery.created_at.clone(),
            updated_at: gallery.updated_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GalleryEnvelope {
    pub message: String,
    pub data: GalleryResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GalleryListEnvelope {
    pub message: String,
    pub data: Vec<GalleryResponse>,
}

fn envelope(message: &str, gallery: &Gallery) -> Json<GalleryEnvelope> {
    Json(GalleryEnvelope {
        message: message.to_string(),
        data: GalleryResponse::from_model(gallery),
    })
}

/// POST /api/galleries
#[utoipa::path(
    post,
    path = "/api/galleries",
    request_body = CreateGalleryRequest,
    responses(
        (status = 201, description = "Gallery created", body = GalleryEnvelope),
        (status = 400, description = "Missing title or images"),
        (status = 500, description = "Upload or store failure")
    )
)]
pub async fn create_gallery(
    State(ctx): State<AppContext>,
    payload: Result<Json<CreateGalleryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let gallery = service::create_gallery(&ctx, payload.title, payload.images).await?;
    Ok((StatusCode::CREATED, envelope("success", &gallery)))
}

/// GET /api/galleries
#[utoipa::path(
    get,
    path = "/api/galleries",
    responses(
        (status = 200, description = "All galleries", body = GalleryListEnvelope)
    )
)]
pub async fn list_galleries(
    State(ctx): State<AppContext>,
) -> Result<Json<GalleryListEnvelope>, AppError> {
    let galleries = service::list_galleries(&ctx)?;
    Ok(Json(GalleryListEnvelope {
        message: "success".into(),
        data: galleries.iter().map(GalleryResponse::from_model).collect(),
    }))
}

/// GET /api/galleries/{id}
#[utoipa::path(
    get,
    path = "/api/galleries/{id}",
    params(("id" = String, Path, description = "Gallery ID")),
    responses(
        (status = 200, description = "Gallery details", body = GalleryEnvelope),
        (status = 404, description = "Gallery not found")
    )
)]
pub async fn get_gallery(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<GalleryEnvelope>, AppError> {
    // No gallery can have an id that is not a UUID.
    let gallery_id: GalleryId = id.parse().map_err(|_| Error::not_found("gallery", &id))?;
    let gallery = service::get_gallery(&ctx, gallery_id)?;
    Ok(envelope("success", &gallery))
}

/// PATCH /api/galleries/{id}/images
#[utoipa::path(
    patch,
    path = "/api/galleries/{id}/images",
    params(("id" = String, Path, description = "Gallery ID")),
    request_body = AppendImagesRequest,
    responses(
        (status = 200, description = "Images appended", body = GalleryEnvelope),
        (status = 400, description = "Missing images or malformed ID"),
        (status = 404, description = "Gallery not found"),
        (status = 500, description = "Upload or store failure")
    )
)]
pub async fn append_images(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    payload: Result<Json<AppendImagesRequest>, JsonRejection>,
) -> Result<Json<GalleryEnvelope>, AppError> {
    let gallery_id = service::parse_gallery_id(Some(&id))?;
    let Json(payload) = payload?;
    let gallery = service::append_images_to_gallery(&ctx, gallery_id, payload.images).await?;
    Ok(envelope("success", &gallery))
}

/// PATCH /api/galleries
#[utoipa::path(
    patch,
    path = "/api/galleries",
    request_body = RemoveImagesRequest,
    responses(
        (status = 200, description = "Images removed", body = GalleryEnvelope),
        (status = 400, description = "Missing gallery ID or deletion set"),
        (status = 404, description = "Gallery not found")
    )
)]
pub async fn remove_images(
    State(ctx): State<AppContext>,
    payload: Result<Json<RemoveImagesRequest>, JsonRejection>,
) -> Result<Json<GalleryEnvelope>, AppError> {
    let Json(payload) = payload?;
    let gallery = service::remove_images_from_gallery(
        &ctx,
        payload.gallery_id.as_deref(),
        payload.images_to_delete,
    )
    .await?;
    Ok(envelope("Images deleted successfully", &gallery))
}
