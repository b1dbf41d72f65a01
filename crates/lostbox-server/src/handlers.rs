//! Request handlers for the lostbox REST API.
//!
//! Handlers parse and validate the HTTP shape of a request (path ids,
//! JSON bodies, multipart uploads), delegate to the lifecycle service,
//! and render its results. All lifecycle rules live in `lostbox-core`;
//! nothing here mutates a store directly.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use lostbox_core::{ImageUpload, ItemFilter, LifecycleService, NewItem};
use lostbox_types::{BlobKey, Item, ItemId, List, ListId};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;

pub type AppState = Arc<LifecycleService>;

// -- Request / response bodies ---------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateListBody {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameListBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// `?live=true` filters to items that are not soft-deleted (the
    /// public view); the default owner view includes everything.
    pub live: Option<bool>,
}

/// An item as rendered over HTTP: the stored blob key becomes a servable
/// `imageUrl`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub id: ItemId,
    pub list_id: ListId,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Item> for ItemBody {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            list_id: item.list_id,
            comment: item.comment,
            image_url: item.image_key.map(|key| format!("/api/images/{key}")),
            created_at: item.created_at,
            deleted_at: item.deleted_at,
        }
    }
}

// -- Path parsing ------------------------------------------------------------

/// A malformed list id cannot name any list, so it reads as 404 rather
/// than a parse error.
fn parse_list_id(raw: &str) -> Result<ListId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("List not found"))
}

fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Item not found"))
}

// -- List handlers -----------------------------------------------------------

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_list(
    State(service): State<AppState>,
    body: Option<Json<CreateListBody>>,
) -> Result<impl IntoResponse, ApiError> {
    let name = body.and_then(|Json(b)| b.name);
    let list = service.create_list(name)?;
    Ok(Json(json!({ "id": list.id })))
}

pub async fn all_lists(State(service): State<AppState>) -> Result<Json<Vec<List>>, ApiError> {
    Ok(Json(service.all_lists()?))
}

pub async fn get_list(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<List>, ApiError> {
    let id = parse_list_id(&id)?;
    Ok(Json(service.get_list(id)?))
}

pub async fn rename_list(
    State(service): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RenameListBody>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_list_id(&id)?;
    let list = service.rename_list(id, &body.name)?;
    Ok(Json(json!({ "id": list.id, "name": list.name })))
}

pub async fn delete_list(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_list_id(&id)?;
    service.delete_list(id)?;
    Ok(Json(json!({ "success": true })))
}

// -- Item handlers -----------------------------------------------------------

pub async fn list_items(
    State(service): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<Vec<ItemBody>>, ApiError> {
    let id = parse_list_id(&id)?;
    let filter = if query.live == Some(true) {
        ItemFilter::LiveOnly
    } else {
        ItemFilter::All
    };
    let items = service.list_items(id, filter)?;
    Ok(Json(items.into_iter().map(ItemBody::from).collect()))
}

pub async fn register_item(
    State(service): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ItemBody>, ApiError> {
    let id = parse_list_id(&id)?;
    let input = read_registration(multipart).await?;
    let item = service.register_item(id, input)?;
    Ok(Json(item.into()))
}

/// Pull `comment` and `image` out of the multipart form. An empty file
/// field (a file input submitted with nothing selected) counts as no
/// image.
async fn read_registration(mut multipart: Multipart) -> Result<NewItem, ApiError> {
    let invalid = |_| ApiError::bad_request("Invalid upload body");
    let mut input = NewItem::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        match field.name() {
            Some("comment") => {
                input.comment = Some(field.text().await.map_err(invalid)?);
            }
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(invalid)?;
                if data.is_empty() {
                    continue;
                }
                input.image = Some(ImageUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }
    Ok(input)
}

pub async fn update_comment(
    State(service): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
    Json(body): Json<CommentBody>,
) -> Result<Json<ItemBody>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let item_id = parse_item_id(&item_id)?;
    let item = service.update_comment(list_id, item_id, &body.comment)?;
    Ok(Json(item.into()))
}

pub async fn soft_delete_item(
    State(service): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let item_id = parse_item_id(&item_id)?;
    service.soft_delete(list_id, item_id)?;
    Ok(Json(json!({ "success": true })))
}

pub async fn restore_item(
    State(service): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let item_id = parse_item_id(&item_id)?;
    service.restore(list_id, item_id)?;
    Ok(Json(json!({ "success": true })))
}

// -- Image serving -----------------------------------------------------------

pub async fn get_image(
    State(service): State<AppState>,
    Path((list_id, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let key = BlobKey::from_segments(&list_id, &name)
        .map_err(|_| ApiError::bad_request("Invalid image key"))?;
    let blob = service.fetch_image(&key)?;
    let content_type = blob
        .content_type
        .unwrap_or_else(|| "image/jpeg".to_string());
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000".to_string(),
            ),
        ],
        blob.data,
    ))
}
