//! Response bodies for the `/todos` routes.
//!
//! Field names are camelCase on the wire, matching the item model.

use serde::Serialize;
use todo_db::models::todo::TodoItem;

/// `{ "item": ... }`. The item is `null` when an update matched nothing.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T: Serialize> {
    pub item: T,
}

/// `{ "items": [...], "nextKey": "..." | null }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub items: Vec<TodoItem>,
    pub next_key: Option<String>,
}

/// `{ "uploadUrl": "..." }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
}

/// `{ "attachmentUrl": "..." }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub attachment_url: String,
}
