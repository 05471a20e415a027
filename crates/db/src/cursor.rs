//! Opaque page cursor (`nextKey`).
//!
//! A cursor records the keys of the last item on a page: the owner, the item
//! id and the value of the sort key the page was ordered by. It travels as
//! URL-safe base64 of a small JSON document. Clients never look inside; only
//! the store implementations in this crate encode and decode it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use todo_core::todo::SortField;
use todo_core::types::{DueDate, Timestamp, TodoId, UserId};

use crate::models::todo::TodoItem;
use crate::store::StoreError;

/// Sort-key value of the last item on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "at")]
pub enum CursorPosition {
    #[serde(rename = "createdAt")]
    CreatedAt(Timestamp),
    #[serde(rename = "dueDate")]
    DueDate(Option<DueDate>),
}

impl CursorPosition {
    pub fn sort_field(&self) -> SortField {
        match self {
            Self::CreatedAt(_) => SortField::CreatedAt,
            Self::DueDate(_) => SortField::DueDate,
        }
    }
}

/// Resumption point of a paged listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    #[serde(rename = "u")]
    pub user_id: UserId,
    #[serde(rename = "t")]
    pub todo_id: TodoId,
    #[serde(rename = "k")]
    pub position: CursorPosition,
}

impl PageCursor {
    /// Cursor pointing just past `item` in the given order.
    pub fn after(item: &TodoItem, sort: SortField) -> Self {
        let position = match sort {
            SortField::CreatedAt => CursorPosition::CreatedAt(item.created_at),
            SortField::DueDate => CursorPosition::DueDate(item.due_date),
        };
        Self {
            user_id: item.user_id.clone(),
            todo_id: item.todo_id,
            position,
        }
    }

    pub fn encode(&self) -> String {
        // Serializing plain strings, uuids and chrono values cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(token: &str) -> Result<Self, StoreError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| StoreError::InvalidCursor("not a valid page token".into()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| StoreError::InvalidCursor("not a valid page token".into()))
    }

    /// Decode `token` and check it belongs to this caller and sort order.
    pub fn decode_for(token: &str, user_id: &str, sort: SortField) -> Result<Self, StoreError> {
        let cursor = Self::decode(token)?;
        if cursor.user_id != user_id {
            return Err(StoreError::InvalidCursor(
                "page token was issued to another user".into(),
            ));
        }
        if cursor.position.sort_field() != sort {
            return Err(StoreError::InvalidCursor(format!(
                "page token was issued for orderBy={}",
                cursor.position.sort_field().as_str()
            )));
        }
        Ok(cursor)
    }
}
