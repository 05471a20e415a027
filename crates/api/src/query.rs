//! Query parameter types for API handlers.

use serde::Deserialize;
use todo_core::todo::{parse_page_size, SortField};

use crate::error::AppResult;

/// Query parameters for `GET /todos` (`?limit=&nextKey=&orderBy=`).
///
/// Values arrive as raw strings so malformed input is reported with the
/// project's JSON error body instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosQuery {
    pub limit: Option<String>,
    pub next_key: Option<String>,
    pub order_by: Option<String>,
}

impl ListTodosQuery {
    pub fn page_size(&self) -> AppResult<u32> {
        Ok(parse_page_size(self.limit.as_deref().unwrap_or(""))?)
    }

    pub fn sort(&self) -> AppResult<SortField> {
        Ok(SortField::parse(self.order_by.as_deref().unwrap_or(""))?)
    }

    /// The resumption token, treating an empty `nextKey` as the first page.
    pub fn cursor(&self) -> Option<String> {
        self.next_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}
