//! Previous/next navigation over `nextKey` pagination.
//!
//! The API only moves forward. Going back means replaying the key that
//! produced an earlier page, so the pager keeps a stack of the keys it has
//! followed. The first page has no key.

use crate::api::ClientError;
use crate::types::{ListParams, SortOrder};

/// Page sizes offered to users.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [3, 6, 9];

pub const DEFAULT_PAGE_SIZE: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    limit: u32,
    order_by: SortOrder,
    /// Keys followed to reach the current page, oldest first.
    followed: Vec<String>,
    /// Key for the page after the current one, once known.
    next_key: Option<String>,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            order_by: SortOrder::default(),
            followed: Vec::new(),
            next_key: None,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn order_by(&self) -> SortOrder {
        self.order_by
    }

    /// 1-based index of the current page.
    pub fn page_number(&self) -> usize {
        self.followed.len() + 1
    }

    /// Query for the current page.
    pub fn params(&self) -> ListParams {
        ListParams {
            limit: self.limit,
            next_key: self.followed.last().cloned(),
            order_by: Some(self.order_by),
        }
    }

    /// Record the `nextKey` returned for the current page.
    pub fn record(&mut self, next_key: Option<String>) {
        self.next_key = next_key.filter(|key| !key.is_empty());
    }

    pub fn has_next(&self) -> bool {
        self.next_key.is_some()
    }

    pub fn has_previous(&self) -> bool {
        !self.followed.is_empty()
    }

    /// Advance to the next page. Returns `false` on the last page.
    pub fn next(&mut self) -> bool {
        match self.next_key.take() {
            Some(key) => {
                self.followed.push(key);
                true
            }
            None => false,
        }
    }

    /// Step back one page. Returns `false` on the first page.
    pub fn previous(&mut self) -> bool {
        if self.followed.pop().is_none() {
            return false;
        }
        self.next_key = None;
        true
    }

    /// Change the page size and return to the first page.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), ClientError> {
        if !PAGE_SIZE_OPTIONS.contains(&limit) {
            return Err(ClientError::InvalidPageSize(limit));
        }
        self.limit = limit;
        self.reset();
        Ok(())
    }

    /// Change the listing order and return to the first page.
    pub fn set_order(&mut self, order_by: SortOrder) {
        self.order_by = order_by;
        self.reset();
    }

    /// Return to the first page, e.g. after creating an item.
    pub fn reset(&mut self) {
        self.followed.clear();
        self.next_key = None;
    }
}
