//! To-do listing options and field validation.
//!
//! Provides the sort-field selector used by paged listing, page-size parsing
//! with defaults and bounds, and the name rule applied on create and update.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Maximum length of a to-do name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Wire name of the creation-time sort order.
pub const SORT_CREATED_AT: &str = "createdAt";

/// Wire name of the due-date sort order.
pub const SORT_DUE_DATE: &str = "dueDate";

// ---------------------------------------------------------------------------
// Sort field
// ---------------------------------------------------------------------------

/// Secondary index a listing is ordered by. Both orders are descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "dueDate")]
    DueDate,
}

impl SortField {
    /// Parse the `orderBy` query value. An empty value selects the default.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "" | SORT_CREATED_AT => Ok(Self::CreatedAt),
            SORT_DUE_DATE => Ok(Self::DueDate),
            other => Err(CoreError::Validation(format!(
                "Invalid orderBy '{other}'. Must be one of: {SORT_CREATED_AT}, {SORT_DUE_DATE}"
            ))),
        }
    }

    /// Wire name of this sort order.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => SORT_CREATED_AT,
            Self::DueDate => SORT_DUE_DATE,
        }
    }
}

// ---------------------------------------------------------------------------
// Page size
// ---------------------------------------------------------------------------

/// Parse the `limit` query value.
///
/// An empty value selects [`DEFAULT_PAGE_SIZE`]; anything that is not an
/// integer in `1..=MAX_PAGE_SIZE` is rejected.
pub fn parse_page_size(value: &str) -> Result<u32, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_PAGE_SIZE);
    }

    let size: u32 = value
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid limit '{value}'. Must be an integer")))?;

    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(CoreError::Validation(format!(
            "Invalid limit {size}. Must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(size)
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a to-do name: non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
