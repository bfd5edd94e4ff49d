//! Query and paging types

use serde::{Deserialize, Serialize};

use super::model::TaskStatus;

/// Sort direction for the list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Desc
    }
}

/// Search criteria for the list operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub page: u64,
    pub size: u64,
    pub status: Option<TaskStatus>,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: 25,
            status: None,
            sort_by: "dueDate".to_string(),
            sort_direction: SortDirection::Desc,
        }
    }
}

/// Page window handed to the store gateway.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl From<&QueryParams> for PageRequest {
    fn from(query: &QueryParams) -> Self {
        Self {
            page: query.page,
            size: query.size,
            sort_by: query.sort_by.clone(),
            direction: query.sort_direction,
        }
    }
}

/// Pagination state returned alongside a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_elements: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub number_of_elements: u64,
}

impl PageInfo {
    /// Compute page metadata for a total count and the requested window.
    ///
    /// `number_of_elements` is 0 for an empty result set, otherwise what
    /// remains of the window; a page past the end also yields 0.
    pub fn of(total_elements: u64, query: &QueryParams) -> Self {
        let size = query.size.max(1);
        let number_of_elements = if total_elements == 0 {
            0
        } else {
            size.min(total_elements.saturating_sub(query.page * size))
        };
        Self {
            total_elements,
            page_size: query.size,
            total_pages: total_elements.div_ceil(size),
            current_page: query.page,
            number_of_elements,
        }
    }
}
