//! Response envelope
//!
//! Wraps either a success payload or an error payload, plus optional paging
//! metadata. Absent members are omitted from the JSON.

use serde::Serialize;
use tm_core::task::PageInfo;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl<T: Serialize> ServiceResponse<T> {
    /// Envelope for a query result with paging metadata.
    pub fn query_response(data: T, paging: PageInfo) -> Self {
        Self {
            paging: Some(paging),
            error: None,
            data: Some(data),
        }
    }
}

impl ServiceResponse<()> {
    /// Envelope for a failed request.
    pub fn failed(error: ErrorResponse) -> Self {
        Self {
            paging: None,
            error: Some(error),
            data: None,
        }
    }
}
