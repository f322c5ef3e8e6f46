use poem_openapi::Object;

use crate::stores::PageRequest;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Generic success message
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Paging and free-text query parameters as sent by a data grid
///
/// Absent or negative skip/take fall back to 0/10 server-side.
#[derive(Object, Debug, Default)]
pub struct GridQuery {
    /// Rows to skip before the page starts
    pub skip: Option<i64>,

    /// Page size
    pub take: Option<i64>,

    /// Free-text search value
    pub search: Option<String>,
}

impl GridQuery {
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(self.skip, self.take, self.search.clone())
    }
}
