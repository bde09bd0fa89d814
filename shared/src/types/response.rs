//! Unified error response structure for API boundaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unified error response returned at service boundaries
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: HashMap<String, serde_json::Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}
