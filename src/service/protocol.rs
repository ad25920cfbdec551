//! Service Wire Protocol
//!
//! Defines the endpoints and Data Transfer Objects shared by the in-process
//! binding, the HTTP handlers and the remote client. Failures travel as a
//! serialized `Status` (`{"code": "INVALID_ARGUMENT", "message": "..."}`).

use crate::search::types::AwardDetail;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

pub const ENDPOINT_COUNT_BY_CATEGORY_AND_YEARS: &str = "/rpc/CountLaureatesByCategoryAndYears";
pub const ENDPOINT_COUNT_BY_MOTIVATION_KEYWORD: &str = "/rpc/CountLaureatesByMotivationKeyword";
pub const ENDPOINT_DETAILS_BY_NAME: &str = "/rpc/GetLaureateDetailsByName";
/// Snapshot statistics, for operators.
pub const ENDPOINT_STATS: &str = "/health/stats";

/// Caller's wall-clock budget for one call, in milliseconds.
pub const DEADLINE_HEADER: &str = "x-deadline-ms";

pub const MESSAGE_SUCCESS: &str = "Success";
pub const MESSAGE_NO_PRIZES: &str = "No prizes found";

// --- Data Transfer Objects ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryYearsRequest {
    pub category: String,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationKeywordRequest {
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaureateNameRequest {
    pub firstname: String,
    pub surname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaureateCountResponse {
    pub count: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaureateDetailsResponse {
    pub details: Vec<LaureateDetail>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaureateDetail {
    pub year: i32,
    pub category: String,
    pub motivation: String,
}

impl From<AwardDetail> for LaureateDetail {
    fn from(detail: AwardDetail) -> Self {
        Self {
            year: detail.year,
            category: detail.category,
            motivation: detail.motivation,
        }
    }
}
