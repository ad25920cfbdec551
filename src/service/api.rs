use super::protocol::{
    CategoryYearsRequest, LaureateCountResponse, LaureateDetailsResponse, LaureateNameRequest,
    MotivationKeywordRequest,
};
use crate::error::CallError;
use async_trait::async_trait;

/// The three laureate queries, as seen by any caller.
///
/// Implemented once in-process (`LocalService`) and once over HTTP
/// (`RemoteService`). Both bindings share validation and business rules; the
/// remote one only adds serialization, deadlines and transport failures.
#[async_trait]
pub trait LaureateService: Send + Sync {
    async fn count_laureates_by_category_and_years(
        &self,
        request: CategoryYearsRequest,
    ) -> Result<LaureateCountResponse, CallError>;

    async fn count_laureates_by_motivation_keyword(
        &self,
        request: MotivationKeywordRequest,
    ) -> Result<LaureateCountResponse, CallError>;

    async fn get_laureate_details_by_name(
        &self,
        request: LaureateNameRequest,
    ) -> Result<LaureateDetailsResponse, CallError>;
}
