use super::api::LaureateService;
use super::protocol::{
    CategoryYearsRequest, LaureateCountResponse, LaureateDetailsResponse, LaureateNameRequest,
    MESSAGE_NO_PRIZES, MESSAGE_SUCCESS, MotivationKeywordRequest,
};
use crate::config::YearBounds;
use crate::error::{CallError, Code, QueryError, Status};
use crate::search::engine::QueryEngine;
use crate::search::snapshot::SnapshotHandle;
use crate::search::types::{Category, FullName, Keyword, YearRange};
use crate::storage::memory::RecordStore;
use async_trait::async_trait;
use std::sync::Arc;

/// In-process binding: validates requests and runs them against the current snapshot.
#[derive(Debug, Clone)]
pub struct LocalService {
    snapshots: Arc<SnapshotHandle>,
    bounds: YearBounds,
}

impl LocalService {
    pub fn new(snapshots: Arc<SnapshotHandle>, bounds: YearBounds) -> Self {
        Self { snapshots, bounds }
    }

    pub fn from_store(store: RecordStore, bounds: YearBounds) -> Self {
        Self::new(Arc::new(SnapshotHandle::new(store)), bounds)
    }

    pub fn snapshots(&self) -> &Arc<SnapshotHandle> {
        &self.snapshots
    }

    fn engine(&self) -> Result<QueryEngine, Status> {
        let snapshot = self.snapshots.current().map_err(|e| fault("snapshot", e))?;
        Ok(QueryEngine::new(snapshot))
    }

    pub fn count_by_category_and_years(
        &self,
        request: &CategoryYearsRequest,
    ) -> Result<LaureateCountResponse, Status> {
        // Range first: a reversed range is rejected whatever the category says.
        let range = YearRange::new(request.start_year, request.end_year, &self.bounds)
            .map_err(|e| rejected("CountLaureatesByCategoryAndYears", e))?;
        let category: Category = request
            .category
            .parse()
            .map_err(|e| rejected("CountLaureatesByCategoryAndYears", e))?;

        let count = self
            .engine()?
            .count_by_category_and_years(category, range)
            .map_err(|e| fault("CountLaureatesByCategoryAndYears", e))?;

        Ok(LaureateCountResponse {
            count,
            message: MESSAGE_SUCCESS.to_string(),
        })
    }

    pub fn count_by_motivation_keyword(
        &self,
        request: &MotivationKeywordRequest,
    ) -> Result<LaureateCountResponse, Status> {
        let keyword = Keyword::parse(&request.keyword)
            .map_err(|e| rejected("CountLaureatesByMotivationKeyword", e))?;

        let count = self
            .engine()?
            .count_by_motivation_keyword(&keyword)
            .map_err(|e| fault("CountLaureatesByMotivationKeyword", e))?;

        Ok(LaureateCountResponse {
            count,
            message: MESSAGE_SUCCESS.to_string(),
        })
    }

    pub fn details_by_name(
        &self,
        request: &LaureateNameRequest,
    ) -> Result<LaureateDetailsResponse, Status> {
        let name = FullName::parse(&request.firstname, &request.surname)
            .map_err(|e| rejected("GetLaureateDetailsByName", e))?;

        let details = self
            .engine()?
            .details_by_name(&name)
            .map_err(|e| fault("GetLaureateDetailsByName", e))?;

        let message = if details.is_empty() {
            MESSAGE_NO_PRIZES
        } else {
            MESSAGE_SUCCESS
        };
        Ok(LaureateDetailsResponse {
            details: details.into_iter().map(Into::into).collect(),
            message: message.to_string(),
        })
    }
}

fn rejected(operation: &str, err: QueryError) -> Status {
    tracing::warn!("{} rejected: {}", operation, err);
    err.into()
}

fn fault(operation: &str, err: QueryError) -> Status {
    let status: Status = err.into();
    if status.code == Code::Internal {
        tracing::error!("{} failed: {}", operation, status.message);
    }
    status
}

#[async_trait]
impl LaureateService for LocalService {
    async fn count_laureates_by_category_and_years(
        &self,
        request: CategoryYearsRequest,
    ) -> Result<LaureateCountResponse, CallError> {
        Ok(self.count_by_category_and_years(&request)?)
    }

    async fn count_laureates_by_motivation_keyword(
        &self,
        request: MotivationKeywordRequest,
    ) -> Result<LaureateCountResponse, CallError> {
        Ok(self.count_by_motivation_keyword(&request)?)
    }

    async fn get_laureate_details_by_name(
        &self,
        request: LaureateNameRequest,
    ) -> Result<LaureateDetailsResponse, CallError> {
        Ok(self.details_by_name(&request)?)
    }
}
