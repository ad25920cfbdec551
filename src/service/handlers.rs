use super::protocol::{
    CategoryYearsRequest, DEADLINE_HEADER, LaureateCountResponse, LaureateDetailsResponse,
    LaureateNameRequest, MotivationKeywordRequest,
};
use super::server::AppState;
use crate::error::{Code, Status};
use crate::search::snapshot::SnapshotStats;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

pub type RpcResult<T> = Result<Json<T>, (StatusCode, Json<Status>)>;

pub async fn handle_count_by_category_and_years(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CategoryYearsRequest>, JsonRejection>,
) -> RpcResult<LaureateCountResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    tracing::debug!(
        "CountLaureatesByCategoryAndYears {} {}..={}",
        request.category,
        request.start_year,
        request.end_year
    );
    dispatch(&state, &headers, "CountLaureatesByCategoryAndYears", async {
        state.service.count_by_category_and_years(&request)
    })
    .await
}

pub async fn handle_count_by_motivation_keyword(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<MotivationKeywordRequest>, JsonRejection>,
) -> RpcResult<LaureateCountResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    tracing::debug!("CountLaureatesByMotivationKeyword {:?}", request.keyword);
    dispatch(&state, &headers, "CountLaureatesByMotivationKeyword", async {
        state.service.count_by_motivation_keyword(&request)
    })
    .await
}

pub async fn handle_details_by_name(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<LaureateNameRequest>, JsonRejection>,
) -> RpcResult<LaureateDetailsResponse> {
    let Json(request) = payload.map_err(reject_payload)?;
    tracing::debug!(
        "GetLaureateDetailsByName {:?} {:?}",
        request.firstname,
        request.surname
    );
    dispatch(&state, &headers, "GetLaureateDetailsByName", async {
        state.service.details_by_name(&request)
    })
    .await
}

pub async fn handle_stats(State(state): State<Arc<AppState>>) -> RpcResult<SnapshotStats> {
    match state.service.snapshots().current() {
        Ok(snapshot) => Ok(Json(snapshot.stats())),
        Err(e) => Err(into_response(Status::from(e))),
    }
}

/// Runs one query under a worker permit and the call's deadline.
async fn dispatch<T, F>(
    state: &AppState,
    headers: &HeaderMap,
    operation: &'static str,
    query: F,
) -> RpcResult<T>
where
    F: Future<Output = Result<T, Status>>,
{
    let request_id = uuid::Uuid::new_v4();
    let deadline = state.config.effective_timeout(requested_deadline(headers));
    let span = tracing::info_span!("rpc", %request_id, operation);

    let work = async {
        let _permit = state
            .limiter
            .acquire()
            .await
            .map_err(|_| Status::internal("worker pool is shut down"))?;
        query.await
    };

    match tokio::time::timeout(deadline, work).instrument(span).await {
        Ok(Ok(response)) => Ok(Json(response)),
        Ok(Err(status)) => Err(into_response(status)),
        Err(_) => {
            tracing::warn!(
                "{} {} exceeded its {:?} deadline",
                operation,
                request_id,
                deadline
            );
            Err(into_response(Status::new(
                Code::DeadlineExceeded,
                format!("deadline of {} ms exceeded", deadline.as_millis()),
            )))
        }
    }
}

fn requested_deadline(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(DEADLINE_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn reject_payload(rejection: JsonRejection) -> (StatusCode, Json<Status>) {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    into_response(Status::invalid_argument(rejection.body_text()))
}

pub fn http_status(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
    }
}

fn into_response(status: Status) -> (StatusCode, Json<Status>) {
    (http_status(status.code), Json(status))
}
