use super::api::LaureateService;
use super::protocol::{
    CategoryYearsRequest, DEADLINE_HEADER, ENDPOINT_COUNT_BY_CATEGORY_AND_YEARS,
    ENDPOINT_COUNT_BY_MOTIVATION_KEYWORD, ENDPOINT_DETAILS_BY_NAME, LaureateCountResponse,
    LaureateDetailsResponse, LaureateNameRequest, MotivationKeywordRequest,
};
use crate::config::ClientConfig;
use crate::error::{CallError, Code, Status};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;

/// Network binding of `LaureateService`.
///
/// Every call carries the configured timeout, both as the local request
/// timeout and in the deadline header for the server. Failed calls are never
/// retried here.
#[derive(Debug, Clone)]
pub struct RemoteService {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl RemoteService {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    async fn call<Req, Resp>(&self, endpoint: &str, payload: &Req) -> Result<Resp, CallError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let started = Instant::now();

        let response = self
            .http_client
            .post(url)
            .header(DEADLINE_HEADER, self.config.timeout.as_millis().to_string())
            .json(payload)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| classify(e, started))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| classify(e, started))?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| CallError::Malformed {
                message: format!("cannot decode {} response: {}", endpoint, e),
            });
        }

        match serde_json::from_slice::<Status>(&body) {
            Ok(answer) if answer.code == Code::DeadlineExceeded => Err(CallError::Timeout {
                elapsed: started.elapsed(),
            }),
            Ok(answer) => Err(CallError::Status(answer)),
            Err(_) => Err(CallError::Malformed {
                message: format!("unexpected HTTP {} from {}", status, endpoint),
            }),
        }
    }
}

fn classify(err: reqwest::Error, started: Instant) -> CallError {
    if err.is_timeout() {
        CallError::Timeout {
            elapsed: started.elapsed(),
        }
    } else if err.is_decode() || err.is_body() {
        CallError::Malformed {
            message: err.to_string(),
        }
    } else {
        CallError::Transport {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl LaureateService for RemoteService {
    async fn count_laureates_by_category_and_years(
        &self,
        request: CategoryYearsRequest,
    ) -> Result<LaureateCountResponse, CallError> {
        self.call(ENDPOINT_COUNT_BY_CATEGORY_AND_YEARS, &request)
            .await
    }

    async fn count_laureates_by_motivation_keyword(
        &self,
        request: MotivationKeywordRequest,
    ) -> Result<LaureateCountResponse, CallError> {
        self.call(ENDPOINT_COUNT_BY_MOTIVATION_KEYWORD, &request)
            .await
    }

    async fn get_laureate_details_by_name(
        &self,
        request: LaureateNameRequest,
    ) -> Result<LaureateDetailsResponse, CallError> {
        self.call(ENDPOINT_DETAILS_BY_NAME, &request).await
    }
}
