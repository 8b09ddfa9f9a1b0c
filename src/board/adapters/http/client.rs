//! `reqwest` client for the CRM backend's project endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::models::{
    BackendPage, BackendTask, ResponseEnvelope, UpdateTaskStatusBody, error_message_from_body,
};
use crate::board::{
    domain::ProjectId,
    ports::{
        PageRequest, StatusUpdateError, StatusUpdateRequest, StatusUpdateResult, TaskPage,
        TaskSource, TaskSourceError, TaskSourceResult, TaskStatusUpdater,
    },
};
use crate::config::{AuthToken, BoardConfig};

const UPDATE_STATUS_PATH: &str = "project/task/update-status";

/// Backend client implementing [`TaskStatusUpdater`] and [`TaskSource`].
///
/// Every request carries the session's bearer token.
#[derive(Debug, Clone)]
pub struct HttpBoardClient {
    http: Client,
    base_url: String,
    token: AuthToken,
}

impl HttpBoardClient {
    /// Creates a client from an existing `reqwest` client.
    #[must_use]
    pub fn new(http: Client, base_url: impl Into<String>, token: AuthToken) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Creates a client configured from [`BoardConfig`].
    ///
    /// Without a configured timeout the `reqwest` default applies.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error when the TLS backend cannot be
    /// initialised.
    pub fn from_config(config: &BoardConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(
            builder.build()?,
            config.api_base_url.as_str(),
            config.auth_token.clone(),
        ))
    }

    /// Returns the backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

async fn read_body(response: Response) -> reqwest::Result<(StatusCode, Vec<u8>)> {
    let status = response.status();
    let body = response.bytes().await?;
    Ok((status, body.to_vec()))
}

fn parse_envelope<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<ResponseEnvelope<T>> {
    serde_json::from_slice(body)
}

#[async_trait]
impl TaskStatusUpdater for HttpBoardClient {
    #[tracing::instrument(
        skip(self, request),
        fields(task_id = %request.task_id, status = %request.status)
    )]
    async fn update_status(&self, request: &StatusUpdateRequest) -> StatusUpdateResult<()> {
        let response = self
            .http
            .put(self.endpoint(UPDATE_STATUS_PATH))
            .bearer_auth(self.token.expose())
            .json(&UpdateTaskStatusBody::from(request))
            .send()
            .await
            .map_err(StatusUpdateError::transport)?;
        let (status, body) = read_body(response)
            .await
            .map_err(StatusUpdateError::transport)?;

        if !status.is_success() {
            tracing::debug!(%status, "backend refused status update");
            return Err(StatusUpdateError::Rejected {
                status: Some(status.as_u16()),
                message: error_message_from_body(&body),
            });
        }

        let envelope = parse_envelope::<serde_json::Value>(&body)
            .map_err(|err| StatusUpdateError::MalformedResponse(err.to_string()))?;
        if let Some(error) = envelope.errors.first() {
            return Err(StatusUpdateError::Rejected {
                status: error.numeric_code(),
                message: error.message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskSource for HttpBoardClient {
    #[tracing::instrument(skip(self, project_id), fields(project_id = %project_id))]
    async fn fetch_page(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> TaskSourceResult<TaskPage> {
        let response = self
            .http
            .get(self.endpoint(&format!("project/{project_id}/tasks")))
            .bearer_auth(self.token.expose())
            .query(&[
                ("page", page.number.saturating_sub(1)),
                ("size", page.size),
            ])
            .send()
            .await
            .map_err(TaskSourceError::transport)?;
        let (status, body) = read_body(response)
            .await
            .map_err(TaskSourceError::transport)?;

        let envelope = parse_envelope::<BackendPage<BackendTask>>(&body);
        if let Ok(ResponseEnvelope { errors, .. }) = &envelope {
            if let Some(error) = errors.first() {
                return Err(TaskSourceError::Rejected {
                    code: error.numeric_code().or(Some(status.as_u16())),
                    title: error.title.clone(),
                    message: error
                        .message
                        .clone()
                        .unwrap_or_else(|| "Something went wrong".to_owned()),
                });
            }
        }
        if !status.is_success() {
            return Err(TaskSourceError::Rejected {
                code: Some(status.as_u16()),
                title: None,
                message: error_message_from_body(&body)
                    .unwrap_or_else(|| format!("backend responded with {status}")),
            });
        }

        let envelope =
            envelope.map_err(|err| TaskSourceError::MalformedResponse(err.to_string()))?;
        let backend_page = envelope.attributes.ok_or_else(|| {
            TaskSourceError::MalformedResponse("response has no attributes".to_owned())
        })?;

        let fetched = TaskPage {
            total_pages: backend_page.total_pages,
            current_page: backend_page.number.saturating_add(1),
            total_tasks: backend_page.total_elements,
            tasks: backend_page
                .content
                .into_iter()
                .map(BackendTask::into_record)
                .collect(),
        };
        tracing::debug!(
            tasks = fetched.tasks.len(),
            page = fetched.current_page,
            total_pages = fetched.total_pages,
            "fetched task page"
        );
        Ok(fetched)
    }
}
