use crate::{
    api::{ApiError, ApiResult, NetworkSnafu, StudentsApi},
    data::student::{NewStudent, Student},
    error::{BuildHttpClientSnafu, RosterError, RosterResult},
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::ResultExt;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `reqwest`-backed [`StudentsApi`]. Clone is cheap, the connection pool is shared.
#[derive(Clone, Debug)]
pub struct HttpStudentsApi {
    client: Client,
    base_url: Url,
}

impl HttpStudentsApi {
    pub fn new(base_url: &str) -> RosterResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| RosterError::InvalidApiUrl {
            provided: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RosterError::InvalidApiUrl {
                provided: base_url.to_string(),
                reason: "URL cannot have a path".into(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context(BuildHttpClientSnafu)?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/students`, plus `/{id}` when given. The id is percent-encoded as one segment.
    pub fn students_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "students"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn check_response(response: Response, id: Option<&str>) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, id, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl StudentsApi for HttpStudentsApi {
    async fn list(&self) -> ApiResult<Vec<Student>> {
        let url = self.students_url(None);
        debug!(%url, "Fetching students");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .context(NetworkSnafu { url })?;
        Self::decode(Self::check_response(response, None).await?).await
    }

    async fn get(&self, id: &str) -> ApiResult<Student> {
        let url = self.students_url(Some(id));
        debug!(%url, "Fetching student");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .context(NetworkSnafu { url })?;
        Self::decode(Self::check_response(response, Some(id)).await?).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let url = self.students_url(Some(id));
        debug!(%url, "Deleting student");

        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .context(NetworkSnafu { url })?;
        let body: Value = Self::decode(Self::check_response(response, Some(id)).await?).await?;

        // some deployments answer a missing id with 200 and an `error` body
        if body.get("error").is_some() && body.get("message").is_none() {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn create(&self, student: &NewStudent) -> ApiResult<Student> {
        let url = self.students_url(None);
        debug!(%url, "Creating student");

        let response = self
            .client
            .post(url.clone())
            .json(student)
            .send()
            .await
            .context(NetworkSnafu { url })?;
        Self::decode(Self::check_response(response, None).await?).await
    }
}
