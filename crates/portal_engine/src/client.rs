use std::time::Duration;

use portal_core::{ApplicationRecord, ContactForm};
use portal_logging::{portal_debug, portal_warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{
    ApiEnvelope, ApiError, ApplicationFilters, AuthData, FailureKind, Job, JobFilters,
    SignInRequest, SignUpRequest, UserProfile,
};

pub const DEFAULT_API_BASE_URL: &str = "https://gy-placement-back.vercel.app/api";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client for the job portal API.
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ApiSettings,
    http: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub async fn get_all_jobs(
        &self,
        filters: &JobFilters,
    ) -> Result<ApiEnvelope<Vec<Job>>, ApiError> {
        let url = self.endpoint(&["jobs"], &filters.pairs())?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    pub async fn get_job_by_id(&self, id: &str) -> Result<ApiEnvelope<Job>, ApiError> {
        let url = self.endpoint(&["jobs", id], &[])?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    /// Keyword is sent as a single percent-encoded path segment.
    pub async fn search_jobs(&self, keyword: &str) -> Result<ApiEnvelope<Vec<Job>>, ApiError> {
        let url = self.endpoint(&["jobs", "search", keyword], &[])?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    pub async fn create_job(&self, job: &Value) -> Result<ApiEnvelope<Job>, ApiError> {
        let url = self.endpoint(&["jobs"], &[])?;
        self.send(Method::POST, url, Some(job), None).await
    }

    pub async fn submit_application(
        &self,
        record: &ApplicationRecord,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self.endpoint(&["applications"], &[])?;
        self.send(Method::POST, url, Some(record), None).await
    }

    pub async fn get_all_applications(
        &self,
        filters: &ApplicationFilters,
    ) -> Result<ApiEnvelope<Vec<Value>>, ApiError> {
        let url = self.endpoint(&["applications"], &filters.pairs())?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    pub async fn get_application_by_id(&self, id: &str) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self.endpoint(&["applications", id], &[])?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    pub async fn submit_contact(
        &self,
        contact: &ContactForm,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self.endpoint(&["contact"], &[])?;
        self.send(Method::POST, url, Some(contact), None).await
    }

    pub async fn get_all_contacts(&self) -> Result<ApiEnvelope<Vec<Value>>, ApiError> {
        let url = self.endpoint(&["contact"], &[])?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    pub async fn check_health(&self) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self.endpoint(&["health"], &[])?;
        self.send(Method::GET, url, None::<&()>, None).await
    }

    pub async fn signup(&self, request: &SignUpRequest) -> Result<ApiEnvelope<AuthData>, ApiError> {
        let url = self.endpoint(&["auth", "signup"], &[])?;
        self.send(Method::POST, url, Some(request), None).await
    }

    pub async fn signin(&self, request: &SignInRequest) -> Result<ApiEnvelope<AuthData>, ApiError> {
        let url = self.endpoint(&["auth", "signin"], &[])?;
        self.send(Method::POST, url, Some(request), None).await
    }

    pub async fn get_me(&self, token: &str) -> Result<ApiEnvelope<UserProfile>, ApiError> {
        let url = self.endpoint(&["auth", "me"], &[])?;
        self.send(Method::GET, url, None::<&()>, Some(token)).await
    }

    pub async fn logout(&self, token: &str) -> Result<ApiEnvelope<Value>, ApiError> {
        let url = self.endpoint(&["auth", "logout"], &[])?;
        self.send(Method::POST, url, None::<&()>, Some(token)).await
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        bearer: Option<&str>,
    ) -> Result<ApiEnvelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        portal_debug!("{} {}", method, url.path());
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
            request = request.body(payload);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ApiEnvelope<Value>>(&bytes)
                .ok()
                .and_then(|envelope| {
                    envelope
                        .error
                        .filter(|text| !text.is_empty())
                        .or(envelope.message.filter(|text| !text.is_empty()))
                });
            let message = reason.unwrap_or_else(|| {
                format!(
                    "API request failed: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
            });
            portal_warn!("request failed with status {}", status.as_u16());
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
