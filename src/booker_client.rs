use crate::authentication::{Credentials, SessionToken};
use crate::domain::{Booking, BookingFilter, BookingId, PartialBooking};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Failed to serialize the request body.")]
    InvalidBody(#[source] serde_json::Error),
    #[error("Failed to talk to the booking service.")]
    Network(#[from] reqwest::Error),
}

#[derive(thiserror::Error, Debug)]
#[error("Response body is not the expected JSON: `{preview}`")]
pub struct ParseError {
    preview: String,
    #[source]
    source: serde_json::Error,
}

impl ParseError {
    fn new(body: &[u8], source: serde_json::Error) -> Self {
        let preview: String = String::from_utf8_lossy(body).chars().take(120).collect();
        Self { preview, source }
    }
}

/// Headers, query and JSON body of a single request.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json<Body: Serialize>(mut self, body: &Body) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::InvalidBody)?);
        Ok(self)
    }

    /// Attach the session cookie the booking service expects on mutating calls.
    pub fn session(self, token: Option<&SessionToken>) -> Self {
        match token {
            Some(token) => self.header("Cookie", token.cookie()),
            None => self,
        }
    }
}

/// A fully buffered response. JSON is only parsed when asked for.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical reason phrase of the status code, e.g. "Created" for 201.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_slice(&self.body).map_err(|e| ParseError::new(&self.body, e))
    }

    pub fn json_value(&self) -> Result<serde_json::Value, ParseError> {
        self.json()
    }
}

#[derive(Clone, Debug)]
pub struct BookerClient {
    base_url: String,
    http_client: Client,
}

impl BookerClient {
    pub fn new(
        base_url: String,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, ClientError> {
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(
        name = "Calling the booking service",
        skip(self, options),
        fields(status = tracing::field::Empty)
    )]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http_client.request(method, &url);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {:?}", url, e);
            e
        })?;
        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse::from_parts(status, headers, body))
    }

    pub async fn ping(&self) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, "/ping", RequestOptions::new()).await
    }

    #[tracing::instrument(name = "Requesting a session token", skip(self, credentials), fields(username = %credentials.username))]
    pub async fn create_token(&self, credentials: &Credentials) -> Result<ApiResponse, ClientError> {
        let body = serde_json::json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });
        self.send(Method::POST, "/auth", RequestOptions::new().json(&body)?)
            .await
    }

    pub async fn get_booking_ids(
        &self,
        filter: &BookingFilter,
    ) -> Result<ApiResponse, ClientError> {
        self.send(
            Method::GET,
            "/booking",
            RequestOptions::new().query(filter.query_pairs()),
        )
        .await
    }

    pub async fn get_booking(&self, id: BookingId) -> Result<ApiResponse, ClientError> {
        self.send(
            Method::GET,
            &format!("/booking/{}", id),
            RequestOptions::new().header("Accept", "application/json"),
        )
        .await
    }

    #[tracing::instrument(name = "Creating a booking", skip(self, booking))]
    pub async fn create_booking(&self, booking: &Booking) -> Result<ApiResponse, ClientError> {
        let options = RequestOptions::new()
            .header("Accept", "application/json")
            .json(booking)?;
        self.send(Method::POST, "/booking", options).await
    }

    #[tracing::instrument(name = "Updating a booking", skip(self, booking, token))]
    pub async fn update_booking(
        &self,
        id: BookingId,
        booking: &Booking,
        token: Option<&SessionToken>,
    ) -> Result<ApiResponse, ClientError> {
        let options = RequestOptions::new()
            .header("Accept", "application/json")
            .session(token)
            .json(booking)?;
        self.send(Method::PUT, &format!("/booking/{}", id), options)
            .await
    }

    #[tracing::instrument(name = "Partially updating a booking", skip(self, patch, token))]
    pub async fn partial_update_booking(
        &self,
        id: BookingId,
        patch: &PartialBooking,
        token: Option<&SessionToken>,
    ) -> Result<ApiResponse, ClientError> {
        let options = RequestOptions::new()
            .header("Accept", "application/json")
            .session(token)
            .json(patch)?;
        self.send(Method::PATCH, &format!("/booking/{}", id), options)
            .await
    }

    #[tracing::instrument(name = "Deleting a booking", skip(self, token))]
    pub async fn delete_booking(
        &self,
        id: BookingId,
        token: Option<&SessionToken>,
    ) -> Result<ApiResponse, ClientError> {
        let options = RequestOptions::new()
            .header("Content-Type", "application/json")
            .session(token);
        self.send(Method::DELETE, &format!("/booking/{}", id), options)
            .await
    }
}
