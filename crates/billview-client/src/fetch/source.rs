use std::time::Duration;

use serde_json::Value;

use crate::config::DashboardConfig;
use crate::{ClientError, ClientResult};

/// One page request, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub sequence: u64,
}

/// Where raw billing rows come from.
pub trait PageSource {
    fn fetch_page(&self, request: &PageRequest) -> ClientResult<Vec<Value>>;

    /// Human-readable location used in error messages.
    fn describe(&self) -> String;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch_page(&self, request: &PageRequest) -> ClientResult<Vec<Value>> {
        (**self).fetch_page(request)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub struct HttpPageSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpPageSource {
    pub fn new(config: &DashboardConfig) -> ClientResult<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(seconds) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|error| ClientError::config_invalid(&error.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, request: &PageRequest) -> ClientResult<Vec<Value>> {
        let query = [
            ("page", request.page.to_string()),
            ("limit", request.limit.to_string()),
        ];
        tracing::debug!(
            endpoint = %self.endpoint,
            page = request.page,
            limit = request.limit,
            "requesting billing page"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .map_err(|error| ClientError::fetch_failed(request.page, &error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::fetch_failed(
                request.page,
                &format!("unexpected status {status}"),
            ));
        }

        let body = response
            .text()
            .map_err(|error| ClientError::fetch_failed(request.page, &error.to_string()))?;
        parse_page_body(request.page, &body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

pub(crate) fn parse_page_body(page: u32, body: &str) -> ClientResult<Vec<Value>> {
    let parsed = serde_json::from_str::<Value>(body).map_err(|error| {
        ClientError::fetch_failed(page, &format!("response is not valid JSON: {error}"))
    })?;

    match parsed {
        Value::Array(rows) => Ok(rows),
        _ => Err(ClientError::fetch_failed(
            page,
            "response must be a top-level JSON array of records",
        )),
    }
}
