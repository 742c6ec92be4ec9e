// Copyright 2025 The Event Hubs Admin Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimal Azure Resource Manager client.
//!
//! Handles bearer authentication, `api-version` stamping, retries, `nextLink` paging and
//! long running operation polling. Resource specific logic lives with the callers.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use eventhubs_error::EventHubsError;
use eventhubs_error::EventHubsResult;
use eventhubs_error::NetworkError;
use reqwest::header::HeaderMap;
use reqwest::header::ACCEPT;
use reqwest::header::LOCATION;
use reqwest::header::RETRY_AFTER;
use reqwest::Method;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::credential::AccessToken;
use crate::credential::TokenCredential;
use crate::credential::MANAGEMENT_SCOPE;
use crate::retry::RetryPolicy;

const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";

#[derive(Debug, Deserialize)]
struct ArmErrorEnvelope {
    error: Option<ArmErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ArmErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArmPage<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AsyncOperationStatus {
    status: Option<String>,
    error: Option<ArmErrorDetail>,
}

/// A fully read response
#[derive(Debug)]
pub struct ArmResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ArmResponse {
    fn json<T: DeserializeOwned>(&self, what: &'static str) -> EventHubsResult<T> {
        serde_json::from_str(&self.body).map_err(|e| EventHubsError::serialization(what, e.to_string()))
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn into_error(self) -> EventHubsError {
        let detail = serde_json::from_str::<ArmErrorEnvelope>(&self.body)
            .ok()
            .and_then(|envelope| envelope.error);
        let (code, message) = match detail {
            Some(detail) => (detail.code, detail.message),
            None => (None, None),
        };
        let message = message
            .or_else(|| Some(self.body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("Unknown status").to_string());
        EventHubsError::request_failed(self.status.as_u16(), code, message)
    }
}

pub struct ArmClient {
    http: reqwest::Client,
    endpoint: String,
    api_version: String,
    credential: Arc<dyn TokenCredential>,
    tenant: Option<String>,
    retry: RetryPolicy,
    poll_interval: Duration,
    operation_timeout: Duration,
    token: Mutex<Option<AccessToken>>,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("credential", &self.credential.name())
            .field("tenant", &self.tenant)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ArmClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            credential,
            tenant: None,
            retry: RetryPolicy::default(),
            poll_interval: Duration::from_secs(1),
            operation_timeout: Duration::from_secs(600),
            token: Mutex::new(None),
        }
    }

    pub fn with_tenant(mut self, tenant: Option<String>) -> Self {
        self.tenant = tenant;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// GET a resource, failing on any non-success status.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> EventHubsResult<T> {
        let response = self.execute(Method::GET, &self.url_for(path)?, None).await?;
        if !response.status.is_success() {
            return Err(response.into_error());
        }
        response.json("resource")
    }

    /// GET a resource, `None` when it does not exist.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> EventHubsResult<Option<T>> {
        let response = self.execute(Method::GET, &self.url_for(path)?, None).await?;
        match response.status {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response.json("resource").map(Some),
            _ => Err(response.into_error()),
        }
    }

    /// GET every item of a collection, following `nextLink`.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> EventHubsResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(self.url_for(path)?);
        while let Some(url) = next.take() {
            let response = self.execute(Method::GET, &url, None).await?;
            if !response.status.is_success() {
                return Err(response.into_error());
            }
            let page: ArmPage<T> = response.json("collection page")?;
            items.extend(page.value);
            next = page.next_link.filter(|link| !link.is_empty());
        }
        Ok(items)
    }

    /// PUT a resource and wait for provisioning to finish.
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> EventHubsResult<T> {
        let response = self.execute(Method::PUT, &self.url_for(path)?, Some(body)).await?;
        if !response.status.is_success() {
            return Err(response.into_error());
        }
        if self.wait_for_completion(&response).await? || response.body.trim().is_empty() {
            return self.get(path).await;
        }
        response.json("resource")
    }

    /// DELETE a resource and wait for it to go away.
    ///
    /// Returns `false` when the service reports there was nothing to delete.
    pub async fn delete(&self, path: &str) -> EventHubsResult<bool> {
        let response = self.execute(Method::DELETE, &self.url_for(path)?, None).await?;
        match response.status {
            StatusCode::NO_CONTENT => Ok(false),
            status if status.is_success() => {
                self.wait_for_completion(&response).await?;
                Ok(true)
            }
            _ => Err(response.into_error()),
        }
    }

    fn url_for(&self, path: &str) -> EventHubsResult<String> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.endpoint, path)
        };
        let mut url = Url::parse(&raw).map_err(|_| NetworkError::InvalidUrl { url: raw.clone() })?;
        if !url.query_pairs().any(|(k, _)| k == "api-version") {
            url.query_pairs_mut().append_pair("api-version", &self.api_version);
        }
        Ok(url.into())
    }

    async fn bearer_token(&self) -> EventHubsResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.expires_within(chrono::Duration::minutes(5)) {
                return Ok(token.token.clone());
            }
        }
        let token = self
            .credential
            .get_token(MANAGEMENT_SCOPE, self.tenant.as_deref())
            .await?;
        let bearer = token.token.clone();
        *cached = Some(token);
        Ok(bearer)
    }

    /// Sends one logical request, retrying transient failures per the retry policy.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> EventHubsResult<ArmResponse> {
        let mut attempt = 0;
        loop {
            let bearer = self.bearer_token().await?;
            let mut request = self
                .http
                .request(method.clone(), url)
                .bearer_auth(bearer)
                .header(ACCEPT, "application/json")
                .timeout(self.retry.network_timeout);
            if let Some(body) = body {
                request = request.json(body);
            }
            debug!(%method, url, attempt, "sending management request");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if RetryPolicy::is_retriable_status(status.as_u16()) && self.retry.should_retry(attempt) {
                        let delay = self.retry.delay_for(attempt, retry_after(response.headers()));
                        warn!(%method, url, status = status.as_u16(), ?delay, "transient failure, retrying");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    let headers = response.headers().clone();
                    let body = response
                        .text()
                        .await
                        .map_err(|e| NetworkError::request_failed(url, e.to_string()))?;
                    debug!(%method, url, status = status.as_u16(), "management request completed");
                    return Ok(ArmResponse { status, headers, body });
                }
                Err(e) if self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay_for(attempt, None);
                    warn!(%method, url, error = %e, ?delay, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_timeout() => {
                    return Err(NetworkError::request_timeout(url, self.retry.network_timeout.as_millis() as u64).into());
                }
                Err(e) => return Err(NetworkError::request_failed(url, e.to_string()).into()),
            }
        }
    }

    /// Polls a long running operation started by `response`.
    ///
    /// Returns `true` when polling happened, in which case the final resource state has to be
    /// read again.
    async fn wait_for_completion(&self, response: &ArmResponse) -> EventHubsResult<bool> {
        let deadline = Instant::now() + self.operation_timeout;
        if let Some(operation_url) = response.header(AZURE_ASYNC_OPERATION) {
            let operation_url = operation_url.to_string();
            let mut delay = retry_after(&response.headers).unwrap_or(self.poll_interval);
            loop {
                self.sleep_until_next_poll(delay, deadline).await?;
                let poll = self.execute(Method::GET, &operation_url, None).await?;
                if !poll.status.is_success() {
                    return Err(poll.into_error());
                }
                let status: AsyncOperationStatus = poll.json("operation status")?;
                match status.status.as_deref().unwrap_or("InProgress") {
                    s if s.eq_ignore_ascii_case("Succeeded") => return Ok(true),
                    s if s.eq_ignore_ascii_case("Failed") || s.eq_ignore_ascii_case("Canceled") => {
                        if let Some(ArmErrorDetail { code, message }) = status.error {
                            return Err(EventHubsError::request_failed(
                                poll.status.as_u16(),
                                code,
                                message.unwrap_or_else(|| format!("operation {s}")),
                            ));
                        }
                        return Err(EventHubsError::OperationFailed {
                            operation: operation_url,
                            status: s.to_string(),
                        });
                    }
                    _ => delay = retry_after(&poll.headers).unwrap_or(self.poll_interval),
                }
            }
        }

        if response.status == StatusCode::ACCEPTED {
            if let Some(location) = response.header(LOCATION.as_str()) {
                let location = location.to_string();
                let mut delay = retry_after(&response.headers).unwrap_or(self.poll_interval);
                loop {
                    self.sleep_until_next_poll(delay, deadline).await?;
                    let poll = self.execute(Method::GET, &location, None).await?;
                    match poll.status {
                        StatusCode::ACCEPTED => delay = retry_after(&poll.headers).unwrap_or(self.poll_interval),
                        status if status.is_success() => return Ok(true),
                        _ => return Err(poll.into_error()),
                    }
                }
            }
        }
        Ok(false)
    }

    async fn sleep_until_next_poll(&self, delay: Duration, deadline: Instant) -> EventHubsResult<()> {
        if Instant::now() + delay > deadline {
            return Err(EventHubsError::Timeout {
                operation: "long running operation",
                timeout_ms: self.operation_timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(delay).await;
        Ok(())
    }
}

/// Reads a `Retry-After` header given in seconds.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use mockito::Server;
    use serde_json::json;
    use serde_json::Value;

    use super::*;
    use crate::credential::StaticTokenCredential;

    const API_VERSION: &str = "2024-01-01";

    fn client(server: &Server) -> ArmClient {
        ArmClient::new(server.url(), API_VERSION, Arc::new(StaticTokenCredential::new("t0ken")))
            .with_retry_policy(RetryPolicy {
                max_retries: 2,
                delay: Duration::ZERO,
                ..Default::default()
            })
            .with_poll_interval(Duration::ZERO)
    }

    #[tokio::test]
    async fn get_sends_bearer_and_api_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/subscriptions/s1/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns")
            .match_header("authorization", "Bearer t0ken")
            .match_query(Matcher::UrlEncoded("api-version".into(), API_VERSION.into()))
            .with_status(200)
            .with_body(r#"{"name":"ns"}"#)
            .create_async()
            .await;

        let value: Value = client(&server)
            .get("/subscriptions/s1/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns")
            .await
            .unwrap();
        assert_eq!(value["name"], "ns");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_optional_maps_404_to_none() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"error":{"code":"NotFound","message":"nope"}}"#)
            .create_async()
            .await;

        let value: Option<Value> = client(&server).get_optional("/missing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn error_envelope_becomes_request_failed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/forbidden")
            .with_status(403)
            .with_body(r#"{"error":{"code":"AuthorizationFailed","message":"The client does not have authorization"}}"#)
            .create_async()
            .await;

        let err = client(&server).get::<Value>("/forbidden").await.unwrap_err();
        match err {
            EventHubsError::RequestFailed { status, code, message } => {
                assert_eq!(status, 403);
                assert_eq!(code.as_deref(), Some("AuthorizationFailed"));
                assert!(message.contains("does not have authorization"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn error_without_body_uses_reason_phrase() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("GET", "/conflict").with_status(409).create_async().await;

        let err = client(&server).get::<Value>("/conflict").await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("Conflict"));
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_exhausted() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/busy")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let err = client(&server).get::<Value>("/busy").await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/bad")
            .with_status(400)
            .expect(1)
            .create_async()
            .await;

        let err = client(&server).get::<Value>("/bad").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_follows_next_link() {
        let mut server = Server::new_async().await;
        let next = format!("{}/page2?api-version={API_VERSION}&$skiptoken=abc", server.url());
        let first = server
            .mock("GET", "/items")
            .with_status(200)
            .with_body(json!({"value": [{"name": "a"}], "nextLink": next}).to_string())
            .create_async()
            .await;
        let second = server
            .mock("GET", "/page2")
            .match_query(Matcher::UrlEncoded("$skiptoken".into(), "abc".into()))
            .with_status(200)
            .with_body(r#"{"value":[{"name":"b"},{"name":"c"}]}"#)
            .create_async()
            .await;

        let items: Vec<Value> = client(&server).list("/items").await.unwrap();
        let names: Vec<&str> = items.iter().filter_map(|v| v["name"].as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn put_polls_async_operation_then_reads_resource() {
        let mut server = Server::new_async().await;
        let operation = format!("{}/operations/op-1?api-version={API_VERSION}", server.url());
        let put = server
            .mock("PUT", "/hubs/h1")
            .match_body(Matcher::Json(json!({"properties": {"partitionCount": 2}})))
            .with_status(201)
            .with_header("Azure-AsyncOperation", &operation)
            .with_body("")
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/operations/op-1")
            .with_status(200)
            .with_body(r#"{"status":"Succeeded"}"#)
            .create_async()
            .await;
        let read = server
            .mock("GET", "/hubs/h1")
            .with_status(200)
            .with_body(r#"{"name":"h1","properties":{"partitionCount":2}}"#)
            .create_async()
            .await;

        let value: Value = client(&server)
            .put("/hubs/h1", &json!({"properties": {"partitionCount": 2}}))
            .await
            .unwrap();
        assert_eq!(value["properties"]["partitionCount"], 2);
        put.assert_async().await;
        poll.assert_async().await;
        read.assert_async().await;
    }

    #[tokio::test]
    async fn async_operation_gives_up_after_operation_timeout() {
        let mut server = Server::new_async().await;
        let operation = format!("{}/operations/op-3", server.url());
        let _put = server
            .mock("PUT", "/hubs/h3")
            .with_status(201)
            .with_header("Azure-AsyncOperation", &operation)
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/operations/op-3")
            .with_status(200)
            .with_body(r#"{"status":"InProgress"}"#)
            .expect(0)
            .create_async()
            .await;

        let client = client(&server)
            .with_poll_interval(Duration::from_millis(50))
            .with_operation_timeout(Duration::from_millis(10));
        assert_eq!(client.operation_timeout(), Duration::from_millis(10));
        let err = client.put::<Value>("/hubs/h3", &json!({})).await.unwrap_err();
        match err {
            EventHubsError::Timeout { timeout_ms, .. } => assert_eq!(timeout_ms, 10),
            other => panic!("unexpected error: {other}"),
        }
        poll.assert_async().await;
    }

    #[tokio::test]
    async fn failed_async_operation_is_an_error() {
        let mut server = Server::new_async().await;
        let operation = format!("{}/operations/op-2", server.url());
        let _put = server
            .mock("PUT", "/hubs/h2")
            .with_status(201)
            .with_header("Azure-AsyncOperation", &operation)
            .create_async()
            .await;
        let _poll = server
            .mock("GET", "/operations/op-2")
            .with_status(200)
            .with_body(r#"{"status":"Failed","error":{"code":"Conflict","message":"busy"}}"#)
            .create_async()
            .await;

        let err = client(&server).put::<Value>("/hubs/h2", &json!({})).await.unwrap_err();
        match err {
            EventHubsError::RequestFailed { code, message, .. } => {
                assert_eq!(code.as_deref(), Some("Conflict"));
                assert_eq!(message, "busy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn put_with_synchronous_body_returns_it() {
        let mut server = Server::new_async().await;
        let put = server
            .mock("PUT", "/groups/cg")
            .with_status(200)
            .with_body(r#"{"name":"cg"}"#)
            .create_async()
            .await;

        let value: Value = client(&server).put("/groups/cg", &json!({"properties": {}})).await.unwrap();
        assert_eq!(value["name"], "cg");
        put.assert_async().await;
    }

    #[tokio::test]
    async fn delete_reports_whether_something_was_removed() {
        let mut server = Server::new_async().await;
        let _gone = server.mock("DELETE", "/gone").with_status(204).create_async().await;
        let _there = server.mock("DELETE", "/there").with_status(200).create_async().await;

        let client = client(&server);
        assert!(!client.delete("/gone").await.unwrap());
        assert!(client.delete("/there").await.unwrap());
    }

    #[tokio::test]
    async fn delete_polls_location_header() {
        let mut server = Server::new_async().await;
        let location = format!("{}/operationResults/op-3", server.url());
        let _delete = server
            .mock("DELETE", "/hubs/h3")
            .with_status(202)
            .with_header("Location", &location)
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/operationResults/op-3")
            .with_status(204)
            .create_async()
            .await;

        assert!(client(&server).delete("/hubs/h3").await.unwrap());
        poll.assert_async().await;
    }

    #[test]
    fn retry_after_parses_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);
        headers.insert(RETRY_AFTER, "7".parse().unwrap());
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));
        headers.insert(RETRY_AFTER, "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap());
        assert_eq!(retry_after(&headers), None);
    }

    #[test]
    fn absolute_urls_keep_their_api_version() {
        let client = ArmClient::new(
            "https://management.azure.com/",
            API_VERSION,
            Arc::new(StaticTokenCredential::new("x")),
        );
        assert_eq!(client.endpoint(), "https://management.azure.com");
        assert_eq!(
            client.url_for("/subscriptions").unwrap(),
            "https://management.azure.com/subscriptions?api-version=2024-01-01"
        );
        assert_eq!(
            client
                .url_for("https://management.azure.com/next?api-version=2022-12-01&$skiptoken=1")
                .unwrap(),
            "https://management.azure.com/next?api-version=2022-12-01&$skiptoken=1"
        );
    }
}
