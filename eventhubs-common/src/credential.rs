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

//! Token credentials for the Azure management plane.
//!
//! The default chain tries, in order: a static `AZURE_ACCESS_TOKEN`, a service principal
//! from `AZURE_TENANT_ID` / `AZURE_CLIENT_ID` / `AZURE_CLIENT_SECRET`, then the Azure CLI.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use eventhubs_error::AuthError;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

pub const ENV_ACCESS_TOKEN: &str = "AZURE_ACCESS_TOKEN";
pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

/// A bearer token and its expiry
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }

    /// True when the token expires within `margin` from now.
    pub fn expires_within(&self, margin: chrono::Duration) -> bool {
        self.expires_on - margin <= Utc::now()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Source of bearer tokens
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Credential name used in diagnostics
    fn name(&self) -> &'static str;

    async fn get_token(&self, scope: &str, tenant: Option<&str>) -> Result<AccessToken, AuthError>;
}

/// Uses a pre-acquired token as is.
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    fn name(&self) -> &'static str {
        "StaticTokenCredential"
    }

    async fn get_token(&self, _scope: &str, _tenant: Option<&str>) -> Result<AccessToken, AuthError> {
        Ok(AccessToken::new(self.token.clone(), Utc::now() + chrono::Duration::hours(1)))
    }
}

/// OAuth2 client credentials flow for a service principal
pub struct EnvironmentCredential {
    http: reqwest::Client,
    authority_host: String,
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

impl EnvironmentCredential {
    pub fn from_env(authority_host: impl Into<String>) -> Self {
        Self::new(
            authority_host,
            std::env::var(ENV_TENANT_ID).ok(),
            std::env::var(ENV_CLIENT_ID).ok(),
            std::env::var(ENV_CLIENT_SECRET).ok(),
        )
    }

    pub fn new(
        authority_host: impl Into<String>,
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            authority_host: authority_host.into(),
            tenant_id,
            client_id,
            client_secret,
        }
    }

    fn token_url(&self, tenant: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            tenant
        )
    }
}

#[async_trait]
impl TokenCredential for EnvironmentCredential {
    fn name(&self) -> &'static str {
        "EnvironmentCredential"
    }

    async fn get_token(&self, scope: &str, tenant: Option<&str>) -> Result<AccessToken, AuthError> {
        let tenant = tenant
            .or(self.tenant_id.as_deref())
            .ok_or_else(|| AuthError::unavailable(self.name(), format!("{ENV_TENANT_ID} is not set")))?;
        validate_tenant(tenant)?;
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| AuthError::unavailable(self.name(), format!("{ENV_CLIENT_ID} is not set")))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| AuthError::unavailable(self.name(), format!("{ENV_CLIENT_SECRET} is not set")))?;

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", client_id)
            .append_pair("client_secret", client_secret)
            .append_pair("scope", scope)
            .finish();

        let url = self.token_url(tenant);
        debug!(url = %url, "requesting token with client credentials");
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| AuthError::AuthenticationFailed(format!("token request to {url} failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;
        if !status.is_success() {
            let message = serde_json::from_str::<TokenErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or(text);
            return Err(AuthError::TokenRequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&text).map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;
        let expires_on = Utc::now() + chrono::Duration::seconds(token.expires_in.unwrap_or(3600));
        Ok(AccessToken::new(token.access_token, expires_on))
    }
}

/// Borrows the signed-in Azure CLI session
#[derive(Debug, Default)]
pub struct AzureCliCredential;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
    expires_on: Option<String>,
    #[serde(rename = "expires_on")]
    expires_on_epoch: Option<i64>,
}

impl AzureCliCredential {
    fn program() -> &'static str {
        if cfg!(windows) {
            "az.cmd"
        } else {
            "az"
        }
    }

    fn parse_output(stdout: &[u8]) -> Result<AccessToken, AuthError> {
        let token: CliToken =
            serde_json::from_slice(stdout).map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;
        let expires_on = match (token.expires_on_epoch, token.expires_on.as_deref()) {
            (Some(epoch), _) => Utc.timestamp_opt(epoch, 0).single(),
            // Older CLIs only report local wall-clock time.
            (None, Some(local)) => NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .and_then(|naive| Local.from_local_datetime(&naive).single())
                .map(|dt| dt.with_timezone(&Utc)),
            (None, None) => None,
        }
        .ok_or_else(|| AuthError::InvalidTokenResponse("missing or malformed token expiry".to_string()))?;
        Ok(AccessToken::new(token.access_token, expires_on))
    }
}

#[async_trait]
impl TokenCredential for AzureCliCredential {
    fn name(&self) -> &'static str {
        "AzureCliCredential"
    }

    async fn get_token(&self, scope: &str, tenant: Option<&str>) -> Result<AccessToken, AuthError> {
        let resource = scope.trim_end_matches("/.default");
        let mut command = tokio::process::Command::new(Self::program());
        command.args(["account", "get-access-token", "--output", "json", "--resource", resource]);
        if let Some(tenant) = tenant {
            validate_tenant(tenant)?;
            command.args(["--tenant", tenant]);
        }

        let output = command
            .output()
            .await
            .map_err(|e| AuthError::unavailable(self.name(), format!("failed to run Azure CLI: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuthError::unavailable(
                self.name(),
                format!("Azure CLI returned an error. Run 'az login' to sign in. {}", stderr.trim()),
            ));
        }
        Self::parse_output(&output.stdout)
    }
}

/// Tries each credential in turn and returns the first token obtained.
pub struct ChainedTokenCredential {
    sources: Vec<Arc<dyn TokenCredential>>,
}

impl ChainedTokenCredential {
    pub fn new(sources: Vec<Arc<dyn TokenCredential>>) -> Self {
        Self { sources }
    }

    /// The chain used by the command line tools
    pub fn default_chain(authority_host: &str) -> Self {
        if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
            if !token.trim().is_empty() {
                return Self::new(vec![Arc::new(StaticTokenCredential::new(token.trim()))]);
            }
        }
        Self::new(vec![
            Arc::new(EnvironmentCredential::from_env(authority_host)),
            Arc::new(AzureCliCredential),
        ])
    }
}

#[async_trait]
impl TokenCredential for ChainedTokenCredential {
    fn name(&self) -> &'static str {
        "ChainedTokenCredential"
    }

    async fn get_token(&self, scope: &str, tenant: Option<&str>) -> Result<AccessToken, AuthError> {
        let mut attempts = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.get_token(scope, tenant).await {
                Ok(token) => {
                    debug!(credential = source.name(), "acquired management token");
                    return Ok(token);
                }
                Err(e) => {
                    debug!(credential = source.name(), error = %e, "credential failed");
                    attempts.push(format!("{}: {e}.", source.name()));
                }
            }
        }
        Err(AuthError::ChainExhausted { attempts })
    }
}

fn validate_tenant(tenant: &str) -> Result<(), AuthError> {
    let valid = !tenant.is_empty()
        && tenant
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(AuthError::AuthenticationFailed(format!("invalid tenant '{tenant}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingCredential;

    #[async_trait]
    impl TokenCredential for FailingCredential {
        fn name(&self) -> &'static str {
            "FailingCredential"
        }

        async fn get_token(&self, _scope: &str, _tenant: Option<&str>) -> Result<AccessToken, AuthError> {
            Err(AuthError::unavailable("FailingCredential", "always fails"))
        }
    }

    #[tokio::test]
    async fn chain_returns_first_success() {
        let chain = ChainedTokenCredential::new(vec![
            Arc::new(FailingCredential),
            Arc::new(StaticTokenCredential::new("abc")),
        ]);
        let token = chain.get_token(MANAGEMENT_SCOPE, None).await.unwrap();
        assert_eq!(token.token, "abc");
    }

    #[tokio::test]
    async fn chain_collects_every_failure() {
        let chain = ChainedTokenCredential::new(vec![Arc::new(FailingCredential), Arc::new(FailingCredential)]);
        let err = chain.get_token(MANAGEMENT_SCOPE, None).await.unwrap_err();
        match err {
            AuthError::ChainExhausted { attempts } => assert_eq!(attempts.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn environment_credential_requires_variables() {
        let credential = EnvironmentCredential::new("https://login.example", None, None, None);
        let err = credential.get_token(MANAGEMENT_SCOPE, None).await.unwrap_err();
        assert!(matches!(err, AuthError::CredentialUnavailable { .. }));
    }

    #[tokio::test]
    async fn environment_credential_posts_client_credentials() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tenant-1/oauth2/v2.0/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
                mockito::Matcher::UrlEncoded("client_id".into(), "app".into()),
                mockito::Matcher::UrlEncoded("scope".into(), MANAGEMENT_SCOPE.into()),
            ]))
            .with_status(200)
            .with_body(r#"{"token_type":"Bearer","expires_in":3599,"access_token":"token-1"}"#)
            .create_async()
            .await;

        let credential = EnvironmentCredential::new(
            server.url(),
            Some("tenant-1".into()),
            Some("app".into()),
            Some("secret".into()),
        );
        let token = credential.get_token(MANAGEMENT_SCOPE, None).await.unwrap();
        assert_eq!(token.token, "token-1");
        assert!(!token.expires_within(chrono::Duration::minutes(5)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn environment_credential_surfaces_identity_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/other-tenant/oauth2/v2.0/token")
            .with_status(401)
            .with_body(r#"{"error":"invalid_client","error_description":"AADSTS7000215: Invalid client secret."}"#)
            .create_async()
            .await;

        let credential = EnvironmentCredential::new(
            server.url(),
            Some("tenant-1".into()),
            Some("app".into()),
            Some("wrong".into()),
        );
        let err = credential
            .get_token(MANAGEMENT_SCOPE, Some("other-tenant"))
            .await
            .unwrap_err();
        match err {
            AuthError::TokenRequestFailed { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid client secret"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cli_output_with_epoch_expiry() {
        let token = AzureCliCredential::parse_output(
            br#"{"accessToken":"cli-token","expiresOn":"2030-01-01 00:00:00.000000","expires_on":1893456000}"#,
        )
        .unwrap();
        assert_eq!(token.token, "cli-token");
        assert_eq!(token.expires_on.timestamp(), 1893456000);
    }

    #[test]
    fn cli_output_with_local_expiry_only() {
        let token =
            AzureCliCredential::parse_output(br#"{"accessToken":"cli-token","expiresOn":"2030-01-01 00:00:00.123456"}"#)
                .unwrap();
        assert_eq!(token.token, "cli-token");
    }

    #[test]
    fn cli_output_without_expiry_is_rejected() {
        let err = AzureCliCredential::parse_output(br#"{"accessToken":"cli-token"}"#).unwrap_err();
        assert!(matches!(err, AuthError::InvalidTokenResponse(_)));
    }

    #[test]
    fn tenant_validation() {
        assert!(validate_tenant("72f988bf-86f1-41af-91ab-2d7cd011db47").is_ok());
        assert!(validate_tenant("contoso.onmicrosoft.com").is_ok());
        assert!(validate_tenant("").is_err());
        assert!(validate_tenant("a/b").is_err());
    }

    #[test]
    fn access_token_debug_redacts() {
        let token = AccessToken::new("secret", Utc::now());
        assert!(!format!("{token:?}").contains("secret"));
    }
}
