//! remote::http
//!
//! `CommandInvoker` implementation over the server's HTTP CLI API.
//!
//! # Endpoints
//!
//! - `GET  {url}/api/v1/cli` - command catalog as JSON
//! - `POST {url}/api/v1/cli?target=<plugin>&method=<command>` - run a
//!   command; the body is the JSON array of arguments
//!
//! # Authentication
//!
//! Every request carries one header, named by `auth.header`, whose value is
//! `auth.prefix + secret` with surrounding whitespace trimmed. With the
//! defaults this is `Authorization: Bearer <secret>`.
//!
//! There are no retries. Any non-success status is returned as
//! [`RemoteError::Status`] with the body the server sent.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::traits::{validate_invocation, CommandCatalog, CommandInvoker, RemoteError};
use crate::core::config::ClientConfig;

/// Path of the CLI API, relative to the server URL.
const CLI_API_PATH: &str = "/api/v1/cli";

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP invoker bound to one server and credential.
pub struct HttpInvoker {
    /// HTTP client for making requests
    client: Client,
    /// Server URL without trailing slash
    base_url: String,
    /// Name of the credential header
    auth_header: HeaderName,
    /// Credential header value (marked sensitive)
    auth_value: HeaderValue,
}

// Custom Debug to avoid exposing the credential
impl std::fmt::Debug for HttpInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInvoker")
            .field("base_url", &self.base_url)
            .field("auth_header", &self.auth_header)
            .finish()
    }
}

impl HttpInvoker {
    /// Build an invoker from resolved client settings.
    ///
    /// # Errors
    ///
    /// - `RemoteError::MissingUrl` / `RemoteError::MissingSecret` if either
    ///   setting is absent or empty
    /// - `RemoteError::InvalidHeader` if the header name or value is not
    ///   valid HTTP
    pub fn from_config(config: &ClientConfig) -> Result<Self, RemoteError> {
        let url = config.url().ok_or(RemoteError::MissingUrl)?;
        let secret = config.secret().ok_or(RemoteError::MissingSecret)?;

        let auth_header = HeaderName::from_bytes(config.auth_header().as_bytes())
            .map_err(|e| RemoteError::InvalidHeader(format!("bad header name: {}", e)))?;

        let credential = format!("{}{}", config.auth_prefix(), secret);
        let mut auth_value = HeaderValue::from_str(credential.trim()).map_err(|_| {
            RemoteError::InvalidHeader("value contains characters not allowed in headers".into())
        })?;
        auth_value.set_sensitive(true);

        if config.insecure() {
            warn!("TLS certificate verification is disabled");
        }
        let client = Client::builder()
            .danger_accept_invalid_certs(config.insecure())
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            auth_header,
            auth_value,
        })
    }

    /// Full URL of the CLI API.
    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CLI_API_PATH)
    }

    /// Turn a non-success response into `RemoteError::Status`.
    async fn check_status(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "server rejected request");
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CommandInvoker for HttpInvoker {
    async fn list_commands(&self) -> Result<CommandCatalog, RemoteError> {
        let url = self.endpoint();
        debug!(%url, "listing CLI commands");

        let response = self
            .client
            .get(&url)
            .header(self.auth_header.clone(), self.auth_value.clone())
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json(&content_type) {
            return Err(RemoteError::UnexpectedContentType(content_type));
        }

        response
            .json::<CommandCatalog>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn execute(
        &self,
        target: &str,
        method: &str,
        args: &[String],
    ) -> Result<String, RemoteError> {
        validate_invocation(target, method)?;

        let url = self.endpoint();
        debug!(%url, target, method, args = args.len(), "executing CLI command");

        let response = self
            .client
            .post(&url)
            .query(&[("target", target), ("method", method)])
            .header(self.auth_header.clone(), self.auth_value.clone())
            .json(args)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/// Compare the media type only, ignoring parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigOverrides;

    fn config(url: Option<&str>, secret: Option<&str>) -> ClientConfig {
        ClientConfig::default().with_overrides(&ConfigOverrides {
            url: url.map(String::from),
            secret: secret.map(String::from),
            ..Default::default()
        })
    }

    #[test]
    fn requires_url() {
        let err = HttpInvoker::from_config(&config(None, Some("s"))).unwrap_err();
        assert_eq!(err, RemoteError::MissingUrl);
    }

    #[test]
    fn requires_secret() {
        let err = HttpInvoker::from_config(&config(Some("http://localhost"), None)).unwrap_err();
        assert_eq!(err, RemoteError::MissingSecret);
    }

    #[test]
    fn builds_default_bearer_header() {
        let invoker =
            HttpInvoker::from_config(&config(Some("http://localhost:9080/"), Some("abc"))).unwrap();
        assert_eq!(invoker.auth_header.as_str(), "authorization");
        assert_eq!(invoker.auth_value.to_str().unwrap(), "Bearer abc");
        assert!(invoker.auth_value.is_sensitive());
        assert_eq!(invoker.endpoint(), "http://localhost:9080/api/v1/cli");
    }

    #[test]
    fn empty_prefix_sends_bare_secret() {
        let cfg = config(Some("http://localhost"), Some("  abc  ")).with_overrides(
            &ConfigOverrides {
                auth_header: Some("X-Api-Key".into()),
                auth_prefix: Some(String::new()),
                ..Default::default()
            },
        );
        let invoker = HttpInvoker::from_config(&cfg).unwrap();
        assert_eq!(invoker.auth_header.as_str(), "x-api-key");
        assert_eq!(invoker.auth_value.to_str().unwrap(), "abc");
    }

    #[test]
    fn invalid_header_name_rejected() {
        let cfg = config(Some("http://localhost"), Some("abc")).with_overrides(&ConfigOverrides {
            auth_header: Some("Bad Header".into()),
            ..Default::default()
        });
        assert!(matches!(
            HttpInvoker::from_config(&cfg),
            Err(RemoteError::InvalidHeader(_))
        ));
    }

    #[test]
    fn debug_hides_credential() {
        let invoker =
            HttpInvoker::from_config(&config(Some("http://localhost"), Some("hunter2"))).unwrap();
        assert!(!format!("{:?}", invoker).contains("hunter2"));
    }

    #[test]
    fn json_content_type_matching() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/plain"));
        assert!(!is_json(""));
    }
}
