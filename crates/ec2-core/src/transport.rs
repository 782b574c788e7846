//! HTTP transport used by the query dispatcher.
//!
//! The dispatcher only ever issues a GET and needs the status, headers and
//! body back. [`ReqwestTransport`] is the default implementation; tests and
//! embedders can supply their own through the [`Transport`] trait.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::client::ClientConfig;
use crate::error::{Error, Result};

/// A fully received HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Complete response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Build a response with no headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends GET requests on behalf of the dispatcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET to `url` and read the whole response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body cannot be read.
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, user_agent: &str) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .connect_timeout(Duration::from_secs(10))
            .gzip(config.enable_compression);

        if !config.tls_verify {
            warn!("TLS verification disabled for EC2 client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build EC2 HTTP client: {err}")))?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        // Reading the body to the end hands the connection back to the pool.
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reqwest_transport_reads_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("Action", "DescribeImages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-amzn-requestid", "req-1")
                    .set_body_string("<ok/>"),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&ClientConfig::new(), "test-agent").unwrap();
        let url = Url::parse(&format!("{}/?Action=DescribeImages", server.uri())).unwrap();
        let response = transport.get(&url).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(&response.body[..], b"<ok/>");
        assert_eq!(
            response.headers.get("x-amzn-requestid").unwrap(),
            "req-1"
        );
    }

    #[tokio::test]
    async fn reqwest_transport_reports_connection_failure() {
        let transport = ReqwestTransport::new(&ClientConfig::new(), "test-agent").unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = transport.get(&url).await.unwrap_err();
        assert!(err.is_transport());
    }
}
