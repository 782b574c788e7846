//! Query dispatch for the EC2 API.
//!
//! [`QueryClient`] is the single path every EC2 call takes: it stamps the API
//! version and timestamp, signs the parameters, issues the GET and turns the
//! response into either the caller's typed result or an [`ApiError`].

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::Region;
use crate::credentials::Credentials;
use crate::error::{ApiError, Error, Result};
use crate::query::Params;
use crate::signer;
use crate::transport::{HttpResponse, ReqwestTransport, Transport};

/// EC2 API version sent with every request.
pub const API_VERSION: &str = "2013-02-01";

/// Wire format of the `Timestamp` parameter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 60;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const USER_AGENT: &str = concat!("ec2-core/", env!("CARGO_PKG_VERSION"));

/// Source of the current time for request timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// HTTP client configuration.
///
/// Timeouts and pooling are handed to the transport; the dispatcher itself
/// never retries or times out.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Dump every request URL and raw response at debug level
    pub debug_dump: bool,

    /// Enable response compression
    pub enable_compression: bool,

    /// Whether to verify TLS certificates
    pub tls_verify: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            debug_dump: false,
            enable_compression: true,
            tls_verify: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable the request/response dump.
    #[must_use]
    pub const fn with_debug_dump(mut self, enabled: bool) -> Self {
        self.debug_dump = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`QueryClient`].
#[derive(Clone)]
pub struct QueryClientBuilder {
    credentials: Credentials,
    region: Region,
    http_config: ClientConfig,
    user_agent: String,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Clock>,
}

impl QueryClientBuilder {
    /// Create a builder for the given credentials and region.
    #[must_use]
    pub fn new(credentials: Credentials, region: Region) -> Self {
        Self {
            credentials,
            region,
            http_config: ClientConfig::new(),
            user_agent: USER_AGENT.to_string(),
            transport: None,
            clock: None,
        }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the `User-Agent` sent by the default transport.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Toggle the request/response dump.
    #[must_use]
    pub fn with_debug_dump(mut self, enabled: bool) -> Self {
        self.http_config.debug_dump = enabled;
        self
    }

    /// Use a custom transport instead of the `reqwest` one.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom clock for request timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the region endpoint is not a usable URL or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<QueryClient> {
        let endpoint = self.region.endpoint_url()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.http_config, &self.user_agent)?),
        };
        let clock: Clock = match self.clock {
            Some(clock) => clock,
            None => Arc::new(Utc::now),
        };

        Ok(QueryClient {
            transport,
            credentials: self.credentials,
            region: self.region,
            endpoint,
            clock,
            debug_dump: self.http_config.debug_dump,
        })
    }
}

/// Signs and dispatches EC2 query requests.
///
/// Cheap to clone and safe to share; each call builds its own parameters and
/// response.
#[derive(Clone)]
pub struct QueryClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    region: Region,
    endpoint: Url,
    clock: Clock,
    debug_dump: bool,
}

impl QueryClient {
    /// Construct a client with the default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the region endpoint is invalid.
    pub fn new(credentials: Credentials, region: Region) -> Result<Self> {
        QueryClientBuilder::new(credentials, region).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder(credentials: Credentials, region: Region) -> QueryClientBuilder {
        QueryClientBuilder::new(credentials, region)
    }

    /// The region this client talks to.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// The parsed endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The credentials used for signing.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send `params` and decode a 200 response into `T`.
    ///
    /// # Errors
    ///
    /// Transport failures are returned as they come from the transport. A
    /// non-200 status becomes [`Error::Api`]; a 200 body that does not fit
    /// `T` becomes [`Error::DecodeError`].
    pub async fn query<T>(&self, params: Params) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.signed_url(params);
        if self.debug_dump {
            debug!(method = "GET", url = %url, "EC2 request");
        }

        let response = self.transport.get(&url).await?;
        if self.debug_dump {
            dump_response(&response);
        }

        if response.status != StatusCode::OK {
            return Err(ApiError::from_response(response.status, &response.body).into());
        }
        decode(&response.body)
    }

    /// Stamp, sign and encode `params` into the request URL.
    #[must_use]
    pub fn signed_url(&self, mut params: Params) -> Url {
        params.insert("Version", API_VERSION);
        params.insert(
            "Timestamp",
            (self.clock)().format(TIMESTAMP_FORMAT).to_string(),
        );

        let mut url = self.endpoint.clone();
        if url.path().is_empty() {
            url.set_path("/");
        }
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        signer::sign(&self.credentials, "GET", url.path(), &mut params, &host);
        url.set_query(Some(&params.to_query_string()));
        url
    }
}

/// Decode an XML response body into `T`.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] carrying the decoder's message.
pub fn decode<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    quick_xml::de::from_reader(body).map_err(Error::from)
}

fn dump_response(response: &HttpResponse) {
    debug!(
        status = %response.status,
        headers = ?response.headers,
        body = %String::from_utf8_lossy(&response.body),
        "EC2 response"
    );
}
