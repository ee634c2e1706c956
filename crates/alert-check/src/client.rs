//! Client for the BYMA API alerts check endpoint.
//!
//! A single GET against `<base>/api/v1/system/alerts/check` asks the server
//! to evaluate every configured alert. The server does the evaluation; this
//! side only triggers it and reports what came back.

use std::fmt;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{Method, Request, StatusCode, Uri, header};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde_json::error::Category;
use tokio::time::{Duration, timeout};
use tracing::{error, info, warn};

use crate::config::{AppConfig, ConfigError, load_config, resolve_base_url};
use crate::error::{CheckError, FailureKind, error_chain};
use crate::response::AlertCheckResponse;
use crate::tls::shared_tls_config;

pub const ALERTS_CHECK_PATH: &str = "/api/v1/system/alerts/check";

/// Upper bound for the whole round trip: connect, TLS, headers and body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

type HttpClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

pub struct AlertCheck {
    base_url: String,
    endpoint: Uri,
    timeout: Duration,
    http: HttpClient,
}

impl AlertCheck {
    /// Build a client for `base_url`, or for `BYMA_API_URL` /
    /// `http://localhost:8000` when `None`.
    pub fn new(base_url: Option<&str>) -> Result<Self, CheckError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: Option<&str>, timeout: Duration) -> Result<Self, CheckError> {
        // The environment is only consulted when no explicit URL is given.
        let config = match base_url {
            Some(_) => AppConfig::default(),
            None => load_config()?,
        };
        Self::from_config(base_url, &config, timeout)
    }

    pub fn from_config(
        base_url: Option<&str>,
        config: &AppConfig,
        timeout: Duration,
    ) -> Result<Self, CheckError> {
        let base_url = resolve_base_url(base_url, config)?;
        let endpoint: Uri = format!("{base_url}{ALERTS_CHECK_PATH}")
            .parse()
            .map_err(|e| ConfigError::Validation(format!("invalid endpoint URL: {e}")))?;

        let tls = shared_tls_config().map_err(|e| CheckError::Tls(e.to_string()))?;
        let mut connector = HttpConnector::new();
        connector.enforce_http(false);
        connector.set_connect_timeout(Some(timeout));
        let connector = HttpsConnectorBuilder::new()
            .with_tls_config((*tls).clone())
            .https_or_http()
            .enable_http1()
            .wrap_connector(connector);
        let http = Client::builder(TokioExecutor::new()).build(connector);

        info!("AlertCheck initialized with base URL: {base_url}");

        Ok(Self {
            base_url,
            endpoint,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Trigger the server-side alert evaluation and log the outcome.
    ///
    /// Returns the parsed body on HTTP 200. Every failure is logged and
    /// collapsed into `None`; this never returns an error to the caller.
    #[tracing::instrument(name = "check_alerts", skip(self), fields(endpoint = %self.endpoint))]
    pub async fn check_alerts(&self) -> Option<AlertCheckResponse> {
        info!("Calling alerts endpoint: {}", self.endpoint);

        match self.fetch().await {
            Ok(result) => {
                log_result(&result);
                Some(result)
            }
            Err(e) => {
                match (e.kind(), &e) {
                    (FailureKind::Http, CheckError::Http { status, body }) => error!(
                        status = status.as_u16(),
                        "API request failed with status {}: {body}",
                        status.as_u16()
                    ),
                    (FailureKind::Transport, _) => {
                        error!("Network error while checking alerts: {e}")
                    }
                    _ => error!("Unexpected error while checking alerts: {e}"),
                }
                None
            }
        }
    }

    /// Perform the request and decode the body, without logging the outcome.
    pub async fn fetch(&self) -> Result<AlertCheckResponse, CheckError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(self.endpoint.clone())
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| CheckError::Request(e.to_string()))?;

        let (status, body) = timeout(self.timeout, self.round_trip(req))
            .await
            .map_err(|_| CheckError::Timeout(self.timeout))??;

        if status != StatusCode::OK {
            return Err(CheckError::Http {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        AlertCheckResponse::from_slice(&body).map_err(|e| match e.classify() {
            Category::Data => CheckError::Json(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => CheckError::Decode(e.to_string()),
        })
    }

    async fn round_trip(
        &self,
        req: Request<Empty<Bytes>>,
    ) -> Result<(StatusCode, Bytes), CheckError> {
        let resp = self
            .http
            .request(req)
            .await
            .map_err(|e| transport_error(&e))?;
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| CheckError::Network(error_chain(&e)))?
            .to_bytes();
        Ok((status, body))
    }
}

impl fmt::Debug for AlertCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertCheck")
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn log_result(result: &AlertCheckResponse) {
    let summary = result.summary();
    info!(
        total_checked = %summary.total_checked,
        triggered = summary.triggered,
        "Alerts check successful: {summary}"
    );

    if summary.triggered > 0 {
        warn!("Found {} triggered alerts:", summary.triggered);
        for alert in result.triggered_alerts() {
            warn!("  - Alert: {alert}");
        }
    }
}

/// TLS failures surface as an `io::Error` wrapping a `rustls::Error`
/// somewhere down the connector's source chain.
fn transport_error(err: &hyper_util::client::legacy::Error) -> CheckError {
    let detail = error_chain(err);
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(cause) = source {
        let is_tls = cause.is::<rustls::Error>()
            || cause
                .downcast_ref::<std::io::Error>()
                .and_then(|io| io.get_ref())
                .is_some_and(|inner| inner.is::<rustls::Error>());
        if is_tls {
            return CheckError::Tls(detail);
        }
        source = cause.source();
    }
    CheckError::Network(detail)
}
