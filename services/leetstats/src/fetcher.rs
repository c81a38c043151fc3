//! Data fetcher for user statistics
//!
//! The fetcher builds the combined GraphQL query, hands it to a
//! [`StatsTransport`] and classifies the outcome. The transport is the only
//! piece that knows the endpoint and whether a relay sits in front of it.

use common::StatsConfig;
use common::error::{FetchError, FetchResult};
use reqwest::{
    Client, StatusCode,
    header::{CONTENT_TYPE, REFERER},
};
use tracing::{debug, info, warn};

use crate::models::{GraphQlRequest, GraphQlResponse, UserReport};

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to deliver a GraphQL request to the stats endpoint
pub trait StatsTransport {
    /// Send the request, failing only when no response was obtained
    fn execute(
        &self,
        request: &GraphQlRequest,
    ) -> impl Future<Output = FetchResult<RawResponse>> + Send;
}

/// Transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    referer: String,
    relayed: bool,
}

impl HttpTransport {
    /// Create a new transport from the widget configuration
    pub fn new(config: &StatsConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let endpoint = config.graphql_endpoint();
        info!("HTTP transport initialized with endpoint: {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            referer: format!("{}/", config.site_url),
            relayed: config.relay_url.is_some(),
        })
    }

    /// Endpoint requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl StatsTransport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> FetchResult<RawResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(REFERER, &self.referer)
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if self.relayed && status == StatusCode::FORBIDDEN {
            warn!("Relay refused to forward request to {}", self.endpoint);
            return Err(FetchError::RelayRejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Fetches and classifies user reports
#[derive(Debug, Clone)]
pub struct StatsFetcher<T> {
    transport: T,
    recent_limit: u32,
}

impl<T: StatsTransport> StatsFetcher<T> {
    /// Create a new fetcher over a transport
    pub fn new(transport: T, recent_limit: u32) -> Self {
        Self {
            transport,
            recent_limit,
        }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the report for an already validated username
    pub async fn fetch_report(&self, username: &str) -> FetchResult<UserReport> {
        info!("Fetching stats for user: {}", username);

        let request = GraphQlRequest::user_data(username, self.recent_limit);
        let response = self.transport.execute(&request).await?;
        debug!("Stats endpoint answered with status {}", response.status);

        if !response.is_success() {
            warn!(
                "Stats request for {} failed with status {}",
                username, response.status
            );
            return Err(FetchError::Http {
                status: response.status,
            });
        }

        let parsed: GraphQlResponse = serde_json::from_str(&response.body)?;
        let report = parsed.into_report().ok_or(FetchError::NotFound)?;

        info!(
            "Fetched stats for {} with {} recent submissions",
            username,
            report.recent.len()
        );
        Ok(report)
    }
}
