//! Typed host.io client.
//!
//! # Design
//! `HostIoClient` holds an immutable `ClientConfig` and a `Transport`; it is
//! cheap to clone and safe to share across tasks. Every operation is split
//! into a pure `build_*` method producing an `HttpRequest` and a pure
//! `parse_response` step consuming an `HttpResponse`, with the async methods
//! composing both around one `Transport::execute` round-trip.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::endpoint::{build_url, Resource};
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{
    DnsResponse, DomainsResponse, Field, FullResponse, Pager, RelatedResponse, WebResponse,
};

const SNIPPET_LEN: usize = 256;

#[derive(Debug, Clone)]
pub struct HostIoClient {
    config: ClientConfig,
    transport: Transport,
}

impl HostIoClient {
    /// Client for the public API with default settings.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::builder(token).build()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = Transport::new(&config)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Metadata scraped from the domain's homepage.
    pub async fn web(&self, ctx: &RequestContext, domain: &str) -> Result<WebResponse> {
        let request = self.build_web(domain)?;
        self.send(ctx, &request).await
    }

    /// All DNS records stored for the domain.
    pub async fn dns(&self, ctx: &RequestContext, domain: &str) -> Result<DnsResponse> {
        let request = self.build_dns(domain)?;
        self.send(ctx, &request).await
    }

    /// Counts of related domains for every supported lookup.
    pub async fn related(&self, ctx: &RequestContext, domain: &str) -> Result<RelatedResponse> {
        let request = self.build_related(domain)?;
        self.send(ctx, &request).await
    }

    /// Web, DNS, related and IP info in a single call.
    pub async fn full(&self, ctx: &RequestContext, domain: &str) -> Result<FullResponse> {
        let request = self.build_full(domain)?;
        self.send(ctx, &request).await
    }

    /// Domains associated with `field = value`, with the total match count.
    pub async fn domains(
        &self,
        ctx: &RequestContext,
        field: Field,
        value: &str,
        pager: Option<Pager>,
    ) -> Result<DomainsResponse> {
        let request = self.build_domains(field, value, pager)?;
        self.send(ctx, &request).await
    }

    pub fn build_web(&self, domain: &str) -> Result<HttpRequest> {
        self.build(Resource::Web, &[domain], None)
    }

    pub fn build_dns(&self, domain: &str) -> Result<HttpRequest> {
        self.build(Resource::Dns, &[domain], None)
    }

    pub fn build_related(&self, domain: &str) -> Result<HttpRequest> {
        self.build(Resource::Related, &[domain], None)
    }

    pub fn build_full(&self, domain: &str) -> Result<HttpRequest> {
        self.build(Resource::Full, &[domain], None)
    }

    pub fn build_domains(&self, field: Field, value: &str, pager: Option<Pager>) -> Result<HttpRequest> {
        self.build(Resource::Domains, &[field.as_str(), value], pager)
    }

    fn build(&self, resource: Resource, segments: &[&str], pager: Option<Pager>) -> Result<HttpRequest> {
        let url = build_url(self.config.base_url(), resource, segments, pager)?;
        Ok(HttpRequest {
            url,
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), format!("Bearer {}", self.config.token())),
                ("user-agent".to_string(), self.config.user_agent().to_string()),
            ],
        })
    }

    async fn send<T: DeserializeOwned>(&self, ctx: &RequestContext, request: &HttpRequest) -> Result<T> {
        let response = self.transport.execute(request, ctx).await?;
        parse_response(response)
    }
}

/// Classify a response: 200 decodes into `T`, anything else is `Error::Api`.
pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|source| {
        let type_name = std::any::type_name::<T>();
        warn!(type_name, error = %source, "failed to decode host.io response");
        Error::Decode {
            type_name,
            snippet: snippet(&response.body),
            source,
        }
    })
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, "host.io returned an error status");
    Err(Error::Api {
        status: response.status,
        body: response.body.clone(),
    })
}

fn snippet(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
