//! Typed async client for the host.io domain-intelligence API.
//!
//! # Overview
//! Five read-only lookups (`web`, `dns`, `related`, `full`, `domains`), each a
//! single authenticated GET whose JSON body decodes into a plain result type.
//!
//! # Design
//! - `endpoint` builds URLs as a pure function of base URL, resource, path
//!   segments and pager.
//! - `HostIoClient::build_*` produces an `HttpRequest`, `Transport` performs
//!   the round-trip, and `parse_response` classifies and decodes the result.
//! - `RequestContext` carries caller-side cancellation and deadlines.
//! - No retries, caching or rate limiting: every failure is returned as one
//!   `Error` value.
//!
//! ```no_run
//! use hostio::{HostIoClient, RequestContext};
//!
//! # async fn demo() -> hostio::Result<()> {
//! let client = HostIoClient::new("token")?;
//! let dns = client.dns(&RequestContext::background(), "example.com").await?;
//! println!("{:?}", dns.a);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_response, HostIoClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use context::RequestContext;
pub use endpoint::Resource;
pub use error::{Error, Result};
pub use http::{HttpRequest, HttpResponse};
pub use tokio_util::sync::CancellationToken;
pub use transport::Transport;
pub use types::{
    AsnInfo, DnsResponse, DomainsResponse, Field, FullResponse, IpInfo, Pager, RelatedDomain,
    RelatedResponse, UnknownField, WebResponse,
};
