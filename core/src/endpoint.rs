//! URL construction for host.io resources.
//!
//! Pure functions of their inputs: no network, no client state. Segments are
//! pushed through `url`'s path-segment API so reserved characters are
//! percent-encoded and can never change which resource is addressed.

use url::Url;

use crate::error::{Error, Result};
use crate::types::Pager;

/// Top-level API resource addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Web,
    Dns,
    Related,
    Full,
    Domains,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Web => "web",
            Resource::Dns => "dns",
            Resource::Related => "related",
            Resource::Full => "full",
            Resource::Domains => "domains",
        }
    }
}

/// Parse and check a base URL. It must be http(s) and able to carry a path.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::InvalidConfiguration(format!("base URL {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidConfiguration(format!(
                "base URL {raw:?}: unsupported scheme {other:?}"
            )))
        }
    }
    if url.cannot_be_a_base() {
        return Err(Error::InvalidConfiguration(format!(
            "base URL {raw:?} cannot carry path segments"
        )));
    }
    Ok(url)
}

/// Build `base/resource/segment.../` with an optional `limit`/`page` query.
pub fn build_url(
    base: &Url,
    resource: Resource,
    segments: &[&str],
    pager: Option<Pager>,
) -> Result<Url> {
    for segment in segments {
        validate_segment(segment)?;
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|()| {
            Error::InvalidConfiguration(format!("base URL {base} cannot carry path segments"))
        })?;
        path.pop_if_empty();
        path.push(resource.as_str());
        path.extend(segments);
    }

    if let Some(pager) = pager {
        url.query_pairs_mut()
            .append_pair("limit", &pager.limit.to_string())
            .append_pair("page", &pager.page.to_string());
    }

    Ok(url)
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.trim().is_empty() {
        return Err(Error::InvalidArgument("path segment must not be empty".to_string()));
    }
    // `url` strips tabs and newlines before resolving dot segments, so
    // `".\t."` would otherwise become `..` and pop the resource.
    if segment.chars().any(char::is_control) {
        return Err(Error::InvalidArgument(format!(
            "path segment {segment:?} contains control characters"
        )));
    }
    // `url` silently drops dot segments, which would address a different resource.
    if segment == "." || segment == ".." {
        return Err(Error::InvalidArgument(format!(
            "path segment {segment:?} is not allowed"
        )));
    }
    Ok(())
}
