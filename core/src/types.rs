//! Result types and search inputs for the host.io API.
//!
//! # Design
//! The API never distinguishes an absent field from an empty one, so every
//! field decodes to its empty value when missing and is skipped on encode when
//! empty. The scrape date is the exception: it has no meaningful zero and is
//! kept as an `Option`.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field searchable through the `/domains/{field}/{value}` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// IP address (v4 or v6), e.g. `8.8.8.8`.
    Ip,
    /// Nameserver record (root domain), e.g. `google.com`.
    Ns,
    /// Mailserver record (root domain), e.g. `google.com`.
    Mx,
    /// AS number, e.g. `AS15169`.
    Asn,
    /// Domains linking to the domain from their homepage.
    Backlinks,
    /// Domains redirecting to the domain from their homepage.
    Redirects,
    /// Adsense publisher ID, e.g. `pub-1556223355139109`.
    Adsense,
    /// Facebook handle, e.g. `spacenewsx`.
    Facebook,
    /// Twitter handle, e.g. `elonmusk`.
    Twitter,
    /// Instagram handle, e.g. `chadwickboseman`.
    Instagram,
    /// Google Tag Manager ID, e.g. `GTM-544JFM`.
    Gtm,
    /// Google Analytics ID, e.g. `UA-55552418`.
    GoogleAnalytics,
    /// Email address, e.g. `admin@google.com`.
    Email,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Ip,
        Field::Ns,
        Field::Mx,
        Field::Asn,
        Field::Backlinks,
        Field::Redirects,
        Field::Adsense,
        Field::Facebook,
        Field::Twitter,
        Field::Instagram,
        Field::Gtm,
        Field::GoogleAnalytics,
        Field::Email,
    ];

    /// Path segment used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Ip => "ip",
            Field::Ns => "ns",
            Field::Mx => "mx",
            Field::Asn => "asn",
            Field::Backlinks => "backlinks",
            Field::Redirects => "redirects",
            Field::Adsense => "adsense",
            Field::Facebook => "facebook",
            Field::Twitter => "twitter",
            Field::Instagram => "instagram",
            Field::Gtm => "gtm",
            Field::GoogleAnalytics => "googleanalytics",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known `Field`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Result-set slicing for the domains search. Zero values are sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub limit: u32,
    pub page: u32,
}

impl Pager {
    pub fn new(limit: u32, page: u32) -> Self {
        Self { limit, page }
    }
}

/// Metadata scraped from a domain's homepage (`/web/{domain}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// Position in the host.io top 10M ranking.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub rank: u64,
    /// URL the data was scraped from.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// IP the data was scraped from.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Length of the scraped HTML.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub length: u64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub encoding: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub copyright: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Domains linked from the homepage.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

/// DNS records stored for a domain (`/dns/{domain}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub a: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub aaaa: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub mx: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub ns: Vec<String>,
}

/// Counts of related domains per lookup kind (`/related/{domain}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<RelatedDomain>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<RelatedDomain>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub asn: Vec<RelatedDomain>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backlinks: Vec<RelatedDomain>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub mx: Vec<RelatedDomain>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub ns: Vec<RelatedDomain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedDomain {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub count: u64,
}

/// Geolocation and network details for one IP address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpInfo {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub country: String,
    /// `"lat,lon"` pair.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub loc: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub postal: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub asn: AsnInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsnInfo {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub asn: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub route: String,
    #[serde(
        rename = "type",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub kind: String,
}

/// Union of web, dns and related data plus IP info (`/full/{domain}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dns: DnsResponse,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "BTreeMap::is_empty")]
    pub ipinfo: BTreeMap<IpAddr, IpInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub web: WebResponse,
    #[serde(deserialize_with = "null_as_default")]
    pub related: RelatedResponse,
}

/// One page of domains matching a field/value search.
///
/// Only the key named by the searched `Field` is populated by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainsResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub ns: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub mx: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub asn: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub backlinks: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub adsense: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub facebook: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub twitter: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub instagram: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub gtm: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub googleanalytics: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub page: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_wire_names_match_serde() {
        for field in Field::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, field.as_str());
            assert_eq!(field.to_string(), field.as_str());
        }
    }

    #[test]
    fn field_parses_case_insensitively() {
        assert_eq!("GoogleAnalytics".parse::<Field>().unwrap(), Field::GoogleAnalytics);
        assert_eq!("ns".parse::<Field>().unwrap(), Field::Ns);
        let err = "whois".parse::<Field>().unwrap_err();
        assert_eq!(err, UnknownField("whois".to_string()));
    }

    #[test]
    fn missing_fields_decode_to_empty_values() {
        let web: WebResponse = serde_json::from_str(r#"{"domain":"example.com"}"#).unwrap();
        assert_eq!(web.domain, "example.com");
        assert_eq!(web.description, "");
        assert_eq!(web.rank, 0);
        assert!(web.links.is_empty());
        assert!(web.date.is_none());

        let full: FullResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(full, FullResponse::default());
    }

    #[test]
    fn null_fields_decode_to_empty_values() {
        let web: WebResponse = serde_json::from_str(
            r#"{"domain":"x.com","rank":null,"copyright":null,"links":null,"date":null}"#,
        )
        .unwrap();
        assert_eq!(web.domain, "x.com");
        assert_eq!(web.rank, 0);
        assert_eq!(web.copyright, "");
        assert!(web.links.is_empty());
        assert!(web.date.is_none());

        let full: FullResponse =
            serde_json::from_str(r#"{"dns":null,"ipinfo":null,"related":{"ip":null}}"#).unwrap();
        assert_eq!(full, FullResponse::default());

        let domains: DomainsResponse =
            serde_json::from_str(r#"{"ns":"google.com","domains":null,"page":null,"total":3}"#)
                .unwrap();
        assert!(domains.domains.is_empty());
        assert_eq!(domains.page, 0);
        assert_eq!(domains.total, 3);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dns: DnsResponse =
            serde_json::from_str(r#"{"domain":"x.io","cname":["y.io"],"a":["1.2.3.4"]}"#).unwrap();
        assert_eq!(dns.a, vec!["1.2.3.4"]);
    }

    #[test]
    fn empty_fields_are_omitted_on_encode() {
        let web = WebResponse {
            domain: "example.com".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&web).unwrap();
        assert_eq!(json, serde_json::json!({ "domain": "example.com" }));
    }

    #[test]
    fn domains_response_always_carries_page_and_total() {
        let json = serde_json::to_value(DomainsResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "page": 0, "total": 0 }));
    }

    #[test]
    fn web_date_parses_iso8601_with_millis() {
        let web: WebResponse =
            serde_json::from_str(r#"{"date":"2020-08-26T17:39:17.981Z"}"#).unwrap();
        let date = web.date.unwrap();
        assert_eq!(date.to_rfc3339(), "2020-08-26T17:39:17.981+00:00");
    }

    #[test]
    fn full_response_survives_encode_and_decode() {
        let full: FullResponse =
            serde_json::from_str(include_str!("../../mock-server/fixtures/full.json")).unwrap();
        let encoded = serde_json::to_string(&full).unwrap();
        let back: FullResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back, full);
    }

    #[test]
    fn ipinfo_is_keyed_by_ip_address() {
        let full: FullResponse = serde_json::from_str(
            r#"{"ipinfo":{"8.8.8.8":{"city":"Mountain View","asn":{"type":"business"}}}}"#,
        )
        .unwrap();
        let ip: IpAddr = "8.8.8.8".parse().unwrap();
        assert_eq!(full.ipinfo[&ip].city, "Mountain View");
        assert_eq!(full.ipinfo[&ip].asn.kind, "business");
    }
}
