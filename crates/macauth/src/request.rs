//! Adapters between [`http::request::Parts`] and the signing primitives.
//!
//! The `Authorization` header carries the attribute list behind an auth
//! scheme (`Hawk` by default):
//!
//! ```text
//! Authorization: Hawk id="dh37fgj492je", ts="1353832234", mac="...", ext="..."
//! ```
//!
//! The request port is taken from the URI, then from a `:port` suffix on the
//! host, then from the URI scheme, and finally from [`AuthConfig::default_port`].

use http::header::{AUTHORIZATION, HOST, HeaderValue};
use http::request::Parts;
use tracing::debug;

use crate::canonical::RequestUri;
use crate::config::AuthConfig;
use crate::credentials::{Credential, CredentialResolver};
use crate::error::AuthError;
use crate::header::HeaderBuilder;
use crate::identity::VerifiedIdentity;
use crate::verify::authenticate;

/// Verify the `Authorization` header of an incoming request.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] if the header or host is missing or not
/// valid UTF-8, and any error of [`authenticate`] otherwise.
pub fn authenticate_request(
    parts: &Parts,
    resolver: &dyn CredentialResolver,
    config: &AuthConfig,
) -> Result<VerifiedIdentity, AuthError> {
    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::InvalidInput("authorization header"))?
        .to_str()
        .map_err(|_| AuthError::InvalidInput("authorization header"))?;

    let attributes = strip_scheme(authorization, &config.scheme);
    let host = request_host(parts)?;
    let uri = request_uri(parts, &host, config);

    debug!(host = %host, port = uri.port, "Authenticating HTTP request");

    authenticate(attributes, &host, parts.method.as_str(), &uri, resolver)
}

/// Sign an outgoing request by inserting an `Authorization` header.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] if the request has no host or the
/// header cannot be encoded, and any error of [`HeaderBuilder::build`] otherwise.
pub fn sign_request(
    parts: &mut Parts,
    credential: &Credential,
    ext: Option<&str>,
    config: &AuthConfig,
) -> Result<(), AuthError> {
    let host = request_host(parts)?;
    let uri = request_uri(parts, &host, config);

    let mut builder = HeaderBuilder::new(&host, parts.method.as_str(), &uri);
    if let Some(ext) = ext {
        builder = builder.ext(ext);
    }
    let attributes = builder.build(credential)?;

    let value = HeaderValue::from_str(&format!("{} {attributes}", config.scheme))
        .map_err(|_| AuthError::InvalidInput("authorization header"))?;
    parts.headers.insert(AUTHORIZATION, value);

    Ok(())
}

/// Split a host header value into the hostname and an optional port.
///
/// Bracketed IPv6 literals keep their brackets.
///
/// # Examples
///
/// ```
/// use macauth::request::split_host;
///
/// assert_eq!(split_host("example.com:8000"), ("example.com", Some(8000)));
/// assert_eq!(split_host("example.com"), ("example.com", None));
/// assert_eq!(split_host("[::1]:443"), ("[::1]", Some(443)));
/// ```
#[must_use]
pub fn split_host(host: &str) -> (&str, Option<u16>) {
    let boundary = if host.starts_with('[') {
        host.find(']').map_or(host.len(), |i| i + 1)
    } else {
        0
    };

    match host[boundary..].rfind(':') {
        Some(i) => {
            let (name, port) = host.split_at(boundary + i);
            match port[1..].parse() {
                Ok(port) => (name, Some(port)),
                Err(_) => (host, None),
            }
        }
        None => (host, None),
    }
}

/// Remove a leading auth scheme, matched case-insensitively.
///
/// A value without the scheme is returned unchanged.
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> &'a str {
    let value = value.trim_start();
    match value.split_once(char::is_whitespace) {
        Some((prefix, rest)) if prefix.eq_ignore_ascii_case(scheme) => rest.trim_start(),
        _ => value,
    }
}

/// The declared host: the `Host` header, or the URI authority without userinfo.
fn request_host(parts: &Parts) -> Result<String, AuthError> {
    if let Some(value) = parts.headers.get(HOST) {
        return value
            .to_str()
            .map(ToOwned::to_owned)
            .map_err(|_| AuthError::InvalidInput("host"));
    }

    let authority = parts.uri.authority().ok_or(AuthError::InvalidInput("host"))?;
    Ok(match authority.port() {
        Some(port) => format!("{}:{port}", authority.host()),
        None => authority.host().to_owned(),
    })
}

/// The request target with its resolved port.
fn request_uri(parts: &Parts, host: &str, config: &AuthConfig) -> RequestUri {
    let port = parts
        .uri
        .port_u16()
        .or_else(|| split_host(host).1)
        .or_else(|| match parts.uri.scheme_str() {
            Some("https") => Some(443),
            Some("http") => Some(80),
            _ => None,
        })
        .unwrap_or(config.default_port);

    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or("/", http::uri::PathAndQuery::as_str);

    RequestUri::from_path_and_query(path_and_query, port)
}
