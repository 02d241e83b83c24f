//! Server-side verification.
//!
//! This module implements the verification flow:
//!
//! 1. Reject empty arguments.
//! 2. Parse the attribute list and check that exactly the known attributes
//!    are present (`id`, `ts`, `mac`, and optionally `ext`).
//! 3. Resolve the credential for `id` through the [`CredentialResolver`].
//! 4. Recompute the MAC from the request and the credential.
//! 5. Compare it to the supplied MAC in constant time.
//!
//! Every step is a hard gate: the first failure is returned and nothing is retried.
//! The main entry point is [`authenticate`].

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::attributes::{ParsedAttributes, parse_attributes};
use crate::canonical::{RequestUri, compute_mac};
use crate::credentials::{Algorithm, Credential, CredentialResolver};
use crate::error::AuthError;
use crate::identity::VerifiedIdentity;

/// Attributes every header must carry.
pub const REQUIRED_ATTRIBUTES: [&str; 3] = ["id", "ts", "mac"];

/// Attributes a header may carry.
pub const SUPPORTED_ATTRIBUTES: [&str; 4] = ["id", "ts", "mac", "ext"];

/// Verify a signed request.
///
/// `host` is the declared `Host` header value. It flows into the canonical
/// string as received (lowercased, port suffix kept), while the port line is
/// taken from `uri.port`.
///
/// # Errors
///
/// Returns an [`AuthError`] if:
/// - `authorization`, `host` or `method` is empty
/// - a required attribute is missing or an unknown one is present
/// - the id cannot be resolved to a usable credential
/// - the credential's algorithm is not supported
/// - the MAC does not match
pub fn authenticate(
    authorization: &str,
    host: &str,
    method: &str,
    uri: &RequestUri,
    resolver: &dyn CredentialResolver,
) -> Result<VerifiedIdentity, AuthError> {
    if authorization.trim().is_empty() {
        return Err(AuthError::InvalidInput("authorization header"));
    }
    if host.trim().is_empty() {
        return Err(AuthError::InvalidInput("host"));
    }
    if method.trim().is_empty() {
        return Err(AuthError::InvalidInput("method"));
    }

    let attributes = parse_attributes(authorization)?;
    check_attribute_names(&attributes)?;

    // Presence was checked above.
    let id = attributes.get("id").unwrap_or_default();
    let ts = attributes.get("ts").unwrap_or_default();
    let supplied_mac = attributes.get("mac").unwrap_or_default();
    let ext = attributes.get("ext");

    debug!(id, host, method, port = uri.port, "Verifying request MAC");

    let credential = resolve_credential(resolver, id)?;
    let algorithm = Algorithm::from_name(&credential.algorithm)?;

    let expected_mac = compute_mac(
        host,
        method,
        &uri.path_and_query(),
        uri.port,
        ext,
        ts,
        &credential,
    )?;

    if expected_mac.as_bytes().ct_eq(supplied_mac.as_bytes()).into() {
        debug!(id, %algorithm, "MAC verification succeeded");
        Ok(VerifiedIdentity::from_credential(&credential))
    } else {
        debug!(id, %algorithm, "MAC mismatch");
        Err(AuthError::BadMac)
    }
}

/// Check that all required attributes are present and no unknown ones are.
fn check_attribute_names(attributes: &ParsedAttributes) -> Result<(), AuthError> {
    let missing: Vec<&str> = REQUIRED_ATTRIBUTES
        .into_iter()
        .filter(|name| !attributes.contains(name))
        .collect();
    if !missing.is_empty() {
        return Err(AuthError::MissingAttributes(missing.join(", ")));
    }

    let unknown: Vec<&str> = attributes
        .keys()
        .filter(|name| !SUPPORTED_ATTRIBUTES.contains(name))
        .collect();
    if !unknown.is_empty() {
        return Err(AuthError::UnknownAttributes(unknown.join(", ")));
    }

    Ok(())
}

/// Look up the credential for `id` and check that it is usable.
fn resolve_credential(
    resolver: &dyn CredentialResolver,
    id: &str,
) -> Result<Credential, AuthError> {
    let credential = match resolver.resolve(id) {
        Ok(Some(credential)) => credential,
        Ok(None) => {
            debug!(id, "No credential for id");
            return Err(AuthError::UnknownPrincipal(id.to_owned()));
        }
        Err(e) => {
            warn!(id, error = %e, "Credential resolver failed");
            return Err(AuthError::UnknownPrincipal(id.to_owned()));
        }
    };

    credential.ensure_usable()?;
    Ok(credential)
}
