//! End-to-end tests for macauth signing and verification.
//!
//! These tests exercise the public API only: headers built by the client side
//! are fed to the verifier through the same resolver a server would use.
//!
//! Run them with:
//! ```text
//! cargo test -p macauth-integration
//! ```

use std::sync::Once;

use macauth::{Credential, RequestUri, StaticCredentialResolver};

static INIT: Once = Once::new();

/// Shared id of the reference credential.
pub const TEST_ID: &str = "dh37fgj492je";

/// Shared key of the reference credential.
pub const TEST_KEY: &str = "werxhqb98rpaxn39848xrunpaw3489ruxnpaw398";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The reference credential with a principal name and one extra claim.
#[must_use]
pub fn test_credential(algorithm: &str) -> Credential {
    Credential::new(TEST_ID, TEST_KEY, algorithm)
        .with_principal_name("Steve")
        .with_claim("department", "engineering")
}

/// A resolver holding the given credentials.
#[must_use]
pub fn resolver(credentials: impl IntoIterator<Item = Credential>) -> StaticCredentialResolver {
    init_tracing();
    StaticCredentialResolver::new(credentials)
}

/// The reference request target.
#[must_use]
pub fn test_uri() -> RequestUri {
    RequestUri::new("/resource", Some("a=1&b=2"), 8000)
}

mod test_concurrency;
mod test_errors;
mod test_golden;
