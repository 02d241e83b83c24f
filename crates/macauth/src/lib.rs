//! Shared-secret HMAC request authentication.
//!
//! A client signs a handful of observable request attributes (timestamp,
//! method, path and query, host, port and an optional application string)
//! with a key it shares with the server, and sends the result in a header of
//! comma-separated `key="value"` pairs. The server looks up the same key by the
//! opaque `id` carried in the header, recomputes the MAC and accepts the
//! request only if both match.
//!
//! # Usage
//!
//! ```rust
//! use macauth::credentials::{Credential, StaticCredentialResolver};
//! use macauth::{HeaderBuilder, RequestUri, authenticate};
//!
//! let credential = Credential::new("dh37fgj492je", "werxhqb98rpaxn39848xrunpaw3489ruxnpaw398", "HMACSHA256")
//!     .with_principal_name("Steve");
//! let resolver = StaticCredentialResolver::new(vec![credential.clone()]);
//!
//! let uri = RequestUri::new("/resource", Some("a=1&b=2"), 8000);
//! let header = HeaderBuilder::new("example.com", "GET", &uri)
//!     .ext("some-app-data")
//!     .build(&credential)
//!     .unwrap();
//!
//! let identity = authenticate(&header, "example.com", "GET", &uri, &resolver).unwrap();
//! assert_eq!(identity.principal_name, "Steve");
//! ```
//!
//! # Modules
//!
//! - [`attributes`] - Parsing of the `key="value"` attribute list
//! - [`canonical`] - Canonical string construction and MAC computation
//! - [`config`] - Environment-driven configuration
//! - [`credentials`] - Credentials, supported algorithms and the resolver trait
//! - [`error`] - Authentication error types
//! - [`header`] - Client-side header construction
//! - [`identity`] - The identity produced by a successful verification
//! - [`request`] - Adapters for `http::request::Parts`
//! - [`verify`] - Server-side verification

pub mod attributes;
pub mod canonical;
pub mod config;
pub mod credentials;
pub mod error;
pub mod header;
pub mod identity;
pub mod request;
pub mod verify;

pub use canonical::{RequestUri, compute_mac};
pub use config::AuthConfig;
pub use credentials::{Algorithm, Credential, CredentialResolver, StaticCredentialResolver};
pub use error::AuthError;
pub use header::{HeaderBuilder, build_header};
pub use identity::VerifiedIdentity;
pub use verify::authenticate;
