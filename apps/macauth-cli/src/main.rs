//! macauth - sign and verify MAC-authenticated requests from the command line.
//!
//! # Usage
//!
//! ```text
//! MACAUTH_ID=dh37fgj492je MACAUTH_KEY=... macauth sign GET http://example.com:8000/resource?a=1
//! MACAUTH_CREDENTIALS_FILE=credentials.json macauth verify GET http://example.com:8000/resource?a=1 'Hawk id="..."'
//! ```
//!
//! `sign` prints the `Authorization` header value. `verify` prints the verified
//! identity as JSON and exits non-zero if verification fails.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MACAUTH_ID` | *(required for `sign`)* | Credential id |
//! | `MACAUTH_KEY` | *(required for `sign`)* | Shared secret |
//! | `MACAUTH_ALGORITHM` | `HMACSHA256` | `HMACSHA1` or `HMACSHA256` |
//! | `MACAUTH_EXT` | *(unset)* | Application data covered by the MAC |
//! | `MACAUTH_CREDENTIALS_FILE` | *(required for `verify`)* | JSON list of credentials |
//! | `MACAUTH_SCHEME` | `Hawk` | Authorization scheme |
//! | `MACAUTH_DEFAULT_PORT` | `80` | Port when the URL names none |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result, bail};
use http::header::AUTHORIZATION;
use http::request::Parts;
use macauth::request::{authenticate_request, sign_request};
use macauth::{AuthConfig, Credential, StaticCredentialResolver};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default algorithm for credentials taken from the environment.
const DEFAULT_ALGORITHM: &str = "HMACSHA256";

/// A parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Sign {
        method: String,
        url: String,
    },
    Verify {
        method: String,
        url: String,
        authorization: String,
    },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args {
            [cmd, method, url] if cmd == "sign" => Ok(Self::Sign {
                method: method.clone(),
                url: url.clone(),
            }),
            [cmd, method, url, authorization] if cmd == "verify" => Ok(Self::Verify {
                method: method.clone(),
                url: url.clone(),
                authorization: authorization.clone(),
            }),
            _ => bail!(
                "usage: macauth sign <METHOD> <URL>\n       macauth verify <METHOD> <URL> <AUTHORIZATION>"
            ),
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only the command output.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Build request parts for a method and absolute URL.
fn request_parts(method: &str, url: &str) -> Result<Parts> {
    let uri: http::Uri = url.parse().with_context(|| format!("invalid URL: {url}"))?;
    if uri.authority().is_none() {
        bail!("URL must be absolute: {url}");
    }

    let (parts, ()) = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(())
        .with_context(|| format!("invalid request: {method} {url}"))?
        .into_parts();
    Ok(parts)
}

/// Build the signing credential from `MACAUTH_*` environment variables.
fn credential_from_env() -> Result<Credential> {
    let id = std::env::var("MACAUTH_ID").context("MACAUTH_ID is not set")?;
    let key = std::env::var("MACAUTH_KEY").context("MACAUTH_KEY is not set")?;
    let algorithm =
        std::env::var("MACAUTH_ALGORITHM").unwrap_or_else(|_| DEFAULT_ALGORITHM.to_owned());
    Ok(Credential::new(id, key, algorithm))
}

fn sign(
    config: &AuthConfig,
    method: &str,
    url: &str,
    credential: &Credential,
    ext: Option<&str>,
) -> Result<String> {
    let mut parts = request_parts(method, url)?;

    sign_request(&mut parts, credential, ext, config)
        .with_context(|| format!("failed to sign {method} {url}"))?;

    let header = parts
        .headers
        .get(AUTHORIZATION)
        .context("signed request has no authorization header")?
        .to_str()
        .context("authorization header is not valid UTF-8")?;
    Ok(header.to_owned())
}

/// Read the JSON credential list named by `MACAUTH_CREDENTIALS_FILE`.
fn read_credentials(config: &AuthConfig) -> Result<String> {
    let path = config
        .credentials_file
        .as_deref()
        .context("MACAUTH_CREDENTIALS_FILE is not set")?;
    std::fs::read_to_string(path).with_context(|| format!("failed to read credentials file: {path}"))
}

fn verify(
    config: &AuthConfig,
    method: &str,
    url: &str,
    authorization: &str,
    credentials_json: &str,
) -> Result<String> {
    let resolver = StaticCredentialResolver::from_json(credentials_json)
        .context("invalid credentials file")?;

    info!(credentials = resolver.len(), "loaded credentials");

    let mut parts = request_parts(method, url)?;
    parts.headers.insert(
        AUTHORIZATION,
        authorization
            .parse::<http::HeaderValue>()
            .context("authorization header is not a valid header value")?,
    );

    match authenticate_request(&parts, &resolver, config) {
        Ok(identity) => Ok(serde_json::to_string_pretty(&identity)?),
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "verification failed");
            bail!("request rejected ({})", e.status_code())
        }
    }
}

fn main() -> Result<()> {
    let config = AuthConfig::from_env();
    init_tracing(&config.log_level)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match Command::parse(&args)? {
        Command::Sign { method, url } => {
            let credential = credential_from_env()?;
            let ext = std::env::var("MACAUTH_EXT").ok();
            sign(&config, &method, &url, &credential, ext.as_deref())?
        }
        Command::Verify {
            method,
            url,
            authorization,
        } => {
            let credentials_json = read_credentials(&config)?;
            verify(&config, &method, &url, &authorization, &credentials_json)?
        }
    };

    println!("{output}");
    Ok(())
}
