//! Job identity - where a job lives and how to authenticate against it

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while building a job identity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Must supply both username and password")]
    PartialCredentials,
}

/// Basic-auth credentials for the Jenkins server
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A single remote job and its canonical base URL
///
/// Immutable once built. The canonical URL does not depend on whether the
/// caller wrote the host with a protocol or with stray slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobIdentity {
    credentials: Option<Credentials>,
    url: String,
}

fn protocol_prefix() -> &'static Regex {
    static PROTOCOL: OnceLock<Regex> = OnceLock::new();
    PROTOCOL.get_or_init(|| Regex::new(r"(?i)^https?://").expect("static regex"))
}

/// Normalize `host` and `path` into `http(s)://host/path`
pub fn canonical_url(host: &str, path: &str, use_tls: bool) -> String {
    let scheme = if use_tls { "https://" } else { "http://" };

    let host = host.trim();
    let host = protocol_prefix().replace(host, "");
    let host = host.trim_end_matches('/');
    let path = path.trim().trim_matches('/');

    if path.is_empty() {
        format!("{}{}", scheme, host)
    } else {
        format!("{}{}/{}", scheme, host, path)
    }
}

impl JobIdentity {
    /// Build an identity, rejecting a lone username or password
    ///
    /// Empty strings are treated as absent.
    pub fn new(
        host: impl Into<String>,
        path: impl Into<String>,
        use_tls: bool,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());

        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        let host: String = host.into();
        let path: String = path.into();
        let url = canonical_url(&host, &path, use_tls);

        Ok(Self { credentials, url })
    }

    /// Canonical base URL of the job
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}
