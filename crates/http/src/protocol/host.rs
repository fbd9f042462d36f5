//! Target host descriptor.
//!
//! [`HttpHost`] is the value type of the `http.target_host` context attribute:
//! the scheme, host name and optional port a request is aimed at.

use std::fmt;
use std::str::FromStr;

use http::Uri;
use http::uri::Authority;

use crate::ensure;
use crate::protocol::BuildError;

/// Scheme assumed when none is given.
pub const DEFAULT_SCHEME: &str = "http";

/// Holds all of the variables needed to describe an HTTP connection to a host.
///
/// Host names are normalized to lower case, so two descriptors naming the same
/// host with different casing compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpHost {
    scheme: String,
    hostname: String,
    port: Option<u16>,
}

impl HttpHost {
    /// Creates a host descriptor with the default scheme and no explicit port.
    pub fn new<S: AsRef<str>>(hostname: S) -> Result<Self, BuildError> {
        let hostname = hostname.as_ref().trim();
        ensure!(!hostname.is_empty(), BuildError::invalid_host("host name is empty"));
        ensure!(
            !hostname.contains(|c: char| c.is_ascii_whitespace() || c == '/'),
            BuildError::invalid_host(format!("illegal character in host name `{hostname}`"))
        );

        Ok(Self { scheme: DEFAULT_SCHEME.to_string(), hostname: hostname.to_ascii_lowercase(), port: None })
    }

    /// Returns this descriptor with the given port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Returns this descriptor with the given scheme, lower-cased.
    #[must_use]
    pub fn with_scheme<S: AsRef<str>>(mut self, scheme: S) -> Self {
        self.scheme = scheme.as_ref().to_ascii_lowercase();
        self
    }

    /// Extracts the target host from an absolute URI.
    ///
    /// Fails when the URI has no authority, e.g. for origin-form targets like `/index.html`.
    pub fn from_uri(uri: &Uri) -> Result<Self, BuildError> {
        let authority = uri.authority().ok_or_else(|| BuildError::invalid_host(format!("uri `{uri}` has no host")))?;
        let host = Self::from_authority(authority)?;
        Ok(match uri.scheme_str() {
            Some(scheme) => host.with_scheme(scheme),
            None => host,
        })
    }

    fn from_authority(authority: &Authority) -> Result<Self, BuildError> {
        let host = Self::new(authority.host())?;
        Ok(match authority.port_u16() {
            Some(port) => host.with_port(port),
            None => host,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the `host[:port]` form used for the `Host` header.
    pub fn to_host_string(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.hostname, port),
            None => self.hostname.clone(),
        }
    }
}

impl fmt::Display for HttpHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.hostname)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// Parses either `scheme://host[:port]` or a bare `host[:port]`.
impl FromStr for HttpHost {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains("://") {
            let uri = s.parse::<Uri>().map_err(|e| BuildError::uri_syntax(s, e))?;
            Self::from_uri(&uri)
        } else {
            let authority = s.parse::<Authority>().map_err(|e| BuildError::uri_syntax(s, e))?;
            Self::from_authority(&authority)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full() {
        let host: HttpHost = "HTTPS://Example.ORG:8443".parse().unwrap();
        assert_eq!(host.scheme(), "https");
        assert_eq!(host.hostname(), "example.org");
        assert_eq!(host.port(), Some(8443));
        assert_eq!(host.to_string(), "https://example.org:8443");
        assert_eq!(host.to_host_string(), "example.org:8443");
    }

    #[test]
    fn parse_bare_authority() {
        let host: HttpHost = "localhost:8080".parse().unwrap();
        assert_eq!(host, HttpHost::new("localhost").unwrap().with_port(8080));
        assert_eq!(host.scheme(), DEFAULT_SCHEME);
    }

    #[test]
    fn from_origin_form_uri_fails() {
        let uri = Uri::from_static("/index.html");
        assert!(matches!(HttpHost::from_uri(&uri), Err(BuildError::InvalidHost { .. })));
    }

    #[test]
    fn empty_host_rejected() {
        assert!(matches!(HttpHost::new("  "), Err(BuildError::InvalidHost { .. })));
        assert!(matches!(HttpHost::new("a b"), Err(BuildError::InvalidHost { .. })));
    }
}
