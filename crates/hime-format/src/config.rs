//! Read-only settings consumed by the renderer.

use url::Url;

use crate::dialect::DialectKind;

/// Which bare URLs render as inline images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageConfig {
    /// Hosts allowed to serve inline images (`host` or `host:port`).
    pub domains: Vec<String>,
    /// File extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl ImageConfig {
    /// Check whether `url` points at an allowed image.
    ///
    /// Both the extension of the last path segment and the host must be
    /// listed.
    pub fn allows(&self, url: &Url) -> bool {
        let Some(ext) = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
        else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        self.domains.iter().any(|d| *d == host)
    }
}

/// Interwiki prefix: `key:path` links to `url` followed by `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterwikiLink {
    pub key: String,
    pub url: String,
}

impl InterwikiLink {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}

/// Settings shared by every render call.
///
/// Never mutated by the renderer, so one instance can serve many threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatConfig {
    pub image: ImageConfig,
    pub links: Vec<InterwikiLink>,
    /// Dialect used when the text does not announce one.
    pub default_dialect: DialectKind,
}
