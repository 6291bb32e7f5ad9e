// src/domain/media.rs

use crate::errors::ServerError;
use url::Url;

/// Scheme and host of the request a response is being built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: String,
    /// Host including the port when it is not the default one.
    pub host: String,
}

impl RequestContext {
    /// Validates that `scheme://host/` forms a bare origin.
    pub fn new(scheme: &str, host: &str) -> Result<Self, ServerError> {
        let scheme = scheme.trim().to_ascii_lowercase();
        let host = host.trim();

        if scheme != "http" && scheme != "https" {
            return Err(ServerError::BadRequest(format!("unsupported scheme {scheme:?}")));
        }
        if host.is_empty() {
            return Err(ServerError::BadRequest("missing host".into()));
        }

        let origin = Url::parse(&format!("{scheme}://{host}/"))
            .map_err(|e| ServerError::BadRequest(format!("invalid host {host:?}: {e}")))?;

        let is_bare_origin = origin.username().is_empty()
            && origin.password().is_none()
            && origin.path() == "/"
            && origin.query().is_none()
            && origin.fragment().is_none();
        if !is_bare_origin {
            return Err(ServerError::BadRequest(format!("invalid host {host:?}")));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
        })
    }
}

/// Relative storage path of an uploaded asset, e.g. "images/x.jpg".
/// Empty paths mean no file is attached.
pub fn media_reference(path: &str) -> Option<&str> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// `/{mount_prefix}/{relative_path}`, or `None` when no asset is attached.
pub fn mount_relative_url(relative_path: Option<&str>, mount_prefix: &str) -> Option<String> {
    let path = relative_path.and_then(media_reference)?;
    let prefix = mount_prefix.trim_matches('/');
    if prefix.is_empty() {
        Some(format!("/{path}"))
    } else {
        Some(format!("/{prefix}/{path}"))
    }
}

/// `{scheme}://{host}/{mount_prefix}/{relative_path}`, or `None` when no
/// asset is attached.
pub fn build_absolute_url(
    scheme: &str,
    host: &str,
    relative_path: Option<&str>,
    mount_prefix: &str,
) -> Option<String> {
    let path = mount_relative_url(relative_path, mount_prefix)?;
    Some(format!("{scheme}://{host}{path}"))
}
