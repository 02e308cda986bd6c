use crate::UrlError;
use url::Url;

/// Canonicalizes a raw URL string
///
/// # Normalization Steps
///
/// 1. Parse as an absolute URL; reject if malformed
/// 2. Accept only the `http` and `https` schemes
/// 3. Strip the fragment
/// 4. Strip a single trailing slash from the path, except when the path is
///    exactly `/`
///
/// Normalizing an already-normalized URL returns it unchanged, so the
/// visited set can key on the normalized string.
///
/// # Examples
///
/// ```
/// use pagesift::url::normalize_url;
///
/// let url = normalize_url("https://example.com/docs/#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        url.set_path(&trimmed);
    }

    Ok(url)
}
