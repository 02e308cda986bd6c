use url::Url;

/// File extensions that never lead to crawlable HTML
const SKIP_EXTENSIONS: &[&str] = &[
    "pdf", "zip", "tar", "gz", "jpg", "jpeg", "png", "gif", "svg", "webp", "mp4", "mp3", "css",
    "js",
];

/// Path segments that mark admin or auth areas
const SKIP_PATH_SEGMENTS: &[&str] = &[
    "wp-admin", "wp-content", "admin", "login", "signin", "signup", "register",
];

/// Decides whether a discovered link may enter the frontier
///
/// Applied once per candidate at enqueue time, never re-applied at dequeue.
/// Rejections are silent: a filtered link is neither a page nor an error.
pub fn should_crawl(candidate: &Url, seed_host: &str, same_domain_only: bool) -> bool {
    if same_domain_only && candidate.host_str() != Some(seed_host) {
        return false;
    }

    if has_skipped_extension(candidate.path()) {
        return false;
    }

    if candidate
        .path_segments()
        .map_or(false, |mut segments| {
            segments.any(|segment| SKIP_PATH_SEGMENTS.contains(&segment))
        })
    {
        return false;
    }

    // Fragments are stripped during normalization; this guards entries that
    // reached the filter without passing through it.
    if candidate.as_str().contains('#') {
        return false;
    }

    // Pseudo-scheme hrefs that survived resolution as path text
    let path = candidate.path().trim_start_matches('/');
    if path.starts_with("javascript:") || path.starts_with("mailto:") || path.starts_with("tel:") {
        return false;
    }

    true
}

fn has_skipped_extension(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((_, extension)) => SKIP_EXTENSIONS
            .iter()
            .any(|skip| skip.eq_ignore_ascii_case(extension)),
        None => false,
    }
}
