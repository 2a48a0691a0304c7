// src/core/sanitize.rs

/// File-system friendly stem: ASCII alphanumerics kept, whitespace runs become
/// one `_`, `-`/`_` kept, everything else dropped. Empty → `fallback`.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Last non-empty path segment of a URL, query/fragment stripped.
/// `https://x/up-police-2026/` → `up-police-2026`.
pub fn url_slug(url: &str) -> Option<&str> {
    let no_frag = url.split(['#', '?']).next().unwrap_or(url);
    let path = match no_frag.find("://") {
        Some(i) => {
            let rest = &no_frag[i + 3..];
            rest.find('/').map(|j| &rest[j..]).unwrap_or("")
        }
        None => no_frag,
    };
    path.split('/').rev().find(|seg| !seg.is_empty())
}

/// Default export stem for a page URL.
pub fn stem_for_url(url: &str, fallback: &str) -> String {
    match url_slug(url) {
        Some(slug) => sanitize_filename(slug.trim_end_matches(".html").trim_end_matches(".php"), fallback),
        None => s!(fallback),
    }
}
