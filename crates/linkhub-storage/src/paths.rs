//! Object path and URL helpers shared by the locator, uploader and issuer.

use chrono::{DateTime, SecondsFormat, Utc};

/// Strip leading slashes from an object path. Returns `None` when nothing
/// is left.
pub fn normalize_object_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_start_matches('/');
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Join a base URL and a path with exactly one `/` at the join point.
/// Separators elsewhere are left alone.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Build a default upload key: `{prefix}{timestamp}-{file_name}`.
///
/// The timestamp is RFC 3339 with `:` and `.` replaced by `-` so the key is
/// safe in URLs. Only the final component of `file_name` is used.
pub fn upload_key(prefix: &str, file_name: &str, now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("upload.bin");

    let prefix = prefix.trim_start_matches('/');
    if prefix.is_empty() || prefix.ends_with('/') {
        format!("{prefix}{stamp}-{name}")
    } else {
        format!("{prefix}/{stamp}-{name}")
    }
}
