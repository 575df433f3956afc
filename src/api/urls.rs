/// Resolves an image URL returned by the API for display. Relative paths are
/// joined onto `asset_base`; absolute and object-reference URLs pass through.
pub fn resolve_image_url(asset_base: &str, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with("http") || raw.starts_with("blob:") || raw.starts_with("data:") {
        return raw.to_string();
    }
    let base = asset_base.trim_end_matches('/');
    if raw.starts_with('/') {
        format!("{base}{raw}")
    } else {
        format!("{base}/{raw}")
    }
}
