//! Field-level grammars: plugin identifiers, versions, version ranges, URLs,
//! email addresses, and entry-point extensions.
//!
//! Patterns are compiled with the `regex` crate, which matches in linear time,
//! so hostile manifests cannot stall the host with pathological input.

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;
use url::Url;

static PLUGIN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z](?:[a-z0-9-]*[a-z0-9])?$").expect("plugin id pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Range operators accepted in `lokusVersion`. Two-character operators come
/// first so `>=` is not read as `>` followed by `=1.0.0`.
pub const RANGE_OPERATORS: [&str; 6] = [">=", "<=", "^", "~", ">", "<"];

pub const MAIN_EXTENSIONS: [&str; 3] = [".js", ".mjs", ".ts"];

/// Lowercase letters, digits and hyphens; starts with a letter and does not
/// end with a hyphen.
pub fn is_valid_plugin_id(id: &str) -> bool {
    PLUGIN_ID.is_match(id)
}

/// `MAJOR.MINOR.PATCH` with optional `-prerelease` and `+build` suffixes,
/// under strict semver rules: no leading zeros in numeric parts, and each
/// component fits in a `u64`.
pub fn is_valid_version(version: &str) -> bool {
    Version::parse(version).is_ok()
}

/// A bare version, or one of [`RANGE_OPERATORS`] followed by a version.
pub fn is_valid_version_range(range: &str) -> bool {
    let rest = RANGE_OPERATORS
        .iter()
        .find_map(|op| range.strip_prefix(op))
        .unwrap_or(range);
    is_valid_version(rest)
}

pub fn has_valid_main_extension(main: &str) -> bool {
    MAIN_EXTENSIONS.iter().any(|ext| main.ends_with(ext))
}

/// Absolute URL with an `http` or `https` scheme.
pub fn is_valid_http_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Any absolute URL.
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}

/// Turn a display name into a plugin id: lowercase, runs of anything other
/// than ASCII letters and digits collapse to one hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Inverse of [`slugify`] for display purposes: `note-sync` → `Note Sync`.
pub fn title_case(id: &str) -> String {
    id.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
