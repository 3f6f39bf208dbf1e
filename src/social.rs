use crate::model::{RawSocial, SocialFields, SocialIdentity};
use regex::Regex;
use std::sync::LazyLock;

static RE_PROFILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*://)?([^/?#\s]+\.[^/?#\s]+)(/[^?#]*)?(?:\?([^#]*))?")
        .unwrap()
});

/// Resolves any raw social shape into one identity, or `None` when no
/// signal survives.
pub fn normalize_social(raw: &RawSocial) -> Option<SocialIdentity> {
    match raw {
        RawSocial::Absent => None,
        RawSocial::Label(platform) => resolve(&SocialFields {
            platform: platform.clone(),
            ..SocialFields::default()
        }),
        RawSocial::Fields(fields) => resolve(fields),
    }
}

pub fn resolve(fields: &SocialFields) -> Option<SocialIdentity> {
    let platform = fields.platform.trim().to_lowercase();
    let username = fields.username.trim().to_string();
    let legacy_url = fields.url.trim().to_string();

    // First non-empty candidate wins; a handle that strips to nothing
    // falls through to the next source.
    let uid = Some(strip_at(&fields.uid))
        .filter(|uid| !uid.is_empty())
        .or_else(|| uid_from_username(&username))
        .or_else(|| uid_from_url(&legacy_url))
        .unwrap_or_default();

    let url = canonical_url(&platform, &uid).unwrap_or(legacy_url);

    if platform.is_empty() && uid.is_empty() && username.is_empty() && url.is_empty() {
        return None;
    }
    Some(SocialIdentity {
        platform,
        uid,
        username,
        url,
    })
}

fn uid_from_username(username: &str) -> Option<String> {
    if username.contains("://") {
        return uid_from_url(username);
    }
    Some(strip_at(username)).filter(|uid| !uid.is_empty())
}

/// Drops every leading `@` and surrounding whitespace, however interleaved.
fn strip_at(handle: &str) -> String {
    handle
        .trim_start_matches(|c: char| c == '@' || c.is_whitespace())
        .trim_end()
        .to_string()
}

/// Per-platform profile URL template. `None` for unknown platforms or a
/// missing uid.
pub fn canonical_url(platform: &str, uid: &str) -> Option<String> {
    if uid.is_empty() {
        return None;
    }
    let url = match platform {
        "facebook" => format!("https://www.facebook.com/{uid}"),
        "instagram" => format!("https://www.instagram.com/{uid}"),
        "tiktok" => format!("https://www.tiktok.com/@{uid}"),
        "threads" => format!("https://www.threads.net/@{uid}"),
        "twitter" | "x" => format!("https://x.com/{uid}"),
        "youtube" if uid.starts_with("channel/") => format!("https://www.youtube.com/{uid}"),
        "youtube" => format!("https://www.youtube.com/@{uid}"),
        "github" => format!("https://github.com/{uid}"),
        "telegram" => format!("https://t.me/{uid}"),
        "discord" => format!("https://discord.com/users/{uid}"),
        _ => return None,
    };
    Some(url)
}

/// Pulls the handle out of a profile URL path.
pub fn uid_from_url(url: &str) -> Option<String> {
    let caps = RE_PROFILE_URL.captures(url.trim())?;
    let path = caps.get(2).map_or("", |m| m.as_str());
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let first = *segments.first()?;

    if first.eq_ignore_ascii_case("profile.php") {
        let query = caps.get(3).map_or("", |m| m.as_str());
        return query
            .split('&')
            .find_map(|pair| pair.strip_prefix("id="))
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string());
    }
    if segments.len() >= 2 && first.eq_ignore_ascii_case("channel") {
        return Some(format!("channel/{}", segments[1]));
    }
    let handle = if segments.len() >= 2 && first.eq_ignore_ascii_case("users") {
        segments[1]
    } else {
        first
    };
    Some(strip_at(handle)).filter(|uid| !uid.is_empty())
}
