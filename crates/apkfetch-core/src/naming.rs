//! Local file names for downloaded APKs.
//!
//! The name comes from the last path segment of the download link, percent
//! decoded, reduced to a single safe path component and given an `.apk`
//! extension when it has none.

use std::borrow::Cow;
use std::path::Path;

/// Used when the link yields nothing usable.
pub const DEFAULT_FILE_NAME: &str = "download.apk";

const APK_EXTENSION: &str = "apk";
const MAX_NAME_BYTES: usize = 255;

/// Derives the local APK file name for `url`.
///
/// - `derive_file_name("https://example.com/apps/app-release.apk")` → `"app-release.apk"`
/// - `derive_file_name("https://example.com/get/com.example.app")` → `"com.example.app.apk"`
/// - `derive_file_name("https://example.com/")` → `"download.apk"`
pub fn derive_file_name(url: &str) -> String {
    file_name_from_link(url)
        .and_then(|segment| apk_file_name(&segment))
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

/// Last non-empty path segment of `url`, percent-decoded.
///
/// Segments that do not decode to UTF-8 are returned still encoded.
pub fn file_name_from_link(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment));
    Some(decoded.into_owned())
}

/// Turns a candidate name into a safe APK file name, or None if nothing
/// usable is left.
pub fn apk_file_name(candidate: &str) -> Option<String> {
    let name = sanitize_file_name(candidate);
    if name.is_empty() {
        return None;
    }
    let has_apk_ext = Path::new(&name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(APK_EXTENSION));
    let name = if has_apk_ext {
        name
    } else {
        format!("{}.{}", name, APK_EXTENSION)
    };
    Some(fit_length(name))
}

/// Reduces `name` to one path component.
///
/// Runs of separators, NUL, control and whitespace characters become a
/// single `_`; leading and trailing dots and underscores are dropped, so
/// `..` and hidden names cannot come through.
pub fn sanitize_file_name(name: &str) -> String {
    let joined = name
        .split(|c: char| matches!(c, '/' | '\\' | '\0') || c.is_control() || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    joined.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Caps `name` at the file-system limit, cutting the stem and keeping the
/// extension.
fn fit_length(name: String) -> String {
    if name.len() <= MAX_NAME_BYTES {
        return name;
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name.as_str(), ""),
    };
    let mut keep = MAX_NAME_BYTES.saturating_sub(ext.len());
    while !stem.is_char_boundary(keep) {
        keep -= 1;
    }
    format!("{}{}", &stem[..keep], ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_apk_link() {
        assert_eq!(
            derive_file_name("https://example.com/apps/app-release.apk"),
            "app-release.apk"
        );
        assert_eq!(
            derive_file_name("http://mirror.example.org/com.example.app_42.apk?dl=1"),
            "com.example.app_42.apk"
        );
    }

    #[test]
    fn package_link_without_extension_gets_apk() {
        assert_eq!(
            derive_file_name("https://store.example.com/get/com.example.app"),
            "com.example.app.apk"
        );
        assert_eq!(
            derive_file_name("https://store.example.com/dl/com.example.app/"),
            "com.example.app.apk"
        );
    }

    #[test]
    fn uppercase_extension_is_kept() {
        assert_eq!(derive_file_name("https://example.com/Game.APK"), "Game.APK");
    }

    #[test]
    fn percent_escapes_are_decoded() {
        assert_eq!(
            file_name_from_link("https://example.com/my%20app.apk").as_deref(),
            Some("my app.apk")
        );
        assert_eq!(derive_file_name("https://example.com/my%20app.apk"), "my_app.apk");
        assert_eq!(
            derive_file_name("https://example.com/caf%C3%A9.apk"),
            "café.apk"
        );
    }

    #[test]
    fn encoded_separators_stay_in_one_component() {
        assert_eq!(
            derive_file_name("https://example.com/..%2F..%2Fetc%2Fevil.apk"),
            "etc_evil.apk"
        );
        assert_eq!(derive_file_name("https://example.com/%2E%2E"), DEFAULT_FILE_NAME);
    }

    #[test]
    fn undecodable_segment_is_kept_encoded() {
        assert_eq!(
            file_name_from_link("https://example.com/bad%FF.apk").as_deref(),
            Some("bad%FF.apk")
        );
    }

    #[test]
    fn no_usable_segment_falls_back() {
        assert_eq!(derive_file_name("https://example.com/"), DEFAULT_FILE_NAME);
        assert_eq!(derive_file_name("https://example.com"), DEFAULT_FILE_NAME);
        assert_eq!(derive_file_name("https://example.com/a/.../"), DEFAULT_FILE_NAME);
        assert_eq!(derive_file_name("not a url"), DEFAULT_FILE_NAME);
    }

    #[test]
    fn explicit_names_are_single_components() {
        assert_eq!(apk_file_name("../custom.apk").as_deref(), Some("custom.apk"));
        assert_eq!(apk_file_name("builds\\nightly build").as_deref(), Some("builds_nightly_build.apk"));
        assert_eq!(apk_file_name("app\x00\x07v2.apk").as_deref(), Some("app_v2.apk"));
        assert_eq!(apk_file_name(" .. "), None);
    }

    #[test]
    fn long_names_keep_the_apk_extension() {
        let name = apk_file_name(&"é".repeat(200)).unwrap();
        assert!(name.len() <= MAX_NAME_BYTES);
        assert!(name.ends_with(".apk"));
        assert!(name.trim_end_matches(".apk").chars().all(|c| c == 'é'));
    }
}
