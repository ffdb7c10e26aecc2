//! URL helper functions

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;

lazy_static! {
    static ref ABSOLUTE_URL: Regex = Regex::new(r"(?i)^https?://").unwrap();
}

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Whether `url` already carries an http(s) scheme
pub fn is_absolute(url: &str) -> bool {
    ABSOLUTE_URL.is_match(url)
}

/// Resolve a CMS media path against the API base
///
/// # Examples
/// ```ignore
/// absolutize("http://cms:1337", "/uploads/a.jpg") // -> "http://cms:1337/uploads/a.jpg"
/// absolutize("http://cms:1337", "https://cdn/a.jpg") // -> "https://cdn/a.jpg"
/// ```
pub fn absolutize(base: &str, url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if is_absolute(url) {
        return Some(url.to_string());
    }

    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        Some(format!("{}{}", base, url))
    } else {
        Some(format!("{}/{}", base, url))
    }
}

/// Build a site path such as `/writing/essays/my-post/`
pub fn section_path(section: &str, segments: &[&str]) -> String {
    let mut path = format!("/{}/", section);
    for segment in segments {
        path.push_str(&encode_segment(segment));
        path.push('/');
    }
    path
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decode a percent-encoded path segment
pub fn decode_segment(segment: &str) -> String {
    percent_encoding::percent_decode_str(segment)
        .decode_utf8_lossy()
        .to_string()
}

/// Uppercase the first character (`"essays"` -> `"Essays"`)
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
