//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, so they are easy to test.

use crate::error::ClientError;

/// Length of a YouTube video id
const VIDEO_ID_LEN: usize = 11;

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that ended the session
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Only a lost connection is worth another try
    if !matches!(error, ClientError::ConnectionError(_)) {
        return false;
    }

    current_attempt < max_attempts
}

/// Extract a YouTube video id from a link.
///
/// Understands `watch?v=` URLs, `youtu.be/` short links, `/embed/` URLs and bare ids.
/// Anything else is returned unchanged, since the server treats the id as opaque.
pub fn extract_video_id(input: &str) -> String {
    let input = input.trim();
    if is_bare_video_id(input) {
        return input.to_string();
    }

    if let Some(id) = query_param(input, "v") {
        return id.to_string();
    }
    for marker in ["youtu.be/", "/embed/", "/shorts/"] {
        if let Some((_, rest)) = input.split_once(marker) {
            let id = take_id(rest);
            if !id.is_empty() {
                return id.to_string();
            }
        }
    }

    input.to_string()
}

/// Whether the input already looks like a bare video id
pub fn is_bare_video_id(input: &str) -> bool {
    input.len() == VIDEO_ID_LEN
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| take_id(v))
        .filter(|v| !v.is_empty())
}

fn take_id(s: &str) -> &str {
    let end = s.find(['?', '&', '#', '/']).unwrap_or(s.len());
    &s[..end]
}
