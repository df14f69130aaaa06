//! Student portal links
//!
//! Builds the URL encoded into the check-in QR code and pulls the token
//! back out of whatever a scanner hands us (a full URL or the bare token).

use reqwest::Url;

use crate::core::models::CheckinToken;

/// Path of the student check-in page under the portal origin
pub const STUDENT_PATH: &str = "student";

/// Query parameter carrying the token
pub const TOKEN_PARAM: &str = "token";

/// Build `<origin>/student?token=<token>` with the token percent-encoded
pub fn portal_url(origin: &str, token: &CheckinToken) -> anyhow::Result<Url> {
    let base = format!("{}/{STUDENT_PATH}", origin.trim_end_matches('/'));
    let mut url = Url::parse(&base)
        .map_err(|e| anyhow::anyhow!("Invalid portal origin {origin:?}: {e}"))?;
    url.query_pairs_mut().append_pair(TOKEN_PARAM, &token.encode());
    Ok(url)
}

/// Extract the raw token from a portal URL or a bare token
///
/// Returns `None` for blank input or a URL without a `token` parameter.
#[must_use]
pub fn extract_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url
            .query_pairs()
            .find(|(key, _)| key == TOKEN_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.trim().is_empty()),
        _ => Some(input.to_string()),
    }
}
