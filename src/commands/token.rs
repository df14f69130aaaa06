//! Token commands - issue QR tokens and check their freshness

use chrono::{DateTime, Utc};

use rollcall::config::RollcallConfig;
use rollcall::core::models::CheckinToken;
use rollcall::core::ports::{Clock, SystemClock};
use rollcall::output::{IssuedToken, OutputMode, TokenReport};
use rollcall::qr_link;

/// Issue a token and print the portal link for the QR code
pub fn token_issue(
    config: &RollcallConfig,
    at: Option<i64>,
    origin: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let issued_at = at.unwrap_or_else(|| SystemClock.now_millis());
    let token = CheckinToken::issue(issued_at);
    let origin = origin.unwrap_or(&config.portal.origin);
    let url = qr_link::portal_url(origin, &token)?;

    let validity = i64::try_from(config.token.policy()?.validity().as_millis())?;
    let result = IssuedToken {
        token: token.encode(),
        issued_at_millis: issued_at,
        issued_at: rfc3339(issued_at)?,
        expires_at: rfc3339(issued_at.saturating_add(validity))?,
        url: url.to_string(),
    };
    result.render(mode);
    Ok(())
}

/// Check a token (or portal URL); exits 1 when it is not accepted
pub fn token_check(
    config: &RollcallConfig,
    input: &str,
    now: Option<i64>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let raw = qr_link::extract_token(input);
    let now = now.unwrap_or_else(|| SystemClock.now_millis());
    let status = config.token.policy()?.evaluate(raw.as_deref(), now);

    let report = TokenReport::new(raw, status);
    report.render(mode);

    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}

fn rfc3339(millis: i64) -> anyhow::Result<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339())
        .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {millis}"))
}
