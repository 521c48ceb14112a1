use axum::http::{header, HeaderName, HeaderValue};
use std::env;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";

/// Response headers applied to every route. HSTS only makes sense behind
/// HTTPS, so it is gated on `RUST_ENV=production`.
pub fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    let mut headers = vec![
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static(NOSNIFF),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static(DENY)),
        (
            header::X_XSS_PROTECTION,
            HeaderValue::from_static(XSS_BLOCK),
        ),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CSP_API_VALUE),
        ),
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static(REFERRER_POLICY_VALUE),
        ),
    ];

    if is_production() {
        tracing::info!("Security: HSTS header enabled (production mode)");
        headers.push((
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        ));
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }

    headers
}

fn is_production() -> bool {
    env::var("RUST_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false)
}
