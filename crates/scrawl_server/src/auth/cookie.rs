//! Credential delivery as a `Set-Cookie` header value.

use crate::config::DeploymentMode;

/// Cookie name carrying the pad credential.
pub const AUTH_COOKIE: &str = "auth";

/// Browser-side lifetime of the cookie, in seconds.
///
/// Deliberately shorter than the 24h token TTL: the browser stops
/// resending the cookie after an hour, while a token extracted from it
/// stays cryptographically valid for the full window. Pinned by tests;
/// tightening the asymmetry needs a call from the system owner first.
pub const COOKIE_MAX_AGE_SECS: u32 = 3600;

/// Transport-security attributes applied when delivering a credential.
///
/// Two independent booleans rather than one mode flag, so either
/// restriction can be kept in development without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Mark the cookie `Secure` (HTTPS-only transport).
    pub transport_restricted: bool,
    /// Mark the cookie `HttpOnly` (inaccessible to page scripts).
    pub script_access_restricted: bool,
}

impl DeliveryPolicy {
    /// Default policy for a deployment mode.
    ///
    /// Development runs over plain-text local transport, so `Secure` is
    /// relaxed there; `HttpOnly` is relaxed alongside it for devtools
    /// convenience but can be restored independently through config.
    pub fn for_mode(mode: DeploymentMode) -> Self {
        match mode {
            DeploymentMode::Production => Self {
                transport_restricted: true,
                script_access_restricted: true,
            },
            DeploymentMode::Development => Self {
                transport_restricted: false,
                script_access_restricted: false,
            },
        }
    }
}

/// Render the `Set-Cookie` header value delivering `token`.
pub fn build_auth_cookie(token: &str, policy: DeliveryPolicy) -> String {
    let mut cookie = format!("{AUTH_COOKIE}={token}; path=/; Max-Age={COOKIE_MAX_AGE_SECS}");
    if policy.transport_restricted {
        cookie.push_str("; Secure");
    }
    if policy.script_access_restricted {
        cookie.push_str("; HttpOnly");
    }
    cookie.push_str("; SameSite=Strict");
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_cookie_wire_format() {
        let policy = DeliveryPolicy::for_mode(DeploymentMode::Production);
        assert_eq!(
            build_auth_cookie("tok", policy),
            "auth=tok; path=/; Max-Age=3600; Secure; HttpOnly; SameSite=Strict"
        );
    }

    #[test]
    fn test_development_cookie_wire_format() {
        let policy = DeliveryPolicy::for_mode(DeploymentMode::Development);
        assert_eq!(
            build_auth_cookie("tok", policy),
            "auth=tok; path=/; Max-Age=3600; SameSite=Strict"
        );
    }

    #[test]
    fn test_attributes_are_independent() {
        let cookie = build_auth_cookie(
            "tok",
            DeliveryPolicy {
                transport_restricted: false,
                script_access_restricted: true,
            },
        );
        assert_eq!(
            cookie,
            "auth=tok; path=/; Max-Age=3600; HttpOnly; SameSite=Strict"
        );

        let cookie = build_auth_cookie(
            "tok",
            DeliveryPolicy {
                transport_restricted: true,
                script_access_restricted: false,
            },
        );
        assert_eq!(
            cookie,
            "auth=tok; path=/; Max-Age=3600; Secure; SameSite=Strict"
        );
    }
}
