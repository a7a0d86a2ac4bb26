mod cookie;
mod token;

pub use cookie::{AUTH_COOKIE, COOKIE_MAX_AGE_SECS, DeliveryPolicy, build_auth_cookie};
pub use token::{Claims, TOKEN_TTL_SECS, authorize, issue, issue_at};
