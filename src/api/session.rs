//! Session cookie handling
//!
//! The session token travels in an HttpOnly cookie. Non-browser clients may
//! send the same token via `Authorization: Bearer <token>` instead.

use axum::http::{header, HeaderMap};

/// Builds and reads the session cookie
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
    max_age_seconds: u64,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool, expiration_hours: u64) -> Self {
        Self {
            name: name.into(),
            secure,
            max_age_seconds: expiration_hours.saturating_mul(3600),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Set-Cookie` value that stores the given token
    pub fn set(&self, token: &str) -> String {
        self.build(token, self.max_age_seconds)
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear(&self) -> String {
        self.build("", 0)
    }

    fn build(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Extract the session token from the request headers
    ///
    /// The cookie wins over the Authorization header when both are present.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        self.read_cookie(headers)
            .or_else(|| extract_bearer_token(headers))
    }

    fn read_cookie(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie() -> SessionCookie {
        SessionCookie::new("focus_battle_session", false, 168)
    }

    #[test]
    fn test_set_cookie_attributes() {
        let value = cookie().set("abc.def.ghi");

        assert!(value.starts_with("focus_battle_session=abc.def.ghi;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=604800"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn test_secure_flag() {
        let value = SessionCookie::new("s", true, 1).set("t");
        assert!(value.ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        let value = cookie().clear();
        assert!(value.starts_with("focus_battle_session=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; focus_battle_session=tok123; other=1"
                .parse()
                .unwrap(),
        );

        assert_eq!(cookie().read(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_read_ignores_similar_names() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "focus_battle_session_old=stale".parse().unwrap(),
        );

        assert_eq!(cookie().read(&headers), None);
    }

    #[test]
    fn test_empty_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "focus_battle_session=".parse().unwrap());

        assert_eq!(cookie().read(&headers), None);
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer   tok456  ".parse().unwrap());

        assert_eq!(cookie().read(&headers), Some("tok456".to_string()));
    }

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "focus_battle_session=from-cookie".parse().unwrap());
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());

        assert_eq!(cookie().read(&headers), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_invalid_auth_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert_eq!(extract_bearer_token(&headers), None);
    }
}
