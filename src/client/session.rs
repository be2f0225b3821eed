use std::env;
use std::fmt;

/// Authentication context carried by a client.
///
/// Owned by the client that uses it; signing in or out only affects that
/// client.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Session {
    const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:3000";

    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn authenticated(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut session = Self::anonymous(base_url);
        session.sign_in(token);
        session
    }

    /// `API_BASE_URL` (default `http://127.0.0.1:3000`) and optional `API_TOKEN`
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err("API_BASE_URL must start with http:// or https://".to_string());
        }

        let session = match env::var("API_TOKEN").ok().filter(|t| !t.is_empty()) {
            Some(token) => Self::authenticated(base_url, token),
            None => Self::anonymous(base_url),
        };
        Ok(session)
    }

    pub fn sign_in(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn sign_out(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/tour-packages`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let mut session = Session::anonymous("http://localhost:3000/");
        assert!(!session.is_authenticated());
        assert_eq!(session.url("/api/tour-packages"), "http://localhost:3000/api/tour-packages");

        session.sign_in("token-1");
        assert_eq!(session.bearer(), Some("token-1"));

        session.sign_out();
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn test_sessions_are_independent() {
        let admin = Session::authenticated("http://localhost:3000", "token-1");
        let mut copy = admin.clone();
        copy.sign_out();

        assert!(admin.is_authenticated());
        assert!(!copy.is_authenticated());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::authenticated("http://localhost:3000", "very-secret");
        assert!(!format!("{:?}", session).contains("very-secret"));
    }
}
