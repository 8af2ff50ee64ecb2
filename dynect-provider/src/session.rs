/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "Auth-Token";

/// Headers sent on every request, before and after login.
pub(crate) fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ]
}

/// An authenticated API session.
///
/// Created by [`ApiClient::login`](crate::ApiClient::login) and immutable
/// afterwards; every call borrows it for its endpoint and headers.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    token: String,
    headers: Vec<(String, String)>,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let token = token.into();
        let mut headers = default_headers();
        headers.push((AUTH_TOKEN_HEADER.to_string(), token.clone()));
        Self {
            base_url: base_url.into(),
            token,
            headers,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &"********")
            .finish_non_exhaustive()
    }
}
