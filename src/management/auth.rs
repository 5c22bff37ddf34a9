use chrono::Utc;

use crate::types::Token;

/// Tokens are renewed this many seconds before they actually expire.
const EXPIRY_MARGIN: u64 = 240;

#[derive(Debug, Default)]
pub struct TokenManager {
    token: Option<Token>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager { token: None }
    }

    /// Returns the cached access token unless it is missing or about to expire.
    pub fn valid_token(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.token.as_ref().map(|t| t.access_token.as_str())
    }

    pub fn store(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    fn is_expired(&self) -> bool {
        match &self.token {
            Some(token) => {
                let now = Utc::now().timestamp() as u64;
                now >= token.obtained_at + token.expires_in.saturating_sub(EXPIRY_MARGIN)
            }
            None => true,
        }
    }
}
