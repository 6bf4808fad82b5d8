//! Claim token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use seatlock_core::result::AppResult;
use seatlock_core::types::ClaimToken;

/// Number of random bytes in a token (128 bits).
pub const TOKEN_BYTES: usize = 16;

/// Generates unguessable claim tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    /// Creates a new token generator.
    pub fn new() -> Self {
        Self
    }

    /// Draws a fresh token from the thread-local CSPRNG, encoded as
    /// URL-safe base64 without padding.
    pub fn generate(&self) -> AppResult<ClaimToken> {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        ClaimToken::new(URL_SAFE_NO_PAD.encode(bytes))
    }
}
