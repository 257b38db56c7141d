use serde::Deserialize;
use std::time::{Duration, Instant};

/// Margen antes de la caducidad real a partir del cual se pide otro token.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Vida máxima que se concede a un token, diga lo que diga `expires_in`.
const MAX_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
  pub access_token: String,
  #[serde(default)]
  pub expires_in: u64,
}

/// Token de client-credentials en caché.
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
  pub value: String,
  expires_at: Instant,
}

impl AccessToken {
  pub fn from_response(resp: TokenResponse, issued_at: Instant) -> Self {
    let lifetime = Duration::from_secs(resp.expires_in).min(MAX_LIFETIME).saturating_sub(REFRESH_MARGIN);
    // Si no cabe en un `Instant`, el token nace caducado y se pide otro.
    let expires_at = issued_at.checked_add(lifetime).unwrap_or(issued_at);
    AccessToken { value: resp.access_token, expires_at }
  }

  pub fn is_fresh(&self, now: Instant) -> bool {
    now < self.expires_at
  }
}
