//! One-shot flash messages.
//!
//! Form endpoints always redirect back to the listing page; the outcome
//! of the operation travels in a signed cookie and is consumed by the
//! next render. Consumed means gone: the render that shows a flash also
//! removes its cookie, so a reload shows a clean page.
//!
//! The cookie is signed, not encrypted. Flash text is user-facing
//! anyway; signing only stops clients from forging levels or messages.

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::{Deserialize, Serialize};

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "todo_flash";

/// Severity of a flash message, mirrored by the banner style on the
/// listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// The operation succeeded.
    Success,
    /// The operation failed or the input was rejected.
    Error,
}

impl FlashLevel {
    /// Returns the lowercase label used as a CSS class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A one-shot notification shown on the next listing render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Severity.
    pub level: FlashLevel,
    /// User-facing text.
    pub message: String,
}

impl Flash {
    /// Creates a success flash.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error flash.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Stores a flash in the jar, replacing any unconsumed one.
#[must_use]
pub fn set_flash(jar: SignedCookieJar, flash: &Flash) -> SignedCookieJar {
    match serde_json::to_string(flash) {
        Ok(payload) => {
            let mut cookie = Cookie::new(FLASH_COOKIE, payload);
            cookie.set_path("/");
            cookie.set_http_only(true);
            jar.add(cookie)
        }
        Err(error) => {
            tracing::warn!(%error, "Failed to encode flash message");
            jar
        }
    }
}

/// Takes the pending flash out of the jar, if any.
///
/// The returned jar carries the removal; it must make it into the
/// response for the flash to actually be consumed.
#[must_use]
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok());

    if flash.is_some() {
        // The removal cookie must match the path the flash was set on.
        let mut removal = Cookie::new(FLASH_COOKIE, "");
        removal.set_path("/");
        return (jar.remove(removal), flash);
    }

    (jar, flash)
}
