//! Pending session establishment.

use crate::http::response::Cookie;
use uuid::Uuid;

/// A session the transport layer wants established on the outgoing response.
///
/// The dispatcher attaches it as a cookie to whatever response leaves the
/// core, duplicating cached responses first so the shared slot never carries
/// a per-client cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
}

impl Session {
    /// Generate a fresh session with a UUID v4 id.
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }

    /// Wrap an id produced elsewhere.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn cookie(&self, cookie_name: &str) -> Cookie {
        Cookie::new(cookie_name, self.id.clone())
    }
}
