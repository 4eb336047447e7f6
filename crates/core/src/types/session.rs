//! Conversation session identifiers.
//!
//! Dialogflow does not send the session as a standalone field the webhook can
//! rely on; it is embedded in every output context name:
//!
//! ```text
//! projects/<project>/agent/sessions/<SESSION>/contexts/<context>
//! ```
//!
//! [`SessionId::from_context_name`] extracts `<SESSION>` from such a name.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the session segment of an output context name (shortest match).
static SESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/sessions/(.*?)/contexts/").expect("Invalid regex"));

/// Identifier of a conversation, scoping that conversation's cart.
///
/// The empty session is valid: it is what an unparseable context name
/// resolves to, and every such request shares one anonymous cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an already-extracted session identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the session from an output context name.
    ///
    /// Returns the empty session when the name has no
    /// `/sessions/<id>/contexts/` segment.
    #[must_use]
    pub fn from_context_name(name: &str) -> Self {
        SESSION_RE
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map_or_else(Self::default, |m| Self(m.as_str().to_owned()))
    }

    /// Whether this is the shared anonymous session.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the session as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
