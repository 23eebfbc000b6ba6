//! Strongly-typed identifier wrappers to prevent accidental misuse of strings.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server part of a user (direct chat) address.
pub const USER_SERVER: &str = "s.whatsapp.net";
/// Server part of a group chat address.
pub const GROUP_SERVER: &str = "g.us";

/// A WhatsApp address (jid) such as `49170000000@s.whatsapp.net` or
/// `1234-5678@g.us`. Uses `Arc<str>` internally so cloning is an atomic
/// increment instead of a heap allocation.
///
/// The bot's own jid may carry a device suffix in the user part
/// (`49170000000:12@s.whatsapp.net`); [`Jid::bare`] strips both the
/// device suffix and the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jid(Arc<str>);

impl Jid {
    /// Create a new Jid from any string-like value.
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self(raw.into())
    }

    /// Build a user jid from a phone number. Values that already carry a
    /// server part are passed through unchanged.
    pub fn user(number: &str) -> Self {
        if number.contains('@') {
            Self::new(number)
        } else {
            Self::new(format!("{number}@{USER_SERVER}"))
        }
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare user part: everything before the server, with any device
    /// suffix (`:12`) removed.
    pub fn bare(&self) -> &str {
        let user = self.0.split('@').next().unwrap_or(&self.0);
        user.split(':').next().unwrap_or(user)
    }

    /// The server part, if present.
    pub fn server(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, server)| server)
    }

    /// Whether this address refers to a group chat.
    pub fn is_group(&self) -> bool {
        self.server() == Some(GROUP_SERVER)
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Jid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Jid {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Jid {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for Jid {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Jid {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for Jid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Jid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Jid::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_jid_from_number() {
        let jid = Jid::user("49170000000");
        assert_eq!(jid, "49170000000@s.whatsapp.net");
        assert_eq!(jid.bare(), "49170000000");
        assert!(!jid.is_group());
    }

    #[test]
    fn user_jid_passthrough() {
        let jid = Jid::user("49170000000@s.whatsapp.net");
        assert_eq!(jid, "49170000000@s.whatsapp.net");
    }

    #[test]
    fn group_jid_detected() {
        let jid = Jid::new("1234-5678@g.us");
        assert!(jid.is_group());
        assert_eq!(jid.bare(), "1234-5678");
    }

    #[test]
    fn bare_strips_device_suffix() {
        let jid = Jid::new("49170000000:12@s.whatsapp.net");
        assert_eq!(jid.bare(), "49170000000");
    }

    #[test]
    fn bare_of_plain_string() {
        let jid = Jid::new("49170000000");
        assert_eq!(jid.bare(), "49170000000");
        assert_eq!(jid.server(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let jid = Jid::new("x@g.us");
        let json = serde_json::to_string(&jid).unwrap();
        assert_eq!(json, "\"x@g.us\"");
        let back: Jid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, jid);
    }
}
