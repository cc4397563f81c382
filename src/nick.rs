//! Nick identity parsing.
//!
//! An IRC message prefix that identifies a user has the shape
//! `nick[!user][@host]`. Only the nick is mandatory; the user and host
//! segments are independently absent. Server prefixes (bare hostnames)
//! also parse, as a bare nick.

/// A parsed `nick[!user][@host]` identity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NickIdentity {
    /// The nick. Always present and non-empty.
    pub nick: String,
    /// The user (ident) segment after `!`, if present.
    pub user: Option<String>,
    /// The host segment after `@`, if present.
    pub host: Option<String>,
}

impl NickIdentity {
    /// Parse a prefix string as a nick identity.
    ///
    /// Returns `None` when no usable nick can be extracted: an empty
    /// input, an empty nick segment, or an empty segment after `!` or
    /// `@`. A host without a user segment (`nick@host`) is accepted.
    #[must_use]
    pub fn parse(prefix: &str) -> Option<Self> {
        let (head, host) = match prefix.split_once('@') {
            Some((head, host)) => {
                if host.is_empty() {
                    return None;
                }
                (head, Some(host))
            }
            None => (prefix, None),
        };

        let (nick, user) = match head.split_once('!') {
            Some((nick, user)) => {
                if user.is_empty() {
                    return None;
                }
                (nick, Some(user))
            }
            None => (head, None),
        };

        if nick.is_empty() {
            return None;
        }

        Some(NickIdentity {
            nick: nick.to_string(),
            user: user.map(str::to_string),
            host: host.map(str::to_string),
        })
    }
}

impl std::fmt::Display for NickIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.nick)?;
        if let Some(ref user) = self.user {
            write!(f, "!{}", user)?;
        }
        if let Some(ref host) = self.host {
            write!(f, "@{}", host)?;
        }
        Ok(())
    }
}
